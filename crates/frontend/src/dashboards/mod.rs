pub mod d100_financial_summary;

pub use d100_financial_summary::ui::FinancialSummaryDashboard;
