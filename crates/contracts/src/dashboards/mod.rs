pub mod d100_financial_summary;
