pub mod dto;

pub use dto::{
    CategoryExpense, MonthlyHistoryQuery, MonthlyHistoryResponse, MonthlyItem, SummaryQuery,
    TransactionSummary,
};
