use serde::{Deserialize, Serialize};

use crate::shared::period::Period;

/// Query for `GET /transactions/summary`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryQuery {
    pub month: u32,
    pub year: i32,
}

impl From<Period> for SummaryQuery {
    fn from(period: Period) -> Self {
        Self {
            month: period.month(),
            year: period.year(),
        }
    }
}

/// Query for `GET /transactions/monthly`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyHistoryQuery {
    pub month: u32,
    pub year: i32,
    /// Number of periods to return, ending at (month, year)
    pub limit: u32,
}

impl MonthlyHistoryQuery {
    pub fn new(period: Period, limit: u32) -> Self {
        Self {
            month: period.month(),
            year: period.year(),
            limit,
        }
    }
}

/// Aggregated totals for one (month, year) period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total_expenses: f64,
    pub total_incomes: f64,
    pub balance: f64,
    pub previous_balance: f64,
    /// Incomes minus expenses of the period alone
    #[serde(default)]
    pub month_result: f64,
    #[serde(default)]
    pub expenses_by_category: Vec<CategoryExpense>,
}

/// One slice of the expenses-by-category breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryExpense {
    pub category_id: String,
    pub category_name: String,
    /// CSS colour, e.g. "#ff8800"
    pub category_color: String,
    pub amount: f64,
}

/// One bucket of the monthly history chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyItem {
    /// Display label of the period, e.g. "mar/25"
    pub name: String,
    pub expenses: f64,
    pub income: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyHistoryResponse {
    #[serde(default)]
    pub history: Vec<MonthlyItem>,
}
