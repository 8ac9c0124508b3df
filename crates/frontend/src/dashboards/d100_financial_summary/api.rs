use contracts::dashboards::d100_financial_summary::{
    MonthlyHistoryQuery, MonthlyHistoryResponse, MonthlyItem, SummaryQuery, TransactionSummary,
};
use contracts::shared::Period;

use crate::shared::http::{ApiClient, ApiError};

const SUMMARY_PATH: &str = "/transactions/summary";
const MONTHLY_PATH: &str = "/transactions/monthly";

/// Number of history buckets the dashboard asks for
pub const HISTORY_LIMIT: u32 = 5;

/// Totals and category breakdown for `period`
pub async fn get_transactions_summary(
    client: &ApiClient,
    period: Period,
) -> Result<TransactionSummary, ApiError> {
    client
        .get_json(SUMMARY_PATH, &SummaryQuery::from(period))
        .await
}

/// Up to `limit` monthly buckets ending at `period`
pub async fn get_transactions_monthly(
    client: &ApiClient,
    period: Period,
    limit: u32,
) -> Result<Vec<MonthlyItem>, ApiError> {
    let response: MonthlyHistoryResponse = client
        .get_json(MONTHLY_PATH, &MonthlyHistoryQuery::new(period, limit))
        .await?;
    Ok(response.history)
}
