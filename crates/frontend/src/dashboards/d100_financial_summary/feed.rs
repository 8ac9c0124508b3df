use contracts::dashboards::d100_financial_summary::{MonthlyItem, TransactionSummary};
use contracts::shared::Period;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api::{self, HISTORY_LIMIT};
use crate::shared::http::ApiClient;

/// Receiver of freshly fetched dashboard data
pub trait DashboardView {
    fn show_summary(&self, summary: TransactionSummary);
    fn show_history(&self, history: Vec<MonthlyItem>);
}

/// Fetches dashboard data and pushes successful results into a view.
///
/// Loads are independent and never cancelled: when several are in flight,
/// whichever resolves last is what the view shows. Failures are logged and
/// leave the view as it was.
#[derive(Clone)]
pub struct DashboardFeed<V> {
    client: ApiClient,
    view: V,
}

impl<V: DashboardView> DashboardFeed<V> {
    pub fn new(client: ApiClient, view: V) -> Self {
        Self { client, view }
    }

    pub async fn load_summary(&self, period: Period) {
        match api::get_transactions_summary(&self.client, period).await {
            Ok(summary) => self.view.show_summary(summary),
            Err(e) => log::error!("Failed to load summary for {}: {}", period, e),
        }
    }

    pub async fn load_history(&self, period: Period) {
        match api::get_transactions_monthly(&self.client, period, HISTORY_LIMIT).await {
            Ok(history) => self.view.show_history(history),
            Err(e) => log::error!("Failed to load monthly history for {}: {}", period, e),
        }
    }
}

/// Loads the summary and the history once for the current period, then once
/// more for every change of `period`
pub fn watch_period<V>(period: Signal<Period>, feed: DashboardFeed<V>)
where
    V: DashboardView + Clone + 'static,
{
    let feed = StoredValue::new_local(feed);

    Effect::new(move |_| {
        let selected = period.get();
        log::debug!("Loading financial summary for {}", selected);

        let summary_feed = feed.get_value();
        spawn_local(async move {
            summary_feed.load_summary(selected).await;
        });

        let history_feed = feed.get_value();
        spawn_local(async move {
            history_feed.load_history(selected).await;
        });
    });
}
