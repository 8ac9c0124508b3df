use contracts::dashboards::d100_financial_summary::{CategoryExpense, MonthlyItem, TransactionSummary};
use contracts::shared::Period;
use leptos::prelude::*;

use super::charts::{pie_slices, ExpensesPieChart, MonthlyBarChart, PIE_PADDING_DEG};
use crate::dashboards::d100_financial_summary::feed::{watch_period, DashboardFeed, DashboardView};
use crate::layout::global_context::use_global_context;
use crate::shared::components::{DashboardCard, Glow, MonthYearSelect};
use crate::shared::format::format_currency;
use crate::shared::icons::icon;

/// Pushes feed results into the dashboard signals
#[derive(Clone, Copy)]
struct SignalView {
    summary: WriteSignal<TransactionSummary>,
    history: WriteSignal<Vec<MonthlyItem>>,
}

impl DashboardView for SignalView {
    fn show_summary(&self, summary: TransactionSummary) {
        self.summary.set(summary);
    }

    fn show_history(&self, history: Vec<MonthlyItem>) {
        self.history.set(history);
    }
}

/// Cards only glow while their amount is positive
fn glow_when_positive(value: f64, glow: Glow) -> Option<Glow> {
    (value > 0.0).then_some(glow)
}

/// Whether the donut would draw anything; non-positive amounts get no slice
fn has_expense_slices(items: &[CategoryExpense]) -> bool {
    !pie_slices(items, PIE_PADDING_DEG).is_empty()
}

fn result_class(value: f64) -> &'static str {
    if value < 0.0 {
        "dashboard-card__detail dashboard-card__detail--negative"
    } else {
        "dashboard-card__detail dashboard-card__detail--positive"
    }
}

#[component]
fn EmptyState(icon_name: &'static str, message: &'static str) -> impl IntoView {
    view! {
        <div class="dashboard-empty">
            {icon(icon_name)}
            <p>{message}</p>
        </div>
    }
}

/// Financial summary of one month: balance, incomes, expenses and charts
#[component]
pub fn FinancialSummaryDashboard() -> impl IntoView {
    let (period, set_period) = signal(Period::current());
    let (summary, set_summary) = signal(TransactionSummary::default());
    let (history, set_history) = signal(Vec::<MonthlyItem>::new());

    watch_period(
        period.into(),
        DashboardFeed::new(
            use_global_context().api(),
            SignalView {
                summary: set_summary,
                history: set_history,
            },
        ),
    );

    let balance = move || summary.with(|s| s.balance);
    let expenses_by_category = Signal::derive(move || summary.with(|s| s.expenses_by_category.clone()));
    let history_items = Signal::derive(move || history.get());

    view! {
        <div class="dashboard">
            <div class="dashboard__toolbar">
                <h1 class="dashboard__title">"Resumo financeiro"</h1>
                <MonthYearSelect
                    period=period
                    on_change=Callback::new(move |selected: Period| set_period.set(selected))
                />
            </div>

            <div class="dashboard__cards">
                <DashboardCard
                    title="Saldo"
                    icon_name="wallet"
                    glow=Signal::derive(move || glow_when_positive(balance(), Glow::Blue))
                    hover=true
                >
                    <p class="dashboard-card__value">{move || format_currency(balance())}</p>
                    <p class="dashboard-card__detail">
                        "Saldo anterior: "
                        {move || format_currency(summary.with(|s| s.previous_balance))}
                    </p>
                    <p class=move || result_class(summary.with(|s| s.month_result))>
                        "Resultado do mês: "
                        {move || format_currency(summary.with(|s| s.month_result))}
                    </p>
                </DashboardCard>

                <DashboardCard
                    title="Receitas"
                    icon_name="banknote-up"
                    glow=Signal::derive(move || {
                        glow_when_positive(summary.with(|s| s.total_incomes), Glow::Green)
                    })
                    hover=true
                    delay_ms=60
                >
                    <p class="dashboard-card__value">
                        {move || format_currency(summary.with(|s| s.total_incomes))}
                    </p>
                </DashboardCard>

                <DashboardCard
                    title="Despesas"
                    icon_name="banknote-down"
                    glow=Signal::derive(move || {
                        glow_when_positive(summary.with(|s| s.total_expenses), Glow::Red)
                    })
                    hover=true
                    delay_ms=120
                >
                    <p class="dashboard-card__value">
                        {move || format_currency(summary.with(|s| s.total_expenses))}
                    </p>
                </DashboardCard>
            </div>

            <div class="dashboard__charts">
                <DashboardCard
                    title="Despesas por categoria"
                    icon_name="chart"
                    delay_ms=180
                >
                    <Show
                        when=move || expenses_by_category.with(|items| has_expense_slices(items))
                        fallback=|| view! {
                            <EmptyState
                                icon_name="calendar-search"
                                message="Nenhuma despesa registrada nesse período"
                            />
                        }
                    >
                        <ExpensesPieChart items=expenses_by_category />
                    </Show>
                </DashboardCard>

                <DashboardCard
                    title="Histórico mensal"
                    subtitle="Despesas e receitas dos últimos meses"
                    icon_name="trending-up"
                    delay_ms=240
                >
                    <Show
                        when=move || history_items.with(|items| !items.is_empty())
                        fallback=|| view! {
                            <EmptyState
                                icon_name="clock-alert"
                                message="Nenhuma movimentação nos últimos meses"
                            />
                        }
                    >
                        <MonthlyBarChart items=history_items />
                    </Show>
                </DashboardCard>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glow_only_for_positive_amounts() {
        assert_eq!(glow_when_positive(0.01, Glow::Blue), Some(Glow::Blue));
        assert_eq!(glow_when_positive(0.0, Glow::Blue), None);
        assert_eq!(glow_when_positive(-10.0, Glow::Red), None);
    }

    fn expense(amount: f64) -> CategoryExpense {
        CategoryExpense {
            category_id: "c1".to_string(),
            category_name: "Mercado".to_string(),
            category_color: "#ff0000".to_string(),
            amount,
        }
    }

    #[test]
    fn test_zero_expenses_show_empty_state() {
        assert!(!has_expense_slices(&[]));
        assert!(!has_expense_slices(&[expense(0.0), expense(0.0)]));
        assert!(has_expense_slices(&[expense(0.0), expense(12.5)]));
    }

    #[test]
    fn test_result_class() {
        assert!(result_class(-1.0).ends_with("--negative"));
        assert!(result_class(0.0).ends_with("--positive"));
    }
}
