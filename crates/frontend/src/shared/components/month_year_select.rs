use chrono::{Datelike, Local};
use contracts::shared::Period;
use leptos::prelude::*;
use thaw::*;

pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Years listed before the current one
const YEARS_BACK: i32 = 5;

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// From `YEARS_BACK` years ago through next year, widened to include `selected`
pub fn year_options(selected: i32, current: i32) -> Vec<i32> {
    let first = (current - YEARS_BACK).min(selected);
    let last = (current + 1).max(selected);
    (first..=last).collect()
}

/// Month and year dropdowns with previous/next buttons
#[component]
pub fn MonthYearSelect(
    #[prop(into)] period: Signal<Period>,
    /// Called with the newly selected period
    on_change: Callback<Period>,
) -> impl IntoView {
    let current_year = Local::now().date_naive().year();

    let on_month_change = move |ev: leptos::ev::Event| {
        let Ok(month) = event_target_value(&ev).parse::<u32>() else {
            return;
        };
        match Period::new(month, period.get_untracked().year()) {
            Ok(selected) => on_change.run(selected),
            Err(e) => log::warn!("Ignoring month selection: {}", e),
        }
    };

    let on_year_change = move |ev: leptos::ev::Event| {
        let Ok(year) = event_target_value(&ev).parse::<i32>() else {
            return;
        };
        if let Ok(selected) = Period::new(period.get_untracked().month(), year) {
            on_change.run(selected);
        }
    };

    view! {
        <div class="month-year-select">
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Subtle
                on_click=move |_| on_change.run(period.get_untracked().previous())
            >
                {crate::shared::icons::icon("chevron-left")}
            </Button>

            <select
                class="month-year-select__month"
                aria-label="Mês"
                prop:value=move || period.get().month().to_string()
                on:change=on_month_change
            >
                {(1..=12u32)
                    .map(|month| {
                        view! { <option value=month.to_string()>{month_name(month)}</option> }
                    })
                    .collect_view()}
            </select>

            <select
                class="month-year-select__year"
                aria-label="Ano"
                prop:value=move || period.get().year().to_string()
                on:change=on_year_change
            >
                {move || {
                    year_options(period.get().year(), current_year)
                        .into_iter()
                        .map(|year| view! { <option value=year.to_string()>{year}</option> })
                        .collect_view()
                }}
            </select>

            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Subtle
                on_click=move |_| on_change.run(period.get_untracked().next())
            >
                {crate::shared::icons::icon("chevron-right")}
            </Button>
        </div>
    }
}
