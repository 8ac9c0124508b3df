//! SVG charts for the summary dashboard: expenses-by-category donut and
//! monthly expense/income bars.

use contracts::dashboards::d100_financial_summary::{CategoryExpense, MonthlyItem};
use leptos::prelude::*;

use crate::shared::format::{format_currency, format_percent};

const PIE_SIZE: f64 = 240.0;
const PIE_OUTER_RADIUS: f64 = 80.0;
const PIE_INNER_RADIUS: f64 = 50.0;
/// Gap between neighbouring slices, in degrees
pub const PIE_PADDING_DEG: f64 = 2.0;

const BAR_WIDTH: f64 = 520.0;
const BAR_HEIGHT: f64 = 240.0;
const BAR_AXIS_WIDTH: f64 = 90.0;
const BAR_LABEL_HEIGHT: f64 = 24.0;
const BAR_TICKS: u32 = 4;

const EXPENSE_COLOR: &str = "#b70040";
const INCOME_COLOR: &str = "#0ac200";

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub name: String,
    pub color: String,
    pub amount: f64,
    /// Share of the total, 0.0..=1.0
    pub fraction: f64,
    /// Degrees clockwise from 12 o'clock
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Lays out slices for the positive amounts of `items`, in input order
pub fn pie_slices(items: &[CategoryExpense], padding_deg: f64) -> Vec<PieSlice> {
    let positive: Vec<&CategoryExpense> = items.iter().filter(|i| i.amount > 0.0).collect();
    let total: f64 = positive.iter().map(|i| i.amount).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let padding = if positive.len() > 1 { padding_deg } else { 0.0 };
    let available = 360.0 - padding * positive.len() as f64;

    let mut angle = 0.0;
    positive
        .into_iter()
        .map(|item| {
            let fraction = item.amount / total;
            let start_angle = angle;
            let end_angle = start_angle + fraction * available;
            angle = end_angle + padding;
            PieSlice {
                name: item.category_name.clone(),
                color: item.category_color.clone(),
                amount: item.amount,
                fraction,
                start_angle,
                end_angle,
            }
        })
        .collect()
}

fn polar(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let rad = (angle_deg - 90.0).to_radians();
    (cx + radius * rad.cos(), cy + radius * rad.sin())
}

/// SVG path of a donut segment between two angles
pub fn donut_path(cx: f64, cy: f64, outer: f64, inner: f64, start: f64, end: f64) -> String {
    // a full circle cannot be drawn as a single arc
    let end = end.min(start + 359.99);
    let large_arc = if end - start > 180.0 { 1 } else { 0 };

    let (x1, y1) = polar(cx, cy, outer, start);
    let (x2, y2) = polar(cx, cy, outer, end);
    let (x3, y3) = polar(cx, cy, inner, end);
    let (x4, y4) = polar(cx, cy, inner, start);

    format!(
        "M {:.2} {:.2} A {} {} 0 {} 1 {:.2} {:.2} L {:.2} {:.2} A {} {} 0 {} 0 {:.2} {:.2} Z",
        x1, y1, outer, outer, large_arc, x2, y2, x3, y3, inner, inner, large_arc, x4, y4
    )
}

/// Legend text for a slice, e.g. " mercado: 42.0%"
pub fn pie_label(name: &str, fraction: f64) -> String {
    format!(" {}: {}", name, format_percent(fraction))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub label: String,
    /// Horizontal centre of the group
    pub center: f64,
    pub expenses: Bar,
    pub income: Bar,
}

/// Scales each item's expenses and income into a `width` x `height` plot.
/// Bars are scaled against the largest value; negatives draw as zero.
pub fn bar_layout(items: &[MonthlyItem], width: f64, height: f64) -> Vec<BarGroup> {
    if items.is_empty() {
        return Vec::new();
    }

    let max = items
        .iter()
        .flat_map(|i| [i.expenses, i.income])
        .fold(0.0_f64, f64::max);
    let group_width = width / items.len() as f64;
    let bar_width = group_width * 0.35;
    let gap = group_width * 0.06;

    let bar = |x: f64, value: f64| {
        let bar_height = if max > 0.0 {
            value.max(0.0) / max * height
        } else {
            0.0
        };
        Bar {
            x,
            y: height - bar_height,
            width: bar_width,
            height: bar_height,
            value,
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let start = index as f64 * group_width;
            let expenses_x = start + (group_width - 2.0 * bar_width - gap) / 2.0;
            BarGroup {
                label: item.name.clone(),
                center: start + group_width / 2.0,
                expenses: bar(expenses_x, item.expenses),
                income: bar(expenses_x + bar_width + gap, item.income),
            }
        })
        .collect()
}

/// Evenly spaced axis values from 0 to `max`, inclusive
pub fn axis_ticks(max: f64, count: u32) -> Vec<f64> {
    if max <= 0.0 || count == 0 {
        return vec![0.0];
    }
    (0..=count).map(|i| max * i as f64 / count as f64).collect()
}

#[component]
pub fn ExpensesPieChart(#[prop(into)] items: Signal<Vec<CategoryExpense>>) -> impl IntoView {
    let center = PIE_SIZE / 2.0;
    let slices = Memo::new(move |_| items.with(|items| pie_slices(items, PIE_PADDING_DEG)));

    view! {
        <div class="pie-chart">
            <svg
                viewBox=format!("0 0 {} {}", PIE_SIZE, PIE_SIZE)
                class="pie-chart__svg"
                role="img"
                aria-label="Despesas por categoria"
            >
                {move || {
                    slices
                        .get()
                        .into_iter()
                        .map(|slice| {
                            let d = donut_path(
                                center,
                                center,
                                PIE_OUTER_RADIUS,
                                PIE_INNER_RADIUS,
                                slice.start_angle,
                                slice.end_angle,
                            );
                            let label = format!("{}: {}", slice.name, format_currency(slice.amount));
                            view! { <path d=d fill=slice.color aria-label=label /> }
                        })
                        .collect_view()
                }}
            </svg>
            <ul class="pie-chart__legend">
                {move || {
                    slices
                        .get()
                        .into_iter()
                        .map(|slice| {
                            let swatch = format!("background: {};", slice.color);
                            view! {
                                <li class="pie-chart__legend-item">
                                    <span class="pie-chart__swatch" style=swatch></span>
                                    {pie_label(&slice.name, slice.fraction)}
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}

#[component]
pub fn MonthlyBarChart(#[prop(into)] items: Signal<Vec<MonthlyItem>>) -> impl IntoView {
    let plot_width = BAR_WIDTH - BAR_AXIS_WIDTH;
    let plot_height = BAR_HEIGHT - BAR_LABEL_HEIGHT;

    let groups = Memo::new(move |_| items.with(|items| bar_layout(items, plot_width, plot_height)));
    let ticks = Memo::new(move |_| {
        let max = items.with(|items| {
            items
                .iter()
                .flat_map(|i| [i.expenses, i.income])
                .fold(0.0_f64, f64::max)
        });
        axis_ticks(max, BAR_TICKS)
    });

    view! {
        <div class="bar-chart">
            <svg
                viewBox=format!("0 0 {} {}", BAR_WIDTH, BAR_HEIGHT)
                class="bar-chart__svg"
                role="img"
                aria-label="Histórico mensal"
            >
                <g class="bar-chart__axis">
                    {move || {
                        let ticks = ticks.get();
                        let top = ticks.last().copied().unwrap_or(0.0);
                        ticks
                            .into_iter()
                            .map(|value| {
                                let y = if top > 0.0 {
                                    plot_height - value / top * plot_height
                                } else {
                                    plot_height
                                };
                                view! {
                                    <line
                                        x1=BAR_AXIS_WIDTH
                                        x2=BAR_WIDTH
                                        y1=y
                                        y2=y
                                        stroke="#94a3b8"
                                        stroke-dasharray="3 3"
                                    />
                                    <text
                                        x=BAR_AXIS_WIDTH - 6.0
                                        y=y + 4.0
                                        text-anchor="end"
                                        font-size="10"
                                        fill="#94a3b8"
                                    >
                                        {format_currency(value)}
                                    </text>
                                }
                            })
                            .collect_view()
                    }}
                </g>
                <g transform=format!("translate({}, 0)", BAR_AXIS_WIDTH)>
                    {move || {
                        groups
                            .get()
                            .into_iter()
                            .map(|group| {
                                let expenses_label = format!("DESPESA: {}", format_currency(group.expenses.value));
                                let income_label = format!("RECEITA: {}", format_currency(group.income.value));
                                view! {
                                    <rect
                                        x=group.expenses.x
                                        y=group.expenses.y
                                        width=group.expenses.width
                                        height=group.expenses.height
                                        fill=EXPENSE_COLOR
                                        aria-label=expenses_label
                                    />
                                    <rect
                                        x=group.income.x
                                        y=group.income.y
                                        width=group.income.width
                                        height=group.income.height
                                        fill=INCOME_COLOR
                                        aria-label=income_label
                                    />
                                    <text
                                        x=group.center
                                        y=BAR_HEIGHT - 6.0
                                        text-anchor="middle"
                                        font-size="11"
                                        fill="#94a3b8"
                                        class="bar-chart__label"
                                    >
                                        {group.label}
                                    </text>
                                }
                            })
                            .collect_view()
                    }}
                </g>
            </svg>
            <div class="bar-chart__legend">
                <span class="bar-chart__legend-item" style=format!("color: {};", EXPENSE_COLOR)>"DESPESA"</span>
                <span class="bar-chart__legend-item" style=format!("color: {};", INCOME_COLOR)>"RECEITA"</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(name: &str, amount: f64) -> CategoryExpense {
        CategoryExpense {
            category_id: name.to_string(),
            category_name: name.to_string(),
            category_color: "#123456".to_string(),
            amount,
        }
    }

    fn month(name: &str, expenses: f64, income: f64) -> MonthlyItem {
        MonthlyItem {
            name: name.to_string(),
            expenses,
            income,
        }
    }

    #[test]
    fn test_pie_slices_split_by_share() {
        let slices = pie_slices(&[expense("a", 30.0), expense("b", 10.0)], 2.0);

        assert_eq!(slices.len(), 2);
        assert!((slices[0].fraction - 0.75).abs() < 1e-9);
        assert!((slices[1].fraction - 0.25).abs() < 1e-9);
        // 356 degrees available after padding
        assert!((slices[0].end_angle - 267.0).abs() < 1e-9);
        assert!((slices[1].start_angle - 269.0).abs() < 1e-9);
        assert!((slices[1].end_angle - 358.0).abs() < 1e-9);
    }

    #[test]
    fn test_pie_slices_skip_non_positive() {
        assert!(pie_slices(&[expense("a", 0.0)], 2.0).is_empty());
        assert!(pie_slices(&[], 2.0).is_empty());

        let slices = pie_slices(&[expense("a", -5.0), expense("b", 5.0)], 2.0);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].end_angle, 360.0);
    }

    #[test]
    fn test_donut_path_full_circle_is_drawable() {
        let path = donut_path(100.0, 100.0, 80.0, 50.0, 0.0, 360.0);
        assert!(path.starts_with("M 100.00 20.00 A 80 80 0 1 1"));
        assert!(path.ends_with('Z'));
    }

    #[test]
    fn test_pie_label() {
        assert_eq!(pie_label("mercado", 0.4213), " mercado: 42.1%");
    }

    #[test]
    fn test_bar_layout_scales_to_max() {
        let groups = bar_layout(&[month("jan", 50.0, 100.0), month("fev", 25.0, 0.0)], 200.0, 100.0);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].income.height, 100.0);
        assert_eq!(groups[0].income.y, 0.0);
        assert_eq!(groups[0].expenses.height, 50.0);
        assert_eq!(groups[1].expenses.height, 25.0);
        assert_eq!(groups[1].income.height, 0.0);
        assert_eq!(groups[1].center, 150.0);
        assert!(groups[0].income.x > groups[0].expenses.x);
        assert!(groups[0].income.x + groups[0].income.width <= 100.0);
    }

    #[test]
    fn test_bar_layout_all_zero() {
        let groups = bar_layout(&[month("jan", 0.0, 0.0)], 100.0, 50.0);
        assert_eq!(groups[0].expenses.height, 0.0);
        assert_eq!(groups[0].expenses.y, 50.0);
    }

    #[test]
    fn test_axis_ticks() {
        assert_eq!(axis_ticks(100.0, 4), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(axis_ticks(0.0, 4), vec![0.0]);
    }
}
