//! Dashboard card on top of Thaw [`Card`] with the `card-appear` entrance
//! animation and an optional coloured glow.

use leptos::prelude::*;
use thaw::Card;

use crate::shared::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glow {
    Blue,
    Green,
    Red,
}

impl Glow {
    pub fn class(self) -> &'static str {
        match self {
            Glow::Blue => "dashboard-card--glow-blue",
            Glow::Green => "dashboard-card--glow-green",
            Glow::Red => "dashboard-card--glow-red",
        }
    }
}

fn card_class(glow: Option<Glow>, hover: bool) -> String {
    let mut class = String::from("dashboard-card");
    if hover {
        class.push_str(" dashboard-card--hover");
    }
    if let Some(glow) = glow {
        class.push(' ');
        class.push_str(glow.class());
    }
    class
}

#[component]
pub fn DashboardCard(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    /// Icon name from the icon() helper
    #[prop(optional, into)]
    icon_name: Option<String>,
    #[prop(optional, into)] glow: MaybeProp<Glow>,
    #[prop(optional)] hover: bool,
    /// Entrance animation delay, for staggering neighbouring cards
    #[prop(optional)]
    delay_ms: u32,
    children: Children,
) -> impl IntoView {
    let style = format!("animation: card-appear 0.28s ease-out {}ms both;", delay_ms);

    view! {
        <Card attr:style=style>
            <div class=move || card_class(glow.get(), hover)>
                <div class="dashboard-card__header">
                    {icon_name.map(|name| view! { <span class="dashboard-card__icon">{icon(&name)}</span> })}
                    <div>
                        <h3 class="dashboard-card__title">{title}</h3>
                        {subtitle.map(|s| view! { <p class="dashboard-card__subtitle">{s}</p> })}
                    </div>
                </div>
                {children()}
            </div>
        </Card>
    }
}
