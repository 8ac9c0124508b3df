use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};

use super::nav::{avatar_initial, is_active, NAV_LINKS};
use crate::shared::icons::icon;
use crate::system::auth::{use_auth, SessionUser};

/// How the header arranges its rows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeaderVariant {
    /// Logo and user row above a full-width nav row
    #[default]
    Stacked,
    /// Everything on a single row
    Inline,
}

impl HeaderVariant {
    fn class(self) -> &'static str {
        match self {
            HeaderVariant::Stacked => "header header--stacked",
            HeaderVariant::Inline => "header header--inline",
        }
    }
}

#[component]
fn Avatar(user: SessionUser) -> impl IntoView {
    match user.photo_url.clone() {
        Some(src) => {
            let alt = format!("foto de perfil do(a) {}", user.label());
            view! { <img class="header__avatar" src=src alt=alt /> }.into_any()
        }
        None => view! {
            <span class="header__avatar header__avatar--initial" aria-hidden="true">
                {avatar_initial(&user)}
            </span>
        }
        .into_any(),
    }
}

#[component]
fn NavLinks() -> impl IntoView {
    let pathname = use_location().pathname;

    view! {
        <nav class="header__nav">
            {NAV_LINKS
                .iter()
                .map(|link| {
                    let link = *link;
                    let class = move || {
                        if is_active(&pathname.get(), &link) {
                            "header__nav-link header__nav-link--active"
                        } else {
                            "header__nav-link"
                        }
                    };
                    view! {
                        <A href=link.path attr:class=class>
                            {link.name}
                        </A>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[component]
pub fn Header(#[prop(optional)] variant: HeaderVariant) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let sign_out = move |_: leptos::ev::MouseEvent| {
        auth.sign_out();
        navigate("/login", Default::default());
    };

    let user_row = move || match auth.user() {
        Some(user) => view! {
            <div class="header__user">
                <span class="header__greeting">"Olá, " {user.label().to_string()}</span>
                <Avatar user=user.clone() />
                <button class="header__icon-btn" aria-label="Sair" title="Sair" on:click=sign_out.clone()>
                    {icon("log-out")}
                </button>
            </div>
        }
        .into_any(),
        None => view! {
            <A href="/login" attr:class="header__login">
                {icon("log-in")} "Entrar"
            </A>
        }
        .into_any(),
    };

    let brand = view! {
        <A href="/" attr:class="header__brand">
            {icon("activity")}
            <span class="header__title">"ControleJá"</span>
        </A>
    };

    let nav = move || auth.is_authenticated().then(|| view! { <NavLinks /> });

    match variant {
        HeaderVariant::Stacked => view! {
            <header data-zone="header" class=variant.class()>
                <div class="header__content">
                    {brand}
                    {user_row}
                </div>
                <div class="header__nav-row">{nav}</div>
            </header>
        }
        .into_any(),
        HeaderVariant::Inline => view! {
            <header data-zone="header" class=variant.class()>
                <div class="header__content">
                    {brand}
                    {nav}
                    {user_row}
                </div>
            </header>
        }
        .into_any(),
    }
}
