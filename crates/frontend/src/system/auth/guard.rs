use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_auth;

/// Renders children for signed-in users, otherwise redirects to the login page
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || auth.is_authenticated()
            fallback=|| view! { <Redirect path="/login" /> }
        >
            {children()}
        </Show>
    }
}
