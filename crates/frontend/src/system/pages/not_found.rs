use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h2>"Página não encontrada"</h2>
            <A href="/dashboard">"Voltar ao dashboard"</A>
        </div>
    }
}
