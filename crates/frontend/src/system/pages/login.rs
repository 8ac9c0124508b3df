use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::{Button, ButtonAppearance};

use crate::shared::icons::icon;
use crate::system::auth::use_auth;

#[component]
pub fn LoginPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let auth = use_auth();
    let navigate = use_navigate();

    // Covers both a restored session and a successful submit
    Effect::new(move |_| {
        if auth.is_authenticated() {
            navigate("/dashboard", Default::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get_untracked();
        let password_val = password.get_untracked();

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match auth.sign_in(email_val, password_val).await {
                Ok(()) => {
                    set_is_loading.set(false);
                }
                Err(e) => {
                    log::warn!("Sign-in failed: {}", e);
                    set_error_message.set(Some(format!("Falha no login: {}", e)));
                    set_is_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1 class="login-box__brand">{icon("activity")} "ControleJá"</h1>
                <h2>"Entrar"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"E-mail"</label>
                        <input
                            type="email"
                            id="email"
                            autocomplete="email"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Senha"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <Button
                        appearance=ButtonAppearance::Primary
                        attr:r#type="submit"
                        disabled=is_loading
                    >
                        {move || if is_loading.get() { "Entrando..." } else { "Entrar" }}
                    </Button>
                </form>
            </div>
        </div>
    }
}
