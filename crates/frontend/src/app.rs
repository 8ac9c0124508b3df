use std::rc::Rc;

use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::routes::AppRoutes;
use crate::shared::api_utils::AppConfig;
use crate::shared::http::{ApiClient, FetchTransport, Transport};
use crate::system::auth::firebase::FirebaseIdentity;
use crate::system::auth::storage::LocalSessionStorage;
use crate::system::auth::{AuthProvider, SessionContext};

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    log::info!("Backend API at {}", config.api_base);

    let transport: Rc<dyn Transport> = Rc::new(FetchTransport::default());
    let identity = FirebaseIdentity::new(
        config.firebase,
        transport.clone(),
        Rc::new(LocalSessionStorage),
    );
    let session = SessionContext::new(Rc::new(identity));

    // The client shares the session, so it always sees the signed-in user
    provide_context(AppGlobalContext::new(ApiClient::new(
        &config.api_base,
        transport,
        session.clone(),
    )));

    view! {
        <AuthProvider session=session>
            <AppRoutes />
        </AuthProvider>
    }
}
