use leptos::prelude::*;

use crate::shared::http::ApiClient;

/// App-wide services handed to components through context
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    api: StoredValue<ApiClient, LocalStorage>,
}

impl AppGlobalContext {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api: StoredValue::new_local(api),
        }
    }

    /// Authenticated backend client
    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext context not found")
}
