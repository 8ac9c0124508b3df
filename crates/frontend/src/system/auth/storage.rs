use web_sys::window;

const SESSION_KEY: &str = "controleja_session";

/// Key-value slot holding the serialized persisted session
pub trait SessionStorage {
    fn load(&self) -> Option<String>;
    fn save(&self, value: &str);
    fn clear(&self);
}

/// Browser `localStorage`; silently does nothing when storage is unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSessionStorage;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

impl SessionStorage for LocalSessionStorage {
    fn load(&self) -> Option<String> {
        get_local_storage()?.get_item(SESSION_KEY).ok()?
    }

    fn save(&self, value: &str) {
        if let Some(storage) = get_local_storage() {
            if storage.set_item(SESSION_KEY, value).is_err() {
                log::warn!("Failed to persist session to localStorage");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}
