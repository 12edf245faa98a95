use app_state::TokenStore;
use gloo::storage::{LocalStorage, Storage};

const TOKEN_KEY: &str = "access_token";

/// Credential token kept in the browser's localStorage as the plain
/// bearer string
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalTokenStore;

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::raw().get_item(TOKEN_KEY).ok().flatten()
    }

    fn save(&self, token: &str) {
        if let Err(e) = LocalStorage::raw().set_item(TOKEN_KEY, token) {
            log::error!("Failed to store token: {:?}", e);
        }
    }

    fn clear(&self) {
        if let Err(e) = LocalStorage::raw().remove_item(TOKEN_KEY) {
            log::warn!("Failed to remove token: {:?}", e);
        }
    }
}
