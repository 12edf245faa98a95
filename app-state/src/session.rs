//! # Session State Module
//!
//! Authentication status and the cached profile. This is the only state
//! shared across the whole UI: every display component reads it, and it is
//! written only by profile fetches, character renames, and logout/expiry.

use shared::{Profile, StageTransition, UpdateProfileRequest};
use std::cell::RefCell;

use crate::api::{StampApi, TokenStore};
use crate::error::ApiError;
use crate::sequence::{RequestSequence, RequestTicket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Startup, before the stored token has been checked
    Loading,
    Unauthenticated,
    Authenticated,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub status: SessionStatus,
    pub profile: Option<Profile>,
    /// Stage change waiting to be celebrated on screen
    pub celebration: Option<StageTransition>,
    profile_requests: RequestSequence,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Loading,
            profile: None,
            celebration: None,
            profile_requests: RequestSequence::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// Drop the token and everything cached for it. No server round-trip.
    pub fn logout(&mut self, tokens: &dyn TokenStore) {
        tokens.clear();
        self.status = SessionStatus::Unauthenticated;
        self.profile = None;
        self.celebration = None;
        // invalidate any profile fetch still in flight
        self.profile_requests.issue();
        log::info!("👋 Logged out");
    }

    /// The server rejected our token
    pub fn expire(&mut self, tokens: &dyn TokenStore) {
        log::warn!("🔒 Session expired, returning to login");
        self.logout(tokens);
    }

    pub fn dismiss_celebration(&mut self) {
        self.celebration = None;
    }

    fn begin_profile_fetch(&mut self) -> RequestTicket {
        self.profile_requests.issue()
    }

    /// Apply a profile response. Returns the stage change it revealed, if any.
    fn apply_profile(
        &mut self,
        ticket: RequestTicket,
        result: Result<Profile, ApiError>,
        tokens: &dyn TokenStore,
    ) -> Result<Option<StageTransition>, ApiError> {
        if !self.profile_requests.is_current(ticket) {
            log::debug!("Dropping stale profile response");
            return Ok(None);
        }

        match result {
            Ok(profile) => {
                let transition = self
                    .profile
                    .as_ref()
                    .and_then(|old| StageTransition::between(old.current_stage, profile.current_stage));
                if let Some(t) = transition {
                    log::info!("🎉 Stage changed: {} -> {}", t.from, t.to);
                    self.celebration = Some(t);
                }
                self.profile = Some(profile);
                self.status = SessionStatus::Authenticated;
                Ok(transition)
            }
            Err(err) if err.is_unauthorized() || self.profile.is_none() => {
                log::error!("Failed to fetch profile: {}", err);
                self.expire(tokens);
                Err(err)
            }
            Err(err) => {
                // keep showing the last good profile
                log::warn!("Failed to refresh profile: {}", err);
                Err(err)
            }
        }
    }
}

/// Startup: use a stored token if there is one
pub async fn bootstrap(
    session: &RefCell<SessionState>,
    api: &dyn StampApi,
    tokens: &dyn TokenStore,
) {
    if tokens.load().is_none() {
        session.borrow_mut().status = SessionStatus::Unauthenticated;
        return;
    }
    let _ = fetch_profile(session, api, tokens).await;
}

/// Fetch the profile and cache it.
///
/// Without a cached profile (startup, right after login) any failure clears
/// the token. With one, only a 401 does; other failures keep the old profile.
pub async fn fetch_profile(
    session: &RefCell<SessionState>,
    api: &dyn StampApi,
    tokens: &dyn TokenStore,
) -> Result<Option<StageTransition>, ApiError> {
    let ticket = session.borrow_mut().begin_profile_fetch();
    let result = api.get_profile().await;
    session.borrow_mut().apply_profile(ticket, result, tokens)
}

/// Rename the character. Blank names are rejected without a request.
pub async fn rename_character(
    session: &RefCell<SessionState>,
    api: &dyn StampApi,
    tokens: &dyn TokenStore,
    name: &str,
) -> Result<(), ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("キャラクターの名前を入力してください".to_string()));
    }

    let request = UpdateProfileRequest { character_name: name.to_string() };
    let ticket = session.borrow_mut().begin_profile_fetch();
    let result = api.update_profile(&request).await;
    session.borrow_mut().apply_profile(ticket, result, tokens).map(|_| ())
}

/// Common reaction to an error from any flow: a 401 ends the session.
/// Returns whether the session was dropped.
pub fn handle_api_error(
    session: &RefCell<SessionState>,
    tokens: &dyn TokenStore,
    err: &ApiError,
) -> bool {
    if err.is_unauthorized() {
        session.borrow_mut().expire(tokens);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{profile, FakeApi, MemoryTokenStore};
    use shared::GrowthStage;

    #[tokio::test]
    async fn test_bootstrap_without_token_skips_fetch() {
        let api = FakeApi::new();
        let tokens = MemoryTokenStore::default();
        let session = RefCell::new(SessionState::new());

        bootstrap(&session, &api, &tokens).await;

        assert_eq!(session.borrow().status, SessionStatus::Unauthenticated);
        assert_eq!(api.call_count("GET /profile"), 0);
    }

    #[tokio::test]
    async fn test_bootstrap_with_token_authenticates() {
        let api = FakeApi::new();
        api.queue_profile(Ok(profile(GrowthStage::Chick, 5)));
        let tokens = MemoryTokenStore::with_token("abc");
        let session = RefCell::new(SessionState::new());

        bootstrap(&session, &api, &tokens).await;

        let state = session.borrow();
        assert!(state.is_authenticated());
        assert_eq!(state.profile.as_ref().unwrap().consecutive_days_brushed, 5);
        assert_eq!(state.celebration, None);
        assert_eq!(tokens.load().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_bootstrap_failure_clears_token() {
        let api = FakeApi::new();
        api.queue_profile(Err(ApiError::Network("offline".to_string())));
        let tokens = MemoryTokenStore::with_token("abc");
        let session = RefCell::new(SessionState::new());

        bootstrap(&session, &api, &tokens).await;

        assert_eq!(session.borrow().status, SessionStatus::Unauthenticated);
        assert_eq!(tokens.load(), None);
    }

    #[tokio::test]
    async fn test_logout_then_reload_is_unauthenticated() {
        let api = FakeApi::new();
        api.queue_profile(Ok(profile(GrowthStage::Egg, 1)));
        let tokens = MemoryTokenStore::with_token("abc");
        let session = RefCell::new(SessionState::new());
        bootstrap(&session, &api, &tokens).await;

        session.borrow_mut().logout(&tokens);
        assert_eq!(session.borrow().profile, None);
        assert_eq!(tokens.load(), None);

        // a fresh page load with the same storage
        let reloaded = RefCell::new(SessionState::new());
        bootstrap(&reloaded, &api, &tokens).await;
        assert_eq!(reloaded.borrow().status, SessionStatus::Unauthenticated);
        assert_eq!(api.call_count("GET /profile"), 1);
    }

    #[tokio::test]
    async fn test_refresh_detects_stage_change() {
        let api = FakeApi::new();
        api.queue_profile(Ok(profile(GrowthStage::Egg, 2)));
        api.queue_profile(Ok(profile(GrowthStage::Chick, 3)));
        let tokens = MemoryTokenStore::with_token("abc");
        let session = RefCell::new(SessionState::new());
        bootstrap(&session, &api, &tokens).await;

        let transition = fetch_profile(&session, &api, &tokens).await.unwrap();

        let expected = StageTransition { from: GrowthStage::Egg, to: GrowthStage::Chick };
        assert_eq!(transition, Some(expected));
        assert_eq!(session.borrow().celebration, Some(expected));

        session.borrow_mut().dismiss_celebration();
        assert_eq!(session.borrow().celebration, None);
    }

    #[tokio::test]
    async fn test_refresh_without_change_does_not_celebrate() {
        let api = FakeApi::new();
        api.queue_profile(Ok(profile(GrowthStage::Chick, 3)));
        api.queue_profile(Ok(profile(GrowthStage::Chick, 4)));
        let tokens = MemoryTokenStore::with_token("abc");
        let session = RefCell::new(SessionState::new());
        bootstrap(&session, &api, &tokens).await;

        let transition = fetch_profile(&session, &api, &tokens).await.unwrap();
        assert_eq!(transition, None);
        assert_eq!(session.borrow().celebration, None);
    }

    #[tokio::test]
    async fn test_refresh_network_failure_keeps_profile() {
        let api = FakeApi::new();
        api.queue_profile(Ok(profile(GrowthStage::Hawk, 20)));
        api.queue_profile(Err(ApiError::Network("offline".to_string())));
        let tokens = MemoryTokenStore::with_token("abc");
        let session = RefCell::new(SessionState::new());
        bootstrap(&session, &api, &tokens).await;

        assert!(fetch_profile(&session, &api, &tokens).await.is_err());

        let state = session.borrow();
        assert!(state.is_authenticated());
        assert_eq!(state.profile.as_ref().unwrap().current_stage, GrowthStage::Hawk);
        assert_eq!(tokens.load().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_refresh_unauthorized_expires_session() {
        let api = FakeApi::new();
        api.queue_profile(Ok(profile(GrowthStage::Hawk, 20)));
        api.queue_profile(Err(ApiError::Unauthorized));
        let tokens = MemoryTokenStore::with_token("abc");
        let session = RefCell::new(SessionState::new());
        bootstrap(&session, &api, &tokens).await;

        let result = fetch_profile(&session, &api, &tokens).await;

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(session.borrow().status, SessionStatus::Unauthenticated);
        assert_eq!(session.borrow().profile, None);
        assert_eq!(tokens.load(), None);
    }

    #[test]
    fn test_stale_profile_response_is_dropped() {
        let tokens = MemoryTokenStore::with_token("abc");
        let mut state = SessionState::new();
        let slow = state.begin_profile_fetch();
        let fast = state.begin_profile_fetch();

        state.apply_profile(fast, Ok(profile(GrowthStage::Chicken, 8)), &tokens).unwrap();
        state.apply_profile(slow, Ok(profile(GrowthStage::Egg, 0)), &tokens).unwrap();

        assert_eq!(state.profile.unwrap().current_stage, GrowthStage::Chicken);
    }

    #[tokio::test]
    async fn test_rename_character() {
        let api = FakeApi::new();
        api.queue_profile(Ok(profile(GrowthStage::Egg, 0)));
        let mut renamed = profile(GrowthStage::Egg, 0);
        renamed.character_name = "タマ".to_string();
        api.queue_profile(Ok(renamed));
        let tokens = MemoryTokenStore::with_token("abc");
        let session = RefCell::new(SessionState::new());
        bootstrap(&session, &api, &tokens).await;

        rename_character(&session, &api, &tokens, "  タマ ").await.unwrap();

        assert_eq!(api.call_count("PUT /profile タマ"), 1);
        assert_eq!(session.borrow().profile.as_ref().unwrap().character_name, "タマ");
    }

    #[tokio::test]
    async fn test_rename_blank_issues_no_request() {
        let api = FakeApi::new();
        let tokens = MemoryTokenStore::with_token("abc");
        let session = RefCell::new(SessionState::new());

        let result = rename_character(&session, &api, &tokens, "   ").await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(api.call_count("PUT /profile"), 0);
    }

    #[test]
    fn test_handle_api_error_only_reacts_to_401() {
        let tokens = MemoryTokenStore::with_token("abc");
        let session = RefCell::new(SessionState::new());
        session.borrow_mut().status = SessionStatus::Authenticated;

        assert!(!handle_api_error(&session, &tokens, &ApiError::Network("x".to_string())));
        assert!(session.borrow().is_authenticated());

        assert!(handle_api_error(&session, &tokens, &ApiError::Unauthorized));
        assert_eq!(session.borrow().status, SessionStatus::Unauthenticated);
        assert_eq!(tokens.load(), None);
    }
}
