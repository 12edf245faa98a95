use async_trait::async_trait;
use shared::{
    BrushRecord, ChatRequest, ChatResponse, CreateBrushRequest, LoginRequest, Profile,
    SignupRequest, TokenResponse, UpdateProfileRequest, YearMonth,
};

use crate::error::ApiError;

/// The backend HTTP surface the client depends on.
///
/// Implementations attach the bearer token to every call except
/// `signup`/`login`, and report a 401 as [`ApiError::Unauthorized`].
#[async_trait(?Send)]
pub trait StampApi {
    /// `POST /auth/signup`
    async fn signup(&self, request: &SignupRequest) -> Result<TokenResponse, ApiError>;

    /// `POST /auth/login`, form-encoded
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError>;

    /// `GET /profile`
    async fn get_profile(&self) -> Result<Profile, ApiError>;

    /// `PUT /profile`
    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<Profile, ApiError>;

    /// `GET /brushes?month=YYYY-MM`
    async fn list_brushes(&self, month: YearMonth) -> Result<Vec<BrushRecord>, ApiError>;

    /// `POST /brushes`, creates or replaces the record for that date
    async fn create_brush(&self, request: &CreateBrushRequest) -> Result<BrushRecord, ApiError>;

    /// `POST /chat`
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError>;
}

/// Durable home of the credential token. The only client state that
/// survives a reload.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}
