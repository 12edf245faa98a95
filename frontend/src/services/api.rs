use app_state::{ApiError, StampApi, TokenStore};
use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    BrushRecord, ChatRequest, ChatResponse, CreateBrushRequest, LoginRequest, Profile,
    SignupRequest, TokenResponse, UpdateProfileRequest, YearMonth,
};
use web_sys::UrlSearchParams;

use crate::services::token_store::LocalTokenStore;

/// API client for communicating with the backend server
/// A 401 is returned as [`ApiError::Unauthorized`]; ending the session is
/// left to the caller.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    tokens: LocalTokenStore,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            tokens: LocalTokenStore,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.load() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Turn a fetch result into a typed body or an [`ApiError`]
    async fn read<T: DeserializeOwned>(
        &self,
        response: Result<Response, gloo::net::Error>,
    ) -> Result<T, ApiError> {
        let response = response.map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::from_status(status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn serialize_error(e: gloo::net::Error) -> ApiError {
        ApiError::Decode(format!("Failed to serialize request: {}", e))
    }
}

#[async_trait(?Send)]
impl StampApi for ApiClient {
    async fn signup(&self, request: &SignupRequest) -> Result<TokenResponse, ApiError> {
        let response = Request::post(&self.url("/auth/signup"))
            .json(request)
            .map_err(Self::serialize_error)?
            .send()
            .await;
        self.read(response).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        let form = UrlSearchParams::new()
            .map_err(|_| ApiError::Network("URLSearchParams unavailable".to_string()))?;
        form.append("username", &request.username);
        form.append("password", &request.password);

        let response = Request::post(&self.url("/auth/login"))
            .body(form)
            .map_err(Self::serialize_error)?
            .send()
            .await;
        self.read(response).await
    }

    async fn get_profile(&self) -> Result<Profile, ApiError> {
        let response = self.authorized(Request::get(&self.url("/profile"))).send().await;
        self.read(response).await
    }

    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<Profile, ApiError> {
        let response = self
            .authorized(Request::put(&self.url("/profile")))
            .json(request)
            .map_err(Self::serialize_error)?
            .send()
            .await;
        self.read(response).await
    }

    async fn list_brushes(&self, month: YearMonth) -> Result<Vec<BrushRecord>, ApiError> {
        let month = month.to_string();
        let response = self
            .authorized(Request::get(&self.url("/brushes")))
            .query([("month", month.as_str())])
            .send()
            .await;
        self.read(response).await
    }

    async fn create_brush(&self, request: &CreateBrushRequest) -> Result<BrushRecord, ApiError> {
        let response = self
            .authorized(Request::post(&self.url("/brushes")))
            .json(request)
            .map_err(Self::serialize_error)?
            .send()
            .await;
        self.read(response).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let response = self
            .authorized(Request::post(&self.url("/chat")))
            .json(request)
            .map_err(Self::serialize_error)?
            .send()
            .await;
        self.read(response).await
    }
}
