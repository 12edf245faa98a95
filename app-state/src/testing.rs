//! In-memory backend used by the flow tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{
    BrushRecord, ChatRequest, ChatResponse, CreateBrushRequest, GrowthStage, LoginRequest,
    Profile, SignupRequest, TokenResponse, UpdateProfileRequest, YearMonth,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};

use crate::api::{StampApi, TokenStore};
use crate::error::ApiError;
use crate::session::{SessionState, SessionStatus};
use crate::speech::SpeechOutput;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn profile(stage: GrowthStage, consecutive: u32) -> Profile {
    Profile {
        id: 1,
        user_id: 1,
        character_name: "ピヨ".to_string(),
        current_stage: stage,
        stage_start_date: "2025-06-01T00:00:00".to_string(),
        total_days_brushed: consecutive,
        consecutive_days_brushed: consecutive,
        last_brush_date: None,
    }
}

/// A session that finished bootstrap with a stored token
pub fn signed_in() -> (RefCell<SessionState>, MemoryTokenStore) {
    let mut session = SessionState::new();
    session.status = SessionStatus::Authenticated;
    session.profile = Some(profile(GrowthStage::Chick, 2));
    (RefCell::new(session), MemoryTokenStore::with_token("tok-1"))
}

pub fn token(value: &str) -> TokenResponse {
    TokenResponse { access_token: value.to_string(), token_type: "bearer".to_string() }
}

/// Serves queued responses per endpoint and keeps brush records like the
/// real backend does (one per date, replaced on write).
#[derive(Default)]
pub struct FakeApi {
    pub calls: RefCell<Vec<String>>,
    pub auth_responses: RefCell<VecDeque<Result<TokenResponse, ApiError>>>,
    pub profile_responses: RefCell<VecDeque<Result<Profile, ApiError>>>,
    pub chat_responses: RefCell<VecDeque<Result<ChatResponse, ApiError>>>,
    pub brushes: RefCell<BTreeMap<NaiveDate, BrushRecord>>,
    pub brush_error: RefCell<Option<ApiError>>,
    pub list_error: RefCell<Option<ApiError>>,
    pub last_login: RefCell<Option<LoginRequest>>,
    pub last_signup: RefCell<Option<SignupRequest>>,
    /// Runs inside `list_brushes`, while the caller is suspended on it
    pub on_list: RefCell<Option<Box<dyn Fn()>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn queue_profile(&self, response: Result<Profile, ApiError>) {
        self.profile_responses.borrow_mut().push_back(response);
    }

    pub fn queue_auth(&self, response: Result<TokenResponse, ApiError>) {
        self.auth_responses.borrow_mut().push_back(response);
    }

    pub fn queue_chat(&self, response: Result<ChatResponse, ApiError>) {
        self.chat_responses.borrow_mut().push_back(response);
    }

    pub fn seed_brush(&self, date: NaiveDate, stamps: &[&str]) {
        let record = BrushRecord {
            id: self.brushes.borrow().len() as i64 + 1,
            user_id: 1,
            date,
            stamps: stamps.iter().map(|s| s.to_string()).collect(),
            created_at: format!("{}T07:30:00", date),
        };
        self.brushes.borrow_mut().insert(date, record);
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn next<T>(queue: &RefCell<VecDeque<Result<T, ApiError>>>) -> Result<T, ApiError> {
        queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no canned response".to_string())))
    }
}

#[async_trait(?Send)]
impl StampApi for FakeApi {
    async fn signup(&self, request: &SignupRequest) -> Result<TokenResponse, ApiError> {
        self.record("POST /auth/signup".to_string());
        *self.last_signup.borrow_mut() = Some(request.clone());
        Self::next(&self.auth_responses)
    }

    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.record("POST /auth/login".to_string());
        *self.last_login.borrow_mut() = Some(request.clone());
        Self::next(&self.auth_responses)
    }

    async fn get_profile(&self) -> Result<Profile, ApiError> {
        self.record("GET /profile".to_string());
        Self::next(&self.profile_responses)
    }

    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<Profile, ApiError> {
        self.record(format!("PUT /profile {}", request.character_name));
        Self::next(&self.profile_responses)
    }

    async fn list_brushes(&self, month: YearMonth) -> Result<Vec<BrushRecord>, ApiError> {
        self.record(format!("GET /brushes?month={}", month));
        if let Some(observe) = self.on_list.borrow().as_ref() {
            observe();
        }
        if let Some(err) = self.list_error.borrow().clone() {
            return Err(err);
        }
        Ok(self
            .brushes
            .borrow()
            .values()
            .filter(|r| month.contains(r.date))
            .cloned()
            .collect())
    }

    async fn create_brush(&self, request: &CreateBrushRequest) -> Result<BrushRecord, ApiError> {
        self.record(format!("POST /brushes {}", request.date));
        if let Some(err) = self.brush_error.borrow().clone() {
            return Err(err);
        }
        let stamps: Vec<&str> = request.stamps.iter().map(String::as_str).collect();
        self.seed_brush(request.date, &stamps);
        Ok(self.brushes.borrow()[&request.date].clone())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.record(format!("POST /chat {}", request.message));
        Self::next(&self.chat_responses)
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self { token: RefCell::new(Some(token.to_string())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}

/// Speech output that remembers what it was asked to say
#[derive(Default)]
pub struct RecordingSpeech {
    pub available: bool,
    pub spoken: RefCell<Vec<String>>,
}

impl SpeechOutput for RecordingSpeech {
    fn is_available(&self) -> bool {
        self.available
    }

    fn speak(&self, text: &str) {
        self.spoken.borrow_mut().push(text.to_string());
    }
}
