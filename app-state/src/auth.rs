//! Login and signup share one form; a toggle picks the branch.

use shared::{LoginRequest, SignupRequest};
use std::cell::RefCell;

use crate::api::{StampApi, TokenStore};
use crate::error::ApiError;
use crate::session::{self, SessionState};

pub const MSG_NAME_REQUIRED: &str = "名前を入力してください";
pub const MSG_BAD_CREDENTIALS: &str = "メールアドレスまたはパスワードが間違っています";
pub const MSG_EMAIL_TAKEN: &str = "このメールアドレスは既に使用されています";
pub const MSG_LOGIN_FAILED: &str = "ログインに失敗しました";
pub const MSG_SIGNUP_FAILED: &str = "登録に失敗しました";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthSubmission {
    Login(LoginRequest),
    Signup(SignupRequest),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
    /// Inline message under the form
    pub error: Option<String>,
    pub submitting: bool,
}

impl AuthForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch between login and signup, starting from a blank form
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.name.clear();
        self.email.clear();
        self.password.clear();
        self.error = None;
    }

    pub fn set_field(&mut self, field: AuthField, value: String) {
        match field {
            AuthField::Name => self.name = value,
            AuthField::Email => self.email = value,
            AuthField::Password => self.password = value,
        }
        self.error = None;
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "ログイン",
            AuthMode::Signup => "新規登録",
        }
    }

    pub fn switch_label(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "新規登録はこちら",
            AuthMode::Signup => "ログインはこちら",
        }
    }

    /// Validate and mark the form as submitting. `None` when a submission
    /// is already running or validation failed (the error is set).
    pub fn prepare(&mut self) -> Option<AuthSubmission> {
        if self.submitting {
            return None;
        }
        self.error = None;

        let submission = match self.mode {
            AuthMode::Login => AuthSubmission::Login(LoginRequest {
                username: self.email.clone(),
                password: self.password.clone(),
            }),
            AuthMode::Signup => {
                if self.name.trim().is_empty() {
                    self.error = Some(MSG_NAME_REQUIRED.to_string());
                    return None;
                }
                AuthSubmission::Signup(SignupRequest {
                    name: self.name.clone(),
                    email: self.email.clone(),
                    password: self.password.clone(),
                })
            }
        };

        self.submitting = true;
        Some(submission)
    }

    /// Show the message for `err` and leave the form editable.
    /// Name and email stay; the password is not kept.
    pub fn fail(&mut self, err: &ApiError) {
        let message = match (err, self.mode) {
            (ApiError::Validation(_), AuthMode::Login) => MSG_BAD_CREDENTIALS,
            (ApiError::Validation(_), AuthMode::Signup) => MSG_EMAIL_TAKEN,
            (ApiError::Unauthorized, _) => MSG_BAD_CREDENTIALS,
            _ => self.generic_failure(),
        };
        self.show_error(message);
    }

    fn generic_failure(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => MSG_LOGIN_FAILED,
            AuthMode::Signup => MSG_SIGNUP_FAILED,
        }
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.password.clear();
        self.submitting = false;
    }

    fn succeed(&mut self) {
        *self = Self { mode: self.mode, ..Self::default() };
    }
}

/// Run one login/signup submission. On success the token is stored and the
/// profile fetched to populate the session. Returns whether the user is now
/// authenticated.
pub async fn submit_auth(
    form: &RefCell<AuthForm>,
    session: &RefCell<SessionState>,
    api: &dyn StampApi,
    tokens: &dyn TokenStore,
) -> bool {
    let Some(submission) = form.borrow_mut().prepare() else {
        return false;
    };
    authenticate(form, session, api, tokens, submission).await
}

/// Second half of [`submit_auth`], for callers that ran
/// [`AuthForm::prepare`] themselves to render the pending state first.
pub async fn authenticate(
    form: &RefCell<AuthForm>,
    session: &RefCell<SessionState>,
    api: &dyn StampApi,
    tokens: &dyn TokenStore,
    submission: AuthSubmission,
) -> bool {
    let result = match &submission {
        AuthSubmission::Login(request) => api.login(request).await,
        AuthSubmission::Signup(request) => api.signup(request).await,
    };

    match result {
        Ok(token) => {
            log::info!("🔑 Authenticated");
            tokens.save(&token.access_token);
            let _ = session::fetch_profile(session, api, tokens).await;

            let mut form = form.borrow_mut();
            if session.borrow().is_authenticated() {
                form.succeed();
                true
            } else {
                // the token was dropped with the failed profile fetch
                let message = form.generic_failure();
                form.show_error(message);
                false
            }
        }
        Err(err) => {
            log::warn!("Auth error: {}", err);
            form.borrow_mut().fail(&err);
            false
        }
    }
}
