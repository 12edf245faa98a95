//! # Daily Stamp application state
//!
//! Everything the client does that is not rendering: the session gate, the
//! login/signup form, the stamp calendar, and the chat transcript. Each part
//! is a plain state struct with synchronous transitions plus async flows that
//! drive it against a [`StampApi`].
//!
//! Flows take the state behind a `RefCell` and only borrow it between
//! awaits, so the same code runs in the browser (shared `Rc<RefCell<_>>`
//! owned by a hook) and in tests.

pub mod api;
pub mod auth;
pub mod calendar;
pub mod chat;
pub mod config;
pub mod error;
pub mod sequence;
pub mod session;
pub mod speech;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{StampApi, TokenStore};
pub use config::{ClientConfig, SpeechConfig};
pub use error::ApiError;
pub use sequence::{RequestSequence, RequestTicket};
pub use speech::SpeechOutput;
