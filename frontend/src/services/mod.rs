pub mod api;
pub mod date_utils;
pub mod logging;
pub mod speech;
pub mod token_store;
