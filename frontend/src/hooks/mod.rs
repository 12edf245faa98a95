pub mod use_calendar;
pub mod use_chat;
pub mod use_session;
