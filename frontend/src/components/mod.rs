pub mod auth_form;
pub mod calendar;
pub mod character_card;
pub mod chat;
pub mod header;
pub mod stamp_selector;
