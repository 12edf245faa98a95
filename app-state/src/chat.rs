//! Conversation with the character. One exchange at a time:
//! `Idle -> Sending -> {Replied, FellBack}`, no retries and no queue.

use chrono::{DateTime, Utc};
use shared::{ChatRequest, ChatResponse};
use std::cell::RefCell;
use uuid::Uuid;

use crate::api::StampApi;
use crate::error::ApiError;
use crate::speech::SpeechOutput;

pub const FALLBACK_REPLY: &str = "ごめんね、今お話できないよ。もう一度試してみてね！";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Character,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeState {
    #[default]
    Idle,
    Sending,
    /// Last exchange ended with a real reply
    Replied,
    /// Last exchange failed and the apology was shown
    FellBack,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    pub character_name: String,
    pub transcript: Vec<ChatMessage>,
    /// Text box contents, typed or dictated
    pub input: String,
    pub exchange: ExchangeState,
}

impl ChatSession {
    /// New transcript opening with the character's greeting
    pub fn new(character_name: &str) -> Self {
        let greeting = format!(
            "こんにちは！{}だよ！歯磨きのことなら何でも聞いてね！",
            character_name
        );
        Self {
            character_name: character_name.to_string(),
            transcript: vec![ChatMessage::new(greeting, Sender::Character)],
            input: String::new(),
            exchange: ExchangeState::Idle,
        }
    }

    pub fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub fn is_sending(&self) -> bool {
        self.exchange == ExchangeState::Sending
    }

    pub fn can_send(&self) -> bool {
        !self.is_sending() && !self.input.trim().is_empty()
    }

    /// Append the user's message right away and switch to `Sending`.
    /// `None` while another exchange is pending or the input is blank.
    pub fn begin_send(&mut self) -> Option<ChatRequest> {
        if !self.can_send() {
            return None;
        }
        let text = std::mem::take(&mut self.input);
        self.transcript.push(ChatMessage::new(text.clone(), Sender::User));
        self.exchange = ExchangeState::Sending;
        Some(ChatRequest { message: text, context: None })
    }

    /// Finish the pending exchange. Returns the reply to read aloud, if any.
    pub fn finish_send(&mut self, result: Result<ChatResponse, ApiError>) -> Option<String> {
        match result {
            Ok(response) => {
                self.transcript.push(ChatMessage::new(response.response.clone(), Sender::Character));
                self.exchange = ExchangeState::Replied;
                Some(response.response)
            }
            Err(err) => {
                log::error!("Chat error: {}", err);
                self.transcript.push(ChatMessage::new(FALLBACK_REPLY, Sender::Character));
                self.exchange = ExchangeState::FellBack;
                None
            }
        }
    }
}

/// Send the current input. Returns the state the exchange ended in.
///
/// A failed request still ends the exchange with the apology in the
/// transcript; the error is handed back so a 401 can end the session.
pub async fn send_message(
    chat: &RefCell<ChatSession>,
    api: &dyn StampApi,
    speech: &dyn SpeechOutput,
) -> Result<ExchangeState, ApiError> {
    let Some(request) = chat.borrow_mut().begin_send() else {
        return Ok(chat.borrow().exchange);
    };
    deliver(chat, api, speech, request).await
}

/// Second half of [`send_message`], for callers that ran
/// [`ChatSession::begin_send`] themselves to render the user's line first.
pub async fn deliver(
    chat: &RefCell<ChatSession>,
    api: &dyn StampApi,
    speech: &dyn SpeechOutput,
    request: ChatRequest,
) -> Result<ExchangeState, ApiError> {
    let result = api.chat(&request).await;
    let failure = result.as_ref().err().cloned();
    let reply = chat.borrow_mut().finish_send(result);

    if let Some(text) = reply {
        if speech.is_available() {
            speech.speak(&text);
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(chat.borrow().exchange),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{handle_api_error, SessionStatus};
    use crate::testing::{signed_in, FakeApi, RecordingSpeech};
    use crate::TokenStore;
    use shared::GrowthStage;

    fn reply(text: &str) -> ChatResponse {
        ChatResponse { response: text.to_string(), character_stage: GrowthStage::Chick }
    }

    #[test]
    fn test_greeting_uses_character_name() {
        let chat = ChatSession::new("ピヨ");
        assert_eq!(chat.transcript.len(), 1);
        assert_eq!(chat.transcript[0].text, "こんにちは！ピヨだよ！歯磨きのことなら何でも聞いてね！");
        assert!(!chat.transcript[0].is_user());
    }

    #[test]
    fn test_blank_input_is_not_sent() {
        let mut chat = ChatSession::new("ピヨ");
        chat.set_input("   ".to_string());
        assert!(!chat.can_send());
        assert_eq!(chat.begin_send(), None);
        assert_eq!(chat.transcript.len(), 1);
    }

    #[test]
    fn test_only_one_exchange_in_flight() {
        let mut chat = ChatSession::new("ピヨ");
        chat.set_input("おはよう".to_string());
        let request = chat.begin_send().unwrap();
        assert_eq!(request.message, "おはよう");
        assert_eq!(chat.input, "");
        assert!(chat.is_sending());
        assert!(chat.transcript[1].is_user());

        chat.set_input("もう一回".to_string());
        assert_eq!(chat.begin_send(), None);
        assert_eq!(chat.transcript.len(), 2);
    }

    #[tokio::test]
    async fn test_reply_is_appended_and_spoken() {
        let api = FakeApi::new();
        api.queue_chat(Ok(reply("毎日みがこうね！")));
        let speech = RecordingSpeech { available: true, ..Default::default() };
        let chat = RefCell::new(ChatSession::new("ピヨ"));
        chat.borrow_mut().set_input("はみがきした".to_string());

        let state = send_message(&chat, &api, &speech).await.unwrap();

        assert_eq!(state, ExchangeState::Replied);
        let chat = chat.borrow();
        assert_eq!(chat.transcript.len(), 3);
        assert_eq!(chat.transcript[2].text, "毎日みがこうね！");
        assert_eq!(chat.transcript[2].sender, Sender::Character);
        assert_eq!(*speech.spoken.borrow(), vec!["毎日みがこうね！"]);
    }

    #[tokio::test]
    async fn test_no_speech_when_unavailable() {
        let api = FakeApi::new();
        api.queue_chat(Ok(reply("やったね")));
        let speech = RecordingSpeech::default();
        let chat = RefCell::new(ChatSession::new("ピヨ"));
        chat.borrow_mut().set_input("できた".to_string());

        send_message(&chat, &api, &speech).await.unwrap();

        assert!(speech.spoken.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_failure_yields_single_fallback_and_reenables_send() {
        let api = FakeApi::new();
        api.queue_chat(Err(ApiError::Network("offline".to_string())));
        let speech = RecordingSpeech { available: true, ..Default::default() };
        let chat = RefCell::new(ChatSession::new("ピヨ"));
        chat.borrow_mut().set_input("こんにちは".to_string());

        let result = send_message(&chat, &api, &speech).await;

        assert!(matches!(result, Err(ApiError::Network(_))));
        assert_eq!(chat.borrow().exchange, ExchangeState::FellBack);
        let chat_ref = chat.borrow();
        let fallbacks = chat_ref.transcript.iter().filter(|m| m.text == FALLBACK_REPLY).count();
        assert_eq!(fallbacks, 1);
        assert_eq!(chat_ref.transcript.len(), 3);
        assert!(!chat_ref.is_sending());
        assert!(speech.spoken.borrow().is_empty());
        drop(chat_ref);

        chat.borrow_mut().set_input("もう一回".to_string());
        assert!(chat.borrow().can_send());
    }

    #[tokio::test]
    async fn test_message_ids_are_unique() {
        let api = FakeApi::new();
        api.queue_chat(Ok(reply("うん")));
        let chat = RefCell::new(ChatSession::new("ピヨ"));
        chat.borrow_mut().set_input("ねえ".to_string());
        send_message(&chat, &api, &RecordingSpeech::default()).await.unwrap();

        let chat = chat.borrow();
        let mut ids: Vec<&str> = chat.transcript.iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn test_unauthorized_chat_apologises_and_ends_session() {
        let api = FakeApi::new();
        api.queue_chat(Err(ApiError::Unauthorized));
        let (session, tokens) = signed_in();
        let chat = RefCell::new(ChatSession::new("ピヨ"));
        chat.borrow_mut().set_input("こんにちは".to_string());

        let err = send_message(&chat, &api, &RecordingSpeech::default()).await.unwrap_err();
        assert!(handle_api_error(&session, &tokens, &err));

        assert_eq!(chat.borrow().transcript.last().unwrap().text, FALLBACK_REPLY);
        assert_eq!(session.borrow().status, SessionStatus::Unauthenticated);
        assert_eq!(tokens.load(), None);
    }
}
