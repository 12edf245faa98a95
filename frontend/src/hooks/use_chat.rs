use app_state::chat::{self, ChatSession};
use app_state::{ApiError, SpeechOutput};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

pub struct UseChatResult {
    pub chat: ChatSession,
    pub actions: UseChatActions,
}

#[derive(Clone)]
pub struct UseChatActions {
    pub set_input: Callback<String>,
    pub send: Callback<()>,
}

#[hook]
pub fn use_chat(
    api_client: &ApiClient,
    character_name: &str,
    speech: Rc<dyn SpeechOutput>,
    on_api_error: Callback<ApiError>,
) -> UseChatResult {
    let chat = {
        let character_name = character_name.to_string();
        use_mut_ref(move || ChatSession::new(&character_name))
    };
    let update = use_force_update();

    // A rename keeps the transcript
    {
        let chat = chat.clone();
        use_effect_with(character_name.to_string(), move |name| {
            chat.borrow_mut().character_name = name.clone();
            || ()
        });
    }

    let set_input = {
        let chat = chat.clone();
        let update = update.clone();
        use_callback((), move |text: String, _| {
            chat.borrow_mut().set_input(text);
            update.force_update();
        })
    };

    let send = {
        let api_client = api_client.clone();
        let chat = chat.clone();
        let update = update.clone();
        use_callback(on_api_error, move |_, on_api_error| {
            let Some(request) = chat.borrow_mut().begin_send() else {
                return;
            };
            update.force_update();

            let api_client = api_client.clone();
            let chat = chat.clone();
            let speech = speech.clone();
            let update = update.clone();
            let on_api_error = on_api_error.clone();
            spawn_local(async move {
                match chat::deliver(&chat, &api_client, speech.as_ref(), request).await {
                    Ok(exchange) => log::debug!("Chat exchange ended as {:?}", exchange),
                    Err(e) => on_api_error.emit(e),
                }
                update.force_update();
            });
        })
    };

    let snapshot = chat.borrow().clone();

    UseChatResult {
        chat: snapshot,
        actions: UseChatActions { set_input, send },
    }
}
