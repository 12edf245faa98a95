use app_state::{ApiError, SpeechConfig};
use web_sys::{Element, HtmlInputElement};
use yew::prelude::*;

use crate::hooks::use_chat::use_chat;
use crate::services::api::ApiClient;
use crate::services::date_utils::format_time;
use crate::services::speech::speech_output;

#[derive(Properties, PartialEq)]
pub struct ChatPanelProps {
    pub api_client: ApiClient,
    pub character_name: String,
    pub speech: SpeechConfig,
    pub on_api_error: Callback<ApiError>,
}

#[function_component(ChatPanel)]
pub fn chat_panel(props: &ChatPanelProps) -> Html {
    let speech = use_memo(props.speech.clone(), |config| speech_output(config));
    let chat = use_chat(
        &props.api_client,
        &props.character_name,
        (*speech).clone(),
        props.on_api_error.clone(),
    );
    let messages_end = use_node_ref();

    // Keep the newest message in view
    {
        let messages_end = messages_end.clone();
        use_effect_with(chat.chat.transcript.len(), move |_| {
            if let Some(element) = messages_end.cast::<Element>() {
                element.scroll_into_view();
            }
            || ()
        });
    }

    let on_input = {
        let set_input = chat.actions.set_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_input.emit(input.value());
        })
    };

    let on_keydown = {
        let send = chat.actions.send.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                send.emit(());
            }
        })
    };

    let on_send = {
        let send = chat.actions.send.clone();
        Callback::from(move |_: MouseEvent| send.emit(()))
    };

    let session = &chat.chat;

    html! {
        <div class="chat-container">
            <div class="chat-header">{format!("{}とおしゃべり", session.character_name)}</div>
            <div class="messages-container">
                {for session.transcript.iter().map(|message| html! {
                    <div
                        key={message.id.clone()}
                        class={classes!("message", if message.is_user() { "user" } else { "character" })}
                        title={format_time(message.timestamp)}
                    >
                        {message.text.clone()}
                    </div>
                })}
                if session.is_sending() {
                    <div class="loading-indicator">{"考えているよ..."}</div>
                }
                <div ref={messages_end}></div>
            </div>
            <div class="input-container">
                <input
                    type="text"
                    class="text-input"
                    value={session.input.clone()}
                    oninput={on_input}
                    onkeydown={on_keydown}
                    placeholder="メッセージを入力..."
                    disabled={session.is_sending()}
                />
                <button class="send-button" onclick={on_send} disabled={!session.can_send()}>
                    {"送信"}
                </button>
            </div>
        </div>
    }
}
