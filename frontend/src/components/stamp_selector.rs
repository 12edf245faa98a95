use app_state::calendar::StampDialog;
use shared::STAMP_TYPES;
use yew::prelude::*;

use crate::services::date_utils::format_date_ja;

#[derive(Properties, PartialEq)]
pub struct StampSelectorProps {
    pub dialog: StampDialog,
    pub saving: bool,
    #[prop_or_default]
    pub error: Option<String>,
    pub on_toggle: Callback<String>,
    pub on_save: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Modal for choosing the stamps of one day
#[function_component(StampSelector)]
pub fn stamp_selector(props: &StampSelectorProps) -> Html {
    let on_backdrop_click = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_cancel.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel_click = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let on_save_click = {
        let on_save = props.on_save.clone();
        Callback::from(move |_: MouseEvent| on_save.emit(()))
    };

    let dialog = &props.dialog;

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal-content" onclick={on_modal_click}>
                <span class="modal-close" onclick={on_cancel_click.clone()}>{"×"}</span>
                <h3>{format!("{} のスタンプ", format_date_ja(dialog.date))}</h3>
                <div class="selected-count">{dialog.summary()}</div>
                <div class="stamp-grid">
                    {for STAMP_TYPES.iter().map(|stamp| {
                        let selected = dialog.is_selected(stamp.id);
                        let onclick = {
                            let on_toggle = props.on_toggle.clone();
                            let id = stamp.id.to_string();
                            Callback::from(move |_: MouseEvent| on_toggle.emit(id.clone()))
                        };
                        let style = if selected {
                            format!("border-color: {}; background: {}22;", stamp.color, stamp.color)
                        } else {
                            String::new()
                        };
                        html! {
                            <div
                                key={stamp.id}
                                class={classes!("stamp-card", selected.then_some("selected"))}
                                style={style}
                                {onclick}
                            >
                                <span class="stamp-emoji">{stamp.emoji}</span>
                                <div class="stamp-name">{stamp.name}</div>
                            </div>
                        }
                    })}
                </div>
                if let Some(error) = &props.error {
                    <div class="error-message">{error.clone()}</div>
                }
                <div class="button-container">
                    <button class="button-secondary" onclick={on_cancel_click}>{"キャンセル"}</button>
                    <button class="button-primary" onclick={on_save_click} disabled={props.saving}>
                        {"保存"}
                    </button>
                </div>
            </div>
        </div>
    }
}
