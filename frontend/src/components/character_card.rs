use gloo::timers::callback::Timeout;
use shared::{describe_stage, Profile, StageTransition};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CharacterCardProps {
    pub profile: Profile,
    pub celebration: Option<StageTransition>,
    pub celebration_ms: u32,
    pub on_celebration_end: Callback<()>,
    pub on_rename: Callback<String>,
    #[prop_or_default]
    pub rename_error: Option<String>,
}

#[function_component(CharacterCard)]
pub fn character_card(props: &CharacterCardProps) -> Html {
    let editing = use_state(|| false);
    let draft = use_state(String::new);

    // The level-up popup closes itself
    {
        let on_end = props.on_celebration_end.clone();
        let celebration_ms = props.celebration_ms;
        use_effect_with(props.celebration, move |celebration| {
            let timeout = celebration.map(|_| Timeout::new(celebration_ms, move || on_end.emit(())));
            move || drop(timeout)
        });
    }

    let on_edit = {
        let editing = editing.clone();
        let draft = draft.clone();
        let name = props.profile.character_name.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(name.clone());
            editing.set(true);
        })
    };

    let on_draft_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(input.value());
        })
    };

    let on_rename_submit = {
        let editing = editing.clone();
        let draft = draft.clone();
        let on_rename = props.on_rename.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_rename.emit((*draft).clone());
            editing.set(false);
        })
    };

    let on_rename_cancel = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(false))
    };

    let profile = &props.profile;
    let display = profile.stage_display();
    let percentage = display.rounded_percentage();

    html! {
        <>
            <div class="character-container">
                <div class="character-image">{display.emoji}</div>
                if *editing {
                    <form class="rename-form" onsubmit={on_rename_submit}>
                        <input
                            type="text"
                            class="rename-input"
                            value={(*draft).clone()}
                            oninput={on_draft_input}
                        />
                        <button type="submit" class="rename-save">{"保存"}</button>
                        <button type="button" class="rename-cancel" onclick={on_rename_cancel}>{"キャンセル"}</button>
                    </form>
                } else {
                    <h2 class="character-name" onclick={on_edit} title="名前を変更">
                        {profile.character_name.clone()}
                    </h2>
                }
                if let Some(error) = &props.rename_error {
                    <div class="error-message">{error.clone()}</div>
                }

                <div class="stage-info">
                    <div class="stage-name">{display.name}</div>
                    <div class="stage-description">{display.description}</div>
                    <div class="stage-next">{display.next_target}</div>
                </div>

                <div class="progress-container">
                    <div class="progress-label">
                        <span>{"成長レベル"}</span>
                        <span>{format!("{}%", percentage)}</span>
                    </div>
                    <div class="progress-bar">
                        <div class="progress-fill" style={format!("width: {}%;", display.percentage)}></div>
                    </div>
                </div>

                <div class="stats-container">
                    <div class="stat-item">
                        <div class="stat-number">{profile.consecutive_days_brushed.to_string()}</div>
                        <div class="stat-label">{"連続日数"}</div>
                    </div>
                    <div class="stat-item">
                        <div class="stat-number">{profile.total_days_brushed.to_string()}</div>
                        <div class="stat-label">{"合計日数"}</div>
                    </div>
                </div>
            </div>

            if let Some(transition) = props.celebration {
                <div class="stage-up-notification">
                    {"🎉 レベルアップ！ 🎉"}
                    <br />
                    {format!("{}に進化しました！", describe_stage(transition.to, 0).name)}
                </div>
            }
        </>
    }
}
