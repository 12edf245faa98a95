use app_state::session::SessionStatus;
use app_state::ClientConfig;
use shared::Profile;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::auth_form::AuthPanel;
use components::calendar::StampCalendar;
use components::character_card::CharacterCard;
use components::chat::ChatPanel;
use components::header::Header;
use hooks::use_session::{use_session, UseSessionActions};
use services::api::ApiClient;

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| ClientConfig::from_build_env(option_env!("DAILY_STAMP_API_URL")));
    let api_client = use_memo(config.api_base_url.clone(), |url| ApiClient::new(url));
    let session = use_session(&api_client);

    match session.session.status {
        SessionStatus::Loading => html! {
            <div class="app-container">
                <div class="loading-spinner">{"読み込み中..."}</div>
            </div>
        },
        SessionStatus::Unauthenticated => html! {
            <div class="app-container">
                <div class="main-content">
                    <Header />
                    <AuthPanel
                        form={session.form.clone()}
                        on_field={session.actions.set_field.clone()}
                        on_submit={session.actions.submit_auth.clone()}
                        on_toggle={session.actions.toggle_mode.clone()}
                    />
                </div>
            </div>
        },
        SessionStatus::Authenticated => html! {
            <div class="app-container">
                <div class="main-content">
                    <Header on_logout={Some(session.actions.logout.clone())} />
                    if let Some(profile) = &session.session.profile {
                        <MainView
                            api_client={(*api_client).clone()}
                            config={(*config).clone()}
                            profile={profile.clone()}
                            celebration={session.session.celebration}
                            rename_error={session.rename_error.clone()}
                            actions={session.actions.clone()}
                        />
                    }
                </div>
            </div>
        },
    }
}

#[derive(Properties, PartialEq)]
struct MainViewProps {
    api_client: ApiClient,
    config: ClientConfig,
    profile: Profile,
    celebration: Option<shared::StageTransition>,
    rename_error: Option<String>,
    actions: UseSessionActions,
}

#[function_component(MainView)]
fn main_view(props: &MainViewProps) -> Html {
    let actions = &props.actions;

    html! {
        <>
            <CharacterCard
                profile={props.profile.clone()}
                celebration={props.celebration}
                celebration_ms={props.config.celebration_ms}
                on_celebration_end={actions.dismiss_celebration.clone()}
                on_rename={actions.rename_character.clone()}
                rename_error={props.rename_error.clone()}
            />
            <div class="content-grid">
                <section class="section">
                    <h3 class="section-title">{"📅 カレンダー"}</h3>
                    <StampCalendar
                        api_client={props.api_client.clone()}
                        on_saved={actions.refresh_profile.clone()}
                        on_api_error={actions.handle_error.clone()}
                    />
                </section>
                <section class="section">
                    <h3 class="section-title">{"💬 おしゃべり"}</h3>
                    <ChatPanel
                        api_client={props.api_client.clone()}
                        character_name={props.profile.character_name.clone()}
                        speech={props.config.speech.clone()}
                        on_api_error={actions.handle_error.clone()}
                    />
                </section>
            </div>
        </>
    }
}

fn main() {
    if let Err(e) = services::logging::init() {
        gloo::console::error!(e.to_string());
    }
    log::info!("🦷 Starting Daily Stamp");
    yew::Renderer::<App>::new().render();
}
