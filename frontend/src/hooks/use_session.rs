use app_state::auth::{self, AuthField, AuthForm};
use app_state::session::{self, SessionState};
use app_state::ApiError;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::token_store::LocalTokenStore;

pub struct UseSessionResult {
    pub session: SessionState,
    pub form: AuthForm,
    pub rename_error: Option<String>,
    pub actions: UseSessionActions,
}

#[derive(Clone, PartialEq)]
pub struct UseSessionActions {
    pub submit_auth: Callback<()>,
    pub set_field: Callback<(AuthField, String)>,
    pub toggle_mode: Callback<()>,
    pub logout: Callback<()>,
    pub handle_error: Callback<ApiError>,
    pub refresh_profile: Callback<()>,
    pub rename_character: Callback<String>,
    pub dismiss_celebration: Callback<()>,
}

#[hook]
pub fn use_session(api_client: &ApiClient) -> UseSessionResult {
    let session = use_mut_ref(SessionState::new);
    let form = use_mut_ref(AuthForm::new);
    let rename_error = use_state(|| Option::<String>::None);
    let update = use_force_update();

    // Startup: pick up a stored token
    {
        let api_client = api_client.clone();
        let session = session.clone();
        let update = update.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                session::bootstrap(&session, &api_client, &LocalTokenStore).await;
                update.force_update();
            });
            || ()
        });
    }

    let submit_auth = {
        let api_client = api_client.clone();
        let session = session.clone();
        let form = form.clone();
        let update = update.clone();

        use_callback((), move |_, _| {
            let submission = form.borrow_mut().prepare();
            update.force_update();
            let Some(submission) = submission else {
                return;
            };

            let api_client = api_client.clone();
            let session = session.clone();
            let form = form.clone();
            let update = update.clone();
            spawn_local(async move {
                auth::authenticate(&form, &session, &api_client, &LocalTokenStore, submission).await;
                update.force_update();
            });
        })
    };

    let set_field = {
        let form = form.clone();
        let update = update.clone();
        use_callback((), move |(field, value): (AuthField, String), _| {
            form.borrow_mut().set_field(field, value);
            update.force_update();
        })
    };

    let toggle_mode = {
        let form = form.clone();
        let update = update.clone();
        use_callback((), move |_, _| {
            form.borrow_mut().toggle_mode();
            update.force_update();
        })
    };

    let logout = {
        let session = session.clone();
        let update = update.clone();
        use_callback((), move |_, _| {
            session.borrow_mut().logout(&LocalTokenStore);
            update.force_update();
        })
    };

    let handle_error = {
        let session = session.clone();
        let update = update.clone();
        use_callback((), move |err: ApiError, _| {
            // several requests may fail with 401 for one expiry
            let signed_in = session.borrow().is_authenticated();
            if signed_in && session::handle_api_error(&session, &LocalTokenStore, &err) {
                update.force_update();
            }
        })
    };

    let refresh_profile = {
        let api_client = api_client.clone();
        let session = session.clone();
        let update = update.clone();
        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let session = session.clone();
            let update = update.clone();
            spawn_local(async move {
                let _ = session::fetch_profile(&session, &api_client, &LocalTokenStore).await;
                update.force_update();
            });
        })
    };

    let rename_character = {
        let api_client = api_client.clone();
        let session = session.clone();
        let rename_error = rename_error.clone();
        let update = update.clone();
        use_callback((), move |name: String, _| {
            let api_client = api_client.clone();
            let session = session.clone();
            let rename_error = rename_error.clone();
            let update = update.clone();
            spawn_local(async move {
                match session::rename_character(&session, &api_client, &LocalTokenStore, &name).await {
                    Ok(()) => rename_error.set(None),
                    Err(ApiError::Validation(message)) => rename_error.set(Some(message)),
                    Err(e) => {
                        log::warn!("Rename failed: {}", e);
                        rename_error.set(Some("名前の変更に失敗しました".to_string()));
                    }
                }
                update.force_update();
            });
        })
    };

    let dismiss_celebration = {
        let session = session.clone();
        let update = update.clone();
        use_callback((), move |_, _| {
            session.borrow_mut().dismiss_celebration();
            update.force_update();
        })
    };

    let snapshot = session.borrow().clone();
    let form_snapshot = form.borrow().clone();

    UseSessionResult {
        session: snapshot,
        form: form_snapshot,
        rename_error: (*rename_error).clone(),
        actions: UseSessionActions {
            submit_auth,
            set_field,
            toggle_mode,
            logout,
            handle_error,
            refresh_profile,
            rename_character,
            dismiss_celebration,
        },
    }
}
