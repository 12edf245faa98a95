use app_state::calendar::{self, CalendarDay, CalendarState, SaveOutcome};
use app_state::ApiError;
use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils;

pub struct UseCalendarResult {
    pub calendar: CalendarState,
    pub days: Vec<CalendarDay>,
    pub today: NaiveDate,
    pub save_error: Option<String>,
    pub actions: UseCalendarActions,
}

#[derive(Clone)]
pub struct UseCalendarActions {
    pub previous_month: Callback<()>,
    pub next_month: Callback<()>,
    pub select_date: Callback<NaiveDate>,
    pub toggle_stamp: Callback<String>,
    pub cancel: Callback<()>,
    pub save: Callback<()>,
}

/// Stamp calendar for the signed-in user. `on_saved` fires after a record
/// was written so the caller can refresh the profile counters. Request
/// failures go to `on_api_error`, which ends the session on a 401.
#[hook]
pub fn use_calendar(
    api_client: &ApiClient,
    on_saved: Callback<()>,
    on_api_error: Callback<ApiError>,
) -> UseCalendarResult {
    let calendar = use_mut_ref(|| CalendarState::new(date_utils::today()));
    let save_error = use_state(|| Option::<String>::None);
    let update = use_force_update();

    let load = {
        let api_client = api_client.clone();
        let calendar = calendar.clone();
        let update = update.clone();
        use_callback(on_api_error.clone(), move |_: (), on_api_error| {
            let api_client = api_client.clone();
            let calendar = calendar.clone();
            let update = update.clone();
            let on_api_error = on_api_error.clone();
            spawn_local(async move {
                if let Err(e) = calendar::load_month(&calendar, &api_client).await {
                    log::warn!("Failed to fetch brushes: {}", e);
                    on_api_error.emit(e);
                }
                update.force_update();
            });
        })
    };

    {
        let load = load.clone();
        use_effect_with((), move |_| {
            load.emit(());
            || ()
        });
    }

    let previous_month = {
        let calendar = calendar.clone();
        let load = load.clone();
        let update = update.clone();
        use_callback((), move |_, _| {
            let month = calendar.borrow_mut().previous_month();
            log::debug!("Showing {}", month);
            load.emit(());
            update.force_update();
        })
    };

    let next_month = {
        let calendar = calendar.clone();
        let load = load.clone();
        let update = update.clone();
        use_callback((), move |_, _| {
            let month = calendar.borrow_mut().next_month();
            log::debug!("Showing {}", month);
            load.emit(());
            update.force_update();
        })
    };

    let select_date = {
        let calendar = calendar.clone();
        let save_error = save_error.clone();
        let update = update.clone();
        use_callback((), move |date: NaiveDate, _| {
            if calendar.borrow_mut().select_date(date, date_utils::today()) {
                save_error.set(None);
                update.force_update();
            }
        })
    };

    let toggle_stamp = {
        let calendar = calendar.clone();
        let update = update.clone();
        use_callback((), move |stamp_id: String, _| {
            calendar.borrow_mut().toggle_stamp(&stamp_id);
            update.force_update();
        })
    };

    let cancel = {
        let calendar = calendar.clone();
        let save_error = save_error.clone();
        let update = update.clone();
        use_callback((), move |_, _| {
            calendar.borrow_mut().cancel_dialog();
            save_error.set(None);
            update.force_update();
        })
    };

    let save = {
        let api_client = api_client.clone();
        let calendar = calendar.clone();
        let save_error = save_error.clone();
        let update = update.clone();
        use_callback((on_saved, on_api_error), move |_, (on_saved, on_api_error)| {
            if calendar.borrow().saving {
                return;
            }
            calendar.borrow_mut().saving = true;
            update.force_update();

            let api_client = api_client.clone();
            let calendar = calendar.clone();
            let save_error = save_error.clone();
            let update = update.clone();
            let on_saved = on_saved.clone();
            let on_api_error = on_api_error.clone();
            spawn_local(async move {
                match calendar::save_selection(&calendar, &api_client, date_utils::today()).await {
                    Ok(SaveOutcome::Saved(_)) => {
                        save_error.set(None);
                        on_saved.emit(());
                    }
                    Ok(SaveOutcome::Ignored) => {}
                    Err(e) => {
                        save_error.set(Some("スタンプの保存に失敗しました".to_string()));
                        on_api_error.emit(e);
                    }
                }
                calendar.borrow_mut().saving = false;
                update.force_update();
            });
        })
    };

    let today = date_utils::today();
    let snapshot = calendar.borrow().clone();
    let days = snapshot.grid(today);

    UseCalendarResult {
        calendar: snapshot,
        days,
        today,
        save_error: (*save_error).clone(),
        actions: UseCalendarActions {
            previous_month,
            next_month,
            select_date,
            toggle_stamp,
            cancel,
            save,
        },
    }
}
