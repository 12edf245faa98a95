use app_state::calendar::{CalendarDay, CalendarDayType};
use app_state::ApiError;
use chrono::Datelike;
use yew::prelude::*;

use super::stamp_selector::StampSelector;
use crate::hooks::use_calendar::use_calendar;
use crate::services::api::ApiClient;
use crate::services::date_utils::{format_month_ja, WEEKDAYS};

#[derive(Properties, PartialEq)]
pub struct StampCalendarProps {
    pub api_client: ApiClient,
    /// Fired after stamps were saved for a day
    pub on_saved: Callback<()>,
    pub on_api_error: Callback<ApiError>,
}

#[function_component(StampCalendar)]
pub fn stamp_calendar(props: &StampCalendarProps) -> Html {
    let cal = use_calendar(
        &props.api_client,
        props.on_saved.clone(),
        props.on_api_error.clone(),
    );
    let actions = cal.actions.clone();

    let on_previous = {
        let previous_month = actions.previous_month.clone();
        Callback::from(move |_: MouseEvent| previous_month.emit(()))
    };

    let on_next = {
        let next_month = actions.next_month.clone();
        Callback::from(move |_: MouseEvent| next_month.emit(()))
    };

    let render_day = |day: &CalendarDay| -> Html {
        match (day.day_type.clone(), day.date) {
            (CalendarDayType::MonthDay, Some(date)) => {
                let onclick = {
                    let select_date = actions.select_date.clone();
                    Callback::from(move |_: MouseEvent| select_date.emit(date))
                };
                let classes = classes!(
                    "calendar-day",
                    day.is_today.then_some("today"),
                    day.is_future.then_some("future"),
                );
                html! {
                    <div class={classes} {onclick}>
                        <div class="day-number">{date.day().to_string()}</div>
                        if !day.stamps.is_empty() || day.has_more {
                            <div class="stamp-container">
                                {for day.stamps.iter().map(|stamp| html! {
                                    <span class="stamp-icon" title={stamp.name}>{stamp.emoji}</span>
                                })}
                                if day.has_more {
                                    <span class="stamp-icon">{"+"}</span>
                                }
                            </div>
                        }
                    </div>
                }
            }
            _ => html! { <div class="calendar-day padding"></div> },
        }
    };

    html! {
        <div class="calendar-container">
            <div class="calendar-header">
                <button class="nav-button" onclick={on_previous}>{"‹"}</button>
                <h3 class="month-title">{format_month_ja(cal.calendar.month)}</h3>
                <button class="nav-button" onclick={on_next}>{"›"}</button>
            </div>
            <div class={classes!("calendar-grid", cal.calendar.loading.then_some("loading"))}>
                {for WEEKDAYS.iter().map(|weekday| html! {
                    <div class="weekday-header">{*weekday}</div>
                })}
                {for cal.days.iter().map(render_day)}
            </div>

            if let Some(dialog) = &cal.calendar.dialog {
                <StampSelector
                    dialog={dialog.clone()}
                    saving={cal.calendar.saving}
                    error={cal.save_error.clone()}
                    on_toggle={actions.toggle_stamp.clone()}
                    on_save={actions.save.clone()}
                    on_cancel={actions.cancel.clone()}
                />
            }
        </div>
    }
}
