//! # Calendar State Module
//!
//! Brush records for the month on screen, plus the stamp-selection dialog.
//!
//! ## Responsibilities:
//! - Month navigation and loading (`GET /brushes?month=`)
//! - Building the Sunday-first month grid
//! - Dialog editing, kept local until the user saves
//! - Saving a selection (`POST /brushes`) and reloading the month
//!
//! Future dates never open the dialog and never reach the backend.

use chrono::NaiveDate;
use shared::{BrushRecord, CreateBrushRequest, StampType, YearMonth};
use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::api::StampApi;
use crate::error::ApiError;
use crate::sequence::{RequestSequence, RequestTicket};

/// Tiles show at most this many stamp emojis, then a "+"
pub const TILE_STAMP_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarDayType {
    /// Empty cell before the 1st so the grid starts on Sunday
    PaddingBefore,
    MonthDay,
}

/// One cell of the month grid
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub day_type: CalendarDayType,
    pub date: Option<NaiveDate>,
    /// Emojis for the tile, already limited
    pub stamps: Vec<&'static StampType>,
    /// The record holds more stamps than the tile shows
    pub has_more: bool,
    pub is_today: bool,
    pub is_future: bool,
}

/// Stamp selection being edited for one date
#[derive(Debug, Clone, PartialEq)]
pub struct StampDialog {
    pub date: NaiveDate,
    pub selected: Vec<String>,
}

impl StampDialog {
    pub fn toggle(&mut self, stamp_id: &str) {
        if let Some(pos) = self.selected.iter().position(|s| s == stamp_id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(stamp_id.to_string());
        }
    }

    pub fn is_selected(&self, stamp_id: &str) -> bool {
        self.selected.iter().any(|s| s == stamp_id)
    }

    pub fn summary(&self) -> String {
        if self.selected.is_empty() {
            "スタンプを選択してください".to_string()
        } else {
            format!("{}個のスタンプを選択中", self.selected.len())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(BrushRecord),
    /// Date was in the future, nothing was sent
    Ignored,
}

#[derive(Debug, Clone)]
pub struct CalendarState {
    pub month: YearMonth,
    pub records: BTreeMap<NaiveDate, BrushRecord>,
    pub loading: bool,
    pub saving: bool,
    pub dialog: Option<StampDialog>,
    month_requests: RequestSequence,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: YearMonth::of(today),
            records: BTreeMap::new(),
            loading: false,
            saving: false,
            dialog: None,
            month_requests: RequestSequence::new(),
        }
    }

    pub fn previous_month(&mut self) -> YearMonth {
        self.month = self.month.previous();
        log::info!("📅 Navigated to previous month: {}", self.month);
        self.month
    }

    pub fn next_month(&mut self) -> YearMonth {
        self.month = self.month.next();
        log::info!("📅 Navigated to next month: {}", self.month);
        self.month
    }

    pub fn record_for(&self, date: NaiveDate) -> Option<&BrushRecord> {
        self.records.get(&date)
    }

    /// Open the dialog for `date`. Future dates are ignored.
    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        if date > today {
            log::debug!("Ignoring future date {}", date);
            return false;
        }
        let selected = self.record_for(date).map(|r| r.stamps.clone()).unwrap_or_default();
        self.dialog = Some(StampDialog { date, selected });
        true
    }

    pub fn toggle_stamp(&mut self, stamp_id: &str) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.toggle(stamp_id);
        }
    }

    /// Close the dialog, discarding the edit
    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn begin_load(&mut self) -> (RequestTicket, YearMonth) {
        self.loading = true;
        (self.month_requests.issue(), self.month)
    }

    /// Apply a month response. Stale responses are dropped; failures keep the
    /// records already shown.
    pub fn finish_load(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<BrushRecord>, ApiError>,
    ) -> Result<(), ApiError> {
        if !self.month_requests.is_current(ticket) {
            log::debug!("Dropping stale month response");
            return Ok(());
        }
        self.loading = false;

        match result {
            Ok(records) => {
                self.records = records.into_iter().map(|r| (r.date, r)).collect();
                log::info!("📅 Loaded {} brush records for {}", self.records.len(), self.month);
                Ok(())
            }
            Err(err) => {
                log::warn!("Failed to fetch brushes: {}", err);
                Err(err)
            }
        }
    }

    /// Sunday-first grid for the shown month
    pub fn grid(&self, today: NaiveDate) -> Vec<CalendarDay> {
        let mut days = Vec::new();

        for _ in 0..self.month.first_day_of_week() {
            days.push(CalendarDay {
                day_type: CalendarDayType::PaddingBefore,
                date: None,
                stamps: Vec::new(),
                has_more: false,
                is_today: false,
                is_future: false,
            });
        }

        for day in 1..=self.month.days_in_month() {
            let Some(date) = self.month.day(day) else { continue };
            let (stamps, has_more) = match self.record_for(date) {
                Some(record) => (
                    record
                        .stamps
                        .iter()
                        .take(TILE_STAMP_LIMIT)
                        .filter_map(|id| StampType::find(id))
                        .collect(),
                    record.stamps.len() > TILE_STAMP_LIMIT,
                ),
                None => (Vec::new(), false),
            };
            days.push(CalendarDay {
                day_type: CalendarDayType::MonthDay,
                date: Some(date),
                stamps,
                has_more,
                is_today: date == today,
                is_future: date > today,
            });
        }

        days
    }
}

/// Load the shown month
pub async fn load_month(calendar: &RefCell<CalendarState>, api: &dyn StampApi) -> Result<(), ApiError> {
    let (ticket, month) = calendar.borrow_mut().begin_load();
    let result = api.list_brushes(month).await;
    calendar.borrow_mut().finish_load(ticket, result)
}

/// Create or replace the record for `date`, then reload the month.
/// Future dates return [`SaveOutcome::Ignored`] without a request.
pub async fn record_stamps(
    calendar: &RefCell<CalendarState>,
    api: &dyn StampApi,
    date: NaiveDate,
    stamps: Vec<String>,
    today: NaiveDate,
) -> Result<SaveOutcome, ApiError> {
    if date > today {
        log::debug!("Not saving stamps for future date {}", date);
        return Ok(SaveOutcome::Ignored);
    }

    let request = CreateBrushRequest::new(date, stamps);
    calendar.borrow_mut().saving = true;

    let record = match api.create_brush(&request).await {
        Ok(record) => record,
        Err(err) => {
            log::error!("Failed to save stamps: {}", err);
            calendar.borrow_mut().saving = false;
            return Err(err);
        }
    };
    log::info!("🦷 Saved {} stamps for {}", record.stamps.len(), record.date);
    calendar.borrow_mut().records.insert(record.date, record.clone());

    // the record is already in place, a failed reload only leaves it stale.
    // `saving` stays set until the reload settles so the dialog cannot save twice
    let _ = load_month(calendar, api).await;
    calendar.borrow_mut().saving = false;
    Ok(SaveOutcome::Saved(record))
}

/// Save the open dialog. The dialog closes only when the save succeeds.
pub async fn save_selection(
    calendar: &RefCell<CalendarState>,
    api: &dyn StampApi,
    today: NaiveDate,
) -> Result<SaveOutcome, ApiError> {
    let Some(dialog) = calendar.borrow().dialog.clone() else {
        return Ok(SaveOutcome::Ignored);
    };

    let outcome = record_stamps(calendar, api, dialog.date, dialog.selected, today).await?;
    calendar.borrow_mut().dialog = None;
    Ok(outcome)
}
