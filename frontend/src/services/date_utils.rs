use chrono::{Datelike, NaiveDate};
use shared::YearMonth;

pub const WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Today in the browser's local time zone
pub fn today() -> NaiveDate {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// e.g. "2025/6/15", as the ja-JP locale prints dates
pub fn format_date_ja(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.year(), date.month(), date.day())
}

/// e.g. "2025年6月"
pub fn format_month_ja(month: YearMonth) -> String {
    format!("{}年{}月", month.year(), month.month())
}

/// e.g. "14:05"
pub fn format_time(timestamp: chrono::DateTime<chrono::Utc>) -> String {
    let local = timestamp.with_timezone(&chrono::Local);
    local.format("%H:%M").to_string()
}
