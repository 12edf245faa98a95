use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

mod progression;
mod year_month;

pub use progression::{describe_stage, progress_percentage, StageDisplay, StageTransition};
pub use year_month::{YearMonth, YearMonthError};

/// Account owned by the backend; the client only ever reads it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Growth phase of the virtual pet, ordered from first to last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    #[default]
    Egg,
    Chick,
    Chicken,
    Hawk,
    Phoenix,
    /// Any value the backend sends that this client does not know.
    /// Presented exactly like `Egg`.
    #[serde(other)]
    Unknown,
}

impl GrowthStage {
    /// Consecutive days needed to fill this stage's progress bar.
    /// `None` for the terminal stage.
    pub fn days_required(&self) -> Option<u32> {
        match self {
            GrowthStage::Egg | GrowthStage::Unknown => Some(3),
            GrowthStage::Chick => Some(7),
            GrowthStage::Chicken => Some(14),
            GrowthStage::Hawk => Some(30),
            GrowthStage::Phoenix => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Egg => "egg",
            GrowthStage::Chick => "chick",
            GrowthStage::Chicken => "chicken",
            GrowthStage::Hawk => "hawk",
            GrowthStage::Phoenix => "phoenix",
            GrowthStage::Unknown => "unknown",
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One profile per user. Streak counters are maintained server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub character_name: String,
    pub current_stage: GrowthStage,
    pub stage_start_date: String,
    pub total_days_brushed: u32,
    /// Resets to zero once a calendar day is skipped
    pub consecutive_days_brushed: u32,
    pub last_brush_date: Option<NaiveDate>,
}

impl Profile {
    pub fn stage_display(&self) -> StageDisplay {
        describe_stage(self.current_stage, self.consecutive_days_brushed)
    }
}

/// Stamps recorded for one calendar date. Unique per (user, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushRecord {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub stamps: Vec<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Entry of the fixed stamp catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampType {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
}

pub const STAMP_TYPES: [StampType; 4] = [
    StampType { id: "brushing_completed", name: "歯磨き完了", emoji: "🦷", color: "#4CAF50" },
    StampType { id: "gargle_completed", name: "うがい完了", emoji: "💧", color: "#2196F3" },
    StampType { id: "time_check", name: "時間チェック", emoji: "⏰", color: "#FF9800" },
    StampType { id: "perfect", name: "パーフェクト", emoji: "⭐", color: "#FFD700" },
];

impl StampType {
    pub fn find(id: &str) -> Option<&'static StampType> {
        STAMP_TYPES.iter().find(|stamp| stamp.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sent form-encoded; the backend expects the email under `username`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub character_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBrushRequest {
    /// Serialized as YYYY-MM-DD
    pub date: NaiveDate,
    pub stamps: Vec<String>,
}

impl CreateBrushRequest {
    /// Build a request with duplicate stamp ids collapsed, first occurrence kept
    pub fn new(date: NaiveDate, stamps: impl IntoIterator<Item = String>) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for stamp in stamps {
            if !unique.contains(&stamp) {
                unique.push(stamp);
            }
        }
        Self { date, stamps: unique }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub character_stage: GrowthStage,
}
