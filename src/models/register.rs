//! Register (equipment loan) model and related types

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Time of day as sent by clients, e.g. "08:00:00"
static TIME_OF_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}$").expect("valid time-of-day pattern"));

/// Forms the store casts to TIME, tried in order
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Date-time forms without an offset, the date part is kept
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Loan state derived from the departure time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterStatus {
    /// Equipment is still out
    Open,
    /// Equipment has been returned
    Closed,
}

impl RegisterStatus {
    pub fn from_departure(departure_time: Option<&str>) -> Self {
        match departure_time {
            Some(_) => RegisterStatus::Closed,
            None => RegisterStatus::Open,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegisterStatus::Open => "open",
            RegisterStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for RegisterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Plain register row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Register {
    pub id: i32,
    pub student_id: i32,
    pub equipment_id: i32,
    pub date: NaiveDate,
    pub entry_time: String,
    pub departure_time: Option<String>,
    pub comment: Option<String>,
}

impl Register {
    pub fn status(&self) -> RegisterStatus {
        RegisterStatus::from_departure(self.departure_time.as_deref())
    }
}

/// Register joined with its student and equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RegisterDetails {
    pub register_id: i32,
    pub student_id: i32,
    pub name: String,
    pub id_number: String,
    pub email: String,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub state: String,
    pub date: NaiveDate,
    pub entry_time: String,
    pub departure_time: Option<String>,
    pub comment: Option<String>,
}

/// Create register request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRegister {
    pub student_id: i32,
    pub equipment_id: i32,
    #[serde(deserialize_with = "deserialize_loan_date")]
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub date: NaiveDate,
    #[validate(regex(path = *TIME_OF_DAY, message = "must match the HH:MM:SS pattern"))]
    #[schema(example = "08:00:00")]
    pub entry_time: String,
    #[serde(default)]
    #[validate(regex(path = *TIME_OF_DAY, message = "must match the HH:MM:SS pattern"))]
    pub departure_time: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub comment: Option<String>,
}

impl CreateRegister {
    pub fn check_time_window(&self) -> AppResult<()> {
        check_time_window(&self.entry_time, self.departure_time.as_deref())
    }
}

/// Update register request.
///
/// Replaces the row wholesale: omitted optional fields are written as null.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRegister {
    pub equipment_id: i32,
    #[serde(deserialize_with = "deserialize_loan_date")]
    #[schema(value_type = String, format = Date, example = "2024-05-02")]
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub entry_time: String,
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub comment: Option<String>,
}

impl UpdateRegister {
    pub fn status(&self) -> RegisterStatus {
        RegisterStatus::from_departure(self.departure_time.as_deref())
    }

    pub fn check_time_window(&self) -> AppResult<()> {
        check_time_window(&self.entry_time, self.departure_time.as_deref())
    }
}

/// Rejects a departure earlier than the entry. Values that are not
/// well-formed times are left for the store to reject.
pub fn check_time_window(entry_time: &str, departure_time: Option<&str>) -> AppResult<()> {
    let Some(departure_time) = departure_time else {
        return Ok(());
    };

    match (parse_time_of_day(entry_time), parse_time_of_day(departure_time)) {
        (Some(entry), Some(departure)) if departure < entry => Err(AppError::Validation(
            "\"departure_time\" must not be earlier than \"entry_time\"".to_string(),
        )),
        _ => Ok(()),
    }
}

fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
}

/// Loan date as clients send it: text or epoch milliseconds
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLoanDate {
    Millis(i64),
    Text(String),
}

/// Accepts a calendar date ("2024-05-01"), a date-time with or without an
/// offset, or epoch milliseconds. Only the date part is kept.
fn deserialize_loan_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match RawLoanDate::deserialize(deserializer)
        .map_err(|_| <D::Error as serde::de::Error>::custom("\"date\" must be a valid date"))?
    {
        RawLoanDate::Millis(millis) => DateTime::from_timestamp_millis(millis)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| millis.to_string()),
        RawLoanDate::Text(raw) => parse_loan_date(&raw).ok_or(raw),
    };

    parsed.map_err(|raw| {
        serde::de::Error::custom(format!("\"date\" must be a valid date, got \"{}\"", raw))
    })
}

fn parse_loan_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|dt| dt.date())
        })
}
