use crate::clock::{self, ClockTime, MINUTES_PER_DAY};
use crate::schedule::ScheduleError;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Identifiant fort pour ShiftRecord
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Type de jornada. Les anciens libellés (`regular`, `ordinaria`, `outras`)
/// sont acceptés en lecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    #[default]
    #[serde(alias = "regular", alias = "ordinaria")]
    Ordinary,
    Extra,
    Compensatory,
    #[serde(alias = "outras")]
    Other,
}

impl ShiftKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftKind::Ordinary => "ordinary",
            ShiftKind::Extra => "extra",
            ShiftKind::Compensatory => "compensatory",
            ShiftKind::Other => "other",
        }
    }
}

impl std::str::FromStr for ShiftKind {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordinary" | "regular" | "ordinaria" => Ok(ShiftKind::Ordinary),
            "extra" => Ok(ShiftKind::Extra),
            "compensatory" => Ok(ShiftKind::Compensatory),
            "other" | "outras" => Ok(ShiftKind::Other),
            _ => Err(ScheduleError::InvalidKind(s.to_string())),
        }
    }
}

/// Créneau contigu sur un seul jour calendaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    pub id: ShiftId,
    #[serde(deserialize_with = "deserialize_day")]
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub total_hours: f64,
    #[serde(rename = "type", default)]
    pub kind: ShiftKind,
}

impl ShiftRecord {
    /// Crée un créneau de `duration_minutes` qui ne franchit pas minuit.
    pub fn new(
        date: NaiveDate,
        start_time: ClockTime,
        duration_minutes: u32,
        kind: ShiftKind,
    ) -> Result<Self, ScheduleError> {
        let from = start_time.minutes_from_midnight();
        if duration_minutes == 0 || from + duration_minutes > MINUTES_PER_DAY {
            return Err(ScheduleError::InvalidTimeRange);
        }
        Ok(Self {
            id: ShiftId::random(),
            date,
            start_time,
            end_time: start_time.add_minutes(duration_minutes),
            total_hours: clock::minutes_to_hours(duration_minutes),
            kind,
        })
    }

    /// Bornes `[début, fin)` en minutes depuis minuit du jour du créneau.
    pub fn bounds(&self) -> (u32, u32) {
        (self.start_time.minutes_from_midnight(), self.end_time.end_offset())
    }

    pub fn duration_minutes(&self) -> u32 {
        let (start, end) = self.bounds();
        end.saturating_sub(start)
    }

    pub fn overlaps(&self, other: &ShiftRecord) -> bool {
        if self.date != other.date {
            return false;
        }
        let (a_start, a_end) = self.bounds();
        let (b_start, b_end) = other.bounds();
        a_start < b_end && b_start < a_end
    }

    pub fn sort_key(&self) -> (NaiveDate, ClockTime) {
        (self.date, self.start_time)
    }
}

/// Accepte `YYYY-MM-DD` ou un horodatage ISO-8601/RFC 3339 complet (dont on
/// garde la partie date).
fn deserialize_day<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_day(raw: &str) -> Result<NaiveDate, ScheduleError> {
    let raw = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    // horodatage sans fuseau : `YYYY-MM-DDThh:mm...` ou `YYYY-MM-DD hh:mm...`
    let timestamp_prefix = match raw.as_bytes().get(10) {
        Some(b'T') | Some(b' ') => raw.get(..10),
        _ => None,
    };
    timestamp_prefix
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .ok_or_else(|| ScheduleError::MalformedDate(raw.to_string()))
}
