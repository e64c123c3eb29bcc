use crate::clock::ClockTime;
use crate::model::{ShiftId, ShiftKind, ShiftRecord};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    Overlap,      // deux créneaux du même jour se chevauchent
    InvalidHours, // total_hours hors de ]0, 24] ou incohérent avec les heures
}

#[derive(Debug, Clone)]
pub struct Conflict {
    pub date: NaiveDate,
    pub shift_a: ShiftId,
    pub shift_b: Option<ShiftId>,
    pub kind: ConflictKind,
}

/// Modification partielle d'un créneau existant.
#[derive(Debug, Clone, Default)]
pub struct ShiftUpdate {
    pub date: Option<NaiveDate>,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
    pub kind: Option<ShiftKind>,
}

/// Résultat d'une régénération de période.
#[derive(Debug, Clone, Default)]
pub struct RegenerateOutcome {
    pub inserted: Vec<ShiftRecord>,
    pub removed: usize,
    pub displaced: Vec<ShiftRecord>,
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("invalid rotation pattern: {0}")]
    InvalidPattern(String),
    #[error("malformed time (expected HH:MM): {0}")]
    MalformedTime(String),
    #[error("malformed date (expected YYYY-MM-DD): {0}")]
    MalformedDate(String),
    #[error("unknown shift type: {0}")]
    InvalidKind(String),
    #[error("invalid time range: end must differ from start and stay within the day")]
    InvalidTimeRange,
    #[error("unknown shift: {0}")]
    UnknownShift(String),
    #[error("shift on {date} overlaps existing shift {existing}")]
    Overlap { date: NaiveDate, existing: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
