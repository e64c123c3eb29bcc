//! Heures murales `HH:MM` et arithmétique en minutes autour de minuit.

use crate::schedule::ScheduleError;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// Heure murale (24h, précision minute), locale au jour du créneau.
///
/// En fin de créneau, `00:00` signifie la fin de journée (24:00) : voir
/// [`ClockTime::end_offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(NaiveTime::MIN);

    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, ScheduleError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| ScheduleError::MalformedTime(format!("{hour:02}:{minute:02}")))
    }

    /// Parse strict `HH:MM` : deux chiffres, deux-points, deux chiffres.
    pub fn parse(raw: &str) -> Result<Self, ScheduleError> {
        let bytes = raw.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 2 || b.is_ascii_digit());
        if !well_formed {
            return Err(ScheduleError::MalformedTime(raw.to_string()));
        }
        NaiveTime::parse_from_str(raw, "%H:%M")
            .map(Self)
            .map_err(|_| ScheduleError::MalformedTime(raw.to_string()))
    }

    /// Construit depuis un nombre de minutes, ramené modulo 24h.
    pub fn from_minutes(minutes: u32) -> Self {
        let m = minutes % MINUTES_PER_DAY;
        NaiveTime::from_hms_opt(m / MINUTES_PER_HOUR, m % MINUTES_PER_HOUR, 0)
            .map(Self)
            .unwrap_or(Self::MIDNIGHT)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn minutes_from_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight() / 60
    }

    /// Position en minutes quand l'heure termine un créneau (`00:00` → 1440).
    pub fn end_offset(&self) -> u32 {
        match self.minutes_from_midnight() {
            0 => MINUTES_PER_DAY,
            m => m,
        }
    }

    pub fn add_minutes(self, minutes: u32) -> Self {
        Self::from_minutes(self.minutes_from_midnight() + minutes % MINUTES_PER_DAY)
    }

    pub fn add_hours(self, hours: u32) -> Self {
        self.add_minutes((hours % 24) * MINUTES_PER_HOUR)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Durée en minutes de `start` à `end` ; une fin avant (ou égale au) début
/// signifie le lendemain.
pub fn span_minutes(start: ClockTime, end: ClockTime) -> u32 {
    let from = start.minutes_from_midnight();
    let to = end.end_offset();
    if to > from {
        to - from
    } else {
        to + MINUTES_PER_DAY - from
    }
}

pub fn minutes_to_hours(minutes: u32) -> f64 {
    f64::from(minutes) / f64::from(MINUTES_PER_HOUR)
}
