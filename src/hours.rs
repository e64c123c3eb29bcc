//! Décompte mensuel des heures : travaillées, cibles, supplémentaires et
//! restantes.

use crate::model::ShiftRecord;
use crate::schedule::same_month;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Synthèse d'un mois de référence. Recalculée à chaque appel, jamais mise
/// en cache.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub worked_hours: f64,
    pub target_hours: f64,
    pub overtime_hours: f64,
    pub remaining_hours: f64,
}

/// Nombre de jours du mois de `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    let next = first
        .checked_add_months(chrono::Months::new(1))
        .unwrap_or(first);
    u32::try_from(next.signed_duration_since(first).num_days()).unwrap_or(31)
}

/// Heures cibles du mois, fonction en escalier du nombre de jours.
pub fn target_hours_for(date: NaiveDate) -> f64 {
    match days_in_month(date) {
        28 => 160.0,
        29 => 165.0,
        30 => 171.0,
        _ => 177.0,
    }
}

pub fn summarize(records: &[ShiftRecord], reference: NaiveDate) -> MonthlySummary {
    let worked_hours: f64 = records
        .iter()
        .filter(|r| same_month(r.date, reference))
        .map(|r| r.total_hours)
        .sum();
    let target_hours = target_hours_for(reference);
    MonthlySummary {
        worked_hours,
        target_hours,
        overtime_hours: (worked_hours - target_hours).max(0.0),
        remaining_hours: (target_hours - worked_hours).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ClockTime;
    use crate::model::ShiftKind;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn shift(date: NaiveDate, hours: u32) -> ShiftRecord {
        ShiftRecord::new(
            date,
            ClockTime::parse("00:00").unwrap(),
            hours * 60,
            ShiftKind::Ordinary,
        )
        .unwrap()
    }

    #[test]
    fn target_steps() {
        assert_eq!(target_hours_for(day(2023, 2, 10)), 160.0);
        assert_eq!(target_hours_for(day(2024, 2, 10)), 165.0);
        assert_eq!(target_hours_for(day(2024, 4, 30)), 171.0);
        assert_eq!(target_hours_for(day(2024, 12, 31)), 177.0);
    }

    #[test]
    fn empty_month_is_all_remaining() {
        let s = summarize(&[], day(2024, 7, 4));
        assert_eq!(s.worked_hours, 0.0);
        assert_eq!(s.overtime_hours, 0.0);
        assert_eq!(s.remaining_hours, 177.0);
    }

    #[test]
    fn other_months_are_ignored() {
        let records = vec![
            shift(day(2024, 1, 31), 12),
            shift(day(2024, 2, 1), 12),
            shift(day(2025, 2, 1), 12),
        ];
        let s = summarize(&records, day(2024, 2, 15));
        assert_eq!(s.worked_hours, 12.0);
    }

    #[test]
    fn overtime_when_above_target() {
        let records: Vec<ShiftRecord> = (1..=15).map(|d| shift(day(2024, 4, d), 12)).collect();
        let s = summarize(&records, day(2024, 4, 1));
        assert_eq!(s.worked_hours, 180.0);
        assert_eq!(s.overtime_hours, 9.0);
        assert_eq!(s.remaining_hours, 0.0);
    }

    #[test]
    fn summary_json_is_camel_case() {
        let json = serde_json::to_value(summarize(&[], day(2024, 2, 1))).unwrap();
        assert_eq!(json["targetHours"], 165.0);
        assert_eq!(json["remainingHours"], 165.0);
    }
}
