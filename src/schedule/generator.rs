use super::pattern::{RotationPattern, ShiftSpec};
use crate::clock::{self, ClockTime, MINUTES_PER_DAY};
use crate::model::{ShiftId, ShiftKind, ShiftRecord};
use chrono::NaiveDate;
use tracing::debug;

/// Déroule `pattern` jour par jour sur `[start, end]` (bornes incluses).
///
/// Chaque créneau qui franchit minuit est découpé en deux enregistrements
/// contigus ; celui du dernier jour peut donc déborder sur `end + 1`.
/// Une période inversée donne un résultat vide.
pub fn generate(
    start: NaiveDate,
    end: NaiveDate,
    pattern: RotationPattern,
    shift_start: ClockTime,
) -> Vec<ShiftRecord> {
    let mut out = Vec::new();
    if end < start {
        return out;
    }

    for (day_index, date) in (0u32..).zip(start.iter_days().take_while(|d| *d <= end)) {
        if let Some(spec) = pattern.shift_for_day(day_index, shift_start) {
            out.extend(split_at_midnight(date, spec, ShiftKind::Ordinary));
        }
    }

    out.sort_by_key(ShiftRecord::sort_key);
    debug!(
        pattern = %pattern,
        from = %start,
        to = %end,
        records = out.len(),
        "generated rotation"
    );
    out
}

/// Découpe un créneau en un ou deux enregistrements, un par jour calendaire.
pub fn split_at_midnight(date: NaiveDate, spec: ShiftSpec, kind: ShiftKind) -> Vec<ShiftRecord> {
    let from = spec.start.minutes_from_midnight();
    let end = from + spec.duration_minutes;

    if end < MINUTES_PER_DAY {
        return vec![segment(date, spec.start, spec.duration_minutes, kind)];
    }

    let before_midnight = MINUTES_PER_DAY - from;
    let mut out = vec![segment(date, spec.start, before_midnight, kind)];
    let rest = spec.duration_minutes - before_midnight;
    if rest > 0 {
        if let Some(next) = date.succ_opt() {
            out.push(segment(next, ClockTime::MIDNIGHT, rest, kind));
        }
    }
    out
}

fn segment(date: NaiveDate, start: ClockTime, minutes: u32, kind: ShiftKind) -> ShiftRecord {
    ShiftRecord {
        id: ShiftId::random(),
        date,
        start_time: start,
        end_time: start.add_minutes(minutes),
        total_hours: clock::minutes_to_hours(minutes),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(raw: &str) -> ClockTime {
        ClockTime::parse(raw).unwrap()
    }

    #[test]
    fn twelve_hours_from_eight_pm_splits() {
        let spec = ShiftSpec {
            start: at("20:00"),
            duration_minutes: 12 * 60,
        };
        let parts = split_at_midnight(day(2024, 3, 10), spec, ShiftKind::Ordinary);
        assert_eq!(parts.len(), 2);

        assert_eq!(parts[0].date, day(2024, 3, 10));
        assert_eq!(parts[0].start_time.to_string(), "20:00");
        assert_eq!(parts[0].end_time.to_string(), "00:00");
        assert_eq!(parts[0].total_hours, 4.0);

        assert_eq!(parts[1].date, day(2024, 3, 11));
        assert_eq!(parts[1].start_time.to_string(), "00:00");
        assert_eq!(parts[1].end_time.to_string(), "08:00");
        assert_eq!(parts[1].total_hours, 8.0);
    }

    #[test]
    fn ending_exactly_at_midnight_is_one_record() {
        let spec = ShiftSpec {
            start: at("12:00"),
            duration_minutes: 12 * 60,
        };
        let parts = split_at_midnight(day(2024, 3, 10), spec, ShiftKind::Ordinary);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].end_time, ClockTime::MIDNIGHT);
        assert_eq!(parts[0].total_hours, 12.0);
    }

    #[test]
    fn split_keeps_minutes() {
        let spec = ShiftSpec {
            start: at("19:30"),
            duration_minutes: 12 * 60,
        };
        let parts = split_at_midnight(day(2024, 3, 10), spec, ShiftKind::Extra);
        assert_eq!(parts[0].total_hours, 4.5);
        assert_eq!(parts[1].end_time.to_string(), "07:30");
        assert_eq!(parts[1].total_hours, 7.5);
        assert!(parts.iter().all(|p| p.kind == ShiftKind::Extra));
    }

    #[test]
    fn inverted_range_is_empty() {
        let out = generate(
            day(2024, 1, 5),
            day(2024, 1, 4),
            RotationPattern::SixTwentyFour,
            at("07:00"),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn single_day_range() {
        let out = generate(
            day(2024, 1, 5),
            day(2024, 1, 5),
            RotationPattern::TwelveThirtySix,
            at("07:00"),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, ShiftKind::Ordinary);
    }

    #[test]
    fn daily_shift_spilling_is_ordered() {
        let out = generate(
            day(2024, 1, 1),
            day(2024, 1, 2),
            RotationPattern::SixTwentyFour,
            at("20:00"),
        );
        let summary: Vec<(NaiveDate, String, String)> = out
            .iter()
            .map(|r| (r.date, r.start_time.to_string(), r.end_time.to_string()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (day(2024, 1, 1), "20:00".into(), "00:00".into()),
                (day(2024, 1, 2), "00:00".into(), "02:00".into()),
                (day(2024, 1, 2), "20:00".into(), "00:00".into()),
                (day(2024, 1, 3), "00:00".into(), "02:00".into()),
            ]
        );
    }
}
