use super::{Conflict, ConflictKind, Schedule};
use crate::clock::MINUTES_PER_HOUR;
use crate::model::ShiftRecord;

pub(super) fn detect_conflicts(schedule: &Schedule) -> Vec<Conflict> {
    let mut out = Vec::new();

    let mut records: Vec<&ShiftRecord> = schedule.records.iter().collect();
    records.sort_by_key(|r| r.sort_key());

    for (idx, a) in records.iter().enumerate() {
        if !hours_consistent(a) {
            out.push(Conflict {
                date: a.date,
                shift_a: a.id.clone(),
                shift_b: None,
                kind: ConflictKind::InvalidHours,
            });
        }

        for b in records.iter().skip(idx + 1).take_while(|b| b.date == a.date) {
            if a.overlaps(b) {
                out.push(Conflict {
                    date: a.date,
                    shift_a: a.id.clone(),
                    shift_b: Some(b.id.clone()),
                    kind: ConflictKind::Overlap,
                });
            }
        }
    }

    out
}

fn hours_consistent(record: &ShiftRecord) -> bool {
    let (start, end) = record.bounds();
    let expected = f64::from(end.saturating_sub(start)) / f64::from(MINUTES_PER_HOUR);
    record.total_hours > 0.0
        && record.total_hours <= 24.0
        && end > start
        && (record.total_hours - expected).abs() < 1e-6
}
