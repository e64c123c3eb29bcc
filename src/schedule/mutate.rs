use super::generator::{self, split_at_midnight};
use super::pattern::{RotationPattern, ShiftSpec};
use super::{util, RegenerateOutcome, ScheduleError, Schedule, ShiftUpdate};
use crate::clock::{self, ClockTime};
use crate::model::{ShiftId, ShiftKind, ShiftRecord};
use chrono::NaiveDate;
use tracing::{debug, warn};

pub(super) fn add_manual(
    schedule: &mut Schedule,
    date: NaiveDate,
    start: ClockTime,
    end: ClockTime,
    kind: ShiftKind,
) -> Result<Vec<ShiftId>, ScheduleError> {
    if start == end {
        return Err(ScheduleError::InvalidTimeRange);
    }
    let spec = ShiftSpec {
        start,
        duration_minutes: clock::span_minutes(start, end),
    };
    let parts = split_at_midnight(date, spec, kind);

    for part in &parts {
        if let Some(existing) = util::first_overlap(&schedule.records, part, None) {
            return Err(ScheduleError::Overlap {
                date: part.date,
                existing: existing.id.as_str().to_string(),
            });
        }
    }

    let ids = parts.iter().map(|p| p.id.clone()).collect();
    let mut next = schedule.records.clone();
    next.extend(parts);
    next.sort_by_key(ShiftRecord::sort_key);
    schedule.records = next;
    Ok(ids)
}

/// Insère des enregistrements déjà découpés, tout ou rien.
pub(super) fn insert_records(
    schedule: &mut Schedule,
    incoming: Vec<ShiftRecord>,
) -> Result<(), ScheduleError> {
    let mut next = schedule.records.clone();
    for rec in incoming {
        if rec.duration_minutes() == 0 {
            return Err(ScheduleError::InvalidTimeRange);
        }
        if let Some(existing) = util::first_overlap(&next, &rec, None) {
            return Err(ScheduleError::Overlap {
                date: rec.date,
                existing: existing.id.as_str().to_string(),
            });
        }
        next.push(rec);
    }
    next.sort_by_key(ShiftRecord::sort_key);
    schedule.records = next;
    Ok(())
}

pub(super) fn update(
    schedule: &mut Schedule,
    shift_id: &ShiftId,
    changes: ShiftUpdate,
) -> Result<(), ScheduleError> {
    let Some(pos) = util::find_shift_index(&schedule.records, shift_id) else {
        return Err(ScheduleError::UnknownShift(shift_id.as_str().to_string()));
    };

    let current = &schedule.records[pos];
    let start = changes.start_time.unwrap_or(current.start_time);
    let end = changes.end_time.unwrap_or(current.end_time);
    if end.end_offset() <= start.minutes_from_midnight() {
        return Err(ScheduleError::InvalidTimeRange);
    }

    let candidate = ShiftRecord {
        id: current.id.clone(),
        date: changes.date.unwrap_or(current.date),
        start_time: start,
        end_time: end,
        total_hours: clock::minutes_to_hours(end.end_offset() - start.minutes_from_midnight()),
        kind: changes.kind.unwrap_or(current.kind),
    };

    if let Some(existing) = util::first_overlap(&schedule.records, &candidate, Some(shift_id)) {
        return Err(ScheduleError::Overlap {
            date: candidate.date,
            existing: existing.id.as_str().to_string(),
        });
    }

    schedule.records[pos] = candidate;
    schedule.records.sort_by_key(ShiftRecord::sort_key);
    Ok(())
}

pub(super) fn delete(
    schedule: &mut Schedule,
    shift_id: &ShiftId,
) -> Result<ShiftRecord, ScheduleError> {
    let Some(pos) = util::find_shift_index(&schedule.records, shift_id) else {
        return Err(ScheduleError::UnknownShift(shift_id.as_str().to_string()));
    };
    Ok(schedule.records.remove(pos))
}

/// Remplace tout ce qui est daté dans `[start, end]` par la génération.
/// Les enregistrements hors période chevauchés par un débordement après
/// minuit sont écartés.
pub(super) fn regenerate(
    schedule: &mut Schedule,
    start: NaiveDate,
    end: NaiveDate,
    pattern: RotationPattern,
    shift_start: ClockTime,
) -> RegenerateOutcome {
    let generated = generator::generate(start, end, pattern, shift_start);

    let (in_range, outside): (Vec<ShiftRecord>, Vec<ShiftRecord>) = schedule
        .records
        .iter()
        .cloned()
        .partition(|r| util::in_range(r.date, start, end));

    // la suite après minuit d'un créneau du dernier jour fait partie de la
    // période remplacée
    let spill_day = end.succ_opt();
    let (own_spill, outside): (Vec<ShiftRecord>, Vec<ShiftRecord>) =
        outside.into_iter().partition(|r| {
            Some(r.date) == spill_day
                && r.start_time == ClockTime::MIDNIGHT
                && in_range
                    .iter()
                    .any(|p| p.date == end && p.end_time == ClockTime::MIDNIGHT)
        });
    let removed = in_range.len() + own_spill.len();

    let (displaced, kept): (Vec<ShiftRecord>, Vec<ShiftRecord>) = outside
        .into_iter()
        .partition(|r| generated.iter().any(|g| g.overlaps(r)));

    for rec in &displaced {
        warn!(
            id = rec.id.as_str(),
            date = %rec.date,
            "existing shift displaced by overnight spill"
        );
    }

    let mut next = kept;
    next.extend(generated.iter().cloned());
    next.sort_by_key(ShiftRecord::sort_key);
    schedule.records = next;

    debug!(
        removed,
        inserted = generated.len(),
        displaced = displaced.len(),
        "schedule range regenerated"
    );

    RegenerateOutcome {
        inserted: generated,
        removed,
        displaced,
    }
}
