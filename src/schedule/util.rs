use crate::model::{ShiftId, ShiftRecord};
use chrono::{Datelike, NaiveDate};

pub(super) fn find_shift_index(records: &[ShiftRecord], shift_id: &ShiftId) -> Option<usize> {
    records.iter().position(|r| &r.id == shift_id)
}

/// Premier créneau existant qui chevauche `candidate` (hors `exclude`).
pub(super) fn first_overlap<'a>(
    records: &'a [ShiftRecord],
    candidate: &ShiftRecord,
    exclude: Option<&ShiftId>,
) -> Option<&'a ShiftRecord> {
    records
        .iter()
        .filter(|r| Some(&r.id) != exclude)
        .find(|r| r.overlaps(candidate))
}

pub(crate) fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

pub(super) fn in_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= date && date <= end
}
