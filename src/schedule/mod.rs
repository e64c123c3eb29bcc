mod conflicts;
mod generator;
mod mutate;
mod pattern;
mod types;
mod util;

pub use generator::{generate, split_at_midnight};
pub use pattern::{RotationPattern, ShiftSpec};
pub use types::{Conflict, ConflictKind, RegenerateOutcome, ScheduleError, ShiftUpdate};

pub(crate) use util::same_month;

use crate::clock::ClockTime;
use crate::hours::{self, MonthlySummary};
use crate::model::{ShiftId, ShiftKind, ShiftRecord};
use chrono::NaiveDate;

/// Schedule : ensemble de référence des créneaux, toujours trié par
/// `(date, heure de début)`.
#[derive(Debug, Default, Clone)]
pub struct Schedule {
    records: Vec<ShiftRecord>,
}

impl Schedule {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn from_records(mut records: Vec<ShiftRecord>) -> Self {
        records.sort_by_key(ShiftRecord::sort_key);
        Self { records }
    }

    pub fn records(&self) -> &[ShiftRecord] {
        &self.records
    }
    pub fn into_records(self) -> Vec<ShiftRecord> {
        self.records
    }

    pub fn find(&self, id: &ShiftId) -> Option<&ShiftRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Saisie manuelle ; une fin avant le début signifie le lendemain et
    /// produit deux enregistrements.
    pub fn add_manual(
        &mut self,
        date: NaiveDate,
        start: ClockTime,
        end: ClockTime,
        kind: ShiftKind,
    ) -> Result<Vec<ShiftId>, ScheduleError> {
        mutate::add_manual(self, date, start, end, kind)
    }

    /// Ajoute des enregistrements importés ; rien n'est ajouté en cas de
    /// chevauchement.
    pub fn insert_records(&mut self, records: Vec<ShiftRecord>) -> Result<(), ScheduleError> {
        mutate::insert_records(self, records)
    }

    pub fn update(&mut self, id: &ShiftId, changes: ShiftUpdate) -> Result<(), ScheduleError> {
        mutate::update(self, id, changes)
    }

    pub fn delete(&mut self, id: &ShiftId) -> Result<ShiftRecord, ScheduleError> {
        mutate::delete(self, id)
    }

    pub fn regenerate(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        pattern: RotationPattern,
        shift_start: ClockTime,
    ) -> RegenerateOutcome {
        mutate::regenerate(self, start, end, pattern, shift_start)
    }

    pub fn records_in_month(&self, reference: NaiveDate) -> Vec<&ShiftRecord> {
        self.records
            .iter()
            .filter(|r| same_month(r.date, reference))
            .collect()
    }

    pub fn summary(&self, reference: NaiveDate) -> MonthlySummary {
        hours::summarize(&self.records, reference)
    }

    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        conflicts::detect_conflicts(self)
    }
}
