#![forbid(unsafe_code)]
//! Escala — génération d'escalas de travail et décompte d'heures mensuel.
//!
//! - Motifs de rotation 12x36, 12x24/12x48, 6x24, 12x48.
//! - Découpage à minuit : un enregistrement par jour calendaire.
//! - Heures travaillées / cibles / supplémentaires / restantes par mois.
//! - Stockage fichier JSON atomique ; la génération reste pure.

pub mod clock;
pub mod hours;
pub mod io;
pub mod model;
pub mod report;
pub mod schedule;
pub mod storage;

pub use clock::ClockTime;
pub use hours::{summarize, target_hours_for, MonthlySummary};
pub use model::{ShiftId, ShiftKind, ShiftRecord};
pub use report::{prepare_month_report, MonthReport, ReportRenderer, TextReport};
pub use schedule::{
    generate, Conflict, ConflictKind, RegenerateOutcome, RotationPattern, Schedule, ScheduleError,
    ShiftSpec, ShiftUpdate,
};
pub use storage::{JsonStorage, MemoryStorage, Storage, STORAGE_KEY};

/// Heure de prise de service par défaut.
pub const DEFAULT_SHIFT_START: &str = "07:00";
