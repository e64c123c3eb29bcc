use crate::hours::MonthlySummary;
use crate::model::ShiftRecord;
use crate::schedule::Schedule;
use chrono::NaiveDate;

/// Rapport mensuel prêt à être affiché ou écrit sur disque.
#[derive(Debug, Clone)]
pub struct MonthReport {
    pub month: NaiveDate,
    pub summary: MonthlySummary,
    pub content: String,
}

/// Permet de customiser le rendu du rapport (texte, HTML, etc.).
pub trait ReportRenderer {
    fn render(&self, month: NaiveDate, records: &[ShiftRecord], summary: &MonthlySummary) -> String;
}

/// Rendu texte : une ligne par créneau puis le décompte.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReport;

impl ReportRenderer for TextReport {
    fn render(&self, month: NaiveDate, records: &[ShiftRecord], summary: &MonthlySummary) -> String {
        let mut out = format!("Escala {}\n\n", month.format("%Y-%m"));
        if records.is_empty() {
            out.push_str("(aucun créneau)\n");
        }
        for r in records {
            out.push_str(&format!(
                "{} {}-{} {:>5.1}h {}\n",
                r.date.format("%a %d"),
                r.start_time,
                r.end_time,
                r.total_hours,
                r.kind.as_str()
            ));
        }
        out.push_str(&format!(
            "\nHeures travaillées : {:.1}\nHeures cibles      : {:.1}\nHeures sup.        : {:.1}\nHeures restantes   : {:.1}\n",
            summary.worked_hours, summary.target_hours, summary.overtime_hours, summary.remaining_hours
        ));
        out
    }
}

/// Prépare le rapport du mois contenant `reference`.
pub fn prepare_month_report(
    schedule: &Schedule,
    reference: NaiveDate,
    renderer: &dyn ReportRenderer,
) -> MonthReport {
    let records: Vec<ShiftRecord> = schedule
        .records_in_month(reference)
        .into_iter()
        .cloned()
        .collect();
    let summary = schedule.summary(reference);
    let content = renderer.render(reference, &records, &summary);
    MonthReport {
        month: reference,
        summary,
        content,
    }
}
