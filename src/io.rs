use crate::clock::{self, ClockTime};
use crate::model::{self, ShiftKind, ShiftRecord};
use crate::schedule::{split_at_midnight, ShiftSpec};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de saisies manuelles depuis CSV: header `date,start_time,end_time[,type]`.
///
/// Une fin avant le début signifie le lendemain : la ligne produit alors deux
/// enregistrements.
pub fn import_records_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ShiftRecord>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = line + 2;
        let date = rec.get(0).context("missing date")?.trim();
        let start = rec.get(1).context("missing start_time")?.trim();
        let end = rec.get(2).context("missing end_time")?.trim();

        let date = model::parse_day(date).with_context(|| format!("row {row}: date"))?;
        let start = ClockTime::parse(start).with_context(|| format!("row {row}: start_time"))?;
        let end = ClockTime::parse(end).with_context(|| format!("row {row}: end_time"))?;
        if start == end {
            bail!("row {row}: start_time and end_time cannot be equal");
        }

        let kind = match rec.get(3).map(str::trim) {
            Some(raw) if !raw.is_empty() => raw
                .parse::<ShiftKind>()
                .with_context(|| format!("row {row}: type"))?,
            _ => ShiftKind::default(),
        };

        let spec = ShiftSpec {
            start,
            duration_minutes: clock::span_minutes(start, end),
        };
        out.extend(split_at_midnight(date, spec, kind));
    }
    Ok(out)
}

/// Export JSON des créneaux (jolie mise en forme)
pub fn export_records_json<P: AsRef<Path>>(path: P, records: &[ShiftRecord]) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(records)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV: header `id,date,start_time,end_time,total_hours,type`
pub fn export_records_csv<P: AsRef<Path>>(path: P, records: &[ShiftRecord]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["id", "date", "start_time", "end_time", "total_hours", "type"])?;
    for r in records {
        let date = r.date.format("%Y-%m-%d").to_string();
        let start = r.start_time.to_string();
        let end = r.end_time.to_string();
        let hours = r.total_hours.to_string();
        w.write_record([
            r.id.as_str(),
            date.as_str(),
            start.as_str(),
            end.as_str(),
            hours.as_str(),
            r.kind.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
