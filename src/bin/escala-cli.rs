#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use escala::{
    io,
    model::{self, ShiftId, ShiftKind},
    report::{prepare_month_report, TextReport},
    schedule::{ConflictKind, RotationPattern, Schedule, ShiftUpdate},
    storage::{JsonStorage, Storage},
    ClockTime, DEFAULT_SHIFT_START,
};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI d'escala de travail (stockage JSON local)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de l'escala
    #[arg(long, global = true, env = "ESCALA_STORE", default_value = "work-schedule.json")]
    store: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer une rotation sur une période (remplace la période)
    Generate {
        /// YYYY-MM-DD (inclus)
        #[arg(long)]
        from: String,
        /// YYYY-MM-DD (inclus)
        #[arg(long)]
        to: String,
        /// 12-on/36-off, 12-on/24-off-then-12-on/48-off, 6-on/24-off, 12-on/48-off
        #[arg(long, default_value = "12-on/36-off")]
        pattern: String,
        /// HH:MM
        #[arg(long, default_value = DEFAULT_SHIFT_START)]
        start_time: String,
    },

    /// Ajouter un créneau manuel
    Add {
        #[arg(long)]
        date: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        /// ordinary, extra, compensatory, other
        #[arg(long = "type", default_value = "ordinary")]
        kind: String,
    },

    /// Modifier un créneau existant
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Supprimer un créneau
    Delete {
        #[arg(long)]
        id: String,
    },

    /// Importer des créneaux manuels depuis un CSV
    Import {
        #[arg(long)]
        csv: String,
    },

    /// Lister et optionnellement exporter
    List {
        /// YYYY-MM ou YYYY-MM-DD ; tous les créneaux si absent
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Décompte d'heures du mois
    Summary {
        /// YYYY-MM ou YYYY-MM-DD ; mois courant si absent
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Rapport texte du mois
    Report {
        #[arg(long)]
        month: Option<String>,
        /// Fichier de sortie (sinon stdout)
        #[arg(long)]
        out: Option<String>,
    },

    /// Vérifier les chevauchements et heures incohérentes
    Check,
}

fn parse_month(raw: Option<&str>) -> Result<NaiveDate> {
    let Some(raw) = raw else {
        return Ok(Local::now().date_naive());
    };
    let raw = raw.trim();
    if raw.len() == 7 {
        return NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
            .with_context(|| format!("invalid month: {raw}"));
    }
    Ok(model::parse_day(raw)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.store)?;
    let mut schedule = Schedule::from_records(storage.load()?);

    let code = match cli.cmd {
        Commands::Generate {
            from,
            to,
            pattern,
            start_time,
        } => {
            let pattern: RotationPattern = pattern.parse()?;
            let start_time = ClockTime::parse(&start_time)?;
            let from = model::parse_day(&from)?;
            let to = model::parse_day(&to)?;
            let outcome = schedule.regenerate(from, to, pattern, start_time);
            storage.save(schedule.records())?;
            println!(
                "{}: {} record(s) generated, {} replaced, {} displaced",
                pattern,
                outcome.inserted.len(),
                outcome.removed,
                outcome.displaced.len()
            );
            0
        }
        Commands::Add {
            date,
            start,
            end,
            kind,
        } => {
            let ids = schedule.add_manual(
                model::parse_day(&date)?,
                ClockTime::parse(&start)?,
                ClockTime::parse(&end)?,
                kind.parse::<ShiftKind>()?,
            )?;
            storage.save(schedule.records())?;
            for id in ids {
                println!("{}", id.as_str());
            }
            0
        }
        Commands::Update {
            id,
            date,
            start,
            end,
            kind,
        } => {
            let changes = ShiftUpdate {
                date: date.as_deref().map(model::parse_day).transpose()?,
                start_time: start.as_deref().map(ClockTime::parse).transpose()?,
                end_time: end.as_deref().map(ClockTime::parse).transpose()?,
                kind: kind.as_deref().map(str::parse::<ShiftKind>).transpose()?,
            };
            schedule.update(&ShiftId::new(id), changes)?;
            storage.save(schedule.records())?;
            0
        }
        Commands::Delete { id } => {
            schedule.delete(&ShiftId::new(id))?;
            storage.save(schedule.records())?;
            0
        }
        Commands::Import { csv } => {
            let records = io::import_records_csv(&csv)?;
            let added = records.len();
            schedule.insert_records(records)?;
            storage.save(schedule.records())?;
            println!("{added} record(s) imported from {csv}");
            0
        }
        Commands::List {
            month,
            out_json,
            out_csv,
        } => {
            let records: Vec<_> = match month.as_deref() {
                Some(raw) => {
                    let reference = parse_month(Some(raw))?;
                    schedule
                        .records_in_month(reference)
                        .into_iter()
                        .cloned()
                        .collect()
                }
                None => schedule.records().to_vec(),
            };
            if let Some(path) = out_json {
                io::export_records_json(path, &records)?;
            }
            if let Some(path) = out_csv {
                io::export_records_csv(path, &records)?;
            }
            // impression compacte
            for r in &records {
                println!(
                    "{} | {} {} → {} | {}h | {}",
                    r.id.as_str(),
                    r.date,
                    r.start_time,
                    r.end_time,
                    r.total_hours,
                    r.kind.as_str()
                );
            }
            0
        }
        Commands::Summary { month, json } => {
            let reference = parse_month(month.as_deref())?;
            let summary = schedule.summary(reference);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "{}: worked {:.1}h / target {:.1}h | overtime {:.1}h | remaining {:.1}h",
                    reference.format("%Y-%m"),
                    summary.worked_hours,
                    summary.target_hours,
                    summary.overtime_hours,
                    summary.remaining_hours
                );
            }
            0
        }
        Commands::Report { month, out } => {
            let reference = parse_month(month.as_deref())?;
            let report = prepare_month_report(&schedule, reference, &TextReport);
            match out {
                Some(path) => std::fs::write(&path, &report.content)
                    .with_context(|| format!("writing {path}"))?,
                None => print!("{}", report.content),
            }
            0
        }
        Commands::Check => {
            let conflicts = schedule.detect_conflicts();
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                for c in &conflicts {
                    eprintln!(
                        "{} {} {} {}",
                        c.date,
                        match c.kind {
                            ConflictKind::Overlap => "overlap",
                            ConflictKind::InvalidHours => "hours",
                        },
                        c.shift_a.as_str(),
                        c.shift_b.as_ref().map(ShiftId::as_str).unwrap_or("-")
                    );
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}
