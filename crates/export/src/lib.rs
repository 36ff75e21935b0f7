//! Export helpers for mission artifacts.
//!
//! Renderers and external tooling consume these files; nothing in here
//! mutates mission state. Trajectories go out as CSV, the optimization
//! report as pretty-printed JSON.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use refuel_mission::result::{LegKind, MissionResult};
use refuel_mission::state::TrajectorySample;
use refuel_optimizer::OptimizationReport;

/// Errors raised while writing artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// One trajectory CSV row. `craft` is `vehicle` or `shuttle_<n>`.
#[derive(Debug, Clone, Serialize)]
struct TrajectoryRow<'a> {
    craft: &'a str,
    time_s: f64,
    x_m: f64,
    y_m: f64,
}

fn write_samples<W: Write>(
    writer: &mut csv::Writer<W>,
    craft: &str,
    samples: &[TrajectorySample],
) -> Result<(), ExportError> {
    for sample in samples {
        writer.serialize(TrajectoryRow {
            craft,
            time_s: sample.time_s,
            x_m: sample.x_m,
            y_m: sample.y_m,
        })?;
    }
    Ok(())
}

/// Write the vehicle and shuttle trajectories as a single CSV table.
pub fn write_trajectory_csv(path: &Path, result: &MissionResult) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer_for_path(path)?);
    write_samples(&mut writer, "vehicle", &result.trajectory)?;
    for (n, samples) in result.shuttle_trajectories.iter().enumerate() {
        write_samples(&mut writer, &format!("shuttle_{n}"), samples)?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct LegRecord {
    kind: &'static str,
    from_radius_m: f64,
    to_radius_m: f64,
    dv_requested_m_s: f64,
    dv_achieved_m_s: f64,
    fuel_consumed_kg: f64,
    duration_s: f64,
    completed: bool,
}

#[derive(Serialize)]
struct EventRecord<'a> {
    time_s: f64,
    subject: Option<usize>,
    description: &'a str,
}

#[derive(Serialize)]
struct MissionRecord<'a> {
    success: bool,
    satellites_serviced: usize,
    satellites_total: usize,
    total_delta_v_m_s: f64,
    total_fuel_consumed_kg: f64,
    final_fuel_kg: f64,
    duration_s: f64,
    legs: Vec<LegRecord>,
    events: Vec<EventRecord<'a>>,
}

#[derive(Serialize)]
struct CandidateRecord {
    site_index: usize,
    score: f64,
    success: Option<bool>,
    error: Option<String>,
}

#[derive(Serialize)]
struct ReportRecord<'a> {
    best_site: usize,
    best_score: f64,
    mission: MissionRecord<'a>,
    candidates: Vec<CandidateRecord>,
}

fn leg_kind_name(kind: LegKind) -> &'static str {
    match kind {
        LegKind::Launch => "launch",
        LegKind::Transfer => "transfer",
        LegKind::Return => "return",
        LegKind::ShuttleSortie => "shuttle_sortie",
    }
}

fn mission_record(result: &MissionResult) -> MissionRecord<'_> {
    MissionRecord {
        success: result.success,
        satellites_serviced: result.satellites_serviced,
        satellites_total: result.satellites_total,
        total_delta_v_m_s: result.total_delta_v_m_s,
        total_fuel_consumed_kg: result.total_fuel_consumed_kg,
        final_fuel_kg: result.final_fuel_kg,
        duration_s: result.duration_s,
        legs: result
            .legs
            .iter()
            .map(|leg| LegRecord {
                kind: leg_kind_name(leg.kind),
                from_radius_m: leg.from_radius_m,
                to_radius_m: leg.to_radius_m,
                dv_requested_m_s: leg.dv_requested_m_s,
                dv_achieved_m_s: leg.dv_achieved_m_s,
                fuel_consumed_kg: leg.fuel_consumed_kg,
                duration_s: leg.duration_s,
                completed: leg.completed,
            })
            .collect(),
        events: result
            .events
            .iter()
            .map(|event| EventRecord {
                time_s: event.time_s,
                subject: event.subject,
                description: &event.description,
            })
            .collect(),
    }
}

/// Write the full optimization report, winning mission included, as JSON.
pub fn write_report_json(path: &Path, report: &OptimizationReport) -> Result<(), ExportError> {
    let record = ReportRecord {
        best_site: report.best_site,
        best_score: report.best_score,
        mission: mission_record(&report.best_result),
        candidates: report
            .candidates
            .iter()
            .map(|c| CandidateRecord {
                site_index: c.site_index,
                score: c.score,
                success: c.result.as_ref().map(|r| r.success),
                error: c.error.clone(),
            })
            .collect(),
    };
    let mut writer = writer_for_path(path)?;
    serde_json::to_writer_pretty(&mut writer, &record)?;
    writeln!(writer)?;
    Ok(())
}
