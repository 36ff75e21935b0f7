use std::path::PathBuf;

use clap::Parser;
use log::info;

use refuel_mission_planner::config::load_scenario;
use refuel_mission_planner::export;
use refuel_mission_planner::mission::result::{LegKind, MissionResult};
use refuel_mission_planner::mission::scenario::MissionScenario;
use refuel_mission_planner::optimizer;

#[derive(Parser)]
#[command(author, version, about = "Orbital refueling mission planner")]
struct Cli {
    /// Scenario manifest (.yaml/.yml or .toml)
    scenario: PathBuf,

    /// Write the winning trajectory as CSV (use `-` for stdout)
    #[arg(long)]
    trajectory_csv: Option<PathBuf>,

    /// Write the full optimization report as JSON (use `-` for stdout)
    #[arg(long)]
    report_json: Option<PathBuf>,

    /// Print the event log of the winning mission
    #[arg(long, default_value_t = false)]
    events: bool,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = load_scenario(&cli.scenario)?;
    let scenario = MissionScenario::from_config(&config)?;
    info!(
        "loaded scenario: {} launch sites, {} satellites",
        scenario.launch_sites.len(),
        scenario.total_satellites()
    );

    let report = optimizer::optimize(&scenario)?;
    print_summary(report.best_site, &report.best_result);

    if cli.events {
        println!();
        println!("=== Event Log ===");
        for event in &report.best_result.events {
            match event.subject {
                Some(id) => println!("t={:>12.1}s  sat {:>3}  {}", event.time_s, id, event.description),
                None => println!("t={:>12.1}s           {}", event.time_s, event.description),
            }
        }
    }

    if let Some(path) = &cli.trajectory_csv {
        export::write_trajectory_csv(path, &report.best_result)?;
        info!("trajectory written to {}", path.display());
    }
    if let Some(path) = &cli.report_json {
        export::write_report_json(path, &report)?;
        info!("report written to {}", path.display());
    }

    Ok(())
}

fn print_summary(best_site: usize, result: &MissionResult) {
    println!("=== Mission Summary ===");
    println!("Best launch site : {}", best_site);
    println!(
        "Outcome          : {} ({}/{} satellites serviced)",
        if result.success { "success" } else { "partial" },
        result.satellites_serviced,
        result.satellites_total
    );
    println!("Total delta-v    : {:.1} m/s", result.total_delta_v_m_s);
    println!("Fuel consumed    : {:.1} kg", result.total_fuel_consumed_kg);
    println!("Fuel remaining   : {:.1} kg", result.final_fuel_kg);
    let (d, h, m) = format_duration(result.duration_s);
    println!(
        "Duration         : {:.0} s ({}d {}h {}m)",
        result.duration_s, d, h, m
    );
    println!("Legs:");
    for leg in &result.legs {
        println!(
            "  {:<14} {:>12.0} m -> {:>12.0} m  dv {:>8.1} m/s  fuel {:>7.1} kg  {}",
            leg_name(leg.kind),
            leg.from_radius_m,
            leg.to_radius_m,
            leg.dv_achieved_m_s,
            leg.fuel_consumed_kg,
            if leg.completed { "ok" } else { "ABORTED" }
        );
    }
}

fn leg_name(kind: LegKind) -> &'static str {
    match kind {
        LegKind::Launch => "launch",
        LegKind::Transfer => "transfer",
        LegKind::Return => "return",
        LegKind::ShuttleSortie => "shuttle sortie",
    }
}

fn format_duration(seconds: f64) -> (i64, i64, i64) {
    let total_seconds = seconds.max(0.0);
    let days = (total_seconds / 86_400.0).floor() as i64;
    let remaining = total_seconds - (days as f64 * 86_400.0);
    let hours = (remaining / 3_600.0).floor() as i64;
    let minutes = ((remaining - hours as f64 * 3_600.0) / 60.0).floor() as i64;
    (days, hours, minutes)
}
