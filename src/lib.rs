// src/lib.rs

pub mod cli;
pub mod config;
pub mod controller;
pub mod errors;
pub mod input;
pub mod logging;
pub mod render;
pub mod report;
pub mod sim;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::{CliArgs, Command, ConfigureArgs, DashboardArgs, ReportArgs};
use crate::config::{capture, default_state_path, load_or_demo, FileStore, SessionConfig};
use crate::controller::{
    ControlEvent, ControllerCore, ControllerOptions, Frame, Runtime, SnapshotSink, ViewUpdate,
};
use crate::render::{Layout, LogEntry, TerminalRenderer};
use crate::report::Report;
use crate::sim::{Scenario, Session, SessionParams};

/// High-level entry point used by `main.rs`.
pub async fn run(args: CliArgs) -> Result<()> {
    let state_path = args.state.clone().unwrap_or_else(default_state_path);
    debug!(state = %state_path.display(), "using handoff store");

    match args.command {
        Command::Configure(cfg) => run_configure(&state_path, &cfg),
        Command::Dashboard(dash) => run_dashboard(&state_path, &dash).await,
        Command::Report(rep) => run_report(&state_path, &rep),
    }
}

fn run_configure(state_path: &Path, args: &ConfigureArgs) -> Result<()> {
    let mut store = FileStore::new(state_path);
    capture(&args.to_form(), &mut store).context("configuration was not saved")?;

    let saved = SessionConfig::load(&store)?;
    println!("configuration saved to {}", state_path.display());
    print_session_config(&saved);
    Ok(())
}

/// Seed from the flag, or a fresh random one.
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

async fn run_dashboard(state_path: &Path, args: &DashboardArgs) -> Result<()> {
    let cfg = SessionConfig::load(&FileStore::new(state_path))?;
    let scenario_file = load_or_demo(args.scenario.as_deref()).with_context(|| {
        format!(
            "failed to load scenario {}",
            args.scenario
                .as_deref()
                .map_or_else(|| "(demo)".to_string(), |p| p.display().to_string())
        )
    })?;
    let scenario = Scenario::from_config(&scenario_file);

    let seed = resolve_seed(args.seed);
    info!(seed, "dashboard seed");

    let session = Session::new(scenario.clone(), SessionParams::from_config(&cfg, seed));

    if args.dry_run {
        print_dry_run(&session, args.scenario.as_deref());
        return Ok(());
    }

    let (tx, rx) = mpsc::channel::<ControlEvent>(64);

    let mut renderer = TerminalRenderer::new(io::stdout(), Layout::for_scenario(&scenario));
    renderer
        .deliver(ViewUpdate::Log(LogEntry::info(format!(
            "Dashboard ready to simulate '{}'. Type 'start' to begin.",
            cfg.file_name
        ))))
        .await?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(ControlEvent::Shutdown).await;
        });
    }

    if args.auto {
        tx.send(ControlEvent::Start { speed: None }).await?;
    } else {
        println!("{}", input::HELP);
        input::spawn_stdin_reader(tx.clone());
    }

    let options = ControllerOptions {
        default_speed: args.speed,
        exit_when_finished: args.auto,
    };
    let core = ControllerCore::new(session, options);
    let exit = Runtime::new(core, rx, tx, renderer).run().await?;

    print_run_summary(&exit.final_frame);

    if exit.report_requested {
        println!();
        run_report(state_path, &ReportArgs { seed: None, csv: false })?;
    }
    Ok(())
}

fn run_report(state_path: &Path, args: &ReportArgs) -> Result<()> {
    let cfg = SessionConfig::load(&FileStore::new(state_path))?;
    let seed = resolve_seed(args.seed);
    info!(seed, runs = cfg.num_simulations, "report seed");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let report = Report::build(cfg.num_simulations, cfg.max_steps, &mut rng);

    println!(
        "Report for '{}': {} runs, limit {} steps",
        cfg.file_name, cfg.num_simulations, cfg.max_steps
    );
    println!();
    print!("{}", report.to_text());

    if args.csv {
        println!();
        println!("{}", report::render::CSV_PLACEHOLDER);
    }
    Ok(())
}

fn print_session_config(cfg: &SessionConfig) {
    println!("  simulations   = {}", cfg.num_simulations);
    println!("  error margin  = {}%", cfg.error_margin_percent);
    println!("  max steps     = {}", cfg.max_steps);
    println!("  file name     = {}", cfg.file_name);
}

/// Dry-run output: plan, parameters and budget.
fn print_dry_run(session: &Session, scenario_path: Option<&Path>) {
    let params = session.params();
    println!("pmsim dry-run");
    println!(
        "  scenario = {}",
        scenario_path.map_or_else(|| "(built-in demo)".to_string(), |p| p.display().to_string())
    );
    println!("  file name = {}", params.file_name);
    println!("  max steps = {}", params.max_steps);
    println!("  error margin = {:.0}%", params.error_margin * 100.0);
    println!("  seed = {}", params.seed);
    println!("  base cost per hour = {:.2}", session.base_cost_per_hour());
    println!("  total estimated cost = {:.2}", session.total_estimated_cost());
    println!();

    let tasks = session.store().tasks();
    println!("tasks ({}):", tasks.len());
    for task in tasks {
        println!("  - {} ({})", task.id, task.name);
        println!("      est_duration: {}", task.est_duration);
        println!("      cost_factor: {:.2}", task.cost_factor);
        if !task.dependencies.is_empty() {
            println!("      after: {:?}", task.dependencies);
        }
    }

    let agents = session.store().agents();
    println!("agents ({}):", agents.len());
    for agent in agents {
        println!("  - {} ({})", agent.id, agent.name);
        println!("      capabilities: {:?}", agent.capabilities);
    }

    debug!("dry-run complete (no simulation)");
}

fn print_run_summary(frame: &Frame) {
    let m = &frame.snapshot.metrics;
    println!();
    println!("run summary ({:?})", frame.run_state);
    println!("  time steps  = {} / {}", m.time_step, frame.snapshot.max_steps);
    println!("  completion  = {:.1}%", m.overall_progress);
    println!("  EV          = ${:.2}", m.earned_value);
    println!("  AC          = ${:.2}", m.actual_cost);
    match m.cpi() {
        Some(cpi) => println!("  CPI         = {cpi:.2}"),
        None => println!("  CPI         = N/A"),
    }
}
