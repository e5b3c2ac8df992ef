use clap::{Parser, Subcommand};
use lt_core::timing::{RunPerf, Timer, enable_timing};
use lt_model::{StabilityReport, ThermalStepper};
use lt_project::{ProjectError, Scenario, load_scenario};
use lt_results::{CsvSink, ResultsError, RunManifest, RunStore, compute_run_id};
use lt_sim::{OutputSink, RunReport, SimError, SimProgress, run_sim_with_progress};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{0}")]
    Project(#[from] ProjectError),

    #[error("Simulation failed: {0}")]
    Sim(#[from] SimError),

    #[error("{0}")]
    Results(#[from] ResultsError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser)]
#[command(name = "lunatherm")]
#[command(about = "Lunar regolith thermal and microwave brightness model", long_about = None)]
struct Cli {
    /// Print a wall-clock breakdown after runs
    #[arg(long, global = true)]
    timing: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario file
    Validate {
        /// Path to the scenario file (YAML, or JSON by extension)
        scenario_path: PathBuf,
    },
    /// Report explicit-scheme step limits for a scenario
    Stability {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Phase increment to analyse instead of the scenario's
        #[arg(long)]
        phase_increment: Option<f64>,
    },
    /// Run a scenario and write the retained profiles as CSV
    Run {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Output CSV file (defaults to stdout)
        #[arg(short, long, conflicts_with = "store")]
        output: Option<PathBuf>,
        /// Omit the column header line
        #[arg(long)]
        no_header: bool,
        /// Store the run under this directory, keyed by content hash
        #[arg(long)]
        store: Option<PathBuf>,
        /// Re-run even if the store already holds this run
        #[arg(long)]
        no_cache: bool,
    },
    /// List stored runs
    Runs {
        /// Run store directory
        store: PathBuf,
    },
    /// Show details of a stored run
    ShowRun {
        /// Run store directory
        store: PathBuf,
        /// Run ID to display
        run_id: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.timing {
        enable_timing();
    }

    let result = match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Stability {
            scenario_path,
            phase_increment,
        } => cmd_stability(&scenario_path, phase_increment),
        Commands::Run {
            scenario_path,
            output,
            no_header,
            store,
            no_cache,
        } => match store {
            Some(store) => cmd_run_stored(&scenario_path, &store, !no_cache),
            None => cmd_run(&scenario_path, output.as_deref(), !no_header),
        },
        Commands::Runs { store } => cmd_runs(&store),
        Commands::ShowRun { store, run_id } => cmd_show_run(&store, &run_id),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn cmd_validate(scenario_path: &Path) -> CliResult<()> {
    eprintln!("Validating scenario: {}", scenario_path.display());
    let scenario = load_scenario(scenario_path)?;
    // Derived quantities are checked separately from the file schema.
    scenario.model_config()?;
    eprintln!("✓ Scenario '{}' is valid", scenario.name);
    Ok(())
}

fn cmd_stability(scenario_path: &Path, phase_increment: Option<f64>) -> CliResult<()> {
    let scenario = load_scenario(scenario_path)?;
    let config = scenario.model_config()?;
    let increment = phase_increment.unwrap_or(scenario.run.phase_increment_deg);
    let report = StabilityReport::for_phase_increment(&config, increment);

    println!("Stability for '{}' at {} deg/step:", scenario.name, increment);
    println!("  Time step:          {:.1} s", report.dt_s);
    println!("  Conduction limit:   {:.1} s", report.conduction_limit_s);
    println!("  Surface limit:      {:.1} s", report.surface_limit_s);
    println!(
        "  Equilibrium temp:   {:.1} K",
        report.equilibrium_temperature_k
    );
    println!("  Margin (dt/limit):  {:.3}", report.margin());
    if report.is_stable() {
        println!("✓ Step is within the explicit stability limit");
    } else {
        println!("✗ Step exceeds the explicit stability limit; expect oscillation");
    }
    Ok(())
}

fn cmd_run(scenario_path: &Path, output: Option<&Path>, header: bool) -> CliResult<()> {
    let mut perf = RunPerf::default();

    let timer = Timer::start("load");
    let scenario = load_scenario(scenario_path)?;
    perf.load_time_s = timer.stop().unwrap_or_default();
    eprintln!("Running scenario: {}", scenario.name);

    let report = match output {
        Some(path) => {
            let mut sink = CsvSink::new(BufWriter::new(File::create(path)?));
            if !header {
                sink = sink.without_header();
            }
            let report = execute(&scenario, &mut sink, &mut perf)?;
            eprintln!("✓ Wrote {} rows to {}", sink.rows(), path.display());
            report
        }
        None => {
            let mut sink = CsvSink::new(io::stdout().lock());
            if !header {
                sink = sink.without_header();
            }
            execute(&scenario, &mut sink, &mut perf)?
        }
    };

    print_report(&report);
    perf.print_summary();
    Ok(())
}

fn cmd_run_stored(scenario_path: &Path, store_dir: &Path, use_cache: bool) -> CliResult<()> {
    let mut perf = RunPerf::default();

    let timer = Timer::start("load");
    let scenario = load_scenario(scenario_path)?;
    perf.load_time_s = timer.stop().unwrap_or_default();

    let store = RunStore::new(store_dir.to_path_buf())?;
    let run_id = compute_run_id(&scenario, SOLVER_VERSION);

    if use_cache && store.has_run(&run_id) {
        let manifest = store.load_manifest(&run_id)?;
        eprintln!("✓ Loaded from cache: {}", run_id);
        print_manifest(&manifest);
        return Ok(());
    }

    eprintln!("Running scenario: {}", scenario.name);
    let mut sink = store.create_sink(&run_id)?;
    let report = execute(&scenario, &mut sink, &mut perf)?;
    drop(sink);

    let timer = Timer::start("save");
    let manifest = RunManifest::from_report(run_id.clone(), &scenario, &report, SOLVER_VERSION);
    store.save_manifest(&manifest)?;
    perf.save_time_s = timer.stop().unwrap_or_default();
    info!(run_id = %run_id, path = %store.profile_path(&run_id).display(), "run stored");

    eprintln!("✓ Simulation completed: {}", run_id);
    print_report(&report);
    perf.print_summary();
    Ok(())
}

/// Run the scenario into `sink` with a progress line on stderr.
fn execute(scenario: &Scenario, sink: &mut dyn OutputSink, perf: &mut RunPerf) -> CliResult<RunReport> {
    let config = scenario.model_config()?;
    let initial = scenario.initial_profile(&config)?;
    let stepper = ThermalStepper::new(config);

    let started = Instant::now();
    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let mut on_progress = |p: &SimProgress| {
        let emit_now = (p.fraction_complete - last_fraction).abs() >= 0.005
            || last_emit.elapsed().as_millis() >= 100
            || p.step == p.total_steps;
        if emit_now {
            render_progress(p, started.elapsed().as_secs_f64());
            last_fraction = p.fraction_complete;
            last_emit = Instant::now();
        }
    };

    let timer = Timer::start("run");
    let result = run_sim_with_progress(
        &stepper,
        initial,
        &scenario.sim_options(),
        sink,
        Some(&mut on_progress),
    );
    clear_progress_line();
    let report = result?;

    perf.run_time_s = timer.stop().unwrap_or_default();
    perf.steps = report.steps;
    perf.records = report.records;
    Ok(report)
}

fn clear_progress_line() {
    eprint!("\r{}\r", " ".repeat(120));
    let _ = io::stderr().flush();
}

fn render_progress(p: &SimProgress, elapsed_s: f64) {
    let width = 28usize;
    let filled = ((p.fraction_complete * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    eprint!(
        "\r[{}] {:>6.2}%  lunation={}/{}  phase={:>6.2}  step={}/{}  elapsed={:.1}s",
        bar,
        p.fraction_complete * 100.0,
        p.lunation + 1,
        p.lunations,
        p.phase_deg,
        p.step,
        p.total_steps,
        elapsed_s
    );
    let _ = io::stderr().flush();
}

fn print_report(report: &RunReport) {
    eprintln!("  Steps:   {}", report.steps);
    eprintln!("  Records: {}", report.records);
    if !report.stability.is_stable() {
        eprintln!(
            "  Warning: time step {:.1} s exceeds stability limit {:.1} s",
            report.stability.dt_s,
            report.stability.limit_s()
        );
    }
    eprintln!("\nLunation summaries:");
    eprintln!("  lun   min K    max K   mean K   Tb K    surface dK  column dK");
    for s in &report.summaries {
        eprintln!(
            "  {:>3} {:>7.1} {:>8.1} {:>8.1} {:>6.1}  {:>10}  {:>9}",
            s.lunation,
            s.surface_min_k,
            s.surface_max_k,
            s.surface_mean_k,
            s.brightness_mean_k,
            format_change(s.max_surface_change_k),
            format_change(s.max_profile_change_k)
        );
    }
}

fn format_change(change_k: Option<f64>) -> String {
    match change_k {
        Some(c) => format!("{:.2e}", c),
        None => "-".to_string(),
    }
}

fn print_manifest(manifest: &RunManifest) {
    println!("  Scenario:   {}", manifest.scenario_name);
    println!("  Timestamp:  {}", manifest.timestamp);
    println!("  Version:    {}", manifest.solver_version);
    println!(
        "  Schedule:   {} lunations ({} warm-up) at {} deg/step",
        manifest.lunations, manifest.warmup_lunations, manifest.phase_increment_deg
    );
    println!("  Layers:     {}", manifest.layer_count);
    println!("  Steps:      {}", manifest.steps);
    println!("  Records:    {}", manifest.records);
    println!(
        "  Converged:  {}",
        format_change(manifest.final_surface_change_k())
    );
}

fn cmd_runs(store_dir: &Path) -> CliResult<()> {
    let store = RunStore::new(store_dir.to_path_buf())?;
    let runs = store.list_runs()?;

    if runs.is_empty() {
        println!("No stored runs in {}", store.root_dir().display());
    } else {
        println!("Stored runs in {}:", store.root_dir().display());
        for manifest in runs {
            println!(
                "  {} {} ({})",
                manifest.run_id, manifest.scenario_name, manifest.timestamp
            );
        }
    }
    Ok(())
}

fn cmd_show_run(store_dir: &Path, run_id: &str) -> CliResult<()> {
    let store = RunStore::new(store_dir.to_path_buf())?;
    println!("Loading run: {}", run_id);

    let manifest = store.load_manifest(run_id)?;
    println!("\nRun Summary:");
    print_manifest(&manifest);

    let records = store.load_records(run_id)?;
    if let (Some(first), Some(last)) = (records.first(), records.last()) {
        let (min, max) = records
            .iter()
            .map(|r| r.surface_k())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
                (lo.min(t), hi.max(t))
            });
        println!(
            "\nStored profile: {} rows, phase {} - {} deg",
            records.len(),
            first.phase_deg,
            last.phase_deg
        );
        println!("  Surface range: {:.1} - {:.1} K", min, max);
    }

    if !manifest.summaries.is_empty() {
        println!("\nLunation summaries:");
        for s in &manifest.summaries {
            println!(
                "  {:>3}  surface {:.1}-{:.1} K  Tb {:.1} K  change {} (column {})",
                s.lunation,
                s.surface_min_k,
                s.surface_max_k,
                s.brightness_mean_k,
                format_change(s.max_surface_change_k),
                format_change(s.max_profile_change_k)
            );
        }
    }
    Ok(())
}
