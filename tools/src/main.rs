//! sim-runner: headless FCFS scheduling driver.
//!
//! Usage:
//!   sim-runner --count 3 --proc 0,4 --proc 1,3 --proc 2,1
//!   sim-runner --workload workload.json --interval-ms 0
//!   sim-runner --random 8 --seed 42 --speed fast_forward
//!   sim-runner --ipc-mode

use anyhow::Result;
use fcfs_core::{
    command::{DriverCommand, ProcessValues},
    config::{SimConfig, SimSpeed},
    engine::SimEngine,
    event::SimEvent,
    scheduler::{Schedule, ScheduleSummary},
    snapshot::SimulationSnapshot,
    SimError,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::thread;

#[derive(serde::Deserialize)]
struct WorkloadFile {
    processes: Vec<ProcessValues>,
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    schedule: Option<&'a Schedule>,
    summary:  Option<&'a ScheduleSummary>,
    snapshot: SimulationSnapshot,
    events:   Vec<SimEvent>,
}

/// Used when no workload flag is given.
const DEMO_WORKLOAD: [(f64, f64); 3] = [(0.0, 4.0), (1.0, 3.0), (2.0, 1.0)];

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match flag_value(&args, "--config") {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(raw) = flag_value(&args, "--interval-ms") {
        config.tick_interval_ms = parse_interval_ms(raw)?;
    }
    if let Some(raw) = flag_value(&args, "--speed") {
        config.speed = SimSpeed::parse(raw)
            .ok_or_else(|| anyhow::anyhow!("unknown speed '{raw}'"))?;
    }

    let mut engine = SimEngine::new(config);

    if args.iter().any(|a| a == "--ipc-mode") {
        return run_ipc_loop(&mut engine);
    }

    load_workload(&mut engine, &args)?;
    print_schedule(&engine);
    run_playback(&mut engine)
}

fn load_workload(engine: &mut SimEngine, args: &[String]) -> Result<()> {
    if let Some(path) = flag_value(args, "--workload") {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: WorkloadFile = serde_json::from_str(&content)?;
        let pairs: Vec<_> = file.processes.iter().map(|p| (p.arrival, p.burst)).collect();
        engine.compute_from_pairs(&pairs)?;
    } else if let Some(raw) = flag_value(args, "--random") {
        let count = fcfs_core::input::parse_count(raw)?;
        let seed = parse_arg(args, "--seed", 42u64);
        engine.generate(count, seed)?;
    } else if args.iter().any(|a| a == "--proc" || a == "--count") {
        let rows: Vec<(String, String)> = args
            .windows(2)
            .filter(|w| w[0] == "--proc")
            .map(|w| split_row(&w[1]))
            .collect();
        let count = flag_value(args, "--count")
            .map(str::to_string)
            .unwrap_or_else(|| rows.len().to_string());
        engine.compute_from_form(&count, &rows)?;
    } else {
        log::info!("no workload given, using the built-in demo");
        engine.compute_from_pairs(&DEMO_WORKLOAD)?;
    }
    Ok(())
}

fn run_playback(engine: &mut SimEngine) -> Result<()> {
    let delay = engine.config.tick_delay();
    let mut report = engine.start()?;
    println!();
    println!("=== SIMULATION ===");
    loop {
        print_snapshot(&report.snapshot);
        if report.snapshot.is_finished {
            break;
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        report = engine.tick()?;
    }
    println!("  simulation finished. total time: {}s", engine.current_tick());
    Ok(())
}

fn run_ipc_loop(engine: &mut SimEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: DriverCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };
        if cmd == DriverCommand::Quit {
            break;
        }

        match handle_command(engine, cmd) {
            Ok(events) => {
                let state = UiState {
                    schedule: engine.schedule(),
                    summary:  engine.summary(),
                    snapshot: engine.snapshot(),
                    events,
                };
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            // Bad input and out-of-order commands are reported, not fatal.
            Err(e) => write_error(&mut stdout, &e.to_string())?,
        }
        stdout.flush()?;
    }
    Ok(())
}

fn handle_command(engine: &mut SimEngine, cmd: DriverCommand) -> Result<Vec<SimEvent>, SimError> {
    match cmd {
        DriverCommand::Compute { count, rows } => Ok(vec![engine.compute_from_form(&count, &rows)?]),
        DriverCommand::ComputeValues { processes } => {
            let pairs: Vec<_> = processes.iter().map(|p| (p.arrival, p.burst)).collect();
            Ok(vec![engine.compute_from_pairs(&pairs)?])
        }
        DriverCommand::Generate { count, seed } => Ok(vec![engine.generate(count, seed)?]),
        DriverCommand::Start => Ok(engine.start()?.events),
        DriverCommand::Tick { count } => {
            let mut events = Vec::new();
            for _ in 0..count {
                let report = engine.tick()?;
                events.extend(report.events);
                if report.snapshot.is_finished {
                    break;
                }
            }
            Ok(events)
        }
        DriverCommand::GetState | DriverCommand::Quit => Ok(Vec::new()),
    }
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{}", err_json)?;
    out.flush()?;
    Ok(())
}

fn print_schedule(engine: &SimEngine) {
    let (Some(schedule), Some(summary)) = (engine.schedule(), engine.summary()) else {
        return;
    };

    println!("=== FCFS SCHEDULE ===");
    if schedule.is_empty() {
        println!("  (no processes)");
    }
    println!(
        "  {:<6} {:>8} {:>8} {:>8} {:>8} {:>8} {:>10}",
        "id", "arrival", "burst", "start", "finish", "waiting", "turnaround"
    );
    for e in schedule.entries() {
        println!(
            "  {:<6} {:>8} {:>8} {:>8} {:>8} {:>8} {:>10}",
            e.id, e.arrival, e.burst, e.start, e.finish, e.waiting, e.turnaround
        );
    }

    println!();
    println!("  average waiting:    {}", fmt_avg(summary.average_waiting));
    println!("  average turnaround: {}", fmt_avg(summary.average_turnaround));
    println!("  idle time:          {}", summary.idle_time);
    if let Some(util) = summary.utilization {
        println!("  cpu utilization:    {:.1}%", util * 100.0);
    }
}

fn print_snapshot(snapshot: &SimulationSnapshot) {
    println!(
        "  t={:<4} running: {}",
        format!("{}s", snapshot.current_time),
        snapshot.running_label()
    );
}

fn fmt_avg(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

fn parse_interval_ms(raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid --interval-ms '{raw}': expected whole milliseconds"))
}

fn split_row(raw: &str) -> (String, String) {
    match raw.split_once(',') {
        Some((arrival, burst)) => (arrival.to_string(), burst.to_string()),
        None => (raw.to_string(), String::new()),
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    flag_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
