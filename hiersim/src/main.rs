use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use clap::Parser;
use log::info;
use serde::Serialize;

use hierlib::config::HierarchyConfig;
use hierlib::io::get_reader;
use hierlib::simulator::{HierarchyResult, Simulator};
use hierlib::stats::StatsReport;
use hierlib::trace::TraceReader;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(about = String::from("Trace-driven simulator for multi-level direct-mapped caches"))]
struct Args {
    config: String,
    trace: String,

    /// Print the outcome at every visited level as each access is resolved
    #[arg(short = 'a', long)]
    per_access: bool,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long, default_value_t = DEBUG_DEFAULT)]
    debug: bool,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    result: &'a HierarchyResult,
    stats: StatsReport,
}

fn main() -> Result<(), String> {
    env_logger::init();
    let start = Instant::now();
    let args = Args::parse();
    let config_file = File::open(&args.config)
        .map_err(|e| format!("Couldn't open the config file at path {}: {e}", args.config))?;
    let config: HierarchyConfig = serde_json::from_reader(BufReader::new(config_file))
        .map_err(|e| format!("Couldn't parse the config file: {e}"))?;
    let mut simulator =
        Simulator::new(&config).map_err(|e| format!("Invalid configuration: {e}"))?;
    let trace_file = File::open(&args.trace)
        .map_err(|e| format!("Couldn't open the trace file at path {}: {e}", args.trace))?;
    let trace_reader = get_reader(trace_file)?;
    let result = if args.per_access {
        let mut records = TraceReader::new(trace_reader);
        for record in &mut records {
            let record = record.map_err(|e| format!("Couldn't read the trace: {e}"))?;
            for outcome in simulator.process(record) {
                println!(
                    "{} {} level {}: {} (tag {:#x}, index {})",
                    record.kind,
                    record.address,
                    outcome.level + 1,
                    if outcome.hit { "hit" } else { "miss" },
                    outcome.tag,
                    outcome.index
                );
            }
        }
        simulator.snapshot()
    } else {
        simulator
            .simulate(trace_reader)
            .map_err(|e| format!("Couldn't read the trace: {e}"))?;
        simulator.snapshot()
    };
    info!("simulated {} accesses", result.total_accesses);
    let summary = RunSummary {
        result: &result,
        stats: simulator.report(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&summary)
            .map_err(|e| format!("Couldn't serialise the output {e}"))?
    );
    if args.performance {
        let end = Instant::now();
        let simulation_time = simulator.get_execution_time();
        let total_time = end - start;
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!(
            "Total execution time (includes initial parsing, configuration, and output): {}s",
            total_time.as_nanos() as f64 / 1e9
        )
    }
    if args.debug {
        #[cfg(debug_assertions)]
        println!("Running the debug binary, debug mode is enabled by default. If benchmarking, do not use this binary, re-compile with the --release argument when using cargo run");
        println!("Parsed input configuration: {config:?}");
        let cold = simulator.cold_line_counts();
        let formatted = cold
            .iter()
            .map(|(name, count)| format!("{name}: {count}"))
            .reduce(|a, b| format!("{a}, {b}"))
            .unwrap();
        println!("Cold cache lines by level: ({formatted})");
        println!(
            "Total cold cache lines: {}",
            cold.iter().map(|(_, count)| *count).sum::<usize>()
        )
    }
    Ok(())
}
