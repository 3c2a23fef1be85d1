// Single-Run Market Simulator — the reference product surface
// Runs one simulation with hourly progress blocks and a final summary.
//
// Usage:
//   cargo run --release --bin market                 # 1 day, seed 0
//   cargo run --release --bin market -- --days 7     # longer horizon
//   cargo run --release --bin market -- --seed 42
//   cargo run --release --bin market -- --quiet      # final summary only

use pit_engine::{MarketSimulation, SimConfig};

struct CliArgs {
    days: u64,
    seed: u64,
    quiet: bool,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs { days: 1, seed: 0, quiet: false };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--days" => {
                i += 1;
                if i < args.len() {
                    cli.days = args[i].parse().unwrap_or(1);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--quiet" => {
                cli.quiet = true;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    env_logger::init();
    let cli = parse_args();

    let cfg = SimConfig {
        days: cli.days,
        ..SimConfig::default()
    };

    let mut sim = match MarketSimulation::new(cfg, cli.seed) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("failed to set up simulation: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Starting {}-day simulation with hourly reporting (seed {})...",
        cli.days, cli.seed
    );

    let quiet = cli.quiet;
    let result = sim.run(|report| {
        // The final summary always prints; hourly blocks only when not quiet.
        if !quiet || report.starts_with("Simulation completed") {
            println!("\n{}", report);
        }
    });

    if let Err(e) = result {
        eprintln!("run aborted: {}", e);
        std::process::exit(1);
    }
}
