//! ksv-econ CLI
//!
//! Run the two-country economy from the command line and print the
//! resulting time series.
//!
//! # Usage
//!
//! ```bash
//! # Integrated world with the default comparison scenario
//! ksv-econ simulate
//!
//! # From a config file, as JSON
//! ksv-econ simulate --config run.json --format json
//!
//! # Closed economies and the complete-markets benchmark
//! ksv-econ autarky --config run.json --periods 40
//! ksv-econ complete --config run.json
//! ```

use ksv_econ::config::RunConfig;
use std::process;

fn print_usage() {
    eprintln!(
        r#"ksv-econ — two-country credit-friction economy

USAGE:
    ksv-econ <COMMAND> [OPTIONS]

COMMANDS:
    simulate    Integrated world: world rate, wages and current accounts
    autarky     Each country on its own, without world capital markets
    complete    Complete-markets benchmark wage paths
    help        Show this message

OPTIONS:
    --config <FILE>     JSON run configuration (default: comparison scenario)
    --periods <N>       Override the number of periods
    --format <FORMAT>   Output format: text (default) or json

Set RUST_LOG=debug to trace every period and solver call.

EXAMPLES:
    ksv-econ simulate
    ksv-econ simulate --config run.json --format json
    ksv-econ autarky --periods 40"#
    );
}

struct Options {
    config: RunConfig,
    json: bool,
}

fn parse_options(args: &[String]) -> Options {
    let mut config_path: Option<String> = None;
    let mut periods: Option<usize> = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--config requires a file path");
                    process::exit(1);
                }));
            }
            "--periods" => {
                i += 1;
                periods = Some(args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--periods requires a number");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => RunConfig::from_file(&path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => RunConfig::default(),
    };
    if let Some(n) = periods {
        config.periods = n;
    }

    Options {
        config,
        json: format == "json",
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_simulate(args: &[String]) {
    let Options { config, json } = parse_options(args);
    let mut world = config.build().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let report = world
        .simulate(config.periods, &config.simulation)
        .unwrap_or_else(|e| {
            eprintln!("Simulation failed: {}", e);
            process::exit(2);
        });

    if json {
        print_json(&report);
    } else {
        println!("{}", report);
    }
}

fn cmd_autarky(args: &[String]) {
    let Options { config, json } = parse_options(args);
    let mut world = config.build().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let (x, y) = world.autarky(config.periods).unwrap_or_else(|e| {
        eprintln!("Autarky run failed: {}", e);
        process::exit(2);
    });

    if json {
        print_json(&serde_json::json!({ "x": x, "y": y, "wstar": world.wstar() }));
    } else {
        println!("=== Autarky ===");
        println!("w*: {:.6}\n", world.wstar());
        println!("{:>4}  {:>10}  {:>10}  {:>10}  {:>10}", "t", "w_x", "r_x", "w_y", "r_y");
        for t in 0..x.wages.len() {
            println!(
                "{:>4}  {:>10.6}  {:>10.6}  {:>10.6}  {:>10.6}",
                t,
                x.wages[t],
                x.rates[t + 1].unwrap_or(f64::NAN),
                y.wages[t],
                y.rates[t + 1].unwrap_or(f64::NAN)
            );
        }
    }
}

fn cmd_complete(args: &[String]) {
    let Options { config, json } = parse_options(args);
    let world = config.build().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let trace = world.complete_markets(config.periods).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(2);
    });

    if json {
        print_json(&trace);
    } else {
        println!("=== Complete Markets ===");
        println!("w*: {:.6}\n", world.wstar());
        println!("{:>4}  {:>10}  {:>10}", "t", "w_x", "w_y");
        for (t, (x, y)) in trace.wages_x.iter().zip(&trace.wages_y).enumerate() {
            println!("{:>4}  {:>10.6}  {:>10.6}", t, x, y);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "simulate" => cmd_simulate(rest),
        "autarky" => cmd_autarky(rest),
        "complete" => cmd_complete(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
