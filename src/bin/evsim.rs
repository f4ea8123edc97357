// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Command-line driver for the evsim event-driven simulator.

use std::ops::Range;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use evsim::config::SimConfig;
use evsim::fulladder::{AdderStyle, FullAdderBuilder};
use evsim::harness::{check_adder, AdderReport};
use evsim::netlist::NetlistFile;
use evsim::sim::Simulator;
use rayon::prelude::*;

#[derive(Parser)]
#[command(name = "evsim", about = "Deterministic event-driven gate-level simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a ripple-carry adder netlist as JSON.
    Gen(GenArgs),

    /// Simulate a netlist once with a fixed seed.
    Run(RunArgs),

    /// Check `S == A + B` on an adder netlist over a range of seeds.
    ///
    /// Seeds are simulated in parallel; every run is independent.
    Check(CheckArgs),
}

/// Where the netlist comes from: a JSON file, or a generated adder.
#[derive(Args, Debug)]
struct NetlistArgs {
    /// Netlist JSON file.
    #[clap(long, conflicts_with = "bits")]
    netlist: Option<PathBuf>,

    /// Width of the generated adder when no netlist file is given.
    #[clap(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=63))]
    bits: u8,

    /// Primitive style of the generated adder.
    #[clap(long, value_enum, default_value_t = AdderStyle::Gates)]
    style: AdderStyle,

    /// Simulator configuration JSON (queue capacities, estimator models).
    #[clap(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct GenArgs {
    /// Adder width in bits.
    #[clap(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=63))]
    bits: u8,

    #[clap(long, value_enum, default_value_t = AdderStyle::Gates)]
    style: AdderStyle,

    /// Output path for the netlist JSON.
    out: PathBuf,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    netlist: NetlistArgs,

    /// Stimulus seed.
    #[clap(long)]
    seed: u64,

    /// Print every net value after the run.
    #[clap(long)]
    dump_nets: bool,
}

#[derive(Args)]
struct CheckArgs {
    #[command(flatten)]
    netlist: NetlistArgs,

    /// Seeds to check, as `START..END` (end exclusive).
    #[clap(long, default_value = "1..100", value_parser = parse_seed_range)]
    seeds: Range<u64>,

    /// Print reports as JSON lines.
    #[clap(long)]
    json: bool,
}

fn parse_seed_range(s: &str) -> Result<Range<u64>, String> {
    let (start, end) = s
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got {:?}", s))?;
    let start: u64 = start.trim().parse().map_err(|e| format!("bad start: {}", e))?;
    let end: u64 = end.trim().parse().map_err(|e| format!("bad end: {}", e))?;
    if start >= end {
        return Err(format!("empty seed range {}..{}", start, end));
    }
    Ok(start..end)
}

fn load(args: &NetlistArgs) -> evsim::Result<(NetlistFile, SimConfig)> {
    let netlist = match &args.netlist {
        Some(path) => {
            clilog::info!("Loading netlist: {:?}", path);
            NetlistFile::from_file(path)?
        }
        None => FullAdderBuilder::new(args.bits as usize)
            .style(args.style)
            .build()?,
    };
    let config = match &args.config {
        Some(path) => {
            let cfg = SimConfig::from_file(path)?;
            clilog::info!("Loaded config: {:?}", cfg);
            cfg
        }
        None => SimConfig::default(),
    };
    Ok((netlist, config))
}

fn exit_on_err<T>(r: evsim::Result<T>) -> T {
    r.unwrap_or_else(|e| {
        clilog::error!("{}", e);
        std::process::exit(1);
    })
}

fn main() {
    clilog::init_stderr_color_debug();
    let cli = Cli::parse();

    match cli.command {
        Commands::Gen(args) => cmd_gen(args),
        Commands::Run(args) => cmd_run(args),
        Commands::Check(args) => cmd_check(args),
    }
}

fn cmd_gen(args: GenArgs) {
    let netlist = exit_on_err(
        FullAdderBuilder::new(args.bits as usize)
            .style(args.style)
            .build(),
    );
    let json = exit_on_err(netlist.to_json_pretty());
    exit_on_err(std::fs::write(&args.out, json).map_err(Into::into));
    clilog::info!(
        "wrote {} ({} nets, {} gates) to {:?}",
        netlist.name,
        netlist.net_count,
        netlist.gates.len(),
        args.out
    );
}

fn cmd_run(args: RunArgs) {
    let (netlist, config) = exit_on_err(load(&args.netlist));

    let timer_run = clilog::stimer!("simulation");
    let mut sim = Simulator::new(config);
    exit_on_err(sim.initialize_seed(args.seed));
    exit_on_err(sim.submit_gates_for_simulation(&netlist));
    let perf = exit_on_err(sim.run_simulation(&netlist));
    clilog::finish!(timer_run);

    if let Some(stats) = sim.last_stats() {
        clilog::info!(
            "{} events, {} gate evaluations ({} unchanged)",
            stats.events_processed,
            stats.gate_evaluations,
            stats.unchanged_evaluations
        );
    }

    let view = sim.admin();
    if args.dump_nets {
        for (net, value) in view.net_values().iter().enumerate() {
            println!("{} : {}", net, value);
        }
    }
    println!("Performance estimation:");
    println!("> Latency: {} (unitless)", perf.latency_unitless);
    println!("> Area: {} (unitless)", perf.area);
}

fn cmd_check(args: CheckArgs) {
    let (netlist, config) = exit_on_err(load(&args.netlist));
    clilog::info!(
        "checking {} over seeds {}..{}",
        netlist.name,
        args.seeds.start,
        args.seeds.end
    );

    let timer_check = clilog::stimer!("adder check");
    let results: Vec<(u64, evsim::Result<AdderReport>)> = args
        .seeds
        .clone()
        .into_par_iter()
        .map(|seed| (seed, check_adder(&netlist, seed, &config)))
        .collect();
    clilog::finish!(timer_check);

    let mut failures = 0usize;
    for (seed, result) in &results {
        match result {
            Ok(report) => {
                if args.json {
                    println!("{}", exit_on_err(serde_json::to_string(report).map_err(Into::into)));
                } else {
                    println!(
                        "seed {:>4}: A={} B={} S={} latency={} area={} {}",
                        report.seed,
                        report.a,
                        report.b,
                        report.sum,
                        report.perf.latency_unitless,
                        report.perf.area,
                        if report.passed { "ok" } else { "MISMATCH" }
                    );
                }
                if !report.passed {
                    failures += 1;
                }
            }
            Err(e) => {
                clilog::error!("seed {}: {}", seed, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        clilog::error!("ADDER CHECK: FAILED ({} of {} seeds)", failures, results.len());
        std::process::exit(1);
    }
    clilog::info!("ADDER CHECK: PASSED ({} seeds)", results.len());
}
