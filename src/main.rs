// Copyright (c) 2024 Mudit Bhargava
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
//

// main.rs
//
// This file contains the main entry point for the scheduler simulator.
// It provides a command-line interface for running a trace through the
// scheduler and for generating random traces.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use oosim_rust::scheduler::config::SchedulerConfig;
use oosim_rust::scheduler::simulator::Simulator;
use oosim_rust::trace::generator::TraceGenerator;
use oosim_rust::trace::reader::TraceReader;
use oosim_rust::trace::TraceSource;
use oosim_rust::utils::logger::CycleLogger;

#[derive(Parser)]
#[command(name = "oosim_rust")]
#[command(about = "An out-of-order superscalar scheduler simulator written in Rust")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scheduler on an instruction trace
    Run {
        /// Input trace file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of result buses
        #[arg(short, long, default_value = "8")]
        result_buses: usize,

        /// Functional units for op class 0
        #[arg(long, default_value = "1")]
        k0: usize,

        /// Functional units for op class 1
        #[arg(long, default_value = "2")]
        k1: usize,

        /// Functional units for op class 2
        #[arg(long, default_value = "3")]
        k2: usize,

        /// Instructions fetched per cycle
        #[arg(short, long, default_value = "4")]
        fetch_width: usize,

        /// Cycle cap for runaway simulations
        #[arg(long, default_value = "1000000")]
        max_cycles: u64,

        /// Emit statistics as JSON instead of the text report
        #[arg(long)]
        json: bool,

        /// Write a per-cycle state log to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep every Nth cycle in the state log
        #[arg(short, long, default_value = "1")]
        log_interval: u64,
    },
    /// Generate a random instruction trace
    Generate {
        /// Number of instructions to generate
        #[arg(short, long, default_value = "1000")]
        count: usize,

        /// Seed for the random generator
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Architectural registers to draw from
        #[arg(short, long, default_value = "32")]
        registers: i32,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[allow(clippy::too_many_arguments)]
fn run_scheduler(
    input: &PathBuf,
    result_buses: usize,
    fu_counts: (usize, usize, usize),
    fetch_width: usize,
    max_cycles: u64,
    json: bool,
    output: Option<&PathBuf>,
    log_interval: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let (k0, k1, k2) = fu_counts;
    let config = SchedulerConfig::new()
        .with_result_buses(result_buses)
        .with_fu_counts(k0, k1, k2)
        .with_fetch_width(fetch_width)
        .with_max_cycles(max_cycles);

    let trace = TraceReader::open(input)?;
    let mut simulator = Simulator::new(config, trace);

    let mut logger = match output {
        Some(path) => Some(CycleLogger::create(path)?.with_interval(log_interval)),
        None => None,
    };

    loop {
        let cycle = simulator.cycle;
        let more = simulator.step()?;
        if let Some(logger) = logger.as_mut() {
            logger.record_cycle(cycle, &simulator.dump_state())?;
        }
        if !more {
            break;
        }
    }

    let stats = simulator.stats();
    if let Some(logger) = logger.as_mut() {
        logger.write_summary(&stats)?;
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", "Simulation completed.".green().bold());
        println!("{}", stats);
    }
    Ok(())
}

fn generate_trace(
    count: usize,
    seed: u64,
    registers: i32,
    output: Option<&PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut generator = TraceGenerator::new(seed, count).with_register_count(registers);

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    while let Some(record) = generator.next_instruction()? {
        writeln!(writer, "{}", record)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run {
            input,
            result_buses,
            k0,
            k1,
            k2,
            fetch_width,
            max_cycles,
            json,
            output,
            log_interval,
        } => run_scheduler(
            input,
            *result_buses,
            (*k0, *k1, *k2),
            *fetch_width,
            *max_cycles,
            *json,
            output.as_ref(),
            *log_interval,
        ),
        Commands::Generate {
            count,
            seed,
            registers,
            output,
        } => generate_trace(*count, *seed, *registers, output.as_ref()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
