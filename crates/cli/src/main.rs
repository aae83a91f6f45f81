//! Segmented von-Neumann simulator CLI.
//!
//! This binary provides the entry points for running and inspecting programs. It performs:
//! 1. **Run:** Load a program image and execute it until halt, fault, or step limit.
//! 2. **Debug:** Pause after every instruction in an interactive prompt (`--debug`).
//! 3. **Disassemble:** List the text segment of a program image without running it.

mod debugger;

use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use vnsim_core::common::ConfigError;
use vnsim_core::config::Config;
use vnsim_core::isa::encode;
use vnsim_core::sim::inspect::{format_cpu, format_data, format_program};
use vnsim_core::sim::{Exit, Simulator, read_program};
use vnsim_core::stats::STATS_SECTIONS;

use crate::debugger::DebugRepl;

/// Exit status when the step budget runs out.
const EXIT_STEP_LIMIT: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "vnsim",
    author,
    version,
    about = "Segmented von-Neumann instruction-set simulator",
    long_about = "Run or disassemble a binary program image.\n\nExamples:\n  vnsim run prog.bin\n  vnsim run prog.bin --debug\n  vnsim run prog.bin --max-steps 0 --trace\n  vnsim run prog.bin --stats summary,control\n  vnsim disasm prog.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program image.
    Run {
        /// Program image to execute.
        file: PathBuf,

        /// Pause after every instruction in the interactive debugger.
        #[arg(short, long)]
        debug: bool,

        /// Log every instruction (sets the log filter to `trace`).
        #[arg(short, long)]
        trace: bool,

        /// Stop after this many instructions; 0 removes the limit.
        #[arg(long)]
        max_steps: Option<u64>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Statistics sections to print after a halt (default: all).
        #[arg(
            long,
            value_delimiter = ',',
            value_parser = PossibleValuesParser::new(STATS_SECTIONS.iter().copied())
        )]
        stats: Vec<String>,
    },

    /// Print the text segment of a program image.
    Disasm {
        /// Program image to list.
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            debug,
            trace,
            max_steps,
            config,
            stats,
        } => {
            let config = build_config(config.as_deref(), debug, trace, max_steps)
                .unwrap_or_else(|e| fail(&e));
            init_logging(&filter_directives(
                trace,
                config.general.trace_instructions,
                std::env::var("RUST_LOG").ok(),
            ));
            debug!(general = ?config.general, "configuration");
            cmd_run(&file, &config, &stats);
        }
        Commands::Disasm { file } => {
            init_logging(&filter_directives(false, false, std::env::var("RUST_LOG").ok()));
            cmd_disasm(&file);
        }
    }
}

/// Loads the configuration file, if any, and applies the command-line overrides.
fn build_config(
    path: Option<&Path>,
    debug: bool,
    trace: bool,
    max_steps: Option<u64>,
) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.general.debug |= debug;
    config.general.trace_instructions |= trace;
    if let Some(max) = max_steps {
        config.general.max_steps = Some(max);
    }
    Ok(config)
}

/// Picks the log filter directives.
///
/// `--trace` shows everything. Otherwise `RUST_LOG` (or `warn`) applies, with
/// the simulator raised to `info` when instruction tracing is configured.
fn filter_directives(force_trace: bool, trace_instructions: bool, env: Option<String>) -> String {
    if force_trace {
        return "trace".to_string();
    }
    let base = env
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| "warn".to_string());
    if trace_instructions {
        format!("{base},vnsim_core=info")
    } else {
        base
    }
}

/// Installs the log subscriber on stderr.
fn init_logging(directives: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Prints an error and exits with status 1.
fn fail(err: &dyn Display) -> ! {
    eprintln!("ERROR: {err}");
    process::exit(1);
}

/// Loads and runs a program, printing the final state.
///
/// Exits with status 1 on a fault and 2 when the step budget runs out.
fn cmd_run(file: &Path, config: &Config, stats_sections: &[String]) {
    let program = read_program(file).unwrap_or_else(|e| fail(&e));
    info!(
        file = %file.display(),
        text_size = program.text.len(),
        data_size = program.data.len(),
        data_end = program.data_end,
        "program loaded"
    );
    let mut sim = Simulator::with_program(config, program);

    println!("*** PROGRAM (loaded from {}) ***", file.display());
    print!("{}", format_program(&sim.machine));
    println!("*** DATA (size: {}) ***", sim.machine.data_size());
    print!("{}", format_data(&sim.machine));

    if config.general.debug {
        sim.set_hook(Box::new(DebugRepl::new(io::stdin().lock(), io::stdout())));
    }

    println!("\n*** EXECUTION ***");
    match sim.run() {
        Ok(Exit::Halted) => {
            println!("\n{}", halt_banner(sim.machine.halt_addr()));
            print!("{}", format_cpu(&sim.machine));
            print!("{}", format_data(&sim.machine));
            sim.stats.print_sections(stats_sections);
        }
        Ok(Exit::Stopped) => {
            println!("\n*** STOPPED ***");
            print!("{}", format_cpu(&sim.machine));
        }
        Ok(Exit::StepLimit) => {
            print!("{}", format_cpu(&sim.machine));
            eprintln!(
                "ERROR: step limit of {} instructions reached",
                sim.stats.steps
            );
            process::exit(EXIT_STEP_LIMIT);
        }
        Err(fault) => {
            print!("{}", format_cpu(&sim.machine));
            fail(&fault);
        }
    }
}

/// Banner printed when the program halts normally.
fn halt_banner(addr: Option<u32>) -> String {
    match addr {
        Some(addr) => format!("*** HALT at address {addr:#010x} ***"),
        None => "*** HALT ***".to_string(),
    }
}

/// Prints address, raw word, and disassembly for every instruction.
fn cmd_disasm(file: &Path) {
    let program = read_program(file).unwrap_or_else(|e| fail(&e));
    println!(
        "; text_size: {}  data_size: {}  data_end: {}",
        program.text.len(),
        program.data.len(),
        program.data_end
    );
    for (addr, inst) in program.text.iter().enumerate() {
        println!("{addr:#06x}: {:#010x}  {inst}", encode(inst));
    }
}
