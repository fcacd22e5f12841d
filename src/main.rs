// Copyright (C) 2024 Bellande Architecture Mechanism Research Innovation Center, Ronaldson Bellande

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use scriptor::{Executor, ScriptError};
use std::path::{Path, PathBuf};
use std::process;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "scriptor", version, about = "Runs line-oriented automation scripts")]
struct Cli {
    /// Script file to execute
    script: Option<PathBuf>,

    /// Print diagnostic trace lines to standard output
    #[arg(short = 'v')]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let Some(script) = cli.script else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Application error: {}", e);
            process::exit(1);
        }
        return;
    };
    init_tracing(cli.verbose);

    if let Err(e) = run(&script) {
        if let Some(context) = e.downcast_ref::<ScriptError>().and_then(ScriptError::source_context) {
            eprintln!("{}", context);
        }
        eprintln!("Application error: {:#}", e);
        process::exit(1);
    }
}

fn run(script: &Path) -> anyhow::Result<()> {
    let mut executor = Executor::stdout();
    executor
        .run_script(script)
        .with_context(|| format!("running {}", script.display()))
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_max_level(level)
        .without_time()
        .with_target(false)
        .with_level(false)
        .init();
}
