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

use crate::executor_processes::processes::{CommandLine, Processes};
use crate::interpreter::interpreter::RuntimeState;
use crate::parser::parser::Parser;
use crate::utilities::errors::{ScriptError, ScriptResult};
use crate::utilities::utilities::{Instruction, Operation, Token};
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runs validated instructions in order against an owned [`RuntimeState`],
/// writing operation output to `out`.
pub struct Executor<W: Write> {
    state: RuntimeState,
    out: W,
}

impl Executor<io::Stdout> {
    pub fn stdout() -> Self {
        Executor::new(RuntimeState::new(), io::stdout())
    }
}

impl<W: Write> Executor<W> {
    pub fn new(state: RuntimeState, out: W) -> Self {
        Executor { state, out }
    }

    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    pub fn into_parts(self) -> (RuntimeState, W) {
        (self.state, self.out)
    }

    pub fn run_script(&mut self, path: &Path) -> ScriptResult<()> {
        info!("SCRIPTOR INTERPRETER VER {}", VERSION);
        let source = load_script(path)?;
        self.run_source(&source)
    }

    /// Parses the whole source before executing any of it.
    pub fn run_source(&mut self, source: &str) -> ScriptResult<()> {
        let instructions = Parser::new(source).parse()?;
        self.execute(&instructions)
    }

    pub fn execute(&mut self, instructions: &[Instruction]) -> ScriptResult<()> {
        for instruction in instructions {
            self.execute_instruction(instruction)?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn execute_instruction(&mut self, instruction: &Instruction) -> ScriptResult<()> {
        debug!("Executing: line {}: {}", instruction.line, instruction);
        match &instruction.operation {
            Operation::Echo { args } => self.echo(args)?,
            Operation::Exec { command, capture } => self.exec(command, capture.as_deref())?,
            Operation::Set { name, value } => {
                self.state
                    .set_variable(name.as_str(), value.text().trim_matches('"'));
            }
            Operation::Create { path } => self.create(path)?,
            Operation::Mkdir { path } => self.mkdir(path)?,
            Operation::Cd { path } => self.cd(path)?,
            Operation::Rm { path } => self.rm(path)?,
            Operation::Cp {
                source,
                destination,
            } => self.cp(source, destination)?,
            Operation::Mv {
                source,
                destination,
            } => self.mv(source, destination)?,
            Operation::Read { source, target } => self.read(source, target.as_deref())?,
            Operation::Write { path, data } => self.write(path, data)?,
            Operation::Append { path, data } => self.append(path, data)?,
            Operation::Find { pattern, group } => self.find(pattern, group)?,
            Operation::Each { group, command } => self.each(group, command)?,
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn echo(&mut self, args: &[Token]) -> ScriptResult<()> {
        let words: Vec<String> = args
            .iter()
            .map(|arg| match arg {
                Token::Variable(reference) => self.state.lookup(reference),
                other => other.text().trim_matches('"').to_string(),
            })
            .collect();
        writeln!(self.out, "{}", words.join(" "))?;
        Ok(())
    }

    fn exec(&mut self, command: &Token, capture: Option<&str>) -> ScriptResult<()> {
        let command = CommandLine::split(&self.state.resolve(command), &self.state)?;
        let output = Processes::run(&command, self.state.cwd())?;
        match capture {
            Some(name) => self.state.set_variable(name, output),
            None => write!(self.out, "{}", output)?,
        }
        Ok(())
    }

    fn create(&mut self, path: &Token) -> ScriptResult<()> {
        let path = self.state.resolve_path(path);
        ensure_absent(&path)?;
        info!("Creating file: {}", path.display());
        File::create(&path).map_err(|e| ScriptError::io("create file", &path, e))?;
        Ok(())
    }

    fn mkdir(&mut self, path: &Token) -> ScriptResult<()> {
        let path = self.state.resolve_path(path);
        ensure_absent(&path)?;
        info!("Creating folder: {}", path.display());
        fs::create_dir(&path).map_err(|e| ScriptError::io("create folder", &path, e))
    }

    fn cd(&mut self, path: &Token) -> ScriptResult<()> {
        let path = self.state.resolve_path(path);
        let target = fs::canonicalize(&path).map_err(|e| ScriptError::Path {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        if !target.is_dir() {
            return Err(ScriptError::Path {
                path,
                reason: "not a directory".to_string(),
            });
        }
        info!("Changed to directory: {}", target.display());
        self.state.set_cwd(target);
        Ok(())
    }

    fn rm(&mut self, path: &Token) -> ScriptResult<()> {
        let path = self.state.resolve_path(path);
        let metadata = ensure_present(&path)?;
        info!("Removing file/directory: {}", path.display());
        let removed = if metadata.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|e| ScriptError::io("remove", &path, e))
    }

    fn cp(&mut self, source: &Token, destination: &Token) -> ScriptResult<()> {
        let (source, destination) = self.transfer_paths(source, destination)?;
        Processes::copy_recursive(&source, &destination)
            .map_err(|e| ScriptError::io("copy to", &destination, e))?;
        info!("Copied: {} to: {}", source.display(), destination.display());
        Ok(())
    }

    fn mv(&mut self, source: &Token, destination: &Token) -> ScriptResult<()> {
        let (source, destination) = self.transfer_paths(source, destination)?;
        fs::rename(&source, &destination)
            .map_err(|e| ScriptError::io("move to", &destination, e))?;
        info!("Moved: {} to: {}", source.display(), destination.display());
        Ok(())
    }

    /// Source must exist, destination must not; `cp` and `mv` never overwrite.
    fn transfer_paths(&self, source: &Token, destination: &Token) -> ScriptResult<(PathBuf, PathBuf)> {
        let source = self.state.resolve_path(source);
        let destination = self.state.resolve_path(destination);
        ensure_present(&source)?;
        ensure_absent(&destination)?;
        Ok((source, destination))
    }

    fn read(&mut self, source: &Token, target: Option<&str>) -> ScriptResult<()> {
        let path = self.state.resolve_path(source);
        ensure_present(&path)?;
        let data = fs::read_to_string(&path).map_err(|e| ScriptError::io("read", &path, e))?;
        info!("Read data from: {}", path.display());
        match target {
            Some(name) => self.state.set_variable(name, data),
            None => writeln!(self.out, "{}", data)?,
        }
        Ok(())
    }

    fn write(&mut self, path: &Token, data: &Token) -> ScriptResult<()> {
        let path = self.state.resolve_path(path);
        let data = self.state.resolve(data);
        fs::write(&path, data).map_err(|e| ScriptError::io("write to", &path, e))?;
        info!("Wrote to file: {}", path.display());
        Ok(())
    }

    fn append(&mut self, path: &Token, data: &Token) -> ScriptResult<()> {
        let path = self.state.resolve_path(path);
        let data = self.state.resolve(data);
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .and_then(|mut file| file.write_all(data.as_bytes()))
            .map_err(|e| ScriptError::io("append to", &path, e))?;
        info!("Appended to file: {}", path.display());
        Ok(())
    }

    fn find(&mut self, pattern: &Token, group: &str) -> ScriptResult<()> {
        let pattern = self.state.resolve(pattern);
        let found = Processes::find(&pattern, self.state.cwd())?;
        info!("Found {} entries for {} into []{}", found.len(), pattern, group);
        self.state.set_group(group, found);
        Ok(())
    }

    fn each(&mut self, group: &str, command: &Token) -> ScriptResult<()> {
        let entries = self.state.group(group).to_vec();
        if entries.is_empty() {
            debug!("Group []{} is empty", group);
            return Ok(());
        }
        let template = CommandLine::split(&self.state.resolve(command), &self.state)?;
        let placeholder = template.placeholder_index();
        for entry in &entries {
            debug!("{}", entry);
            let command = match placeholder {
                Some(index) => template.with_argument(index, entry),
                None => template.clone(),
            };
            let output = Processes::run(&command, self.state.cwd())?;
            writeln!(self.out, "{}", output)?;
        }
        Ok(())
    }
}

pub fn load_script(path: &Path) -> ScriptResult<String> {
    ensure_present(path)?;
    let source = fs::read_to_string(path).map_err(|e| ScriptError::io("read script", path, e))?;
    debug!("Loaded contents of {}", path.display());
    Ok(source)
}

fn ensure_present(path: &Path) -> ScriptResult<fs::Metadata> {
    fs::symlink_metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ScriptError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ScriptError::io("stat", path, e),
    })
}

fn ensure_absent(path: &Path) -> ScriptResult<()> {
    match fs::symlink_metadata(path) {
        Ok(_) => Err(ScriptError::AlreadyExists {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ScriptError::io("stat", path, e)),
    }
}
