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

use crate::interpreter::interpreter::RuntimeState;
use crate::utilities::errors::{ScriptError, ScriptResult};
use crate::utilities::utilities::PLACEHOLDER;
use glob::{MatchOptions, Pattern};
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// A command string split into a program and its argument words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Splits on whitespace and expands a leading `~` in every argument.
    pub fn split(command: &str, state: &RuntimeState) -> ScriptResult<Self> {
        let mut words = command.split_whitespace();
        let program = words
            .next()
            .ok_or_else(|| ScriptError::Process {
                command: command.to_string(),
                reason: "empty command".to_string(),
            })?
            .to_string();
        let args = words.map(|word| state.expand_home(word)).collect();
        Ok(CommandLine { program, args })
    }

    /// Position of the first argument that is exactly the `$$` placeholder.
    pub fn placeholder_index(&self) -> Option<usize> {
        self.args.iter().position(|arg| arg == PLACEHOLDER)
    }

    pub fn with_argument(&self, index: usize, value: &str) -> Self {
        let mut args = self.args.clone();
        args[index] = value.to_string();
        CommandLine {
            program: self.program.clone(),
            args,
        }
    }

    fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub struct Processes;

impl Processes {
    /// Runs a program to completion in `cwd` and returns its stdout followed
    /// by its stderr. A spawn failure or a non-zero exit is an error.
    pub fn run(command: &CommandLine, cwd: &Path) -> ScriptResult<String> {
        debug!("Running: {}", command.display());
        let output = Command::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .output()
            .map_err(|e| ScriptError::Process {
                command: command.display(),
                reason: e.to_string(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            let mut reason = output.status.to_string();
            if !stderr.trim().is_empty() {
                reason.push_str(": ");
                reason.push_str(stderr.trim_end());
            }
            return Err(ScriptError::Process {
                command: command.display(),
                reason,
            });
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&stderr);
        Ok(combined)
    }

    /// Case-insensitive recursive name search below `root`, in traversal
    /// order. Symlinked directories are listed but never descended into,
    /// and unreadable entries are skipped.
    pub fn find(pattern: &str, root: &Path) -> ScriptResult<Vec<String>> {
        let matcher = Pattern::new(pattern).map_err(|e| ScriptError::Pattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        let options = MatchOptions {
            case_sensitive: false,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        let mut found = Vec::new();
        if root
            .file_name()
            .map_or(false, |name| matcher.matches_with(&name.to_string_lossy(), options))
        {
            found.push(root.to_string_lossy().into_owned());
        }
        Processes::walk(root, &matcher, options, &mut found);
        Ok(found)
    }

    fn walk(dir: &Path, matcher: &Pattern, options: MatchOptions, found: &mut Vec<String>) {
        let mut entries: Vec<_> = match fs::read_dir(dir) {
            Ok(entries) => entries.filter_map(Result::ok).collect(),
            Err(e) => {
                debug!("Skipping {}: {}", dir.display(), e);
                return;
            }
        };
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            if matcher.matches_with(&entry.file_name().to_string_lossy(), options) {
                found.push(path.to_string_lossy().into_owned());
            }
            // DirEntry::file_type does not follow symlinks.
            if entry.file_type().map_or(false, |kind| kind.is_dir()) {
                Processes::walk(&path, matcher, options, found);
            }
        }
    }

    /// Copies a file, or a directory tree, to a destination that must not exist.
    pub fn copy_recursive(source: &Path, destination: &Path) -> io::Result<()> {
        if source.is_dir() {
            fs::create_dir(destination)?;
            for entry in fs::read_dir(source)? {
                let entry = entry?;
                Processes::copy_recursive(&entry.path(), &destination.join(entry.file_name()))?;
            }
        } else {
            fs::copy(source, destination)?;
        }
        Ok(())
    }
}
