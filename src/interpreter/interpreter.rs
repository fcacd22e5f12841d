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

use crate::utilities::utilities::{Token, VARIABLE_SENTINEL};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Mutable state of one script run: variables, groups, and the working
/// directory every relative path and spawned process is resolved against.
#[derive(Debug, Clone)]
pub struct RuntimeState {
    variables: HashMap<String, String>,
    groups: HashMap<String, Vec<String>>,
    cwd: PathBuf,
    home: Option<String>,
}

impl RuntimeState {
    pub fn new() -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        RuntimeState::with_dirs(cwd, env::var("HOME").ok())
    }

    pub fn with_dirs(cwd: impl Into<PathBuf>, home: Option<String>) -> Self {
        RuntimeState {
            variables: HashMap::new(),
            groups: HashMap::new(),
            cwd: cwd.into(),
            home,
        }
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Entries of a group in insertion order; an unknown group is empty.
    pub fn group(&self, name: &str) -> &[String] {
        self.groups.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_group(&mut self, name: impl Into<String>, entries: Vec<String>) {
        self.groups.insert(name.into(), entries);
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn set_cwd(&mut self, cwd: PathBuf) {
        self.cwd = cwd;
    }

    pub fn home(&self) -> Option<&str> {
        self.home.as_deref()
    }

    /// Value of a `$name` reference. Undefined names read as empty.
    pub fn lookup(&self, reference: &str) -> String {
        let name = reference.trim_start_matches(VARIABLE_SENTINEL);
        match self.variable(name) {
            Some(value) => value.to_string(),
            None => {
                debug!("Variable not set: {}", name);
                String::new()
            }
        }
    }

    /// Substitutes a variable reference, then strips one layer of quoting,
    /// then expands a leading `~`.
    pub fn resolve(&self, token: &Token) -> String {
        let value = match token {
            Token::Variable(reference) => self.lookup(reference),
            other => other.text().to_string(),
        };
        let value = unquote(&value);
        self.expand_home(&value)
    }

    pub fn resolve_path(&self, token: &Token) -> PathBuf {
        self.cwd.join(self.resolve(token))
    }

    /// Replaces a leading `~` with the home directory, whatever follows it:
    /// `~/a` and `~a` both expand. Left untouched when no home is known.
    pub fn expand_home(&self, value: &str) -> String {
        match value.strip_prefix('~') {
            Some(rest) => {
                let home = shellexpand::tilde_with_context("~", || self.home());
                format!("{}{}", home, rest)
            }
            None => value.to_string(),
        }
    }
}

impl Default for RuntimeState {
    fn default() -> Self {
        RuntimeState::new()
    }
}

/// Strips one layer of double quotes and unescapes backslash sequences.
/// Anything not wrapped in quotes is returned unchanged.
pub fn unquote(value: &str) -> String {
    let inner = match value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner,
        None => return value.to_string(),
    };

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some(escaped @ ('\\' | '"' | '\'')) => result.push(escaped),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}
