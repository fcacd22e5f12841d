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

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type ScriptResult<T> = Result<T, ScriptError>;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: bad method name `{name}`")]
    UnknownOperation {
        name: String,
        line: usize,
        context: String,
    },

    #[error("line {line}: `{operation}` requires {required} parameters, {supplied} supplied")]
    Arity {
        operation: String,
        line: usize,
        required: usize,
        supplied: usize,
        context: String,
    },

    #[error("line {line}: `{operation}` needs a group variable ([]name), found `{found}`")]
    GroupSyntax {
        operation: &'static str,
        line: usize,
        found: String,
    },

    #[error("unable to change directory to {}: {reason}", path.display())]
    Path { path: PathBuf, reason: String },

    #[error("file/directory not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("file/directory already exists with that name: {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("error running `{command}`: {reason}")]
    Process { command: String, reason: String },

    #[error("invalid search pattern `{pattern}`: {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("unable to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to write output: {0}")]
    Output(#[from] io::Error),
}

impl ScriptError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScriptError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Source lines around a parse error, if this is one.
    pub fn source_context(&self) -> Option<&str> {
        match self {
            ScriptError::UnknownOperation { context, .. } | ScriptError::Arity { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ScriptError::UnknownOperation { .. }
                | ScriptError::Arity { .. }
                | ScriptError::GroupSyntax { .. }
        )
    }
}
