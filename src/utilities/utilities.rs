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

use std::fmt;

pub const VARIABLE_SENTINEL: char = '$';
pub const GROUP_MARKER: &str = "[]";
pub const PLACEHOLDER: &str = "$$";

/// One lexical unit of a script line. Every variant keeps the raw text it
/// was read from, sentinels and quotes included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Quoted(String),
    Variable(String),
    Group(String),
    Word(String),
}

impl Token {
    pub fn text(&self) -> &str {
        match self {
            Token::Quoted(text) | Token::Variable(text) | Token::Group(text) | Token::Word(text) => {
                text.as_str()
            }
        }
    }

    /// Name of the group a `[]name` marker refers to.
    pub fn group_name(&self) -> Option<&str> {
        match self {
            Token::Group(text) => text.strip_prefix(GROUP_MARKER),
            _ => None,
        }
    }

    /// Name under which a value is bound when this token is a binding target.
    /// `x`, `$x` and `"x"` all bind `x`.
    pub fn binding_name(&self) -> String {
        match self {
            Token::Variable(text) => text.trim_start_matches(VARIABLE_SENTINEL).to_string(),
            Token::Quoted(text) => text.trim_matches('"').to_string(),
            Token::Group(text) | Token::Word(text) => text.clone(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A validated script operation with its parameters already sorted into
/// the slots the operation uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Echo {
        args: Vec<Token>,
    },
    Exec {
        command: Token,
        capture: Option<String>,
    },
    Set {
        name: String,
        value: Token,
    },
    Create {
        path: Token,
    },
    Mkdir {
        path: Token,
    },
    Cd {
        path: Token,
    },
    Rm {
        path: Token,
    },
    Cp {
        source: Token,
        destination: Token,
    },
    Mv {
        source: Token,
        destination: Token,
    },
    Read {
        source: Token,
        target: Option<String>,
    },
    Write {
        path: Token,
        data: Token,
    },
    Append {
        path: Token,
        data: Token,
    },
    Find {
        pattern: Token,
        group: String,
    },
    Each {
        group: String,
        command: Token,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Echo { .. } => "echo",
            Operation::Exec { .. } => "exec",
            Operation::Set { .. } => "set",
            Operation::Create { .. } => "create",
            Operation::Mkdir { .. } => "mkdir",
            Operation::Cd { .. } => "cd",
            Operation::Rm { .. } => "rm",
            Operation::Cp { .. } => "cp",
            Operation::Mv { .. } => "mv",
            Operation::Read { .. } => "read",
            Operation::Write { .. } => "write",
            Operation::Append { .. } => "append",
            Operation::Find { .. } => "find",
            Operation::Each { .. } => "each",
        }
    }
}

/// One script line after validation. `parameters` keeps the raw tokens
/// following the operation name, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub line: usize,
    pub operation: Operation,
    pub parameters: Vec<Token>,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operation.name())?;
        for parameter in &self.parameters {
            write!(f, " {}", parameter)?;
        }
        Ok(())
    }
}
