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

use crate::lexer::lexer::Lexer;
use crate::utilities::errors::{ScriptError, ScriptResult};
use crate::utilities::utilities::{Instruction, Operation, Token};
use std::vec::IntoIter;

/// Minimum token count per operation, the operation name included.
pub const OPERATIONS: &[(&str, usize)] = &[
    ("echo", 2),
    ("exec", 2),
    ("set", 3),
    ("create", 2),
    ("mkdir", 2),
    ("cd", 2),
    ("rm", 2),
    ("cp", 3),
    ("mv", 3),
    ("read", 2),
    ("write", 3),
    ("append", 3),
    ("find", 3),
    ("each", 3),
];

const CONTEXT_RADIUS: usize = 3;

pub fn required_tokens(operation: &str) -> Option<usize> {
    OPERATIONS
        .iter()
        .find(|(name, _)| *name == operation)
        .map(|&(_, required)| required)
}

pub struct Parser<'a> {
    source: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser { source }
    }

    /// Builds the whole instruction list. The first bad line aborts, so
    /// nothing from a malformed script is ever executed.
    pub fn parse(&self) -> ScriptResult<Vec<Instruction>> {
        let mut instructions = Vec::new();
        for (index, line) in self.source.lines().enumerate() {
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }
            let tokens = Lexer::new(trimmed_line).tokenize();
            instructions.push(self.build(tokens, index + 1)?);
        }
        Ok(instructions)
    }

    pub fn build(&self, tokens: Vec<Token>, line: usize) -> ScriptResult<Instruction> {
        let name = tokens
            .first()
            .map(|token| token.text().to_string())
            .unwrap_or_default();
        let required = required_tokens(&name).ok_or_else(|| ScriptError::UnknownOperation {
            name: name.clone(),
            line,
            context: self.context(line),
        })?;
        if tokens.len() < required {
            return Err(self.arity_error(&name, line, required, tokens.len()));
        }

        let parameters: Vec<Token> = tokens[1..].to_vec();
        let mut params = Params {
            tokens: parameters.clone().into_iter(),
            parser: self,
            name: &name,
            line,
            required,
            supplied: tokens.len(),
        };

        let operation = match name.as_str() {
            "echo" => Operation::Echo {
                args: params.rest(),
            },
            "exec" => Operation::Exec {
                command: params.next()?,
                capture: params.optional_binding(),
            },
            "set" => Operation::Set {
                name: params.next()?.binding_name(),
                value: params.next()?,
            },
            "create" => Operation::Create {
                path: params.next()?,
            },
            "mkdir" => Operation::Mkdir {
                path: params.next()?,
            },
            "cd" => Operation::Cd {
                path: params.next()?,
            },
            "rm" => Operation::Rm {
                path: params.next()?,
            },
            "cp" => Operation::Cp {
                source: params.next()?,
                destination: params.next()?,
            },
            "mv" => Operation::Mv {
                source: params.next()?,
                destination: params.next()?,
            },
            "read" => Operation::Read {
                source: params.next()?,
                target: params.optional_binding(),
            },
            "write" => Operation::Write {
                path: params.next()?,
                data: params.next()?,
            },
            "append" => Operation::Append {
                path: params.next()?,
                data: params.next()?,
            },
            "find" => Operation::Find {
                pattern: params.next()?,
                group: params.group("find")?,
            },
            "each" => Operation::Each {
                group: params.group("each")?,
                command: params.next()?,
            },
            _ => {
                return Err(ScriptError::UnknownOperation {
                    name: name.clone(),
                    line,
                    context: self.context(line),
                })
            }
        };

        Ok(Instruction {
            line,
            operation,
            parameters,
        })
    }

    fn arity_error(&self, name: &str, line: usize, required: usize, supplied: usize) -> ScriptError {
        ScriptError::Arity {
            operation: name.to_string(),
            line,
            required: required - 1,
            supplied: supplied.saturating_sub(1),
            context: self.context(line),
        }
    }

    /// Renders the lines surrounding `line`, marking the faulting one.
    pub fn context(&self, line: usize) -> String {
        let first = line.saturating_sub(CONTEXT_RADIUS).max(1);
        let last = line + CONTEXT_RADIUS;
        self.source
            .lines()
            .enumerate()
            .map(|(index, text)| (index + 1, text))
            .filter(|(number, _)| (first..=last).contains(number))
            .map(|(number, text)| {
                let marker = if number == line { '>' } else { ' ' };
                format!("{}{:>4}: {}", marker, number, text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

struct Params<'p, 'a> {
    tokens: IntoIter<Token>,
    parser: &'p Parser<'a>,
    name: &'p str,
    line: usize,
    required: usize,
    supplied: usize,
}

impl Params<'_, '_> {
    fn next(&mut self) -> ScriptResult<Token> {
        self.tokens.next().ok_or_else(|| {
            self.parser
                .arity_error(self.name, self.line, self.required, self.supplied)
        })
    }

    fn optional_binding(&mut self) -> Option<String> {
        self.tokens.next().map(|token| token.binding_name())
    }

    fn rest(&mut self) -> Vec<Token> {
        self.tokens.by_ref().collect()
    }

    fn group(&mut self, operation: &'static str) -> ScriptResult<String> {
        let token = self.next()?;
        token
            .group_name()
            .map(str::to_string)
            .ok_or_else(|| ScriptError::GroupSyntax {
                operation,
                line: self.line,
                found: token.text().to_string(),
            })
    }
}
