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

//! Line-oriented scripting interpreter for shell automation.
//!
//! A script is read whole, every line is tokenized and validated against the
//! operation table, and only then are the instructions executed in order
//! against a [`RuntimeState`]. The first failure stops the run.

pub mod executor {
    pub mod executor;
}
pub mod executor_processes {
    pub mod processes;
}
pub mod interpreter {
    pub mod interpreter;
}
pub mod lexer {
    pub mod lexer;
}
pub mod parser {
    pub mod parser;
}
pub mod utilities {
    pub mod errors;
    pub mod utilities;
}

pub use crate::executor::executor::Executor;
pub use crate::interpreter::interpreter::RuntimeState;
pub use crate::parser::parser::Parser;
pub use crate::utilities::errors::{ScriptError, ScriptResult};
pub use crate::utilities::utilities::{Instruction, Operation, Token};
