//! Command validation and dispatch
//!
//! This module handles:
//! - The fixed command table and per-command arity rules
//! - Argument validation in a fixed, client-observable order
//! - Executing handlers against the device bindings

pub mod handlers;
mod registry;

pub use registry::{Arity, CommandRegistry};

use crate::protocol;
use thiserror::Error;

/// A validation failure. The `#[error]` text of each variant is the
/// exact reply string existing clients match on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    #[error("Error: Wrong argument count")]
    WrongArgumentCount,

    #[error("Error: Invalid port")]
    InvalidPort,

    #[error("Error: No motor is connected to this port")]
    NoMotor,

    #[error("Error: Invalid brick button")]
    InvalidButton,

    #[error("Error: No touch sensor is connected to this port")]
    NoTouchSensor,

    #[error("Error: Value is not a number")]
    NotANumber,

    #[error("Error: Invalid stop type")]
    InvalidStop,

    #[error("Error: Value is not boolean")]
    NotBoolean,

    #[error("Error: Unrecognized command")]
    UnrecognizedCommand,
}

/// Successful outcome of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// The action completed.
    Success,
    /// A blocking wait was interrupted by cancellation.
    Exit,
    /// A boolean query result.
    Bool(bool),
}

impl Reply {
    /// The wire representation of this reply. Booleans are capitalised;
    /// existing clients parse these exact strings.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Success => protocol::SUCCESS,
            Self::Exit => protocol::EXIT,
            Self::Bool(true) => "True",
            Self::Bool(false) => "False",
        }
    }
}

/// Parse a numeric argument. Accepts any float representation and
/// truncates toward zero, since the underlying actions take integers.
pub(crate) fn parse_int(token: &str) -> Result<i32, CommandError> {
    token
        .parse::<f64>()
        .map(|value| value as i32)
        .map_err(|_| CommandError::NotANumber)
}

/// Parse a boolean argument. Only "true"/"false" are accepted, ignoring
/// case; anything else is invalid.
pub(crate) fn parse_bool(token: &str) -> Result<bool, CommandError> {
    if token.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if token.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(CommandError::NotBoolean)
    }
}
