//! Error types for command tree runs.
//!
//! Every failure aborts the run at the point of detection and travels up to
//! [`Runner::run`](crate::Runner::run), which writes the message to the output
//! sink and turns it into [`FAILURE`](crate::FAILURE).

use thiserror::Error;

use crate::flags::FlagKind;
use crate::validate::ValidationError;

/// Errors that can abort a run.
#[derive(Debug, Error)]
pub enum Error {
    /// No value on the command line, no default, and the flag is required;
    /// or a value-taking flag was the last token or followed by another flag.
    #[error("no value for {} flag \"{identity}\"", .kind.label())]
    MissingValue { kind: FlagKind, identity: String },

    /// The singular accessor was used on a flag given more than once.
    #[error("multiple values set for {} flag \"{identity}\"", .kind.label())]
    MultipleValues { kind: FlagKind, identity: String },

    /// Integer flag value is not a base-10 signed integer.
    #[error("unable to convert value for flag \"{identity}\" to int \"{value}\"")]
    InvalidInt {
        identity: String,
        value: String,
        source: std::num::ParseIntError,
    },

    /// Duration flag value is not a duration literal.
    #[error("unable to convert value for flag \"{identity}\" to duration \"{value}\"")]
    InvalidDuration {
        identity: String,
        value: String,
        source: humantime::DurationError,
    },

    /// A handler asked for a flag using the accessor of another kind.
    #[error("flag \"{identity}\" is {}, not {}", .actual.label(), .requested.label())]
    KindMismatch {
        identity: String,
        actual: FlagKind,
        requested: FlagKind,
    },

    /// Flag name not declared on the command, its ancestors, or globals.
    #[error("flag \"{0}\" is not defined")]
    UndefinedFlag(String),

    /// Token used as a sub-command name does not match any child.
    #[error("subcommand \"{0}\" is not defined")]
    UndefinedCommand(String),

    /// A command without children has no handler.
    #[error("no function for leaf command \"{0}\"")]
    MissingHandler(String),

    /// The command tree failed validation; one entry per violation.
    #[error("{}", join_violations(.0))]
    Validation(Vec<ValidationError>),

    /// Writing to the output sink failed.
    #[error("unable to write output: {0}")]
    Io(#[from] std::io::Error),
}

fn join_violations(violations: &[ValidationError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
