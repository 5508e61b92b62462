//! Command tree validation.
//!
//! Checks the naming rules of flag and command declarations before any token
//! is consumed, so a malformed tree never reaches a handler. Every violation
//! is collected; the runner reports one line per entry.
//!
//! # Examples
//!
//! ```
//! use cmdtree_core::*;
//!
//! let root = Command::new("tool")
//!     .with_flag(Flag::bool("verbose").with_short("v"));
//! assert!(validate_tree(&root, &Flags::new()).is_empty());
//!
//! // Invalid: short flag longer than one character
//! let bad = Command::new("tool").with_flag(Flag::bool("verbose").with_short("vv"));
//! assert_eq!(
//!     validate_tree(&bad, &Flags::new()),
//!     vec![ValidationError::ShortFlagLength("vv".to_string())]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::command::Command;
use crate::flags::{Flag, FlagKind, Flags};

/// Command tree validation errors.
///
/// The `Display` impl is the exact line reported for the violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Long name of exactly one character.
    #[error("long flag \"{0}\" must be more than one character")]
    LongFlagTooShort(String),
    /// Short name longer than one character.
    #[error("short flag \"{0}\" must be one character")]
    ShortFlagLength(String),
    /// Flag with neither a long nor a short name.
    #[error("flag must have a long or short name")]
    MissingFlagName,
    /// Default value of a different kind than the flag.
    #[error("default for flag \"{identity}\" must be {kind}")]
    DefaultKindMismatch { identity: String, kind: FlagKind },
    /// Two flags in the same scope share a name.
    #[error("duplicate flag \"{flag}\" in {scope}")]
    DuplicateFlag { flag: String, scope: String },
    /// Child command with an empty name.
    #[error("command name missing")]
    MissingCommandName,
    /// Child command name of exactly one character.
    #[error("command \"{0}\" must be more than one character")]
    CommandNameTooShort(String),
    /// Two children of the same command share a name.
    #[error("duplicate command \"{name}\" in {scope}")]
    DuplicateCommand { name: String, scope: String },
}

/// Validates the whole tree below `root`, plus the global flags.
pub fn validate_tree(root: &Command, globals: &Flags) -> Vec<ValidationError> {
    let mut errors = validate_flags(globals, &Flags::new(), "global flags");
    let mut path = Vec::new();
    walk(root, globals, &mut path, &mut errors);
    errors
}

fn walk<'a>(
    command: &'a Command,
    globals: &Flags,
    path: &mut Vec<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    if !command.name.is_empty() {
        path.push(&command.name);
    }
    errors.extend(validate_command(command, globals, &scope_of(path)));
    for child in &command.commands {
        walk(child, globals, path, errors);
    }
    if !command.name.is_empty() {
        path.pop();
    }
}

fn scope_of(path: &[&str]) -> String {
    if path.is_empty() {
        "root command".to_string()
    } else {
        format!("command \"{}\"", path.join(" "))
    }
}

/// Validates a single command: its own flags and the names of its children.
///
/// Globals are part of every command's registry, so a command flag reusing a
/// global name is a duplicate.
pub fn validate_command(command: &Command, globals: &Flags, scope: &str) -> Vec<ValidationError> {
    let mut errors = validate_flags(&command.flags, globals, scope);

    let mut seen: HashSet<&str> = HashSet::new();
    for child in &command.commands {
        match child.name.chars().count() {
            0 => errors.push(ValidationError::MissingCommandName),
            1 => errors.push(ValidationError::CommandNameTooShort(child.name.clone())),
            _ => {
                if !seen.insert(child.name.as_str()) {
                    errors.push(ValidationError::DuplicateCommand {
                        name: child.name.clone(),
                        scope: scope.to_string(),
                    });
                }
            }
        }
    }

    errors
}

fn validate_flags(flags: &Flags, reserved: &Flags, scope: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = reserved
        .iter()
        .flat_map(|flag| [flag.long_name(), flag.short_name()])
        .flatten()
        .collect();

    for flag in flags {
        errors.extend(validate_flag(flag));

        for name in [flag.long_name(), flag.short_name()].into_iter().flatten() {
            if !seen.insert(name) {
                errors.push(ValidationError::DuplicateFlag {
                    flag: name.to_string(),
                    scope: scope.to_string(),
                });
            }
        }
    }

    errors
}

fn validate_flag(flag: &Flag) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if flag.long_name().is_none() && flag.short_name().is_none() {
        errors.push(ValidationError::MissingFlagName);
        return errors;
    }

    if let Some(long) = flag.long_name() {
        if long.chars().count() == 1 {
            errors.push(ValidationError::LongFlagTooShort(long.to_string()));
        }
    }

    if let Some(short) = flag.short_name() {
        if short.chars().count() > 1 {
            errors.push(ValidationError::ShortFlagLength(short.to_string()));
        }
    }

    if let Some(default) = &flag.default {
        if default.kind() != flag.kind {
            errors.push(ValidationError::DefaultKindMismatch {
                identity: flag.identity().to_string(),
                kind: flag.kind,
            });
        }
    }

    errors
}
