//! Command tree walker.
//!
//! Each visited command first consumes the leading flag tokens, then either
//! short-circuits on `--help`, runs its handler (leaf), or pops the next
//! token as the name of the child to descend into (branch). The token stack
//! and value store belong to the walker for the whole descent.

use std::time::Duration;

use tracing::debug;

use crate::args::Args;
use crate::command::{Code, Command, Context, FAILURE, SUCCESS};
use crate::error::{Error, Result};
use crate::flags::{Flag, FlagKind, Flags};
use crate::help;
use crate::values::Values;

/// How a walk ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A leaf handler ran and returned this code.
    Ran(Code),
    /// Help was rendered instead of running a handler: on request
    /// ([`SUCCESS`]) or because a branch had no sub-command name
    /// ([`FAILURE`]).
    Help { text: String, code: Code },
}

/// State of one run through the command tree.
pub struct Walker<'a> {
    args: Args,
    values: Values,
    globals: &'a Flags,
    version: Option<&'a str>,
    path: Vec<&'a Command>,
}

impl<'a> Walker<'a> {
    pub fn new(args: Args, globals: &'a Flags, version: Option<&'a str>) -> Self {
        Self {
            args,
            values: Values::new(),
            globals,
            version,
            path: Vec::new(),
        }
    }

    /// Walks from `root` to a leaf, consuming the walker.
    pub fn walk(mut self, root: &'a Command) -> Result<Dispatch> {
        self.visit(root)
    }

    fn visit(&mut self, command: &'a Command) -> Result<Dispatch> {
        self.path.push(command);

        while self.args.next_is_flag() {
            self.consume_flag(command)?;
        }

        if self.values.help_requested() {
            debug!(command = %command.name, "help requested");
            return Ok(Dispatch::Help {
                text: self.help_text(),
                code: SUCCESS,
            });
        }

        if command.is_leaf() {
            return self.execute(command);
        }

        let Some(name) = self.args.pop() else {
            debug!(command = %command.name, "no sub-command given");
            return Ok(Dispatch::Help {
                text: self.help_text(),
                code: FAILURE,
            });
        };
        let child = command.get_command(&name)?;
        debug!(parent = %command.name, child = %child.name, "descending");
        self.visit(child)
    }

    fn execute(&mut self, command: &'a Command) -> Result<Dispatch> {
        let handler = command
            .handler()
            .ok_or_else(|| Error::MissingHandler(command.name.clone()))?;

        let context = Context::new(
            command,
            std::mem::take(&mut self.path),
            self.globals,
            self.version,
            std::mem::take(&mut self.values),
            self.args.drain(),
        );
        debug!(command = %command.name, arguments = context.arguments().len(), "running handler");
        handler(&context).map(Dispatch::Ran)
    }

    fn help_text(&self) -> String {
        help::render(&self.path, self.globals, self.version)
    }

    fn resolve(&self, command: &'a Command, name: &str) -> Result<&'a Flag> {
        command
            .flags
            .find(name)
            .or_else(|| self.globals.find(name))
            .ok_or_else(|| Error::UndefinedFlag(name.to_string()))
    }

    fn consume_flag(&mut self, command: &'a Command) -> Result<()> {
        let Some(marker) = self.args.pop_flag() else {
            return Ok(());
        };
        let flag = self.resolve(command, marker.trim_start_matches('-'))?;
        let identity = flag.identity();
        debug!(flag = identity, kind = %flag.kind, "consuming flag");

        match flag.kind {
            FlagKind::Bool => self.consume_bool(identity),
            FlagKind::String => {
                let value = self.take_value(flag)?;
                self.values.record::<String>(identity, value);
            }
            FlagKind::Int => {
                let value = self.take_value(flag)?;
                let parsed = value.parse::<i64>().map_err(|source| Error::InvalidInt {
                    identity: identity.to_string(),
                    value,
                    source,
                })?;
                self.values.record::<i64>(identity, parsed);
            }
            FlagKind::Duration => {
                let value = self.take_value(flag)?;
                let parsed =
                    humantime::parse_duration(&value).map_err(|source| Error::InvalidDuration {
                        identity: identity.to_string(),
                        value,
                        source,
                    })?;
                self.values.record::<Duration>(identity, parsed);
            }
        }
        Ok(())
    }

    /// A bare boolean flag means true; an explicit `true`/`false` token is
    /// consumed, anything else is left for the next step.
    fn consume_bool(&mut self, identity: &str) {
        let explicit = match self.args.peek() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        };
        if explicit.is_some() {
            self.args.pop();
        }
        self.values.record::<bool>(identity, explicit.unwrap_or(true));
    }

    /// Pops the value token of a string, int or duration flag. A missing
    /// token or one starting with `-` is an error.
    fn take_value(&mut self, flag: &Flag) -> Result<String> {
        let missing = || Error::MissingValue {
            kind: flag.kind,
            identity: flag.identity().to_string(),
        };
        if self.args.next_is_flag() {
            return Err(missing());
        }
        self.args.pop().ok_or_else(missing)
    }
}
