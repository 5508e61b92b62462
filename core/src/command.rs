//! Command tree declarations and the handler context.
//!
//! A [`Command`] with no children is a leaf and must own a handler; a
//! command with children is a branch that dispatches on the next token.
//! Handlers receive a [`Context`] giving typed access to every flag value
//! collected on the way down.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::flags::{Flag, Flags};
use crate::help;
use crate::values::{FlagType, Values};

/// Result code of a run: `0` for success, anything else for failure.
pub type Code = i32;

pub const SUCCESS: Code = 0;
pub const FAILURE: Code = 1;

/// Function invoked for a resolved leaf command.
pub type Handler = Box<dyn Fn(&Context<'_>) -> Result<Code>>;

/// A node of the command tree.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{Command, Flag, SUCCESS};
///
/// let root = Command::new("tool")
///     .with_help("does things")
///     .with_command(
///         Command::new("greet")
///             .with_flag(Flag::string("name").with_short("n"))
///             .with_handler(|ctx| {
///                 println!("hello, {}!", ctx.get_string("name")?);
///                 Ok(SUCCESS)
///             }),
///     );
///
/// assert!(!root.is_leaf());
/// assert!(root.find_command("greet").is_some());
/// ```
#[derive(Default)]
pub struct Command {
    /// Name used to select this command from its parent
    pub name: String,
    /// One-line summary shown in the parent's command list
    pub help: String,
    /// Long description shown in this command's help output
    pub description: String,
    /// Child commands, in declaration order
    pub commands: Vec<Command>,
    /// Flags declared on this command
    pub flags: Flags,
    handler: Option<Handler>,
}

impl Command {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Sets the one-line summary.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    /// Sets the long description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Adds a child command.
    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Adds a flag.
    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    /// Sets the handler run when this command is the resolved leaf.
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Context<'_>) -> Result<Code> + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    /// Finds a child by exact name.
    pub fn find_command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Returns the child named `name`, or [`Error::UndefinedCommand`].
    pub fn get_command(&self, name: &str) -> Result<&Command> {
        self.find_command(name)
            .ok_or_else(|| Error::UndefinedCommand(name.to_string()))
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("description", &self.description)
            .field("commands", &self.commands)
            .field("flags", &self.flags)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// What a leaf handler sees of the run.
///
/// Flag names passed to the accessors may be long or short names. They are
/// resolved against the leaf's flags, then each ancestor's flags back to the
/// root, then the global flags.
pub struct Context<'a> {
    leaf: &'a Command,
    path: Vec<&'a Command>,
    globals: &'a Flags,
    version: Option<&'a str>,
    values: Values,
    arguments: Vec<String>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        leaf: &'a Command,
        path: Vec<&'a Command>,
        globals: &'a Flags,
        version: Option<&'a str>,
        values: Values,
        arguments: Vec<String>,
    ) -> Self {
        Self {
            leaf,
            path,
            globals,
            version,
            values,
            arguments,
        }
    }

    /// The resolved leaf command.
    pub fn command(&self) -> &'a Command {
        self.leaf
    }

    pub fn name(&self) -> &'a str {
        &self.command().name
    }

    /// Names of the commands from the root to the leaf, skipping an unnamed
    /// root.
    pub fn path(&self) -> Vec<&'a str> {
        self.path
            .iter()
            .copied()
            .map(|c| c.name.as_str())
            .filter(|name| !name.is_empty())
            .collect()
    }

    pub fn version(&self) -> Option<&'a str> {
        self.version
    }

    /// Tokens left after the leaf stopped consuming flags, in command-line
    /// order.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Help text of the leaf command.
    pub fn help_text(&self) -> String {
        help::render(&self.path, self.globals, self.version)
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Returns the declaration of the flag named `name`.
    pub fn flag(&self, name: &str) -> Result<&'a Flag> {
        self.path
            .iter()
            .rev()
            .copied()
            .find_map(|c| c.flags.find(name))
            .or_else(|| self.globals.find(name))
            .ok_or_else(|| Error::UndefinedFlag(name.to_string()))
    }

    /// Returns true when the flag was given on the command line.
    pub fn is_set(&self, name: &str) -> Result<bool> {
        let flag = self.flag(name)?;
        Ok(self.values.is_set(flag.identity()))
    }

    /// Single value of any flag kind.
    pub fn get<T: FlagType>(&self, name: &str) -> Result<T> {
        self.values.one(self.flag(name)?)
    }

    /// Every value of any flag kind.
    pub fn get_all<T: FlagType>(&self, name: &str) -> Result<Vec<T>> {
        self.values.many(self.flag(name)?)
    }

    pub fn get_string(&self, name: &str) -> Result<String> {
        self.get(name)
    }

    pub fn get_strings(&self, name: &str) -> Result<Vec<String>> {
        self.get_all(name)
    }

    pub fn get_int(&self, name: &str) -> Result<i64> {
        self.get(name)
    }

    pub fn get_ints(&self, name: &str) -> Result<Vec<i64>> {
        self.get_all(name)
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        self.get(name)
    }

    pub fn get_bools(&self, name: &str) -> Result<Vec<bool>> {
        self.get_all(name)
    }

    pub fn get_duration(&self, name: &str) -> Result<Duration> {
        self.get(name)
    }

    pub fn get_durations(&self, name: &str) -> Result<Vec<Duration>> {
        self.get_all(name)
    }
}
