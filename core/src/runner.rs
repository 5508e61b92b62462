//! Run configuration and the single entry point of a run.
//!
//! [`Runner::run`] is the one boundary where errors stop: validation,
//! parsing and handler failures are written to the output sink with the
//! `cmdtree: ` prefix and become [`FAILURE`].

use std::io::{self, Write};

use tracing::{debug, warn};

use crate::args::Args;
use crate::command::{Code, Command, FAILURE};
use crate::error::{Error, Result};
use crate::flags::{Flag, Flags, help_flag};
use crate::validate::validate_tree;
use crate::walker::{Dispatch, Walker};

/// Prefix of every message written by the runner.
pub const MESSAGE_PREFIX: &str = "cmdtree: ";

/// Returns the process arguments, excluding the program name.
pub fn arguments() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// Everything a run needs, built by the caller before the run starts.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{Command, Configuration, Flag, Runner, SUCCESS};
///
/// let root = Command::new("tool")
///     .with_flag(Flag::string("name").with_short("n").required())
///     .with_handler(|ctx| {
///         assert_eq!(ctx.get_string("name")?, "carol");
///         Ok(SUCCESS)
///     });
///
/// let config = Configuration::new(root)
///     .with_arguments(["-n", "carol"])
///     .with_version("1.0.0")
///     .with_output(Vec::new());
/// assert_eq!(Runner::new(config).run(), SUCCESS);
/// ```
pub struct Configuration {
    arguments: Vec<String>,
    top: Command,
    globals: Flags,
    version: Option<String>,
    output: Option<Box<dyn Write>>,
}

impl Configuration {
    /// Creates a configuration with no arguments, no extra globals, no
    /// version, and stderr as output.
    pub fn new(top: Command) -> Self {
        Self {
            arguments: Vec::new(),
            top,
            globals: Flags::new(),
            version: None,
            output: None,
        }
    }

    /// Sets the raw tokens, in command-line order, without the program name.
    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a flag visible at every depth of the tree.
    pub fn with_global(mut self, flag: Flag) -> Self {
        self.globals.push(flag);
        self
    }

    /// Adds several flags visible at every depth of the tree.
    pub fn with_globals(mut self, flags: Flags) -> Self {
        self.globals.extend(flags);
        self
    }

    /// Sets the version shown in help output.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Sets the sink for help text and failure messages.
    pub fn with_output(mut self, output: impl Write + 'static) -> Self {
        self.output = Some(Box::new(output));
        self
    }
}

/// A configured, single-use run.
pub struct Runner {
    root: Command,
    args: Args,
    globals: Flags,
    version: Option<String>,
    output: Box<dyn Write>,
}

impl Runner {
    pub fn new(config: Configuration) -> Self {
        let mut globals = config.globals;
        globals.push(help_flag());
        Self {
            root: config.top,
            args: Args::new(config.arguments),
            globals,
            version: config.version,
            output: config.output.unwrap_or_else(|| Box::new(io::stderr())),
        }
    }

    /// Validates the tree, parses the arguments and dispatches to a handler.
    ///
    /// Returns the handler's code, [`SUCCESS`](crate::SUCCESS) after
    /// requested help, or [`FAILURE`] after any error.
    pub fn run(mut self) -> Code {
        match self.execute() {
            Ok(code) => code,
            Err(err) => {
                self.report(&err);
                FAILURE
            }
        }
    }

    fn execute(&mut self) -> Result<Code> {
        let violations = validate_tree(&self.root, &self.globals);
        if !violations.is_empty() {
            return Err(Error::Validation(violations));
        }

        let args = std::mem::take(&mut self.args);
        debug!(tokens = args.len(), "starting run");
        let walker = Walker::new(args, &self.globals, self.version.as_deref());
        match walker.walk(&self.root)? {
            Dispatch::Ran(code) => Ok(code),
            Dispatch::Help { text, code } => {
                writeln!(self.output, "{text}")?;
                self.output.flush()?;
                Ok(code)
            }
        }
    }

    /// Writes one prefixed line per failure; sink errors are only logged.
    fn report(&mut self, err: &Error) {
        let lines: Vec<String> = match err {
            Error::Validation(violations) => violations.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        };
        for line in lines {
            if let Err(write_err) = writeln!(self.output, "{MESSAGE_PREFIX}{line}") {
                warn!(error = %write_err, "unable to report failure");
                return;
            }
        }
        let _ = self.output.flush();
    }
}
