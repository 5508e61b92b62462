//! Declarative command trees and typed flag parsing.
//!
//! This crate turns a flat list of command-line tokens into a resolved leaf
//! command plus a typed bag of flag values:
//!
//! - [`Command`]: a node of the tree: name, help, description, flags, and
//!   either child commands (branch) or a handler (leaf).
//! - [`Flag`]: a flag with long and/or short names, a [`FlagKind`]
//!   (string, integer, boolean, duration), and required/repeats/default
//!   settings.
//! - [`Args`]: the move-only token stack consumed during a run.
//! - [`Values`]: the per-run value store shared by the whole descent.
//! - [`Context`]: what a leaf handler sees: typed accessors such as
//!   [`Context::get_string`] and [`Context::get_ints`].
//!
//! Validation ([`validate_tree`]) rejects malformed names before any token is
//! consumed. [`Runner::run`] is the single entry point and the only place
//! where errors are turned into a result code.
//!
//! # Example
//!
//! ```
//! use cmdtree_core::*;
//!
//! let root = Command::new("tool").with_command(
//!     Command::new("ages")
//!         .with_flag(Flag::int("age").with_short("a").allow_repeats())
//!         .with_handler(|ctx| {
//!             assert_eq!(ctx.get_ints("age")?, vec![20, 30, 40, 50]);
//!             Ok(SUCCESS)
//!         }),
//! );
//!
//! let config = Configuration::new(root)
//!     .with_arguments(["ages", "-a", "20", "--age", "30", "--age=40", "-a", "50"])
//!     .with_output(std::io::sink());
//! assert_eq!(Runner::new(config).run(), SUCCESS);
//! ```

mod args;
mod command;
mod error;
mod flags;
mod help;
mod runner;
mod validate;
mod values;
mod walker;

pub use args::Args;
pub use command::{Code, Command, Context, FAILURE, Handler, SUCCESS};
pub use error::{Error, Result};
pub use flags::{Flag, FlagKind, Flags, Value, help_flag};
pub use help::render as render_help;
pub use runner::{Configuration, MESSAGE_PREFIX, Runner, arguments};
pub use validate::{ValidationError, validate_command, validate_tree};
pub use values::{FlagType, Values};
pub use walker::{Dispatch, Walker};
