//! Flag declarations and the per-command flag registry.
//!
//! A [`Flag`] has a long name (e.g. `name` for `--name`), a short name
//! (e.g. `n` for `-n`), or both, plus a [`FlagKind`] that decides how its
//! value is consumed. Declarations are plain data and derive serde traits so
//! a flag table can be loaded from JSON.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Value kind accepted by a flag.
///
/// # Examples
///
/// ```
/// use cmdtree_core::FlagKind;
///
/// assert_eq!(FlagKind::Int.to_string(), "integer");
/// assert_eq!(FlagKind::Int.label(), "int");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    String,
    Int,
    Bool,
    Duration,
}

impl FlagKind {
    /// Short name used in error messages (`string`, `int`, `boolean`,
    /// `duration`).
    pub fn label(self) -> &'static str {
        match self {
            FlagKind::String => "string",
            FlagKind::Int => "int",
            FlagKind::Bool => "boolean",
            FlagKind::Duration => "duration",
        }
    }
}

/// Help-text name of the kind.
impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlagKind::String => "string",
            FlagKind::Int => "integer",
            FlagKind::Bool => "boolean",
            FlagKind::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// A typed flag value, used for declared defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    Duration(Duration),
}

impl Value {
    pub fn kind(&self) -> FlagKind {
        match self {
            Value::String(_) => FlagKind::String,
            Value::Int(_) => FlagKind::Int,
            Value::Bool(_) => FlagKind::Bool,
            Value::Duration(_) => FlagKind::Duration,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Value::Duration(value)
    }
}

/// Declaration of a single flag.
///
/// Use the kind constructors ([`string`](Flag::string), [`int`](Flag::int),
/// [`bool`](Flag::bool), [`duration`](Flag::duration)) and chain builder
/// methods.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{Flag, FlagKind};
///
/// let name = Flag::string("name")
///     .with_short("n")
///     .required()
///     .with_help("who to greet");
/// assert_eq!(name.identity(), "name");
/// assert!(name.is("n"));
/// assert!(name.is("name"));
/// assert_eq!(name.kind, FlagKind::String);
///
/// let short_only = Flag::short_only(FlagKind::Bool, "q");
/// assert_eq!(short_only.identity(), "q");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    /// Kind of value this flag accepts
    pub kind: FlagKind,
    /// Long name without dashes (e.g. "name" for `--name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Short name without dash (e.g. "n" for `-n`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    /// Fail when no value and no default is available
    #[serde(default)]
    pub required: bool,
    /// May appear more than once; read with the plural accessors
    #[serde(default)]
    pub repeats: bool,
    /// Value used when the flag is absent from the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// One-line help text
    #[serde(default)]
    pub help: String,
}

impl Flag {
    /// Creates a flag with a long name.
    pub fn new(kind: FlagKind, long: &str) -> Self {
        Self {
            kind,
            long: Some(long.to_string()),
            short: None,
            required: false,
            repeats: false,
            default: None,
            help: String::new(),
        }
    }

    /// Creates a flag that only has a short name.
    pub fn short_only(kind: FlagKind, short: &str) -> Self {
        Self {
            long: None,
            short: Some(short.to_string()),
            ..Self::new(kind, "")
        }
    }

    pub fn string(long: &str) -> Self {
        Self::new(FlagKind::String, long)
    }

    pub fn int(long: &str) -> Self {
        Self::new(FlagKind::Int, long)
    }

    pub fn bool(long: &str) -> Self {
        Self::new(FlagKind::Bool, long)
    }

    pub fn duration(long: &str) -> Self {
        Self::new(FlagKind::Duration, long)
    }

    /// Adds a one-character short name.
    pub fn with_short(mut self, short: &str) -> Self {
        self.short = Some(short.to_string());
        self
    }

    /// Adds help text.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    /// Sets the default value. A default of another kind is rejected by
    /// validation before the run starts.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the flag as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the flag as repeatable.
    pub fn allow_repeats(mut self) -> Self {
        self.repeats = true;
        self
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref().filter(|long| !long.is_empty())
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short.as_deref().filter(|short| !short.is_empty())
    }

    /// Returns the lookup key: long name preferred, short name otherwise.
    pub fn identity(&self) -> &str {
        self.long_name().or(self.short_name()).unwrap_or_default()
    }

    /// Checks whether `name` (without dashes) refers to this flag.
    ///
    /// A one-character name only matches the short name; anything longer
    /// only matches the long name.
    pub fn is(&self, name: &str) -> bool {
        if name.chars().count() == 1 {
            self.short_name() == Some(name)
        } else {
            self.long_name() == Some(name)
        }
    }

    /// Flag syntax column for help output (e.g. `--name/-n`).
    pub(crate) fn syntax(&self) -> String {
        match (self.long_name(), self.short_name()) {
            (Some(long), Some(short)) => format!("--{long}/-{short}"),
            (Some(long), None) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => String::new(),
        }
    }
}

/// Built-in global flag that requests help output.
pub fn help_flag() -> Flag {
    Flag::bool("help")
        .with_short("h")
        .with_help("print help message")
}

/// Ordered collection of flag declarations.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{Flag, Flags};
///
/// let flags: Flags = vec![Flag::int("age").with_short("a")].into();
/// assert!(flags.contains("age"));
/// assert!(flags.contains("a"));
/// assert!(flags.get("missing").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flags(Vec<Flag>);

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, flag: Flag) {
        self.0.push(flag);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|flag| flag.is(name))
    }

    pub fn find(&self, name: &str) -> Option<&Flag> {
        self.0.iter().find(|flag| flag.is(name))
    }

    /// Returns the flag matching `name`, or [`Error::UndefinedFlag`].
    pub fn get(&self, name: &str) -> Result<&Flag> {
        self.find(name)
            .ok_or_else(|| Error::UndefinedFlag(name.to_string()))
    }
}

impl From<Vec<Flag>> for Flags {
    fn from(flags: Vec<Flag>) -> Self {
        Self(flags)
    }
}

impl FromIterator<Flag> for Flags {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Flag> for Flags {
    fn extend<I: IntoIterator<Item = Flag>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Flags {
    type Item = Flag;
    type IntoIter = std::vec::IntoIter<Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Flags {
    type Item = &'a Flag;
    type IntoIter = std::slice::Iter<'a, Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_prefers_long() {
        let flag = Flag::string("name").with_short("n");
        assert_eq!(flag.identity(), "name");

        let flag = Flag::short_only(FlagKind::String, "n");
        assert_eq!(flag.identity(), "n");
    }

    #[test]
    fn test_is_matches_by_length() {
        let flag = Flag::int("age").with_short("a");
        assert!(flag.is("a"));
        assert!(flag.is("age"));
        assert!(!flag.is("ag"));

        // A long name of one character is never matched; validation rejects it.
        let odd = Flag::int("x");
        assert!(!odd.is("x"));
    }

    #[test]
    fn test_get_undefined_flag() {
        let flags: Flags = vec![Flag::bool("force")].into();
        let err = flags.get("verbose").unwrap_err();
        assert_eq!(err.to_string(), r#"flag "verbose" is not defined"#);
    }

    #[test]
    fn test_syntax_column() {
        assert_eq!(Flag::string("name").with_short("n").syntax(), "--name/-n");
        assert_eq!(Flag::string("name").syntax(), "--name");
        assert_eq!(Flag::short_only(FlagKind::Bool, "q").syntax(), "-q");
    }

    #[test]
    fn test_flags_deserialize_from_json() {
        let raw = r#"[
            {"kind": "string", "long": "name", "short": "n", "required": true},
            {"kind": "duration", "long": "ttl", "default": {"kind": "duration", "value": {"secs": 90, "nanos": 0}}},
            {"kind": "int", "short": "a", "repeats": true, "help": "ages"}
        ]"#;
        let flags: Flags = serde_json::from_str(raw).unwrap();

        assert_eq!(flags.len(), 3);
        let name = flags.get("n").unwrap();
        assert!(name.required);
        assert_eq!(name.kind, FlagKind::String);

        let ttl = flags.get("ttl").unwrap();
        assert_eq!(ttl.default, Some(Value::Duration(Duration::from_secs(90))));

        let age = flags.get("a").unwrap();
        assert_eq!(age.identity(), "a");
        assert!(age.repeats);
        assert_eq!(age.help, "ages");
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(Value::from("x").kind(), FlagKind::String);
        assert_eq!(Value::from(3_i64).kind(), FlagKind::Int);
        assert_eq!(Value::from(true).kind(), FlagKind::Bool);
        assert_eq!(
            Value::from(Duration::from_secs(1)).kind(),
            FlagKind::Duration
        );
    }
}
