//! Per-run value store.
//!
//! Values are appended in command-line order under the flag identity and
//! never overwritten. Singular and plural accessors are both built on top of
//! this one accumulation model.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::flags::{Flag, FlagKind, Value};

mod sealed {
    pub trait Sealed {}
    impl Sealed for String {}
    impl Sealed for i64 {}
    impl Sealed for bool {}
    impl Sealed for std::time::Duration {}
}

/// Rust type backing one [`FlagKind`].
///
/// Implemented for `String`, `i64`, `bool` and [`Duration`]; the zero value
/// returned for an absent optional flag is the type's `Default`.
pub trait FlagType: Clone + Default + sealed::Sealed {
    const KIND: FlagKind;

    #[doc(hidden)]
    fn slot(values: &Values) -> &HashMap<String, Vec<Self>>;

    #[doc(hidden)]
    fn slot_mut(values: &mut Values) -> &mut HashMap<String, Vec<Self>>;

    #[doc(hidden)]
    fn from_value(value: &Value) -> Option<Self>;
}

impl FlagType for String {
    const KIND: FlagKind = FlagKind::String;

    fn slot(values: &Values) -> &HashMap<String, Vec<Self>> {
        &values.strings
    }

    fn slot_mut(values: &mut Values) -> &mut HashMap<String, Vec<Self>> {
        &mut values.strings
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FlagType for i64 {
    const KIND: FlagKind = FlagKind::Int;

    fn slot(values: &Values) -> &HashMap<String, Vec<Self>> {
        &values.ints
    }

    fn slot_mut(values: &mut Values) -> &mut HashMap<String, Vec<Self>> {
        &mut values.ints
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FlagType for bool {
    const KIND: FlagKind = FlagKind::Bool;

    fn slot(values: &Values) -> &HashMap<String, Vec<Self>> {
        &values.bools
    }

    fn slot_mut(values: &mut Values) -> &mut HashMap<String, Vec<Self>> {
        &mut values.bools
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FlagType for Duration {
    const KIND: FlagKind = FlagKind::Duration;

    fn slot(values: &Values) -> &HashMap<String, Vec<Self>> {
        &values.durations
    }

    fn slot_mut(values: &mut Values) -> &mut HashMap<String, Vec<Self>> {
        &mut values.durations
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Duration(d) => Some(*d),
            _ => None,
        }
    }
}

/// Flag values collected during one run, keyed by flag identity.
#[derive(Debug, Default)]
pub struct Values {
    strings: HashMap<String, Vec<String>>,
    ints: HashMap<String, Vec<i64>>,
    bools: HashMap<String, Vec<bool>>,
    durations: HashMap<String, Vec<Duration>>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value for `identity`.
    pub fn record<T: FlagType>(&mut self, identity: &str, value: T) {
        T::slot_mut(self)
            .entry(identity.to_string())
            .or_default()
            .push(value);
    }

    /// Values recorded for `identity`, in command-line order.
    pub fn recorded<T: FlagType>(&self, identity: &str) -> &[T] {
        T::slot(self)
            .get(identity)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns true when at least one value of any kind was recorded.
    pub fn is_set(&self, identity: &str) -> bool {
        self.strings.contains_key(identity)
            || self.ints.contains_key(identity)
            || self.bools.contains_key(identity)
            || self.durations.contains_key(identity)
    }

    /// Returns true once any `help` value in the chain is true.
    pub fn help_requested(&self) -> bool {
        self.recorded::<bool>("help").iter().any(|set| *set)
    }

    /// Resolves the single value of `flag`.
    ///
    /// Zero recorded values fall back to the default, then fail if the flag is
    /// required, then return the zero value. More than one recorded value is
    /// an error even for repeating flags.
    pub fn one<T: FlagType>(&self, flag: &Flag) -> Result<T> {
        check_kind::<T>(flag)?;
        let identity = flag.identity();
        match self.recorded::<T>(identity) {
            [] => match default_of::<T>(flag) {
                Some(value) => Ok(value),
                None if flag.required => Err(Error::MissingValue {
                    kind: T::KIND,
                    identity: identity.to_string(),
                }),
                None => Ok(T::default()),
            },
            [value] => Ok(value.clone()),
            _ => Err(Error::MultipleValues {
                kind: T::KIND,
                identity: identity.to_string(),
            }),
        }
    }

    /// Resolves every value of `flag` as an owned copy.
    pub fn many<T: FlagType>(&self, flag: &Flag) -> Result<Vec<T>> {
        check_kind::<T>(flag)?;
        let identity = flag.identity();
        let recorded = self.recorded::<T>(identity);
        if !recorded.is_empty() {
            return Ok(recorded.to_vec());
        }
        match default_of::<T>(flag) {
            Some(value) => Ok(vec![value]),
            None if flag.required => Err(Error::MissingValue {
                kind: T::KIND,
                identity: identity.to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }
}

fn check_kind<T: FlagType>(flag: &Flag) -> Result<()> {
    if flag.kind == T::KIND {
        Ok(())
    } else {
        Err(Error::KindMismatch {
            identity: flag.identity().to_string(),
            actual: flag.kind,
            requested: T::KIND,
        })
    }
}

fn default_of<T: FlagType>(flag: &Flag) -> Option<T> {
    flag.default.as_ref().and_then(T::from_value)
}
