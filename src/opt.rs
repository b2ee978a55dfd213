//! Option capabilities and the typed option variants.
//!
//! An option plays several independent roles: it has a flag identity
//! ([`FlagOpt`]), it can be read ([`Getter`]) and written ([`Setter`]), and it
//! derives lookup keys for the environment ([`EnvOpt`]) and config file
//! ([`TomlOpt`]) sources. The parser only needs flag identity and the setter;
//! the sources only need the keys and the setter; listing only needs the
//! getter. [`Opt`] bundles all of them for storage in the registry.
//!
//! The concrete variants are all [`TypedOpt<T>`], parameterised by the value
//! type. The per-type conversion rules live in the [`OptValue`] impls:
//! strings accept anything, every other type validates its input.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::error::UconfError;
use crate::value::Value;

/// Shared, mutable handle to an option's value.
///
/// The registry and the caller hold clones of the same slot, so values applied
/// during parsing are visible through the caller's handle. Slots are
/// single-threaded (`Rc<RefCell<_>>`); copy values out with [`get`](Slot::get)
/// to share them across threads after parsing.
pub struct Slot<T>(Rc<RefCell<T>>);

impl<T> Slot<T> {
    pub fn new(value: T) -> Self {
        Slot(Rc::new(RefCell::new(value)))
    }

    /// Borrow the current value without copying it.
    ///
    /// Drop the returned guard before anything writes to the slot: a
    /// [`set`](Slot::set), a source being applied or a parse. Writing while a
    /// guard is alive panics. Use [`get`](Slot::get) when in doubt.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Replace the value. Panics if a guard from [`borrow`](Slot::borrow) is
    /// still alive.
    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }
}

impl<T: Clone> Slot<T> {
    /// Copy the current value out of the slot.
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Slot(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&*self.0.borrow()).finish()
    }
}

/// Identity of an option on the command line.
pub trait FlagOpt {
    /// Long flag name, matched against `--name`.
    fn flag(&self) -> &str;
    /// Short flag character, matched against `-x`.
    fn short_flag(&self) -> Option<char>;
    fn help(&self) -> &str;
    /// Boolean options are set to `true` by their mere presence.
    fn is_bool(&self) -> bool;
}

pub trait Getter {
    fn get(&self) -> Value;
}

pub trait Setter {
    fn set(&self, value: Value) -> Result<(), UconfError>;
}

/// Environment search key, without the application prefix.
///
/// For app `myapp` and an option whose `env()` is `LOG_LEVEL`, the
/// environment source looks up `MYAPP_LOG_LEVEL`.
pub trait EnvOpt: FlagOpt {
    fn env(&self) -> String {
        env_segment(self.flag())
    }
}

/// Config file search key: a dotted path into the TOML document.
pub trait TomlOpt: FlagOpt {
    fn toml(&self) -> String {
        self.flag().to_string()
    }
}

/// Everything the registry needs from an option.
pub trait Opt: FlagOpt + Getter + Setter + EnvOpt + TomlOpt {}

impl<O: FlagOpt + Getter + Setter + EnvOpt + TomlOpt> Opt for O {}

/// Uppercase a name and map `-`/`.` to `_`.
pub(crate) fn env_segment(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '-' | '.' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// A type that can back an option.
pub trait OptValue: Clone + 'static {
    const IS_BOOL: bool = false;

    fn to_value(&self) -> Value;

    /// Coerce an incoming value. The error is a human-readable reason.
    fn from_value(value: Value) -> Result<Self, String>;
}

fn mismatch(expected: &str, got: &Value) -> String {
    format!("expected {expected}, got {} '{got}'", got.kind())
}

impl OptValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    // Total: non-string input is stored in its display form.
    fn from_value(value: Value) -> Result<Self, String> {
        Ok(match value {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

impl OptValue for bool {
    const IS_BOOL: bool = true;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match &value {
            Value::Bool(b) => Ok(*b),
            Value::Int(0) => Ok(false),
            Value::Int(1) => Ok(true),
            Value::String(s) => match s.as_str() {
                "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
                "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
                _ => Err(mismatch("a boolean", &value)),
            },
            _ => Err(mismatch("a boolean", &value)),
        }
    }
}

impl OptValue for i64 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match &value {
            Value::Int(i) => Ok(*i),
            Value::String(s) => s.trim().parse().map_err(|_| mismatch("an integer", &value)),
            _ => Err(mismatch("an integer", &value)),
        }
    }
}

impl OptValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match &value {
            Value::Float(x) => Ok(*x),
            Value::Int(i) => Ok(*i as f64),
            Value::String(s) => s.trim().parse().map_err(|_| mismatch("a number", &value)),
            _ => Err(mismatch("a number", &value)),
        }
    }
}

impl OptValue for Duration {
    fn to_value(&self) -> Value {
        Value::Duration(*self)
    }

    /// Strings use humantime syntax (`"1h 30m"`); bare integers are seconds.
    fn from_value(value: Value) -> Result<Self, String> {
        match &value {
            Value::Duration(d) => Ok(*d),
            Value::Int(secs) if *secs >= 0 => Ok(Duration::from_secs(*secs as u64)),
            Value::String(s) => humantime::parse_duration(s.trim())
                .map_err(|e| format!("{}: {e}", mismatch("a duration", &value))),
            _ => Err(mismatch("a duration", &value)),
        }
    }
}

impl OptValue for Vec<String> {
    fn to_value(&self) -> Value {
        Value::List(self.clone())
    }

    /// Strings are split on `,`; other scalars become a one-element list.
    fn from_value(value: Value) -> Result<Self, String> {
        Ok(match value {
            Value::List(items) => items,
            Value::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect(),
            other => vec![other.to_string()],
        })
    }
}

/// An option backed by a slot of type `T`.
pub struct TypedOpt<T: OptValue> {
    name: String,
    short: Option<char>,
    help: String,
    slot: Slot<T>,
}

pub type StringOpt = TypedOpt<String>;
pub type BoolOpt = TypedOpt<bool>;
pub type IntOpt = TypedOpt<i64>;
pub type FloatOpt = TypedOpt<f64>;
pub type DurationOpt = TypedOpt<Duration>;
pub type ListOpt = TypedOpt<Vec<String>>;

impl<T: OptValue> TypedOpt<T> {
    /// A short name of `'\0'` is treated as "no short form".
    pub fn new(
        name: impl Into<String>,
        short: Option<char>,
        help: impl Into<String>,
        slot: Slot<T>,
    ) -> Self {
        Self {
            name: name.into(),
            short: short.filter(|c| *c != '\0'),
            help: help.into(),
            slot,
        }
    }

    pub fn slot(&self) -> &Slot<T> {
        &self.slot
    }
}

impl<T: OptValue> FlagOpt for TypedOpt<T> {
    fn flag(&self) -> &str {
        &self.name
    }

    fn short_flag(&self) -> Option<char> {
        self.short
    }

    fn help(&self) -> &str {
        &self.help
    }

    fn is_bool(&self) -> bool {
        T::IS_BOOL
    }
}

impl<T: OptValue> Getter for TypedOpt<T> {
    fn get(&self) -> Value {
        self.slot.borrow().to_value()
    }
}

impl<T: OptValue> Setter for TypedOpt<T> {
    fn set(&self, value: Value) -> Result<(), UconfError> {
        let parsed = T::from_value(value).map_err(|reason| UconfError::Conversion {
            key: self.name.clone(),
            reason,
        })?;
        self.slot.set(parsed);
        Ok(())
    }
}

impl<T: OptValue> EnvOpt for TypedOpt<T> {}

impl<T: OptValue> TomlOpt for TypedOpt<T> {}
