//! The option registry: registration, flag matching and key derivation.

use std::time::Duration;

use toml::Table;
use tracing::debug;

use crate::error::UconfError;
use crate::opt::{Opt, OptValue, Slot, TypedOpt, env_segment};

/// All options of one application, in registration order.
///
/// Options are registered once, then values are applied from the sources and
/// the command line. Parsing is single-threaded; see [`Slot`].
pub struct OptionSet {
    app_name: String,
    options: Vec<Box<dyn Opt>>,
    pub(crate) args: Vec<String>,
}

impl OptionSet {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            options: Vec::new(),
            args: Vec::new(),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Register an option.
    ///
    /// Fails if the long name or the short name is already taken, or if the
    /// long name is empty, contains `=` or starts with `-`.
    pub fn register(&mut self, opt: impl Opt + 'static) -> Result<(), UconfError> {
        let name = opt.flag();
        if name.is_empty() || name.contains('=') || name.starts_with('-') {
            return Err(UconfError::InvalidName(name.to_string()));
        }
        if self.find_long_flag(name).is_some() {
            return Err(UconfError::DuplicateOption(format!("--{name}")));
        }
        if let Some(short) = opt.short_flag() {
            if short == '-' || short == '=' {
                return Err(UconfError::InvalidName(format!("-{short}")));
            }
            if self.find_short_flag(short).is_some() {
                return Err(UconfError::DuplicateOption(format!("-{short}")));
            }
        }

        debug!(option = name, short = ?opt.short_flag(), "registered option");
        self.options.push(Box::new(opt));
        Ok(())
    }

    /// Register an option bound to a slot the caller already owns.
    pub fn bind<T: OptValue>(
        &mut self,
        slot: &Slot<T>,
        name: &str,
        short: impl Into<Option<char>>,
        help: &str,
    ) -> Result<(), UconfError> {
        self.register(TypedOpt::new(name, short.into(), help, slot.clone()))
    }

    /// Allocate a slot holding `default`, register it, and hand it back.
    pub fn add<T: OptValue>(
        &mut self,
        name: &str,
        short: impl Into<Option<char>>,
        default: T,
        help: &str,
    ) -> Result<Slot<T>, UconfError> {
        let slot = Slot::new(default);
        self.bind(&slot, name, short, help)?;
        Ok(slot)
    }

    pub fn string(
        &mut self,
        name: &str,
        short: impl Into<Option<char>>,
        default: &str,
        help: &str,
    ) -> Result<Slot<String>, UconfError> {
        self.add(name, short, default.to_string(), help)
    }

    pub fn bool(
        &mut self,
        name: &str,
        short: impl Into<Option<char>>,
        default: bool,
        help: &str,
    ) -> Result<Slot<bool>, UconfError> {
        self.add(name, short, default, help)
    }

    pub fn int(
        &mut self,
        name: &str,
        short: impl Into<Option<char>>,
        default: i64,
        help: &str,
    ) -> Result<Slot<i64>, UconfError> {
        self.add(name, short, default, help)
    }

    pub fn float(
        &mut self,
        name: &str,
        short: impl Into<Option<char>>,
        default: f64,
        help: &str,
    ) -> Result<Slot<f64>, UconfError> {
        self.add(name, short, default, help)
    }

    pub fn duration(
        &mut self,
        name: &str,
        short: impl Into<Option<char>>,
        default: Duration,
        help: &str,
    ) -> Result<Slot<Duration>, UconfError> {
        self.add(name, short, default, help)
    }

    pub fn list(
        &mut self,
        name: &str,
        short: impl Into<Option<char>>,
        default: &[&str],
        help: &str,
    ) -> Result<Slot<Vec<String>>, UconfError> {
        let items = default.iter().map(|s| s.to_string()).collect();
        self.add(name, short, items, help)
    }

    /// Find the option registered under a long name.
    pub fn find_long_flag(&self, name: &str) -> Option<&dyn Opt> {
        self.options
            .iter()
            .find(|opt| opt.flag() == name)
            .map(|opt| &**opt)
    }

    /// Find the option registered under a short name. `'\0'` never matches.
    pub fn find_short_flag(&self, short: char) -> Option<&dyn Opt> {
        if short == '\0' {
            return None;
        }
        self.options
            .iter()
            .find(|opt| opt.short_flag() == Some(short))
            .map(|opt| &**opt)
    }

    /// Registered options in registration order.
    pub fn options(&self) -> impl Iterator<Item = &dyn Opt> {
        self.options.iter().map(|opt| &**opt)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Positional arguments left over by the last successful parse.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Full environment variable name for an option: `{APP}_{OPTION}`.
    pub fn env_key(&self, opt: &dyn Opt) -> String {
        format!("{}_{}", env_segment(&self.app_name), opt.env())
    }

    /// Current values as a nested TOML table, keyed by each option's
    /// config key.
    ///
    /// An option whose path runs through another option's scalar value is
    /// left out.
    pub fn to_toml(&self) -> Table {
        let mut table = Table::new();
        for opt in self.options() {
            let key = opt.toml();
            let segments: Vec<&str> = key.split('.').collect();
            if !insert_nested(&mut table, &segments, opt.get().to_toml()) {
                debug!(option = %key, "path conflicts with a scalar option, skipped");
            }
        }
        table
    }
}

fn insert_nested(table: &mut Table, segments: &[&str], value: toml::Value) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return false;
    };
    if rest.is_empty() {
        table.insert(first.to_string(), value);
        return true;
    }
    match table
        .entry(*first)
        .or_insert_with(|| toml::Value::Table(Table::new()))
    {
        toml::Value::Table(sub) => insert_nested(sub, rest, value),
        _ => false,
    }
}
