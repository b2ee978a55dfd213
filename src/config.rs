//! Config file source: look option values up in a TOML document.
//!
//! Each option's [`toml()`](crate::TomlOpt::toml) key is a dotted path:
//! `log.level` is the `level` key of the `[log]` table. Keys that no option
//! asks for are ignored.

use std::path::Path;

use toml::{Table, Value as TomlValue};
use tracing::debug;

use crate::error::UconfError;
use crate::registry::OptionSet;
use crate::value::Value;

/// Parse TOML content, attributing errors to `path`.
pub fn parse_config(content: &str, path: &Path) -> Result<Table, UconfError> {
    toml::from_str(content).map_err(|e| UconfError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Apply the values found in `table` to the options of `set`.
///
/// Returns the number of options that received a value.
pub fn apply_table(set: &OptionSet, table: &Table) -> Result<usize, UconfError> {
    let mut applied = 0;
    for opt in set.options() {
        let key = opt.toml();
        let Some(value) = table_get(table, &key).and_then(Value::from_toml) else {
            continue;
        };
        debug!(key = %key, "applying config file value");
        opt.set(value)?;
        applied += 1;
    }
    Ok(applied)
}

/// Navigate a table by dotted key path.
pub fn table_get<'a>(table: &'a Table, dotted_key: &str) -> Option<&'a TomlValue> {
    let mut segments = dotted_key.split('.');
    let first = segments.next()?;
    segments.try_fold(table.get(first)?, |current, segment| {
        current.as_table()?.get(segment)
    })
}
