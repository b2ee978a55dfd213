use std::collections::HashMap;

use tracing::debug;

use crate::error::UconfError;
use crate::registry::OptionSet;
use crate::value::Value;

/// Apply environment variables to the options of `set`.
///
/// Each option is looked up under [`OptionSet::env_key`], e.g. `MYAPP_PORT`
/// for option `port` of app `myapp`. Found values are handed to the option's
/// setter as raw strings, so typed options validate them. Empty values are
/// treated as unset.
///
/// Takes an iterator so tests can pass synthetic data instead of
/// `std::env::vars()`. Returns the number of options that received a value.
pub fn apply_env(
    set: &OptionSet,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Result<usize, UconfError> {
    let vars: HashMap<String, String> = vars.into_iter().collect();
    let mut applied = 0;

    for opt in set.options() {
        let key = set.env_key(opt);
        let Some(raw) = vars.get(&key) else {
            continue;
        };
        if raw.is_empty() {
            debug!(env = %key, "empty environment value ignored");
            continue;
        }
        debug!(env = %key, option = opt.flag(), "applying environment value");
        opt.set(Value::String(raw.clone()))?;
        applied += 1;
    }

    Ok(applied)
}
