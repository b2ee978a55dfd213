//! Help text and value listing, both in registration order.

use std::fmt;

use crate::registry::OptionSet;

/// Render a usage line followed by one line per option.
///
/// ```text
/// Usage: myapp [OPTIONS] [ARGS]...
///
/// Options:
///   -v, --verbose        Enable verbose output. [env: MYAPP_VERBOSE]
///       --host <value>   Host to bind. [env: MYAPP_HOST]
/// ```
pub fn render(set: &OptionSet) -> String {
    let mut out = format!("Usage: {} [OPTIONS] [ARGS]...\n", set.app_name());
    if set.is_empty() {
        return out;
    }

    let rows: Vec<(String, String)> = set
        .options()
        .map(|opt| {
            let short = match opt.short_flag() {
                Some(c) => format!("-{c}, "),
                None => "    ".to_string(),
            };
            let value = if opt.is_bool() { "" } else { " <value>" };
            let left = format!("{short}--{}{value}", opt.flag());

            let right = if opt.help().is_empty() {
                format!("[env: {}]", set.env_key(opt))
            } else {
                format!("{} [env: {}]", opt.help(), set.env_key(opt))
            };
            (left, right)
        })
        .collect();

    let width = rows.iter().map(|(left, _)| left.chars().count()).max().unwrap_or(0);
    out.push_str("\nOptions:\n");
    for (left, right) in rows {
        out.push_str(&format!("  {left:<width$}  {right}\n"));
    }
    out
}

/// Current value of every option.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub entries: Vec<(String, String)>,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}

pub fn listing(set: &OptionSet) -> Listing {
    let entries = set
        .options()
        .map(|opt| (opt.flag().to_string(), opt.get().to_string()))
        .collect();
    Listing { entries }
}
