//! Resolution pipeline: apply every source to the registry in precedence order.
//!
//! Operates on pre-loaded data ([`ResolveInput`]) with no I/O, so the whole
//! pipeline is testable with synthetic inputs. Sources are applied lowest
//! priority first, each one overwriting what came before:
//!
//! 1. compiled defaults (already in the slots)
//! 2. config files, in search order
//! 3. environment variables
//! 4. command-line flags
//!
//! The command line is applied last, so a flag the user passed is never
//! overridden by a weaker source.

use std::path::PathBuf;

use tracing::debug;

use crate::config;
use crate::env;
use crate::error::UconfError;
use crate::registry::OptionSet;

/// All pre-loaded data needed to resolve a registry.
#[derive(Debug, Default)]
pub struct ResolveInput {
    /// File contents in precedence order: first = lowest priority.
    pub files: Vec<(PathBuf, String)>,
    /// Raw environment pairs. `None` disables the environment source.
    pub env_vars: Option<Vec<(String, String)>>,
    /// Argument vector without the program name.
    pub args: Vec<String>,
}

pub fn resolve(set: &mut OptionSet, input: ResolveInput) -> Result<(), UconfError> {
    for (path, content) in &input.files {
        let table = config::parse_config(content, path)?;
        let applied = config::apply_table(set, &table)?;
        debug!(path = %path.display(), applied, "config file applied");
    }

    if let Some(vars) = input.env_vars {
        let applied = env::apply_env(set, vars)?;
        debug!(applied, "environment applied");
    }

    set.parse_flags(input.args)
}
