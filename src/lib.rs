//! Typed options fed from command-line flags, environment variables and a
//! TOML config file, with the command line taking precedence.
//!
//! Register each option once on an [`OptionSet`]. Registration hands back a
//! [`Slot`], a shared handle to the option's value; every source writes
//! through it, so after loading the slot holds the resolved value.
//!
//! ```ignore
//! let mut opts = OptionSet::new("myapp");
//! let host = opts.string("host", None, "localhost", "Host to bind")?;
//! let port = opts.int("port", 'p', 8080, "Port to listen on")?;
//! let verbose = opts.bool("verbose", 'v', false, "Enable verbose output")?;
//!
//! Loader::new().add_search_path(SearchPath::Cwd).load_process(&mut opts)?;
//!
//! println!("{}:{} (verbose: {})", host.get(), port.get(), verbose.get());
//! for arg in opts.args() { /* positional arguments */ }
//! ```
//!
//! # Layer precedence
//!
//! ```text
//! Compiled defaults     opts.int("port", 'p', 8080, ...)
//!        ↑ overridden by
//! Config files          myapp.toml in each search path, later paths win
//!        ↑ overridden by
//! Environment vars      MYAPP_PORT
//!        ↑ overridden by
//! Command line          --port 9000, --port=9000, -p 9000, -p9000
//! ```
//!
//! Every layer is sparse: a source only touches the options it mentions.
//! The layers are applied in that order, so a flag given on the command line
//! always wins.
//!
//! # Command-line syntax
//!
//! - `--name value` and `--name=value` for any option.
//! - `--flag` sets a boolean option to `true` without consuming the next
//!   token; `--flag=false` sets it explicitly.
//! - `-x value` and `-xvalue` for short names. Boolean short flags cluster:
//!   `-abc` is `-a -b -c`, and a cluster may end in a value-taking flag
//!   (`-vofile` is `-v -o file`).
//! - A bare `--` ends option parsing. Everything that is not a flag,
//!   including a bare `-`, is collected into [`OptionSet::args`].
//! - A value in its own token must not start with `-`; write `--n=-5` or
//!   `-i-` instead.
//!
//! Parsing never prints or exits. Unknown flags, missing values and values
//! an option cannot convert are reported as [`UconfError`] and left to the
//! caller to display.
//!
//! # Keys
//!
//! An option's name is its long flag, its config file key and the base of its
//! environment variable:
//!
//! | Option name | Flag | Config key | Env var (app `myapp`) |
//! |---|---|---|---|
//! | `port` | `--port` | `port` | `MYAPP_PORT` |
//! | `log.level` | `--log.level` | `[log] level` | `MYAPP_LOG_LEVEL` |
//! | `dry-run` | `--dry-run` | `dry-run` | `MYAPP_DRY_RUN` |
//!
//! # Option types
//!
//! Strings, booleans, integers, floats, durations (humantime syntax such as
//! `"1h 30m"`) and comma-separated string lists are supported out of the
//! box. String options accept any input; the others validate and reject
//! values they cannot convert. Custom types implement [`OptValue`] and
//! register through [`OptionSet::add`] or [`OptionSet::bind`].
//!
//! # Threading
//!
//! Slots are single-threaded. Resolve on one thread, then copy values out
//! with [`Slot::get`] if other threads need them.

pub mod config;
pub mod env;
pub mod error;
pub mod help;
pub mod types;

mod builder;
mod file;
mod opt;
mod parse;
mod registry;
mod resolve;
mod value;

#[cfg(test)]
mod fixtures;

pub use builder::Loader;
pub use error::UconfError;
pub use file::load_config_files;
pub use opt::{
    BoolOpt, DurationOpt, EnvOpt, FlagOpt, FloatOpt, Getter, IntOpt, ListOpt, Opt, OptValue,
    Setter, Slot, StringOpt, TomlOpt, TypedOpt,
};
pub use registry::OptionSet;
pub use resolve::{ResolveInput, resolve};
pub use types::{SearchMode, SearchPath};
pub use value::Value;
