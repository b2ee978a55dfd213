use std::path::PathBuf;

/// Where to look for `{app}.toml`.
///
/// A [`Loader`](crate::Loader) checks each entry for the one config file
/// name it was given; entries further down the list override earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// The per-user config directory for the app name, as reported by the
    /// `directories` crate (`~/.config/{app}` on Linux).
    Platform,
    /// A directory relative to `$HOME`, such as `Home(".myapp")` for
    /// `~/.myapp/myapp.toml`.
    Home(&'static str),
    /// The process working directory at load time.
    Cwd,
    /// A directory supplied by the caller, used verbatim.
    Path(PathBuf),
}

/// How many of the files found are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Every file found, in search-path order, each overriding the last.
    #[default]
    Merge,
    /// Only the file from the last search path that has one.
    FirstMatch,
}
