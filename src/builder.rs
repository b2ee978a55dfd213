use crate::error::UconfError;
use crate::file;
use crate::registry::OptionSet;
use crate::resolve::{self, ResolveInput};
use crate::types::{SearchMode, SearchPath};

/// Gathers config files, environment variables and the argument vector, then
/// resolves them into an [`OptionSet`].
///
/// ```ignore
/// let mut opts = OptionSet::new("myapp");
/// let port = opts.int("port", 'p', 8080, "Port to listen on")?;
/// Loader::new()
///     .add_search_path(SearchPath::Cwd)
///     .load_process(&mut opts)?;
/// ```
#[derive(Debug, Clone)]
pub struct Loader {
    file_name: Option<String>,
    search_paths: Option<Vec<SearchPath>>,
    search_mode: SearchMode,
    env_enabled: bool,
    files_enabled: bool,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    pub fn new() -> Self {
        Self {
            file_name: None,
            search_paths: None,
            search_mode: SearchMode::default(),
            env_enabled: true,
            files_enabled: true,
        }
    }

    /// Override the config file name (default: `"{app_name}.toml"`).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Replace the default search paths (`[Platform]`) entirely.
    ///
    /// Paths are listed in priority-ascending order.
    pub fn search_paths(mut self, paths: Vec<SearchPath>) -> Self {
        self.search_paths = Some(paths);
        self
    }

    /// Append a search path, starting from the default `[Platform]` if no
    /// paths have been set yet.
    pub fn add_search_path(mut self, path: SearchPath) -> Self {
        self.search_paths
            .get_or_insert_with(|| vec![SearchPath::Platform])
            .push(path);
        self
    }

    pub fn search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    /// Skip the environment source.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Skip the config file source.
    pub fn no_files(mut self) -> Self {
        self.files_enabled = false;
        self
    }

    fn effective_file_name(&self, app_name: &str) -> String {
        match &self.file_name {
            Some(name) => name.clone(),
            None => format!("{app_name}.toml"),
        }
    }

    fn effective_search_paths(&self) -> Vec<SearchPath> {
        match &self.search_paths {
            Some(paths) => paths.clone(),
            None => vec![SearchPath::Platform],
        }
    }

    fn build_input(&self, set: &OptionSet, args: Vec<String>) -> Result<ResolveInput, UconfError> {
        let files = if self.files_enabled {
            let app_name = set.app_name();
            file::load_config_files(
                &self.effective_search_paths(),
                &self.effective_file_name(app_name),
                app_name,
                self.search_mode,
            )?
        } else {
            Vec::new()
        };

        let env_vars = self.env_enabled.then(|| std::env::vars().collect());

        Ok(ResolveInput {
            files,
            env_vars,
            args,
        })
    }

    /// Resolve `set` from config files, the environment, and `args`
    /// (without the program name).
    pub fn load<I, S>(&self, set: &mut OptionSet, args: I) -> Result<(), UconfError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.into_iter().map(Into::into).collect();
        let input = self.build_input(set, args)?;
        resolve::resolve(set, input)
    }

    /// Like [`load`](Self::load), reading the process's own arguments.
    pub fn load_process(&self, set: &mut OptionSet) -> Result<(), UconfError> {
        self.load(set, std::env::args().skip(1))
    }
}
