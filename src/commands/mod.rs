use clap::Args;
use std::env;
use std::path::PathBuf;

use relconf::discover::DiscoveredConfig;

pub type CmdResult<T> = relconf::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

/// Shared locator arguments for commands that read an existing record.
#[derive(Args, Default, Debug)]
pub struct LocateArgs {
    /// Directory to search for a release configuration (defaults to cwd)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Explicit configuration file (skips filename discovery)
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl LocateArgs {
    pub fn search_dir(&self) -> relconf::Result<PathBuf> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => env::current_dir().map_err(|e| {
                relconf::Error::internal_io(
                    e.to_string(),
                    Some("resolve current directory".to_string()),
                )
            }),
        }
    }

    pub fn resolve(&self) -> relconf::Result<DiscoveredConfig> {
        let dir = self.search_dir()?;
        relconf::discover::resolve(&dir, self.file.as_deref())
    }
}

pub mod init;
pub mod path;
pub mod show;
pub mod validate;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run_json($args))
    };
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (relconf::Result<serde_json::Value>, i32) {
    match command {
        // Commands without global context
        crate::Commands::Init(args) => dispatch!(args, init),

        // Commands with global context
        crate::Commands::Show(args) => dispatch!(args, global, show),
        crate::Commands::Validate(args) => dispatch!(args, global, validate),
        crate::Commands::Path(args) => dispatch!(args, global, path),
    }
}
