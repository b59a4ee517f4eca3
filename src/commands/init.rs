use clap::Args;
use serde::Serialize;
use std::env;
use std::path::PathBuf;

use relconf::record::ReleaseConfig;
use relconf::scaffold::{self, ScaffoldFormat};

use super::CmdResult;

#[derive(Args)]
pub struct InitArgs {
    /// Source repository URL for the new record
    #[arg(long, value_name = "URL")]
    pub repository_url: String,

    /// Release branch (repeatable; defaults to 'main')
    #[arg(long = "branch", value_name = "BRANCH")]
    pub branches: Vec<String>,

    /// Plugin identifier (repeatable; defaults to the standard set)
    #[arg(long = "plugin", value_name = "PLUGIN")]
    pub plugins: Vec<String>,

    /// Write .releaserc.yaml instead of .releaserc.json
    #[arg(long)]
    pub yaml: bool,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,

    /// Directory to write into (defaults to cwd)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub command: &'static str,
    pub path: String,
    pub created: bool,
    pub config: ReleaseConfig,
}

pub fn run_json(args: InitArgs) -> CmdResult<InitOutput> {
    let dir = match args.dir {
        Some(dir) => dir,
        None => env::current_dir().map_err(|e| {
            relconf::Error::internal_io(
                e.to_string(),
                Some("resolve current directory".to_string()),
            )
        })?,
    };

    // starter() fills the default branch and plugin set; flags override.
    let mut config = ReleaseConfig::starter(args.repository_url);
    if !args.branches.is_empty() {
        config.branches = args.branches;
    }
    if !args.plugins.is_empty() {
        config.plugins = args.plugins;
    }

    let format = if args.yaml {
        ScaffoldFormat::Yaml
    } else {
        ScaffoldFormat::Json
    };

    let path = scaffold::write_record(&dir, &config, format, args.force)?;

    Ok((
        InitOutput {
            command: "init",
            path: path.display().to_string(),
            created: true,
            config,
        },
        0,
    ))
}
