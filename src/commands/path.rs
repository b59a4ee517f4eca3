use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use relconf::discover;

use super::CmdResult;

#[derive(Args)]
pub struct PathArgs {
    /// Directory to search for a release configuration (defaults to cwd)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct PathOutput {
    pub command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub exists: bool,
    pub searched: Vec<String>,
}

pub fn run(args: PathArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<PathOutput> {
    let dir = super::LocateArgs {
        dir: args.dir,
        file: None,
    }
    .search_dir()?;

    let (path, exists) = match discover::discover(&dir) {
        Ok(found) => (Some(found.path.display().to_string()), true),
        Err(_) => (None, false),
    };

    Ok((
        PathOutput {
            command: "path",
            path,
            exists,
            searched: discover::candidate_names(),
        },
        0,
    ))
}
