use clap::Args;
use serde::Serialize;

use relconf::discover::{self, ConfigFormat};
use relconf::record::ReleaseConfig;

use super::{CmdResult, LocateArgs};

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    locate: LocateArgs,
}

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub command: &'static str,
    pub path: String,
    pub format: ConfigFormat,
    pub config: ReleaseConfig,
}

pub fn run(args: ShowArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ShowOutput> {
    let found = args.locate.resolve()?;
    let config = discover::load(&found)?;

    relconf::log_status!("show", "Loaded {}", found.path.display());

    Ok((
        ShowOutput {
            command: "show",
            path: found.path.display().to_string(),
            format: found.format,
            config,
        },
        0,
    ))
}
