use clap::Args;
use serde::Serialize;

use relconf::discover::{self, ConfigFormat};
use relconf::validate::{check, Problem};

use super::{CmdResult, LocateArgs};

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    locate: LocateArgs,
}

#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    pub command: &'static str,
    pub path: String,
    pub format: ConfigFormat,
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<Problem>,
}

pub fn run(args: ValidateArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ValidateOutput> {
    let found = args.locate.resolve()?;
    let config = discover::load(&found)?;

    let problems = check(&config);
    let valid = problems.is_empty();

    // Invalid records are reported in the success envelope with the full
    // problem list, but still exit non-zero for scripting.
    let exit_code = if valid { 0 } else { 2 };

    Ok((
        ValidateOutput {
            command: "validate",
            path: found.path.display().to_string(),
            format: found.format,
            valid,
            problems,
        },
        exit_code,
    ))
}
