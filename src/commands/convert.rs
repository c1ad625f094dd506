use clap::Args;
use serde::Serialize;

use kebab_shop::refactor;
use kebab_shop::Error;

use crate::commands::CmdResult;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// File names to convert (nothing on disk is read or changed)
    names: Vec<String>,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ConvertOutput {
    #[serde(rename = "convert")]
    Convert { conversions: Vec<Conversion> },
}

#[derive(Serialize)]
pub struct Conversion {
    pub input: String,
    pub output: String,
    pub changed: bool,
}

pub fn run(args: ConvertArgs) -> CmdResult<ConvertOutput> {
    if args.names.is_empty() {
        return Err(Error::validation_missing_argument(vec!["names".to_string()]));
    }

    let conversions = args
        .names
        .into_iter()
        .map(|input| {
            let output = refactor::to_kebab_case(&input);
            let changed = output != input;
            Conversion {
                input,
                output,
                changed,
            }
        })
        .collect();

    Ok((ConvertOutput::Convert { conversions }, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kebab_shop::ErrorCode;

    #[test]
    fn converts_each_name() {
        let args = ConvertArgs {
            names: vec!["UserService.ts".to_string(), "index.ts".to_string()],
        };

        let (ConvertOutput::Convert { conversions }, exit_code) = run(args).unwrap();

        assert_eq!(exit_code, 0);
        assert_eq!(conversions[0].output, "user-service.ts");
        assert!(conversions[0].changed);
        assert_eq!(conversions[1].output, "index.ts");
        assert!(!conversions[1].changed);
    }

    #[test]
    fn no_names_is_missing_argument() {
        let err = run(ConvertArgs { names: Vec::new() }).err().unwrap();
        assert_eq!(err.code, ErrorCode::ValidationMissingArgument);
    }
}
