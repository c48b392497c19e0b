use std::path::PathBuf;

use clap::Args;
use sdkgen_core::utils::dump;
use sdkgen_core::{ApiModel, Language, Result, generate};

use crate::common::load_config;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// API model JSON file
    #[arg(long, value_name = "FILE")]
    pub model: PathBuf,
    /// Configuration file (defaults to ./sdkgen.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Language to run the pass for (defaults to the first configured one)
    #[arg(long, short = 'l', value_name = "LANG")]
    pub language: Option<Language>,
}

pub fn run(args: &InspectArgs) -> i32 {
    match inspect(args) {
        Ok(report) => {
            println!("{report}");
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn inspect(args: &InspectArgs) -> Result<String> {
    let config = load_config(args.config.as_deref())?;
    let language = args
        .language
        .or_else(|| config.languages.first().copied())
        .unwrap_or(Language::TypeScript);
    let api = ApiModel::load(&args.model)?;
    let sdk = generate(&api, language.formatter(&config).as_ref());
    Ok(dump(&sdk.references))
}
