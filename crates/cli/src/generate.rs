use std::path::PathBuf;

use clap::Args;
use sdkgen_core::{ApiModel, Language, Result, generate_languages, write_sdk};
use tracing::info;

use crate::common::load_config;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// API model JSON file
    #[arg(long, value_name = "FILE")]
    pub model: PathBuf,
    /// Configuration file (defaults to ./sdkgen.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Output directory, overrides `output_dir`
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
    /// Target language, repeatable; overrides `languages`
    #[arg(long = "language", short = 'l', value_name = "LANG")]
    pub languages: Vec<Language>,
    /// Package name, overrides `package`
    #[arg(long, value_name = "NAME")]
    pub package: Option<String>,
}

pub fn run(args: &GenerateArgs) -> i32 {
    match generate(args) {
        Ok(paths) => {
            for path in paths {
                println!("{}", path.display());
            }
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn generate(args: &GenerateArgs) -> Result<Vec<PathBuf>> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(package) = &args.package {
        config.package.clone_from(package);
    }
    if let Some(out) = &args.out {
        config.output_dir.clone_from(out);
    }
    if !args.languages.is_empty() {
        config.languages.clone_from(&args.languages);
    }

    let api = ApiModel::load(&args.model)?;
    info!(
        model = %args.model.display(),
        languages = ?config.languages,
        "Generating SDK sources."
    );

    let mut written = Vec::new();
    for sdk in generate_languages(&api, &config.languages, &config) {
        written.extend(write_sdk(&config.output_dir, &sdk)?);
    }
    info!(files = written.len(), "SDK sources written.");
    Ok(written)
}
