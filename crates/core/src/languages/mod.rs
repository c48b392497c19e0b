//! Target language formatters.

mod python;
mod typescript;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::GenError;
use crate::formatter::CodeFormatter;

pub use python::PythonFormatter;
pub use typescript::TypeScriptFormatter;

/// Supported target languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// TypeScript interfaces and an async client class
    TypeScript,
    /// Python dataclasses and a client class
    Python,
}

impl Language {
    /// Every supported language.
    pub const ALL: [Language; 2] = [Language::TypeScript, Language::Python];

    /// Lower-case name, also used as the output directory.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::Python => "python",
        }
    }

    /// Build the formatter for this language with `config` applied.
    pub fn formatter(self, config: &GeneratorConfig) -> Box<dyn CodeFormatter> {
        match self {
            Language::TypeScript => Box::new(TypeScriptFormatter::with_config(config)),
            Language::Python => Box::new(PythonFormatter::with_config(config)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Language::TypeScript),
            "python" | "py" => Ok(Language::Python),
            _ => Err(GenError::UnknownLanguage(s.to_string())),
        }
    }
}
