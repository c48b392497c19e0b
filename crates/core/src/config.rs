//! Generator configuration (`sdkgen.toml`).
//!
//! ```toml
//! package = "acme"
//! output_dir = "generated"
//! languages = ["typescript", "python"]
//! request_types = true
//! ```
//!
//! Every key is optional. Command line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::languages::Language;

/// Default configuration file name.
pub const CONFIG_FILENAME: &str = "sdkgen.toml";

/// Options shared by every generation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Package (sub-directory) name of the generated sources
    pub package: String,
    /// Root directory generated files are written under
    pub output_dir: PathBuf,
    /// Languages to generate
    pub languages: Vec<Language>,
    /// Override of each language's request type default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_types: Option<bool>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: "sdk".into(),
            output_dir: PathBuf::from("generated"),
            languages: vec![Language::TypeScript],
            request_types: None,
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration document. `path` is only used for errors.
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| GenError::Config {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| GenError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }
}
