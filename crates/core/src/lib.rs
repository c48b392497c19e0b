//! Language-agnostic core of a multi-target SDK source generator.
//!
//! The pipeline for one target language is:
//! 1. Model: an already-validated [`ApiModel`] (types, methods, parameters)
//! 2. Resolve: a per-pass [`TypeResolver`] counts type references and derives
//!    request/writeable types on demand
//! 3. Format: a [`CodeFormatter`] renders declarations and transport calls,
//!    delegating argument lists to the [`args`] assembler
//! 4. Emit: the [`generator`] driver stitches methods and referenced models
//!    into source files
//!
//! ## Module Structure
//!
//! - `model`: API model (methods, types, properties, parameters)
//! - `conventions`: per-language delimiters and tokens
//! - `args`: argument list assembly with trailing-null omission
//! - `resolver`: reference counting and derived type materialization
//! - `formatter`: the `CodeFormatter` trait and its provided operations
//! - `languages`: TypeScript and Python formatters
//! - `generator`: generation passes and file output
//! - `config`: `sdkgen.toml` configuration
//! - `utils`: shared string helpers

pub mod args;
pub mod config;
pub mod conventions;
pub mod error;
pub mod formatter;
pub mod generator;
pub mod languages;
pub mod model;
pub mod resolver;
pub mod utils;

// Re-export the main entry points
pub use config::GeneratorConfig;
pub use conventions::Conventions;
pub use error::{GenError, Result};
pub use formatter::{CodeFormatter, MappedType};
pub use generator::{GeneratedFile, GeneratedSdk, generate, generate_languages, write_sdk};
pub use languages::Language;
pub use model::ApiModel;
pub use resolver::TypeResolver;
