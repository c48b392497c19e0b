//! Generation passes and file output.
//!
//! One pass renders every method first, so that the resolver has seen every
//! type reference the methods make, then declares the referenced models.
//! Declaring a model can reference further types, so model declaration runs
//! to a fixed point before the files are assembled.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::GeneratorConfig;
use crate::error::{GenError, Result};
use crate::formatter::CodeFormatter;
use crate::languages::Language;
use crate::model::ApiModel;
use crate::resolver::{TypeReference, TypeResolver};
use crate::utils;

/// One generated source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Path relative to the output directory
    pub path: String,
    /// File contents
    pub source: String,
}

/// Output of one generation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSdk {
    /// Target language
    pub language: Language,
    /// Client methods
    pub methods: GeneratedFile,
    /// Model declarations
    pub models: GeneratedFile,
    /// Emitted type names in canonical order
    pub type_names: Vec<String>,
    /// Reference counts of every known type
    pub references: Vec<TypeReference>,
}

/// Run one isolated generation pass over `api`.
pub fn generate(api: &ApiModel, formatter: &dyn CodeFormatter) -> GeneratedSdk {
    let conv = formatter.conventions();
    let language = formatter.language();
    let mut cx = TypeResolver::new(api, conv.needs_request_types);

    let method_indent = formatter.bumper("");
    let methods: Vec<String> = api
        .methods()
        .iter()
        .map(|method| {
            trace!("{}", utils::debug("method", method, ""));
            formatter.declare_method(&mut cx, &method_indent, method)
        })
        .collect();

    let declarations = declare_referenced_types(formatter, &mut cx);
    let type_names = formatter.type_names(&cx);

    let models_source = format!(
        "{}{}{}",
        formatter.models_prologue(""),
        declarations
            .into_values()
            .collect::<Vec<_>>()
            .join(&conv.block_delimiter),
        formatter.models_epilogue("")
    );
    let methods_source = format!(
        "{}{}{}",
        formatter.methods_prologue("", &type_names),
        methods.join(&conv.block_delimiter),
        formatter.methods_epilogue("")
    );

    debug!(
        language = %language,
        methods = methods.len(),
        types = type_names.len(),
        "Generated SDK sources."
    );

    GeneratedSdk {
        language,
        methods: GeneratedFile {
            path: formatter.file_name("methods"),
            source: methods_source,
        },
        models: GeneratedFile {
            path: formatter.file_name("models"),
            source: models_source,
        },
        type_names,
        references: cx.reference_report(),
    }
}

/// Declare every referenced type, repeating until declarations stop
/// referencing types that have not been declared yet.
fn declare_referenced_types(
    formatter: &dyn CodeFormatter,
    cx: &mut TypeResolver<'_>,
) -> BTreeMap<String, String> {
    let mut declared = BTreeMap::new();
    loop {
        let pending: Vec<String> = cx
            .referenced_type_names()
            .into_iter()
            .filter(|name| !declared.contains_key(name))
            .collect();
        if pending.is_empty() {
            return declared;
        }
        for name in pending {
            let source = cx
                .find_type(&name)
                .cloned()
                .map(|ty| formatter.declare_type(cx, "", &ty))
                .unwrap_or_default();
            trace!(type_name = %name, "Declared type.");
            declared.insert(name, source);
        }
    }
}

/// Generate every language in parallel. Each pass owns its resolver.
pub fn generate_languages(
    api: &ApiModel,
    languages: &[Language],
    config: &GeneratorConfig,
) -> Vec<GeneratedSdk> {
    languages
        .par_iter()
        .map(|language| generate(api, language.formatter(config).as_ref()))
        .collect()
}

/// Write both files of `sdk` under `out_dir`, creating directories.
pub fn write_sdk(out_dir: &Path, sdk: &GeneratedSdk) -> Result<Vec<PathBuf>> {
    [&sdk.methods, &sdk.models]
        .into_iter()
        .map(|file| write_file(out_dir, file))
        .collect()
}

fn write_file(out_dir: &Path, file: &GeneratedFile) -> Result<PathBuf> {
    let path = out_dir.join(file.path.trim_start_matches("./"));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| GenError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, &file.source).map_err(|source| GenError::Write {
        path: path.clone(),
        source,
    })?;
    debug!(
        path = %path.display(),
        bytes = file.source.len(),
        "Wrote generated file."
    );
    Ok(path)
}
