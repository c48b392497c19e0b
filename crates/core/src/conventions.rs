//! Per-language delimiter and token conventions.
//!
//! Both the argument assembler and the type resolver read these; each
//! formatter owns one instance.

/// Header placed at the top of every generated file.
pub const WARN_EDITING: &str =
    "NOTE: Do not edit this source code file. It is generated by sdkgen.";

/// Delimiters, tokens and naming conventions of a target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conventions {
    /// Directory prefix for generated files
    pub code_path: String,
    /// Package (sub-directory) name
    pub package: String,
    /// Receiver keyword ("this", "self"), empty for free functions
    pub itself: String,
    /// File extension including the dot
    pub file_extension: String,
    /// Separator between call arguments
    pub arg_delimiter: String,
    /// Separator between declared parameters
    pub param_delimiter: String,
    /// Separator between declared properties
    pub prop_delimiter: String,
    /// Separator between top-level declarations
    pub block_delimiter: String,
    /// One indentation level
    pub indent_str: String,
    /// Line comment prefix
    pub comment_str: String,
    /// Literal for "no value"
    pub null_str: String,
    /// Closing token of a type declaration, empty if none
    pub end_type_str: String,
    /// Transport member name
    pub transport: String,
    /// Whether methods take generated request types
    pub needs_request_types: bool,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            code_path: "./".into(),
            package: "sdk".into(),
            itself: String::new(),
            file_extension: ".code".into(),
            arg_delimiter: ", ".into(),
            param_delimiter: ",\n".into(),
            prop_delimiter: ",\n".into(),
            block_delimiter: "\n\n".into(),
            indent_str: "  ".into(),
            comment_str: "// ".into(),
            null_str: "null".into(),
            end_type_str: String::new(),
            transport: "rtl".into(),
            needs_request_types: false,
        }
    }
}
