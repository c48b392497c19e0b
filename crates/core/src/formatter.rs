//! Language formatter trait.
//!
//! A [`CodeFormatter`] supplies the per-language hooks (declarations,
//! signatures, comments) while the provided methods carry the
//! language-independent parts: argument assembly, transport calls, type
//! mapping with reference counting, and type declarations.
//!
//! Every operation that can reference a type takes the pass's
//! [`TypeResolver`] explicitly, so independent passes never share counts.

use std::fmt;

use crate::args::{self, CallArgs};
use crate::conventions::Conventions;
use crate::languages::Language;
use crate::model::{Method, Parameter, Property, Type};
use crate::resolver::TypeResolver;
use crate::utils::comment_block;

/// Language-specific rendering of a type reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// Type expression in the target language
    pub name: String,
    /// Default value literal
    pub default: String,
}

/// Per-language source formatter.
pub trait CodeFormatter: fmt::Debug + Send + Sync {
    // ---------------------------------------------------------------------
    // Hooks every language implements
    // ---------------------------------------------------------------------

    /// Delimiters and tokens of this language.
    fn conventions(&self) -> &Conventions;

    /// The language this formatter renders.
    fn language(&self) -> Language;

    /// Opening of the methods file; `type_names` are the emitted models.
    fn methods_prologue(&self, indent: &str, type_names: &[String]) -> String;

    /// Closing of the methods file.
    fn methods_epilogue(&self, indent: &str) -> String;

    /// Opening of the models file.
    fn models_prologue(&self, indent: &str) -> String;

    /// Closing of the models file.
    fn models_epilogue(&self, indent: &str) -> String;

    /// Declare one method parameter.
    fn declare_parameter(
        &self,
        cx: &mut TypeResolver<'_>,
        indent: &str,
        param: &Parameter,
    ) -> String;

    /// Declare one type property.
    fn declare_property(&self, cx: &mut TypeResolver<'_>, indent: &str, prop: &Property)
    -> String;

    /// Opening of a type declaration, up to the first property.
    fn type_signature(&self, indent: &str, ty: &Type) -> String;

    /// Method signature; `request` names the request type when one is used.
    fn method_signature(
        &self,
        cx: &mut TypeResolver<'_>,
        indent: &str,
        method: &Method,
        request: Option<&str>,
    ) -> String;

    /// Complete method declaration.
    fn declare_method(&self, cx: &mut TypeResolver<'_>, indent: &str, method: &Method) -> String;

    /// Documentation block for a method or type.
    fn summary(&self, indent: &str, text: Option<&str>) -> String;

    // ---------------------------------------------------------------------
    // Type name hooks with defaults
    // ---------------------------------------------------------------------

    /// Target name of an intrinsic type, `None` to keep the model name.
    fn map_intrinsic(&self, _name: &str) -> Option<&'static str> {
        None
    }

    /// List type expression with element type `name`.
    fn array_of(&self, name: &str) -> String {
        format!("{name}[]")
    }

    // ---------------------------------------------------------------------
    // Provided operations
    // ---------------------------------------------------------------------

    /// One indentation level deeper than `indent`.
    fn bumper(&self, indent: &str) -> String {
        format!("{indent}{}", self.conventions().indent_str)
    }

    /// Relative path of a generated file.
    fn file_name(&self, base: &str) -> String {
        let conv = self.conventions();
        format!(
            "{}{}/{base}{}",
            conv.code_path, conv.package, conv.file_extension
        )
    }

    /// Line comment block.
    fn comment(&self, indent: &str, description: &str) -> String {
        comment_block(Some(description), indent, &self.conventions().comment_str)
    }

    /// Comment block followed by a newline, or nothing for empty text.
    fn comment_header(&self, indent: &str, text: Option<&str>) -> String {
        match text.filter(|t| !t.trim().is_empty()) {
            Some(text) => format!("{}\n", self.comment(indent, text)),
            None => String::new(),
        }
    }

    /// Declare parameters joined by the parameter delimiter.
    fn declare_parameters(
        &self,
        cx: &mut TypeResolver<'_>,
        indent: &str,
        params: &[&Parameter],
    ) -> String {
        params
            .iter()
            .map(|p| self.declare_parameter(cx, indent, p))
            .collect::<Vec<_>>()
            .join(&self.conventions().param_delimiter)
    }

    /// Qualify `value` with the receiver keyword, if any.
    fn it(&self, value: &str) -> String {
        let itself = &self.conventions().itself;
        if itself.is_empty() {
            value.to_string()
        } else {
            format!("{itself}.{value}")
        }
    }

    /// Complete type declaration with every property in declaration order.
    fn declare_type(&self, cx: &mut TypeResolver<'_>, indent: &str, ty: &Type) -> String {
        let bump = self.bumper(indent);
        let conv = self.conventions();
        let props = ty
            .properties
            .iter()
            .map(|prop| self.declare_property(cx, &bump, prop))
            .collect::<Vec<_>>()
            .join(&conv.prop_delimiter);
        let end = if conv.end_type_str.is_empty() {
            String::new()
        } else {
            format!("\n{indent}{}", conv.end_type_str)
        };
        format!("{}{props}{end}", self.type_signature(indent, ty))
    }

    /// Bracketed argument group (see [`args::arg_group`]).
    fn arg_group(&self, indent: &str, args: &[String], prefix: &str) -> String {
        args::arg_group(self.conventions(), indent, args, prefix)
    }

    /// Bare argument list (see [`args::arg_list`]).
    fn arg_list(&self, indent: &str, args: &[String], prefix: &str) -> String {
        args::arg_list(self.conventions(), indent, args, prefix)
    }

    /// Prepend an argument (see [`args::arg_fill`]).
    fn arg_fill(&self, current: &str, args: &str) -> String {
        args::arg_fill(self.conventions(), current, args)
    }

    /// Endpoint path literal. Path arguments are resolved here.
    fn http_path(&self, path: &str, _prefix: &str) -> String {
        format!("\"{path}\"")
    }

    /// Transport call argument list with trailing nulls omitted.
    fn http_args(&self, indent: &str, method: &Method, prefix: &str) -> String {
        CallArgs::from_method(method).render(self.conventions(), indent, prefix)
    }

    /// Mapped error type names, each counted as a reference.
    fn error_type_names(&self, cx: &mut TypeResolver<'_>, method: &Method) -> Vec<String> {
        method
            .error_type_names()
            .into_iter()
            .map(|name| self.type_map(cx, name, false).name)
            .collect()
    }

    /// Error types the transport call maps responses to.
    fn error_responses(
        &self,
        cx: &mut TypeResolver<'_>,
        _indent: &str,
        method: &Method,
    ) -> String {
        format!("({})", self.error_type_names(cx, method).join(", "))
    }

    /// `return <transport>.<verb>(<errors>, <path>[, <args>])`
    fn http_call(
        &self,
        cx: &mut TypeResolver<'_>,
        indent: &str,
        method: &Method,
        prefix: &str,
    ) -> String {
        let args = self.http_args("", method, prefix);
        let errors = self.error_responses(cx, indent, method);
        let path = self.http_path(&method.endpoint, prefix);
        let conv = self.conventions();
        let args = if args.is_empty() {
            args
        } else {
            format!("{}{args}", conv.arg_delimiter)
        };
        format!(
            "{indent}return {}.{}({errors}, {path}{args})",
            self.it(&conv.transport),
            method.http_method.as_lower()
        )
    }

    /// Request type name for `method`, if this pass uses one.
    fn request_type_name(&self, cx: &mut TypeResolver<'_>, method: &Method) -> Option<String> {
        cx.request_type_for(method)
    }

    /// Writeable variant name of the type called `type_name`, if any.
    fn writeable_type(&self, cx: &mut TypeResolver<'_>, type_name: &str) -> Option<String> {
        cx.writeable_type_name(type_name)
    }

    /// Emitted type names in canonical order.
    fn type_names(&self, cx: &TypeResolver<'_>) -> Vec<String> {
        cx.referenced_type_names()
    }

    /// Map a type reference to this language, counting the reference.
    fn type_map(&self, cx: &mut TypeResolver<'_>, type_name: &str, array: bool) -> MappedType {
        cx.reference(type_name);
        let base = self
            .map_intrinsic(type_name)
            .map_or_else(|| type_name.to_string(), str::to_string);
        MappedType {
            name: if array { self.array_of(&base) } else { base },
            default: self.conventions().null_str.clone(),
        }
    }

    /// Type of a body parameter: its writeable variant when one exists.
    fn body_type(&self, cx: &mut TypeResolver<'_>, param: &Parameter) -> MappedType {
        match self.writeable_type(cx, &param.type_name) {
            Some(writer) => MappedType {
                name: if param.array {
                    self.array_of(&writer)
                } else {
                    writer
                },
                default: self.conventions().null_str.clone(),
            },
            None => self.type_map(cx, &param.type_name, param.array),
        }
    }
}
