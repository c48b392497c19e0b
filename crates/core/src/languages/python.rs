//! Python formatter.
//!
//! Models become keyword-only dataclasses; methods become members of an
//! `Sdk` class holding a transport.

use crate::config::GeneratorConfig;
use crate::conventions::{Conventions, WARN_EDITING};
use crate::formatter::{CodeFormatter, MappedType};
use crate::languages::Language;
use crate::model::{Method, ParamLocation, Parameter, Property, Type};
use crate::resolver::TypeResolver;
use crate::utils::substitute_path_params;

const TYPING_IMPORTS: &str = "from datetime import datetime\nfrom typing import Any, List, Optional\n";

/// `name: T` or `name: Optional[T] = None`.
fn annotated(indent: &str, name: &str, mapped: &MappedType, optional: bool) -> String {
    if optional {
        format!(
            "{indent}{name}: Optional[{}] = {}",
            mapped.name, mapped.default
        )
    } else {
        format!("{indent}{name}: {}", mapped.name)
    }
}

/// Python source formatter
#[derive(Debug, Clone)]
pub struct PythonFormatter {
    conventions: Conventions,
}

impl Default for PythonFormatter {
    fn default() -> Self {
        Self::with_config(&GeneratorConfig::default())
    }
}

impl PythonFormatter {
    /// Formatter with the package name and request type choice of `config`.
    pub fn with_config(config: &GeneratorConfig) -> Self {
        Self {
            conventions: Conventions {
                code_path: "./python/".into(),
                package: config.package.clone(),
                itself: "self".into(),
                file_extension: ".py".into(),
                prop_delimiter: "\n".into(),
                indent_str: "    ".into(),
                comment_str: "# ".into(),
                null_str: "None".into(),
                needs_request_types: config.request_types.unwrap_or(false),
                ..Conventions::default()
            },
        }
    }

    fn response_type(&self, cx: &mut TypeResolver<'_>, method: &Method) -> String {
        match &method.response {
            Some(response) => self.type_map(cx, &response.type_name, response.array).name,
            None => self.conventions.null_str.clone(),
        }
    }
}

impl CodeFormatter for PythonFormatter {
    fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    fn language(&self) -> Language {
        Language::Python
    }

    fn map_intrinsic(&self, name: &str) -> Option<&'static str> {
        match name {
            "any" => Some("Any"),
            "boolean" => Some("bool"),
            "datetime" => Some("datetime"),
            "double" | "float" => Some("float"),
            "int32" | "int64" => Some("int"),
            "string" => Some("str"),
            "void" => Some("None"),
            _ => None,
        }
    }

    fn array_of(&self, name: &str) -> String {
        format!("List[{name}]")
    }

    fn methods_prologue(&self, indent: &str, type_names: &[String]) -> String {
        let bump = self.bumper(indent);
        let body = self.bumper(&bump);
        let mut out = format!("{}\n\n", self.comment(indent, WARN_EDITING));
        out.push_str(TYPING_IMPORTS);
        out.push('\n');
        if !type_names.is_empty() {
            out.push_str(&format!("{indent}from .models import (\n"));
            for name in type_names {
                out.push_str(&format!("{bump}{name},\n"));
            }
            out.push_str(&format!("{indent})\n"));
        }
        let transport = &self.conventions.transport;
        out.push_str(&format!("{indent}from .{transport} import Transport\n\n\n"));
        out.push_str(&format!(
            "{indent}class Sdk:\n{bump}def __init__(self, {transport}: Transport):\n{body}{}\n\n",
            self.it(&format!("{transport} = {transport}"))
        ));
        out
    }

    fn methods_epilogue(&self, _indent: &str) -> String {
        "\n".to_string()
    }

    fn models_prologue(&self, indent: &str) -> String {
        format!(
            "{}\n\nfrom __future__ import annotations\n\nfrom dataclasses import dataclass\n{TYPING_IMPORTS}\n\n",
            self.comment(indent, WARN_EDITING)
        )
    }

    fn models_epilogue(&self, _indent: &str) -> String {
        "\n".to_string()
    }

    fn declare_parameter(
        &self,
        cx: &mut TypeResolver<'_>,
        indent: &str,
        param: &Parameter,
    ) -> String {
        let mapped = if param.location == ParamLocation::Body {
            self.body_type(cx, param)
        } else {
            self.type_map(cx, &param.type_name, param.array)
        };
        annotated(indent, &param.name, &mapped, param.nullable())
    }

    fn declare_property(
        &self,
        cx: &mut TypeResolver<'_>,
        indent: &str,
        prop: &Property,
    ) -> String {
        let mapped = self.type_map(cx, &prop.type_name, prop.array);
        format!(
            "{}{}",
            self.comment_header(indent, prop.description.as_deref()),
            annotated(indent, &prop.name, &mapped, prop.nullable)
        )
    }

    fn type_signature(&self, indent: &str, ty: &Type) -> String {
        let bump = self.bumper(indent);
        let mut lines = vec![
            format!("{indent}@dataclass(kw_only=True)"),
            format!("{indent}class {}:", ty.name),
        ];
        match ty.description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(doc) => lines.push(format!("{bump}\"\"\"{doc}\"\"\"")),
            None if ty.properties.is_empty() => lines.push(format!("{bump}pass")),
            None => {}
        }
        let mut signature = lines.join("\n");
        if !ty.properties.is_empty() {
            signature.push('\n');
        }
        signature
    }

    fn method_signature(
        &self,
        cx: &mut TypeResolver<'_>,
        indent: &str,
        method: &Method,
        request: Option<&str>,
    ) -> String {
        let bump = self.bumper(indent);
        let params = match request {
            Some(name) => format!("{bump}request: {name}"),
            None => self.declare_parameters(cx, &bump, &method.all_params()),
        };
        let returns = self.response_type(cx, method);
        if params.is_empty() {
            format!("{indent}def {}(self) -> {returns}:\n", method.name)
        } else {
            format!(
                "{indent}def {}(\n{bump}{},\n{params}\n{indent}) -> {returns}:\n",
                method.name, self.conventions.itself
            )
        }
    }

    fn declare_method(&self, cx: &mut TypeResolver<'_>, indent: &str, method: &Method) -> String {
        let request = self.request_type_name(cx, method);
        let prefix = if request.is_some() { "request." } else { "" };
        let bump = self.bumper(indent);
        let summary = self.summary(indent, method.summary.as_deref());
        let signature = self.method_signature(cx, indent, method, request.as_deref());
        let call = self.http_call(cx, &bump, method, prefix);
        format!("{summary}{signature}{call}")
    }

    /// Always a tuple: a single element keeps its trailing comma.
    fn error_responses(
        &self,
        cx: &mut TypeResolver<'_>,
        _indent: &str,
        method: &Method,
    ) -> String {
        match self.error_type_names(cx, method).as_slice() {
            [single] => format!("({single},)"),
            names => format!("({})", names.join(", ")),
        }
    }

    fn summary(&self, indent: &str, text: Option<&str>) -> String {
        self.comment_header(indent, text)
    }

    fn http_path(&self, path: &str, prefix: &str) -> String {
        if !path.contains('{') {
            return format!("\"{path}\"");
        }
        let template = substitute_path_params(path, |name| format!("{{{prefix}{name}}}"));
        format!("f\"{template}\"")
    }
}
