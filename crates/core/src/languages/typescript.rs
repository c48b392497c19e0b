//! TypeScript formatter.
//!
//! Models become `export interface` declarations and methods become `async`
//! members of an `Sdk` class that delegates to an `ITransport`.

use crate::config::GeneratorConfig;
use crate::conventions::{Conventions, WARN_EDITING};
use crate::formatter::CodeFormatter;
use crate::languages::Language;
use crate::model::{Method, ParamLocation, Parameter, Property, Type};
use crate::resolver::TypeResolver;
use crate::utils::{comment_block, quote_if_needed, substitute_path_params};

/// TypeScript source formatter
#[derive(Debug, Clone)]
pub struct TypeScriptFormatter {
    conventions: Conventions,
}

impl Default for TypeScriptFormatter {
    fn default() -> Self {
        Self::with_config(&GeneratorConfig::default())
    }
}

impl TypeScriptFormatter {
    /// Formatter with the package name and request type choice of `config`.
    pub fn with_config(config: &GeneratorConfig) -> Self {
        Self {
            conventions: Conventions {
                code_path: "./typescript/".into(),
                package: config.package.clone(),
                itself: "this".into(),
                file_extension: ".ts".into(),
                prop_delimiter: "\n".into(),
                end_type_str: "}".into(),
                needs_request_types: config.request_types.unwrap_or(true),
                ..Conventions::default()
            },
        }
    }

    fn response_type(&self, cx: &mut TypeResolver<'_>, method: &Method) -> String {
        match &method.response {
            Some(response) => self.type_map(cx, &response.type_name, response.array).name,
            None => "void".to_string(),
        }
    }
}

impl CodeFormatter for TypeScriptFormatter {
    fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn map_intrinsic(&self, name: &str) -> Option<&'static str> {
        match name {
            "any" => Some("any"),
            "boolean" => Some("boolean"),
            "datetime" => Some("Date"),
            "double" | "float" | "int32" | "int64" => Some("number"),
            "string" => Some("string"),
            "void" => Some("void"),
            _ => None,
        }
    }

    fn methods_prologue(&self, indent: &str, type_names: &[String]) -> String {
        let bump = self.bumper(indent);
        let mut out = format!("{}\n\n", self.comment(indent, WARN_EDITING));
        out.push_str(&format!("{indent}import {{ ITransport }} from './transport'\n"));
        if !type_names.is_empty() {
            out.push_str(&format!("{indent}import {{\n"));
            for name in type_names {
                out.push_str(&format!("{bump}{name},\n"));
            }
            out.push_str(&format!("{indent}}} from './models'\n"));
        }
        out.push_str(&format!(
            "\n{indent}export class Sdk {{\n{bump}constructor(public {}: ITransport) {{}}\n\n",
            self.conventions.transport
        ));
        out
    }

    fn methods_epilogue(&self, indent: &str) -> String {
        format!("\n{indent}}}\n")
    }

    fn models_prologue(&self, indent: &str) -> String {
        format!("{}\n\n", self.comment(indent, WARN_EDITING))
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
        let optional = if param.required { "" } else { "?" };
        format!("{indent}{}{optional}: {}", param.name, mapped.name)
    }

    fn declare_property(
        &self,
        cx: &mut TypeResolver<'_>,
        indent: &str,
        prop: &Property,
    ) -> String {
        let mapped = self.type_map(cx, &prop.type_name, prop.array);
        let readonly = if prop.read_only { "readonly " } else { "" };
        let optional = if prop.nullable { "?" } else { "" };
        format!(
            "{}{indent}{readonly}{}{optional}: {}",
            self.summary(indent, prop.description.as_deref()),
            quote_if_needed(&prop.name),
            mapped.name
        )
    }

    fn type_signature(&self, indent: &str, ty: &Type) -> String {
        format!(
            "{}{indent}export interface {} {{\n",
            self.summary(indent, ty.description.as_deref()),
            ty.name
        )
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
            format!("{indent}async {}(): Promise<{returns}> {{\n", method.name)
        } else {
            format!(
                "{indent}async {}(\n{params}\n{indent}): Promise<{returns}> {{\n",
                method.name
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
        format!("{summary}{signature}{call}\n{indent}}}")
    }

    fn summary(&self, indent: &str, text: Option<&str>) -> String {
        let block = comment_block(text, indent, " * ");
        if block.is_empty() {
            return block;
        }
        format!("{indent}/**\n{block}\n{indent} */\n")
    }

    fn http_path(&self, path: &str, prefix: &str) -> String {
        if !path.contains('{') {
            return format!("'{path}'");
        }
        let template = substitute_path_params(path, |name| format!("${{{prefix}{name}}}"));
        format!("`{template}`")
    }

    fn error_responses(
        &self,
        cx: &mut TypeResolver<'_>,
        _indent: &str,
        method: &Method,
    ) -> String {
        format!("[{}]", self.error_type_names(cx, method).join(", "))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::ApiModel;
    use crate::model::tests::test_model;

    #[test]
    fn test_conventions_follow_config() {
        let config = GeneratorConfig {
            package: "acme".into(),
            request_types: Some(false),
            ..GeneratorConfig::default()
        };
        let fmt = TypeScriptFormatter::with_config(&config);
        assert_eq!(fmt.file_name("methods"), "./typescript/acme/methods.ts");
        assert!(!fmt.conventions().needs_request_types);
        assert!(TypeScriptFormatter::default().conventions().needs_request_types);
    }

    #[test]
    fn test_type_map_intrinsics_and_arrays() {
        let api = test_model();
        let fmt = TypeScriptFormatter::default();
        let mut cx = TypeResolver::new(&api, true);

        assert_eq!(fmt.type_map(&mut cx, "int64", false).name, "number");
        assert_eq!(fmt.type_map(&mut cx, "datetime", true).name, "Date[]");
        assert_eq!(fmt.type_map(&mut cx, "Role", true).name, "Role[]");
        assert_eq!(fmt.type_map(&mut cx, "Role", false).default, "null");
        assert_eq!(cx.ref_count("Role"), 2);
        assert_eq!(cx.referenced_type_names(), ["Role"]);
    }

    #[test]
    fn test_declare_type() {
        let api = test_model();
        let fmt = TypeScriptFormatter::default();
        let mut cx = TypeResolver::new(&api, true);

        let user = api.find_type("User").unwrap();
        let expected = "\
/**
 * A user account
 */
export interface User {
  readonly id: number
  name: string
  email?: string
  roles?: Role[]
}";
        assert_eq!(fmt.declare_type(&mut cx, "", user), expected);
        assert_eq!(cx.ref_count("Role"), 1);
        assert_eq!(cx.ref_count("string"), 2);
    }

    #[test]
    fn test_declare_method_with_request_type() {
        let api = test_model();
        let fmt = TypeScriptFormatter::default();
        let mut cx = TypeResolver::new(&api, true);

        let search = api.find_method("search_users").unwrap();
        let expected = "\
  /**
   * Search users
   */
  async search_users(
    request: RequestSearchUsers
  ): Promise<User[]> {
    return this.rtl.get([Error], '/users/search', [request.name, request.email, request.limit])
  }";
        assert_eq!(fmt.declare_method(&mut cx, "  ", search), expected);
        assert_eq!(
            cx.referenced_type_names(),
            ["Error", "RequestSearchUsers", "User"]
        );
    }

    #[test]
    fn test_declare_method_with_path_and_body() {
        let api = test_model();
        let fmt = TypeScriptFormatter::default();
        let mut cx = TypeResolver::new(&api, true);

        let update = api.find_method("update_user").unwrap();
        let expected = "\
  async update_user(
    user_id: number,
    body: WriteUser,
    fields?: string
  ): Promise<User> {
    return this.rtl.patch([Error], `/users/${user_id}`, [fields], body)
  }";
        assert_eq!(fmt.declare_method(&mut cx, "  ", update), expected);
        assert_eq!(cx.ref_count("WriteUser"), 1);
        assert_eq!(cx.ref_count("User"), 1);
    }

    #[test]
    fn test_request_type_keeps_body_type() {
        let base = test_model();
        let mut update = base.find_method("update_user").unwrap().clone();
        update.params.push(Parameter {
            name: "expand".into(),
            type_name: "string".into(),
            array: false,
            location: ParamLocation::Query,
            required: false,
            description: None,
        });
        let api = ApiModel::new(base.sorted_types().cloned().collect(), vec![update]);
        let fmt = TypeScriptFormatter::default();
        let mut cx = TypeResolver::new(&api, true);

        let method = api.find_method("update_user").unwrap();
        let rendered = fmt.declare_method(&mut cx, "  ", method);
        assert!(rendered.contains("    request: RequestUpdateUser\n"));
        assert!(rendered.contains("[request.fields, request.expand], request.body)"));

        let request = cx.find_type("RequestUpdateUser").cloned().unwrap();
        let declared = fmt.declare_type(&mut cx, "", &request);
        assert!(declared.contains("\n  body: User\n"));
        assert!(cx.find_type("WriteUser").is_none());
        assert_eq!(cx.ref_count("WriteUser"), 0);
    }

    #[test]
    fn test_declare_method_without_params() {
        let api = test_model();
        let fmt = TypeScriptFormatter::default();
        let mut cx = TypeResolver::new(&api, true);

        let logout = api.find_method("logout").unwrap();
        let expected = "\
  async logout(): Promise<void> {
    return this.rtl.delete([], '/logout')
  }";
        assert_eq!(fmt.declare_method(&mut cx, "  ", logout), expected);
        assert!(cx.referenced_type_names().is_empty());
    }

    #[test]
    fn test_quoted_property_name() {
        let api = test_model();
        let fmt = TypeScriptFormatter::default();
        let mut cx = TypeResolver::new(&api, true);
        let prop = Property {
            name: "content-type".into(),
            type_name: "string".into(),
            array: false,
            nullable: false,
            read_only: false,
            description: Some("Media type".into()),
        };
        assert_eq!(
            fmt.declare_property(&mut cx, "  ", &prop),
            "  /**\n   * Media type\n   */\n  \"content-type\": string"
        );
    }

    #[test]
    fn test_methods_prologue_imports_types() {
        let fmt = TypeScriptFormatter::default();
        let prologue = fmt.methods_prologue("", &["Error".to_string(), "User".to_string()]);
        assert!(prologue.starts_with("// NOTE: Do not edit"));
        assert!(prologue.contains("import {\n  Error,\n  User,\n} from './models'\n"));
        assert!(prologue.contains("constructor(public rtl: ITransport) {}"));

        let bare = fmt.methods_prologue("", &[]);
        assert!(!bare.contains("./models"));
    }
}
