//! Transport call argument assembly.
//!
//! A transport call takes its argument groups positionally, most significant
//! first:
//!
//! ```text
//!   [queryArgs...], bodyArg, [headerArgs...], [cookieArgs...]
//!   [queryArgs...], null, null, [cookieArgs...]
//!   null, bodyArg
//!   [queryArgs...]
//! ```
//!
//! The list is built from back to front so trailing empty groups can be left
//! out entirely instead of being rendered as null placeholders. An empty
//! group that has anything non-empty after it still renders as the
//! placeholder, keeping every later argument in its position.

use crate::conventions::Conventions;
use crate::model::Method;

/// Render a group as a bracketed collection, or the null placeholder if empty.
pub fn arg_group(conv: &Conventions, indent: &str, args: &[String], prefix: &str) -> String {
    if args.is_empty() {
        return conv.null_str.clone();
    }
    let joiner = format!("{}{prefix}", conv.arg_delimiter);
    format!("{indent}[{prefix}{}]", args.join(&joiner))
}

/// Render a group as a bare list, or the null placeholder if empty.
pub fn arg_list(conv: &Conventions, indent: &str, args: &[String], prefix: &str) -> String {
    if args.is_empty() {
        return conv.null_str.clone();
    }
    let joiner = format!("{}{prefix}", conv.arg_delimiter);
    format!("{indent}{prefix}{}", args.join(&joiner))
}

/// Prepend `args` to the arguments accumulated so far.
///
/// A null placeholder is dropped while nothing has been accumulated yet,
/// which is what keeps trailing optional arguments out of the call.
pub fn arg_fill(conv: &Conventions, current: &str, args: &str) -> String {
    if current.is_empty() && args.trim() == conv.null_str {
        return String::new();
    }
    if current.is_empty() {
        args.to_string()
    } else {
        format!("{args}{}{current}", conv.arg_delimiter)
    }
}

/// Classified arguments of one transport call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallArgs {
    /// Query argument names (most significant)
    pub query: Vec<String>,
    /// Body argument name
    pub body: Option<String>,
    /// Header argument names
    pub header: Vec<String>,
    /// Cookie argument names (least significant)
    pub cookie: Vec<String>,
}

impl CallArgs {
    /// Collect the argument groups of `method`. Path arguments are resolved
    /// into the endpoint path and are not part of the list.
    pub fn from_method(method: &Method) -> Self {
        Self {
            query: method.query_args(),
            body: method.body_arg().map(str::to_string),
            header: method.header_args(),
            cookie: method.cookie_args(),
        }
    }

    /// Render the argument list, least significant group first.
    pub fn render(&self, conv: &Conventions, indent: &str, prefix: &str) -> String {
        let body = self
            .body
            .as_ref()
            .map_or_else(|| conv.null_str.clone(), |b| format!("{prefix}{b}"));

        let mut result = arg_fill(conv, "", &arg_group(conv, indent, &self.cookie, prefix));
        result = arg_fill(conv, &result, &arg_group(conv, indent, &self.header, prefix));
        result = arg_fill(conv, &result, &body);
        arg_fill(conv, &result, &arg_group(conv, indent, &self.query, prefix))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::tests::test_model;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn render(args: &CallArgs) -> String {
        args.render(&Conventions::default(), "", "")
    }

    #[test]
    fn test_no_arguments_renders_empty() {
        assert_eq!(render(&CallArgs::default()), "");
    }

    #[test]
    fn test_query_only() {
        let args = CallArgs {
            query: strings(&["a", "b"]),
            ..CallArgs::default()
        };
        assert_eq!(render(&args), "[a, b]");
    }

    #[test]
    fn test_null_before_body_is_kept() {
        let args = CallArgs {
            body: Some("x".into()),
            ..CallArgs::default()
        };
        assert_eq!(render(&args), "null, x");
    }

    #[test]
    fn test_full_stack() {
        let args = CallArgs {
            query: strings(&["q"]),
            body: Some("b".into()),
            header: strings(&["h"]),
            cookie: strings(&["c"]),
        };
        assert_eq!(render(&args), "[q], b, [h], [c]");
    }

    #[test]
    fn test_absent_middle_groups_are_placeholders() {
        let args = CallArgs {
            query: strings(&["q"]),
            cookie: strings(&["c"]),
            ..CallArgs::default()
        };
        assert_eq!(render(&args), "[q], null, null, [c]");
    }

    #[test]
    fn test_trailing_run_dropped_up_to_header() {
        let args = CallArgs {
            header: strings(&["h1", "h2"]),
            ..CallArgs::default()
        };
        assert_eq!(render(&args), "null, null, [h1, h2]");
    }

    #[test]
    fn test_prefix_applies_to_groups_and_body() {
        let args = CallArgs {
            query: strings(&["limit", "offset"]),
            body: Some("body".into()),
            ..CallArgs::default()
        };
        assert_eq!(
            args.render(&Conventions::default(), "", "request."),
            "[request.limit, request.offset], request.body"
        );
    }

    #[test]
    fn test_language_null_token() {
        let conv = Conventions {
            null_str: "None".into(),
            ..Conventions::default()
        };
        let args = CallArgs {
            body: Some("body".into()),
            ..CallArgs::default()
        };
        assert_eq!(args.render(&conv, "", ""), "None, body");
    }

    #[test]
    fn test_arg_fill_drops_padded_placeholder() {
        let conv = Conventions::default();
        assert_eq!(arg_fill(&conv, "", "  null "), "");
        assert_eq!(arg_fill(&conv, "x", "null"), "null, x");
        assert_eq!(arg_fill(&conv, "", "y"), "y");
        assert_eq!(arg_fill(&conv, "x", "y"), "y, x");
    }

    #[test]
    fn test_arg_group_and_list() {
        let conv = Conventions::default();
        assert_eq!(arg_group(&conv, "  ", &strings(&["a", "b"]), ""), "  [a, b]");
        assert_eq!(arg_group(&conv, "  ", &[], ""), "null");
        assert_eq!(arg_list(&conv, "", &strings(&["a", "b"]), "p."), "p.a, p.b");
        assert_eq!(arg_list(&conv, "", &[], "p."), "null");
    }

    #[test]
    fn test_from_method() {
        let api = test_model();
        let update = api.find_method("update_user").unwrap();
        let args = CallArgs::from_method(update);
        assert_eq!(args.query, ["fields"]);
        assert_eq!(args.body.as_deref(), Some("body"));
        assert_eq!(render(&args), "[fields], body");

        let logout = api.find_method("logout").unwrap();
        assert_eq!(render(&CallArgs::from_method(logout)), "");
    }
}
