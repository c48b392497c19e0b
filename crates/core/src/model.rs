//! API model consumed by the generator.
//!
//! This module defines the read-only description of an API surface:
//! - Method: an HTTP operation with classified parameters
//! - Type: a named record of properties (or an intrinsic/built-in type)
//! - Property / Parameter: typed members owned by a Type or a Method
//!
//! The model is built once before generation and is never mutated by it.
//! Reference counts and derived types live in the per-pass
//! [`TypeResolver`](crate::resolver::TypeResolver).

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::utils::to_pascal_case;

/// Names of the built-in types every model carries.
pub const INTRINSIC_TYPES: [&str; 9] = [
    "any", "boolean", "datetime", "double", "float", "int32", "int64", "string", "void",
];

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Upper-case wire name ("GET").
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Lower-case name used for transport calls ("get").
    pub fn as_lower(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter travels in the HTTP request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// Substituted into the endpoint path template
    Path,
    /// Query string
    Query,
    /// Request header
    Header,
    /// Cookie
    Cookie,
    /// Request body (at most one per method)
    Body,
}

/// Method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name as rendered in generated code
    pub name: String,
    /// Declared type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Whether the parameter is a list of `type_name`
    #[serde(default)]
    pub array: bool,
    /// Parameter classification
    #[serde(rename = "in")]
    pub location: ParamLocation,
    /// Required parameters are never null
    #[serde(default)]
    pub required: bool,
    /// Optional documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Parameter {
    /// Whether the parameter may be omitted/null.
    pub fn nullable(&self) -> bool {
        !self.required
    }
}

/// Type property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property name
    pub name: String,
    /// Declared type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Whether the property is a list of `type_name`
    #[serde(default)]
    pub array: bool,
    /// Whether the property may be null/absent
    #[serde(default)]
    pub nullable: bool,
    /// Read-only properties are elided from writeable variants
    #[serde(default)]
    pub read_only: bool,
    /// Optional documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Type kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Built-in type, never emitted as a declaration
    Intrinsic,
    /// Type declared by the API model
    #[default]
    Model,
    /// Derived type bundling a method's parameters
    Request,
    /// Derived type with read-only properties removed
    Writeable,
}

/// Named structured type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    /// Type name (unique within a model)
    pub name: String,
    /// Type kind
    #[serde(default)]
    pub kind: TypeKind,
    /// Properties in declaration order
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Optional documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Type {
    /// Create an intrinsic type with no properties.
    pub fn intrinsic(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: TypeKind::Intrinsic,
            properties: Vec::new(),
            description: None,
        }
    }

    /// Whether this is a built-in type.
    pub fn is_intrinsic(&self) -> bool {
        self.kind == TypeKind::Intrinsic
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Whether any property is read-only.
    pub fn has_read_only(&self) -> bool {
        self.properties.iter().any(|p| p.read_only)
    }
}

/// Declared error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Error type name
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Success response type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Response type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Whether the response is a list of `type_name`
    #[serde(default)]
    pub array: bool,
}

/// API operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// Method name (unique within a model)
    pub name: String,
    /// HTTP verb
    pub http_method: HttpMethod,
    /// Endpoint path template, e.g. "/users/{user_id}"
    pub endpoint: String,
    /// One-line summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Parameters in declaration order
    #[serde(default)]
    pub params: Vec<Parameter>,
    /// Declared error responses
    #[serde(default)]
    pub errors: Vec<ErrorResponse>,
    /// Success response (None = no content)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Response>,
}

impl Method {
    /// Parameters at `location`, in declaration order.
    pub fn params_in(&self, location: ParamLocation) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(move |p| p.location == location)
    }

    fn arg_names(&self, location: ParamLocation) -> Vec<String> {
        self.params_in(location).map(|p| p.name.clone()).collect()
    }

    /// Path argument names.
    pub fn path_args(&self) -> Vec<String> {
        self.arg_names(ParamLocation::Path)
    }

    /// Query argument names.
    pub fn query_args(&self) -> Vec<String> {
        self.arg_names(ParamLocation::Query)
    }

    /// Header argument names.
    pub fn header_args(&self) -> Vec<String> {
        self.arg_names(ParamLocation::Header)
    }

    /// Cookie argument names.
    pub fn cookie_args(&self) -> Vec<String> {
        self.arg_names(ParamLocation::Cookie)
    }

    /// The body parameter, if any.
    pub fn body_param(&self) -> Option<&Parameter> {
        self.params_in(ParamLocation::Body).next()
    }

    /// The body argument name, if any.
    pub fn body_arg(&self) -> Option<&str> {
        self.body_param().map(|p| p.name.as_str())
    }

    /// Required parameters in declaration order.
    pub fn required_params(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|p| p.required)
    }

    /// Optional parameters in declaration order.
    pub fn optional_params(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|p| !p.required)
    }

    /// All parameters, required first, then optional.
    pub fn all_params(&self) -> Vec<&Parameter> {
        self.required_params().chain(self.optional_params()).collect()
    }

    /// Distinct error type names in declaration order.
    pub fn error_type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for error in &self.errors {
            if !names.contains(&error.type_name.as_str()) {
                names.push(&error.type_name);
            }
        }
        names
    }
}

#[derive(Deserialize)]
struct RawApiModel {
    #[serde(default)]
    types: Vec<Type>,
    #[serde(default)]
    methods: Vec<Method>,
}

/// Complete API model
#[derive(Debug, Clone, Serialize)]
pub struct ApiModel {
    types: BTreeMap<String, Type>,
    methods: Vec<Method>,
}

impl ApiModel {
    /// Build a model, seeding the intrinsic types the model does not define.
    pub fn new(types: Vec<Type>, methods: Vec<Method>) -> Self {
        let mut by_name: BTreeMap<String, Type> =
            types.into_iter().map(|t| (t.name.clone(), t)).collect();
        for name in INTRINSIC_TYPES {
            by_name
                .entry(name.to_string())
                .or_insert_with(|| Type::intrinsic(name));
        }
        Self {
            types: by_name,
            methods,
        }
    }

    /// Deserialize a model from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawApiModel = serde_json::from_str(json)?;
        Ok(Self::new(raw.types, raw.methods))
    }

    /// Read and deserialize a model file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| GenError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// All types in canonical (name) order.
    pub fn sorted_types(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    /// Look up a type by name.
    pub fn find_type(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    /// Look up a method by name.
    pub fn find_method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Request type bundling the method's parameters.
    ///
    /// Only methods with more than one optional parameter get one; the
    /// properties follow [`Method::all_params`] order.
    pub fn derive_request_type(&self, method: &Method) -> Option<Type> {
        if method.optional_params().count() <= 1 {
            return None;
        }
        let properties = method
            .all_params()
            .into_iter()
            .map(|p| Property {
                name: p.name.clone(),
                type_name: p.type_name.clone(),
                array: p.array,
                nullable: p.nullable(),
                read_only: false,
                description: p.description.clone(),
            })
            .collect();
        Some(Type {
            name: format!("Request{}", to_pascal_case(&method.name)),
            kind: TypeKind::Request,
            properties,
            description: Some(format!(
                "Dynamically generated request type for {}",
                method.name
            )),
        })
    }

    /// Variant of `ty` with read-only properties removed.
    ///
    /// Intrinsic types and types without read-only properties need none.
    pub fn derive_writeable_type(&self, ty: &Type) -> Option<Type> {
        if ty.is_intrinsic() || !ty.has_read_only() {
            return None;
        }
        Some(Type {
            name: format!("Write{}", ty.name),
            kind: TypeKind::Writeable,
            properties: ty
                .properties
                .iter()
                .filter(|p| !p.read_only)
                .cloned()
                .collect(),
            description: Some(format!(
                "Dynamically generated writeable type for {} removes read-only properties",
                ty.name
            )),
        })
    }
}
