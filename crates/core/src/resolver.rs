//! Type reference counting and derived type materialization.
//!
//! A [`TypeResolver`] lives for exactly one generation pass. It records how
//! often each type is referenced while methods and models are rendered, and
//! lazily derives the auxiliary request and writeable types the model rules
//! call for. At the end of the pass [`TypeResolver::referenced_type_names`]
//! is the authoritative list of declarations to emit.
//!
//! Counts only ever grow. Derived types are memoized per method/type, so
//! asking twice returns the same type under the same name.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::model::{ApiModel, Method, Type, TypeKind};

/// Reference summary for one type after a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeReference {
    /// Type name
    pub name: String,
    /// Type kind
    pub kind: TypeKind,
    /// Number of references counted during the pass
    pub ref_count: usize,
    /// Whether the type is emitted as a declaration
    pub emitted: bool,
}

/// Per-pass reference counts and derived type cache
#[derive(Debug)]
pub struct TypeResolver<'a> {
    api: &'a ApiModel,
    needs_request_types: bool,
    ref_counts: HashMap<String, usize>,
    /// method name -> derived request type name (None = model declined)
    request_types: HashMap<String, Option<String>>,
    /// type name -> derived writeable type name (None = model declined)
    writeable_types: HashMap<String, Option<String>>,
    derived: BTreeMap<String, Type>,
}

impl<'a> TypeResolver<'a> {
    /// Start a fresh pass over `api`.
    pub fn new(api: &'a ApiModel, needs_request_types: bool) -> Self {
        Self {
            api,
            needs_request_types,
            ref_counts: HashMap::new(),
            request_types: HashMap::new(),
            writeable_types: HashMap::new(),
            derived: BTreeMap::new(),
        }
    }

    /// Count one reference to `name` and return the new count.
    pub fn reference(&mut self, name: &str) -> usize {
        let count = self.ref_counts.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Current reference count of `name`.
    pub fn ref_count(&self, name: &str) -> usize {
        self.ref_counts.get(name).copied().unwrap_or(0)
    }

    /// Look up a model or derived type by name.
    pub fn find_type(&self, name: &str) -> Option<&Type> {
        self.api.find_type(name).or_else(|| self.derived.get(name))
    }

    /// Model and derived types in canonical (name) order.
    pub fn sorted_types(&self) -> Vec<&Type> {
        let mut types: BTreeMap<&str, &Type> = self
            .api
            .sorted_types()
            .map(|t| (t.name.as_str(), t))
            .collect();
        types.extend(self.derived.values().map(|t| (t.name.as_str(), t)));
        types.into_values().collect()
    }

    /// Request type for `method`, referenced once per call.
    ///
    /// Returns `None` without side effects when this pass does not use
    /// request types, and `None` when the model declines to derive one.
    pub fn request_type_for(&mut self, method: &Method) -> Option<String> {
        if !self.needs_request_types {
            return None;
        }
        let name = if let Some(cached) = self.request_types.get(&method.name) {
            cached.clone()
        } else {
            let derived = self.api.derive_request_type(method).map(|t| self.register(t));
            if let Some(name) = &derived {
                debug!(method = %method.name, request_type = %name, "Derived request type.");
            }
            self.request_types.insert(method.name.clone(), derived.clone());
            derived
        }?;
        self.reference(&name);
        Some(name)
    }

    /// Writeable variant of `ty`, referenced once per call.
    ///
    /// Returns `None` for absent input and when the type has nothing to strip.
    pub fn writeable_type_for(&mut self, ty: Option<&Type>) -> Option<&Type> {
        let ty = ty?;
        let name = if let Some(cached) = self.writeable_types.get(&ty.name) {
            cached.clone()
        } else {
            let derived = self.api.derive_writeable_type(ty).map(|t| self.register(t));
            if let Some(name) = &derived {
                debug!(source_type = %ty.name, writeable_type = %name, "Derived writeable type.");
            }
            self.writeable_types.insert(ty.name.clone(), derived.clone());
            derived
        }?;
        self.reference(&name);
        self.derived.get(&name)
    }

    /// Writeable variant name for the type called `type_name`, if any.
    pub fn writeable_type_name(&mut self, type_name: &str) -> Option<String> {
        let ty = self.find_type(type_name).cloned();
        self.writeable_type_for(ty.as_ref()).map(|w| w.name.clone())
    }

    /// Names to emit: referenced at least once and not intrinsic, in
    /// canonical order. Query only after every method has been rendered.
    pub fn referenced_type_names(&self) -> Vec<String> {
        self.sorted_types()
            .into_iter()
            .filter(|t| self.ref_count(&t.name) > 0 && !t.is_intrinsic())
            .map(|t| t.name.clone())
            .collect()
    }

    /// Per-type counts and emission decisions, in canonical order.
    pub fn reference_report(&self) -> Vec<TypeReference> {
        self.sorted_types()
            .into_iter()
            .map(|t| {
                let ref_count = self.ref_count(&t.name);
                TypeReference {
                    name: t.name.clone(),
                    kind: t.kind,
                    ref_count,
                    emitted: ref_count > 0 && !t.is_intrinsic(),
                }
            })
            .collect()
    }

    /// Store a derived type under a name no other type uses.
    fn register(&mut self, mut ty: Type) -> String {
        let base = ty.name.clone();
        let mut suffix = 1;
        while self.api.find_type(&ty.name).is_some() || self.derived.contains_key(&ty.name) {
            suffix += 1;
            ty.name = format!("{base}{suffix}");
        }
        let name = ty.name.clone();
        self.derived.insert(name.clone(), ty);
        name
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::tests::test_model;
    use crate::model::Property;

    #[test]
    fn test_request_type_counted_per_call() {
        let api = test_model();
        let search = api.find_method("search_users").unwrap();
        let mut cx = TypeResolver::new(&api, true);

        let first = cx.request_type_for(search).unwrap();
        let second = cx.request_type_for(search).unwrap();
        assert_eq!(first, "RequestSearchUsers");
        assert_eq!(first, second);
        assert_eq!(cx.ref_count(&first), 2);

        let names = cx.referenced_type_names();
        assert_eq!(names.iter().filter(|n| **n == first).count(), 1);
    }

    #[test]
    fn test_request_types_disabled_has_no_side_effect() {
        let api = test_model();
        let search = api.find_method("search_users").unwrap();
        let mut cx = TypeResolver::new(&api, false);

        assert!(cx.request_type_for(search).is_none());
        assert!(cx.find_type("RequestSearchUsers").is_none());
        assert!(cx.referenced_type_names().is_empty());
    }

    #[test]
    fn test_request_type_declined() {
        let api = test_model();
        let update = api.find_method("update_user").unwrap();
        let mut cx = TypeResolver::new(&api, true);

        assert!(cx.request_type_for(update).is_none());
        assert!(cx.request_type_for(update).is_none());
        assert!(cx.referenced_type_names().is_empty());
    }

    #[test]
    fn test_writeable_type_memoized_and_counted() {
        let api = test_model();
        let user = api.find_type("User").unwrap();
        let mut cx = TypeResolver::new(&api, false);

        let name = cx.writeable_type_for(Some(user)).unwrap().name.clone();
        assert_eq!(name, "WriteUser");
        assert_eq!(cx.writeable_type_name("User").as_deref(), Some("WriteUser"));
        assert_eq!(cx.ref_count("WriteUser"), 2);
        // the source type is not referenced by deriving from it
        assert_eq!(cx.ref_count("User"), 0);
        assert_eq!(cx.referenced_type_names(), ["WriteUser"]);
    }

    #[test]
    fn test_writeable_type_absent_or_unneeded() {
        let api = test_model();
        let mut cx = TypeResolver::new(&api, false);

        assert!(cx.writeable_type_for(None).is_none());
        assert!(cx.writeable_type_name("Role").is_none());
        assert!(cx.writeable_type_name("NoSuchType").is_none());
        assert!(cx.referenced_type_names().is_empty());
    }

    #[test]
    fn test_unreferenced_and_intrinsic_types_pruned() {
        let api = test_model();
        let mut cx = TypeResolver::new(&api, false);

        cx.reference("string");
        cx.reference("string");
        cx.reference("Role");
        assert_eq!(cx.ref_count("string"), 2);
        assert_eq!(cx.ref_count("Unused"), 0);
        assert_eq!(cx.referenced_type_names(), ["Role"]);
    }

    #[test]
    fn test_type_map_and_derivation_share_counts() {
        let api = test_model();
        let user = api.find_type("User").unwrap();
        let mut cx = TypeResolver::new(&api, false);

        // reference path and derivation path both count, additively
        cx.reference("User");
        cx.reference("WriteUser");
        cx.writeable_type_for(Some(user));
        assert_eq!(cx.ref_count("User"), 1);
        assert_eq!(cx.ref_count("WriteUser"), 2);
        assert_eq!(cx.referenced_type_names(), ["User", "WriteUser"]);
    }

    #[test]
    fn test_derived_name_collision_gets_suffix() {
        let mut types: Vec<Type> = test_model().sorted_types().cloned().collect();
        types.push(Type {
            name: "WriteUser".into(),
            kind: TypeKind::Model,
            properties: vec![Property {
                name: "legacy".into(),
                type_name: "string".into(),
                array: false,
                nullable: false,
                read_only: false,
                description: None,
            }],
            description: None,
        });
        let api = ApiModel::new(types, test_model().methods().to_vec());
        let mut cx = TypeResolver::new(&api, false);

        assert_eq!(cx.writeable_type_name("User").as_deref(), Some("WriteUser2"));
        assert_eq!(cx.find_type("WriteUser2").unwrap().kind, TypeKind::Writeable);
        assert_eq!(cx.find_type("WriteUser").unwrap().kind, TypeKind::Model);
    }

    #[test]
    fn test_sorted_types_include_derived() {
        let api = test_model();
        let search = api.find_method("search_users").unwrap();
        let mut cx = TypeResolver::new(&api, true);
        cx.request_type_for(search);
        cx.writeable_type_name("User");

        let names: Vec<_> = cx.sorted_types().iter().map(|t| t.name.clone()).collect();
        assert!(names.contains(&"RequestSearchUsers".to_string()));
        assert!(names.contains(&"WriteUser".to_string()));
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_reference_report() {
        let api = test_model();
        let mut cx = TypeResolver::new(&api, false);
        cx.reference("Role");
        cx.reference("int64");

        let report = cx.reference_report();
        let role = report.iter().find(|r| r.name == "Role").unwrap();
        assert_eq!(role.ref_count, 1);
        assert!(role.emitted);
        let int64 = report.iter().find(|r| r.name == "int64").unwrap();
        assert_eq!(int64.kind, TypeKind::Intrinsic);
        assert!(!int64.emitted);
        let unused = report.iter().find(|r| r.name == "Unused").unwrap();
        assert!(!unused.emitted);
    }

    #[test]
    fn test_fresh_passes_do_not_share_counts() {
        let api = test_model();
        let mut first = TypeResolver::new(&api, false);
        first.reference("Role");
        let second = TypeResolver::new(&api, false);
        assert_eq!(second.ref_count("Role"), 0);
        assert!(second.referenced_type_names().is_empty());
    }
}
