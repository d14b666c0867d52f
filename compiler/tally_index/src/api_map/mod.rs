//! In-memory symbol index.
//!
//! The `ApiMap` owns every mapped `SourceMap` and indexes their pins by
//! path, by namespace member, and by variable owner. Lookups return borrows
//! into the owned source maps.
//!
//! # Design
//!
//! - Pins are referenced by `PinRef` (source index, pin index), so the
//!   tables stay small and never clone pins
//! - Ancestry is derived from namespace pins plus the built-in core table
//! - Method stacks are memoized behind a `parking_lot::RwLock`; the cache
//!   is cleared whenever a source is (re)mapped and never changes results

mod builtins;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{NamespaceKind, Pin, PinKind, Scope, SourceMap, SymbolIndex};

/// Handle to a pin owned by one of the mapped sources.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
struct PinRef {
    source: usize,
    pin: usize,
}

#[derive(Clone, Debug)]
struct MappedSource {
    map: SourceMap,
    bundled: bool,
}

#[derive(Clone, Debug)]
struct NamespaceInfo {
    kind: NamespaceKind,
    /// Superclass name as written; qualified on demand.
    superclass: Option<String>,
    includes: Vec<String>,
}

type MethodKey = (String, Scope, String);

/// Whole-program symbol index built from source maps.
#[derive(Debug)]
pub struct ApiMap {
    sources: Vec<MappedSource>,
    by_filename: FxHashMap<String, usize>,

    // === Tables rebuilt by `reindex` ===
    namespaces: FxHashMap<String, NamespaceInfo>,
    path_pins: FxHashMap<String, Vec<PinRef>>,
    methods: FxHashMap<MethodKey, Vec<PinRef>>,
    instance_variables: FxHashMap<(String, Scope), Vec<PinRef>>,
    class_variables: FxHashMap<String, Vec<PinRef>>,

    /// Memoized `get_method_stack` results.
    stack_cache: RwLock<FxHashMap<MethodKey, Vec<PinRef>>>,
}

impl ApiMap {
    /// An index holding only the built-in class hierarchy.
    pub fn new() -> Self {
        let mut map = ApiMap {
            sources: Vec::new(),
            by_filename: FxHashMap::default(),
            namespaces: FxHashMap::default(),
            path_pins: FxHashMap::default(),
            methods: FxHashMap::default(),
            instance_variables: FxHashMap::default(),
            class_variables: FxHashMap::default(),
            stack_cache: RwLock::new(FxHashMap::default()),
        };
        map.reindex();
        map
    }

    /// Map a project source. Its pins count as internal.
    pub fn map(&mut self, source: SourceMap) {
        self.insert(source, true);
    }

    /// Map a dependency or stub source. Its pins count as external.
    pub fn map_external(&mut self, source: SourceMap) {
        self.insert(source, false);
    }

    /// Builder form of [`Self::map`].
    #[must_use]
    pub fn with_source(mut self, source: SourceMap) -> Self {
        self.map(source);
        self
    }

    /// Builder form of [`Self::map_external`].
    #[must_use]
    pub fn with_external(mut self, source: SourceMap) -> Self {
        self.map_external(source);
        self
    }

    #[tracing::instrument(level = "debug", skip_all, fields(file = source.filename(), bundled = bundled))]
    fn insert(&mut self, source: SourceMap, bundled: bool) {
        let entry = MappedSource {
            map: source,
            bundled,
        };
        match self.by_filename.get(entry.map.filename()) {
            Some(&at) => self.sources[at] = entry,
            None => {
                self.by_filename
                    .insert(entry.map.filename().to_owned(), self.sources.len());
                self.sources.push(entry);
            }
        }
        self.reindex();
    }

    fn reindex(&mut self) {
        self.namespaces.clear();
        self.path_pins.clear();
        self.methods.clear();
        self.instance_variables.clear();
        self.class_variables.clear();
        self.stack_cache.get_mut().clear();

        for &(path, superclass, kind, includes) in builtins::CORE_NAMESPACES {
            self.namespaces.insert(
                path.to_owned(),
                NamespaceInfo {
                    kind,
                    superclass: superclass.map(str::to_owned),
                    includes: includes.iter().map(|s| (*s).to_owned()).collect(),
                },
            );
        }

        for (source_idx, source) in self.sources.iter().enumerate() {
            for (pin_idx, pin) in source.map.pins().iter().enumerate() {
                let r = PinRef {
                    source: source_idx,
                    pin: pin_idx,
                };
                let path = pin.path();
                if !path.is_empty() {
                    self.path_pins.entry(path.clone()).or_default().push(r);
                }
                match &pin.kind {
                    PinKind::Namespace {
                        kind,
                        superclass,
                        includes,
                    } => {
                        if path.is_empty() {
                            continue;
                        }
                        let info = self.namespaces.entry(path).or_insert(NamespaceInfo {
                            kind: *kind,
                            superclass: None,
                            includes: Vec::new(),
                        });
                        if superclass.is_some() {
                            info.superclass.clone_from(superclass);
                        }
                        info.includes.extend(includes.iter().cloned());
                    }
                    PinKind::Method(_) | PinKind::Attribute { .. } => {
                        let key = (
                            pin.context.namespace.clone(),
                            pin.context.scope,
                            pin.name.clone(),
                        );
                        self.methods.entry(key).or_default().push(r);
                    }
                    PinKind::InstanceVariable { .. } => {
                        let key = (pin.context.namespace.clone(), pin.context.scope);
                        self.instance_variables.entry(key).or_default().push(r);
                    }
                    PinKind::ClassVariable { .. } => {
                        self.class_variables
                            .entry(pin.context.namespace.clone())
                            .or_default()
                            .push(r);
                    }
                    PinKind::Constant { .. }
                    | PinKind::Parameter { .. }
                    | PinKind::LocalVariable { .. } => {}
                }
            }
        }
        tracing::debug!(
            sources = self.sources.len(),
            namespaces = self.namespaces.len(),
            methods = self.methods.len(),
            "index rebuilt"
        );
    }

    fn resolve(&self, r: PinRef) -> &Pin {
        &self.sources[r.source].map.pins()[r.pin]
    }

    fn resolve_all(&self, refs: &[PinRef]) -> Vec<&Pin> {
        refs.iter().map(|r| self.resolve(*r)).collect()
    }

    fn exists(&self, path: &str) -> bool {
        self.namespaces.contains_key(path) || self.path_pins.contains_key(path)
    }

    /// `namespace` followed by everything it inherits from or includes,
    /// nearest first.
    pub fn ancestors(&self, namespace: &str) -> Vec<String> {
        let mut result = Vec::new();
        let mut seen = FxHashSet::default();
        let mut current = Some(namespace.to_owned());
        while let Some(name) = current.take() {
            if !seen.insert(name.clone()) {
                break;
            }
            result.push(name.clone());
            let Some(info) = self.namespaces.get(&name) else {
                break;
            };
            self.push_includes(&name, info, &mut result, &mut seen);
            current = match &info.superclass {
                Some(sup) => self.qualify(sup, &name).or_else(|| Some(sup.clone())),
                None if info.kind == NamespaceKind::Class && name != "BasicObject" => {
                    Some("Object".to_owned())
                }
                None => None,
            };
        }
        // Modules respond to everything an Object does.
        if self.namespaces.get(namespace).is_some_and(|info| info.kind == NamespaceKind::Module) {
            for implicit in ["Object", "BasicObject"] {
                if seen.insert(implicit.to_owned()) {
                    result.push(implicit.to_owned());
                }
            }
        }
        result
    }

    fn push_includes(
        &self,
        owner: &str,
        info: &NamespaceInfo,
        result: &mut Vec<String>,
        seen: &mut FxHashSet<String>,
    ) {
        for module in info.includes.iter().rev() {
            let path = self.qualify(module, owner).unwrap_or_else(|| module.clone());
            if !seen.insert(path.clone()) {
                continue;
            }
            result.push(path.clone());
            if let Some(inner) = self.namespaces.get(&path) {
                self.push_includes(&path, inner, result, seen);
            }
        }
    }

    fn compute_method_stack(&self, namespace: &str, name: &str, scope: Scope) -> Vec<PinRef> {
        let mut refs = Vec::new();
        let mut push = |ns: &str, scope: Scope| {
            if let Some(found) = self.methods.get(&(ns.to_owned(), scope, name.to_owned())) {
                refs.extend(found.iter().copied());
            }
        };
        for ancestor in self.ancestors(namespace) {
            push(&ancestor, scope);
        }
        if scope == Scope::Class {
            for ancestor in self.ancestors("Class") {
                push(&ancestor, Scope::Instance);
            }
        }
        // Top-level definitions are visible everywhere.
        if !namespace.is_empty() || scope == Scope::Class {
            push("", Scope::Instance);
        }
        refs
    }
}

impl Default for ApiMap {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolIndex for ApiMap {
    fn source_map(&self, filename: &str) -> Option<&SourceMap> {
        self.by_filename
            .get(filename)
            .map(|&at| &self.sources[at].map)
    }

    fn bundled(&self, filename: &str) -> bool {
        self.by_filename
            .get(filename)
            .is_some_and(|&at| self.sources[at].bundled)
    }

    fn qualify(&self, name: &str, context: &str) -> Option<String> {
        if let Some(rooted) = name.strip_prefix("::") {
            return self.exists(rooted).then(|| rooted.to_owned());
        }
        let mut context = context;
        loop {
            let candidate = if context.is_empty() {
                name.to_owned()
            } else {
                format!("{context}::{name}")
            };
            if self.exists(&candidate) {
                return Some(candidate);
            }
            if context.is_empty() {
                return None;
            }
            context = context.rsplit_once("::").map_or("", |(parent, _)| parent);
        }
    }

    fn super_and_sub(&self, sup: &str, sub: &str) -> bool {
        let sup = builtins::literal_class(sup);
        let sub = builtins::literal_class(sub);
        if sup == sub {
            return true;
        }
        if sup == "Boolean" && matches!(sub, "TrueClass" | "FalseClass") {
            return true;
        }
        self.ancestors(sub).iter().any(|a| a == sup)
    }

    fn get_method_stack(&self, namespace: &str, name: &str, scope: Scope) -> Vec<&Pin> {
        let key = (namespace.to_owned(), scope, name.to_owned());
        if let Some(refs) = self.stack_cache.read().get(&key) {
            return self.resolve_all(refs);
        }
        let refs = self.compute_method_stack(namespace, name, scope);
        let pins = self.resolve_all(&refs);
        self.stack_cache.write().insert(key, refs);
        pins
    }

    fn get_instance_variable_pins(&self, namespace: &str, scope: Scope) -> Vec<&Pin> {
        let owners = match scope {
            Scope::Instance => self.ancestors(namespace),
            Scope::Class => vec![namespace.to_owned()],
        };
        owners
            .into_iter()
            .filter_map(|ns| self.instance_variables.get(&(ns, scope)))
            .flat_map(|refs| self.resolve_all(refs))
            .collect()
    }

    fn get_class_variable_pins(&self, namespace: &str) -> Vec<&Pin> {
        self.ancestors(namespace)
            .into_iter()
            .filter_map(|ns| self.class_variables.get(&ns))
            .flat_map(|refs| self.resolve_all(refs))
            .collect()
    }

    fn get_path_pins(&self, path: &str) -> Vec<&Pin> {
        self.path_pins
            .get(path)
            .map(|refs| self.resolve_all(refs))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests;
