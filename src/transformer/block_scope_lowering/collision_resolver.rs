//! # Collision Resolution
//!
//! Once a `let`/`const` binding is hoisted to function scope it can collide
//! with a sibling block's binding of the same name, or with a binding
//! already claimed at the hoist scope by an earlier declaration in source
//! order. This module decides, at the point each declaration is visited,
//! whether it needs a fresh name before anything else touches it.

use std::collections::HashMap;

use super::adapter::{renamed_binding_name, LoweringScopeId, ScopeAdapter, UniqueIdSupplier, VarKind};

/// Maps `(scope the binding was declared in, original source name)` to the
/// name it was renamed to. Empty for programs with no colliding block
/// scopes, which is the common case.
#[derive(Debug, Default)]
pub struct RenameTable {
    entries: HashMap<(LoweringScopeId, String), String>,
}

impl RenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, scope: LoweringScopeId, original: &str, resolved: &str) {
        self.entries.insert((scope, original.to_string()), resolved.to_string());
    }

    pub fn get(&self, scope: LoweringScopeId, original: &str) -> Option<&str> {
        self.entries.get(&(scope, original.to_string())).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Declares a block-scoped binding, renaming it first if its name is
/// already claimed at the hoist scope. Returns the name callers should use
/// from here on (the original name, unless a rename was necessary).
///
/// `declaring_scope` is the block scope the `let`/`const` actually lives
/// in; the binding's hoisted home is `declaring_scope`'s closest function
/// (or global) scope.
pub fn resolve_and_declare(
    adapter: &mut ScopeAdapter,
    ids: &mut UniqueIdSupplier,
    rename_table: &mut RenameTable,
    declaring_scope: LoweringScopeId,
    original_name: &str,
    kind: VarKind,
) -> String {
    let hoist_scope = adapter.closest_hoist_scope(declaring_scope);

    let resolved_name = if hoist_scope != declaring_scope && adapter.is_bound_in_scope(hoist_scope, original_name) {
        let fresh = renamed_binding_name(original_name, ids.next_id());
        rename_table.record(declaring_scope, original_name, &fresh);
        fresh
    } else {
        original_name.to_string()
    };

    adapter.declare_renamed(declaring_scope, original_name, &resolved_name, kind);
    if hoist_scope != declaring_scope {
        adapter.declare(hoist_scope, &resolved_name, kind);
    }
    resolved_name
}
