//! # Scope/AST Adapter
//!
//! The seam between the lowering pass and the rest of the compiler. This
//! pass owns its own scope table rather than mutating `analyzer::ScopeTree`
//! in place: scope/binding handles are opaque indices into tables the pass
//! itself populates during its single traversal, discarded once the pass
//! returns. This mirrors the teacher's own `analyzer::scope_builder`
//! push-scope/restore-scope traversal style, scoped down to what this pass
//! needs (no semantic-safety bookkeeping, no export tracking).

use std::collections::HashMap;

use crate::parser::ast_types::TypeTag;

/// Handle into [`ScopeAdapter`]'s owned scope table.
pub type LoweringScopeId = u32;

/// What a lowering-pass scope stands for. `Loop` is the kind
/// `closest_enclosing_loop` stops at; everything else just threads lookups
/// upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoweringScopeKind {
    Global,
    Function,
    Block,
    Loop,
    Catch,
}

/// The declared kind of a binding, mirroring spec's `Var` record
/// `(name, declaring_node, origin_input, kind)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
    Param,
    Catch,
}

impl VarKind {
    pub fn is_block_scoped(self) -> bool {
        matches!(self, VarKind::Let | VarKind::Const)
    }
}

/// An opaque binding record.
#[derive(Debug, Clone)]
pub struct Var {
    pub name: String,
    pub declaring_scope: LoweringScopeId,
    pub kind: VarKind,
}

#[derive(Debug)]
struct LoweringScope {
    kind: LoweringScopeKind,
    parent: Option<LoweringScopeId>,
    bindings: HashMap<String, Var>,
}

/// Owned scope table for one run of the lowering pass.
#[derive(Debug)]
pub struct ScopeAdapter {
    scopes: Vec<LoweringScope>,
}

impl Default for ScopeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeAdapter {
    /// Creates a fresh adapter with a single global scope at id 0.
    pub fn new() -> Self {
        Self {
            scopes: vec![LoweringScope {
                kind: LoweringScopeKind::Global,
                parent: None,
                bindings: HashMap::new(),
            }],
        }
    }

    pub fn root(&self) -> LoweringScopeId {
        0
    }

    /// Pushes a new scope as a child of `parent` and returns its handle.
    pub fn push_scope(&mut self, kind: LoweringScopeKind, parent: LoweringScopeId) -> LoweringScopeId {
        self.scopes.push(LoweringScope {
            kind,
            parent: Some(parent),
            bindings: HashMap::new(),
        });
        (self.scopes.len() - 1) as LoweringScopeId
    }

    fn scope(&self, id: LoweringScopeId) -> &LoweringScope {
        &self.scopes[id as usize]
    }

    fn scope_mut(&mut self, id: LoweringScopeId) -> &mut LoweringScope {
        &mut self.scopes[id as usize]
    }

    pub fn kind_of(&self, id: LoweringScopeId) -> LoweringScopeKind {
        self.scope(id).kind
    }

    pub fn parent_of(&self, id: LoweringScopeId) -> Option<LoweringScopeId> {
        self.scope(id).parent
    }

    /// Declares `name` in `scope`, overwriting whatever was bound there.
    pub fn declare(&mut self, scope: LoweringScopeId, name: &str, kind: VarKind) {
        self.scope_mut(scope).bindings.insert(
            name.to_string(),
            Var {
                name: name.to_string(),
                declaring_scope: scope,
                kind,
            },
        );
    }

    /// Removes a binding from `scope`, if present.
    pub fn undeclare(&mut self, scope: LoweringScopeId, name: &str) {
        self.scope_mut(scope).bindings.remove(name);
    }

    /// Declares `lookup_name` in `scope` but records `resolved_name` as the
    /// binding's actual (possibly renamed) identifier, so later lookups by
    /// the original source name still find the renamed binding.
    pub fn declare_renamed(
        &mut self,
        scope: LoweringScopeId,
        lookup_name: &str,
        resolved_name: &str,
        kind: VarKind,
    ) {
        self.scope_mut(scope).bindings.insert(
            lookup_name.to_string(),
            Var {
                name: resolved_name.to_string(),
                declaring_scope: scope,
                kind,
            },
        );
    }

    /// True if `name` is bound directly in `scope` (not an ancestor).
    pub fn is_bound_in_scope(&self, scope: LoweringScopeId, name: &str) -> bool {
        self.scope(scope).bindings.contains_key(name)
    }

    /// Resolves `name` by walking the scope chain starting at `scope`.
    pub fn lookup(&self, scope: LoweringScopeId, name: &str) -> Option<&Var> {
        let mut current = scope;
        loop {
            if let Some(var) = self.scope(current).bindings.get(name) {
                return Some(var);
            }
            match self.scope(current).parent {
                Some(parent) => current = parent,
                None => return None,
            }
        }
    }

    /// The nearest enclosing function or global scope (§3, `closest_hoist_scope`).
    pub fn closest_hoist_scope(&self, scope: LoweringScopeId) -> LoweringScopeId {
        let mut current = scope;
        loop {
            match self.scope(current).kind {
                LoweringScopeKind::Function | LoweringScopeKind::Global => return current,
                _ => match self.scope(current).parent {
                    Some(parent) => current = parent,
                    None => return current,
                },
            }
        }
    }

    /// The nearest enclosing loop scope, per §4.2 step 3: stop at the first
    /// scope whose root is a loop (covers both "declared directly on the
    /// loop head" and "declared in the loop's body block", since walking
    /// upward from the body block reaches the loop scope next). Crossing a
    /// function or the global scope first means the variable is not
    /// loop-bound.
    pub fn closest_enclosing_loop(&self, scope: LoweringScopeId) -> Option<LoweringScopeId> {
        let mut current = scope;
        loop {
            match self.scope(current).kind {
                LoweringScopeKind::Loop => return Some(current),
                LoweringScopeKind::Function | LoweringScopeKind::Global => return None,
                _ => match self.scope(current).parent {
                    Some(parent) => current = parent,
                    None => return None,
                },
            }
        }
    }

    /// Walking from `from` up to (not including) `stop_at`, the last
    /// function scope encountered, if any (§4.2 step 5).
    pub fn outermost_function_between(
        &self,
        from: LoweringScopeId,
        stop_at: LoweringScopeId,
    ) -> Option<LoweringScopeId> {
        let mut current = from;
        let mut last_function = None;
        while current != stop_at {
            if self.scope(current).kind == LoweringScopeKind::Function {
                last_function = Some(current);
            }
            match self.scope(current).parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        last_function
    }
}

/// Monotonically increasing fresh-id source. The core never reads clocks or
/// random sources; every generated name embeds one of these ids.
#[derive(Debug, Default)]
pub struct UniqueIdSupplier {
    next: u32,
}

impl UniqueIdSupplier {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// External type/color attribution system. The pass only ever forwards a
/// tag onto the replacement node it synthesizes; it never inspects one.
pub trait TypeOracle {
    fn tag_of(&self, var: &Var) -> Option<TypeTag>;
}

/// Default oracle used by the CLI and by tests: no type/color system wired
/// in, so every lookup is `None`.
#[derive(Debug, Default)]
pub struct NoopTypeOracle;

impl TypeOracle for NoopTypeOracle {
    fn tag_of(&self, _var: &Var) -> Option<TypeTag> {
        None
    }
}

/// Generated name grammar (§6): loop object `$jscomp$loop$<int>`.
pub fn loop_object_name(id: u32) -> String {
    format!("$jscomp$loop${}", id)
}

/// Generated name grammar (§6): property `$jscomp$loop$prop$<orig>$<int>`.
pub fn loop_property_name(var_name: &str, id: u32) -> String {
    format!("$jscomp$loop$prop${}${}", var_name, id)
}

/// Generated name grammar (§6): renamed binding `<orig>$<int>`.
pub fn renamed_binding_name(orig: &str, id: u32) -> String {
    format!("{}${}", orig, id)
}
