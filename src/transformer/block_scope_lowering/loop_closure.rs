//! # Loop-Closure Rewriting
//!
//! Walks the whole program once, resolving every `let`/`const` to a
//! (possibly renamed) binding as it goes, and — whenever a loop-scoped
//! binding turns out to be referenced from inside a function nested in the
//! loop body — relocating that binding's storage onto a per-iteration loop
//! object so each closure keeps the value it saw at the iteration that
//! created it.
//!
//! The two textbook phases (find captures, then rewrite the loop) are
//! fused around each loop's post-order point: the loop's body is visited
//! and resolved completely (including any loops nested inside it) before
//! its own capture set is known, and only then do we go back over that
//! same already-visited subtree to relocate the variables that turned out
//! to be captured. That second pass is local to one loop's statements, not
//! a second walk of the whole program.

use std::collections::{HashMap, HashSet};

use crate::parser::ast_types::{
    ArrowFunctionBody, Expression, ForInHead, ForInit, FunctionExpression, Identifier,
    ObjectProperty, Pattern, PropertyKey, PropertyKind, Statement, TypeTag, VariableDeclarationKind,
    VariableDeclarator,
};

use super::adapter::{
    loop_object_name, loop_property_name, LoweringScopeId, LoweringScopeKind, ScopeAdapter, TypeOracle,
    UniqueIdSupplier, VarKind,
};
use super::collision_resolver::{resolve_and_declare, RenameTable};

struct LoopFrame {
    scope_id: LoweringScopeId,
    object_id: u32,
    captured: HashSet<String>,
}

impl LoopFrame {
    fn new(scope_id: LoweringScopeId, object_id: u32) -> Self {
        Self {
            scope_id,
            object_id,
            captured: HashSet::new(),
        }
    }
}

/// Single run of the fused pass over one program.
pub struct ClosurePass<'a> {
    adapter: ScopeAdapter,
    ids: UniqueIdSupplier,
    rename_table: RenameTable,
    type_oracle: &'a dyn TypeOracle,
    loop_stack: Vec<LoopFrame>,
    undeclared: HashSet<String>,
}

/// Names referenced but never resolved to a declaration anywhere in the
/// program (globals, externs) — surfaced so a caller can cross-check them
/// against a known-externs list if it has one.
pub struct ClosurePassOutput {
    pub undeclared_names: Vec<String>,
}

impl<'a> ClosurePass<'a> {
    pub fn new(type_oracle: &'a dyn TypeOracle) -> Self {
        Self {
            adapter: ScopeAdapter::new(),
            ids: UniqueIdSupplier::new(),
            rename_table: RenameTable::new(),
            type_oracle,
            loop_stack: Vec::new(),
            undeclared: HashSet::new(),
        }
    }

    pub fn run(mut self, body: &mut Vec<Statement>) -> ClosurePassOutput {
        let root = self.adapter.root();
        self.hoist_functions_and_vars(body, root);
        self.visit_block(body, root);
        let mut undeclared: Vec<String> = self.undeclared.into_iter().collect();
        undeclared.sort();
        ClosurePassOutput { undeclared_names: undeclared }
    }

    /// `var`/function declarations are visible throughout their enclosing
    /// function before the line they appear on; a shallow pre-pass records
    /// them so forward references resolve during the main walk, mirroring
    /// `scope_builder`'s two-phase hoist-then-analyze traversal.
    fn hoist_functions_and_vars(&mut self, stmts: &[Statement], scope: LoweringScopeId) {
        for stmt in stmts {
            match stmt {
                Statement::VariableDeclaration { declarations, kind: VariableDeclarationKind::Var } => {
                    for decl in declarations {
                        if let Pattern::Identifier(id) = &decl.id {
                            let hoist_scope = self.adapter.closest_hoist_scope(scope);
                            self.adapter.declare(hoist_scope, &id.name, VarKind::Var);
                        }
                    }
                }
                Statement::FunctionDeclaration { id: Some(id), .. } => {
                    let hoist_scope = self.adapter.closest_hoist_scope(scope);
                    self.adapter.declare(hoist_scope, &id.name, VarKind::Var);
                }
                Statement::IfStatement { consequent, alternate, .. } => {
                    self.hoist_functions_and_vars(std::slice::from_ref(&**consequent), scope);
                    if let Some(alt) = alternate {
                        self.hoist_functions_and_vars(std::slice::from_ref(&**alt), scope);
                    }
                }
                Statement::BlockStatement { body } => self.hoist_functions_and_vars(body, scope),
                Statement::WhileStatement { body, .. } | Statement::DoWhileStatement { body, .. } => {
                    self.hoist_functions_and_vars(std::slice::from_ref(&**body), scope);
                }
                Statement::ForStatement { init, body, .. } => {
                    if let Some(ForInit::VariableDeclaration { declarations, kind: VariableDeclarationKind::Var }) =
                        init
                    {
                        for decl in declarations {
                            if let Pattern::Identifier(id) = &decl.id {
                                let hoist_scope = self.adapter.closest_hoist_scope(scope);
                                self.adapter.declare(hoist_scope, &id.name, VarKind::Var);
                            }
                        }
                    }
                    self.hoist_functions_and_vars(std::slice::from_ref(&**body), scope);
                }
                Statement::ForInStatement { left, body, .. } => {
                    if let ForInHead::VariableDeclaration { declarations, kind: VariableDeclarationKind::Var } = left
                    {
                        for decl in declarations {
                            if let Pattern::Identifier(id) = &decl.id {
                                let hoist_scope = self.adapter.closest_hoist_scope(scope);
                                self.adapter.declare(hoist_scope, &id.name, VarKind::Var);
                            }
                        }
                    }
                    self.hoist_functions_and_vars(std::slice::from_ref(&**body), scope);
                }
                Statement::LabeledStatement { body, .. } => {
                    self.hoist_functions_and_vars(std::slice::from_ref(&**body), scope);
                }
                Statement::TryStatement { block, handler, finalizer } => {
                    self.hoist_functions_and_vars(&block.body, scope);
                    if let Some(clause) = handler {
                        self.hoist_functions_and_vars(&clause.body.body, scope);
                    }
                    if let Some(fin) = finalizer {
                        self.hoist_functions_and_vars(&fin.body, scope);
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_block(&mut self, stmts: &mut Vec<Statement>, scope: LoweringScopeId) {
        let mut output = Vec::with_capacity(stmts.len());
        for mut stmt in stmts.drain(..) {
            let prelude = self.visit_statement(&mut stmt, scope);
            output.extend(prelude);
            output.push(stmt);
        }
        *stmts = output;
    }

    fn visit_statement(&mut self, stmt: &mut Statement, scope: LoweringScopeId) -> Vec<Statement> {
        match stmt {
            Statement::VariableDeclaration { declarations, kind } => {
                self.visit_variable_declaration(declarations, kind, scope);
                Vec::new()
            }
            Statement::FunctionDeclaration { params, body, .. } => {
                self.visit_function_body(params, body, scope);
                Vec::new()
            }
            Statement::ClassDeclaration { super_class, body, .. } => {
                if let Some(sc) = super_class {
                    self.visit_expression(sc, scope);
                }
                for element in &mut body.body {
                    self.visit_class_element(element, scope);
                }
                Vec::new()
            }
            Statement::ExpressionStatement { expression } => {
                self.visit_expression(expression, scope);
                Vec::new()
            }
            Statement::BlockStatement { body } => {
                let block_scope = self.adapter.push_scope(LoweringScopeKind::Block, scope);
                self.hoist_functions_and_vars(body, block_scope);
                self.visit_block(body, block_scope);
                Vec::new()
            }
            Statement::ReturnStatement { argument } => {
                if let Some(expr) = argument {
                    self.visit_expression(expr, scope);
                }
                Vec::new()
            }
            Statement::IfStatement { test, consequent, alternate } => {
                self.visit_expression(test, scope);
                let prelude = self.visit_statement(&mut **consequent, scope);
                self.splice_into(&mut **consequent, prelude);
                if let Some(alt) = alternate {
                    let prelude = self.visit_statement(&mut **alt, scope);
                    self.splice_into(&mut **alt, prelude);
                }
                Vec::new()
            }
            Statement::WhileStatement { .. } => self.visit_while_like(stmt, scope),
            Statement::DoWhileStatement { .. } => self.visit_while_like(stmt, scope),
            Statement::ForStatement { .. } => self.visit_for(stmt, scope),
            Statement::ForInStatement { .. } => self.visit_for_in(stmt, scope),
            Statement::ImportDeclaration { .. } | Statement::ExportNamedDeclaration { .. } => Vec::new(),
            Statement::LabeledStatement { body, .. } => {
                let prelude = self.visit_statement(&mut **body, scope);
                self.splice_into(&mut **body, prelude);
                Vec::new()
            }
            Statement::ContinueStatement { .. } | Statement::BreakStatement { .. } => Vec::new(),
            Statement::TryStatement { block, handler, finalizer } => {
                let try_scope = self.adapter.push_scope(LoweringScopeKind::Block, scope);
                self.hoist_functions_and_vars(&block.body, try_scope);
                self.visit_block(&mut block.body, try_scope);
                if let Some(clause) = handler {
                    let catch_scope = self.adapter.push_scope(LoweringScopeKind::Catch, scope);
                    if let Some(Pattern::Identifier(id)) = &clause.param {
                        self.adapter.declare(catch_scope, &id.name, VarKind::Catch);
                    }
                    self.hoist_functions_and_vars(&clause.body.body, catch_scope);
                    self.visit_block(&mut clause.body.body, catch_scope);
                }
                if let Some(fin) = finalizer {
                    let fin_scope = self.adapter.push_scope(LoweringScopeKind::Block, scope);
                    self.hoist_functions_and_vars(&fin.body, fin_scope);
                    self.visit_block(&mut fin.body, fin_scope);
                }
                Vec::new()
            }
            Statement::ThrowStatement { argument } => {
                self.visit_expression(argument, scope);
                Vec::new()
            }
            Statement::EmptyStatement => Vec::new(),
        }
    }

    /// Wraps the prelude statements collected for a single-statement body
    /// (`if (x) let y = ...;`-shaped code can't happen post-parse, but a
    /// loop whose body is not already a block can still need one) into a
    /// block so the prelude has somewhere to live.
    fn splice_into(&self, target: &mut Statement, prelude: Vec<Statement>) {
        if prelude.is_empty() {
            return;
        }
        let mut body = prelude;
        body.push(std::mem::replace(target, Statement::EmptyStatement));
        *target = Statement::BlockStatement { body };
    }

    fn visit_variable_declaration(
        &mut self,
        declarations: &mut [VariableDeclarator],
        kind: &VariableDeclarationKind,
        scope: LoweringScopeId,
    ) {
        for decl in declarations.iter_mut() {
            if let Some(init) = &mut decl.init {
                self.visit_expression(init, scope);
            } else if !matches!(kind, VariableDeclarationKind::Var)
                && self.adapter.closest_enclosing_loop(scope).is_some()
            {
                // An init-less `let`/`const` inside a loop needs an explicit
                // `undefined` so a later per-iteration relocation onto a loop
                // object re-initializes the property the same way lexical
                // re-binding would have. `visit_for_in` declares its head
                // binding through `declare_pattern` directly rather than
                // through here, so this never fires for a for-in head.
                decl.init = Some(Expression::Identifier(Identifier { name: "undefined".to_string() }));
            }
            self.declare_pattern(&mut decl.id, kind, scope);
        }
    }

    fn declare_pattern(&mut self, pattern: &mut Pattern, kind: &VariableDeclarationKind, scope: LoweringScopeId) {
        match pattern {
            Pattern::Identifier(id) => {
                let resolved = match kind {
                    VariableDeclarationKind::Var => {
                        let hoist_scope = self.adapter.closest_hoist_scope(scope);
                        if !self.adapter.is_bound_in_scope(hoist_scope, &id.name) {
                            self.adapter.declare(hoist_scope, &id.name, VarKind::Var);
                        }
                        id.name.clone()
                    }
                    VariableDeclarationKind::Let => resolve_and_declare(
                        &mut self.adapter,
                        &mut self.ids,
                        &mut self.rename_table,
                        scope,
                        &id.name,
                        VarKind::Let,
                    ),
                    VariableDeclarationKind::Const => resolve_and_declare(
                        &mut self.adapter,
                        &mut self.ids,
                        &mut self.rename_table,
                        scope,
                        &id.name,
                        VarKind::Const,
                    ),
                };
                id.name = resolved;
            }
            Pattern::ArrayPattern { elements } => {
                for element in elements.iter_mut().flatten() {
                    self.declare_pattern(element, kind, scope);
                }
            }
            Pattern::ObjectPattern { properties } => {
                for prop in properties {
                    match prop {
                        crate::parser::ast_types::ObjectPatternProperty::Property { value, .. } => {
                            self.declare_pattern(value, kind, scope);
                        }
                        crate::parser::ast_types::ObjectPatternProperty::RestElement { argument } => {
                            self.declare_pattern(argument, kind, scope);
                        }
                    }
                }
            }
            Pattern::AssignmentPattern { left, right } => {
                self.visit_expression(right, scope);
                self.declare_pattern(left, kind, scope);
            }
            Pattern::RestElement { argument } => self.declare_pattern(argument, kind, scope),
        }
    }

    fn visit_function_body(&mut self, params: &mut [Pattern], body: &mut crate::parser::ast_types::BlockStatement, scope: LoweringScopeId) {
        let function_scope = self.adapter.push_scope(LoweringScopeKind::Function, scope);
        for param in params.iter_mut() {
            self.declare_param(param, function_scope);
        }
        self.hoist_functions_and_vars(&body.body, function_scope);
        self.visit_block(&mut body.body, function_scope);
    }

    fn declare_param(&mut self, pattern: &mut Pattern, scope: LoweringScopeId) {
        match pattern {
            Pattern::Identifier(id) => self.adapter.declare(scope, &id.name, VarKind::Param),
            Pattern::ArrayPattern { elements } => {
                for el in elements.iter_mut().flatten() {
                    self.declare_param(el, scope);
                }
            }
            Pattern::ObjectPattern { properties } => {
                for prop in properties {
                    match prop {
                        crate::parser::ast_types::ObjectPatternProperty::Property { value, .. } => {
                            self.declare_param(value, scope)
                        }
                        crate::parser::ast_types::ObjectPatternProperty::RestElement { argument } => {
                            self.declare_param(argument, scope)
                        }
                    }
                }
            }
            Pattern::AssignmentPattern { left, right } => {
                self.visit_expression(right, scope);
                self.declare_param(left, scope);
            }
            Pattern::RestElement { argument } => self.declare_param(argument, scope),
        }
    }

    fn visit_class_element(&mut self, element: &mut crate::parser::ast_types::ClassElement, scope: LoweringScopeId) {
        use crate::parser::ast_types::ClassElement;
        match element {
            ClassElement::PropertyDefinition { value: Some(value), .. } => self.visit_expression(value, scope),
            ClassElement::PropertyDefinition { value: None, .. } => {}
            ClassElement::MethodDefinition { value, .. } => {
                let FunctionExpression { params, body, .. } = value;
                self.visit_function_body(params, body, scope);
            }
        }
    }

    fn visit_expression(&mut self, expr: &mut Expression, scope: LoweringScopeId) {
        match expr {
            Expression::Identifier(id) => self.resolve_reference(id, scope),
            Expression::Literal(_) => {}
            Expression::BinaryExpression { left, right, .. } => {
                self.visit_expression(left, scope);
                self.visit_expression(right, scope);
            }
            Expression::UnaryExpression { argument, .. } => self.visit_expression(argument, scope),
            Expression::AssignmentExpression { left, right, .. } => {
                self.visit_expression(left, scope);
                self.visit_expression(right, scope);
            }
            Expression::UpdateExpression { argument, .. } => self.visit_expression(argument, scope),
            Expression::CallExpression { callee, arguments } => {
                self.visit_expression(callee, scope);
                for arg in arguments {
                    self.visit_expression(arg, scope);
                }
            }
            Expression::MemberExpression { object, property, computed, .. } => {
                self.visit_expression(object, scope);
                if *computed {
                    self.visit_expression(property, scope);
                }
            }
            Expression::SequenceExpression { expressions } => {
                for e in expressions {
                    self.visit_expression(e, scope);
                }
            }
            Expression::FunctionExpression(func) => {
                self.visit_function_body(&mut func.params, &mut func.body, scope);
            }
            Expression::ArrowFunctionExpression { params, body, .. } => {
                let function_scope = self.adapter.push_scope(LoweringScopeKind::Function, scope);
                for param in params.iter_mut() {
                    self.declare_param(param, function_scope);
                }
                match body {
                    ArrowFunctionBody::BlockStatement(block) => {
                        self.hoist_functions_and_vars(&block.body, function_scope);
                        self.visit_block(&mut block.body, function_scope);
                    }
                    ArrowFunctionBody::Expression(expr) => self.visit_expression(expr, function_scope),
                }
            }
            Expression::ObjectExpression { properties } => {
                for prop in properties {
                    self.visit_object_property(prop, scope);
                }
            }
            Expression::ArrayExpression { elements } => {
                for el in elements.iter_mut().flatten() {
                    self.visit_expression(el, scope);
                }
            }
            Expression::TemplateLiteral { expressions, .. } => {
                for e in expressions {
                    self.visit_expression(e, scope);
                }
            }
            Expression::ConditionalExpression { test, consequent, alternate } => {
                self.visit_expression(test, scope);
                self.visit_expression(consequent, scope);
                self.visit_expression(alternate, scope);
            }
        }
    }

    fn visit_object_property(&mut self, prop: &mut ObjectProperty, scope: LoweringScopeId) {
        match prop {
            ObjectProperty::Property { value, .. } => self.visit_expression(value, scope),
            ObjectProperty::SpreadElement { argument } => self.visit_expression(argument, scope),
        }
    }

    /// Looks `id` up, applies whatever rename collision resolution
    /// produced, and — if it resolves to a binding owned by a loop frame
    /// currently on the stack and we're standing inside a function nested
    /// in that loop — marks the binding captured.
    fn resolve_reference(&mut self, id: &mut Identifier, scope: LoweringScopeId) {
        match self.adapter.lookup(scope, &id.name) {
            Some(var) => {
                let resolved_name = var.name.clone();
                let declaring_scope = var.declaring_scope;
                id.name = resolved_name.clone();

                if let Some(loop_scope) = self.adapter.closest_enclosing_loop(declaring_scope) {
                    if self.loop_stack.iter().any(|f| f.scope_id == loop_scope) {
                        let crosses_function = self
                            .adapter
                            .outermost_function_between(scope, loop_scope)
                            .is_some();
                        if crosses_function {
                            if let Some(frame) = self.loop_stack.iter_mut().find(|f| f.scope_id == loop_scope) {
                                frame.captured.insert(resolved_name);
                            }
                        }
                    }
                }
            }
            None => {
                self.undeclared.insert(id.name.clone());
            }
        }
    }

    fn visit_while_like(&mut self, stmt: &mut Statement, scope: LoweringScopeId) -> Vec<Statement> {
        let loop_scope = self.adapter.push_scope(LoweringScopeKind::Loop, scope);
        let object_id = self.ids.next_id();
        self.loop_stack.push(LoopFrame::new(loop_scope, object_id));

        match stmt {
            Statement::WhileStatement { test, body } => {
                self.visit_expression(test, loop_scope);
                self.visit_loop_body_block(&mut **body, loop_scope);
            }
            Statement::DoWhileStatement { body, test } => {
                self.visit_loop_body_block(&mut **body, loop_scope);
                self.visit_expression(test, loop_scope);
            }
            _ => unreachable!("visit_while_like only called for while/do-while"),
        }

        let frame = self.loop_stack.pop().expect("pushed above");
        if frame.captured.is_empty() {
            return Vec::new();
        }

        let body = match stmt {
            Statement::WhileStatement { body, .. } | Statement::DoWhileStatement { body, .. } => body,
            _ => unreachable!(),
        };
        self.materialize_capture(&frame, &mut **body, true)
    }

    fn visit_loop_body_block(&mut self, body: &mut Statement, loop_scope: LoweringScopeId) {
        match body {
            Statement::BlockStatement { body: stmts } => {
                self.hoist_functions_and_vars(stmts, loop_scope);
                self.visit_block(stmts, loop_scope);
            }
            other => {
                let prelude = self.visit_statement(other, loop_scope);
                self.splice_into(other, prelude);
            }
        }
    }

    fn visit_for(&mut self, stmt: &mut Statement, scope: LoweringScopeId) -> Vec<Statement> {
        let loop_scope = self.adapter.push_scope(LoweringScopeKind::Loop, scope);
        let object_id = self.ids.next_id();
        self.loop_stack.push(LoopFrame::new(loop_scope, object_id));

        let Statement::ForStatement { init, test, update, body } = stmt else {
            unreachable!("visit_for only called for ForStatement");
        };

        if let Some(for_init) = init {
            match for_init {
                ForInit::VariableDeclaration { declarations, kind } => {
                    self.visit_variable_declaration(declarations, kind, loop_scope);
                }
                ForInit::Expression(expr) => self.visit_expression(expr, loop_scope),
            }
        }
        if let Some(t) = test {
            self.visit_expression(t, loop_scope);
        }
        if let Some(u) = update {
            self.visit_expression(u, loop_scope);
        }
        self.visit_loop_body_block(&mut **body, loop_scope);

        let frame = self.loop_stack.pop().expect("pushed above");
        if frame.captured.is_empty() {
            return Vec::new();
        }

        let object_name = loop_object_name(frame.object_id);
        let prop_names: HashMap<String, String> = frame
            .captured
            .iter()
            .map(|resolved| (resolved.clone(), loop_property_name(resolved, frame.object_id)))
            .collect();

        // A captured binding declared in the for-head itself (the classic
        // `for (let i = 0; ...)` case) moves onto the loop object just like
        // one declared in the body: the init becomes a property assignment
        // instead of a `var`/`let` declaration.
        let mut extra_prelude = Vec::new();
        if let Some(init_assignment) = relocate_for_init(init, &object_name, &prop_names, &mut extra_prelude) {
            *init = Some(ForInit::Expression(init_assignment));
        }

        let refresh = self.build_refresh_expression(&frame, &object_name);
        *update = Some(match update.take() {
            Some(existing) => Expression::SequenceExpression { expressions: vec![existing, refresh] },
            None => refresh,
        });
        // `continue` in a C-style `for` already re-runs `update` (which now
        // carries the refresh), so bare continues don't need relabeling.
        let mut prelude = self.materialize_capture(&frame, &mut **body, false);
        prelude.extend(extra_prelude);
        prelude
    }

    fn visit_for_in(&mut self, stmt: &mut Statement, scope: LoweringScopeId) -> Vec<Statement> {
        let loop_scope = self.adapter.push_scope(LoweringScopeKind::Loop, scope);
        let object_id = self.ids.next_id();
        self.loop_stack.push(LoopFrame::new(loop_scope, object_id));

        let Statement::ForInStatement { left, right, body } = stmt else {
            unreachable!("visit_for_in only called for ForInStatement");
        };
        self.visit_expression(right, scope);
        let head_name = match left {
            ForInHead::VariableDeclaration { declarations, kind } => {
                for decl in declarations.iter_mut() {
                    self.declare_pattern(&mut decl.id, kind, loop_scope);
                }
                declarations.first().and_then(|decl| match &decl.id {
                    Pattern::Identifier(id) => Some(id.name.clone()),
                    _ => None,
                })
            }
            ForInHead::Pattern(pattern) => {
                if let Pattern::Identifier(id) = pattern {
                    self.resolve_reference(id, scope);
                    Some(id.name.clone())
                } else {
                    None
                }
            }
        };
        self.visit_loop_body_block(&mut **body, loop_scope);

        let frame = self.loop_stack.pop().expect("pushed above");
        if frame.captured.is_empty() {
            return Vec::new();
        }
        self.materialize_capture_with_head(&frame, &mut **body, true, head_name.as_deref())
    }

    fn build_refresh_expression(&self, frame: &LoopFrame, object_name: &str) -> Expression {
        let properties = frame
            .captured
            .iter()
            .map(|resolved| {
                let prop_name = loop_property_name(resolved, frame.object_id);
                ObjectProperty::Property {
                    key: PropertyKey::Identifier(Identifier { name: prop_name.clone() }),
                    value: Expression::MemberExpression {
                        object: Box::new(Expression::Identifier(Identifier { name: object_name.to_string() })),
                        property: Box::new(Expression::Identifier(Identifier { name: prop_name })),
                        computed: false,
                        type_tag: None,
                    },
                    kind: PropertyKind::Init,
                    method: false,
                    shorthand: false,
                    computed: false,
                }
            })
            .collect();
        Expression::AssignmentExpression {
            left: Box::new(Expression::Identifier(Identifier { name: object_name.to_string() })),
            operator: crate::parser::ast_types::AssignmentOperator::Assign,
            right: Box::new(Expression::ObjectExpression { properties }),
        }
    }

    /// Common tail of every loop kind once its capture set is known:
    /// declares the loop object ahead of the loop, rewrites the captured
    /// declarations into property assignments, and redirects every
    /// reference to a captured name onto the loop object. When
    /// `handle_continue` is set (every loop kind except C-style `for`,
    /// which already re-runs its `update` expression on `continue`) the
    /// body is wrapped in a labeled block with `continue` rewritten to a
    /// labeled `break`, followed by the per-iteration refresh assignment,
    /// so the refresh still runs on early continuation.
    fn materialize_capture(&mut self, frame: &LoopFrame, body: &mut Statement, handle_continue: bool) -> Vec<Statement> {
        self.materialize_capture_with_head(frame, body, handle_continue, None)
    }

    /// Same as [`Self::materialize_capture`], but for a `for-in` whose head
    /// binding itself is captured: the head keeps declaring the binding
    /// (§8's internal-consistency assertion requires the for-in head
    /// reference to still equal the declaring name-node), and a copy
    /// assignment onto the loop object is prepended as the body's first
    /// statement instead.
    fn materialize_capture_with_head(
        &mut self,
        frame: &LoopFrame,
        body: &mut Statement,
        handle_continue: bool,
        head_name: Option<&str>,
    ) -> Vec<Statement> {
        let object_name = loop_object_name(frame.object_id);
        let prop_names: HashMap<String, String> = frame
            .captured
            .iter()
            .map(|resolved| (resolved.clone(), loop_property_name(resolved, frame.object_id)))
            .collect();

        if let Statement::BlockStatement { body: stmts } = body {
            relocate_declarations(stmts, &object_name, &prop_names);
            rewrite_captured_references(stmts, &prop_names, &object_name, self.type_oracle, &self.adapter);
            if let Some(head_prop) = head_name.and_then(|name| prop_names.get(name)) {
                stmts.insert(
                    0,
                    Statement::ExpressionStatement {
                        expression: Expression::AssignmentExpression {
                            left: Box::new(Expression::MemberExpression {
                                object: Box::new(Expression::Identifier(Identifier { name: object_name.clone() })),
                                property: Box::new(Expression::Identifier(Identifier { name: head_prop.clone() })),
                                computed: false,
                                type_tag: None,
                            }),
                            operator: crate::parser::ast_types::AssignmentOperator::Assign,
                            right: Box::new(Expression::Identifier(Identifier { name: head_name.unwrap().to_string() })),
                        },
                    },
                );
            }
            wrap_capturing_object_literals(stmts, &object_name);

            if handle_continue {
                let label_name = format!("$jscomp$loop$label${}", frame.object_id);
                rewrite_bare_continues(stmts, &label_name);
                let inner = std::mem::take(stmts);
                let refresh = self.build_refresh_expression(frame, &object_name);
                *body = Statement::BlockStatement {
                    body: vec![
                        Statement::LabeledStatement {
                            label: Identifier { name: label_name },
                            body: Box::new(Statement::BlockStatement { body: inner }),
                        },
                        Statement::ExpressionStatement { expression: refresh },
                    ],
                };
            }
        }

        vec![Statement::VariableDeclaration {
            declarations: vec![VariableDeclarator {
                id: Pattern::Identifier(Identifier { name: object_name }),
                init: Some(Expression::ObjectExpression { properties: Vec::new() }),
                is_const_annotation: false,
            }],
            kind: VariableDeclarationKind::Var,
        }]
    }
}

fn rewrite_bare_continues(stmts: &mut [Statement], label: &str) {
    for stmt in stmts {
        rewrite_bare_continues_in(stmt, label);
    }
}

fn rewrite_bare_continues_in(stmt: &mut Statement, label: &str) {
    match stmt {
        Statement::ContinueStatement { label: None } => {
            *stmt = Statement::BreakStatement { label: Some(Identifier { name: label.to_string() }) };
        }
        Statement::BlockStatement { body } => rewrite_bare_continues(body, label),
        Statement::IfStatement { consequent, alternate, .. } => {
            rewrite_bare_continues_in(consequent, label);
            if let Some(alt) = alternate {
                rewrite_bare_continues_in(alt, label);
            }
        }
        Statement::TryStatement { block, handler, finalizer } => {
            rewrite_bare_continues(&mut block.body, label);
            if let Some(clause) = handler {
                rewrite_bare_continues(&mut clause.body.body, label);
            }
            if let Some(fin) = finalizer {
                rewrite_bare_continues(&mut fin.body, label);
            }
        }
        Statement::LabeledStatement { body, .. } => rewrite_bare_continues_in(body, label),
        _ => {}
    }
}

/// Relocates a captured binding declared in a `for`-head itself (`for (let
/// i = 0; ...)`) onto the loop object, mirroring [`relocate_declarations`]
/// for the one declaration a classic for-loop carries outside its body.
/// Declarators that were never captured are moved out as a plain `var`
/// statement in `extra_prelude` rather than left in the head, since the
/// head can hold either a declaration or an expression but not both once
/// any declarator in it needs relocating.
fn relocate_for_init(
    init: &mut Option<ForInit>,
    object_name: &str,
    prop_names: &HashMap<String, String>,
    extra_prelude: &mut Vec<Statement>,
) -> Option<Expression> {
    let needs_relocation = matches!(
        init,
        Some(ForInit::VariableDeclaration { declarations, .. })
            if declarations.iter().any(|d| matches!(&d.id, Pattern::Identifier(id) if prop_names.contains_key(&id.name)))
    );
    if !needs_relocation {
        return None;
    }
    let Some(ForInit::VariableDeclaration { declarations, kind }) = init.take() else {
        unreachable!("checked above");
    };

    let mut kept = Vec::new();
    let mut assignments = Vec::new();
    for decl in declarations {
        let name = match &decl.id {
            Pattern::Identifier(id) => Some(id.name.clone()),
            _ => None,
        };
        match name.and_then(|n| prop_names.get(&n).cloned()) {
            Some(prop_name) => {
                let value = decl.init.unwrap_or(Expression::Identifier(Identifier {
                    name: "undefined".to_string(),
                }));
                assignments.push(Expression::AssignmentExpression {
                    left: Box::new(Expression::MemberExpression {
                        object: Box::new(Expression::Identifier(Identifier { name: object_name.to_string() })),
                        property: Box::new(Expression::Identifier(Identifier { name: prop_name })),
                        computed: false,
                        type_tag: None,
                    }),
                    operator: crate::parser::ast_types::AssignmentOperator::Assign,
                    right: Box::new(value),
                });
            }
            None => kept.push(decl),
        }
    }

    if !kept.is_empty() {
        extra_prelude.push(Statement::VariableDeclaration { declarations: kept, kind });
    }

    match assignments.len() {
        0 => None,
        1 => assignments.into_iter().next(),
        _ => Some(Expression::SequenceExpression { expressions: assignments }),
    }
}

/// Turns each captured local's `let`/`const` declaration into a property
/// assignment on the loop object, dropping the declaration statement
/// itself. Locals that were never captured are left exactly as they were.
fn relocate_declarations(stmts: &mut Vec<Statement>, object_name: &str, prop_names: &HashMap<String, String>) {
    let mut output = Vec::with_capacity(stmts.len());
    for stmt in stmts.drain(..) {
        match stmt {
            Statement::VariableDeclaration { declarations, kind }
                if !matches!(kind, VariableDeclarationKind::Var) =>
            {
                let mut kept = Vec::new();
                for decl in declarations {
                    let name = match &decl.id {
                        Pattern::Identifier(id) => Some(id.name.clone()),
                        _ => None,
                    };
                    match name.and_then(|n| prop_names.get(&n).cloned()) {
                        Some(prop_name) => {
                            let value = decl.init.unwrap_or(Expression::Identifier(Identifier {
                                name: "undefined".to_string(),
                            }));
                            output.push(Statement::ExpressionStatement {
                                expression: Expression::AssignmentExpression {
                                    left: Box::new(Expression::MemberExpression {
                                        object: Box::new(Expression::Identifier(Identifier {
                                            name: object_name.to_string(),
                                        })),
                                        property: Box::new(Expression::Identifier(Identifier { name: prop_name })),
                                        computed: false,
                                        type_tag: None,
                                    }),
                                    operator: crate::parser::ast_types::AssignmentOperator::Assign,
                                    right: Box::new(value),
                                },
                            });
                        }
                        None => kept.push(decl),
                    }
                }
                if !kept.is_empty() {
                    output.push(Statement::VariableDeclaration { declarations: kept, kind });
                }
            }
            other => output.push(other),
        }
    }
    *stmts = output;
}

/// Redirects every remaining reference to a captured name onto
/// `$jscomp$loop$N.prop`, including references nested inside closures and
/// inside further-nested loops.
fn rewrite_captured_references(
    stmts: &mut [Statement],
    prop_names: &HashMap<String, String>,
    object_name: &str,
    type_oracle: &dyn TypeOracle,
    adapter: &ScopeAdapter,
) {
    for stmt in stmts {
        rewrite_statement(stmt, prop_names, object_name, type_oracle, adapter);
    }
}

fn loop_property_access(name: &str, prop_names: &HashMap<String, String>, object_name: &str, tag: Option<TypeTag>) -> Option<Expression> {
    prop_names.get(name).map(|prop_name| Expression::MemberExpression {
        object: Box::new(Expression::Identifier(Identifier { name: object_name.to_string() })),
        property: Box::new(Expression::Identifier(Identifier { name: prop_name.clone() })),
        computed: false,
        type_tag: tag,
    })
}

fn rewrite_statement(
    stmt: &mut Statement,
    prop_names: &HashMap<String, String>,
    object_name: &str,
    type_oracle: &dyn TypeOracle,
    adapter: &ScopeAdapter,
) {
    match stmt {
        Statement::VariableDeclaration { declarations, .. } => {
            for decl in declarations {
                if let Some(init) = &mut decl.init {
                    rewrite_expression(init, prop_names, object_name, type_oracle, adapter);
                }
            }
        }
        Statement::ExpressionStatement { expression } => {
            rewrite_expression(expression, prop_names, object_name, type_oracle, adapter)
        }
        Statement::BlockStatement { body } => rewrite_captured_references(body, prop_names, object_name, type_oracle, adapter),
        Statement::ReturnStatement { argument: Some(expr) } => {
            rewrite_expression(expr, prop_names, object_name, type_oracle, adapter)
        }
        Statement::ReturnStatement { argument: None } => {}
        Statement::IfStatement { test, consequent, alternate } => {
            rewrite_expression(test, prop_names, object_name, type_oracle, adapter);
            rewrite_statement(consequent, prop_names, object_name, type_oracle, adapter);
            if let Some(alt) = alternate {
                rewrite_statement(alt, prop_names, object_name, type_oracle, adapter);
            }
        }
        Statement::WhileStatement { test, body } => {
            rewrite_expression(test, prop_names, object_name, type_oracle, adapter);
            rewrite_statement(body, prop_names, object_name, type_oracle, adapter);
        }
        Statement::DoWhileStatement { body, test } => {
            rewrite_statement(body, prop_names, object_name, type_oracle, adapter);
            rewrite_expression(test, prop_names, object_name, type_oracle, adapter);
        }
        Statement::ForStatement { init, test, update, body } => {
            if let Some(ForInit::Expression(expr)) = init {
                rewrite_expression(expr, prop_names, object_name, type_oracle, adapter);
            }
            if let Some(t) = test {
                rewrite_expression(t, prop_names, object_name, type_oracle, adapter);
            }
            if let Some(u) = update {
                rewrite_expression(u, prop_names, object_name, type_oracle, adapter);
            }
            rewrite_statement(body, prop_names, object_name, type_oracle, adapter);
        }
        Statement::ForInStatement { right, body, .. } => {
            rewrite_expression(right, prop_names, object_name, type_oracle, adapter);
            rewrite_statement(body, prop_names, object_name, type_oracle, adapter);
        }
        Statement::LabeledStatement { body, .. } => rewrite_statement(body, prop_names, object_name, type_oracle, adapter),
        Statement::TryStatement { block, handler, finalizer } => {
            rewrite_captured_references(&mut block.body, prop_names, object_name, type_oracle, adapter);
            if let Some(clause) = handler {
                rewrite_captured_references(&mut clause.body.body, prop_names, object_name, type_oracle, adapter);
            }
            if let Some(fin) = finalizer {
                rewrite_captured_references(&mut fin.body, prop_names, object_name, type_oracle, adapter);
            }
        }
        Statement::ThrowStatement { argument } => {
            rewrite_expression(argument, prop_names, object_name, type_oracle, adapter)
        }
        _ => {}
    }
}

fn rewrite_expression(
    expr: &mut Expression,
    prop_names: &HashMap<String, String>,
    object_name: &str,
    type_oracle: &dyn TypeOracle,
    adapter: &ScopeAdapter,
) {
    if let Expression::Identifier(id) = expr {
        if let Some(replacement) = loop_property_access(&id.name, prop_names, object_name, None) {
            *expr = replacement;
            return;
        }
    }

    match expr {
        Expression::Identifier(_) | Expression::Literal(_) => {}
        Expression::BinaryExpression { left, right, .. } => {
            rewrite_expression(left, prop_names, object_name, type_oracle, adapter);
            rewrite_expression(right, prop_names, object_name, type_oracle, adapter);
        }
        Expression::UnaryExpression { argument, .. } => {
            rewrite_expression(argument, prop_names, object_name, type_oracle, adapter)
        }
        Expression::AssignmentExpression { left, right, .. } => {
            rewrite_expression(left, prop_names, object_name, type_oracle, adapter);
            rewrite_expression(right, prop_names, object_name, type_oracle, adapter);
        }
        Expression::UpdateExpression { argument, .. } => {
            rewrite_expression(argument, prop_names, object_name, type_oracle, adapter)
        }
        Expression::CallExpression { callee, arguments } => {
            rewrite_expression(callee, prop_names, object_name, type_oracle, adapter);
            for arg in arguments {
                rewrite_expression(arg, prop_names, object_name, type_oracle, adapter);
            }
        }
        Expression::MemberExpression { object, property, computed, .. } => {
            rewrite_expression(object, prop_names, object_name, type_oracle, adapter);
            if *computed {
                rewrite_expression(property, prop_names, object_name, type_oracle, adapter);
            }
        }
        Expression::SequenceExpression { expressions } => {
            for e in expressions {
                rewrite_expression(e, prop_names, object_name, type_oracle, adapter);
            }
        }
        Expression::FunctionExpression(func) => {
            rewrite_captured_references(&mut func.body.body, prop_names, object_name, type_oracle, adapter)
        }
        Expression::ArrowFunctionExpression { body, .. } => match body {
            ArrowFunctionBody::BlockStatement(block) => {
                rewrite_captured_references(&mut block.body, prop_names, object_name, type_oracle, adapter)
            }
            ArrowFunctionBody::Expression(inner) => {
                rewrite_expression(inner, prop_names, object_name, type_oracle, adapter)
            }
        },
        Expression::ObjectExpression { properties } => {
            for prop in properties {
                match prop {
                    ObjectProperty::Property { value, .. } => {
                        rewrite_expression(value, prop_names, object_name, type_oracle, adapter)
                    }
                    ObjectProperty::SpreadElement { argument } => {
                        rewrite_expression(argument, prop_names, object_name, type_oracle, adapter)
                    }
                }
            }
        }
        Expression::ArrayExpression { elements } => {
            for el in elements.iter_mut().flatten() {
                rewrite_expression(el, prop_names, object_name, type_oracle, adapter);
            }
        }
        Expression::TemplateLiteral { expressions, .. } => {
            for e in expressions {
                rewrite_expression(e, prop_names, object_name, type_oracle, adapter);
            }
        }
        Expression::ConditionalExpression { test, consequent, alternate } => {
            rewrite_expression(test, prop_names, object_name, type_oracle, adapter);
            rewrite_expression(consequent, prop_names, object_name, type_oracle, adapter);
            rewrite_expression(alternate, prop_names, object_name, type_oracle, adapter);
        }
    }
}

/// Finds every "wrap target" reachable from `stmts` that reads the loop
/// object named `object_name` — a function, arrow function, or (for a
/// getter/setter) its enclosing object literal — and wraps it in a
/// snapshot IIFE so it keeps reading the iteration it was created in
/// rather than whatever the shared, later-mutated loop object holds by the
/// time it actually runs.
///
/// A wrap target's own subtree is never recursed into any further once
/// found: wrapping it already freezes `object_name` for everything nested
/// inside, including further-nested functions or getters, so a second,
/// inner wrap would be redundant.
fn wrap_capturing_object_literals(stmts: &mut [Statement], object_name: &str) {
    for stmt in stmts {
        wrap_in_statement(stmt, object_name);
    }
}

fn wrap_in_statement(stmt: &mut Statement, object_name: &str) {
    match stmt {
        Statement::VariableDeclaration { declarations, .. } => {
            for decl in declarations {
                if let Some(init) = &mut decl.init {
                    wrap_in_expression(init, object_name);
                }
            }
        }
        Statement::FunctionDeclaration { body, .. } => {
            // A function *declaration* is itself a wrap target (it escapes
            // the loop the moment anything calls it later), but unlike a
            // function expression it isn't reachable through `wrap_in_expression`.
            if statements_reference(&body.body, object_name) {
                wrap_function_declaration(stmt, object_name);
            }
        }
        Statement::ExpressionStatement { expression } => wrap_in_expression(expression, object_name),
        Statement::ReturnStatement { argument: Some(expr) } => wrap_in_expression(expr, object_name),
        Statement::ReturnStatement { argument: None } => {}
        Statement::BlockStatement { body } => wrap_capturing_object_literals(body, object_name),
        Statement::IfStatement { test, consequent, alternate } => {
            wrap_in_expression(test, object_name);
            wrap_in_statement(consequent, object_name);
            if let Some(alt) = alternate {
                wrap_in_statement(alt, object_name);
            }
        }
        Statement::WhileStatement { test, body } => {
            wrap_in_expression(test, object_name);
            wrap_in_statement(body, object_name);
        }
        Statement::DoWhileStatement { body, test } => {
            wrap_in_statement(body, object_name);
            wrap_in_expression(test, object_name);
        }
        Statement::ForStatement { init, test, update, body } => {
            if let Some(ForInit::Expression(expr)) = init {
                wrap_in_expression(expr, object_name);
            }
            if let Some(t) = test {
                wrap_in_expression(t, object_name);
            }
            if let Some(u) = update {
                wrap_in_expression(u, object_name);
            }
            wrap_in_statement(body, object_name);
        }
        Statement::ForInStatement { right, body, .. } => {
            wrap_in_expression(right, object_name);
            wrap_in_statement(body, object_name);
        }
        Statement::LabeledStatement { body, .. } => wrap_in_statement(body, object_name),
        Statement::TryStatement { block, handler, finalizer } => {
            wrap_capturing_object_literals(&mut block.body, object_name);
            if let Some(clause) = handler {
                wrap_capturing_object_literals(&mut clause.body.body, object_name);
            }
            if let Some(fin) = finalizer {
                wrap_capturing_object_literals(&mut fin.body, object_name);
            }
        }
        Statement::ThrowStatement { argument } => wrap_in_expression(argument, object_name),
        _ => {}
    }
}

/// Replaces a captured function declaration in place with `var <fname> =
/// (function(<object_name>) { return function <fname>(...) {...}; })(<object_name>);`,
/// preserving the declared name. An anonymous function statement (not
/// representable post-parse, but handled for completeness) becomes a bare
/// expression statement instead.
fn wrap_function_declaration(stmt: &mut Statement, object_name: &str) {
    let Statement::FunctionDeclaration { id, params, body, is_async, is_generator } =
        std::mem::replace(stmt, Statement::EmptyStatement)
    else {
        unreachable!("only called for FunctionDeclaration");
    };
    let func_expr = Expression::FunctionExpression(FunctionExpression { id: None, params, body, is_async, is_generator });
    let wrapped = build_snapshot_iife(func_expr, object_name);
    *stmt = match id {
        Some(name) => Statement::VariableDeclaration {
            declarations: vec![VariableDeclarator {
                id: Pattern::Identifier(name),
                init: Some(wrapped),
                is_const_annotation: false,
            }],
            kind: VariableDeclarationKind::Var,
        },
        None => Statement::ExpressionStatement { expression: wrapped },
    };
}

fn wrap_in_expression(expr: &mut Expression, object_name: &str) {
    if let Expression::ObjectExpression { properties } = expr {
        let has_accessor_capture = properties.iter().any(|p| {
            matches!(
                p,
                ObjectProperty::Property { kind: PropertyKind::Get | PropertyKind::Set, value, .. }
                    if expression_references(value, object_name)
            )
        });
        if has_accessor_capture {
            let object_expr = std::mem::replace(expr, Expression::Literal(crate::parser::ast_types::Literal::Null));
            *expr = build_snapshot_iife(object_expr, object_name);
            return;
        }
    }

    if matches!(expr, Expression::FunctionExpression(_) | Expression::ArrowFunctionExpression { .. })
        && expression_references(expr, object_name)
    {
        let func_expr = std::mem::replace(expr, Expression::Literal(crate::parser::ast_types::Literal::Null));
        *expr = build_snapshot_iife(func_expr, object_name);
        return;
    }

    match expr {
        Expression::BinaryExpression { left, right, .. } => {
            wrap_in_expression(left, object_name);
            wrap_in_expression(right, object_name);
        }
        Expression::UnaryExpression { argument, .. } => wrap_in_expression(argument, object_name),
        Expression::AssignmentExpression { left, right, .. } => {
            wrap_in_expression(left, object_name);
            wrap_in_expression(right, object_name);
        }
        Expression::UpdateExpression { argument, .. } => wrap_in_expression(argument, object_name),
        Expression::CallExpression { callee, arguments } => {
            wrap_in_expression(callee, object_name);
            for arg in arguments {
                wrap_in_expression(arg, object_name);
            }
        }
        Expression::MemberExpression { object, property, computed, .. } => {
            wrap_in_expression(object, object_name);
            if *computed {
                wrap_in_expression(property, object_name);
            }
        }
        Expression::SequenceExpression { expressions } => {
            for e in expressions {
                wrap_in_expression(e, object_name);
            }
        }
        Expression::ObjectExpression { properties } => {
            for prop in properties {
                match prop {
                    ObjectProperty::Property { value, .. } => wrap_in_expression(value, object_name),
                    ObjectProperty::SpreadElement { argument } => wrap_in_expression(argument, object_name),
                }
            }
        }
        Expression::ArrayExpression { elements } => {
            for el in elements.iter_mut().flatten() {
                wrap_in_expression(el, object_name);
            }
        }
        Expression::TemplateLiteral { expressions, .. } => {
            for e in expressions {
                wrap_in_expression(e, object_name);
            }
        }
        Expression::ConditionalExpression { test, consequent, alternate } => {
            wrap_in_expression(test, object_name);
            wrap_in_expression(consequent, object_name);
            wrap_in_expression(alternate, object_name);
        }
        _ => {}
    }
}

/// Whether `name` (the loop object's identifier) occurs anywhere in
/// `expr`'s subtree, including inside nested function/arrow bodies — this
/// is a transitive "would this closure read the shared loop object"
/// check, not a direct-child one, since a wrap target further up the
/// nesting already covers everything captured underneath it.
fn expression_references(expr: &Expression, name: &str) -> bool {
    match expr {
        Expression::Identifier(id) => id.name == name,
        Expression::Literal(_) => false,
        Expression::BinaryExpression { left, right, .. } => {
            expression_references(left, name) || expression_references(right, name)
        }
        Expression::UnaryExpression { argument, .. } => expression_references(argument, name),
        Expression::AssignmentExpression { left, right, .. } => {
            expression_references(left, name) || expression_references(right, name)
        }
        Expression::UpdateExpression { argument, .. } => expression_references(argument, name),
        Expression::CallExpression { callee, arguments } => {
            expression_references(callee, name) || arguments.iter().any(|a| expression_references(a, name))
        }
        Expression::MemberExpression { object, property, computed, .. } => {
            expression_references(object, name) || (*computed && expression_references(property, name))
        }
        Expression::SequenceExpression { expressions } => expressions.iter().any(|e| expression_references(e, name)),
        Expression::FunctionExpression(func) => statements_reference(&func.body.body, name),
        Expression::ArrowFunctionExpression { body, .. } => match body {
            ArrowFunctionBody::BlockStatement(block) => statements_reference(&block.body, name),
            ArrowFunctionBody::Expression(inner) => expression_references(inner, name),
        },
        Expression::ObjectExpression { properties } => properties.iter().any(|p| match p {
            ObjectProperty::Property { value, .. } => expression_references(value, name),
            ObjectProperty::SpreadElement { argument } => expression_references(argument, name),
        }),
        Expression::ArrayExpression { elements } => elements.iter().flatten().any(|e| expression_references(e, name)),
        Expression::TemplateLiteral { expressions, .. } => expressions.iter().any(|e| expression_references(e, name)),
        Expression::ConditionalExpression { test, consequent, alternate } => {
            expression_references(test, name) || expression_references(consequent, name) || expression_references(alternate, name)
        }
    }
}

fn statements_reference(stmts: &[Statement], name: &str) -> bool {
    stmts.iter().any(|s| statement_references(s, name))
}

fn statement_references(stmt: &Statement, name: &str) -> bool {
    match stmt {
        Statement::VariableDeclaration { declarations, .. } => {
            declarations.iter().any(|d| d.init.as_ref().is_some_and(|e| expression_references(e, name)))
        }
        Statement::FunctionDeclaration { body, .. } => statements_reference(&body.body, name),
        Statement::ClassDeclaration { super_class, body, .. } => {
            super_class.as_deref().is_some_and(|e| expression_references(e, name))
                || body.body.iter().any(|el| class_element_references(el, name))
        }
        Statement::ExpressionStatement { expression } => expression_references(expression, name),
        Statement::BlockStatement { body } => statements_reference(body, name),
        Statement::ReturnStatement { argument } => argument.as_ref().is_some_and(|e| expression_references(e, name)),
        Statement::IfStatement { test, consequent, alternate } => {
            expression_references(test, name)
                || statement_references(consequent, name)
                || alternate.as_deref().is_some_and(|s| statement_references(s, name))
        }
        Statement::WhileStatement { test, body } => expression_references(test, name) || statement_references(body, name),
        Statement::DoWhileStatement { body, test } => statement_references(body, name) || expression_references(test, name),
        Statement::ForStatement { init, test, update, body } => {
            let init_hit = match init {
                Some(ForInit::Expression(e)) => expression_references(e, name),
                Some(ForInit::VariableDeclaration { declarations, .. }) => {
                    declarations.iter().any(|d| d.init.as_ref().is_some_and(|e| expression_references(e, name)))
                }
                None => false,
            };
            init_hit
                || test.as_ref().is_some_and(|e| expression_references(e, name))
                || update.as_ref().is_some_and(|e| expression_references(e, name))
                || statement_references(body, name)
        }
        Statement::ForInStatement { right, body, .. } => expression_references(right, name) || statement_references(body, name),
        Statement::LabeledStatement { body, .. } => statement_references(body, name),
        Statement::TryStatement { block, handler, finalizer } => {
            statements_reference(&block.body, name)
                || handler.as_ref().is_some_and(|c| statements_reference(&c.body.body, name))
                || finalizer.as_ref().is_some_and(|f| statements_reference(&f.body, name))
        }
        Statement::ThrowStatement { argument } => expression_references(argument, name),
        _ => false,
    }
}

fn class_element_references(element: &crate::parser::ast_types::ClassElement, name: &str) -> bool {
    use crate::parser::ast_types::ClassElement;
    match element {
        ClassElement::PropertyDefinition { value, .. } => value.as_ref().is_some_and(|e| expression_references(e, name)),
        ClassElement::MethodDefinition { value, .. } => statements_reference(&value.body.body, name),
    }
}

/// Builds `(function(L) { return <node>; })(L)`, where `L` is the loop
/// object's name: `node` (a function, arrow function, or object literal)
/// keeps reading `L` exactly as rewritten by [`rewrite_captured_references`],
/// but the IIFE parameter now shadows the outer binding with whatever value
/// it held at the moment this call runs, freezing the snapshot.
fn build_snapshot_iife(node: Expression, object_name: &str) -> Expression {
    let iife = Expression::FunctionExpression(FunctionExpression {
        id: None,
        params: vec![Pattern::Identifier(Identifier { name: object_name.to_string() })],
        body: crate::parser::ast_types::BlockStatement {
            body: vec![Statement::ReturnStatement { argument: Some(node) }],
        },
        is_async: false,
        is_generator: false,
    });
    Expression::CallExpression {
        callee: Box::new(iife),
        arguments: vec![Expression::Identifier(Identifier { name: object_name.to_string() })],
    }
}
