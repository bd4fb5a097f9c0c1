//! # Token Flipping
//!
//! The final walk of the pass: every `let`/`const` declaration still
//! standing after collision resolution and loop-closure rewriting (the
//! overwhelming majority of them — only loop-captured bindings were
//! already rewritten into loop-object property assignments) gets
//! retokened to `var`. `const` declarators keep a marker recording that
//! they used to be constant, so a later pass with its own reasons to care
//! (inlining, dead-code elimination) can still tell.
//!
//! A multi-declarator `const` list is split into one single-declarator
//! `var` statement per declarator, right to left, so each one carries its
//! own annotation independently of its neighbors. `let` lists are never
//! split — only `const`'s per-declarator annotation requires it.

use crate::parser::ast_types::{
    ArrowFunctionBody, ClassElement, Expression, ForInHead, ForInit, ObjectProperty, Statement,
    VariableDeclarationKind, VariableDeclarator,
};

pub fn flip_program(body: &mut Vec<Statement>) {
    let mut output = Vec::with_capacity(body.len());
    for stmt in body.drain(..) {
        output.extend(flip_statement(stmt));
    }
    *body = output;
}

/// Splits a `const` declarator list into one single-declarator `var`
/// statement per declarator (right-to-left order preserved as left-to-right
/// output), each stamped with `is_const_annotation`. Used both for
/// top-level declaration lists and for a `for`-head's leading declaration.
fn split_const_declarators(declarations: Vec<VariableDeclarator>) -> Vec<Statement> {
    declarations
        .into_iter()
        .map(|mut decl| {
            decl.is_const_annotation = true;
            if let Some(init) = &mut decl.init {
                flip_expression(init);
            }
            Statement::VariableDeclaration { declarations: vec![decl], kind: VariableDeclarationKind::Var }
        })
        .collect()
}

fn flip_statement(stmt: Statement) -> Vec<Statement> {
    match stmt {
        Statement::VariableDeclaration { mut declarations, kind } => match kind {
            VariableDeclarationKind::Const => split_const_declarators(declarations),
            VariableDeclarationKind::Let => {
                for decl in declarations.iter_mut() {
                    if let Some(init) = &mut decl.init {
                        flip_expression(init);
                    }
                }
                vec![Statement::VariableDeclaration { declarations, kind: VariableDeclarationKind::Var }]
            }
            VariableDeclarationKind::Var => {
                for decl in declarations.iter_mut() {
                    if let Some(init) = &mut decl.init {
                        flip_expression(init);
                    }
                }
                vec![Statement::VariableDeclaration { declarations, kind }]
            }
        },
        Statement::FunctionDeclaration { id, params, mut body, is_async, is_generator } => {
            flip_program(&mut body.body);
            vec![Statement::FunctionDeclaration { id, params, body, is_async, is_generator }]
        }
        Statement::ClassDeclaration { id, super_class, mut body } => {
            let super_class = super_class.map(|mut sc| {
                flip_expression(&mut sc);
                sc
            });
            for element in &mut body.body {
                flip_class_element(element);
            }
            vec![Statement::ClassDeclaration { id, super_class, body }]
        }
        Statement::ExpressionStatement { mut expression } => {
            flip_expression(&mut expression);
            vec![Statement::ExpressionStatement { expression }]
        }
        Statement::BlockStatement { body } => {
            let mut body = body;
            flip_program(&mut body);
            vec![Statement::BlockStatement { body }]
        }
        Statement::ReturnStatement { argument: Some(mut expr) } => {
            flip_expression(&mut expr);
            vec![Statement::ReturnStatement { argument: Some(expr) }]
        }
        Statement::ReturnStatement { argument: None } => vec![Statement::ReturnStatement { argument: None }],
        Statement::IfStatement { mut test, consequent, alternate } => {
            flip_expression(&mut test);
            let consequent = flip_body(*consequent);
            let alternate = alternate.map(|alt| Box::new(flip_body(*alt)));
            vec![Statement::IfStatement { test, consequent: Box::new(consequent), alternate }]
        }
        Statement::WhileStatement { mut test, body } => {
            flip_expression(&mut test);
            let body = flip_body(*body);
            vec![Statement::WhileStatement { test, body: Box::new(body) }]
        }
        Statement::DoWhileStatement { body, mut test } => {
            let body = flip_body(*body);
            flip_expression(&mut test);
            vec![Statement::DoWhileStatement { body: Box::new(body), test }]
        }
        Statement::ForStatement { init, mut test, mut update, body } => {
            let mut prelude = Vec::new();
            let init = init.map(|for_init| match for_init {
                ForInit::VariableDeclaration { declarations, kind } => match kind {
                    VariableDeclarationKind::Const => {
                        let mut split = split_const_declarators(declarations);
                        // The for-head can only carry one declaration list;
                        // everything past the first declarator is hoisted
                        // into a prelude statement just before the loop.
                        let head = split.remove(0);
                        prelude.extend(split);
                        let Statement::VariableDeclaration { declarations, kind } = head else {
                            unreachable!("split_const_declarators always returns VariableDeclaration");
                        };
                        ForInit::VariableDeclaration { declarations, kind }
                    }
                    VariableDeclarationKind::Let => {
                        let mut declarations = declarations;
                        for decl in declarations.iter_mut() {
                            if let Some(e) = &mut decl.init {
                                flip_expression(e);
                            }
                        }
                        ForInit::VariableDeclaration { declarations, kind: VariableDeclarationKind::Var }
                    }
                    VariableDeclarationKind::Var => {
                        let mut declarations = declarations;
                        for decl in declarations.iter_mut() {
                            if let Some(e) = &mut decl.init {
                                flip_expression(e);
                            }
                        }
                        ForInit::VariableDeclaration { declarations, kind }
                    }
                },
                ForInit::Expression(mut expr) => {
                    flip_expression(&mut expr);
                    ForInit::Expression(expr)
                }
            });
            if let Some(t) = &mut test {
                flip_expression(t);
            }
            if let Some(u) = &mut update {
                flip_expression(u);
            }
            let body = flip_body(*body);
            prelude.push(Statement::ForStatement { init, test, update, body: Box::new(body) });
            prelude
        }
        Statement::ForInStatement { left, mut right, body } => {
            flip_expression(&mut right);
            // For-in grammar allows only a single binding in its head, so
            // there is never anything to split here.
            let left = match left {
                ForInHead::VariableDeclaration { mut declarations, kind } if !matches!(kind, VariableDeclarationKind::Var) => {
                    for decl in declarations.iter_mut() {
                        decl.is_const_annotation = matches!(kind, VariableDeclarationKind::Const);
                    }
                    ForInHead::VariableDeclaration { declarations, kind: VariableDeclarationKind::Var }
                }
                other => other,
            };
            let body = flip_body(*body);
            vec![Statement::ForInStatement { left, right, body: Box::new(body) }]
        }
        Statement::LabeledStatement { label, body } => {
            let body = flip_body(*body);
            vec![Statement::LabeledStatement { label, body: Box::new(body) }]
        }
        Statement::TryStatement { mut block, mut handler, mut finalizer } => {
            flip_program(&mut block.body);
            if let Some(clause) = &mut handler {
                flip_program(&mut clause.body.body);
            }
            if let Some(fin) = &mut finalizer {
                flip_program(&mut fin.body);
            }
            vec![Statement::TryStatement { block, handler, finalizer }]
        }
        Statement::ThrowStatement { mut argument } => {
            flip_expression(&mut argument);
            vec![Statement::ThrowStatement { argument }]
        }
        other => vec![other],
    }
}

/// Flips a statement that sits in a single-slot body position (an
/// `if`/`while`/`for`/labeled body). `const` cannot be the sole
/// non-block statement of one of these positions per JS grammar, so
/// `flip_statement` never actually needs to return more than one
/// statement here — but if it ever did, the extras get wrapped in a
/// block so the single slot is preserved.
fn flip_body(stmt: Statement) -> Statement {
    let mut flipped = flip_statement(stmt);
    if flipped.len() == 1 {
        flipped.pop().unwrap()
    } else {
        Statement::BlockStatement { body: flipped }
    }
}

fn flip_class_element(element: &mut ClassElement) {
    match element {
        ClassElement::PropertyDefinition { value: Some(value), .. } => flip_expression(value),
        ClassElement::PropertyDefinition { value: None, .. } => {}
        ClassElement::MethodDefinition { value, .. } => flip_program(&mut value.body.body),
    }
}

fn flip_expression(expr: &mut Expression) {
    match expr {
        Expression::Identifier(_) | Expression::Literal(_) => {}
        Expression::BinaryExpression { left, right, .. } => {
            flip_expression(left);
            flip_expression(right);
        }
        Expression::UnaryExpression { argument, .. } => flip_expression(argument),
        Expression::AssignmentExpression { left, right, .. } => {
            flip_expression(left);
            flip_expression(right);
        }
        Expression::UpdateExpression { argument, .. } => flip_expression(argument),
        Expression::CallExpression { callee, arguments } => {
            flip_expression(callee);
            for arg in arguments {
                flip_expression(arg);
            }
        }
        Expression::MemberExpression { object, property, computed, .. } => {
            flip_expression(object);
            if *computed {
                flip_expression(property);
            }
        }
        Expression::SequenceExpression { expressions } => {
            for e in expressions {
                flip_expression(e);
            }
        }
        Expression::FunctionExpression(func) => flip_program(&mut func.body.body),
        Expression::ArrowFunctionExpression { body, .. } => match body {
            ArrowFunctionBody::BlockStatement(block) => flip_program(&mut block.body),
            ArrowFunctionBody::Expression(inner) => flip_expression(inner),
        },
        Expression::ObjectExpression { properties } => {
            for prop in properties {
                match prop {
                    ObjectProperty::Property { value, .. } => flip_expression(value),
                    ObjectProperty::SpreadElement { argument } => flip_expression(argument),
                }
            }
        }
        Expression::ArrayExpression { elements } => {
            for el in elements.iter_mut().flatten() {
                flip_expression(el);
            }
        }
        Expression::TemplateLiteral { expressions, .. } => {
            for e in expressions {
                flip_expression(e);
            }
        }
        Expression::ConditionalExpression { test, consequent, alternate } => {
            flip_expression(test);
            flip_expression(consequent);
            flip_expression(alternate);
        }
    }
}
