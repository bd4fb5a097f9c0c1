//! # Block-Scope Lowering
//!
//! Lowers `let`/`const` declarations to function-scoped `var`, preserving
//! per-iteration binding semantics for loop-scoped variables captured by a
//! nested closure. Three concerns, one traversal:
//!
//! - **Collision resolution** — renames a block-scoped binding that would
//!   otherwise collide with another binding at its hoisted (function or
//!   global) scope.
//! - **Loop-closure rewriting** — relocates a loop-scoped binding onto a
//!   per-iteration loop object when a closure captures it, so each closure
//!   keeps the value its iteration saw.
//! - **Token flipping** — the final walk retokening every surviving
//!   `let`/`const` to `var`.
//!
//! `lower_block_scoped_declarations` runs all three in order over one
//! program.

pub mod adapter;
pub mod collision_resolver;
pub mod loop_closure;
pub mod token_flipper;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::parser::ast_types::Program;

use adapter::{NoopTypeOracle, TypeOracle};
use loop_closure::ClosurePass;

/// Configuration for one run of the pass.
#[derive(Debug, Clone)]
pub struct LoweringConfig {
    /// Collect and return every identifier reference that never resolved
    /// to a declaration anywhere in the program (candidate externs). Off
    /// by default since most callers don't cross-check against an externs
    /// list and building the list costs a full name collection.
    pub collect_undeclared_names: bool,
}

impl Default for LoweringConfig {
    fn default() -> Self {
        Self { collect_undeclared_names: false }
    }
}

/// Programmer-error assertions raised by the pass. Both categories are
/// non-recoverable: encountering either means an earlier pass that should
/// have run did not, or this pass has a bug. There is no user-visible
/// recoverable error here.
#[derive(Debug, Error)]
pub enum LoweringError {
    /// A node kind this pass assumes has already been lowered away by an
    /// earlier pass (`for-of`, a class declarator, a destructuring
    /// declarator reaching here unflattened) was encountered instead.
    #[error("block-scope lowering precondition violated: {0}")]
    PreconditionViolated(String),

    /// An invariant the pass itself is supposed to maintain did not hold
    /// (for-in head reference diverging from its declaring name-node, a
    /// loop body with no code block to rewrite). A bug in this pass, not
    /// in its input.
    #[error("block-scope lowering internal consistency check failed: {0}")]
    InternalConsistency(String),
}

pub type LoweringResult<T> = Result<T, LoweringError>;

/// Names referenced but never bound anywhere in the program.
#[derive(Debug, Clone, Default)]
pub struct LoweringReport {
    pub undeclared_names: Vec<String>,
}

/// Runs collision resolution, loop-closure rewriting, and token flipping
/// over `program.body` in place, using the default no-op type oracle.
#[instrument(skip(program, config))]
pub fn lower_block_scoped_declarations(
    program: &mut Program,
    config: &LoweringConfig,
) -> LoweringResult<LoweringReport> {
    let oracle = NoopTypeOracle;
    lower_block_scoped_declarations_with_oracle(program, config, &oracle)
}

/// Same as [`lower_block_scoped_declarations`], but with a caller-supplied
/// type/color oracle for environments that track one.
pub fn lower_block_scoped_declarations_with_oracle(
    program: &mut Program,
    config: &LoweringConfig,
    oracle: &dyn TypeOracle,
) -> LoweringResult<LoweringReport> {
    debug!(statements = program.body.len(), "starting block-scope lowering");

    let pass = ClosurePass::new(oracle);
    let output = pass.run(&mut program.body);

    token_flipper::flip_program(&mut program.body);

    let report = LoweringReport {
        undeclared_names: if config.collect_undeclared_names {
            output.undeclared_names
        } else {
            Vec::new()
        },
    };

    debug!(undeclared = report.undeclared_names.len(), "block-scope lowering complete");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast_types::{
        BinaryOperator, Expression, Identifier, NumberLiteral, Pattern, ProgramSourceType, Statement,
        UpdateOperator, VariableDeclarationKind, VariableDeclarator,
    };

    fn num(n: f64) -> Expression {
        Expression::Literal(crate::parser::ast_types::Literal::Number(NumberLiteral { value: n }))
    }

    fn ident(name: &str) -> Expression {
        Expression::Identifier(Identifier { name: name.to_string() })
    }

    #[test]
    fn simple_loop_const_is_flipped_to_var_with_annotation() {
        let mut program = Program {
            body: vec![Statement::ForStatement {
                init: Some(crate::parser::ast_types::ForInit::VariableDeclaration {
                    declarations: vec![VariableDeclarator {
                        id: Pattern::Identifier(Identifier { name: "i".to_string() }),
                        init: Some(num(0.0)),
                        is_const_annotation: false,
                    }],
                    kind: VariableDeclarationKind::Const,
                }),
                test: Some(Expression::BinaryExpression {
                    left: Box::new(ident("i")),
                    operator: BinaryOperator::LessThan,
                    right: Box::new(num(3.0)),
                }),
                update: Some(Expression::UpdateExpression {
                    operator: UpdateOperator::Increment,
                    argument: Box::new(ident("i")),
                    prefix: false,
                }),
                body: Box::new(Statement::BlockStatement {
                    body: vec![Statement::ExpressionStatement {
                        expression: Expression::CallExpression { callee: Box::new(ident("log")), arguments: vec![ident("i")] },
                    }],
                }),
            }],
            source_type: ProgramSourceType::Script,
        };

        let report = lower_block_scoped_declarations(&mut program, &LoweringConfig::default()).unwrap();
        assert!(report.undeclared_names.is_empty() || report.undeclared_names == vec!["log".to_string()]);

        let Statement::ForStatement { init: Some(crate::parser::ast_types::ForInit::VariableDeclaration { kind, declarations }), .. } =
            &program.body[0]
        else {
            panic!("expected for statement with a variable declaration init");
        };
        assert!(matches!(kind, VariableDeclarationKind::Var));
        assert!(declarations[0].is_const_annotation);
    }

    #[test]
    fn running_the_pass_twice_is_a_no_op() {
        let mut program = Program {
            body: vec![Statement::VariableDeclaration {
                declarations: vec![VariableDeclarator {
                    id: Pattern::Identifier(Identifier { name: "x".to_string() }),
                    init: Some(num(1.0)),
                    is_const_annotation: false,
                }],
                kind: VariableDeclarationKind::Let,
            }],
            source_type: ProgramSourceType::Script,
        };

        lower_block_scoped_declarations(&mut program, &LoweringConfig::default()).unwrap();
        let after_first = format!("{:?}", program.body);
        lower_block_scoped_declarations(&mut program, &LoweringConfig::default()).unwrap();
        let after_second = format!("{:?}", program.body);

        assert_eq!(after_first, after_second);
    }
}
