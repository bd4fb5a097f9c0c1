//! # Expression Simplification Module
//!
//! This module implements Pass 3 of the transformation pipeline: Expression Simplification
//! and Compression. It performs constant folding, algebraic simplifications, and other
//! optimizations while ensuring semantic correctness.

use crate::parser::ast_types::Program;
use crate::transformer::{TransformResult, TransformerConfig};

/// Result of expression simplification operation
#[derive(Debug, Clone)]
pub struct ExpressionSimplificationResult {
    /// Number of expressions that were simplified
    pub simplified_count: u32,
    /// Number of transformations that were rolled back for safety
    pub rollbacks: u32,
    /// Any warnings generated during the simplification process
    pub warnings: Vec<String>,
}

/// Simplifies expressions in the given AST
pub fn simplify_expressions(
    _ast: &mut Program,
    config: &TransformerConfig,
) -> TransformResult<ExpressionSimplificationResult> {
    if config.verbose {
        println!("🔍 Analyzing expressions for simplification");
    }

    // TODO: Implement actual expression simplification logic
    // For now, return a placeholder result
    Ok(ExpressionSimplificationResult {
        simplified_count: 0,
        rollbacks: 0,
        warnings: vec!["Expression simplification not yet fully implemented".to_string()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast_types::{Program, ProgramSourceType};

    #[test]
    fn test_placeholder_expression_simplification() {
        let mut ast = Program {
            body: vec![],
            source_type: ProgramSourceType::Script,
        };

        let config = TransformerConfig::default();

        let result = simplify_expressions(&mut ast, &config).unwrap();
        assert_eq!(result.simplified_count, 0);
        assert_eq!(result.rollbacks, 0);
        assert!(!result.warnings.is_empty());
    }
}