//! # Function Minification Module
//!
//! Pass 5: Function Minification - Function inlining and optimization

use crate::analyzer::SemanticAnalysis;
use crate::parser::ast_types::Program;
use crate::transformer::{TransformResult, TransformerConfig};

#[derive(Debug, Clone)]
pub struct FunctionMinificationResult {
    pub inlined_count: u32,
    pub warnings: Vec<String>,
}

pub fn minify_functions(
    _ast: &mut Program,
    _analysis_result: &SemanticAnalysis,
    _config: &TransformerConfig,
) -> TransformResult<FunctionMinificationResult> {
    // TODO: Implement function minification
    Ok(FunctionMinificationResult {
        inlined_count: 0,
        warnings: vec!["Function minification not yet implemented".to_string()],
    })
}