//! # Property Minification Module
//!
//! Pass 4: Property Minification - Safe property renaming

use crate::analyzer::SemanticAnalysis;
use crate::parser::ast_types::Program;
use crate::transformer::{TransformResult, TransformerConfig};

#[derive(Debug, Clone)]
pub struct PropertyMinificationResult {
    pub renamed_count: u32,
    pub warnings: Vec<String>,
}

pub fn minify_properties(
    _ast: &mut Program,
    _analysis_result: &SemanticAnalysis,
    _config: &TransformerConfig,
) -> TransformResult<PropertyMinificationResult> {
    // TODO: Implement property minification
    Ok(PropertyMinificationResult {
        renamed_count: 0,
        warnings: vec!["Property minification not yet implemented".to_string()],
    })
}