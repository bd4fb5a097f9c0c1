//! # RJS Compiler
//!
//! A Rust-based JavaScript compiler that provides fast and reliable JavaScript compilation.
//! This CLI tool processes JavaScript source files and transforms them according to
//! specified compilation rules and optimizations.
//!
//! ## Features
//!
//! - Fast compilation using Rust's performance characteristics
//! - Verbose output for debugging compilation processes
//! - Comprehensive error handling and reporting
//! - Cross-platform compatibility
//!
//! ## Usage
//!
//! ```bash
//! rjs-compiler [OPTIONS] <FILE>
//! ```
//!
//! For more information, run `rjs-compiler --help`.

use std::path::PathBuf;
use std::process;

use clap::{Arg, Command};

mod analyzer;
mod generator;
mod parser;
mod transformer;

/// Application version constant
const VERSION: &str = "0.1.0";

/// Application name constant
const APP_NAME: &str = "rjs-compiler";

/// Configuration structure for the compiler
#[derive(Debug, Clone)]
struct CompilerConfig {
    /// Input file path to compile
    input_file: Option<PathBuf>,
    /// Enable verbose output
    verbose: bool,
    /// Lower block-scoped `let`/`const` declarations to `var`
    lower_block_scoping: bool,
}

/// Custom error types for the compiler
#[derive(Debug, thiserror::Error)]
enum CompilerError {
    #[error("Input file not specified")]
    MissingInputFile,
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Analysis error: {0}")]
    AnalysisError(String),
    #[error("Transformation error: {0}")]
    TransformError(String),
    #[error("Code generation error: {0}")]
    GenerationError(String),
}

/// Result type alias for compiler operations
type CompilerResult<T> = Result<T, CompilerError>;

/// Entry point for the RJS Compiler application.
///
/// This function sets up command-line argument parsing, initializes the compiler
/// configuration, and orchestrates the compilation process.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(error) = run_compiler() {
        eprintln!("Error: {}", error);
        process::exit(1);
    }
}

/// Main application logic separated from main() for better error handling.
///
/// # Returns
///
/// Returns `Ok(())` on successful compilation, or a `CompilerError` on failure.
///
/// # Examples
///
/// ```rust,no_run
/// // This is called internally by main()
/// match run_compiler() {
///     Ok(()) => println!("Compilation successful"),
///     Err(e) => eprintln!("Compilation failed: {}", e),
/// }
/// ```
fn run_compiler() -> CompilerResult<()> {
    let config = parse_command_line_arguments()?;
    
    display_welcome_message();
    
    if config.verbose {
        display_verbose_info(&config);
    }
    
    match config.input_file {
        Some(ref file_path) => compile_file(file_path, &config),
        None => {
            display_usage_information();
            Err(CompilerError::MissingInputFile)
        }
    }
}

/// Parses command-line arguments and returns a compiler configuration.
///
/// # Returns
///
/// Returns a `CompilerResult<CompilerConfig>` containing the parsed configuration
/// or an error if argument parsing fails.
///
/// # Errors
///
/// This function currently doesn't return errors but is designed to handle
/// future validation requirements.
fn parse_command_line_arguments() -> CompilerResult<CompilerConfig> {
    let matches = Command::new(APP_NAME)
        .version(VERSION)
        .author("RJS Compiler Team <team@rjscompiler.dev>")
        .about("RJS Compiler - A Rust-based JavaScript compiler")
        .long_about(
            "A high-performance JavaScript compiler built with Rust. \n\n\
             This tool processes JavaScript source files and applies various \n\
             compilation optimizations and transformations."
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .help("Enable verbose output for debugging")
                .long_help(
                    "Enable verbose output mode which provides detailed information \n\
                     about the compilation process, including intermediate steps \n\
                     and performance metrics."
                ),
        )
        .arg(
            Arg::new("no-lower-block-scoping")
                .long("no-lower-block-scoping")
                .action(clap::ArgAction::SetTrue)
                .help("Skip lowering let/const declarations to var")
                .long_help(
                    "Disable the block-scope lowering pass that rewrites `let`/`const` \n\
                     declarations to `var`, preserving per-iteration closure semantics \n\
                     for loop-captured bindings. Enabled by default."
                ),
        )
        .arg(
            Arg::new("input")
                .help("Input JavaScript file to compile")
                .long_help(
                    "Path to the JavaScript source file that will be compiled. \n\
                     The file must exist and be readable."
                )
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .index(1),
        )
        .get_matches();

    let input_file = matches.get_one::<PathBuf>("input").cloned();
    let verbose = matches.get_flag("verbose");
    let lower_block_scoping = !matches.get_flag("no-lower-block-scoping");

    Ok(CompilerConfig {
        input_file,
        verbose,
        lower_block_scoping,
    })
}

/// Displays the welcome message for the application.
///
/// This function prints the application greeting and version information
/// in a user-friendly format.
fn display_welcome_message() {
    println!("🦀 Hello Rust!");
    println!("Welcome to RJS Compiler v{}", VERSION);
}

/// Displays verbose information about the current configuration.
///
/// # Arguments
///
/// * `config` - The compiler configuration containing settings to display
///
/// # Examples
///
/// ```rust,no_run
/// let config = CompilerConfig {
///     input_file: Some(PathBuf::from("test.js")),
///     verbose: true,
///     lower_block_scoping: true,
/// };
/// display_verbose_info(&config);
/// ```
fn display_verbose_info(config: &CompilerConfig) {
    println!("🔍 Verbose mode enabled");
    println!("📋 Configuration:");
    
    if let Some(ref input_path) = config.input_file {
        println!("   📁 Input file: {}", input_path.display());
    }
    
    println!("   🔧 Verbose output: {}", config.verbose);
}

/// Displays usage information when no input file is provided.
///
/// This function provides helpful guidance to users about how to use
/// the compiler correctly.
fn display_usage_information() {
    println!("💡 Usage: {} [OPTIONS] <FILE>", APP_NAME);
    println!("   Use --help for more information");
    println!("   Example: {} --verbose my_script.js", APP_NAME);
}

/// Compiles the specified JavaScript file.
///
/// # Arguments
///
/// * `file_path` - Path to the JavaScript file to compile
/// * `config` - Compiler configuration settings
///
/// # Returns
///
/// Returns `Ok(())` on successful compilation, or a `CompilerError` on failure.
///
/// # Errors
///
/// Returns `CompilerError::FileNotFound` if the input file doesn't exist.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::PathBuf;
/// 
/// let file_path = PathBuf::from("example.js");
/// let config = CompilerConfig {
///     input_file: Some(file_path.clone()),
///     verbose: false,
///     lower_block_scoping: true,
/// };
/// 
/// match compile_file(&file_path, &config) {
///     Ok(()) => println!("Compilation successful"),
///     Err(e) => eprintln!("Compilation failed: {}", e),
/// }
/// ```
fn compile_file(file_path: &PathBuf, config: &CompilerConfig) -> CompilerResult<()> {
    if config.verbose {
        println!("📂 Processing input file: {}", file_path.display());
    }
    
    // Validate that the file exists
    if !file_path.exists() {
        return Err(CompilerError::FileNotFound(file_path.clone()));
    }
    
    if config.verbose {
        println!("✅ Input file validation passed");
        println!("🚀 Starting compilation process...");
    }
    
    // Read the file content
    let source_code = std::fs::read_to_string(file_path)
        .map_err(|_| CompilerError::FileNotFound(file_path.clone()))?;
    
    if config.verbose {
        println!("📄 Read {} bytes from file", source_code.len());
    }
    
    // Parse the JavaScript file
    let parser_config = parser::ParserConfig {
        preserve_trivia: config.verbose, // Enable trivia preservation in verbose mode
        ..parser::ParserConfig::default()
    };
    let parse_result = parser::parse_js(&source_code, &file_path.to_string_lossy(), &parser_config);
    
    if config.verbose {
        println!("🔍 Phase 1: Parsing completed");
    }
    
    // Check for parsing errors
    if !parse_result.errors.is_empty() {
        eprintln!("❌ Parsing errors found:");
        for error in &parse_result.errors {
            eprintln!("   {}", error);
        }
        return Err(CompilerError::ParseError(format!(
            "Found {} parsing errors", 
            parse_result.errors.len()
        )));
    }
    
    // Extract the AST
    let ast = parse_result.ast.ok_or_else(|| {
        CompilerError::ParseError("No AST generated despite no errors".to_string())
    })?;
    
    if config.verbose {
        println!("📊 AST Statistics:");
        println!("   📋 Statements: {}", ast.body.len());
        println!("   📘 Source type: {:?}", ast.source_type);
        
        // Display trivia information if available
        if let Some(ref trivia) = parse_result.trivia {
            println!("📝 Trivia Preserved:");
            println!("   💬 Line comments: {}", trivia.line_comments.len());
            println!("   💬 Block comments: {}", trivia.block_comments.len());
            println!("   ⬜ Leading whitespace: {}", trivia.leading_whitespace.len());
            println!("   ⬜ Trailing whitespace: {}", trivia.trailing_whitespace.len());
            
            // Show first few comments for debugging
            if !trivia.line_comments.is_empty() {
                println!("   🗺 Sample line comments:");
                for (i, comment) in trivia.line_comments.iter().take(3).enumerate() {
                    println!("     {}. '{}' (pos: {}-{})", 
                        i + 1, comment.text, comment.span.start, comment.span.end);
                }
            }
            
            if !trivia.block_comments.is_empty() {
                println!("   🗺 Sample block comments:");
                for (i, comment) in trivia.block_comments.iter().take(3).enumerate() {
                    println!("     {}. '{}' (pos: {}-{})", 
                        i + 1, comment.text, comment.span.start, comment.span.end);
                }
            }
        }
        
        // Pretty print AST in JSON format for debugging
        if let Ok(ast_json) = serde_json::to_string_pretty(&ast) {
            println!("🌳 AST Structure (JSON):");
            // Limit output to first 1000 characters for readability
            let truncated = if ast_json.len() > 1000 {
                format!("{}...\n(truncated)", &ast_json[..1000])
            } else {
                ast_json
            };
            println!("{}", truncated);
        }
    }
    
    if config.verbose {
        println!("🔄 Phase 2: Semantic analysis");
    }

    let analyzer_config = analyzer::AnalyzerConfig {
        verbose: config.verbose,
        ..analyzer::AnalyzerConfig::default()
    };
    let analysis_result = analyzer::analyze_ast(&ast, &analyzer_config)
        .map_err(|e| CompilerError::AnalysisError(e.to_string()))?;

    if config.verbose {
        println!("🔄 Phase 3: Transformation");
    }

    let transformer_config = transformer::TransformerConfig {
        enable_block_scope_lowering: config.lower_block_scoping,
        verbose: config.verbose,
        ..transformer::TransformerConfig::default()
    };
    let mut compiler = transformer::Transformer::new(transformer_config, analysis_result);
    let transform_result = compiler
        .transform(ast)
        .map_err(|e| CompilerError::TransformError(e.to_string()))?;

    if config.verbose {
        for warning in &transform_result.warnings {
            println!("   ⚠️  {}", warning);
        }
        println!("🔄 Phase 4: Code generation");
    }

    let generator_config = generator::GeneratorConfig::default();
    let code_generator = generator::Generator::new(generator_config);
    let generation_result = code_generator
        .generate(&transform_result.transformed_ast, Some(&source_code))
        .map_err(|e| CompilerError::GenerationError(e.to_string()))?;

    println!("✅ Compilation completed successfully!");
    println!("{}", generation_result.code);

    if config.verbose {
        println!("📊 Compilation statistics:");
        println!("   ⏱️  Transformation time: {}ms", transform_result.stats.transformation_time_ms);
        println!("   📏 Output size: {} bytes", generation_result.diagnostics.generated_size);
        println!("   🎯 Statements processed: {}", transform_result.transformed_ast.body.len());
    }

    Ok(())
}

