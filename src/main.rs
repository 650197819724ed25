//! matc Command Line Interface
//!
//! Usage:
//!   matc [OPTIONS] <input-file>
//!   matc --help
//!
//! Examples:
//!   matc sample.mat                       # Translate to C++ on stdout
//!   matc -o sample.cpp sample.mat         # Write the translation to a file
//!   matc --emit=unparse sample.mat        # Re-render the parsed program
//!   matc --emit=tokens sample.mat         # Dump the scanner output

use clap::{Parser, ValueEnum};
use matc::codegen::CodegenConfig;
use matc::frontend::{self, Program};
use matc::utils::errors::ParseError;
use matc::utils::location::SourceMap;
use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{Result, Context};
use log::{info, debug, error};

/// matc - Matrix Language Translator
#[derive(Parser, Debug)]
#[command(name = "matc")]
#[command(version)]
#[command(about = "Translates the matrix language to C++", long_about = None)]
struct Cli {
    /// Input file to translate
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// What to emit
    #[arg(long, default_value = "cpp")]
    emit: EmitKind,

    /// Include path of the matrix runtime header
    #[arg(long, value_name = "PATH")]
    matrix_header: Option<String>,

    /// Spaces per indentation level in generated code
    #[arg(long, value_name = "N")]
    indent_width: Option<usize>,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress warnings)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmitKind {
    /// Generated C++ source
    Cpp,
    /// The program re-rendered in the matrix language
    Unparse,
    /// Abstract Syntax Tree
    Ast,
    /// Abstract Syntax Tree as JSON
    Json,
    /// Scanner output
    Tokens,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    info!("matc v{}", matc::VERSION);
    debug!("Input file: {:?}", cli.input);

    // Read input file
    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read input file: {:?}", cli.input))?;

    if matches!(cli.emit, EmitKind::Tokens) {
        let output = dump_tokens(&source);
        write_output(&cli.output, &output)?;
        return Ok(());
    }

    // Parse the source
    info!("Parsing...");
    let program = match frontend::parse(&source) {
        Ok(program) => program,
        Err(err) => {
            report(&cli.input, &source, &err);
            return Err(err).with_context(|| format!("Failed to parse {}", cli.input.display()));
        }
    };

    let output = emit(&cli, &source, &program)?;
    write_output(&cli.output, &output)?;
    info!("Done");

    Ok(())
}

fn emit(cli: &Cli, source: &str, program: &Program) -> Result<String> {
    let output = match cli.emit {
        EmitKind::Cpp => {
            let config = build_config(cli);
            debug!("Codegen config: {:?}", config);
            matc::codegen::generate(program, &config)
        }
        EmitKind::Unparse => matc::unparse(program),
        EmitKind::Ast => format!("{:#?}", program),
        EmitKind::Json => serde_json::to_string_pretty(program)
            .context("Failed to serialize the AST")?,
        EmitKind::Tokens => dump_tokens(source),
    };
    Ok(output)
}

fn build_config(cli: &Cli) -> CodegenConfig {
    let mut config = CodegenConfig::default();
    if let Some(ref header) = cli.matrix_header {
        config = config.with_matrix_header(header.clone());
    }
    if let Some(width) = cli.indent_width {
        config = config.with_indent_width(width);
    }
    config
}

fn dump_tokens(source: &str) -> String {
    frontend::tokenize(source)
        .iter()
        .map(|token| format!("{}\t{:?}\t{}", token.span, token.kind, token.lexeme))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the diagnostic with the offending source line.
fn report(path: &Path, source: &str, err: &ParseError) {
    error!("{}", err);
    let map = SourceMap::new(source);
    if let Some(snippet) = map.snippet(&err.span) {
        eprintln!("--> {}:{}", path.display(), err.span.start);
        for line in snippet.lines() {
            eprintln!("  | {}", line);
        }
    }
}

fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, content)
                .with_context(|| format!("Failed to write output file: {:?}", p))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
