//! Script-to-TAC Translator Driver
//!
//! Command-line entry point. This layer owns input/output and
//! presentation only: it reads a syntax-tree JSON document produced by an
//! external ESTree-compatible parser, invokes the core translation, and
//! prints (or serializes) the three text blocks — the instruction listing
//! and the two backend surfaces. Translation semantics live entirely in
//! the library crates.

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stc")]
#[command(about = "Script-to-TAC Translator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a syntax-tree JSON document
    Translate {
        /// Input syntax-tree JSON file, or `-` for stdin
        input: PathBuf,

        /// Which text block to print
        #[arg(short, long, value_enum, default_value_t = EmitKind::All)]
        emit: EmitKind,

        /// Serialize the full result (or the translation error) as JSON
        #[arg(long)]
        json: bool,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EmitKind {
    /// Instruction listing only
    Ir,
    /// Script-style surface only
    Script,
    /// Brace-delimited typed surface only
    Typed,
    /// All three blocks
    All,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Translate {
            input,
            emit,
            json,
            output,
        } => {
            let source = match read_input(&input) {
                Ok(source) => source,
                Err(e) => {
                    eprintln!("Error reading {}: {}", input.display(), e);
                    std::process::exit(1);
                }
            };
            match translate_document(&source, emit, json) {
                Ok(text) => {
                    if let Some(path) = output {
                        if let Err(e) = fs::write(&path, &text) {
                            eprintln!("Error writing {}: {}", path.display(), e);
                            std::process::exit(1);
                        }
                    } else {
                        print!("{}", text);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn read_input(path: &std::path::Path) -> Result<String, std::io::Error> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(path)
    }
}

/// Run the pipeline on one document and render the requested output.
///
/// With `as_json`, both outcomes are serialized: a successful translation
/// becomes `{instructions, script, typed}` and a translation failure
/// becomes `{error, message}` — the structured-failure response a caller
/// can parse. Without it, failures are returned as errors.
fn translate_document(
    source: &str,
    emit: EmitKind,
    as_json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let tree = stc_frontend::parse_tree(source)
        .map_err(|e| format!("syntax tree parse error: {}", e))?;

    match stc_backend::translate(&tree) {
        Ok(result) => {
            if as_json {
                let listing: Vec<String> = result
                    .program
                    .instructions
                    .iter()
                    .map(|i| i.to_string())
                    .collect();
                let doc = json!({
                    "instructions": listing,
                    "script": result.script,
                    "typed": result.typed,
                });
                Ok(serde_json::to_string_pretty(&doc)? + "\n")
            } else {
                Ok(render_blocks(&result, emit))
            }
        }
        Err(err) => {
            if as_json {
                let doc = json!({
                    "error": &err,
                    "message": err.to_string(),
                });
                Ok(serde_json::to_string_pretty(&doc)? + "\n")
            } else {
                Err(err.into())
            }
        }
    }
}

fn render_blocks(result: &stc_backend::Translation, emit: EmitKind) -> String {
    match emit {
        EmitKind::Ir => result.program.listing() + "\n",
        EmitKind::Script => result.script.clone(),
        EmitKind::Typed => result.typed.clone(),
        EmitKind::All => format!(
            "Instructions:\n{}\n\nScript backend:\n{}\nTyped backend:\n{}",
            result.program.listing(),
            result.script,
            result.typed
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECLARATION: &str = r#"{
        "type": "Program",
        "body": [{
            "type": "VariableDeclaration",
            "declarations": [{
                "type": "VariableDeclarator",
                "id": { "type": "Identifier", "name": "a" },
                "init": { "type": "Literal", "value": 3 }
            }]
        }]
    }"#;

    #[test]
    fn test_translate_document_all_blocks() {
        let text = translate_document(DECLARATION, EmitKind::All, false).unwrap();
        assert!(text.contains("Instructions:"));
        assert!(text.contains("mov a, 3"));
        assert!(text.contains("a = None"));
        assert!(text.contains("int a;"));
    }

    #[test]
    fn test_translate_document_single_block() {
        let text = translate_document(DECLARATION, EmitKind::Script, false).unwrap();
        assert_eq!(text, "a = None\na = 3\n");
    }

    #[test]
    fn test_translate_document_json_result() {
        let text = translate_document(DECLARATION, EmitKind::All, true).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["instructions"][0], "decl a");
        assert!(doc["script"].as_str().unwrap().contains("a = 3"));
        assert!(doc["typed"].as_str().unwrap().contains("a = 3;"));
    }

    #[test]
    fn test_translate_document_json_error() {
        let source = r#"{
            "type": "Program",
            "body": [{ "type": "ContinueStatement" }]
        }"#;
        let text = translate_document(source, EmitKind::All, true).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            doc["message"],
            "unsupported syntax construct: ContinueStatement"
        );
    }

    #[test]
    fn test_translate_document_parse_boundary_error() {
        let err = translate_document("not json", EmitKind::All, false).unwrap_err();
        assert!(err.to_string().starts_with("syntax tree parse error"));
    }
}
