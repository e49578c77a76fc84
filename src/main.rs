#![deny(missing_docs)]

//! # CDD Interfaces CLI
//!
//! Command line front-end: loads an OpenAPI document and prints parse results as JSON.
//!
//! Supported Commands:
//! - `operation`: one path + method.
//! - `document`: every operation in the document.

use cdd_interfaces::{
    load_document, parse_document, parse_operation, AppError, AppResult, ParserOptions,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI operation -> client interface definitions")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a single operation.
    Operation(OperationArgs),
    /// Parse every operation in the document.
    Document(CommonArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Path to the OpenAPI document (JSON or YAML).
    #[clap(short, long)]
    input: PathBuf,

    /// Write the JSON here instead of stdout.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Honour `required` lists of body schemas.
    #[clap(
        long,
        env = "CDD_MARK_REQUIRED",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    mark_required: bool,

    /// Response key whose content defines the response type.
    #[clap(long, env = "CDD_SUCCESS_STATUS", default_value = "200")]
    success_status: String,
}

impl CommonArgs {
    fn options(&self) -> ParserOptions {
        ParserOptions {
            mark_required: self.mark_required,
            success_status: self.success_status.clone(),
        }
    }
}

#[derive(Args, Debug)]
struct OperationArgs {
    #[clap(flatten)]
    common: CommonArgs,

    /// Path template, e.g. `/pets/{id}`.
    #[clap(short, long)]
    path: String,

    /// HTTP method (case-insensitive).
    #[clap(short, long, default_value = "get")]
    method: String,
}

fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Operation(args) => {
            let document = load_document(&args.common.input)?;
            let result = parse_operation(
                &document,
                &args.path,
                &args.method,
                &args.common.options(),
            )
            .ok_or_else(|| {
                AppError::General(format!(
                    "No operation {} {} in {:?}",
                    args.method.to_uppercase(),
                    args.path,
                    args.common.input
                ))
            })?;
            emit(&result, args.common.output.as_ref())?;
        }
        Commands::Document(args) => {
            let document = load_document(&args.input)?;
            let results = parse_document(&document, &args.options());
            log::info!("parsed {} operations from {:?}", results.len(), args.input);
            emit(&results, args.output.as_ref())?;
        }
    }

    Ok(())
}

fn emit<T: Serialize>(value: &T, output: Option<&PathBuf>) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => fs::write(path, json)?,
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_operation_args() {
        let cli = Cli::try_parse_from([
            "cdd-interfaces",
            "operation",
            "--input",
            "api.yaml",
            "--path",
            "/pets/{id}",
            "--mark-required",
            "false",
        ])
        .unwrap();
        match cli.command {
            Commands::Operation(args) => {
                assert_eq!(args.method, "get");
                assert_eq!(args.path, "/pets/{id}");
                let opts = args.common.options();
                assert!(!opts.mark_required);
                assert_eq!(opts.success_status, "200");
            }
            other => panic!("Expected operation command, got {:?}", other),
        }
    }
}
