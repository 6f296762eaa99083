use clap::{Parser, ValueEnum};
use jprops_common::limits::MAX_INFERENCE_PASSES;
use std::path::PathBuf;

/// CLI arguments for the jprops binary.
#[derive(Parser, Debug)]
#[command(
    name = "jprops",
    version,
    about = "Infer property backing fields from getter/setter pairs"
)]
pub struct CliArgs {
    /// JSON class model to analyse.
    pub input: PathBuf,

    /// Only report these classes (simple names). May be repeated.
    #[arg(short = 'c', long = "class")]
    pub classes: Vec<String>,

    /// Output format.
    #[arg(short = 'f', long, value_enum, ignore_case = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Number of inference passes; passes after the first must be no-ops.
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_INFERENCE_PASSES))
    )]
    pub passes: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
