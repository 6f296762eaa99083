//! Command line driver: load, infer, report.

use anyhow::{Context, Result, bail};
use jprops_infer::infer_all;
use tracing::{info, warn};

use crate::args::{CliArgs, OutputFormat};
use crate::model_loader::load_model;
use crate::report::ModelReport;

/// Run inference over the model named by `args` and render the report.
pub fn run(args: &CliArgs) -> Result<String> {
    let json = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    run_source(&json, args)
}

/// Like [`run`], with the model text already in memory.
pub fn run_source(json: &str, args: &CliArgs) -> Result<String> {
    let mut table = load_model(json).context("failed to load class model")?;

    let outcomes = infer_all(&mut table).context("property inference failed")?;
    let created: usize = outcomes.iter().map(|o| o.created.len()).sum();
    let retained: usize = outcomes.iter().map(|o| o.retained.len()).sum();
    info!(classes = outcomes.len(), created, retained, "inference complete");

    for pass in 2..=args.passes {
        let rerun = infer_all(&mut table).context("property inference failed")?;
        if let Some(changed) = rerun.iter().find(|outcome| !outcome.is_unchanged()) {
            warn!(pass, class = ?changed.class, "repeated inference pass changed the model");
        }
    }

    let mut report = ModelReport::build(&table, &outcomes)?;
    if !args.classes.is_empty() {
        for wanted in &args.classes {
            if !report.classes.iter().any(|class| &class.class == wanted) {
                bail!("class `{wanted}` is not declared in the model");
            }
        }
        report
            .classes
            .retain(|class| args.classes.iter().any(|wanted| wanted == &class.class));
    }

    match args.format {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(&report)?;
            out.push('\n');
            Ok(out)
        }
    }
}
