use anyhow::Result;
use clap::Parser;

use jprops::args::CliArgs;
use jprops::driver;
use jprops::tracing_config::init_tracing;

fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    let output = driver::run(&args)?;
    print!("{output}");
    Ok(())
}
