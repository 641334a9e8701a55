use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use vsm_cli::{run, Args};

fn main() -> Result<()> {
    // stdout carries the JSON ranking
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let args = Args::parse();
    let response = run(&args)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
