use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use override_hub::{OutputFormat, OverrideConfigBuilder, Profile};

/// Generate routing overrides (proxy groups, rules, DNS) for a subscription
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Subscription file in YAML or JSON, `-` for stdin
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    input: String,

    /// Output file path, stdout when omitted
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,

    /// Custom profile (YAML or TOML)
    #[arg(short, long, value_name = "FILE")]
    profile: Option<String>,

    /// Single host argument, e.g. `--arg landing=true`
    #[arg(long = "arg", value_name = "KEY=VALUE")]
    arg: Vec<String>,

    /// Host arguments as a query string, e.g. `loadbalance=1&threshold=2`
    #[arg(long, value_name = "QUERY")]
    args: Option<String>,
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read subscription from stdin")?;
        return Ok(content);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read subscription file {}", path))
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    let content = read_input(&args.input)?;
    let mut builder = OverrideConfigBuilder::new()
        .subscription_content(&content)
        .format(args.format);

    if let Some(query) = &args.args {
        builder = builder.query(query);
    }
    for pair in &args.arg {
        let (key, value) = pair.split_once('=').unwrap_or((pair.as_str(), ""));
        builder = builder.arg(key, serde_json::Value::String(value.to_string()));
    }
    if let Some(path) = &args.profile {
        let profile = Profile::load_from_file(path)
            .with_context(|| format!("Failed to load profile {}", path))?;
        builder = builder.profile(profile);
    }

    let rendered = builder
        .build()
        .context("Invalid override request")?
        .run()
        .context("Failed to render override")?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("Failed to write {}", path))?;
            info!("Override written to {}", path);
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
