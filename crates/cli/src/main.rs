use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fileconv_core::{
    extension_of, load_config, load_config_or_default, validate_config, Category, Config,
    FileConverter, Format, ProcessRunner,
};

/// Names a TOML config file; without it defaults plus `FILECONV_*` overrides apply.
const CONFIG_ENV: &str = "FILECONV_CONFIG";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays clean for callers.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Paths need not be valid Unicode.
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let [input, output] = args.as_slice() else {
        eprint!("{}", usage());
        return ExitCode::FAILURE;
    };

    match run(Path::new(input), Path::new(output)).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(input: &Path, output: &Path) -> Result<bool> {
    let config = config()?;
    validate_config(&config).context("Configuration validation failed")?;

    let converter = FileConverter::new(config, ProcessRunner::new());
    let ok = converter.convert(input, output).await;
    if ok {
        info!(
            input = %input.display(),
            output = %output.display(),
            "Conversion successful"
        );
    }
    Ok(ok)
}

fn config() -> Result<Config> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))
        }
        None => load_config_or_default().context("Failed to load configuration"),
    }
}

fn usage() -> String {
    let mut text = String::from("Usage: convert <inputPath> <outputPath>\n\n");
    text.push_str("Supported formats:\n");
    for category in Category::ALL {
        let extensions: Vec<&str> = Format::in_category(category).map(extension_of).collect();
        text.push_str(&format!("  {:<7} {}\n", category.name(), extensions.join(" ")));
    }
    text
}
