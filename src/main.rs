//! qrfixtures entrypoint

use anyhow::Context;
use clap::Parser;
use qrfixtures::{FIXTURES, FixtureConfig, logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "qrfixtures",
    version,
    about = "Generate mock QR-code images for exercising the SafePay scanner"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrfixtures.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory to write fixtures into (takes precedence over config file)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Decode every written image and fail if it does not match its payload
    #[arg(long)]
    verify: bool,

    /// Print the written fixtures as JSON instead of a human-readable summary
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = FixtureConfig::load(cli.config.as_deref())?;

    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }

    if cli.verify {
        config.output.verify = true;
    }

    let _log_guard = logging::init(&config.logging)?;

    let emissions = qrfixtures::generate(&config).with_context(|| {
        format!(
            "failed to generate fixtures in {}",
            config.output.directory.display()
        )
    })?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&emissions)?);
        return Ok(());
    }

    println!();
    for (emission, fixture) in emissions.iter().zip(FIXTURES.iter()) {
        println!(
            "  [{}] {} (version {}, {}px)",
            fixture.category,
            emission.path.display(),
            emission.version,
            emission.pixels
        );
    }
    println!(
        "\nMock QR codes generated in the '{}' directory.",
        config.output.directory.display()
    );
    println!("Scan them with the SafePay QR app to exercise each classification scenario.");

    Ok(())
}
