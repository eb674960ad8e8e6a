//! # rachunek CLI
//!
//! Renders a YAML billing record into a PDF invoice.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use rachunek::core::{BillingRecord, LanguageTag};
use rachunek::i18n::Catalog;
use tracing_subscriber::EnvFilter;

/// Render a billing record into a localized PDF invoice.
#[derive(Parser, Debug)]
#[command(name = "rachunek", version, about)]
struct Cli {
    /// Language of labels and item names.
    #[arg(long, default_value = "en")]
    lang: LanguageTag,

    /// Where to write the PDF.
    #[arg(long, default_value = "./invoice.pdf")]
    out: PathBuf,

    /// Directory with one `<lang>.yaml` translation catalog per language.
    #[arg(long, env = "RACHUNEK_I18N_DIR", default_value = "i18n")]
    i18n_dir: PathBuf,

    /// Billing record in YAML.
    record: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!(
        lang = %cli.lang,
        out = %cli.out.display(),
        i18n_dir = %cli.i18n_dir.display(),
        record = ?cli.record,
        "parsed arguments"
    );

    let Some(record_path) = cli.record else {
        println!(
            "Missing invoice definition. Check '{} --help'",
            env!("CARGO_BIN_NAME")
        );
        return Ok(ExitCode::FAILURE);
    };

    let catalog = Catalog::load_dir(&cli.i18n_dir).with_context(|| {
        format!(
            "failed to load translations from {}",
            cli.i18n_dir.display()
        )
    })?;
    let record = BillingRecord::from_path(&record_path)
        .with_context(|| format!("failed to read invoice definition {}", record_path.display()))?;

    rachunek::pdf::generate(&record, &catalog, &cli.lang, &cli.out)
        .with_context(|| format!("failed to write invoice to {}", cli.out.display()))?;

    println!("Success! Invoice saved to: {}", cli.out.display());
    Ok(ExitCode::SUCCESS)
}
