use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use eeg_launcher::cli::Args;
use eeg_launcher::config::load_config;
use eeg_launcher::logging::init_logging;
use eeg_launcher::prompt::IntroPrompt;
use eeg_launcher::session::run_session;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply_overrides(&mut config);

    let request = IntroPrompt::new(io::stdin().lock(), io::stdout().lock()).run(&args.preset())?;

    let outcome = run_session(&request, &config, &mut io::stdout().lock())?;

    let presentation = &outcome.presentation;
    match &presentation.recording {
        Some(recording) => info!(
            "Saved {} samples and {} markers to {}",
            recording.samples,
            recording.markers,
            recording.path.display()
        ),
        None => info!(
            "Presented {} stimuli without recording",
            presentation.stimuli.len()
        ),
    }

    Ok(())
}
