use std::path::PathBuf;

use shape_sorter_engine::GameSeed;
use tracing::info;

use crate::{command::play::app::PlayApp, logging, tui::Tui};

mod app;

pub(crate) const DEFAULT_BASE_URL: &str = "https://shape-sorter.example/";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed of the first game (a fresh one is generated when omitted)
    #[clap(long)]
    seed: Option<GameSeed>,
    /// Save the game recordings to files when the session ends
    #[clap(long)]
    save_recording: bool,
    /// Directory to save recording files
    #[clap(long, default_value = "./data/recordings/")]
    record_dir: PathBuf,
    /// Base URL of share links
    #[clap(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Write debug logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            save_recording: false,
            record_dir: PathBuf::from("./data/recordings/"),
            base_url: DEFAULT_BASE_URL.to_owned(),
            log_file: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        save_recording,
        record_dir,
        base_url,
        log_file,
    } = arg;

    if let Some(log_file) = log_file {
        logging::init_file(log_file)?;
    }

    let seed = seed.clone().unwrap_or_else(GameSeed::generate);
    let mut app = PlayApp::new(seed, base_url.clone());
    Tui::new().run(&mut app)?;

    if *save_recording {
        for history in app.into_histories() {
            if history.is_empty() {
                continue;
            }
            let path = history.save(record_dir)?;
            info!(path = %path.display(), "recording saved");
            eprintln!("Saved recording to {}", path.display());
        }
    }

    Ok(())
}
