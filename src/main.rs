use clap::Parser;
use kanji_quiz::core::config::{self, ResolvedConfig};
use kanji_quiz::core::state::App;
use kanji_quiz::seed::SeedSource;
use kanji_quiz::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "kanji-quiz", about = "Terminal flashcard quiz")]
struct Args {
    /// Seed collection: a JSON file path or an http(s) URL
    #[arg(short, long)]
    seed: Option<String>,

    /// Address to open first, e.g. "questions/12"
    #[arg(long)]
    start: Option<String>,
}

fn init_logging(config: &ResolvedConfig) {
    // Initialize file logger - the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Config is read before the logger exists; anything worth keeping is
    // replayed into the log once it is set up.
    let (file_config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => {
            eprintln!("{e}; continuing with defaults");
            (config::QuizConfig::default(), Some(e))
        }
    };
    let config = config::resolve(&file_config, args.seed.as_deref(), args.start.as_deref());
    for notice in &config.notices {
        eprintln!("kanji-quiz: {notice}");
    }
    init_logging(&config);

    if let Some(path) = config::config_path() {
        log::info!("Config file: {}", path.display());
    }
    if let Some(e) = config_error {
        log::warn!("{}; continuing with defaults", e);
    }
    for notice in &config.notices {
        log::warn!("{}", notice);
    }
    log::info!("Kanji quiz starting up with seed: {}", config.seed_source);

    let source: SeedSource = match config.seed_source.parse() {
        Ok(source) => source,
        Err(never) => match never {},
    };
    let provider = source.into_provider();
    let records = match provider.fetch().await {
        Ok(records) => records,
        Err(e) => {
            log::error!("Failed to load seed from {}: {}", provider.describe(), e);
            if let Err(io) = tui::show_startup_failure(&provider.describe(), &e) {
                log::warn!("Could not show failure screen: {}", io);
            }
            eprintln!("kanji-quiz: could not load {}: {e}", provider.describe());
            return ExitCode::FAILURE;
        }
    };

    let app = App::from_config(records, &config, provider.describe());
    match tui::run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal error: {}", e);
            eprintln!("kanji-quiz: {e}");
            ExitCode::FAILURE
        }
    }
}
