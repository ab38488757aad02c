use anyhow::Context;
use clap::{Parser, Subcommand};
use feedchart_core::chart::theme::{Palette, ThemeMode};
use feedchart_core::dataset::{self, Dataset};
use feedchart_core::locale::{self, Strings};
use feedchart_core::storage::file::JsonFileStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "feedchart", about = "Livestock feed recommendations")]
struct Args {
    /// Dataset JSON to use instead of the bundled one.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Preference file. Defaults to FEEDCHART_PREFS or ./feedchart_prefs.json.
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    /// light or dark.
    #[arg(long, global = true)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the animals of the home screen.
    Animals {
        #[arg(long)]
        json: bool,
    },
    /// Open an animal's details screen, apply the given selections and print it.
    Show(commands::ShowArgs),
    /// Show the UI language, or switch it (en, hi, kn).
    Language { code: Option<String> },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = feedchart_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    match run(&settings, args) {
        Ok(out) => {
            print!("{out}");
            Ok(())
        }
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %format!("{err:#}"), "command failed");
            Err(err)
        }
    }
}

fn run(settings: &feedchart_core::config::Settings, args: Args) -> anyhow::Result<String> {
    let prefs_path = args.prefs.unwrap_or_else(|| settings.prefs_path.clone());
    let mut store = JsonFileStore::open(prefs_path);

    let language = locale::load_language(&store, settings.default_language());
    let strings = Strings::new(language);

    match args.command {
        Command::Animals { json } => {
            let dataset = load_dataset(settings, args.dataset)?;
            commands::animals(&dataset, &strings, json)
        }
        Command::Show(show) => {
            let dataset = load_dataset(settings, args.dataset)?;
            let theme = match args.theme.as_deref() {
                Some(raw) => raw.parse::<ThemeMode>()?,
                None => settings.theme_mode()?,
            };
            commands::show(&dataset, &mut store, &strings, Palette::for_mode(theme), &show)
        }
        Command::Language { code } => {
            commands::language(&mut store, settings.default_language(), code.as_deref())
        }
    }
}

fn load_dataset(
    settings: &feedchart_core::config::Settings,
    path_arg: Option<PathBuf>,
) -> anyhow::Result<Dataset> {
    match dataset_path(settings, path_arg) {
        Some(path) => dataset::load_from_path(&path)
            .with_context(|| format!("load dataset {} failed", path.display())),
        None => {
            tracing::debug!(version = dataset::DATASET_VERSION, "using bundled dataset");
            dataset::load_bundled().context("bundled dataset is malformed")
        }
    }
}

/// `--dataset` wins over FEEDCHART_DATASET; neither means the bundled dataset.
fn dataset_path(
    settings: &feedchart_core::config::Settings,
    path_arg: Option<PathBuf>,
) -> Option<PathBuf> {
    path_arg.or_else(|| settings.dataset_path.clone())
}

fn init_sentry(settings: &feedchart_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
