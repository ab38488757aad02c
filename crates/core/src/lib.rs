pub mod chart;
pub mod dataset;
pub mod domain;
pub mod locale;
pub mod lookup;
pub mod screen;
pub mod selection;
pub mod storage;
pub mod widget;

pub mod config {
    use crate::chart::theme::ThemeMode;
    use crate::locale::Language;
    use anyhow::Context;
    use std::path::PathBuf;

    const DEFAULT_PREFS_PATH: &str = "feedchart_prefs.json";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub dataset_path: Option<PathBuf>,
        pub prefs_path: PathBuf,
        pub language: Option<String>,
        pub theme: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                dataset_path: std::env::var("FEEDCHART_DATASET").ok().map(PathBuf::from),
                prefs_path: std::env::var("FEEDCHART_PREFS")
                    .ok()
                    .filter(|p| !p.trim().is_empty())
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFS_PATH)),
                language: std::env::var("FEEDCHART_LANG").ok(),
                theme: std::env::var("FEEDCHART_THEME").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        /// Language used until one is persisted. Unknown codes fall back to English.
        pub fn default_language(&self) -> Language {
            match self.language.as_deref() {
                Some(code) => Language::from_code(code).unwrap_or_else(|| {
                    tracing::warn!(code, "unknown FEEDCHART_LANG; using English");
                    Language::English
                }),
                None => Language::English,
            }
        }

        pub fn theme_mode(&self) -> anyhow::Result<ThemeMode> {
            match self.theme.as_deref() {
                Some(theme) => theme.parse().context("invalid FEEDCHART_THEME"),
                None => Ok(ThemeMode::default()),
            }
        }
    }

}
