//! Tapthrough CLI

mod dispatch;

use std::io::Read as _;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::WrapErr as _;
use tap_core::{OpenSettings, PushPayload};
use tap_resolve::{ClickHandler, OpenResolver, SettingsSource as _};
use tap_settings::SettingsStore;

use crate::dispatch::PrintDispatcher;

#[derive(Parser)]
#[command(name = "tapthrough")]
#[command(about = "Decide what tapping a push notification does", long_about = None)]
struct Cli {
    /// Settings file (defaults to $TAPTHROUGH_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the open action for a payload as JSON
    Resolve {
        /// Payload JSON file, or `-` for stdin
        payload: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Resolve a payload and print the actions dispatched for it
    Open {
        /// Payload JSON file, or `-` for stdin
        payload: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Show or change stored settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Show the effective settings
    Show,

    /// Change and save settings
    Set {
        #[command(flatten)]
        overrides: Overrides,
    },
}

#[derive(Args)]
struct Overrides {
    /// Bring the app to the foreground on tap
    #[arg(long)]
    open_app: Option<bool>,

    /// Never open launch URLs
    #[arg(long)]
    suppress_launch_url: Option<bool>,
}

impl Overrides {
    fn apply(&self, mut settings: OpenSettings) -> OpenSettings {
        if let Some(open_app) = self.open_app {
            settings.open_app_on_notification_click = open_app;
        }
        if let Some(suppress) = self.suppress_launch_url {
            settings.suppress_launch_url = suppress;
        }
        settings
    }
}

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let store = match cli.config {
        Some(path) => SettingsStore::load_or_default(&path)
            .wrap_err_with(|| format!("failed to load settings from {}", path.display()))?,
        None => SettingsStore::open().wrap_err("failed to load settings")?,
    };

    match cli.command {
        Commands::Resolve { payload, overrides } => {
            cmd_resolve(&store, payload.as_deref(), &overrides)
        }
        Commands::Open { payload, overrides } => {
            cmd_open(&store, payload.as_deref(), &overrides).await
        }
        Commands::Settings { command } => match command {
            SettingsCommand::Show => cmd_settings_show(&store),
            SettingsCommand::Set { overrides } => cmd_settings_set(store, &overrides),
        },
    }
}

fn cmd_resolve(
    store: &SettingsStore,
    payload: Option<&Path>,
    overrides: &Overrides,
) -> color_eyre::eyre::Result<()> {
    let payload = read_payload(payload)?;
    let resolver = OpenResolver::new(overrides.apply(store.snapshot()));
    let action = resolver.resolve(&payload);

    println!("{}", serde_json::to_string_pretty(&action)?);
    Ok(())
}

async fn cmd_open(
    store: &SettingsStore,
    payload: Option<&Path>,
    overrides: &Overrides,
) -> color_eyre::eyre::Result<()> {
    let payload = read_payload(payload)?;
    let resolver = OpenResolver::new(overrides.apply(store.snapshot()));
    let handler = ClickHandler::new(resolver, PrintDispatcher);

    let action = handler.handle(&payload).await?;
    if action.is_noop() {
        println!("nothing to open");
    }
    Ok(())
}

fn cmd_settings_show(store: &SettingsStore) -> color_eyre::eyre::Result<()> {
    let settings = store.settings();
    println!("Path:                {}", store.path().display());
    println!(
        "Open app on click:   {}",
        settings.open_app_on_notification_click
    );
    println!("Suppress launch URL: {}", settings.suppress_launch_url);
    Ok(())
}

fn cmd_settings_set(
    mut store: SettingsStore,
    overrides: &Overrides,
) -> color_eyre::eyre::Result<()> {
    let settings = overrides.apply(store.settings());
    store.set_open_app_on_click(settings.open_app_on_notification_click);
    store.set_suppress_launch_url(settings.suppress_launch_url);
    store
        .save()
        .wrap_err_with(|| format!("failed to save settings to {}", store.path().display()))?;

    tracing::info!(path = %store.path().display(), "settings saved");
    cmd_settings_show(&store)
}

fn read_payload(path: Option<&Path>) -> color_eyre::eyre::Result<PushPayload> {
    let raw = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read payload from {}", path.display()))?,
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .wrap_err("failed to read payload from stdin")?;
            raw
        }
    };

    PushPayload::from_json_str(&raw).wrap_err("payload must be a JSON object")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let overrides = Overrides {
            open_app: Some(false),
            suppress_launch_url: None,
        };
        let settings = overrides.apply(OpenSettings::default());
        assert!(!settings.open_app_on_notification_click);
        assert!(!settings.suppress_launch_url);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "tapthrough",
            "resolve",
            "payload.json",
            "--suppress-launch-url",
            "true",
        ])
        .unwrap();
        match cli.command {
            Commands::Resolve { payload, overrides } => {
                assert_eq!(payload.as_deref(), Some(Path::new("payload.json")));
                assert_eq!(overrides.suppress_launch_url, Some(true));
                assert_eq!(overrides.open_app, None);
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_settings_set_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("open.toml");
        let store = SettingsStore::load_or_default(&path).unwrap();
        let overrides = Overrides {
            open_app: Some(false),
            suppress_launch_url: Some(true),
        };

        cmd_settings_set(store, &overrides).unwrap();

        let saved = SettingsStore::load(&path).unwrap().settings();
        assert!(!saved.open_app_on_notification_click);
        assert!(saved.suppress_launch_url);
    }

    #[test]
    fn test_payload_must_be_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");

        std::fs::write(&path, "[]").unwrap();
        let err = read_payload(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("payload must be a JSON object"));

        std::fs::write(&path, r#"{"custom":"{\"u\":\"https://example.com\"}"}"#).unwrap();
        let payload = read_payload(Some(&path)).unwrap();
        assert!(payload.custom_data().launch_url().is_some());
    }

    #[test]
    fn test_missing_payload_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_payload(Some(&dir.path().join("missing.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read payload"));
    }
}
