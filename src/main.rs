mod api;
mod cli_messages;
mod config;
mod consts;
mod controller;
mod cost;
mod environment;
mod events;
mod format;
mod logging;
mod models;
mod network;
mod session;
mod ui;
mod workers;

use crate::api::Credentials;
use crate::config::{Config, Theme, get_config_path};
use crate::consts::cli_consts::backend::{DEFAULT_PASSWORD, DEFAULT_USERNAME};
use crate::environment::Environment;
use crate::session::{
    SessionOptions, run_headless_mode, run_snapshot, run_tui_mode, setup_session,
};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Base URL of the monitor backend. Overrides MONITOR_ENVIRONMENT and the config file.
    #[arg(long, value_name = "URL", global = true)]
    url: Option<String>,

    /// Basic auth user of the backend
    #[arg(long, env = "MONITOR_USERNAME", default_value = DEFAULT_USERNAME, global = true)]
    username: String,

    /// Basic auth password of the backend
    #[arg(
        long,
        env = "MONITOR_PASSWORD",
        default_value = DEFAULT_PASSWORD,
        hide_env_values = true,
        global = true
    )]
    password: String,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the dashboard
    Start {
        /// Run without the terminal UI, printing refresh results to stdout
        #[arg(long, action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Paint the theme background colour across the whole terminal
        #[arg(long, action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Fetch the overview once and print it
    Snapshot,
    /// Persist the colour theme used by the dashboard
    Theme {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

/// Resolve the backend: `--url`, then `MONITOR_ENVIRONMENT`, then the
/// config file, then the local default.
fn resolve_environment(url: Option<&str>, config: &Config) -> Result<Environment, String> {
    if let Some(url) = url {
        return url.parse::<Environment>();
    }
    let from_env = std::env::var("MONITOR_ENVIRONMENT").unwrap_or_default();
    if !from_env.trim().is_empty() {
        return from_env.parse::<Environment>();
    }
    match config.base_url.as_deref() {
        Some(base_url) => base_url.parse::<Environment>(),
        None => Ok(Environment::default()),
    }
}

/// Backend address and credentials for the commands that talk to it.
fn session_options(
    args_url: Option<&str>,
    credentials: Credentials,
    config: Config,
    config_path: Option<PathBuf>,
    with_background: bool,
) -> Result<SessionOptions, Box<dyn Error>> {
    let environment = resolve_environment(args_url, &config).map_err(|e| {
        print_cmd_error!("Invalid backend address.", e.as_str());
        e
    })?;
    Ok(SessionOptions {
        environment,
        credentials,
        config,
        config_path,
        with_background,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config_path = get_config_path()?;
    let config = Config::load_or_default(&config_path);
    let credentials = Credentials::new(args.username, args.password);

    match args.command {
        Command::Start {
            headless,
            with_background,
        } => {
            let options = session_options(
                args.url.as_deref(),
                credentials,
                config,
                Some(config_path),
                with_background,
            )?;
            let session = setup_session(options, true)?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session).await
            }
        }
        Command::Snapshot => {
            let options = session_options(args.url.as_deref(), credentials, config, None, false)?;
            print_cmd_info!("Fetching overview", "{}", options.environment.base_url());
            run_snapshot(setup_session(options, false)?).await
        }
        Command::Theme { theme } => {
            let mut config = config;
            config.theme = theme.into();
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!("Theme saved", "{} ({})", config.theme, config_path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_flag_wins_over_config() {
        let config = Config {
            base_url: Some("http://config.example:8081".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_environment(Some("https://flag.example"), &config).map(|e| e.base_url()),
            Ok("https://flag.example".to_string())
        );
        assert!(resolve_environment(Some("ftp://nope"), &config).is_err());
    }
}
