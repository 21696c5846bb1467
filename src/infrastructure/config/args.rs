use super::app_config::{LogLevel, TokenStoreKind};
use crate::domain::route::Route;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "userdesk",
    version,
    about = "A terminal client for a user-management API",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the API.
    #[arg(long, env = "USERDESK_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Session token to use when none is stored.
    #[arg(long, env = "USERDESK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Where the session token is persisted.
    #[arg(long, value_enum)]
    pub token_store: Option<TokenStoreKind>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Route to open at startup, e.g. `/users/edit/3`.
    #[arg(long, default_value = "/")]
    pub route: Route,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserId;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["userdesk"]).unwrap();

        assert_eq!(args.route, Route::Home);
        assert!(args.token_store.is_none());
    }

    #[test]
    fn test_route_and_store() {
        let args = CliArgs::try_parse_from([
            "userdesk",
            "--route",
            "/users/edit/3",
            "--token-store",
            "keyring",
            "--timeout",
            "5",
        ])
        .unwrap();

        assert_eq!(args.route, Route::UserEdit(UserId(3)));
        assert_eq!(args.token_store, Some(TokenStoreKind::Keyring));
        assert_eq!(args.timeout, Some(5));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(CliArgs::try_parse_from(["userdesk", "--timeout", "0"]).is_err());
    }

    #[test]
    fn test_unknown_route_rejected() {
        assert!(CliArgs::try_parse_from(["userdesk", "--route", "/nowhere"]).is_err());
    }
}
