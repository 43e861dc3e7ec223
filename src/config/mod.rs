pub mod cards;

use crate::domain::model::{ListPosition, StartDay};
use crate::utils::error::{Result, TrelloError};
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";
pub const DEFAULT_CARDS_PATH: &str = "config/cards.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "trello-weekly")]
#[command(about = "Create a weekly Trello list with predefined cards")]
pub struct CliConfig {
    #[arg(long, help = "Preview what would be created without making API calls")]
    pub dry_run: bool,

    #[arg(
        long,
        value_enum,
        default_value = "top",
        help = "Position for the new list"
    )]
    pub position: ListPosition,

    #[arg(
        long,
        value_name = "N",
        help = "Week number to create (1-53). Defaults to the current week"
    )]
    pub week: Option<u32>,

    #[arg(
        long,
        value_enum,
        help = "First day of the week. Defaults to WEEK_START_DAY, then monday"
    )]
    pub start_day: Option<StartDay>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Cards file. Defaults to TRELLO_CARDS_PATH, then config/cards.toml"
    )]
    pub cards: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// CLI 優先，其次 WEEK_START_DAY 環境變數，最後預設週一
    pub fn resolve_start_day(&self) -> Result<StartDay> {
        if let Some(day) = self.start_day {
            return Ok(day);
        }

        match std::env::var("WEEK_START_DAY") {
            Ok(raw) => match raw.to_lowercase().as_str() {
                "monday" => Ok(StartDay::Monday),
                "saturday" => Ok(StartDay::Saturday),
                "sunday" => Ok(StartDay::Sunday),
                _ => Err(TrelloError::InvalidConfigValueError {
                    field: "WEEK_START_DAY".to_string(),
                    value: raw,
                    reason: "Must be one of: monday, saturday, sunday".to_string(),
                }),
            },
            Err(_) => Ok(StartDay::Monday),
        }
    }

    pub fn cards_path(&self) -> String {
        self.cards
            .clone()
            .or_else(|| std::env::var("TRELLO_CARDS_PATH").ok())
            .unwrap_or_else(|| DEFAULT_CARDS_PATH.to_string())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(week) = self.week {
            validate_range("week", week, 1, 53)?;
        }
        validate_path("cards", &self.cards_path())?;
        Ok(())
    }
}

/// Trello API credentials, sourced from the environment.
#[derive(Debug, Clone)]
pub struct TrelloCredentials {
    pub api_key: String,
    pub api_token: String,
    pub board_id: String,
    pub base_url: String,
}

impl TrelloCredentials {
    pub fn from_env() -> Result<Self> {
        let api_key = require_env("TRELLO_API_KEY")?;
        let api_token = require_env("TRELLO_API_TOKEN")?;
        let board_id = require_env("TRELLO_BOARD_ID")?;
        let base_url =
            std::env::var("TRELLO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        validate_url("TRELLO_BASE_URL", &base_url)?;

        Ok(Self {
            api_key,
            api_token,
            board_id,
            base_url,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| TrelloError::MissingConfigError {
            field: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let config = CliConfig::try_parse_from(["trello-weekly"]).unwrap();
        assert!(!config.dry_run);
        assert_eq!(config.position, ListPosition::Top);
        assert_eq!(config.week, None);
        assert_eq!(config.cards_path(), DEFAULT_CARDS_PATH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_flags() {
        let config = CliConfig::try_parse_from([
            "trello-weekly",
            "--dry-run",
            "--position",
            "bottom",
            "--week",
            "10",
            "--start-day",
            "sunday",
        ])
        .unwrap();
        assert!(config.dry_run);
        assert_eq!(config.position, ListPosition::Bottom);
        assert_eq!(config.week, Some(10));
        assert_eq!(config.resolve_start_day().unwrap(), StartDay::Sunday);
    }

    #[test]
    fn test_invalid_position_rejected() {
        assert!(CliConfig::try_parse_from(["trello-weekly", "--position", "middle"]).is_err());
    }

    #[test]
    fn test_week_out_of_range_rejected() {
        let zero = CliConfig::try_parse_from(["trello-weekly", "--week", "0"]).unwrap();
        assert!(zero.validate().is_err());

        let high = CliConfig::try_parse_from(["trello-weekly", "--week", "54"]).unwrap();
        assert!(high.validate().is_err());

        let ok = CliConfig::try_parse_from(["trello-weekly", "--week", "53"]).unwrap();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_start_day_resolution() {
        let config = CliConfig::try_parse_from(["trello-weekly"]).unwrap();
        assert_eq!(config.resolve_start_day().unwrap(), StartDay::Monday);

        std::env::set_var("WEEK_START_DAY", "saturday");
        assert_eq!(config.resolve_start_day().unwrap(), StartDay::Saturday);

        // CLI 參數優先於環境變數
        let explicit =
            CliConfig::try_parse_from(["trello-weekly", "--start-day", "monday"]).unwrap();
        assert_eq!(explicit.resolve_start_day().unwrap(), StartDay::Monday);

        std::env::set_var("WEEK_START_DAY", "wednesday");
        assert!(config.resolve_start_day().is_err());

        std::env::remove_var("WEEK_START_DAY");
    }

    #[test]
    fn test_credentials_from_env() {
        std::env::set_var("TRELLO_API_KEY", "test-key");
        std::env::set_var("TRELLO_API_TOKEN", "test-token");
        std::env::set_var("TRELLO_BOARD_ID", "board123");

        let credentials = TrelloCredentials::from_env().unwrap();
        assert_eq!(credentials.api_key, "test-key");
        assert_eq!(credentials.api_token, "test-token");
        assert_eq!(credentials.board_id, "board123");
        assert_eq!(credentials.base_url, DEFAULT_BASE_URL);

        std::env::remove_var("TRELLO_BOARD_ID");
        let err = TrelloCredentials::from_env().unwrap_err();
        assert!(err.to_string().contains("TRELLO_BOARD_ID"));

        std::env::remove_var("TRELLO_API_KEY");
        std::env::remove_var("TRELLO_API_TOKEN");
    }
}
