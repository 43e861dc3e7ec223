use crate::domain::model::DayOfWeek;
use crate::utils::error::{Result, TrelloError};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardsConfig {
    #[serde(default)]
    pub cards: Vec<CardTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTemplate {
    pub title: String,
    pub day_of_week: DayOfWeek,
    pub hour: u8,
    #[serde(default)]
    pub minute: u8,
    #[serde(default)]
    pub labels: Vec<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub checklists: Vec<ChecklistTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistTemplate {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl CardsConfig {
    /// 從 TOML 檔案載入卡片範本
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TrelloError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析卡片範本
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TrelloError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TEAM_LABEL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證卡片範本的合理性
    pub fn validate_config(&self) -> Result<()> {
        for card in &self.cards {
            validate_non_empty_string("cards.title", &card.title)?;
            validate_range("cards.hour", card.hour, 0, 23)?;
            validate_range("cards.minute", card.minute, 0, 59)?;

            for label in &card.labels {
                validate_non_empty_string("cards.labels", label)?;
            }

            for checklist in &card.checklists {
                validate_non_empty_string("cards.checklists.name", &checklist.name)?;
            }
        }

        Ok(())
    }
}

impl Validate for CardsConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
