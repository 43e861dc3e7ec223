use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrelloError {
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API returned {status} for {endpoint}: {body}")]
    ApiStatusError {
        status: u16,
        endpoint: String,
        body: String,
    },

    #[error("Unexpected API response: {message}")]
    UnexpectedResponse { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl TrelloError {
    /// 配置錯誤回傳 2，執行期錯誤回傳 1
    pub fn exit_code(&self) -> i32 {
        match self {
            TrelloError::ConfigValidationError { .. }
            | TrelloError::InvalidConfigValueError { .. }
            | TrelloError::MissingConfigError { .. }
            | TrelloError::IoError(_) => 2,
            TrelloError::HttpError(_)
            | TrelloError::ApiStatusError { .. }
            | TrelloError::UnexpectedResponse { .. } => 1,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            TrelloError::HttpError(_) => {
                "Check network connectivity and that the Trello API is reachable".to_string()
            }
            TrelloError::ApiStatusError { status, .. } => match status {
                401 | 403 => {
                    "Verify TRELLO_API_KEY and TRELLO_API_TOKEN are valid and not expired"
                        .to_string()
                }
                404 => "Verify TRELLO_BOARD_ID refers to an existing board".to_string(),
                _ => "Inspect the response body and the Trello API status page".to_string(),
            },
            TrelloError::UnexpectedResponse { .. } => {
                "The Trello API returned a payload this tool does not understand".to_string()
            }
            TrelloError::IoError(_) => {
                "Check that the cards configuration file exists and is readable".to_string()
            }
            TrelloError::ConfigValidationError { field, .. }
            | TrelloError::InvalidConfigValueError { field, .. }
            | TrelloError::MissingConfigError { field } => {
                format!("Fix the '{}' setting and run again", field)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TrelloError>;
