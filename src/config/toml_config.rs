use crate::config::{
    DEFAULT_CATEGORY_COUNT, DEFAULT_CLUES_PER_CATEGORY, DEFAULT_MAX_PAGE_FETCHES,
    DEFAULT_PAGE_SIZE, DEFAULT_POOL_MINIMUM, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::domain::model::ClueSelection;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BoardError, Result};
use crate::utils::validation::{validate_board_settings, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub game: GameConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub page_size: Option<usize>,
    pub pool_minimum: Option<usize>,
    pub max_page_fetches: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    pub categories: Option<usize>,
    pub clues_per_category: Option<usize>,
    pub clue_selection: Option<ClueSelection>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BoardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BoardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TRIVIA_API})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BoardError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn category_count(&self) -> usize {
        self.game.categories.unwrap_or(DEFAULT_CATEGORY_COUNT)
    }

    fn clues_per_category(&self) -> usize {
        self.game
            .clues_per_category
            .unwrap_or(DEFAULT_CLUES_PER_CATEGORY)
    }

    fn pool_minimum(&self) -> usize {
        self.source.pool_minimum.unwrap_or(DEFAULT_POOL_MINIMUM)
    }

    fn page_size(&self) -> usize {
        self.source.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    fn max_page_fetches(&self) -> usize {
        self.source
            .max_page_fetches
            .unwrap_or(DEFAULT_MAX_PAGE_FETCHES)
    }

    fn request_timeout_secs(&self) -> u64 {
        self.source
            .timeout_seconds
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    fn clue_selection(&self) -> ClueSelection {
        self.game.clue_selection.unwrap_or_default()
    }

    fn seed(&self) -> Option<u64> {
        self.game.seed
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_board_settings(self)
    }
}
