pub mod toml_config;

use crate::domain::model::ClueSelection;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_board_settings, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_ENDPOINT: &str = "http://jservice.io";
pub const DEFAULT_CATEGORY_COUNT: usize = 6;
pub const DEFAULT_CLUES_PER_CATEGORY: usize = 5;
pub const DEFAULT_POOL_MINIMUM: usize = 500;
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_MAX_PAGE_FETCHES: usize = 50;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "trivia-board"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Play a trivia board built from a remote clue service")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_API_ENDPOINT))]
    pub api_endpoint: String,

    #[cfg_attr(feature = "cli", arg(long = "categories", default_value_t = DEFAULT_CATEGORY_COUNT))]
    pub category_count: usize,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_CLUES_PER_CATEGORY))]
    pub clues_per_category: usize,

    #[cfg_attr(
        feature = "cli",
        arg(long, default_value_t = DEFAULT_POOL_MINIMUM, help = "Distinct categories to collect before sampling")
    )]
    pub pool_minimum: usize,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_PAGE_SIZE))]
    pub page_size: usize,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_MAX_PAGE_FETCHES))]
    pub max_page_fetches: usize,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS))]
    pub request_timeout_secs: u64,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t = ClueSelection::First))]
    pub clue_selection: ClueSelection,

    #[cfg_attr(feature = "cli", arg(long, help = "Seed for reproducible boards"))]
    pub seed: Option<u64>,

    #[cfg_attr(feature = "cli", arg(long, help = "Print the board as JSON render instructions"))]
    pub json: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON"))]
    pub log_json: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            category_count: DEFAULT_CATEGORY_COUNT,
            clues_per_category: DEFAULT_CLUES_PER_CATEGORY,
            pool_minimum: DEFAULT_POOL_MINIMUM,
            page_size: DEFAULT_PAGE_SIZE,
            max_page_fetches: DEFAULT_MAX_PAGE_FETCHES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            clue_selection: ClueSelection::First,
            seed: None,
            json: false,
            log_json: false,
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn category_count(&self) -> usize {
        self.category_count
    }

    fn clues_per_category(&self) -> usize {
        self.clues_per_category
    }

    fn pool_minimum(&self) -> usize {
        self.pool_minimum
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn max_page_fetches(&self) -> usize {
        self.max_page_fetches
    }

    fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }

    fn clue_selection(&self) -> ClueSelection {
        self.clue_selection
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_board_settings(self)
    }
}
