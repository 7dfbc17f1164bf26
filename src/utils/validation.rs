use crate::utils::error::{BoardError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BoardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BoardError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BoardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(BoardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BoardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 棋盤相關設定的共用檢查，CLI 與 TOML 配置都會呼叫
pub fn validate_board_settings<C: crate::domain::ports::ConfigProvider + ?Sized>(
    config: &C,
) -> Result<()> {
    validate_url("api_endpoint", config.api_endpoint())?;
    validate_positive_number("category_count", config.category_count(), 1)?;
    validate_positive_number("clues_per_category", config.clues_per_category(), 1)?;
    validate_range("page_size", config.page_size(), 1, 100)?;
    validate_positive_number("max_page_fetches", config.max_page_fetches(), 1)?;
    validate_positive_number("request_timeout_secs", config.request_timeout_secs() as usize, 1)?;

    if config.pool_minimum() < config.category_count() {
        return Err(BoardError::InvalidConfigValueError {
            field: "pool_minimum".to_string(),
            value: config.pool_minimum().to_string(),
            reason: format!(
                "Pool minimum must be at least the category count ({})",
                config.category_count()
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api_endpoint", "https://jservice.io").is_ok());
        assert!(validate_url("api_endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("api_endpoint", "").is_err());
        assert!(validate_url("api_endpoint", "invalid-url").is_err());
        assert!(validate_url("api_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("category_count", 6, 1).is_ok());
        assert!(validate_positive_number("category_count", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("page_size", 100, 1, 100).is_ok());
        assert!(validate_range("page_size", 101, 1, 100).is_err());
        assert!(validate_range("page_size", 0, 1, 100).is_err());
    }
}
