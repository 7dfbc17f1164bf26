use crate::domain::model::{CategoryDetail, CategoryRef, ClueData};
use crate::domain::ports::{ConfigProvider, TriviaSource};
use crate::utils::error::{BoardError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct ApiCategory {
    id: u64,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCategoryDetail {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    clues: Vec<ApiClue>,
}

// jservice 的資料偶爾會有 null 的題目或答案
#[derive(Debug, Deserialize)]
struct ApiClue {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
}

/// [`TriviaSource`] backed by a jservice-compatible HTTP API:
/// `GET /api/categories?count=&offset=` and `GET /api/category?id=`.
#[derive(Debug, Clone)]
pub struct JServiceClient {
    client: Client,
    base_url: Url,
}

impl JServiceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| BoardError::ConfigError {
            message: format!("invalid API endpoint '{}': {}", base_url, e),
        })?;

        // 確保 join 時不會吃掉最後一段路徑
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;
        tracing::debug!("Trivia source at {} (timeout {:?})", base_url, timeout);

        Ok(Self { client, base_url })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.api_endpoint(),
            Duration::from_secs(config.request_timeout_secs()),
        )
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| BoardError::ConfigError {
            message: format!("cannot build URL for '{}': {}", path, e),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url.clone()).query(query).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(BoardError::data_unavailable(format!(
                "{} responded with status {}",
                url, status
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl TriviaSource for JServiceClient {
    async fn fetch_category_page(&self, count: usize, offset: usize) -> Result<Vec<CategoryRef>> {
        let url = self.endpoint("api/categories")?;
        let page: Vec<ApiCategory> = self
            .get_json(
                url,
                &[("count", count.to_string()), ("offset", offset.to_string())],
            )
            .await?;

        Ok(page
            .into_iter()
            .map(|c| CategoryRef {
                id: c.id,
                title: c.title.unwrap_or_default(),
            })
            .collect())
    }

    async fn fetch_category_detail(&self, id: u64) -> Result<CategoryDetail> {
        let url = self.endpoint("api/category")?;
        let detail: ApiCategoryDetail = self.get_json(url, &[("id", id.to_string())]).await?;

        Ok(CategoryDetail {
            id: detail.id,
            title: detail.title.unwrap_or_default(),
            clues: detail
                .clues
                .into_iter()
                .map(|clue| ClueData {
                    question: clue.question.unwrap_or_default(),
                    answer: clue.answer.unwrap_or_default(),
                })
                .collect(),
        })
    }
}
