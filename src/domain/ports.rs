use crate::domain::model::{CategoryDetail, CategoryRef, ClueSelection};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote supplier of categories and clues.
#[async_trait]
pub trait TriviaSource: Send + Sync {
    /// One page of the category listing, starting at `offset`.
    async fn fetch_category_page(&self, count: usize, offset: usize) -> Result<Vec<CategoryRef>>;

    async fn fetch_category_detail(&self, id: u64) -> Result<CategoryDetail>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn category_count(&self) -> usize;
    fn clues_per_category(&self) -> usize;
    /// Distinct category ids to collect before sampling.
    fn pool_minimum(&self) -> usize;
    fn page_size(&self) -> usize;
    fn max_page_fetches(&self) -> usize;
    fn request_timeout_secs(&self) -> u64;
    fn clue_selection(&self) -> ClueSelection;
    fn seed(&self) -> Option<u64>;
}
