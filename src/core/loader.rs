use crate::domain::model::{Board, Category, CategoryDetail, CategoryRef, Clue, ClueSelection};
use crate::domain::ports::{ConfigProvider, TriviaSource};
use crate::utils::error::{BoardError, Result};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Distinct category ids collected for one `load_board` call.
#[derive(Debug, Default, Clone)]
pub struct CategoryPool {
    ids: Vec<u64>,
    seen: HashSet<u64>,
    next_offset: usize,
    pages_fetched: usize,
    exhausted: bool,
}

impl CategoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// 持續抓取分頁直到池子達到 `minimum`、來源耗盡或達到分頁上限
    pub async fn grow<S: TriviaSource + ?Sized>(
        source: &S,
        minimum: usize,
        page_size: usize,
        max_page_fetches: usize,
    ) -> Result<Self> {
        let mut pool = Self::new();

        while pool.len() < minimum && !pool.exhausted {
            if pool.pages_fetched >= max_page_fetches {
                tracing::warn!(
                    "Stopped growing category pool after {} pages ({} of {} ids)",
                    pool.pages_fetched,
                    pool.len(),
                    minimum
                );
                break;
            }

            tracing::debug!(
                "Fetching category page: count={}, offset={}",
                page_size,
                pool.next_offset
            );
            let page = source
                .fetch_category_page(page_size, pool.next_offset)
                .await?;
            let added = pool.absorb(page);
            tracing::debug!("Category pool now holds {} ids (+{})", pool.len(), added);
        }

        Ok(pool)
    }

    /// Adds one fetched page; returns how many ids were new.
    pub fn absorb(&mut self, page: Vec<CategoryRef>) -> usize {
        self.pages_fetched += 1;
        self.next_offset += page.len();

        let mut added = 0;
        for category in page {
            if self.seen.insert(category.id) {
                self.ids.push(category.id);
                added += 1;
            }
        }

        // 空頁或全是重複的 id 都代表來源已經給不出新東西
        if added == 0 {
            self.exhausted = true;
        }
        added
    }

    /// Uniformly samples `amount` distinct ids.
    pub fn sample<R: Rng + ?Sized>(&self, amount: usize, rng: &mut R) -> Result<Vec<u64>> {
        if amount > self.ids.len() {
            return Err(BoardError::data_unavailable(format!(
                "needed {} distinct categories but the source only offered {}",
                amount,
                self.ids.len()
            )));
        }

        Ok(index::sample(rng, self.ids.len(), amount)
            .into_iter()
            .map(|i| self.ids[i])
            .collect())
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Narrows a category's clues down to exactly `count`, dropping malformed ones first.
pub fn select_clues<R: Rng + ?Sized>(
    detail: &CategoryDetail,
    count: usize,
    selection: ClueSelection,
    rng: &mut R,
) -> Result<Vec<Clue>> {
    let usable: Vec<Clue> = detail
        .clues
        .iter()
        .map(Clue::from)
        .filter(|clue| !clue.encoded_question().is_blank() && !clue.encoded_answer().is_blank())
        .collect();

    if usable.len() < count {
        return Err(BoardError::data_unavailable(format!(
            "category '{}' ({}) has {} usable clues, {} required",
            detail.title,
            detail.id,
            usable.len(),
            count
        )));
    }

    let clues = match selection {
        ClueSelection::First => usable.into_iter().take(count).collect(),
        ClueSelection::Random => {
            let mut picked = index::sample(rng, usable.len(), count).into_vec();
            picked.sort_unstable();
            picked.into_iter().map(|i| usable[i].clone()).collect()
        }
    };

    Ok(clues)
}

/// Builds boards from a [`TriviaSource`].
pub struct BoardLoader<S: TriviaSource, C: ConfigProvider> {
    source: S,
    config: C,
    rng: Mutex<StdRng>,
}

impl<S: TriviaSource, C: ConfigProvider> BoardLoader<S, C> {
    pub fn new(source: S, config: C) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            source,
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Loads a board using the configured dimensions.
    pub async fn load_board(&self) -> Result<Board> {
        self.load_board_with(
            self.config.category_count(),
            self.config.clues_per_category(),
        )
        .await
    }

    /// All-or-nothing: any failure discards everything fetched so far.
    pub async fn load_board_with(
        &self,
        category_count: usize,
        clues_per_category: usize,
    ) -> Result<Board> {
        tracing::info!(
            "Loading board: {} categories x {} clues",
            category_count,
            clues_per_category
        );

        self.build(category_count, clues_per_category)
            .await
            .map_err(BoardError::into_data_unavailable)
    }

    async fn build(&self, category_count: usize, clues_per_category: usize) -> Result<Board> {
        let minimum = self.config.pool_minimum().max(category_count);
        let pool = CategoryPool::grow(
            &self.source,
            minimum,
            self.config.page_size(),
            self.config.max_page_fetches(),
        )
        .await?;

        tracing::debug!(
            "Category pool ready: {} ids from {} pages",
            pool.len(),
            pool.pages_fetched()
        );

        let chosen = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            pool.sample(category_count, &mut *rng)?
        };

        let mut categories = Vec::with_capacity(chosen.len());
        for id in chosen {
            let detail = self.source.fetch_category_detail(id).await?;
            let clues = {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                select_clues(
                    &detail,
                    clues_per_category,
                    self.config.clue_selection(),
                    &mut *rng,
                )?
            };
            tracing::debug!("Loaded category '{}' ({})", detail.title, detail.id);
            categories.push(Category::new(detail.id, detail.title, clues));
        }

        let board = Board::new(categories)?;
        tracing::info!("Board ready with {} categories", board.category_count());
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ClueData, RevealState};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// 以記憶體資料模擬遠端來源
    #[derive(Clone)]
    struct MockSource {
        total_categories: usize,
        clues_each: usize,
        fail_detail_after: Option<usize>,
        page_calls: Arc<AtomicUsize>,
        detail_calls: Arc<AtomicUsize>,
    }

    impl MockSource {
        fn new(total_categories: usize, clues_each: usize) -> Self {
            Self {
                total_categories,
                clues_each,
                fail_detail_after: None,
                page_calls: Arc::new(AtomicUsize::new(0)),
                detail_calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl TriviaSource for MockSource {
        async fn fetch_category_page(
            &self,
            count: usize,
            offset: usize,
        ) -> Result<Vec<CategoryRef>> {
            self.page_calls.fetch_add(1, Ordering::SeqCst);
            let end = (offset + count).min(self.total_categories);
            Ok((offset..end)
                .map(|i| CategoryRef {
                    id: i as u64 + 1,
                    title: format!("category {}", i + 1),
                })
                .collect())
        }

        async fn fetch_category_detail(&self, id: u64) -> Result<CategoryDetail> {
            let done = self.detail_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_detail_after == Some(done) {
                return Err(BoardError::data_unavailable("connection reset"));
            }
            Ok(CategoryDetail {
                id,
                title: format!("category {}", id),
                clues: (0..self.clues_each)
                    .map(|i| ClueData {
                        question: format!("question {}-{}", id, i),
                        answer: format!("answer {}-{}", id, i),
                    })
                    .collect(),
            })
        }
    }

    struct TestConfig {
        pool_minimum: usize,
        page_size: usize,
        selection: ClueSelection,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                pool_minimum: 500,
                page_size: 100,
                selection: ClueSelection::First,
            }
        }
    }

    impl ConfigProvider for TestConfig {
        fn api_endpoint(&self) -> &str {
            "http://localhost"
        }
        fn category_count(&self) -> usize {
            6
        }
        fn clues_per_category(&self) -> usize {
            5
        }
        fn pool_minimum(&self) -> usize {
            self.pool_minimum
        }
        fn page_size(&self) -> usize {
            self.page_size
        }
        fn max_page_fetches(&self) -> usize {
            50
        }
        fn request_timeout_secs(&self) -> u64 {
            10
        }
        fn clue_selection(&self) -> ClueSelection {
            self.selection
        }
        fn seed(&self) -> Option<u64> {
            Some(42)
        }
    }

    #[tokio::test]
    async fn test_load_board_shape() {
        let loader = BoardLoader::new(MockSource::new(1000, 8), TestConfig::default());
        let board = loader.load_board_with(6, 5).await.unwrap();

        assert_eq!(board.category_count(), 6);
        for category in board.categories() {
            assert_eq!(category.clues().len(), 5);
        }
        assert!(board.clues().all(|c| c.state() == RevealState::Hidden));
    }

    #[tokio::test]
    async fn test_pool_growth_fetches_five_pages() {
        let source = MockSource::new(10_000, 5);
        let page_calls = source.page_calls.clone();
        let loader = BoardLoader::new(source, TestConfig::default());

        loader.load_board().await.unwrap();
        assert_eq!(page_calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_sampled_categories_are_distinct() {
        let loader = BoardLoader::new(MockSource::new(500, 5), TestConfig::default());
        for _ in 0..20 {
            let board = loader.load_board().await.unwrap();
            let ids: HashSet<u64> = board.categories().iter().map(|c| c.id).collect();
            assert_eq!(ids.len(), 6);
        }
    }

    #[tokio::test]
    async fn test_failed_detail_fetch_returns_no_board() {
        let mut source = MockSource::new(600, 5);
        source.fail_detail_after = Some(3);
        let detail_calls = source.detail_calls.clone();
        let loader = BoardLoader::new(source, TestConfig::default());

        let err = loader.load_board().await.unwrap_err();
        assert!(err.is_data_unavailable());
        assert_eq!(detail_calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_too_few_categories() {
        let config = TestConfig {
            pool_minimum: 10,
            ..TestConfig::default()
        };
        let loader = BoardLoader::new(MockSource::new(4, 5), config);

        let err = loader.load_board().await.unwrap_err();
        assert!(err.is_data_unavailable());
    }

    #[tokio::test]
    async fn test_small_source_still_usable_below_pool_minimum() {
        // 來源只有 40 個分類，低於 pool minimum，但仍足夠抽 6 個
        let source = MockSource::new(40, 5);
        let page_calls = source.page_calls.clone();
        let loader = BoardLoader::new(source, TestConfig::default());

        let board = loader.load_board().await.unwrap();
        assert_eq!(board.category_count(), 6);
        // 第一頁 40 筆，第二頁為空
        assert_eq!(page_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_category_with_too_few_clues() {
        let loader = BoardLoader::new(MockSource::new(600, 3), TestConfig::default());
        let err = loader.load_board().await.unwrap_err();
        assert!(err.is_data_unavailable());
    }

    #[test]
    fn test_absorb_ignores_duplicates() {
        let mut pool = CategoryPool::new();
        let page = |ids: &[u64]| {
            ids.iter()
                .map(|&id| CategoryRef {
                    id,
                    title: String::new(),
                })
                .collect::<Vec<_>>()
        };

        assert_eq!(pool.absorb(page(&[1, 2, 3])), 3);
        assert_eq!(pool.absorb(page(&[3, 4])), 1);
        assert_eq!(pool.ids(), &[1, 2, 3, 4]);
        assert!(!pool.is_exhausted());

        assert_eq!(pool.absorb(page(&[1, 2])), 0);
        assert!(pool.is_exhausted());
        assert_eq!(pool.pages_fetched(), 3);
    }

    #[test]
    fn test_select_clues_drops_blank_and_keeps_order() {
        let detail = CategoryDetail {
            id: 7,
            title: "Literature".to_string(),
            clues: vec![
                ClueData {
                    question: "Hamlet Author".to_string(),
                    answer: "Shakespeare".to_string(),
                },
                ClueData {
                    question: "".to_string(),
                    answer: "nobody".to_string(),
                },
                ClueData {
                    question: "Bell Jar Author".to_string(),
                    answer: "Plath".to_string(),
                },
                ClueData {
                    question: "Beloved Author".to_string(),
                    answer: "Morrison".to_string(),
                },
            ],
        };
        let mut rng = StdRng::seed_from_u64(1);

        let first = select_clues(&detail, 2, ClueSelection::First, &mut rng).unwrap();
        assert_eq!(first[0].question(), "Hamlet Author");
        assert_eq!(first[1].question(), "Bell Jar Author");

        let random = select_clues(&detail, 3, ClueSelection::Random, &mut rng).unwrap();
        let questions: Vec<String> = random.iter().map(|c| c.question()).collect();
        assert_eq!(
            questions,
            vec!["Hamlet Author", "Bell Jar Author", "Beloved Author"]
        );

        assert!(select_clues(&detail, 4, ClueSelection::First, &mut rng).is_err());
    }
}
