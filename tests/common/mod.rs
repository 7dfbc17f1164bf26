#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use trivia_board::domain::model::{CategoryDetail, CategoryRef, ClueData};
use trivia_board::domain::ports::TriviaSource;
use trivia_board::{BoardError, CliConfig, Result};

/// In-memory trivia source: `total` categories with ids 1..=total, each
/// holding `clues_each` clues.
#[derive(Clone)]
pub struct FakeSource {
    pub total: usize,
    pub clues_each: usize,
    pub page_calls: Arc<AtomicUsize>,
    pub detail_calls: Arc<AtomicUsize>,
}

impl FakeSource {
    pub fn new(total: usize, clues_each: usize) -> Self {
        Self {
            total,
            clues_each,
            page_calls: Arc::new(AtomicUsize::new(0)),
            detail_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn pages(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn details(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

pub fn question(id: u64, rank: usize) -> String {
    format!("Question {} of category {}", rank + 1, id)
}

pub fn answer(id: u64, rank: usize) -> String {
    format!("Answer {} of category {}", rank + 1, id)
}

#[async_trait]
impl TriviaSource for FakeSource {
    async fn fetch_category_page(&self, count: usize, offset: usize) -> Result<Vec<CategoryRef>> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        let end = (offset + count).min(self.total);
        Ok((offset..end)
            .map(|i| CategoryRef {
                id: i as u64 + 1,
                title: format!("Category {}", i + 1),
            })
            .collect())
    }

    async fn fetch_category_detail(&self, id: u64) -> Result<CategoryDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if id == 0 || id as usize > self.total {
            return Err(BoardError::data_unavailable(format!("no category {}", id)));
        }
        Ok(CategoryDetail {
            id,
            title: format!("Category {}", id),
            clues: (0..self.clues_each)
                .map(|rank| ClueData {
                    question: question(id, rank),
                    answer: answer(id, rank),
                })
                .collect(),
        })
    }
}

pub fn config(api_endpoint: &str) -> CliConfig {
    CliConfig {
        api_endpoint: api_endpoint.to_string(),
        seed: Some(2024),
        ..CliConfig::default()
    }
}
