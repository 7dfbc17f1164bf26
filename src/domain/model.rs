use crate::domain::text::EncodedText;
use crate::utils::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entry returned by the paged "list categories" endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: u64,
    pub title: String,
}

/// Raw question/answer pair as delivered by the trivia source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueData {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub id: u64,
    pub title: String,
    pub clues: Vec<ClueData>,
}

/// How a category's clues are narrowed down to the board's row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ClueSelection {
    /// Keep the first clues in source order.
    #[default]
    First,
    /// Sample clues at random, keeping their relative source order.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    #[default]
    Hidden,
    Question,
    Answer,
}

impl RevealState {
    /// One click. `Answer` is terminal.
    pub const fn advance(self) -> Self {
        match self {
            Self::Hidden => Self::Question,
            Self::Question | Self::Answer => Self::Answer,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Answer)
    }
}

/// Text a cell shows for its current reveal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DisplayText(String);

impl DisplayText {
    pub const PLACEHOLDER: &'static str = "?";

    pub fn placeholder() -> Self {
        Self(Self::PLACEHOLDER.to_string())
    }

    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clue {
    question: EncodedText,
    answer: EncodedText,
    state: RevealState,
}

impl Clue {
    pub fn new(question: &str, answer: &str) -> Self {
        Self {
            question: EncodedText::encode(question),
            answer: EncodedText::encode(answer),
            state: RevealState::Hidden,
        }
    }

    pub fn question(&self) -> String {
        self.question.decode()
    }

    pub fn answer(&self) -> String {
        self.answer.decode()
    }

    pub fn encoded_question(&self) -> &EncodedText {
        &self.question
    }

    pub fn encoded_answer(&self) -> &EncodedText {
        &self.answer
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: RevealState) {
        self.state = state;
    }
}

impl From<&ClueData> for Clue {
    fn from(data: &ClueData) -> Self {
        Self::new(&data.question, &data.answer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: u64,
    pub title: String,
    clues: Vec<Clue>,
}

impl Category {
    pub fn new(id: u64, title: impl Into<String>, clues: Vec<Clue>) -> Self {
        Self {
            id,
            title: title.into(),
            clues,
        }
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub(crate) fn clue_mut(&mut self, index: usize) -> Option<&mut Clue> {
        self.clues.get_mut(index)
    }
}

/// Grid coordinate of a cell: `row` is the clue rank inside a category,
/// `column` is the category position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId {
    pub row: usize,
    pub column: usize,
}

impl CellId {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    categories: Vec<Category>,
    clues_per_category: usize,
}

impl Board {
    /// 每個分類的線索數必須一致且不為零
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        let clues_per_category = match categories.first() {
            Some(first) => first.clues().len(),
            None => return Err(BoardError::data_unavailable("board has no categories")),
        };

        if clues_per_category == 0 {
            return Err(BoardError::data_unavailable("categories have no clues"));
        }

        if let Some(uneven) = categories
            .iter()
            .find(|c| c.clues().len() != clues_per_category)
        {
            return Err(BoardError::data_unavailable(format!(
                "category '{}' has {} clues, expected {}",
                uneven.title,
                uneven.clues().len(),
                clues_per_category
            )));
        }

        Ok(Self {
            categories,
            clues_per_category,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn clues_per_category(&self) -> usize {
        self.clues_per_category
    }

    pub fn clue(&self, cell: CellId) -> Option<&Clue> {
        self.categories
            .get(cell.column)
            .and_then(|category| category.clues().get(cell.row))
    }

    pub(crate) fn clue_mut(&mut self, cell: CellId) -> Option<&mut Clue> {
        self.categories
            .get_mut(cell.column)
            .and_then(|category| category.clue_mut(cell.row))
    }

    pub fn clues(&self) -> impl Iterator<Item = &Clue> {
        self.categories.iter().flat_map(|c| c.clues().iter())
    }
}
