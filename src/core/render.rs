use crate::core::reveal;
use crate::domain::model::{Board, CellId, DisplayText, RevealState};
use serde::Serialize;

/// Render instructions for the presentation layer: a header row of category
/// titles and one row of cells per clue rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPlan {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellView>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub cell: CellId,
    pub category_title: String,
    pub question: String,
    pub answer: String,
    pub state: RevealState,
    pub display: DisplayText,
}

impl RenderPlan {
    pub fn from_board(board: &Board) -> Self {
        let headers = board
            .categories()
            .iter()
            .map(|category| category.title.clone())
            .collect();

        let rows = (0..board.clues_per_category())
            .map(|row| {
                board
                    .categories()
                    .iter()
                    .enumerate()
                    .map(|(column, category)| {
                        let clue = &category.clues()[row];
                        CellView {
                            cell: CellId::new(row, column),
                            category_title: category.title.clone(),
                            question: clue.question(),
                            answer: clue.answer(),
                            state: clue.state(),
                            display: reveal::current_display(clue),
                        }
                    })
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    pub fn cell(&self, cell: CellId) -> Option<&CellView> {
        self.rows.get(cell.row).and_then(|row| row.get(cell.column))
    }
}
