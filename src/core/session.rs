use crate::core::loader::BoardLoader;
use crate::core::render::RenderPlan;
use crate::core::reveal;
use crate::domain::model::{Board, CellId, DisplayText};
use crate::domain::ports::{ConfigProvider, TriviaSource};
use crate::utils::error::{BoardError, Result};

/// Identifies one board load. Only the most recently issued ticket may install a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Installed,
    /// A newer load was started; the result was dropped.
    Stale,
}

/// One player's game: the current board plus the start/restart lifecycle.
#[derive(Debug, Default)]
pub struct GameSession {
    board: Option<Board>,
    generation: u64,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 開始新的一局：立即丟棄舊棋盤，並讓之前所有未完成的載入失效
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.board = None;
        tracing::debug!("Begin board load #{}", self.generation);
        LoadTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Installs `result` if `ticket` is still current. Errors from a current
    /// load are returned; errors from a stale load are ignored.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Board>,
    ) -> Result<LoadOutcome> {
        if !self.is_current(ticket) {
            tracing::debug!(
                "Dropping result of stale load #{} (current #{})",
                ticket.generation,
                self.generation
            );
            return Ok(LoadOutcome::Stale);
        }

        self.board = Some(result?);
        Ok(LoadOutcome::Installed)
    }

    pub async fn restart<S, C>(&mut self, loader: &BoardLoader<S, C>) -> Result<&Board>
    where
        S: TriviaSource,
        C: ConfigProvider,
    {
        let ticket = self.begin_load();
        let result = loader.load_board().await;
        self.complete_load(ticket, result)?;

        self.board
            .as_ref()
            .ok_or_else(|| BoardError::data_unavailable("board was not installed"))
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.board.is_some()
    }

    /// Routes a click to the clue at `cell`. `None` if no board is loaded or the
    /// cell is outside the grid.
    pub fn click(&mut self, cell: CellId) -> Option<DisplayText> {
        let clue = self.board.as_mut()?.clue_mut(cell)?;
        let text = reveal::reveal(clue);
        tracing::debug!("Clicked cell {} -> {:?}", cell, clue.state());
        Some(text)
    }

    pub fn render(&self) -> Option<RenderPlan> {
        self.board.as_ref().map(RenderPlan::from_board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Category, Clue, RevealState};

    fn board(tag: &str) -> Board {
        let categories = (0..2)
            .map(|c| {
                let clues = (0..3)
                    .map(|r| {
                        Clue::new(
                            &format!("{} q{}{}", tag, r, c),
                            &format!("{} a{}{}", tag, r, c),
                        )
                    })
                    .collect();
                Category::new(c as u64, format!("{} cat {}", tag, c), clues)
            })
            .collect();
        Board::new(categories).unwrap()
    }

    #[test]
    fn test_click_before_load_is_ignored() {
        let mut session = GameSession::new();
        assert!(session.click(CellId::new(0, 0)).is_none());
        assert!(session.render().is_none());
    }

    #[test]
    fn test_click_routes_by_row_and_column() {
        let mut session = GameSession::new();
        let ticket = session.begin_load();
        session.complete_load(ticket, Ok(board("x"))).unwrap();

        let cell = CellId::new(2, 1);
        assert_eq!(session.click(cell).unwrap().as_str(), "x q21");
        assert_eq!(session.click(cell).unwrap().as_str(), "x a21");
        assert_eq!(session.click(cell).unwrap().as_str(), "x a21");

        let board = session.board().unwrap();
        assert_eq!(board.clue(cell).unwrap().state(), RevealState::Answer);
        assert_eq!(
            board.clue(CellId::new(0, 0)).unwrap().state(),
            RevealState::Hidden
        );
        assert!(session.click(CellId::new(3, 0)).is_none());
    }

    #[test]
    fn test_stale_load_does_not_overwrite_newer_board() {
        let mut session = GameSession::new();
        let old = session.begin_load();
        let new = session.begin_load();

        assert_eq!(
            session.complete_load(new, Ok(board("new"))).unwrap(),
            LoadOutcome::Installed
        );
        assert_eq!(
            session.complete_load(old, Ok(board("old"))).unwrap(),
            LoadOutcome::Stale
        );
        assert_eq!(session.board().unwrap().categories()[0].title, "new cat 0");
    }

    #[test]
    fn test_failed_load_leaves_no_board() {
        let mut session = GameSession::new();
        let ticket = session.begin_load();
        session.complete_load(ticket, Ok(board("first"))).unwrap();

        let ticket = session.begin_load();
        let err = session
            .complete_load(ticket, Err(BoardError::data_unavailable("offline")))
            .unwrap_err();
        assert!(err.is_data_unavailable());
        assert!(!session.is_loaded());
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut session = GameSession::new();
        let old = session.begin_load();
        let new = session.begin_load();
        session.complete_load(new, Ok(board("ok"))).unwrap();

        let outcome = session
            .complete_load(old, Err(BoardError::data_unavailable("late failure")))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Stale);
        assert!(session.is_loaded());
    }
}
