use crate::domain::model::{Clue, DisplayText, RevealState};

/// What a clue in `state` shows.
pub fn display_for(clue: &Clue, state: RevealState) -> DisplayText {
    match state {
        RevealState::Hidden => DisplayText::placeholder(),
        RevealState::Question => DisplayText::new(clue.question()),
        RevealState::Answer => DisplayText::new(clue.answer()),
    }
}

/// Current visible text, without clicking.
pub fn current_display(clue: &Clue) -> DisplayText {
    display_for(clue, clue.state())
}

/// Handle one click on `clue`.
///
/// | current  | next     | shows    |
/// |----------|----------|----------|
/// | Hidden   | Question | question |
/// | Question | Answer   | answer   |
/// | Answer   | Answer   | answer   |
pub fn reveal(clue: &mut Clue) -> DisplayText {
    let current = clue.state();
    let next = current.advance();

    if next != current {
        tracing::debug!(from = ?current, to = ?next, "clue revealed");
        clue.set_state(next);
    }

    display_for(clue, next)
}
