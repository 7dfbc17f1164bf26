use crate::core::render::RenderPlan;
use crate::domain::model::RevealState;

pub const DEFAULT_CELL_WIDTH: usize = 18;

fn fit(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let len = flat.chars().count();

    if len <= width {
        format!("{}{}", flat, " ".repeat(width - len))
    } else {
        let mut cut: String = flat.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn marker(state: RevealState) -> char {
    match state {
        RevealState::Hidden => ' ',
        RevealState::Question => 'Q',
        RevealState::Answer => 'A',
    }
}

/// Renders the board as a fixed-width text table. Columns and rows are
/// labelled 1-based, matching what the interactive loop accepts.
pub fn render_table(plan: &RenderPlan, cell_width: usize) -> String {
    let mut out = String::new();
    let separator = format!(
        "+----+{}+\n",
        vec!["-".repeat(cell_width + 3); plan.headers.len()].join("+")
    );

    out.push_str(&separator);
    out.push_str("|    |");
    for (column, title) in plan.headers.iter().enumerate() {
        let label = format!("{}. {}", column + 1, title);
        out.push_str(&format!(" {}  |", fit(&label, cell_width)));
    }
    out.push('\n');
    out.push_str(&separator);

    for (row, cells) in plan.rows.iter().enumerate() {
        out.push_str(&format!("| {:>2} |", row + 1));
        for cell in cells {
            out.push_str(&format!(
                " {} {}|",
                fit(cell.display.as_str(), cell_width),
                marker(cell.state)
            ));
        }
        out.push('\n');
    }
    out.push_str(&separator);

    out
}
