use crate::app::terminal::{render_table, DEFAULT_CELL_WIDTH};
use crate::core::loader::BoardLoader;
use crate::core::session::GameSession;
use crate::domain::model::CellId;
use crate::domain::ports::{ConfigProvider, TriviaSource};
use crate::utils::error::Result;
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const HELP: &str = "Commands: <row> <column> to click a cell (1-based), 'board' to redraw, 'restart' for a new game, 'quit' to exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Click(CellId),
    Restart,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    /// 接受 `2 3`、`2,3` 或 `2-3`，行列都從 1 開始
    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        let input = input.trim();
        match input.to_ascii_lowercase().as_str() {
            "restart" | "start" | "r" => return Ok(Self::Restart),
            "board" | "show" | "b" => return Ok(Self::Show),
            "help" | "h" | "?" => return Ok(Self::Help),
            "quit" | "exit" | "q" => return Ok(Self::Quit),
            _ => {}
        }

        let parts: Vec<&str> = input
            .split(|c: char| c.is_whitespace() || c == ',' || c == '-')
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() != 2 {
            return Err(format!("Unrecognised command '{}'", input));
        }

        let parse = |s: &str| -> std::result::Result<usize, String> {
            match s.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(n - 1),
                _ => Err(format!("'{}' is not a row/column number", s)),
            }
        };

        Ok(Self::Click(CellId::new(parse(parts[0])?, parse(parts[1])?)))
    }
}

/// Output options for the interactive loop.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    pub json: bool,
    pub cell_width: usize,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            json: false,
            cell_width: DEFAULT_CELL_WIDTH,
        }
    }
}

fn draw<W: Write>(session: &GameSession, out: &mut W, options: LoopOptions) -> Result<()> {
    match session.render() {
        Some(plan) if options.json => writeln!(out, "{}", serde_json::to_string(&plan)?)?,
        Some(plan) => write!(out, "{}", render_table(&plan, options.cell_width))?,
        None => writeln!(out, "No board loaded. Type 'restart' to try again.")?,
    }
    Ok(())
}

async fn start_game<S, C, W>(
    session: &mut GameSession,
    loader: &BoardLoader<S, C>,
    out: &mut W,
    options: LoopOptions,
) -> Result<()>
where
    S: TriviaSource,
    C: ConfigProvider,
    W: Write,
{
    writeln!(out, "Loading...")?;
    out.flush()?;

    if let Err(e) = session.restart(loader).await {
        tracing::error!(
            "❌ Board load failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        writeln!(out, "❌ {}", e.user_friendly_message())?;
        writeln!(out, "💡 {}", e.recovery_suggestion())?;
        return Ok(());
    }

    draw(session, out, options)?;
    writeln!(out, "Type 'restart' for a new game, 'help' for commands.")?;
    Ok(())
}

/// Starts a game and then processes commands from `input` until `quit` or EOF.
/// Returns the session so callers can inspect the final board.
pub async fn run<S, C, R, W>(
    loader: &BoardLoader<S, C>,
    input: R,
    out: &mut W,
    options: LoopOptions,
) -> Result<GameSession>
where
    S: TriviaSource,
    C: ConfigProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = GameSession::new();
    start_game(&mut session, loader, out, options).await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{}", message)?;
                writeln!(out, "{}", HELP)?;
                continue;
            }
        };

        match command {
            Command::Click(cell) => match session.click(cell) {
                Some(text) => {
                    writeln!(out, "[{} {}] {}", cell.row + 1, cell.column + 1, text)?;
                    draw(&session, out, options)?;
                }
                None if session.is_loaded() => {
                    writeln!(out, "No cell at row {}, column {}", cell.row + 1, cell.column + 1)?;
                }
                None => writeln!(out, "No board loaded. Type 'restart' to try again.")?,
            },
            Command::Restart => start_game(&mut session, loader, out, options).await?,
            Command::Show => draw(&session, out, options)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break,
        }
        out.flush()?;
    }

    Ok(session)
}
