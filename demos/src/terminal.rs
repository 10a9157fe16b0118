//! Crossterm driver for the [`Visualizer`].
//!
//! Each grid cell is drawn two columns wide so cells look roughly square.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use pathviz_core::Coord;

use crate::config::VisualizerConfig;
use crate::visualizer::{Action, CellView, Visualizer};

const ORIGIN_X: u16 = 1;
const ORIGIN_Y: u16 = 2;
const CELL_WIDTH: u16 = 2;
const IDLE_POLL: Duration = Duration::from_millis(250);

const HELP: &str =
    "arrows/hjkl move  space select  o wall  r random  a algorithm  +/- speed  c reset  q quit";

fn cell_color(view: CellView) -> Color {
    match view {
        CellView::Empty => Color::Rgb { r: 255, g: 255, b: 255 },
        CellView::Obstacle => Color::Rgb { r: 0, g: 0, b: 0 },
        CellView::Start => Color::Rgb { r: 0, g: 255, b: 0 },
        CellView::End => Color::Rgb { r: 255, g: 0, b: 0 },
        CellView::Path => Color::Rgb { r: 0, g: 0, b: 255 },
        CellView::Explored => Color::Rgb { r: 255, g: 255, b: 0 },
    }
}

/// Map a key press to an action.
pub fn key_action(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Up | KeyCode::Char('k') => Action::MoveCursor { drow: -1, dcol: 0 },
        KeyCode::Down | KeyCode::Char('j') => Action::MoveCursor { drow: 1, dcol: 0 },
        KeyCode::Left | KeyCode::Char('h') => Action::MoveCursor { drow: 0, dcol: -1 },
        KeyCode::Right | KeyCode::Char('l') => Action::MoveCursor { drow: 0, dcol: 1 },
        KeyCode::Enter | KeyCode::Char(' ') => Action::SelectCursor,
        KeyCode::Char('o') => Action::ToggleObstacle,
        KeyCode::Char('r') => Action::RandomObstacles,
        KeyCode::Char('c') => Action::Reset,
        KeyCode::Char('a') => Action::CycleAlgorithm,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::Faster,
        KeyCode::Char('-') => Action::Slower,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Map a terminal position to the grid cell drawn there.
pub fn screen_to_cell(column: u16, row: u16) -> Option<Coord> {
    if column < ORIGIN_X || row < ORIGIN_Y {
        return None;
    }
    let col = (column - ORIGIN_X) / CELL_WIDTH;
    Some(Coord::new(i32::from(row - ORIGIN_Y), i32::from(col)))
}

/// Raw-mode alternate screen, restored on drop.
struct Screen {
    out: Stdout,
}

impl Screen {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )
        .context("enter alternate screen")?;
        Ok(Self { out })
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        execute!(
            self.out,
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )
        .ok();
        terminal::disable_raw_mode().ok();
    }
}

/// Run the interactive visualizer until the user quits.
pub fn run(config: &VisualizerConfig) -> Result<()> {
    let mut viz = Visualizer::new(config);
    let mut screen = Screen::enter()?;
    let mut last_tick = Instant::now();

    loop {
        draw(&mut screen.out, &viz)?;

        let timeout = if viz.is_running() {
            viz.tick_interval().saturating_sub(last_tick.elapsed())
        } else {
            IDLE_POLL
        };

        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    ..
                }) => key_action(code),
                Event::Mouse(me) => match me.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        screen_to_cell(me.column, me.row).map(Action::Select)
                    }
                    _ => None,
                },
                Event::Resize(..) => {
                    queue!(screen.out, terminal::Clear(ClearType::All))?;
                    None
                }
                _ => None,
            };
            if let Some(action) = action {
                log::debug!("action {action:?}");
                if !viz.apply(action) {
                    break;
                }
                if viz.is_running() && matches!(action, Action::Select(_) | Action::SelectCursor) {
                    last_tick = Instant::now();
                }
            }
        }

        if viz.is_running() && last_tick.elapsed() >= viz.tick_interval() {
            viz.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn draw(out: &mut impl Write, viz: &Visualizer) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, 0),
        ResetColor,
        terminal::Clear(ClearType::CurrentLine),
        Print(format!(
            " {}  |  speed {}  |  {}",
            viz.algorithm(),
            viz.speed(),
            viz.phase()
        ))
    )?;

    let grid = viz.grid();
    for row in 0..grid.rows() {
        queue!(out, cursor::MoveTo(ORIGIN_X, ORIGIN_Y + row as u16))?;
        for col in 0..grid.cols() {
            let c = Coord::new(row, col);
            let marker = if c == viz.cursor() { "[]" } else { "  " };
            queue!(
                out,
                SetBackgroundColor(cell_color(viz.cell_view(c))),
                SetForegroundColor(Color::DarkGrey),
                Print(marker)
            )?;
        }
        queue!(out, ResetColor)?;
    }

    let mut y = ORIGIN_Y + grid.rows() as u16 + 1;
    let mut lines = vec![viz.message().to_owned()];
    if let Some(m) = viz.metrics() {
        lines.extend(m.to_string().lines().map(str::to_owned));
    }
    lines.push(HELP.to_owned());
    for line in lines {
        queue!(
            out,
            cursor::MoveTo(ORIGIN_X, y),
            terminal::Clear(ClearType::CurrentLine),
            Print(line)
        )?;
        y += 1;
    }
    queue!(out, terminal::Clear(ClearType::FromCursorDown))?;

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(key_action(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(
            key_action(KeyCode::Left),
            Some(Action::MoveCursor { drow: 0, dcol: -1 })
        );
        assert_eq!(key_action(KeyCode::Char(' ')), Some(Action::SelectCursor));
        assert_eq!(key_action(KeyCode::Char('z')), None);
    }

    #[test]
    fn screen_positions_map_to_cells() {
        assert_eq!(screen_to_cell(ORIGIN_X, ORIGIN_Y), Some(Coord::new(0, 0)));
        assert_eq!(screen_to_cell(ORIGIN_X + 1, ORIGIN_Y), Some(Coord::new(0, 0)));
        assert_eq!(screen_to_cell(ORIGIN_X + 2, ORIGIN_Y + 3), Some(Coord::new(3, 1)));
        assert_eq!(screen_to_cell(0, ORIGIN_Y), None);
        assert_eq!(screen_to_cell(ORIGIN_X, 0), None);
    }

    #[test]
    fn draw_writes_frame() {
        let viz = Visualizer::new(&VisualizerConfig {
            grid_size: 3,
            seed: Some(1),
            ..VisualizerConfig::default()
        });
        let mut buf = Vec::new();
        draw(&mut buf, &viz).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("A* Algorithm"));
        assert!(text.contains("Select a start cell"));
        assert!(text.contains("[]"));
    }
}
