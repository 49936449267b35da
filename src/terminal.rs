//! Terminal frontend built on crossterm.
//!
//! Each character cell shows two vertically stacked pixels through the upper
//! half block glyph: the foreground color paints the top pixel and the
//! background color the bottom one.

use crate::graphics::Canvas;
use crate::input::{InputEvent, Key, PointerButton};
use crate::math::Vec2;
use crate::viewport::Viewport;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use crossterm::{execute, queue};
use log::warn;
use std::io::{self, Write};
use std::time::Duration;

const HALF_BLOCK: char = '\u{2580}';

/// Puts the terminal into raw, alternate-screen mode with mouse reporting,
/// and restores it when dropped.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn start() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let session = TerminalSession { _private: () };
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = execute!(
            io::stdout(),
            ResetColor,
            Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        ) {
            warn!("failed to restore screen: {err}");
        }
        if let Err(err) = terminal::disable_raw_mode() {
            warn!("failed to leave raw mode: {err}");
        }
    }
}

/// Terminal size in cells as `(columns, rows)`
pub fn terminal_size() -> io::Result<(u16, u16)> {
    match termsize::get() {
        Some(size) => Ok((size.cols, size.rows)),
        None => terminal::size(),
    }
}

/// Pixel buffer size for a terminal of `cols` x `rows` cells
pub fn pixel_size(cols: u16, rows: u16) -> (usize, usize) {
    (cols as usize, rows as usize * 2)
}

/// Event from the terminal, already in world coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TerminalEvent {
    Input(InputEvent),
    Resize { cols: u16, rows: u16 },
}

/// World position under the center of a character cell
pub fn cell_to_world(column: u16, row: u16, viewport: &Viewport) -> Vec2 {
    let pixel = Vec2::new(column as f64 + 0.5, row as f64 * 2.0 + 1.0);
    viewport.view_to_world_point(pixel)
}

fn translate_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
    }
}

fn translate_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Quit);
    }
    let key = match key.code {
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Delete => Key::Delete,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        _ => return None,
    };
    Some(InputEvent::KeyDown(key))
}

/// Converts a crossterm event into a frontend event
pub fn translate_event(event: &Event, viewport: &Viewport) -> Option<TerminalEvent> {
    let input = match event {
        Event::Resize(cols, rows) => {
            return Some(TerminalEvent::Resize {
                cols: *cols,
                rows: *rows,
            })
        }
        Event::Key(key) => translate_key(key)?,
        Event::Mouse(mouse) => {
            let pos = cell_to_world(mouse.column, mouse.row, viewport);
            match mouse.kind {
                MouseEventKind::Down(button) => {
                    InputEvent::PointerDown(translate_button(button), pos)
                }
                MouseEventKind::Up(button) => InputEvent::PointerUp(translate_button(button)),
                MouseEventKind::Moved | MouseEventKind::Drag(_) => InputEvent::PointerMove(pos),
                MouseEventKind::ScrollUp => InputEvent::Wheel(1.0),
                MouseEventKind::ScrollDown => InputEvent::Wheel(-1.0),
                MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => return None,
            }
        }
        _ => return None,
    };
    Some(TerminalEvent::Input(input))
}

/// Drains every pending terminal event without blocking.
///
/// Events come back untranslated: a resize earlier in the batch changes the
/// viewport that later mouse positions must be mapped through.
pub fn poll_events() -> io::Result<Vec<Event>> {
    let mut events = Vec::new();
    while event::poll(Duration::ZERO)? {
        events.push(event::read()?);
    }
    Ok(events)
}

fn to_color([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb { r, g, b }
}

/// Writes the canvas as half-block cells and sets the window title
pub fn present<W: Write>(out: &mut W, canvas: &Canvas, title: &str) -> io::Result<()> {
    let rows = canvas.height() / 2;
    let mut last: Option<([u8; 3], [u8; 3])> = None;

    for row in 0..rows {
        queue!(out, MoveTo(0, row as u16))?;
        for x in 0..canvas.width() {
            let top = canvas.pixel(x, row * 2).unwrap_or_default();
            let bottom = canvas.pixel(x, row * 2 + 1).unwrap_or_default();
            match last {
                Some((fg, bg)) if fg == top && bg == bottom => {}
                Some((fg, _)) if fg == top => {
                    queue!(out, SetBackgroundColor(to_color(bottom)))?;
                }
                Some((_, bg)) if bg == bottom => {
                    queue!(out, SetForegroundColor(to_color(top)))?;
                }
                _ => {
                    queue!(
                        out,
                        SetForegroundColor(to_color(top)),
                        SetBackgroundColor(to_color(bottom))
                    )?;
                }
            }
            last = Some((top, bottom));
            queue!(out, Print(HALF_BLOCK))?;
        }
    }

    queue!(out, ResetColor, SetTitle(title))?;
    out.flush()
}
