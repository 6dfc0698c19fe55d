//! Multiline text prompt on raw-mode crossterm events.
//!
//! Keyboard contract: plain Enter submits; Enter with Shift/Alt/Ctrl inserts
//! a newline; Esc cancels. The key handling is a pure reducer over the buffer
//! so the contract is testable without a terminal.

use crate::domain::DomainError;
use crossterm::ExecutableCommand;
use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use std::io::{Write, stdout};

/// What a key event did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Buffer possibly changed; keep reading.
    Continue,
    /// Plain Enter: hand the buffer to the caller.
    Submit,
    /// Esc: abandon the prompt.
    Cancel,
}

/// Apply one key event to the buffer. Pure; no terminal I/O.
pub fn apply_key(buffer: &mut String, key: KeyEvent) -> EditOutcome {
    if key.kind != KeyEventKind::Press {
        return EditOutcome::Continue;
    }
    match key.code {
        KeyCode::Enter => {
            let newline_modifier = key
                .modifiers
                .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT | KeyModifiers::CONTROL);
            if newline_modifier {
                buffer.push('\n');
                EditOutcome::Continue
            } else {
                EditOutcome::Submit
            }
        }
        KeyCode::Esc => EditOutcome::Cancel,
        // Raw mode swallows the interrupt signal; honor Ctrl+C ourselves.
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => EditOutcome::Cancel,
        KeyCode::Backspace => {
            buffer.pop();
            EditOutcome::Continue
        }
        KeyCode::Char(c) => {
            buffer.push(c);
            EditOutcome::Continue
        }
        KeyCode::Tab => {
            buffer.push('\t');
            EditOutcome::Continue
        }
        _ => EditOutcome::Continue,
    }
}

/// The line the cursor sits on; what gets repainted after a backspace.
fn current_line(buffer: &str) -> &str {
    buffer.rsplit('\n').next().unwrap_or("")
}

/// Guard: raw mode off again even on early return.
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self, DomainError> {
        enable_raw_mode().map_err(|e| DomainError::Ui(format!("enable raw mode: {}", e)))?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Read a (possibly multiline) text from the terminal.
/// Returns `None` when the user pressed Esc.
pub fn read_text(prompt: &str) -> Result<Option<String>, DomainError> {
    let mut out = stdout();
    println!("{}", prompt.dark_yellow());
    println!("{}", "(Enter 发送 · Shift+Enter 换行 · Esc 退出)".dark_grey());
    let _ = out.flush();

    let _raw = RawMode::enable()?;
    let mut buffer = String::new();

    loop {
        let ev = event::read().map_err(|e| DomainError::Ui(format!("read key event: {}", e)))?;
        let Event::Key(key) = ev else { continue };

        let before_len = buffer.len();
        let ended_with_newline = buffer.ends_with('\n');
        match apply_key(&mut buffer, key) {
            EditOutcome::Continue => {
                // Echo the edit: append prints the tail; backspace repaints
                // the whole line, since the popped char may span more than
                // one cell (CJK) or be the newline itself.
                if buffer.len() > before_len {
                    let tail = &buffer[before_len..];
                    if tail == "\n" {
                        print!("\r\n");
                    } else {
                        print!("{}", tail);
                    }
                } else if buffer.len() < before_len {
                    if ended_with_newline {
                        let _ = out.execute(MoveUp(1));
                    }
                    let _ = out.execute(MoveToColumn(0));
                    let _ = out.execute(Clear(ClearType::CurrentLine));
                    print!("{}", current_line(&buffer));
                }
                let _ = out.flush();
            }
            EditOutcome::Submit => {
                print!("\r\n");
                let _ = out.flush();
                return Ok(Some(buffer));
            }
            EditOutcome::Cancel => {
                print!("\r\n");
                let _ = out.flush();
                return Ok(None);
            }
        }
    }
}
