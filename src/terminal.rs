//! Line-driven front end.
//!
//! Reads one command per line, turns it into a [`Message`], applies it to a
//! [`LabelSession`], and prints the current frame as a checklist:
//!
//! ```text
//! 3/15 — video 1, swallow 2, frame 40
//! [1] LPW_PPW    ✓  (sev 2, overridden)
//! [2] B          ·  (sev 0)
//! ```
//!
//! Frame numbers typed by the user are 1-based; the session works with
//! 0-based indices.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::keybindings::{KeyBindings, key_to_string};
use crate::message::Message;
use crate::session::{FrameView, LabelSession, SessionError, StepOutcome};
use crate::state::NavigationError;

/// Command reference printed by `help`.
pub const HELP: &str = "\
Commands:
  n, next            save this frame and go to the next one
  p, prev            save this frame and go to the previous one
  g <N>              go to frame N (does not save)
  range <A> <B>      only navigate frames A..=B
  range clear        navigate all frames again
  all / none         check / uncheck every structure
  save               save this frame and write the CSV
  preload <PATH>     load a baseline (preload) CSV
  open <PATH>        open a dataset folder
  help               show this text
  q, quit            quit without saving the current frame
Any line made only of structure keys toggles those structures.";

/// Whether the front end should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Read the next command
    Continue,
    /// Stop
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str, bindings: &KeyBindings) -> Result<Option<Message>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    // Word commands win over toggle keys spelling the same letters
    if let Some(message) = parse_word_command(&command.to_ascii_lowercase(), rest)? {
        return Ok(Some(message));
    }
    match bindings.parse_toggle_line(line) {
        Some(indices) => Ok(Some(Message::Toggle(indices))),
        None => Err(format!("Unknown command '{line}' (type 'help')")),
    }
}

/// Match a command word and its arguments. `Ok(None)` if `command` is not a command word.
fn parse_word_command(command: &str, rest: &str) -> Result<Option<Message>, String> {
    let message = match (command, rest) {
        ("n" | "next", "") => Message::NextFrame,
        ("p" | "prev", "") => Message::PrevFrame,
        ("g" | "goto", n) if !n.is_empty() => Message::GoTo(parse_number(n)?),
        ("range", "clear") => Message::ClearRange,
        ("range", args) => {
            let mut parts = args.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(a), Some(b), None) => Message::SetRange(parse_number(a)?, parse_number(b)?),
                _ => return Err("Usage: range <A> <B> | range clear".to_string()),
            }
        }
        ("all", "") => Message::CheckAll,
        ("none", "") => Message::UncheckAll,
        ("save", "") => Message::Save,
        ("preload", path) if !path.is_empty() => Message::LoadBaseline(PathBuf::from(path)),
        ("open", path) if !path.is_empty() => Message::OpenFolder(PathBuf::from(path)),
        ("help" | "?", "") => Message::Help,
        ("q" | "quit" | "exit", "") => Message::Quit,
        _ => return Ok(None),
    };
    Ok(Some(message))
}

fn parse_number(s: &str) -> Result<i64, String> {
    s.parse()
        .map_err(|_| format!("'{s}' is not a whole number"))
}

/// Apply a message to the session. Returns whether to continue and an
/// optional notice for the user.
pub fn handle(
    session: &mut LabelSession,
    message: Message,
) -> Result<(Control, Option<String>), SessionError> {
    let notice = match message {
        Message::NextFrame => match session.advance()? {
            StepOutcome::Moved(_) => None,
            StepOutcome::AtBoundary => Some("Saved. Already at the last frame of the range.".to_string()),
        },
        Message::PrevFrame => match session.retreat()? {
            StepOutcome::Moved(_) => None,
            StepOutcome::AtBoundary => Some("Already at the first frame of the range.".to_string()),
        },
        Message::GoTo(number) => {
            session.jump_to(number.saturating_sub(1))?;
            None
        }
        Message::SetRange(start, end) => {
            session.set_range(start.saturating_sub(1), end.saturating_sub(1))?;
            None
        }
        Message::ClearRange => {
            session.clear_range();
            None
        }
        Message::Toggle(indices) => {
            for index in indices {
                session.toggle(index);
            }
            None
        }
        Message::CheckAll => {
            session.check_all();
            None
        }
        Message::UncheckAll => {
            session.uncheck_all();
            None
        }
        Message::Save => {
            let rows = session.save()?;
            Some(format!("Saved {rows} labeled frames."))
        }
        Message::LoadBaseline(path) => {
            let swallows = session.replace_baseline(&path)?;
            Some(format!("Loaded baseline for {swallows} swallows from {}", path.display()))
        }
        Message::OpenFolder(path) => {
            let summary = session.open_folder(path)?;
            let mut notice = format!(
                "Opened {} frames ({} already labeled).",
                summary.frames, summary.labeled
            );
            if let Some(backup) = summary.backup {
                notice.push_str(&format!(" Backup: {}", backup.display()));
            }
            Some(notice)
        }
        Message::Help => Some(HELP.to_string()),
        Message::Quit => return Ok((Control::Quit, None)),
    };
    Ok((Control::Continue, notice))
}

/// User-facing text for a session error, with 1-based frame numbers.
pub fn describe_error(error: &SessionError) -> String {
    match error {
        SessionError::Navigation(NavigationError::OutOfBounds { total, .. }) => {
            format!("Out of bounds. Enter a frame between 1 and {total}.")
        }
        SessionError::Navigation(NavigationError::OutsideRange { min, max, .. }) => {
            format!("Must be between {} and {}.", min + 1, max + 1)
        }
        SessionError::Navigation(NavigationError::InvalidRange { total, .. }) => {
            format!("Range out of bounds. Use 1 <= A <= B <= {total}.")
        }
        SessionError::NoDataset => "No folder is open. Use 'open <PATH>'.".to_string(),
        other => other.to_string(),
    }
}

/// Render the current frame as a checklist.
pub fn render(session: &LabelSession, bindings: &KeyBindings) -> String {
    let Some(view) = session.current_view() else {
        return "No folder is open. Use 'open <PATH>'.".to_string();
    };

    let mut out = format!("{}\n", view.status_line());
    out.push_str(&format!("{}\n", view.path.display()));
    let (min, max) = view.range;
    if (min, max) != (0, view.total.saturating_sub(1)) {
        out.push_str(&format!("Range: {}-{}\n", min + 1, max + 1));
    }
    out.push_str(&format!("Labeled: {}/{}\n", session.labeled_count(), view.total));
    match session.baseline().source() {
        Some(source) => out.push_str(&format!("Preload: {}\n", source.display())),
        None => out.push_str("Preload: none\n"),
    }
    out.push_str(&checklist(&view, session, bindings));
    out
}

fn checklist(view: &FrameView, session: &LabelSession, bindings: &KeyBindings) -> String {
    let width = session.schema().names().map(str::len).max().unwrap_or(0);
    let mut out = String::new();
    for (i, structure) in session.schema().iter().enumerate() {
        let key = bindings
            .key_for_structure(i)
            .map(key_to_string)
            .unwrap_or_else(|| "?".to_string());
        let mark = if view.visibility.get(i) { "✓" } else { "·" };
        let overridden = if view.overridden.get(i) {
            ", overridden"
        } else {
            ""
        };
        out.push_str(&format!(
            "[{key}] {:<width$}  {mark}  (sev {}{overridden})\n",
            structure.name,
            view.severities.as_written(i),
        ));
    }
    out
}

/// Run the command loop until `q` or end of input.
pub fn run<R: BufRead, W: Write>(
    session: &mut LabelSession,
    bindings: &KeyBindings,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "{}", render(session, bindings))?;

    for line in input.lines() {
        let line = line?;
        let message = match parse_command(&line, bindings) {
            Ok(Some(message)) => message,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "{e}")?;
                continue;
            }
        };

        let redraw = !matches!(message, Message::Help | Message::Quit);
        match handle(session, message) {
            Ok((Control::Quit, _)) => break,
            Ok((Control::Continue, notice)) => {
                if let Some(notice) = notice {
                    writeln!(output, "{notice}")?;
                }
            }
            Err(e) => {
                log::debug!("Command failed: {}", e);
                writeln!(output, "{}", describe_error(&e))?;
                continue;
            }
        }
        if redraw {
            writeln!(output, "{}", render(session, bindings))?;
        }
    }

    output.flush()
}
