//! # Line Input
//!
//! Turns one typed line into actions for the current panel.
//!
//! | Panel has            | Line                  | Result                         |
//! |----------------------|-----------------------|--------------------------------|
//! | a text input         | any text              | `Input` + `Submit`             |
//! | letter tiles         | `3` or `h`            | `PlaceLetter`                  |
//! | letter tiles         | `check` / `reset`     | `CheckPuzzle` / `ResetPuzzle`  |
//! | cards                | `2`                   | `Select(1)`                    |
//! | an unsent form       | name, then message    | `SendFeedback`                 |
//! | a refused form       | the refused part only | `SendFeedback`                 |
//! | buttons              | `1`, or Enter if only one | the button's action        |
//!
//! `quit`, `exit`, `help` and `?` work everywhere.

use journey_core::{Action, Control, Panel, Rejection, Tile};

/// What the loop should do with a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Dispatch these actions in order, stopping at the first error.
    Actions(Vec<Action>),
    /// The feedback form needs another line; show this prompt.
    Prompt(&'static str),
    Help,
    Quit,
    Ignored,
    Unknown(String),
}

/// Prompt shown once the sender's name has been captured.
pub const MESSAGE_PROMPT: &str = "  Your message:";

/// Prompt for the sender's name.
pub const NAME_PROMPT: &str = "  Your name:";

/// Line parser. Holds the half-filled feedback form between lines.
#[derive(Debug, Clone, Default)]
pub struct InputParser {
    pending_name: Option<String>,
}

impl InputParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget a half-filled feedback form.
    pub fn reset(&mut self) {
        self.pending_name = None;
    }

    /// Whether the parser is waiting for the feedback message.
    #[must_use]
    pub fn awaiting_message(&self) -> bool {
        self.pending_name.is_some()
    }

    /// Interpret `line` against the panel currently on screen.
    pub fn parse(&mut self, line: &str, panel: Option<&Panel>) -> Command {
        let text = line.trim();
        let lower = text.to_lowercase();

        match lower.as_str() {
            "quit" | "exit" => return Command::Quit,
            "help" | "?" => return Command::Help,
            _ => {}
        }

        let Some(panel) = panel else {
            return Command::Ignored;
        };

        if has_open_form(panel) {
            return self.form_line(text);
        }
        self.reset();

        if let Some(field) = panel.input_field() {
            if text.is_empty() {
                return Command::Ignored;
            }
            return Command::Actions(vec![
                Action::Input {
                    field,
                    value: text.to_string(),
                },
                Action::Submit,
            ]);
        }

        if let Some(tiles) = tiles(panel) {
            if let Some(command) = tile_line(&lower, tiles) {
                return command;
            }
        }

        if has_cards(panel) {
            if let Some(n) = ordinal(&lower) {
                return Command::Actions(vec![Action::Select(n)]);
            }
        }

        button_line(&lower, panel).unwrap_or_else(|| {
            if text.is_empty() {
                Command::Ignored
            } else {
                Command::Unknown(text.to_string())
            }
        })
    }

    /// Rewind the form after a refused send and return the prompt for the
    /// line the user has to type again.
    ///
    /// A refused message keeps the accepted `name`; a refused name starts the
    /// form over.
    pub fn feedback_refused(&mut self, name: String, rejection: &Rejection) -> &'static str {
        match rejection {
            Rejection::MissingMessage | Rejection::TooFewWords => {
                self.pending_name = Some(name);
                MESSAGE_PROMPT
            }
            _ => {
                self.pending_name = None;
                NAME_PROMPT
            }
        }
    }

    fn form_line(&mut self, text: &str) -> Command {
        match self.pending_name.take() {
            None if text.is_empty() => Command::Actions(vec![Action::SendFeedback {
                name: String::new(),
                message: String::new(),
            }]),
            None => {
                self.pending_name = Some(text.to_string());
                Command::Prompt(MESSAGE_PROMPT)
            }
            Some(name) => Command::Actions(vec![Action::SendFeedback {
                name,
                message: text.to_string(),
            }]),
        }
    }
}

/// Zero-based index from a one-based number typed by the user.
fn ordinal(text: &str) -> Option<usize> {
    text.parse::<usize>().ok()?.checked_sub(1)
}

fn has_open_form(panel: &Panel) -> bool {
    panel
        .controls
        .iter()
        .any(|c| matches!(c, Control::FeedbackForm { sent: false }))
}

fn has_cards(panel: &Panel) -> bool {
    panel
        .controls
        .iter()
        .any(|c| matches!(c, Control::Cards { .. }))
}

fn tiles(panel: &Panel) -> Option<&[Tile]> {
    panel.controls.iter().find_map(|c| match c {
        Control::Tiles(tiles) => Some(tiles.as_slice()),
        _ => None,
    })
}

fn tile_line(lower: &str, tiles: &[Tile]) -> Option<Command> {
    let action = match lower {
        "check" => Action::CheckPuzzle,
        "reset" | "esc" => Action::ResetPuzzle,
        _ => {
            if let Some(n) = ordinal(lower) {
                let tile = tiles.get(n)?;
                Action::PlaceLetter(tile.token.id)
            } else {
                let mut chars = lower.chars();
                let (Some(letter), None) = (chars.next(), chars.next()) else {
                    return None;
                };
                let tile = tiles
                    .iter()
                    .find(|t| !t.used && t.token.letter.to_ascii_lowercase() == letter)?;
                Action::PlaceLetter(tile.token.id)
            }
        }
    };
    Some(Command::Actions(vec![action]))
}

fn button_line(lower: &str, panel: &Panel) -> Option<Command> {
    let buttons: Vec<&Action> = panel.buttons().map(|(_, action)| action).collect();

    let action = if lower.is_empty() {
        match buttons.as_slice() {
            [only] => *only,
            _ => return None,
        }
    } else {
        buttons.get(ordinal(lower)?).copied()?
    };
    Some(Command::Actions(vec![action.clone()]))
}
