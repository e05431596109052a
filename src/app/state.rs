//! Application state shared by every front end.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::ai::AiAnswer;
use crate::history::HistoryStore;

/// Literal shown on the display after a failed calculation.
pub const ERROR_MARKER: &str = "Error";

/// Which controls are available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Standard,
    Scientific,
    #[serde(rename = "ai", alias = "ai_assistant")]
    AiAssistant,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Self::Standard, Self::Scientific, Self::AiAssistant];

    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Scientific => "Scientific",
            Self::AiAssistant => "AI Assistant",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "std" => Ok(Self::Standard),
            "scientific" | "sci" => Ok(Self::Scientific),
            "ai" | "ai_assistant" | "assistant" => Ok(Self::AiAssistant),
            other => Err(format!(
                "unknown mode '{}' (expected standard, scientific or ai)",
                other
            )),
        }
    }
}

/// Everything the calculator shows or remembers.
#[derive(Debug)]
pub struct AppState {
    /// Number being entered, last result, or [`ERROR_MARKER`].
    pub display: String,
    /// Operands and operators committed so far, e.g. `"12 + "`.
    pub expression: String,
    pub mode: Mode,
    pub history: HistoryStore,
    /// Whether the history panel is shown.
    pub history_open: bool,
    /// Problem text typed in assistant mode.
    pub ai_input: String,
    /// A solve request is in flight.
    pub ai_loading: bool,
    /// Last answer from the assistant.
    pub ai_result: Option<AiAnswer>,
}

impl AppState {
    pub fn new(history: HistoryStore, mode: Mode) -> Self {
        Self {
            display: "0".to_string(),
            expression: String::new(),
            mode,
            history,
            history_open: false,
            ai_input: String::new(),
            ai_loading: false,
            ai_result: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.display == ERROR_MARKER
    }
}
