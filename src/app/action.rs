//! Inputs to the application reducer and the effects it requests.

use crate::ai::AiAnswer;
use crate::calculator::{Key, Operator, ScientificFn};

use super::Mode;

/// A user interaction or a completed background task.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// A digit `0-9` or the decimal point.
    Digit(char),
    Operator(Operator),
    Equals,
    Clear,
    ToggleSign,
    Percent,
    Scientific(ScientificFn),
    SetMode(Mode),
    SetAiInput(String),
    /// Submit the current AI input.
    SubmitAi,
    /// A solve request finished.
    AiResolved { problem: String, answer: AiAnswer },
    /// Copy a history entry back into the calculator.
    Recall(usize),
    ClearHistory,
    ToggleHistory,
}

impl From<Key> for Action {
    fn from(key: Key) -> Self {
        match key {
            Key::Digit(c) => Self::Digit(c),
            Key::Operator(op) => Self::Operator(op),
            Key::Equals => Self::Equals,
            Key::Clear => Self::Clear,
            Key::ToggleSign => Self::ToggleSign,
            Key::Percent => Self::Percent,
        }
    }
}

/// Work the front end must carry out on behalf of the reducer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Ask the assistant to solve `problem`, then dispatch
    /// [`Action::AiResolved`] with the answer.
    Solve { problem: String },
}
