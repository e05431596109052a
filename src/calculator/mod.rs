//! Calculator module for evaluating keypad input.
//!
//! This module provides functionality to:
//! - Split typed lines into keypad presses
//! - Evaluate pending expressions left to right
//! - Apply scientific functions to the current operand
//! - Copy results to the clipboard

mod clipboard;
mod evaluation;
mod keypad;
mod scientific;

pub use clipboard::{ClipboardError, copy_to_clipboard};
pub use evaluation::{
    Calculation, EvaluationError, MAX_FRACTION_DIGITS, Operator, calculate, evaluate,
    format_result, parse_operand,
};
pub use keypad::{Key, looks_like_keys, parse_keys};
pub use scientific::{ScientificFn, apply as apply_scientific};
