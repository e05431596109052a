//! The reducer: applies one [`Action`] to the [`AppState`].

use tracing::debug;

use crate::ai;
use crate::calculator::{
    self, Calculation, EvaluationError, Operator, ScientificFn, format_result, parse_operand,
};
use crate::history::HistoryStore;

use super::{Action, AppState, ERROR_MARKER, Effect, Mode};

/// Apply `action` to `state`.
///
/// Runs synchronously to completion. The only asynchronous work, solving
/// an AI problem, is returned as an [`Effect`] for the caller to perform.
pub fn update(state: &mut AppState, action: Action) -> Option<Effect> {
    match action {
        Action::Digit(digit) => press_digit(state, digit),
        Action::Operator(op) => press_operator(state, op),
        Action::Equals => press_equals(state),
        Action::Clear => {
            state.display = "0".to_string();
            state.expression.clear();
        }
        Action::ToggleSign => map_display(state, |x| -x),
        Action::Percent => map_display(state, |x| x / 100.0),
        Action::Scientific(func) => press_scientific(state, func),
        Action::SetMode(mode) => {
            debug!(%mode, "Mode changed");
            state.mode = mode;
        }
        Action::SetAiInput(text) => state.ai_input = text,
        Action::SubmitAi => return submit_ai(state),
        Action::AiResolved { problem, answer } => {
            state.ai_loading = false;
            state.history.append(ai::history_label(&problem), answer.result.clone());
            state.ai_result = Some(answer);
        }
        Action::Recall(index) => {
            if let Some(entry) = state.history.get(index) {
                let (expression, result) = HistoryStore::recall(entry);
                state.expression = expression;
                state.display = result;
            }
        }
        Action::ClearHistory => state.history.clear(),
        Action::ToggleHistory => state.history_open = !state.history_open,
    }
    None
}

fn press_digit(state: &mut AppState, digit: char) {
    if !(digit.is_ascii_digit() || digit == '.') {
        return;
    }

    if state.display == "0" || state.is_error() {
        state.display = if digit == '.' {
            "0.".to_string()
        } else {
            digit.to_string()
        };
    } else if digit == '.' && state.display.contains('.') {
        // one decimal point per operand
    } else {
        state.display.push(digit);
    }
}

fn press_operator(state: &mut AppState, op: Operator) {
    if state.is_error() {
        return;
    }
    state.expression.push_str(&format!("{} {} ", state.display, op));
    state.display = "0".to_string();
}

fn press_equals(state: &mut AppState) {
    let outcome = calculator::calculate(&state.expression, &state.display);
    record(state, outcome);
}

fn press_scientific(state: &mut AppState, func: ScientificFn) {
    if state.mode != Mode::Scientific {
        debug!(%func, "Ignoring scientific function outside scientific mode");
        return;
    }
    match calculator::apply_scientific(func, &state.display) {
        // The pending expression stays, so the result can still be combined.
        Ok(calc) => {
            debug!(expression = %calc.expression, result = %calc.result, "Calculated");
            state.history.append(calc.expression, calc.result.clone());
            state.display = calc.result;
        }
        Err(e) => fail(state, e),
    }
}

fn record(state: &mut AppState, outcome: Result<Calculation, EvaluationError>) {
    match outcome {
        Ok(calc) => {
            debug!(expression = %calc.expression, result = %calc.result, "Calculated");
            state.history.append(calc.expression, calc.result.clone());
            state.display = calc.result;
            state.expression.clear();
        }
        Err(e) => fail(state, e),
    }
}

fn fail(state: &mut AppState, e: EvaluationError) {
    debug!("Calculation failed: {}", e);
    state.display = ERROR_MARKER.to_string();
    state.expression.clear();
}

fn map_display(state: &mut AppState, f: impl Fn(f64) -> f64) {
    if let Ok(x) = parse_operand(&state.display) {
        let value = f(x);
        if value.is_finite() {
            state.display = format_result(value);
        }
    }
}

fn submit_ai(state: &mut AppState) -> Option<Effect> {
    if state.mode != Mode::AiAssistant || state.ai_loading {
        return None;
    }
    let problem = state.ai_input.trim();
    if problem.is_empty() {
        return None;
    }

    let problem = problem.to_string();
    state.ai_loading = true;
    state.ai_result = None;
    Some(Effect::Solve { problem })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiAnswer;
    use crate::history::MemoryBackend;

    fn state() -> AppState {
        AppState::new(HistoryStore::open(MemoryBackend::new()), Mode::Standard)
    }

    fn press(state: &mut AppState, keys: &str) {
        for key in calculator::parse_keys(keys).unwrap() {
            assert_eq!(update(state, key.into()), None);
        }
    }

    #[test]
    fn test_seven_plus_three() {
        let mut s = state();
        press(&mut s, "7+3=");

        assert_eq!(s.display, "10");
        assert!(s.expression.is_empty());
        assert_eq!(s.history.len(), 1);
        assert_eq!(s.history.entries()[0].expression, "7 + 3");
        assert_eq!(s.history.entries()[0].result, "10");
    }

    #[test]
    fn test_pending_expression_accumulates() {
        let mut s = state();
        press(&mut s, "12+");
        assert_eq!(s.expression, "12 + ");
        assert_eq!(s.display, "0");

        press(&mut s, "3×");
        assert_eq!(s.expression, "12 + 3 * ");
    }

    #[test]
    fn test_chained_operators_left_to_right() {
        let mut s = state();
        press(&mut s, "2+3×4=");
        assert_eq!(s.display, "20");
        assert_eq!(s.history.entries()[0].expression, "2 + 3 * 4");
    }

    #[test]
    fn test_division_by_zero_shows_error() {
        let mut s = state();
        press(&mut s, "5÷0=");
        assert_eq!(s.display, ERROR_MARKER);
        assert!(s.expression.is_empty());
        assert!(s.history.is_empty());

        // Next digit starts fresh.
        press(&mut s, "4");
        assert_eq!(s.display, "4");
    }

    #[test]
    fn test_operator_after_error_is_ignored() {
        let mut s = state();
        press(&mut s, "1/0=+");
        assert_eq!(s.display, ERROR_MARKER);
        assert!(s.expression.is_empty());
    }

    #[test]
    fn test_digit_entry() {
        let mut s = state();
        press(&mut s, "0");
        assert_eq!(s.display, "0");
        press(&mut s, ".");
        assert_eq!(s.display, "0.");
        press(&mut s, "5.2");
        assert_eq!(s.display, "0.52");
    }

    #[test]
    fn test_clear_sign_and_percent() {
        let mut s = state();
        press(&mut s, "12+50±");
        assert_eq!(s.display, "-50");
        press(&mut s, "%");
        assert_eq!(s.display, "-0.5");
        press(&mut s, "=");
        assert_eq!(s.display, "11.5");
        assert_eq!(s.history.entries()[0].expression, "12 + -0.5");

        press(&mut s, "9+1c");
        assert_eq!(s.display, "0");
        assert!(s.expression.is_empty());
    }

    #[test]
    fn test_sign_and_percent_leave_error_alone() {
        let mut s = state();
        s.display = ERROR_MARKER.to_string();
        update(&mut s, Action::ToggleSign);
        update(&mut s, Action::Percent);
        assert_eq!(s.display, ERROR_MARKER);
    }

    #[test]
    fn test_scientific_requires_mode() {
        let mut s = state();
        press(&mut s, "4");
        update(&mut s, Action::Scientific(ScientificFn::Sqrt));
        assert_eq!(s.display, "4");
        assert!(s.history.is_empty());

        update(&mut s, Action::SetMode(Mode::Scientific));
        update(&mut s, Action::Scientific(ScientificFn::Sqrt));
        assert_eq!(s.display, "2");
        assert_eq!(s.history.entries()[0].expression, "sqrt(4)");
        assert_eq!(s.history.entries()[0].result, "2");
    }

    #[test]
    fn test_scientific_domain_error() {
        let mut s = state();
        update(&mut s, Action::SetMode(Mode::Scientific));
        press(&mut s, "3+4±");
        update(&mut s, Action::Scientific(ScientificFn::Sqrt));
        assert_eq!(s.display, ERROR_MARKER);
        assert!(s.expression.is_empty());
        assert!(s.history.is_empty());
    }

    #[test]
    fn test_scientific_keeps_pending_expression() {
        let mut s = state();
        update(&mut s, Action::SetMode(Mode::Scientific));
        press(&mut s, "12+4");
        update(&mut s, Action::Scientific(ScientificFn::Sqrt));
        assert_eq!(s.display, "2");
        assert_eq!(s.expression, "12 + ");
        assert_eq!(s.history.entries()[0].expression, "sqrt(4)");

        press(&mut s, "=");
        assert_eq!(s.display, "14");
        assert_eq!(s.history.entries()[0].expression, "12 + 2");
        assert_eq!(s.history.len(), 2);
    }

    #[test]
    fn test_recall_copies_entry() {
        let mut s = state();
        press(&mut s, "7+3=");
        press(&mut s, "c");

        update(&mut s, Action::Recall(0));
        assert_eq!(s.display, "10");
        assert_eq!(s.expression, "7 + 3");
        assert_eq!(s.history.len(), 1);

        update(&mut s, Action::Recall(5));
        assert_eq!(s.display, "10");
    }

    #[test]
    fn test_clear_history() {
        let backend = MemoryBackend::new();
        let mut s = AppState::new(HistoryStore::open(backend.clone()), Mode::Standard);
        press(&mut s, "1+1=");
        assert!(backend.contents().is_some());

        update(&mut s, Action::ClearHistory);
        assert!(s.history.is_empty());
        assert!(backend.contents().is_none());
    }

    #[test]
    fn test_ai_submit_and_resolve() {
        let mut s = state();
        update(&mut s, Action::SetAiInput("What is 25% of 1500?".into()));

        // Wrong mode.
        assert_eq!(update(&mut s, Action::SubmitAi), None);

        update(&mut s, Action::SetMode(Mode::AiAssistant));
        let effect = update(&mut s, Action::SubmitAi);
        assert_eq!(
            effect,
            Some(Effect::Solve {
                problem: "What is 25% of 1500?".to_string()
            })
        );
        assert!(s.ai_loading);

        // A second submit while loading is ignored.
        assert_eq!(update(&mut s, Action::SubmitAi), None);

        let answer = AiAnswer {
            result: "375".to_string(),
            explanation: "0.25 × 1500".to_string(),
            steps: vec!["0.25 × 1500 = 375".to_string()],
        };
        update(
            &mut s,
            Action::AiResolved {
                problem: "What is 25% of 1500?".to_string(),
                answer: answer.clone(),
            },
        );

        assert!(!s.ai_loading);
        assert_eq!(s.ai_result, Some(answer));
        assert_eq!(s.history.entries()[0].expression, "AI: What is 25% of 1500?");
        assert_eq!(s.history.entries()[0].result, "375");
    }

    #[test]
    fn test_ai_sentinel_is_recorded() {
        let mut s = state();
        update(&mut s, Action::SetMode(Mode::AiAssistant));
        update(&mut s, Action::SetAiInput("gibberish".into()));
        update(&mut s, Action::SubmitAi);
        update(
            &mut s,
            Action::AiResolved {
                problem: "gibberish".to_string(),
                answer: AiAnswer::sentinel(),
            },
        );
        assert_eq!(s.history.entries()[0].result, "Error");
        assert!(s.ai_result.as_ref().is_some_and(AiAnswer::is_sentinel));
    }

    #[test]
    fn test_blank_ai_input_is_ignored() {
        let mut s = state();
        update(&mut s, Action::SetMode(Mode::AiAssistant));
        update(&mut s, Action::SetAiInput("   ".into()));
        assert_eq!(update(&mut s, Action::SubmitAi), None);
        assert!(!s.ai_loading);
    }
}
