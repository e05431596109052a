//! Text rendering of the calculator state.

use std::io::{self, Write};

use crate::ai::AiAnswer;
use crate::app::{AppState, Mode};
use crate::calculator::ScientificFn;
use crate::history::HistoryEntry;

const WIDTH: usize = 32;

/// Mode bar, pending expression and display.
pub fn render_display(state: &AppState, out: &mut impl Write) -> io::Result<()> {
    let modes: Vec<String> = Mode::ALL
        .iter()
        .map(|&m| {
            if m == state.mode {
                format!("[{}]", m.label())
            } else {
                format!(" {} ", m.label())
            }
        })
        .collect();
    writeln!(out, "{}", modes.join(" "))?;

    if state.mode == Mode::AiAssistant {
        return render_ai(state, out);
    }

    writeln!(out, "{:>width$}", state.expression.trim_end(), width = WIDTH)?;
    writeln!(out, "{:>width$}", state.display, width = WIDTH)?;

    if state.mode == Mode::Scientific {
        let labels: Vec<&str> = ScientificFn::ALL.iter().map(|f| f.label()).collect();
        writeln!(out, "{:>width$}", labels.join("  "), width = WIDTH)?;
    }

    if state.history_open {
        render_history(state.history.entries().iter().enumerate(), out)?;
    }
    Ok(())
}

fn render_ai(state: &AppState, out: &mut impl Write) -> io::Result<()> {
    if state.ai_loading {
        writeln!(out, "Thinking...")?;
    } else if let Some(answer) = &state.ai_result {
        render_answer(answer, out)?;
    }

    if state.history_open {
        render_history(state.history.entries().iter().enumerate(), out)?;
    }
    Ok(())
}

/// The assistant's answer with numbered solution steps.
pub fn render_answer(answer: &AiAnswer, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "AI Result: {}", answer.result)?;
    writeln!(out, "{}", answer.explanation)?;
    if !answer.steps.is_empty() {
        writeln!(out, "Solution Steps")?;
        for (idx, step) in answer.steps.iter().enumerate() {
            writeln!(out, "  {}. {}", idx + 1, step)?;
        }
    }
    Ok(())
}

/// History panel, numbered from 1 for `:recall`.
pub fn render_history<'a>(
    entries: impl IntoIterator<Item = (usize, &'a HistoryEntry)>,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "Calculation History")?;
    let mut any = false;
    for (idx, entry) in entries {
        any = true;
        writeln!(
            out,
            "{:>3}  {}  {} = {}",
            idx + 1,
            entry.time_label(),
            entry.expression,
            entry.result
        )?;
    }
    if !any {
        writeln!(out, "  No history yet")?;
    }
    Ok(())
}

pub fn render_help(out: &mut impl Write) -> io::Result<()> {
    write!(
        out,
        "\
Keys:      0-9 .  + - * / (or × ÷)  =  c (clear)  ± or ~ (sign)  %
           several keys may be typed on one line, e.g. 12*4=
Functions: :sin :cos :tan :sqrt :log :ln :exp :square (scientific mode)
Modes:     :mode standard | scientific | ai
           in ai mode, type a problem in plain words
History:   :history [query]  :recall <n>  :clear-history
Other:     :copy  :help  :quit
"
    )
}
