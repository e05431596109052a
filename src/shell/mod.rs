//! Interactive terminal front end.
//!
//! Reads one line at a time, turns it into reducer actions, performs any
//! requested effects and redraws the display.

mod command;
mod render;

pub use command::{Command, parse_line};
pub use render::{render_answer, render_display, render_help, render_history};

use std::io::{self, BufRead, Write};

use tokio::runtime::{Builder, Runtime};
use tracing::{debug, warn};

use crate::ai::{ModelBackend, SolveClient};
use crate::app::{Action, AppState, Effect, update};
use crate::calculator::copy_to_clipboard;

/// The calculator shell.
pub struct Shell<B> {
    state: AppState,
    client: SolveClient<B>,
    runtime: Runtime,
}

impl<B: ModelBackend> Shell<B> {
    pub fn new(state: AppState, client: SolveClient<B>) -> io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            state,
            client,
            runtime,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply an action and carry out the effects it requests.
    ///
    /// Solve requests block until the model answers or fails.
    pub fn dispatch(&mut self, action: Action) {
        let mut next = update(&mut self.state, action);
        while let Some(effect) = next.take() {
            match effect {
                Effect::Solve { problem } => {
                    debug!(%problem, "Solving");
                    let answer = self.runtime.block_on(self.client.solve(&problem));
                    next = update(&mut self.state, Action::AiResolved { problem, answer });
                }
            }
        }
    }

    /// Read commands from `input` until it ends or `:quit`.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        render_display(&self.state, out)?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            match parse_line(&line, self.state.mode) {
                Ok(None) => continue,
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command, out)?,
                Err(message) => writeln!(out, "{}", message)?,
            }
            out.flush()?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<()> {
        match command {
            Command::Keys(keys) => {
                for key in keys {
                    self.dispatch(key.into());
                }
            }
            Command::Function(func) => self.dispatch(Action::Scientific(func)),
            Command::Mode(mode) => self.dispatch(Action::SetMode(mode)),
            Command::History(None) => self.dispatch(Action::ToggleHistory),
            Command::History(Some(query)) => {
                return render_history(self.state.history.search(&query), out);
            }
            Command::Recall(index) => {
                if index >= self.state.history.len() {
                    return writeln!(out, "No history entry {}", index + 1);
                }
                self.dispatch(Action::Recall(index));
            }
            Command::ClearHistory => self.dispatch(Action::ClearHistory),
            Command::Copy => {
                return match copy_to_clipboard(&self.state.display) {
                    Ok(()) => writeln!(out, "Copied {}", self.state.display),
                    Err(e) => {
                        warn!("{}", e);
                        writeln!(out, "Could not copy: {}", e)
                    }
                };
            }
            Command::Problem(text) => {
                self.dispatch(Action::SetAiInput(text));
                if !self.state.ai_loading {
                    writeln!(out, "Thinking...")?;
                    out.flush()?;
                }
                self.dispatch(Action::SubmitAi);
            }
            Command::Help => return render_help(out),
            Command::Quit => return Ok(()),
        }
        render_display(&self.state, out)
    }
}
