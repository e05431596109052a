//! Application state and the reducer that drives it.

mod action;
mod state;
mod update;

pub use action::{Action, Effect};
pub use state::{AppState, ERROR_MARKER, Mode};
pub use update::update;
