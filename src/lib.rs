//! A keypad calculator with scientific functions, a persistent
//! calculation history and an AI assistant for word problems.

pub mod ai;
pub mod app;
pub mod calculator;
pub mod config;
pub mod history;
pub mod shell;
