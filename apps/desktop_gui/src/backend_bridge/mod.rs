//! Queue types and worker thread that run submissions off the UI thread.

pub mod commands;
pub mod runtime;
