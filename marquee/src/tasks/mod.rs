//! Embassy tasks
//!
//! The refresh task runs on the embassy executor; the session loop runs in
//! `main`; the stdin reader is a plain thread (see [`crate::input`]).

pub mod refresh;

pub use refresh::{refresh_task, run_refresh};
