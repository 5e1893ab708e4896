//! Runs module

mod api;
mod models;

pub use models::{Run, RunAttributes, RunCreateRequest, RunResponse};
