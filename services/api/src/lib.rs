//! services/api/src/lib.rs
//!
//! The trip planner host service: configuration, the LLM adapter and the web surface.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
