//! Shared agent primitives: transcript model, decision wire format, button
//! dispatch, and the OpenRouter chat client.
//!
//! This crate holds everything the runner binary needs to drive a game agent
//! against an emulator, so headless experiments and tests can share the same
//! loop without the HTTP edges.

pub mod agent;
pub mod llm;
