//! Flight route planning engine.
//!
//! Answers: "given where I can fly, my passport, and what I care
//! about, which itineraries are worth considering?" — a time-dependent
//! multi-criteria search over a scheduled flight network, gated by
//! visa admission rules and ranked by weighted preferences.

pub mod domain;
pub mod engine;
pub mod loader;
pub mod network;
pub mod visa;
