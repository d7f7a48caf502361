//! HayFrp daily sign-in.
//!
//! `application` holds the sign-in flow and its triggers, `presentation`
//! the CLI, HTTP surface and wiring.

pub mod application;
pub mod presentation;
