//! Integration tests for Layer 1: Utils
//!
//! Tests for number and date formatting, user-agent detection, and predicates.

mod date;
mod number;
mod platform;
mod predicates;
