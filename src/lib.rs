#![deny(missing_docs)]
//! Telegram intake bot for payment transaction ids.
//!
//! Receives a TXID, collects a mandatory contact method (handle or phone
//! number) and forwards the completed submission to a single
//! administrator chat.

/// Telegram handlers and the admin notifier.
pub mod bot;
/// Input classification patterns.
pub mod classify;
/// Settings loading and validation.
pub mod config;
/// The conversation state machine.
pub mod dialogue;
/// Per-user pending-submission storage.
pub mod session;
/// Text helpers.
pub mod utils;
