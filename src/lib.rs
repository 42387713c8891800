//! modelsel: resolve model names to chat-completion clients.
//!
//! The [`registry`] maps a case-insensitive model name to a
//! [`ModelDescriptor`](registry::ModelDescriptor), merging a built-in
//! catalog with models discovered on a local LM Studio server. The
//! [`output`] module provides the [`TokenBuffer`](output::TokenBuffer) that
//! smooths streamed tokens for display, and [`provider`] builds rig-core
//! clients from descriptors.

pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod output;
pub mod provider;
pub mod registry;
