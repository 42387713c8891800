//! LLM provider construction for modelsel.
//!
//! Turns a resolved [`ModelDescriptor`](crate::registry::ModelDescriptor)
//! into a live rig-core client. Supports OpenAI (and OpenAI-compatible local
//! servers such as LM Studio), Anthropic and Google Gemini.

mod client;

pub use client::Provider;
