//! Output rendering for streamed model responses.
//!
//! Defines the [`Renderer`] trait that decouples the provider streaming loop
//! from the display layer, and [`TokenBuffer`], which batches tokens so the
//! terminal (and an optional UI callback) sees whole lines or chunks of
//! bounded size instead of one write per token.

use colored::Colorize;
use std::io::{self, Stdout, Write};

use crate::constants::DEFAULT_BUFFER_LIMIT;

/// Trait for rendering LLM output.
pub trait Renderer {
    /// Render a single token as it arrives.
    fn render_token(&mut self, token: &str);

    /// Called when the full response is complete.
    fn render_done(&mut self);

    /// Called when an error occurs during streaming.
    fn render_error(&mut self, err: &str);
}

/// Callback receiving each flushed chunk, e.g. to forward it to a UI.
pub type UiCallback = Box<dyn FnMut(&str)>;

/// Accumulates streamed tokens and flushes them in chunks.
///
/// A flush happens when a token contains a newline or the pending text
/// reaches `limit` characters. Each flush writes the pending text to the
/// primary writer and, if present, hands the same text to the UI callback.
/// One buffer serves one stream; create a fresh one per response.
pub struct TokenBuffer<W: Write = Stdout> {
    buffer: String,
    limit: usize,
    out: W,
    ui_callback: Option<UiCallback>,
}

impl TokenBuffer<Stdout> {
    /// Creates a buffer that flushes to stdout.
    pub fn stdout(limit: usize) -> Self {
        Self::with_writer(io::stdout(), limit)
    }
}

impl Default for TokenBuffer<Stdout> {
    fn default() -> Self {
        Self::stdout(DEFAULT_BUFFER_LIMIT)
    }
}

impl<W: Write> TokenBuffer<W> {
    /// Creates a buffer that flushes to `out`. A zero `limit` is treated
    /// as 1, flushing on every token.
    pub fn with_writer(out: W, limit: usize) -> Self {
        Self {
            buffer: String::new(),
            limit: limit.max(1),
            out,
            ui_callback: None,
        }
    }

    /// Attaches a secondary sink that receives every flushed chunk verbatim.
    pub fn with_ui_callback(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.ui_callback = Some(Box::new(callback));
        self
    }

    /// Appends a token, flushing if it completes a line or fills the buffer.
    pub fn on_token(&mut self, token: &str) {
        self.buffer.push_str(token);
        if token.contains('\n') || self.buffer.chars().count() >= self.limit {
            self.flush();
        }
    }

    /// Flushes whatever is still pending at the end of a stream.
    pub fn on_stream_end(&mut self) {
        if !self.buffer.is_empty() {
            self.flush();
        }
    }

    /// Text received but not yet flushed.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush(&mut self) {
        // Display writes are best-effort, like print!.
        self.out.write_all(self.buffer.as_bytes()).ok();
        self.out.flush().ok();
        if let Some(callback) = self.ui_callback.as_mut() {
            callback(&self.buffer);
        }
        self.buffer.clear();
    }
}

impl<W: Write> Renderer for TokenBuffer<W> {
    fn render_token(&mut self, token: &str) {
        self.on_token(token);
    }

    fn render_done(&mut self) {
        self.on_stream_end();
    }

    fn render_error(&mut self, err: &str) {
        self.on_stream_end();
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_buffer(limit: usize) -> (TokenBuffer<Vec<u8>>, Rc<RefCell<Vec<String>>>) {
        let chunks = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&chunks);
        let buffer = TokenBuffer::with_writer(Vec::new(), limit)
            .with_ui_callback(move |chunk| sink.borrow_mut().push(chunk.to_string()));
        (buffer, chunks)
    }

    #[test]
    fn test_newline_flushes_once_to_both_sinks() {
        let (mut buffer, chunks) = recording_buffer(60);
        buffer.on_token("a");
        buffer.on_token("b");
        assert!(chunks.borrow().is_empty());
        buffer.on_token("\n");

        assert_eq!(*chunks.borrow(), vec!["ab\n".to_string()]);
        assert_eq!(buffer.pending(), "");
        buffer.on_stream_end();
        assert_eq!(chunks.borrow().len(), 1);
        assert_eq!(buffer.into_inner(), b"ab\n");
    }

    #[test]
    fn test_limit_flushes_after_sixtieth_token() {
        let (mut buffer, chunks) = recording_buffer(60);
        for i in 1..=61 {
            buffer.on_token("x");
            let expected = if i < 60 { 0 } else { 1 };
            assert_eq!(chunks.borrow().len(), expected, "after token {i}");
        }
        assert_eq!(chunks.borrow()[0], "x".repeat(60));
        assert_eq!(buffer.pending(), "x");

        buffer.on_stream_end();
        assert_eq!(*chunks.borrow(), vec!["x".repeat(60), "x".to_string()]);
        assert_eq!(buffer.into_inner().len(), 61);
    }

    #[test]
    fn test_limit_counts_characters() {
        let (mut buffer, chunks) = recording_buffer(3);
        buffer.on_token("é");
        buffer.on_token("ü");
        assert!(chunks.borrow().is_empty());
        buffer.on_token("ß");
        assert_eq!(*chunks.borrow(), vec!["éüß".to_string()]);
    }

    #[test]
    fn test_stream_end_on_empty_buffer_is_silent() {
        let (mut buffer, chunks) = recording_buffer(60);
        buffer.on_stream_end();
        assert!(chunks.borrow().is_empty());
        assert!(buffer.into_inner().is_empty());
    }

    #[test]
    fn test_without_ui_callback_writes_everything() {
        let mut buffer = TokenBuffer::with_writer(Vec::new(), 4);
        for token in ["Hel", "lo", " wor", "ld"] {
            buffer.render_token(token);
        }
        buffer.render_done();
        assert_eq!(buffer.into_inner(), b"Hello world");
    }

    #[test]
    fn test_render_error_flushes_pending() {
        let (mut buffer, chunks) = recording_buffer(60);
        buffer.render_token("partial");
        buffer.render_error("connection reset");
        assert_eq!(*chunks.borrow(), vec!["partial".to_string()]);
    }
}
