//! Output destinations and encoders.
//!
//! A render appends text to a [`TextSink`]. Literal template text goes to
//! the sink as-is; text produced by output statements goes through the
//! render's [`TextEncoder`] first.

use std::borrow::Cow;
use std::io;

/// Append-only text destination.
pub trait TextSink {
    fn write_text(&mut self, text: &str) -> io::Result<()>;
}

impl TextSink for String {
    #[inline]
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.push_str(text);
        Ok(())
    }
}

/// Adapts any [`io::Write`] into a [`TextSink`], writing UTF-8.
#[derive(Debug)]
pub struct IoSink<W: io::Write> {
    writer: W,
}

impl<W: io::Write> IoSink<W> {
    pub fn new(writer: W) -> Self {
        IoSink { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> TextSink for IoSink<W> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }
}

/// Encoding applied to values written by output statements.
///
/// Enum dispatch: the encoder sits on the hot path of every output
/// statement and there are only two of them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TextEncoder {
    /// Escape HTML-significant characters.
    #[default]
    Html,
    /// Write values verbatim.
    Raw,
}

impl TextEncoder {
    #[inline]
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Self::Html => encode_html(text),
            Self::Raw => Cow::Borrowed(text),
        }
    }
}

/// Escape `&`, `<`, `>`, `"` and `'`. Borrows when nothing needs escaping.
pub fn encode_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests;
