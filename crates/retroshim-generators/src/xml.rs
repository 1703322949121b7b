//! Minimal XML writer
//!
//! Enough surface for MAME's ctrlr files: nested elements, attributes,
//! text nodes, two-space indenting, entity escaping.

use std::fmt::Write;

/// Escape text for XML content or attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Builds an XML document as a string.
#[derive(Debug, Default)]
pub struct XmlWriter {
    buf: String,
    stack: Vec<String>,
}

impl XmlWriter {
    pub fn new() -> Self {
        let mut writer = Self::default();
        writer.buf.push_str("<?xml version=\"1.0\"?>\n");
        writer
    }

    fn indent(&mut self) {
        for _ in 0..self.stack.len() {
            self.buf.push_str("  ");
        }
    }

    /// Open an element with attributes.
    pub fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(name);
        for (key, value) in attrs {
            let _ = write!(self.buf, " {key}=\"{}\"", escape(value));
        }
        self.buf.push_str(">\n");
        self.stack.push(name.to_string());
        self
    }

    /// Write `<name attrs>text</name>` on one line.
    pub fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> &mut Self {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(name);
        for (key, value) in attrs {
            let _ = write!(self.buf, " {key}=\"{}\"", escape(value));
        }
        let _ = write!(self.buf, ">{}</{name}>\n", escape(text));
        self
    }

    /// Close the innermost open element.
    pub fn close(&mut self) -> &mut Self {
        if let Some(name) = self.stack.pop() {
            self.indent();
            let _ = write!(self.buf, "</{name}>\n");
        }
        self
    }

    /// Close any open elements and return the document.
    pub fn finish(mut self) -> String {
        while !self.stack.is_empty() {
            self.close();
        }
        self.buf
    }
}
