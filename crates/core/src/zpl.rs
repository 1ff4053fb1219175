//! ZPL writer: a small builder for the fixed command set the label layouts use.
//!
//! Every command is written on its own line, which printers ignore and which
//! keeps dry-run output readable.

use crate::hex_escape::{DEFAULT_INDICATOR, encode_hex_escapes, needs_hex_escape};

/// Label start marker.
pub const LABEL_START: &str = "^XA";
/// Label end marker.
pub const LABEL_END: &str = "^XZ";

/// Builder for a single `^XA` … `^XZ` label format.
///
/// The writer opens the format on construction and closes it in
/// [`finish`](Self::finish), so a finished buffer is always a complete,
/// self-contained label.
#[derive(Debug)]
pub struct ZplWriter {
    out: String,
}

impl ZplWriter {
    /// Start a new label format.
    pub fn new() -> Self {
        let mut out = String::with_capacity(512);
        out.push_str(LABEL_START);
        out.push('\n');
        Self { out }
    }

    /// Select the scalable default font (`^CF0`) at `height` dots.
    pub fn font(&mut self, height: u32) -> &mut Self {
        self.line(&format!("^CF0,{height}"))
    }

    /// Place a text field at (`x`, `y`).
    ///
    /// Data containing `^` or `~` is hex-escaped behind `^FH`.
    pub fn text(&mut self, x: u32, y: u32, data: &str) -> &mut Self {
        if needs_hex_escape(data) {
            let escaped = encode_hex_escapes(data, DEFAULT_INDICATOR);
            self.line(&format!("^FO{x},{y}^FH^FD{escaped}^FS"))
        } else {
            self.line(&format!("^FO{x},{y}^FD{data}^FS"))
        }
    }

    /// Draw a horizontal rule `width` dots long and `thickness` dots tall.
    pub fn rule(&mut self, x: u32, y: u32, width: u32, thickness: u32) -> &mut Self {
        self.line(&format!("^FO{x},{y}^GB{width},{thickness},{thickness}^FS"))
    }

    /// Close the format and return its bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.out.push_str(LABEL_END);
        self.out.push('\n');
        self.out.into_bytes()
    }

    fn line(&mut self, command: &str) -> &mut Self {
        self.out.push_str(command);
        self.out.push('\n');
        self
    }
}

impl Default for ZplWriter {
    fn default() -> Self {
        Self::new()
    }
}
