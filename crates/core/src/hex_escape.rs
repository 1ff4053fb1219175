//! Hex escaping for ZPL `^FH` field data.
//!
//! Record text comes straight from the order system and may contain the ZPL
//! command prefixes `^` and `~`. Emitted verbatim, those would end the field
//! and be interpreted as commands. When `^FH` precedes `^FD`, an indicator
//! character followed by two hex digits (`_5E`) stands for a literal byte,
//! so unsafe bytes are rewritten in that form.

/// Default `^FH` indicator character.
pub const DEFAULT_INDICATOR: u8 = b'_';

/// Returns `true` if `content` cannot be placed in `^FD` without `^FH`.
pub fn needs_hex_escape(content: &str) -> bool {
    content.bytes().any(is_control_prefix)
}

/// Rewrite `^`, `~`, and the indicator itself as `_XX` hex escapes.
///
/// All other characters are copied through unchanged, including multi-byte
/// UTF-8 sequences.
pub fn encode_hex_escapes(content: &str, indicator: u8) -> String {
    let mut output = String::with_capacity(content.len() + 8);
    for ch in content.chars() {
        let escape = ch.is_ascii() && {
            let b = ch as u8;
            is_control_prefix(b) || b == indicator
        };
        if escape {
            output.push(indicator as char);
            output.push_str(&format!("{:02X}", ch as u8));
        } else {
            output.push(ch);
        }
    }
    output
}

fn is_control_prefix(b: u8) -> bool {
    b == b'^' || b == b'~'
}
