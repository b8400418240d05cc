//! Character encodings of source and generated files.
//!
//! Labels are resolved the way `encoding_rs` resolves WHATWG labels, so
//! `ISO-8859-1`, `latin1` and `windows-1252` all name the same decoder.
//! When encoding, only the range both charsets agree on is written as raw
//! bytes; see [`encode_java_source`].

use encoding_rs::{EncoderResult, Encoding, UTF_8, WINDOWS_1252};

use crate::error::Error;

/// Resolves an encoding label for reading.
///
/// Returns [`Error::UnsupportedEncoding`] for unknown labels.
pub fn resolve(label: &str) -> Result<&'static Encoding, Error> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnsupportedEncoding(label.to_string()))
}

/// Resolves an encoding label for writing.
///
/// Besides unknown labels, encodings that cannot be encoded into (the UTF-16
/// family and `replacement`) are rejected as well.
pub fn resolve_target(label: &str) -> Result<&'static Encoding, Error> {
    let encoding = resolve(label)?;
    if encoding.output_encoding() != encoding {
        return Err(Error::UnsupportedEncoding(label.to_string()));
    }
    Ok(encoding)
}

/// Encodes generated Java source text.
///
/// Characters `encoding` cannot represent are written as Java unicode
/// escapes (`\u00E4`; surrogate pairs outside the BMP). The Java compiler
/// resolves those before lexing, so they are valid in comments and string
/// literals alike.
///
/// For `windows-1252` (also what `ISO-8859-1` resolves to) only characters
/// that have the same byte in both charsets are written directly; `€`, `™`
/// and the C1 controls are escaped, so the result reads the same with either
/// `javac -encoding` setting.
pub fn encode_java_source(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    if encoding == UTF_8 {
        return text.as_bytes().to_vec();
    }
    if encoding == WINDOWS_1252 {
        return encode_latin1_common(text);
    }

    let mut encoder = encoding.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut remaining = text;

    loop {
        reserve_for(&encoder, remaining, &mut out);
        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(remaining, &mut out, true);
        remaining = &remaining[read..];

        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => continue,
            EncoderResult::Unmappable(c) => {
                let escape = unicode_escape(c);
                reserve_for(&encoder, &escape, &mut out);
                // Escapes are ASCII, which every output encoding can represent.
                let (escaped, _) =
                    encoder.encode_from_utf8_to_vec_without_replacement(&escape, &mut out, false);
                debug_assert!(matches!(escaped, EncoderResult::InputEmpty));
            }
        }
    }

    out
}

fn encode_latin1_common(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match u8::try_from(u32::from(c)) {
            Ok(byte) if !(0x80..0xA0).contains(&byte) => out.push(byte),
            _ => out.extend_from_slice(unicode_escape(c).as_bytes()),
        }
    }
    out
}

/// Formats `c` as one or two `\uXXXX` escapes.
pub fn unicode_escape(c: char) -> String {
    let mut units = [0u16; 2];
    c.encode_utf16(&mut units)
        .iter()
        .map(|unit| format!("\\u{:04X}", unit))
        .collect()
}

fn reserve_for(encoder: &encoding_rs::Encoder, input: &str, out: &mut Vec<u8>) {
    let needed = encoder
        .max_buffer_length_from_utf8_without_replacement(input.len())
        .unwrap_or(input.len() * 4 + 16);
    out.reserve(needed);
}
