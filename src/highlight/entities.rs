//! HTML entity handling for notes and place names
//!
//! Decoding is tolerant: anything that is not a recognisable entity
//! (a bare `&`, an unknown name, an out-of-range code point) is kept as is.

use quick_xml::escape::{partial_escape, resolve_predefined_entity};
use std::borrow::Cow;

/// Longest entity body we try to resolve (`&#x10FFFF;` fits comfortably)
const MAX_ENTITY_LEN: usize = 32;

/// Replace `&name;`, `&#NN;` and `&#xNN;` with the characters they stand for
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];

        let resolved = tail
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_ENTITY_LEN)
            .and_then(|end| resolve_entity(&tail[..end]).map(|text| (text, end)));

        match resolved {
            Some((text, end)) => {
                out.push_str(&text);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

fn resolve_entity(body: &str) -> Option<Cow<'static, str>> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code)
            .filter(|c| *c != '\0')
            .map(|c| Cow::Owned(c.to_string()));
    }

    match body {
        "nbsp" => Some(Cow::Borrowed("\u{a0}")),
        _ => resolve_predefined_entity(body).map(Cow::Borrowed),
    }
}

/// Escape `<`, `>` and `&` for inclusion in HTML text
pub fn escape_text(text: &str) -> Cow<'_, str> {
    partial_escape(text)
}
