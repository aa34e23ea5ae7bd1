//! Message template parser using winnow.
//!
//! Recognises `{{name}}` placeholders, with optional inner whitespace and the
//! `{{- name}}` unescaped marker. Everything else is literal text, so parsing
//! never fails: an unterminated `{{` or a stray `}}` is kept as written.

use winnow::combinator::{alt, delimited, opt, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use super::ast::{Segment, Template};

/// Parse a message string into a template.
pub fn parse_template(input: &str) -> Template {
    let mut remaining = input;
    match template(&mut remaining) {
        Ok(t) if remaining.is_empty() => t,
        // Unreachable with the current grammar (every character is a valid
        // literal); keep the source intact if that ever changes.
        Ok(_) | Err(_) => Template::literal(input),
    }
}

/// Parse a complete template into segments.
fn template(input: &mut &str) -> ModalResult<Template> {
    let segments: Vec<Segment> = repeat(0.., segment).parse_next(input)?;
    Ok(Template {
        segments: merge_literals(segments),
    })
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other @ Segment::Placeholder { .. } => result.push(other),
        }
    }

    result
}

/// Parse a single segment (placeholder or literal character).
fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((placeholder, literal_char)).parse_next(input)
}

/// Parse a single literal character.
fn literal_char(input: &mut &str) -> ModalResult<Segment> {
    any.map(|c: char| Segment::Literal(c.to_string()))
        .parse_next(input)
}

/// Parse a placeholder: {{ name }} or {{- name }}
fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    delimited(("{{", ws, opt(('-', ws))), name, (ws, "}}"))
        .with_taken()
        .map(|(name, raw): (&str, &str)| Segment::Placeholder {
            name: name.to_string(),
            raw: raw.to_string(),
        })
        .parse_next(input)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

/// Parse a variable name.
fn name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_name_char).parse_next(input)
}

/// Check if a character can appear in a variable name. Names may use any
/// script; only whitespace and braces end them.
fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '{' | '}')
}
