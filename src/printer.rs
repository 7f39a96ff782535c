//! Rendering of documents back to HCL text.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::{Attribute, Block, Comments, Document, Element};

const INDENT: &str = "  ";

static BLANK_LINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank line pattern is valid"));

/// Renders a document in canonical layout.
///
/// Attribute expressions are written exactly as they were parsed. Runs of
/// blank lines are collapsed to one and the text ends with a single newline,
/// unless the document is empty.
pub fn render(document: &Document) -> String {
    let mut out = String::new();
    write_body(&mut out, document, 0);
    collapse_blank_lines(&out)
}

/// Collapses runs of two or more blank lines into exactly one.
pub fn collapse_blank_lines(text: &str) -> String {
    let collapsed = BLANK_LINE_RUNS.replace_all(text, "\n\n");
    let trimmed = collapsed.trim_matches('\n');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}\n", trimmed)
    }
}

fn write_body(out: &mut String, body: &Document, depth: usize) {
    let elements = body.elements();
    let mut index = 0;

    while index < elements.len() {
        if index > 0 {
            out.push('\n');
        }
        match &elements[index] {
            Element::Attribute(_) => {
                let run: Vec<&Attribute> = elements[index..]
                    .iter()
                    .map_while(|element| match element {
                        Element::Attribute(attr) => Some(attr),
                        Element::Block(_) => None,
                    })
                    .collect();
                write_attributes(out, &run, depth);
                index += run.len();
            }
            Element::Block(block) => {
                write_block(out, block, depth);
                index += 1;
            }
        }
    }
}

fn write_attributes(out: &mut String, run: &[&Attribute], depth: usize) {
    // `{:<width$}` pads by characters, not bytes.
    let width = run
        .iter()
        .map(|attr| attr.name.chars().count())
        .max()
        .unwrap_or(0);
    for attr in run {
        write_leading_comments(out, &attr.comments, depth);
        write_indent(out, depth);
        out.push_str(&format!("{:<width$} = {}", attr.name, attr.expr, width = width));
        write_trailing_comment(out, &attr.comments);
    }
}

fn write_block(out: &mut String, block: &Block, depth: usize) {
    write_leading_comments(out, &block.comments, depth);
    write_indent(out, depth);
    out.push_str(&block.ident);
    for label in &block.labels {
        out.push_str(" \"");
        out.push_str(&escape_label(label));
        out.push('"');
    }

    if block.body.is_empty() {
        out.push_str(" {}");
    } else {
        out.push_str(" {\n");
        write_body(out, &block.body, depth + 1);
        write_indent(out, depth);
        out.push('}');
    }
    write_trailing_comment(out, &block.comments);
}

fn write_leading_comments(out: &mut String, comments: &Comments, depth: usize) {
    for line in &comments.leading {
        write_indent(out, depth);
        out.push_str(line);
        out.push('\n');
    }
}

/// Ends the current line, with the trailing comment if there is one.
fn write_trailing_comment(out: &mut String, comments: &Comments) {
    if let Some(trailing) = &comments.trailing {
        out.push(' ');
        out.push_str(trailing);
    }
    out.push('\n');
}

fn write_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn escape_label(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}
