//! In-memory document model for HCL configuration files.
//!
//! A [`Document`] is an ordered list of [`Element`]s, each either a [`Block`]
//! or an [`Attribute`]. Attribute values are kept as unevaluated
//! [`Expression`] fragments so references to other declarations survive a
//! merge untouched.

use std::fmt;
use std::path::Path;

use hcl_edit::parser;
use hcl_edit::structure::{self, BlockLabel, Structure};
use hcl_edit::Decorate;
use log::debug;

use crate::error::{Error, Result};

/// Separator used when joining block labels into an identity key.
const LABEL_SEPARATOR: &str = "_";

/// An attribute value exactly as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression(String);

impl Expression {
    /// Parses `source` as a single HCL expression and keeps its text.
    #[cfg(test)]
    pub(crate) fn parse(source: &str) -> Result<Self> {
        parser::parse_expr(source).map_err(|e| syntax_error("<expression>", &e))?;
        Ok(Self(source.trim().to_string()))
    }

    /// Source text of the expression.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_edit(expr: &hcl_edit::expr::Expression) -> Self {
        Self(expr.to_string().trim().to_string())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Comments attached to an attribute or a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments {
    /// Comment lines above the declaration, trimmed
    pub leading: Vec<String>,
    /// Comment on the same line, after the declaration
    pub trailing: Option<String>,
}

impl Comments {
    fn from_decor(node: &impl Decorate) -> Self {
        let decor = node.decor();
        let leading = decor
            .prefix()
            .map(|raw| comment_lines(raw))
            .unwrap_or_default();
        let trailing = decor.suffix().and_then(|raw| {
            let text: &str = raw;
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        });
        Self { leading, trailing }
    }

    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_none()
    }

    /// Adds the comments of a declaration patching this one. Leading lines
    /// not already present are appended; a trailing comment replaces ours.
    pub fn absorb(&mut self, other: Comments) {
        for line in other.leading {
            if !self.leading.contains(&line) {
                self.leading.push(line);
            }
        }
        if other.trailing.is_some() {
            self.trailing = other.trailing;
        }
    }
}

/// A named field holding an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub expr: Expression,
    pub comments: Comments,
}

impl Attribute {
    pub fn new(name: impl Into<String>, expr: Expression) -> Self {
        Self {
            name: name.into(),
            expr,
            comments: Comments::default(),
        }
    }

    /// Takes the value of `overlay`, keeping comments from both sides.
    pub fn patch(&mut self, overlay: Attribute) {
        self.expr = overlay.expr;
        self.comments.absorb(overlay.comments);
    }
}

/// A typed, optionally labeled declaration with its own body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub ident: String,
    pub labels: Vec<String>,
    pub body: Document,
    pub comments: Comments,
}

impl Block {
    pub fn new(ident: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            ident: ident.into(),
            labels,
            body: Document::new(),
            comments: Comments::default(),
        }
    }

    /// Labels joined into a single display key. Declarations are matched on
    /// the label list itself, since different label lists can join to the
    /// same string.
    pub fn identity_key(&self) -> String {
        self.labels.join(LABEL_SEPARATOR)
    }
}

/// One entry of a [`Document`] body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Attribute(Attribute),
    Block(Block),
}

/// Ordered body of a file or of a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses HCL source into a document.
    ///
    /// # Arguments
    /// * `source` - HCL text
    /// * `file_name` - Name reported in syntax errors
    ///
    /// # Errors
    /// * `Error::SyntaxError` carrying the location of the first diagnostic
    pub fn parse(source: &str, file_name: &str) -> Result<Self> {
        let body = parser::parse_body(source).map_err(|e| syntax_error(file_name, &e))?;
        debug!("Parsed '{}' ({} top-level structures)", file_name, body.iter().count());
        Ok(Self::from_body(&body))
    }

    /// Reads and parses the file at `path`.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(Error::IoError)?;
        Self::parse(&source, &path.display().to_string())
    }

    fn from_body(body: &structure::Body) -> Self {
        let elements = body
            .iter()
            .map(|structure| match structure {
                Structure::Attribute(attr) => Element::Attribute(Attribute {
                    name: attr.key.as_str().to_string(),
                    expr: Expression::from_edit(&attr.value),
                    comments: Comments::from_decor(attr),
                }),
                Structure::Block(block) => Element::Block(Block {
                    ident: block.ident.as_str().to_string(),
                    labels: block.labels.iter().map(label_value).collect(),
                    body: Self::from_body(&block.body),
                    comments: Comments::from_decor(block),
                }),
            })
            .collect();
        Self { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push_block(&mut self, block: Block) {
        self.elements.push(Element::Block(block));
    }

    /// Sets an attribute, patching an existing one with the same name in
    /// place.
    pub fn set_attribute(&mut self, attr: Attribute) {
        let existing = self.elements.iter_mut().find_map(|element| match element {
            Element::Attribute(current) if current.name == attr.name => Some(current),
            _ => None,
        });
        match existing {
            Some(current) => current.patch(attr),
            None => self.elements.push(Element::Attribute(attr)),
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.elements.iter().filter_map(|element| match element {
            Element::Attribute(attr) => Some(attr),
            Element::Block(_) => None,
        })
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.elements.iter().filter_map(|element| match element {
            Element::Block(block) => Some(block),
            Element::Attribute(_) => None,
        })
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes().find(|attr| attr.name == name)
    }

    /// Removes every top-level block, leaving attributes in place.
    pub fn take_blocks(&mut self) -> Vec<Block> {
        let (blocks, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.elements)
            .into_iter()
            .partition(|element| matches!(element, Element::Block(_)));
        self.elements = rest;
        blocks
            .into_iter()
            .filter_map(|element| match element {
                Element::Block(block) => Some(block),
                Element::Attribute(_) => None,
            })
            .collect()
    }

    /// Splits the document into its attributes and its blocks, each in
    /// original order.
    pub fn into_parts(self) -> (Vec<Attribute>, Vec<Block>) {
        let mut attributes = Vec::new();
        let mut blocks = Vec::new();
        for element in self.elements {
            match element {
                Element::Attribute(attr) => attributes.push(attr),
                Element::Block(block) => blocks.push(block),
            }
        }
        (attributes, blocks)
    }
}

/// Comment lines of a decor prefix. The prefix holds only whitespace and
/// comments, so every non-blank line is kept.
fn comment_lines(prefix: &str) -> Vec<String> {
    prefix
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn label_value(label: &BlockLabel) -> String {
    match label {
        BlockLabel::Ident(ident) => ident.as_str().to_string(),
        BlockLabel::String(value) => value.as_str().to_string(),
    }
}

fn syntax_error(file: &str, err: &parser::Error) -> Error {
    let location = err.location();
    Error::SyntaxError {
        file: file.to_string(),
        line: location.line(),
        column: location.column(),
        message: err.message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blocks_and_attributes() {
        let doc = Document::parse(
            r#"
top = "level"

resource "aws_s3_bucket" "foo" {
  bucket = "foo"

  versioning {
    enabled = true
  }
}
"#,
            "main.tf",
        )
        .unwrap();

        assert_eq!(doc.attributes().count(), 1);
        let block = doc.blocks().next().unwrap();
        assert_eq!(block.ident, "resource");
        assert_eq!(block.labels, vec!["aws_s3_bucket", "foo"]);
        assert_eq!(block.identity_key(), "aws_s3_bucket_foo");
        assert_eq!(
            block.body.get_attribute("bucket").unwrap().expr.as_str(),
            "\"foo\""
        );
        assert_eq!(block.body.blocks().next().unwrap().ident, "versioning");
    }

    #[test]
    fn test_expressions_are_kept_verbatim() {
        let doc = Document::parse(
            r#"output "id" {
  value = aws_instance.web.id
  list  = concat(var.a, ["b"])
}
"#,
            "outputs.tf",
        )
        .unwrap();
        let body = &doc.blocks().next().unwrap().body;

        assert_eq!(body.get_attribute("value").unwrap().expr.as_str(), "aws_instance.web.id");
        assert_eq!(
            body.get_attribute("list").unwrap().expr.as_str(),
            "concat(var.a, [\"b\"])"
        );
    }

    #[test]
    fn test_parse_error_has_location() {
        let err = Document::parse("resource \"a\" {\n  foo = \n", "broken.tf").unwrap_err();
        match err {
            Error::SyntaxError { file, line, .. } => {
                assert_eq!(file, "broken.tf");
                assert!(line >= 2);
            }
            other => panic!("Expected SyntaxError, got {other:?}"),
        }
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut doc = Document::new();
        doc.set_attribute(Attribute::new("a", Expression::parse("1").unwrap()));
        doc.set_attribute(Attribute::new("b", Expression::parse("2").unwrap()));
        doc.set_attribute(Attribute::new("a", Expression::parse("3").unwrap()));

        let names: Vec<_> = doc.attributes().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(doc.get_attribute("a").unwrap().expr.as_str(), "3");
    }

    #[test]
    fn test_comments_are_kept() {
        let doc = Document::parse(
            r#"# header
resource "aws_s3_bucket" "b" {
  # tfsec:ignore:aws-s3-enable-versioning
  // second line
  x = 1 # trailing
  y = 2
}
"#,
            "commented.tf",
        )
        .unwrap();
        let block = doc.blocks().next().unwrap();

        assert_eq!(block.comments.leading, vec!["# header"]);
        let x = block.body.get_attribute("x").unwrap();
        assert_eq!(x.expr.as_str(), "1");
        assert_eq!(
            x.comments.leading,
            vec!["# tfsec:ignore:aws-s3-enable-versioning", "// second line"]
        );
        assert_eq!(x.comments.trailing.as_deref(), Some("# trailing"));
        assert!(block.body.get_attribute("y").unwrap().comments.is_empty());
    }

    #[test]
    fn test_patch_keeps_comments() {
        let mut attr = Attribute::new("a", Expression::parse("1").unwrap());
        attr.comments.leading.push("# checkov:skip=CKV_AWS_1".to_string());
        let mut overlay = Attribute::new("a", Expression::parse("2").unwrap());
        overlay.comments.leading.push("# checkov:skip=CKV_AWS_1".to_string());
        overlay.comments.trailing = Some("# prod".to_string());

        attr.patch(overlay);

        assert_eq!(attr.expr.as_str(), "2");
        assert_eq!(attr.comments.leading, vec!["# checkov:skip=CKV_AWS_1"]);
        assert_eq!(attr.comments.trailing.as_deref(), Some("# prod"));
    }

    #[test]
    fn test_take_blocks_keeps_attributes() {
        let mut doc = Document::parse("a = 1\nlocals {\n  b = 2\n}\n", "x.tf").unwrap();
        let blocks = doc.take_blocks();

        assert_eq!(blocks.len(), 1);
        assert_eq!(doc.elements().len(), 1);
        assert!(doc.blocks().next().is_none());
    }
}
