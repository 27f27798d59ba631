//! Concrete syntax tree produced by the parser.
//!
//! Every grammar rule that succeeds leaves one [`Node`] behind, including the
//! `Contents` and `Elements` scaffolding an abstract tree would drop. Nodes own
//! their children directly and are never modified once built.

use std::fmt;

use serde::{Serialize, Serializer};

/// Spaces per depth level used by [`Node`]'s `Display` impl.
pub const DEFAULT_INDENT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Contents,
    /// Object member; holds the key text as written in the token record.
    Pair(String),
    List,
    Elements,
    String(String),
    Number(String),
    Boolean(bool),
    Null,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Object => f.write_str("object:"),
            NodeKind::Contents => f.write_str("Contents: "),
            NodeKind::Pair(key) => write!(f, "key: {}", key),
            NodeKind::List => f.write_str("List: "),
            NodeKind::Elements => f.write_str("Elements: "),
            NodeKind::String(s) => write!(f, "String: {}", s),
            NodeKind::Number(n) => write!(f, "Number: {}", n),
            NodeKind::Boolean(b) => write!(f, "Boolean: {}", b),
            NodeKind::Null => f.write_str("Null: null"),
        }
    }
}

fn kind_label<S: Serializer>(kind: &NodeKind, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(kind)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    #[serde(rename = "label", serialize_with = "kind_label")]
    kind: NodeKind,
    children: Vec<Node>,
}

impl Node {
    pub fn leaf(kind: NodeKind) -> Self {
        Node {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Node { kind, children }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn label(&self) -> String {
        self.kind.to_string()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Labels in pre-order.
    pub fn labels(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_labels(&mut out);
        out
    }

    fn collect_labels(&self, out: &mut Vec<String>) {
        out.push(self.label());
        for child in &self.children {
            child.collect_labels(out);
        }
    }

    /// Render one node per line, pre-order, indented by `indent` spaces per level.
    pub fn render(&self, indent: usize) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out, indent);
        out
    }

    pub fn write_to<W: fmt::Write>(&self, out: &mut W, indent: usize) -> fmt::Result {
        self.write_at(out, indent, 0)
    }

    fn write_at<W: fmt::Write>(&self, out: &mut W, indent: usize, depth: usize) -> fmt::Result {
        writeln!(out, "{:width$}{}", "", self.kind, width = indent * depth)?;
        for child in &self.children {
            child.write_at(out, indent, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, DEFAULT_INDENT)
    }
}
