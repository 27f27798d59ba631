use serde::{Serialize, Serializer};

use crate::token::TokenType;

/// A grammar violation recorded by the parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Syntax error at line {line}: Expected token {expected}, got {found}")]
    Syntax {
        line: usize,
        expected: TokenType,
        found: TokenType,
    },

    /// Object/list nesting went past the configured ceiling.
    #[error("Syntax error at line {line}: Nesting depth exceeds limit of {limit}")]
    TooDeep { line: usize, limit: usize },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { line, .. } | ParseError::TooDeep { line, .. } => *line,
        }
    }
}

impl Serialize for ParseError {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// Append-only, ordered list of diagnostics for one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorLog {
    entries: Vec<ParseError>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: ParseError) {
        log::debug!("{}", err);
        self.entries.push(err);
    }

    /// The diagnostic consumers show.
    pub fn first(&self) -> Option<&ParseError> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a ErrorLog {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
