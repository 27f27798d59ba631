use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Closed set of token kinds accepted by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    String,
    Number,
    False,
    True,
    Null,
    LeftCurly,
    RightCurly,
    LeftSquare,
    RightSquare,
    Comma,
    Colon,
    EndOfInput,
}

impl TokenType {
    pub const ALL: [TokenType; 12] = [
        TokenType::String,
        TokenType::Number,
        TokenType::False,
        TokenType::True,
        TokenType::Null,
        TokenType::LeftCurly,
        TokenType::RightCurly,
        TokenType::LeftSquare,
        TokenType::RightSquare,
        TokenType::Comma,
        TokenType::Colon,
        TokenType::EndOfInput,
    ];

    /// Name used in token records and diagnostics.
    pub fn record_name(self) -> &'static str {
        match self {
            TokenType::String => "STRING",
            TokenType::Number => "NUMBER",
            TokenType::False => "FALSE",
            TokenType::True => "TRUE",
            TokenType::Null => "NULL",
            TokenType::LeftCurly => "LEFTCURLY",
            TokenType::RightCurly => "RIGHTCURLY",
            TokenType::LeftSquare => "LEFTSQUARE",
            TokenType::RightSquare => "RIGHTSQUARE",
            TokenType::Comma => "COMMA",
            TokenType::Colon => "COLON",
            TokenType::EndOfInput => "EOF",
        }
    }

    /// Only string and number tokens carry a literal.
    pub fn carries_value(self) -> bool {
        matches!(self, TokenType::String | TokenType::Number)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record_name())
    }
}

/// Returned when a record name is not one of the [`TokenType`] names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token type '{0}'")]
pub struct UnknownTokenType(pub String);

impl FromStr for TokenType {
    type Err = UnknownTokenType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenType::ALL
            .into_iter()
            .find(|t| t.record_name() == s)
            .ok_or_else(|| UnknownTokenType(s.to_owned()))
    }
}

/// A single pre-extracted token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    kind: TokenType,
    value: Option<String>,
    line: usize,
}

impl Token {
    /// Build a token. The value is dropped for kinds that carry no literal.
    pub fn new(kind: TokenType, value: Option<String>, line: usize) -> Self {
        let value = if kind.carries_value() { value } else { None };
        Token { kind, value, line }
    }

    pub fn end_of_input(line: usize) -> Self {
        Token::new(TokenType::EndOfInput, None, line)
    }

    pub fn kind(&self) -> TokenType {
        self.kind
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Source line of the record, used only for diagnostics.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenType::EndOfInput
    }
}
