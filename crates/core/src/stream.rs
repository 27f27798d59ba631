use crate::token::Token;

/// Ordered, read-once sequence of tokens.
///
/// The cursor only moves forward. Once the real tokens run out every call to
/// [`TokenStream::next_token`] yields an end-of-input token carrying the line
/// of the last real token.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
    last_line: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let last_line = tokens.last().map(Token::line).unwrap_or(0);
        TokenStream {
            tokens,
            pos: 0,
            last_line,
        }
    }

    pub fn next_token(&mut self) -> Token {
        match self.tokens.get(self.pos) {
            Some(tok) => {
                self.pos += 1;
                tok.clone()
            }
            None => Token::end_of_input(self.last_line),
        }
    }

    /// Number of real tokens not yet handed out.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        TokenStream::new(tokens)
    }
}
