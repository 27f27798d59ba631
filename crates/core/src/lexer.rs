//! Token record reader.
//!
//! Input is one record per line, shaped `<TYPE, VALUE>`. Records are already
//! tokenized upstream; this module only recovers [`Token`] values from them.
//! A record whose TYPE is not a known [`TokenType`] name is dropped without a
//! diagnostic.

use crate::token::{Token, TokenType};

/// Read every record in `src`. Line numbers are 1-based and count every
/// physical line, including the ones that were dropped.
pub fn lex(src: &str) -> Vec<Token> {
    src.lines()
        .enumerate()
        .filter_map(|(idx, text)| lex_record(text, idx + 1))
        .collect()
}

/// Read a single record.
///
/// Surrounding whitespace, leading `<` and trailing `>` are stripped and every
/// space is deleted before the record is split on its first comma, so commas
/// inside a string literal stay part of the value.
pub fn lex_record(text: &str, line: usize) -> Option<Token> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('<')
        .trim_end_matches('>')
        .chars()
        .filter(|c| *c != ' ')
        .collect();

    let (type_name, value) = match cleaned.split_once(',') {
        Some((t, v)) => (t, Some(v)),
        None => (cleaned.as_str(), None),
    };

    match type_name.parse::<TokenType>() {
        Ok(kind) => Some(Token::new(kind, value.map(str::to_owned), line)),
        Err(e) => {
            log::debug!("line {}: dropping record: {}", line, e);
            None
        }
    }
}
