//! Recursive-descent parser over a [`TokenStream`].
//!
//! Grammar (LL(1)):
//!
//! ```text
//! object   → '{' [ contents ] '}'
//! contents → pair ( ',' pair )*
//! pair     → STRING ':' value
//! value    → STRING | NUMBER | TRUE | FALSE | NULL | object | list
//! list     → '[' [ items ] ']'
//! items    → value ( ',' value )*
//! ```
//!
//! Error recovery is panic mode: the first mismatch seen by the `expect` gate
//! is recorded and the lookahead is forced to end-of-input. Every rule checks
//! for end-of-input on entry, so the call stack unwinds normally and the tree
//! built so far is returned. At most one diagnostic is recorded per parse.
use crate::error::{ErrorLog, ParseError};
use crate::lexer;
use crate::stream::TokenStream;
use crate::token::{Token, TokenType};
use crate::tree::{Node, NodeKind};

/// Default ceiling on object/list nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest object/list nesting accepted before a diagnostic is recorded.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Result of one parse: whatever tree was built plus the diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Parse {
    pub tree: Option<Node>,
    pub errors: ErrorLog,
}

impl Parse {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Text form consumed by the batch driver: the tree, then a blank line
    /// and the first diagnostic when there is one.
    pub fn render(&self, indent: usize) -> String {
        let mut out = self
            .tree
            .as_ref()
            .map(|t| t.render(indent))
            .unwrap_or_default();
        if let Some(err) = self.errors.first() {
            out.push('\n');
            out.push_str(&err.to_string());
            out.push('\n');
        }
        out
    }
}

pub struct Parser {
    stream: TokenStream,
    lookahead: Token,
    errors: ErrorLog,
    config: ParserConfig,
    depth: usize,
    recovering: bool,
}

impl Parser {
    /// Bind a parser to `stream` and prime the lookahead with its first token.
    pub fn new(stream: impl Into<TokenStream>) -> Self {
        let mut stream = stream.into();
        let lookahead = stream.next_token();
        Parser {
            stream,
            lookahead,
            errors: ErrorLog::new(),
            config: ParserConfig::default(),
            depth: 0,
            recovering: false,
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse a single top-level object. An empty stream yields no tree and
    /// no diagnostics.
    pub fn parse(mut self) -> Parse {
        let tree = self.object();
        if self.stream.remaining() > 0 && !self.recovering {
            log::debug!(
                "{} token(s) left unread after the root object",
                self.stream.remaining()
            );
        }
        Parse {
            tree,
            errors: self.errors,
        }
    }

    // -- Token handling ----------------------------------------

    fn peek(&self) -> TokenType {
        self.lookahead.kind()
    }

    fn at_end(&self) -> bool {
        self.lookahead.is_end()
    }

    /// Consume the lookahead and fetch exactly one replacement.
    fn bump(&mut self) -> Token {
        let next = self.stream.next_token();
        let tok = std::mem::replace(&mut self.lookahead, next);
        log::trace!("consume {} at line {}", tok.kind(), tok.line());
        tok
    }

    /// The recovery gate.
    fn expect(&mut self, kind: TokenType) {
        if self.peek() == kind {
            self.bump();
        } else {
            self.fail(ParseError::Syntax {
                line: self.lookahead.line(),
                expected: kind,
                found: self.peek(),
            });
        }
    }

    /// Record `err` unless a diagnostic was already recorded, then stop.
    fn fail(&mut self, err: ParseError) {
        if !self.recovering {
            self.recovering = true;
            self.errors.push(err);
        }
        self.halt();
    }

    /// Force end-of-input without recording anything.
    fn halt(&mut self) {
        if !self.at_end() {
            log::trace!("halting at line {}", self.lookahead.line());
        }
        self.lookahead = Token::end_of_input(self.lookahead.line());
    }

    fn enter(&mut self) -> bool {
        if self.depth >= self.config.max_depth {
            self.fail(ParseError::TooDeep {
                line: self.lookahead.line(),
                limit: self.config.max_depth,
            });
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // -- Grammar rules -----------------------------------------

    fn object(&mut self) -> Option<Node> {
        if self.at_end() || !self.enter() {
            return None;
        }
        log::trace!("object at line {}", self.lookahead.line());
        self.expect(TokenType::LeftCurly);
        let mut children = Vec::new();
        if self.peek() != TokenType::RightCurly {
            children.extend(self.contents());
        }
        self.expect(TokenType::RightCurly);
        self.leave();
        Some(Node::with_children(NodeKind::Object, children))
    }

    fn contents(&mut self) -> Option<Node> {
        if self.at_end() {
            return None;
        }
        let mut pairs = Vec::new();
        pairs.extend(self.pair());
        while self.peek() == TokenType::Comma {
            self.bump();
            pairs.extend(self.pair());
        }
        Some(Node::with_children(NodeKind::Contents, pairs))
    }

    fn pair(&mut self) -> Option<Node> {
        if self.at_end() {
            return None;
        }
        // The label is taken before the key is checked, so a malformed key
        // still shows up in the partial tree.
        let key = self.lookahead.value().unwrap_or_default().to_owned();
        self.expect(TokenType::String);
        self.expect(TokenType::Colon);
        let children = self.value().into_iter().collect();
        Some(Node::with_children(NodeKind::Pair(key), children))
    }

    fn value(&mut self) -> Option<Node> {
        let kind = match self.peek() {
            TokenType::String => {
                let tok = self.bump();
                NodeKind::String(tok.value().unwrap_or_default().to_owned())
            }
            TokenType::Number => {
                let tok = self.bump();
                NodeKind::Number(tok.value().unwrap_or_default().to_owned())
            }
            TokenType::True => {
                self.bump();
                NodeKind::Boolean(true)
            }
            TokenType::False => {
                self.bump();
                NodeKind::Boolean(false)
            }
            TokenType::Null => {
                self.bump();
                NodeKind::Null
            }
            TokenType::LeftSquare => return self.list(),
            TokenType::LeftCurly => return self.object(),
            _ => {
                self.halt();
                return None;
            }
        };
        Some(Node::leaf(kind))
    }

    fn list(&mut self) -> Option<Node> {
        if self.at_end() || !self.enter() {
            return None;
        }
        log::trace!("list at line {}", self.lookahead.line());
        self.expect(TokenType::LeftSquare);
        let mut children = Vec::new();
        if self.peek() != TokenType::RightSquare {
            children.extend(self.items());
        }
        self.expect(TokenType::RightSquare);
        self.leave();
        Some(Node::with_children(NodeKind::List, children))
    }

    fn items(&mut self) -> Option<Node> {
        if self.at_end() {
            return None;
        }
        let mut values = Vec::new();
        values.extend(self.value());
        while self.peek() == TokenType::Comma {
            self.bump();
            values.extend(self.value());
        }
        Some(Node::with_children(NodeKind::Elements, values))
    }
}

pub fn parse_tokens(tokens: Vec<Token>) -> Parse {
    Parser::new(tokens).parse()
}

/// Read token records from `src` and parse them.
pub fn parse_records(src: &str) -> Parse {
    parse_tokens(lexer::lex(src))
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Build tokens one per line, starting at line 1.
    fn toks(spec: &[(TokenType, &str)]) -> Vec<Token> {
        spec.iter()
            .enumerate()
            .map(|(i, (kind, v))| Token::new(*kind, Some((*v).to_owned()), i + 1))
            .collect()
    }

    use crate::token::TokenType::*;

    #[test]
    fn empty_stream_yields_nothing() {
        let parse = parse_tokens(Vec::new());
        assert_eq!(parse.tree, None);
        assert!(parse.errors.is_empty());
        assert_eq!(parse.render(4), "");
    }

    #[test]
    fn empty_object() {
        let parse = parse_tokens(toks(&[(LeftCurly, "{"), (RightCurly, "}")]));
        assert!(parse.is_ok());
        assert_eq!(parse.tree.expect("tree").labels(), vec!["object:"]);
    }

    #[test]
    fn nested_list_and_object_follow_the_derivation() {
        init_logger();
        // {"a": [1, 2, {"b": true}]}
        let parse = parse_tokens(toks(&[
            (LeftCurly, "{"),
            (String, "\"a\""),
            (Colon, ":"),
            (LeftSquare, "["),
            (Number, "1"),
            (Comma, ","),
            (Number, "2"),
            (Comma, ","),
            (LeftCurly, "{"),
            (String, "\"b\""),
            (Colon, ":"),
            (True, "true"),
            (RightCurly, "}"),
            (RightSquare, "]"),
            (RightCurly, "}"),
        ]));
        assert!(parse.is_ok(), "unexpected errors: {:?}", parse.errors);
        let tree = parse.tree.expect("tree");
        assert_eq!(
            tree.labels(),
            vec![
                "object:",
                "Contents: ",
                "key: \"a\"",
                "List: ",
                "Elements: ",
                "Number: 1",
                "Number: 2",
                "object:",
                "Contents: ",
                "key: \"b\"",
                "Boolean: true",
            ]
        );
        let elements = &tree.children()[0].children()[0].children()[0].children()[0];
        assert_eq!(elements.kind(), &NodeKind::Elements);
        assert_eq!(elements.children().len(), 3);
    }

    #[test]
    fn every_scalar_kind_becomes_a_leaf() {
        let parse = parse_tokens(toks(&[
            (LeftCurly, "{"),
            (String, "\"k\""),
            (Colon, ":"),
            (LeftSquare, "["),
            (String, "\"s\""),
            (Comma, ","),
            (Number, "-3.5e2"),
            (Comma, ","),
            (True, "true"),
            (Comma, ","),
            (False, "false"),
            (Comma, ","),
            (Null, "null"),
            (Comma, ","),
            (LeftSquare, "["),
            (RightSquare, "]"),
            (RightSquare, "]"),
            (RightCurly, "}"),
        ]));
        assert!(parse.is_ok());
        let tree = parse.tree.expect("tree");
        let elements = &tree.children()[0].children()[0].children()[0].children()[0];
        let kinds: Vec<&NodeKind> = elements.children().iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![
                &NodeKind::String("\"s\"".into()),
                &NodeKind::Number("-3.5e2".into()),
                &NodeKind::Boolean(true),
                &NodeKind::Boolean(false),
                &NodeKind::Null,
                &NodeKind::List,
            ]
        );
    }

    #[test]
    fn multiple_pairs_share_one_contents_node() {
        let parse = parse_tokens(toks(&[
            (LeftCurly, "{"),
            (String, "\"a\""),
            (Colon, ":"),
            (Number, "1"),
            (Comma, ","),
            (String, "\"b\""),
            (Colon, ":"),
            (Null, "null"),
            (RightCurly, "}"),
        ]));
        assert!(parse.is_ok());
        let tree = parse.tree.expect("tree");
        assert_eq!(tree.children().len(), 1);
        assert_eq!(tree.children()[0].children().len(), 2);
    }

    #[test]
    fn missing_closing_brace_keeps_partial_tree() {
        let parse = parse_tokens(toks(&[
            (LeftCurly, "{"),
            (String, "\"a\""),
            (Colon, ":"),
            (String, "\"b\""),
        ]));
        let tree = parse.tree.as_ref().expect("partial tree");
        assert_eq!(
            tree.labels(),
            vec!["object:", "Contents: ", "key: \"a\"", "String: \"b\""]
        );
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(
            parse.errors.first(),
            Some(&ParseError::Syntax {
                line: 4,
                expected: RightCurly,
                found: EndOfInput,
            })
        );
        assert_eq!(
            parse.render(4),
            "object:\n    Contents: \n        key: \"a\"\n            String: \"b\"\n\n\
             Syntax error at line 4: Expected token RIGHTCURLY, got EOF\n"
        );
    }

    #[test]
    fn number_as_key_stops_at_the_error() {
        let parse = parse_tokens(toks(&[
            (LeftCurly, "{"),
            (String, "\"a\""),
            (Colon, ":"),
            (Number, "1"),
            (Comma, ","),
            (Number, "5"),
            (Colon, ":"),
            (Number, "2"),
            (Comma, ","),
            (String, "\"c\""),
            (Colon, ":"),
            (Number, "3"),
            (RightCurly, "}"),
        ]));
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(
            parse.errors.first().map(ToString::to_string).as_deref(),
            Some("Syntax error at line 6: Expected token STRING, got NUMBER")
        );
        let tree = parse.tree.expect("partial tree");
        let contents = &tree.children()[0];
        // The broken pair is kept without a value and nothing follows it.
        assert_eq!(contents.children().len(), 2);
        assert_eq!(contents.children()[1].kind(), &NodeKind::Pair("5".into()));
        assert!(contents.children()[1].children().is_empty());
    }

    #[test]
    fn wrong_root_token_records_a_single_error() {
        let parse = parse_tokens(toks(&[(LeftSquare, "["), (RightSquare, "]")]));
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(
            parse.errors.first(),
            Some(&ParseError::Syntax {
                line: 1,
                expected: LeftCurly,
                found: LeftSquare,
            })
        );
        assert_eq!(parse.tree.expect("root").labels(), vec!["object:"]);
    }

    #[test]
    fn missing_value_reports_the_closing_token() {
        // {"a": }
        let parse = parse_tokens(toks(&[
            (LeftCurly, "{"),
            (String, "\"a\""),
            (Colon, ":"),
            (RightCurly, "}"),
        ]));
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(
            parse.errors.first(),
            Some(&ParseError::Syntax {
                line: 4,
                expected: RightCurly,
                found: EndOfInput,
            })
        );
    }

    #[test]
    fn trailing_comma_in_list_is_an_error() {
        let parse = parse_tokens(toks(&[
            (LeftCurly, "{"),
            (String, "\"a\""),
            (Colon, ":"),
            (LeftSquare, "["),
            (Number, "1"),
            (Comma, ","),
            (RightSquare, "]"),
            (RightCurly, "}"),
        ]));
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(
            parse.errors.first().map(ToString::to_string).as_deref(),
            Some("Syntax error at line 7: Expected token RIGHTSQUARE, got EOF")
        );
        let tree = parse.tree.expect("partial tree");
        assert_eq!(tree.labels().last().map(|s| s.as_str()), Some("Number: 1"));
    }

    #[test]
    fn missing_colon_is_reported_once() {
        let parse = parse_tokens(toks(&[
            (LeftCurly, "{"),
            (String, "\"a\""),
            (Number, "1"),
            (RightCurly, "}"),
        ]));
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(
            parse.errors.first().map(ToString::to_string).as_deref(),
            Some("Syntax error at line 3: Expected token COLON, got NUMBER")
        );
    }

    #[test]
    fn unknown_records_are_elided_before_parsing() {
        let src = "<LEFTCURLY, {>\n<COMMENT, x>\n<STRING, \"a\">\n<COLON, :>\n\
                   <BOOL, true>\n<TRUE, true>\n<RIGHTCURLY, }>\n";
        let parse = parse_records(src);
        assert!(parse.is_ok());
        assert_eq!(
            parse.tree.expect("tree").labels(),
            vec!["object:", "Contents: ", "key: \"a\"", "Boolean: true"]
        );
    }

    #[test]
    fn depth_limit_records_one_diagnostic() {
        // {"a": [[[1]]]}
        let tokens = toks(&[
            (LeftCurly, "{"),
            (String, "\"a\""),
            (Colon, ":"),
            (LeftSquare, "["),
            (LeftSquare, "["),
            (LeftSquare, "["),
            (Number, "1"),
            (RightSquare, "]"),
            (RightSquare, "]"),
            (RightSquare, "]"),
            (RightCurly, "}"),
        ]);
        let parse = Parser::new(tokens.clone())
            .with_config(ParserConfig { max_depth: 3 })
            .parse();
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(
            parse.errors.first(),
            Some(&ParseError::TooDeep { line: 6, limit: 3 })
        );

        let parse = Parser::new(tokens)
            .with_config(ParserConfig { max_depth: 4 })
            .parse();
        assert!(parse.is_ok());
    }

    #[test]
    fn deep_nesting_within_default_limit_parses() {
        let mut tokens = vec![(LeftCurly, "{"), (String, "\"k\""), (Colon, ":")];
        for _ in 0..100 {
            tokens.push((LeftSquare, "["));
        }
        for _ in 0..100 {
            tokens.push((RightSquare, "]"));
        }
        tokens.push((RightCurly, "}"));
        let parse = parse_tokens(toks(&tokens));
        assert!(parse.is_ok(), "errors: {:?}", parse.errors);
    }

    #[test]
    fn parsers_run_independently_on_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let tokens = if i % 2 == 0 {
                    toks(&[(LeftCurly, "{"), (RightCurly, "}")])
                } else {
                    toks(&[(LeftCurly, "{"), (Number, "1")])
                };
                std::thread::spawn(move || Parser::new(tokens).parse())
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            let parse = h.join().expect("thread");
            assert_eq!(parse.is_ok(), i % 2 == 0);
        }
    }
}
