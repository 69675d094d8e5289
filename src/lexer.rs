use crate::ast::{Op, Token};

/// Two-phase tokenizer: split the raw expression into pieces, then
/// classify each piece into a [`Token`].
///
/// Splitting captures its delimiters: whitespace separates pieces and is
/// dropped, while `(`, `)`, and a `!` that does not start `!=` become
/// pieces of their own. Everything else accumulates until the next
/// delimiter, so a quoted string containing a space splits apart. That is
/// the grammar, not a bug; quoted literals with spaces were never legal
/// input.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Phase one: split into raw pieces. Infallible; empty pieces never
    /// survive, no matter how much whitespace the input carries.
    pub fn split(mut self) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut buffer = String::new();

        while let Some(ch) = self.current_char() {
            match ch {
                c if c.is_whitespace() => {
                    flush(&mut pieces, &mut buffer);
                    self.advance();
                }
                '(' => {
                    flush(&mut pieces, &mut buffer);
                    pieces.push("(".to_string());
                    self.advance();
                }
                ')' => {
                    flush(&mut pieces, &mut buffer);
                    pieces.push(")".to_string());
                    self.advance();
                }
                // A bare `!` is its own piece, but `!=` stays whole
                '!' if self.peek_char(1) != Some('=') => {
                    flush(&mut pieces, &mut buffer);
                    pieces.push("!".to_string());
                    self.advance();
                }
                _ => {
                    buffer.push(ch);
                    self.advance();
                }
            }
        }

        flush(&mut pieces, &mut buffer);
        pieces
    }
}

fn flush(pieces: &mut Vec<String>, buffer: &mut String) {
    let piece = buffer.trim();
    if !piece.is_empty() {
        pieces.push(piece.to_string());
    }
    buffer.clear();
}

/// Phase two: classify one raw piece. Rules are ordered; the first match
/// wins, and anything unrecognized falls through to `Identifier` for the
/// evaluator to resolve against the document.
fn classify(piece: &str) -> Token {
    if piece == "(" {
        return Token::OpenParen;
    }
    if piece == ")" {
        return Token::CloseParen;
    }
    if let Some(op) = Op::from_symbol(piece) {
        return Token::Operator(op);
    }

    match piece {
        "null" => return Token::Null,
        "undefined" => return Token::Undefined,
        "true" => return Token::Boolean(true),
        "false" => return Token::Boolean(false),
        _ => {}
    }

    if let Ok(n) = piece.parse::<i64>() {
        return Token::Integer(n);
    }

    if piece.len() >= 2 && piece.starts_with('\'') && piece.ends_with('\'') {
        // Strip every single quote, not just the wrapping pair. A literal
        // with an internal quote loses it silently.
        return Token::String(piece.chars().filter(|&c| c != '\'').collect());
    }

    Token::Identifier(piece.to_string())
}

/// Tokenize a raw expression string.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input)
        .split()
        .iter()
        .map(|piece| classify(piece))
        .collect()
}

#[test]
fn test_not_equal_is_one_token() {
    assert_eq!(
        tokenize("1 != 2"),
        vec![
            Token::Integer(1),
            Token::Operator(Op::NotEqual),
            Token::Integer(2),
        ]
    );
}

#[test]
fn test_bang_splits_without_space() {
    assert_eq!(
        tokenize("!ready"),
        vec![Token::Operator(Op::Not), Token::Identifier("ready".to_string())]
    );
}

#[test]
fn test_internal_quotes_are_stripped() {
    assert_eq!(tokenize("'a''b'"), vec![Token::String("ab".to_string())]);
}
