//! Tokenizer for `.proto` source text

use crate::error::{SchemaError, SchemaResult};

/// A lexical token kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Identifier, dotted name, keyword or numeric literal
    Word(String),
    /// String literal with its quotes removed (escapes left as written)
    Str(String),
    /// Any other single character
    Punct(char),
}

/// A token with the 1-based line it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    pub fn word(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(w) => Some(w),
            _ => None,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Split `text` into tokens, dropping whitespace and comments.
pub(crate) fn tokenize(file: &str, text: &str) -> SchemaResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            c if c.is_whitespace() => {}
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        line += 1;
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                let start = line;
                chars.next();
                let mut prev = '\0';
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '\n' {
                        line += 1;
                    }
                    if prev == '*' && c == '/' {
                        closed = true;
                        break;
                    }
                    prev = c;
                }
                if !closed {
                    return Err(SchemaError::syntax(file, start, "unterminated block comment"));
                }
            }
            '"' | '\'' => {
                let start = line;
                let mut value = String::new();
                let mut closed = false;
                while let Some(s) = chars.next() {
                    match s {
                        '\\' => {
                            value.push(s);
                            if let Some(escaped) = chars.next() {
                                value.push(escaped);
                            }
                        }
                        '\n' => break,
                        s if s == c => {
                            closed = true;
                            break;
                        }
                        s => value.push(s),
                    }
                }
                if !closed {
                    return Err(SchemaError::syntax(file, start, "unterminated string literal"));
                }
                tokens.push(Token {
                    kind: TokenKind::Str(value),
                    line: start,
                });
            }
            c if is_word_char(c) => {
                let mut word = String::from(c);
                while let Some(&next) = chars.peek() {
                    if !is_word_char(next) {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                tokens.push(Token {
                    kind: TokenKind::Word(word),
                    line,
                });
            }
            c => tokens.push(Token {
                kind: TokenKind::Punct(c),
                line,
            }),
        }
    }

    Ok(tokens)
}
