//! Token reading and recognition for the lexer.
//!
//! This module provides methods for reading every token kind from the
//! input: identifiers, keywords, numbers, strings, template strings, and
//! punctuators.

use super::Lexer;
use crate::token::{Span, Token, TokenKind};

impl<'a> Lexer<'a> {
    fn single_char_token(&mut self, kind: TokenKind, start: usize, line: usize, col: usize) -> Token {
        self.advance();
        Token::new(kind, Span::new(start, self.pos, line, col))
    }

    /// Reads and returns the next token from the input.
    ///
    /// Assumes that whitespace and comments have already been skipped by
    /// the caller; never fails. Malformed input produces an
    /// [`TokenKind::Error`] token and the cursor advances past the
    /// offending byte so scanning can continue.
    pub(super) fn scan_token(&mut self) -> Token {
        let c = match self.current_char() {
            Some(c) => c,
            None => return Token::new(TokenKind::Eof, Span::new(self.pos, self.pos, self.line, self.column)),
        };

        let start = self.pos;
        let line = self.line;
        let col = self.column;

        if c == '\n' {
            return self.single_char_token(TokenKind::Newline, start, line, col);
        }
        if c.is_ascii_digit() {
            return self.read_number(start, line, col);
        }
        if c == '"' {
            return self.read_string(start, line, col);
        }
        if c == '`' {
            return self.read_template_string(start, line, col);
        }
        if c.is_ascii_alphabetic() || c == '_' {
            return self.read_identifier(start, line, col);
        }
        if let Some(token) = self.read_punctuator(c, start, line, col) {
            return token;
        }

        self.advance();
        let span = Span::new(start, self.pos, line, col);
        Token::new(TokenKind::Error("unexpected character"), span)
    }

    fn read_punctuator(&mut self, c: char, start: usize, line: usize, col: usize) -> Option<Token> {
        macro_rules! one {
            ($kind:expr) => {
                Some(self.single_char_token($kind, start, line, col))
            };
        }
        macro_rules! two_or_one {
            ($second:expr, $two_kind:expr, $one_kind:expr) => {{
                self.advance();
                if self.current_char() == Some($second) {
                    self.advance();
                    Some(Token::new($two_kind, Span::new(start, self.pos, line, col)))
                } else {
                    Some(Token::new($one_kind, Span::new(start, self.pos, line, col)))
                }
            }};
        }

        match c {
            '(' => one!(TokenKind::LeftParen),
            ')' => one!(TokenKind::RightParen),
            '{' => one!(TokenKind::LeftBrace),
            '}' => one!(TokenKind::RightBrace),
            '[' => one!(TokenKind::LeftBracket),
            ']' => one!(TokenKind::RightBracket),
            ',' => one!(TokenKind::Comma),
            ';' => one!(TokenKind::Semicolon),
            ':' => one!(TokenKind::Colon),
            '?' => one!(TokenKind::Question),
            '%' => one!(TokenKind::Percent),
            '*' => two_or_one!('=', TokenKind::StarEquals, TokenKind::Star),
            '/' => two_or_one!('=', TokenKind::SlashEquals, TokenKind::Slash),
            '=' => two_or_one!('=', TokenKind::EqualEqual, TokenKind::Equals),
            '!' => two_or_one!('=', TokenKind::BangEqual, TokenKind::Bang),
            '<' => two_or_one!('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => two_or_one!('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '.' => two_or_one!('.', TokenKind::DotDot, TokenKind::Dot),
            '+' => two_or_one!('=', TokenKind::PlusEquals, TokenKind::Plus),
            '-' => {
                self.advance();
                match self.current_char() {
                    Some('=') => {
                        self.advance();
                        Some(Token::new(TokenKind::MinusEquals, Span::new(start, self.pos, line, col)))
                    }
                    Some('>') => {
                        self.advance();
                        Some(Token::new(TokenKind::Arrow, Span::new(start, self.pos, line, col)))
                    }
                    _ => Some(Token::new(TokenKind::Minus, Span::new(start, self.pos, line, col))),
                }
            }
            '&' => {
                self.advance();
                if self.current_char() == Some('&') {
                    self.advance();
                    Some(Token::new(TokenKind::AndAnd, Span::new(start, self.pos, line, col)))
                } else {
                    Some(Token::new(
                        TokenKind::Error("'&' is not a valid token on its own, expected '&&'"),
                        Span::new(start, self.pos, line, col),
                    ))
                }
            }
            '|' => {
                self.advance();
                if self.current_char() == Some('|') {
                    self.advance();
                    Some(Token::new(TokenKind::OrOr, Span::new(start, self.pos, line, col)))
                } else {
                    Some(Token::new(
                        TokenKind::Error("'|' is not a valid token on its own, expected '||'"),
                        Span::new(start, self.pos, line, col),
                    ))
                }
            }
            '$' => {
                self.advance();
                if self.current_char() == Some('{') {
                    self.advance();
                    Some(Token::new(TokenKind::DollarLeftBrace, Span::new(start, self.pos, line, col)))
                } else {
                    Some(Token::new(
                        TokenKind::Error("'$' is only valid as part of '${' inside a template string"),
                        Span::new(start, self.pos, line, col),
                    ))
                }
            }
            _ => None,
        }
    }

    /// Reads an identifier, matching it against the keyword and reserved
    /// type name tables.
    fn read_identifier(&mut self, start: usize, line: usize, col: usize) -> Token {
        while let Some(c) = self.current_char() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.input[start..self.pos];
        let span = Span::new(start, self.pos, line, col);
        let kind = match text {
            "func" => TokenKind::Func,
            "let" => TokenKind::Let,
            "const" => TokenKind::Const,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "while" => TokenKind::While,
            "in" => TokenKind::In,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            "type" => TokenKind::Type,
            "import" => TokenKind::Import,
            "export" => TokenKind::Export,
            "async" => TokenKind::Async,
            "await" => TokenKind::Await,
            "throw" => TokenKind::Throw,
            "catch" => TokenKind::Catch,
            "try" => TokenKind::Try,
            "switch" => TokenKind::Switch,
            "case" => TokenKind::Case,
            "default" => TokenKind::Default,
            "is" => TokenKind::Is,
            "i32" => TokenKind::I32,
            "f64" => TokenKind::F64,
            "string" => TokenKind::StringType,
            "bool" => TokenKind::Bool,
            "void" => TokenKind::Void,
            _ => TokenKind::Identifier(text.to_string()),
        };
        Token::new(kind, span)
    }

    /// Reads a numeric literal: a run of digits with an optional `.`
    /// fraction. No exponents, hex, or sign.
    fn read_number(&mut self, start: usize, line: usize, col: usize) -> Token {
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let has_fraction =
            self.current_char() == Some('.') && self.peek_char().is_some_and(|c| c.is_ascii_digit());
        if has_fraction {
            self.advance();
            while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[start..self.pos];
        let span = Span::new(start, self.pos, line, col);
        match text.parse::<f64>() {
            Ok(value) => Token::new(TokenKind::Number(value), span),
            Err(_) => Token::new(TokenKind::Error("malformed numeric literal"), span),
        }
    }

    /// Reads a plain double-quoted string.
    ///
    /// A backslash consumes the next byte verbatim: escape sequences are
    /// not interpreted here, so `\n` in source stays as two characters in
    /// the token's value.
    fn read_string(&mut self, start: usize, line: usize, col: usize) -> Token {
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.current_char() {
                Some('"') => {
                    self.advance();
                    return Token::new(TokenKind::String(value), Span::new(start, self.pos, line, col));
                }
                Some('\\') => {
                    self.advance();
                    if let Some(c) = self.current_char() {
                        value.push('\\');
                        value.push(c);
                        self.advance();
                    }
                }
                Some('\n') | None => {
                    return Token::new(
                        TokenKind::Error("unterminated string literal"),
                        Span::new(start, self.pos, line, col),
                    );
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
    }

    /// Reads a backtick template string chunk.
    ///
    /// Stops either at the closing backtick (the chunk is the whole,
    /// non-interpolated content) or at `${` (the chunk is the text before
    /// it; a [`TokenKind::DollarLeftBrace`] token is queued to follow, and
    /// ordinary tokenization resumes after that).
    fn read_template_string(&mut self, start: usize, line: usize, col: usize) -> Token {
        self.advance(); // opening backtick
        let mut value = String::new();
        loop {
            match self.current_char() {
                Some('`') => {
                    self.advance();
                    let span = Span::new(start, self.pos, line, col);
                    return Token::new(
                        TokenKind::TemplateStringChunk { text: value, terminated: true },
                        span,
                    );
                }
                Some('$') if self.peek_char() == Some('{') => {
                    let chunk_end = self.pos;
                    self.advance();
                    self.advance();
                    let span = Span::new(start, self.pos, line, col);
                    self.pending = Some(Token::new(TokenKind::DollarLeftBrace, span));
                    let chunk_span = Span::new(start, chunk_end, line, col);
                    return Token::new(
                        TokenKind::TemplateStringChunk { text: value, terminated: false },
                        chunk_span,
                    );
                }
                Some('\\') => {
                    self.advance();
                    if let Some(c) = self.current_char() {
                        value.push('\\');
                        value.push(c);
                        self.advance();
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => {
                    return Token::new(
                        TokenKind::Error("unterminated template string"),
                        Span::new(start, self.pos, line, col),
                    );
                }
            }
        }
    }
}
