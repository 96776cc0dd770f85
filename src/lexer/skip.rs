//! Whitespace and comment skipping for the lexer.
//!
//! Newlines are not trivia here: Flint tokenizes them explicitly (see
//! [`super::Lexer::next_token`]), so this module only eats spaces, tabs,
//! carriage returns, and comments.

use super::Lexer;

impl<'a> Lexer<'a> {
    /// Skips whitespace (excluding newlines) and comments in a loop.
    pub(super) fn skip_trivia(&mut self) {
        loop {
            self.skip_inline_whitespace();
            if self.skip_line_comment() || self.skip_block_comment() {
                continue;
            }
            break;
        }
    }

    fn skip_inline_whitespace(&mut self) {
        while let Some(c) = self.current_char() {
            if c == '\n' || !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    /// Skips a `//` comment running to the end of the line, if present.
    fn skip_line_comment(&mut self) -> bool {
        if self.current_char() == Some('/') && self.peek_char() == Some('/') {
            while let Some(c) = self.current_char() {
                if c == '\n' {
                    break;
                }
                self.advance();
            }
            true
        } else {
            false
        }
    }

    /// Skips a `/* ... */` comment, if present.
    ///
    /// An unterminated block comment silently closes at end of file rather
    /// than producing an error token: there is no further text it could
    /// swallow, so treating it as an error would add nothing.
    fn skip_block_comment(&mut self) -> bool {
        if self.current_char() == Some('/') && self.peek_char() == Some('*') {
            self.advance();
            self.advance();
            loop {
                match self.current_char() {
                    None => break,
                    Some('*') if self.peek_char() == Some('/') => {
                        self.advance();
                        self.advance();
                        break;
                    }
                    Some(_) => self.advance(),
                }
            }
            true
        } else {
            false
        }
    }
}
