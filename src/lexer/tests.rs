use super::*;

fn kinds(src: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(src);
    let mut out = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = matches!(token.kind, TokenKind::Eof);
        out.push(token.kind);
        if done {
            break;
        }
    }
    out
}

#[test]
fn test_empty_input_is_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn test_eof_is_idempotent() {
    let mut lexer = Lexer::new("");
    assert!(matches!(lexer.next_token().kind, TokenKind::Eof));
    assert!(matches!(lexer.next_token().kind, TokenKind::Eof));
    assert!(matches!(lexer.next_token().kind, TokenKind::Eof));
}

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("func let const return if else for while in"),
        vec![
            TokenKind::Func,
            TokenKind::Let,
            TokenKind::Const,
            TokenKind::Return,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::For,
            TokenKind::While,
            TokenKind::In,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_reserved_type_names() {
    assert_eq!(
        kinds("i32 f64 string bool void"),
        vec![
            TokenKind::I32,
            TokenKind::F64,
            TokenKind::StringType,
            TokenKind::Bool,
            TokenKind::Void,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_identifier() {
    assert_eq!(
        kinds("add_two"),
        vec![TokenKind::Identifier("add_two".to_string()), TokenKind::Eof]
    );
}

#[test]
fn test_integer_and_float_numbers() {
    assert_eq!(
        kinds("42 3.5"),
        vec![TokenKind::Number(42.0), TokenKind::Number(3.5), TokenKind::Eof]
    );
}

#[test]
fn test_number_without_fraction_digit_stops_before_dot() {
    // `1.` is not a valid fraction (no digit after the dot), so the dot is
    // its own token.
    assert_eq!(
        kinds("1."),
        vec![TokenKind::Number(1.0), TokenKind::Dot, TokenKind::Eof]
    );
}

#[test]
fn test_string_literal_raw_backslash() {
    let mut lexer = Lexer::new(r#""a\nb""#);
    let token = lexer.next_token();
    assert!(matches!(token.kind, TokenKind::String(ref s) if s == "a\\nb"));
}

#[test]
fn test_unterminated_string_is_error() {
    let mut lexer = Lexer::new("\"abc");
    let token = lexer.next_token();
    assert!(token.kind.is_error());
}

#[test]
fn test_minus_disambiguation() {
    assert_eq!(
        kinds("- -> -="),
        vec![
            TokenKind::Minus,
            TokenKind::Arrow,
            TokenKind::MinusEquals,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_compound_operators() {
    assert_eq!(
        kinds("== != <= >= && || += -= *= /="),
        vec![
            TokenKind::EqualEqual,
            TokenKind::BangEqual,
            TokenKind::LessEqual,
            TokenKind::GreaterEqual,
            TokenKind::AndAnd,
            TokenKind::OrOr,
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lone_ampersand_and_pipe_are_errors() {
    let mut lexer = Lexer::new("&");
    assert!(lexer.next_token().kind.is_error());

    let mut lexer = Lexer::new("|");
    assert!(lexer.next_token().kind.is_error());
}

#[test]
fn test_line_comment_is_skipped() {
    assert_eq!(
        kinds("// hi\nfunc"),
        vec![TokenKind::Newline, TokenKind::Func, TokenKind::Eof]
    );
}

#[test]
fn test_block_comment_is_skipped() {
    assert_eq!(kinds("/* hi */func"), vec![TokenKind::Func, TokenKind::Eof]);
}

#[test]
fn test_unterminated_block_comment_closes_silently_at_eof() {
    assert_eq!(kinds("/* never closes"), vec![TokenKind::Eof]);
}

#[test]
fn test_newline_is_tokenized() {
    assert_eq!(
        kinds("let\nreturn"),
        vec![TokenKind::Let, TokenKind::Newline, TokenKind::Return, TokenKind::Eof]
    );
}

#[test]
fn test_template_string_without_interpolation() {
    let mut lexer = Lexer::new("`hello`");
    let token = lexer.next_token();
    assert!(matches!(
        token.kind,
        TokenKind::TemplateStringChunk { ref text, terminated: true } if text == "hello"
    ));
}

#[test]
fn test_template_string_with_interpolation() {
    let mut lexer = Lexer::new("`hi ${name}`");
    let chunk = lexer.next_token();
    assert!(matches!(
        chunk.kind,
        TokenKind::TemplateStringChunk { ref text, terminated: false } if text == "hi "
    ));
    let delim = lexer.next_token();
    assert!(matches!(delim.kind, TokenKind::DollarLeftBrace));
    let ident = lexer.next_token();
    assert!(matches!(ident.kind, TokenKind::Identifier(ref s) if s == "name"));
}

#[test]
fn test_spans_are_monotonic_and_in_bounds() {
    let src = "func add(a: i32) -> i32 {\n  return a;\n}";
    let mut lexer = Lexer::new(src);
    let mut end = 0;
    loop {
        let token = lexer.next_token();
        if matches!(token.kind, TokenKind::Eof) {
            break;
        }
        assert!(token.span.start >= end);
        assert!(token.span.end <= src.len());
        end = token.span.end;
    }
}
