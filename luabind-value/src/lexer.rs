use core::ops::Range;

use crate::error::{SyntaxError, SyntaxErrorKind};

/// Byte range of a token in the source.
pub(crate) type Span = Range<usize>;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind<'src> {
    /// An identifier or a keyword other than the literal ones.
    Name(&'src str),
    Nil,
    True,
    False,
    Return,
    Integer(i64),
    Float(f64),
    String(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Assign,
    Comma,
    Semi,
    Minus,
    /// Any other operator or punctuation.
    Op(&'src str),
    Eof,
}

impl TokenKind<'_> {
    /// How the token is named in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::Name(name) => format!("'{name}'"),
            TokenKind::Nil => "'nil'".into(),
            TokenKind::True => "'true'".into(),
            TokenKind::False => "'false'".into(),
            TokenKind::Return => "'return'".into(),
            TokenKind::Integer(i) => format!("number {i}"),
            TokenKind::Float(x) => format!("number {x}"),
            TokenKind::String(s) => format!("string {s:?}"),
            TokenKind::LBrace => "'{'".into(),
            TokenKind::RBrace => "'}'".into(),
            TokenKind::LBracket => "'['".into(),
            TokenKind::RBracket => "']'".into(),
            TokenKind::Assign => "'='".into(),
            TokenKind::Comma => "','".into(),
            TokenKind::Semi => "';'".into(),
            TokenKind::Minus => "'-'".into(),
            TokenKind::Op(op) => format!("'{op}'"),
            TokenKind::Eof => "end of input".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub span: Span,
}

/// Splits Lua source into tokens, skipping whitespace and comments.
pub(crate) struct Lexer<'src> {
    src: &'src str,
    bytes: &'src [u8],
    pos: usize,
}

type LexResult<T> = Result<T, SyntaxError>;

const OPERATORS: &[&str] = &[
    "...", "..", "==", "~=", "<=", ">=", "<<", ">>", "//", "::", "+", "*", "/", "%", "^", "#",
    "&", "~", "|", "<", ">", "(", ")", ":", ".",
];

impl<'src> Lexer<'src> {
    pub(crate) fn new(src: &'src str) -> Self {
        let mut lexer = Lexer {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        };
        if src.starts_with('#') {
            lexer.skip_line();
        }
        lexer
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn error(&self, kind: SyntaxErrorKind, span: Span) -> SyntaxError {
        SyntaxError::new(kind, span)
    }

    pub(crate) fn next_token(&mut self) -> LexResult<Token<'src>> {
        self.skip_trivia()?;
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span: start..start,
            });
        };

        let kind = match c {
            b'{' => self.single(TokenKind::LBrace),
            b'}' => self.single(TokenKind::RBrace),
            b']' => self.single(TokenKind::RBracket),
            b',' => self.single(TokenKind::Comma),
            b';' => self.single(TokenKind::Semi),
            b'-' => self.single(TokenKind::Minus),
            b'[' => match self.long_bracket_level() {
                Some(level) => TokenKind::String(self.read_long_bracket(level)?),
                None => self.single(TokenKind::LBracket),
            },
            b'=' if self.peek_at(1) != Some(b'=') => self.single(TokenKind::Assign),
            b'"' | b'\'' => TokenKind::String(self.read_string(c)?),
            b'0'..=b'9' => self.read_number()?,
            b'.' if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => self.read_number()?,
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.read_name(),
            _ => self.read_operator()?,
        };

        Ok(Token {
            kind,
            span: start..self.pos,
        })
    }

    fn single(&mut self, kind: TokenKind<'src>) -> TokenKind<'src> {
        self.pos += 1;
        kind
    }

    fn skip_line(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn skip_trivia(&mut self) -> LexResult<()> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c') => self.pos += 1,
                Some(b'-') if self.peek_at(1) == Some(b'-') => {
                    self.pos += 2;
                    match self.long_bracket_level() {
                        Some(level) => {
                            self.read_long_bracket(level)?;
                        }
                        None => self.skip_line(),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// If a long bracket `[==[` opens here, its level (number of `=`).
    fn long_bracket_level(&self) -> Option<usize> {
        if self.peek() != Some(b'[') {
            return None;
        }
        let mut level = 0;
        while self.peek_at(1 + level) == Some(b'=') {
            level += 1;
        }
        (self.peek_at(1 + level) == Some(b'[')).then_some(level)
    }

    fn read_long_bracket(&mut self, level: usize) -> LexResult<String> {
        let start = self.pos;
        self.pos += level + 2;
        // A newline right after the opening bracket is not part of the string.
        if self.peek() == Some(b'\r') {
            self.pos += 1;
        }
        if self.peek() == Some(b'\n') {
            self.pos += 1;
        }
        let content_start = self.pos;
        let close: String = format!("]{}]", "=".repeat(level));
        match self.src[content_start..].find(&close) {
            Some(offset) => {
                let content = &self.src[content_start..content_start + offset];
                self.pos = content_start + offset + close.len();
                Ok(content.to_string())
            }
            None => Err(self.error(
                SyntaxErrorKind::UnterminatedLongBracket,
                start..start + level + 2,
            )),
        }
    }

    fn read_string(&mut self, quote: u8) -> LexResult<String> {
        let start = self.pos;
        self.pos += 1;
        let mut buf = Vec::new();
        loop {
            let Some(b) = self.peek() else {
                return Err(self.error(SyntaxErrorKind::UnterminatedString, start..start + 1));
            };
            match b {
                b'\n' | b'\r' => {
                    return Err(self.error(SyntaxErrorKind::UnterminatedString, start..start + 1));
                }
                b'\\' => self.read_escape(&mut buf)?,
                _ if b == quote => {
                    self.pos += 1;
                    break;
                }
                _ => {
                    buf.push(b);
                    self.pos += 1;
                }
            }
        }
        String::from_utf8(buf)
            .map_err(|_| self.error(SyntaxErrorKind::InvalidUtf8, start..self.pos))
    }

    fn read_escape(&mut self, buf: &mut Vec<u8>) -> LexResult<()> {
        let esc_start = self.pos;
        self.pos += 1;
        let Some(c) = self.peek() else {
            return Err(self.error(SyntaxErrorKind::UnterminatedString, esc_start..esc_start + 1));
        };
        self.pos += 1;
        match c {
            b'a' => buf.push(0x07),
            b'b' => buf.push(0x08),
            b'f' => buf.push(0x0c),
            b'n' => buf.push(b'\n'),
            b'r' => buf.push(b'\r'),
            b't' => buf.push(b'\t'),
            b'v' => buf.push(0x0b),
            b'\\' | b'"' | b'\'' => buf.push(c),
            b'\n' => {
                buf.push(b'\n');
                if self.peek() == Some(b'\r') {
                    self.pos += 1;
                }
            }
            b'\r' => {
                buf.push(b'\n');
                if self.peek() == Some(b'\n') {
                    self.pos += 1;
                }
            }
            b'z' => {
                while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
                    self.pos += 1;
                }
            }
            b'x' => {
                let digits = self.take_while_max(2, |b| b.is_ascii_hexdigit());
                if digits.len() != 2 {
                    return Err(self.bad_escape(esc_start));
                }
                buf.push(u8::from_str_radix(digits, 16).map_err(|_| self.bad_escape(esc_start))?);
            }
            b'0'..=b'9' => {
                self.pos -= 1;
                let digits = self.take_while_max(3, |b| b.is_ascii_digit());
                let value: u32 = digits.parse().map_err(|_| self.bad_escape(esc_start))?;
                let byte = u8::try_from(value).map_err(|_| self.bad_escape(esc_start))?;
                buf.push(byte);
            }
            b'u' => {
                if self.peek() != Some(b'{') {
                    return Err(self.bad_escape(esc_start));
                }
                self.pos += 1;
                let digits = self.take_while_max(8, |b| b.is_ascii_hexdigit());
                if digits.is_empty() || self.peek() != Some(b'}') {
                    return Err(self.bad_escape(esc_start));
                }
                self.pos += 1;
                let ch = u32::from_str_radix(digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| self.bad_escape(esc_start))?;
                let mut utf8 = [0; 4];
                buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
            }
            _ => return Err(self.bad_escape(esc_start)),
        }
        Ok(())
    }

    fn bad_escape(&self, esc_start: usize) -> SyntaxError {
        let text = String::from_utf8_lossy(&self.bytes[esc_start + 1..self.pos]).into_owned();
        self.error(SyntaxErrorKind::InvalidEscape(text), esc_start..self.pos)
    }

    fn take_while_max(&mut self, max: usize, pred: impl Fn(u8) -> bool) -> &'src str {
        let src = self.src;
        let start = self.pos;
        while self.pos - start < max && self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &src[start..self.pos]
    }

    fn read_name(&mut self) -> TokenKind<'src> {
        let src = self.src;
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }
        match &src[start..self.pos] {
            "nil" => TokenKind::Nil,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "return" => TokenKind::Return,
            name => TokenKind::Name(name),
        }
    }

    fn read_operator(&mut self) -> LexResult<TokenKind<'src>> {
        let src = self.src;
        let rest = &src[self.pos..];
        if let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            self.pos += op.len();
            return Ok(TokenKind::Op(&rest[..op.len()]));
        }
        let ch = rest.chars().next().unwrap_or('\0');
        Err(self.error(
            SyntaxErrorKind::UnexpectedCharacter(ch),
            self.pos..self.pos + ch.len_utf8(),
        ))
    }

    fn read_number(&mut self) -> LexResult<TokenKind<'src>> {
        let start = self.pos;
        let hex = self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X'));
        let (exp_lower, exp_upper) = if hex {
            self.pos += 2;
            (b'p', b'P')
        } else {
            (b'e', b'E')
        };

        let mut is_float = false;
        loop {
            match self.peek() {
                Some(b) if b == exp_lower || b == exp_upper => {
                    is_float = true;
                    self.pos += 1;
                    if matches!(self.peek(), Some(b'+' | b'-')) {
                        self.pos += 1;
                    }
                }
                Some(b'.') => {
                    is_float = true;
                    self.pos += 1;
                }
                Some(b) if (hex && b.is_ascii_hexdigit()) || b.is_ascii_digit() => self.pos += 1,
                _ => break,
            }
        }
        // `3x` or `1.2.3` must not silently split into two tokens.
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
        {
            self.pos += 1;
        }

        let text = &self.src[start..self.pos];
        let malformed =
            || self.error(SyntaxErrorKind::MalformedNumber(text.to_string()), start..self.pos);
        let kind = if hex {
            let body = &text[2..];
            if is_float {
                TokenKind::Float(parse_hex_float(body).ok_or_else(malformed)?)
            } else {
                TokenKind::Integer(parse_hex_int(body).ok_or_else(malformed)?)
            }
        } else if is_float {
            TokenKind::Float(text.parse().map_err(|_| malformed())?)
        } else {
            match text.parse::<i64>() {
                Ok(i) => TokenKind::Integer(i),
                // Decimal integers that do not fit become floats.
                Err(_) => TokenKind::Float(text.parse().map_err(|_| malformed())?),
            }
        };
        Ok(kind)
    }
}

/// Hex integers wrap around modulo 2^64.
fn parse_hex_int(digits: &str) -> Option<i64> {
    if digits.is_empty() {
        return None;
    }
    let mut acc: u64 = 0;
    for c in digits.chars() {
        acc = acc.wrapping_mul(16).wrapping_add(u64::from(c.to_digit(16)?));
    }
    Some(acc as i64)
}

fn parse_hex_float(body: &str) -> Option<f64> {
    let (mantissa, exponent) = match body.find(['p', 'P']) {
        Some(i) => (&body[..i], body[i + 1..].parse::<i32>().ok()?),
        None => (body, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let mut value = 0.0_f64;
    for c in int_part.chars() {
        value = value * 16.0 + f64::from(c.to_digit(16)?);
    }
    let mut scale = 1.0 / 16.0;
    for c in frac_part.chars() {
        value += f64::from(c.to_digit(16)?) * scale;
        scale /= 16.0;
    }
    Some(value * 2f64.powi(exponent))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind<'_>> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            if token.kind == TokenKind::Eof {
                return out;
            }
            out.push(token.kind);
        }
    }

    #[test]
    fn numbers_keep_their_subtype() {
        assert_eq!(
            kinds("3 3.0 0x10 1e2 .5 9223372036854775808"),
            vec![
                TokenKind::Integer(3),
                TokenKind::Float(3.0),
                TokenKind::Integer(16),
                TokenKind::Float(100.0),
                TokenKind::Float(0.5),
                TokenKind::Float(9223372036854775808.0),
            ]
        );
        assert_eq!(kinds("0x1p4"), vec![TokenKind::Float(16.0)]);
        assert_eq!(kinds("0xffffffffffffffff"), vec![TokenKind::Integer(-1)]);
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            kinds(r#""a\tb\65\x41\u{48}\z   c""#),
            vec![TokenKind::String("a\tbAAHc".into())]
        );
        assert_eq!(kinds("'it''s'"), vec![
            TokenKind::String("it".into()),
            TokenKind::String("s".into()),
        ]);
    }

    #[test]
    fn long_brackets_and_comments() {
        assert_eq!(
            kinds("--[==[ skipped ]] still ]==] [[\nline]] -- trailing"),
            vec![TokenKind::String("line".into())]
        );
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = Lexer::new("3x").next_token().unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::MalformedNumber("3x".into()));
    }

    #[test]
    fn unterminated_string_points_at_the_quote() {
        let err = Lexer::new("  'abc").next_token().unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::UnterminatedString);
        assert_eq!(err.span().offset(), 2);
    }
}
