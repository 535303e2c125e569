//! Errors produced while reading Lua source.

use core::fmt::{self, Debug, Display};

use miette::SourceSpan;

/// A chunk could not be read.
#[derive(Clone)]
pub struct SyntaxError {
    pub(crate) kind: SyntaxErrorKind,
    pub(crate) span: SourceSpan,
    pub(crate) source_code: Option<String>,
}

impl SyntaxError {
    pub(crate) fn new(kind: SyntaxErrorKind, span: impl Into<SourceSpan>) -> Self {
        SyntaxError {
            kind,
            span: span.into(),
            source_code: None,
        }
    }

    pub(crate) fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_code = Some(source.into());
        self
    }

    /// What went wrong.
    pub fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }

    /// Where it went wrong, as a byte range into the source.
    pub fn span(&self) -> SourceSpan {
        self.span
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.kind, self.span.offset())
    }
}

impl core::error::Error for SyntaxError {}

impl Debug for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxError")
            .field("kind", &self.kind)
            .field("span", &self.span)
            .finish()
    }
}

/// Classification of [`SyntaxError`]s.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SyntaxErrorKind {
    /// A character that starts no token.
    UnexpectedCharacter(char),
    /// A quoted string without its closing quote.
    UnterminatedString,
    /// A long string or long comment without its closing bracket.
    UnterminatedLongBracket,
    /// An invalid escape sequence inside a quoted string.
    InvalidEscape(String),
    /// A string whose bytes are not valid UTF-8.
    InvalidUtf8,
    /// A numeral that could not be read.
    MalformedNumber(String),
    /// A token other than what the grammar allows here.
    UnexpectedToken {
        /// What was found.
        found: String,
        /// What was expected.
        expected: &'static str,
    },
    /// The source ended too early.
    UnexpectedEof {
        /// What was expected.
        expected: &'static str,
    },
    /// An expression that needs evaluation (a variable, call or operator).
    UnsupportedExpression(String),
    /// A table key that Lua rejects (`nil`, NaN) or that cannot be read
    /// back as a scalar (a table).
    InvalidTableKey(&'static str),
    /// Tables nested deeper than the reader allows.
    NestingTooDeep,
}

impl SyntaxErrorKind {
    /// Returns an error code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            SyntaxErrorKind::UnexpectedCharacter(_) => "lua::unexpected_character",
            SyntaxErrorKind::UnterminatedString => "lua::unterminated_string",
            SyntaxErrorKind::UnterminatedLongBracket => "lua::unterminated_long_bracket",
            SyntaxErrorKind::InvalidEscape(_) => "lua::invalid_escape",
            SyntaxErrorKind::InvalidUtf8 => "lua::invalid_utf8",
            SyntaxErrorKind::MalformedNumber(_) => "lua::malformed_number",
            SyntaxErrorKind::UnexpectedToken { .. } => "lua::unexpected_token",
            SyntaxErrorKind::UnexpectedEof { .. } => "lua::unexpected_eof",
            SyntaxErrorKind::UnsupportedExpression(_) => "lua::unsupported_expression",
            SyntaxErrorKind::InvalidTableKey(_) => "lua::invalid_table_key",
            SyntaxErrorKind::NestingTooDeep => "lua::nesting_too_deep",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SyntaxErrorKind::UnterminatedString | SyntaxErrorKind::UnterminatedLongBracket => {
                "opened here"
            }
            SyntaxErrorKind::UnsupportedExpression(_) => "only literals are allowed",
            SyntaxErrorKind::InvalidTableKey(_) => "this key",
            _ => "here",
        }
    }
}

impl Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character {c:?}"),
            SyntaxErrorKind::UnterminatedString => write!(f, "unfinished string"),
            SyntaxErrorKind::UnterminatedLongBracket => write!(f, "unfinished long string or comment"),
            SyntaxErrorKind::InvalidEscape(esc) => write!(f, "invalid escape sequence '\\{esc}'"),
            SyntaxErrorKind::InvalidUtf8 => write!(f, "string is not valid UTF-8"),
            SyntaxErrorKind::MalformedNumber(text) => write!(f, "malformed number near '{text}'"),
            SyntaxErrorKind::UnexpectedToken { found, expected } => {
                write!(f, "expected {expected}, found {found}")
            }
            SyntaxErrorKind::UnexpectedEof { expected } => {
                write!(f, "expected {expected}, found end of input")
            }
            SyntaxErrorKind::UnsupportedExpression(what) => {
                write!(f, "unsupported expression: {what}")
            }
            SyntaxErrorKind::InvalidTableKey(why) => write!(f, "invalid table key: {why}"),
            SyntaxErrorKind::NestingTooDeep => write!(f, "tables nested too deeply"),
        }
    }
}

impl miette::Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source_code
            .as_ref()
            .map(|s| s as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        Some(Box::new(core::iter::once(miette::LabeledSpan::at(
            self.span,
            self.kind.label(),
        ))))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        match &self.kind {
            SyntaxErrorKind::UnsupportedExpression(_) => Some(Box::new(
                "configuration chunks may only contain literals and table constructors",
            )),
            _ => None,
        }
    }
}
