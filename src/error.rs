//! Error types for the xnilang pipeline

use thiserror::Error;

/// Errors raised while tokenizing, parsing or compiling a script.
///
/// Every variant is terminal: the first error aborts the whole compilation and
/// no partial animation is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed token
    ///
    /// **Triggered by:** `1.2.3`, `1-2`, `12ab`, `#`
    #[error("Lexical error at offset {position}: {kind}")]
    Lex {
        /// Character offset of the offending character
        position: usize,
        /// What went wrong
        kind: LexErrorKind,
    },

    /// Token stream does not match the grammar
    ///
    /// **Triggered by:** `(line (1 2)`, `(spin a)`, `(define a ((place b (0 0))))`
    #[error("Syntax error at offset {position}: {kind} (expected {expected}, found {found})")]
    Parse {
        /// Character offset of the token where parsing failed
        position: usize,
        /// What went wrong
        kind: ParseErrorKind,
        /// Description of what the parser wanted
        expected: String,
        /// Description of what the parser saw
        found: String,
    },

    /// Well-formed command that cannot be simulated
    ///
    /// **Triggered by:** moving an undefined object, shifting an erased object,
    /// a path with fewer than three points, a bare draw command at top level,
    /// a placement that pushes a coordinate past the `f64` range
    #[error("Compile error: {message}")]
    Compile {
        /// Error category
        kind: CompileErrorKind,
        /// Human-readable description
        message: String,
    },

    /// Input rejected before parsing because it exceeds the caller's limit
    #[error("Input too large: {tokens} tokens (limit: {limit})")]
    InputTooLarge {
        /// Number of tokens in the input
        tokens: usize,
        /// Configured maximum
        limit: usize,
    },

    /// Invalid compile options
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

/// Lexical error categories
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Second `.` inside one operand
    #[error("duplicated decimal point")]
    DuplicateDecimalPoint,
    /// `-` anywhere but the first character of an operand
    #[error("misplaced minus sign")]
    MisplacedMinus,
    /// Letter inside an operand
    #[error("invalid character '{0}' in operand")]
    InvalidOperandCharacter(char),
    /// Character that cannot start any token
    #[error("unexpected character (code={code})")]
    UnexpectedCharacter {
        /// Unicode scalar value of the character
        code: u32,
    },
    /// Operand text that is not a number, e.g. a lone `-`
    #[error("malformed operand '{0}'")]
    MalformedOperand(String),
}

/// Syntax error categories
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A `(` or `)` was required here
    #[error("missing parenthesis")]
    MissingParenthesis,
    /// A numeric operand was required here
    #[error("missing operand")]
    MissingOperand,
    /// A symbol was required here
    #[error("missing symbol")]
    MissingSymbol,
    /// Command name not in the recognized set
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    /// Draw command where a move command is required, or vice versa
    #[error("command not allowed in this list")]
    WrongCommandCategory,
    /// Token stream ended before a list's closing `)`
    #[error("missing list end")]
    UnterminatedList,
    /// Direction symbol other than up/down/left/right
    #[error("invalid direction descriptor '{0}'")]
    InvalidDirection(String),
    /// Token stream ended in the middle of a command
    #[error("unexpected end of script")]
    UnexpectedEnd,
}

/// Compilation error categories
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileErrorKind {
    /// Move command names an object that was never defined
    #[error("unknown target")]
    UnknownTarget,
    /// Shift or erase on an object that is not currently placed
    #[error("target not placed")]
    NotPlaced,
    /// Path with fewer than three points
    #[error("degenerate path")]
    DegeneratePath,
    /// Draw command at the top level of a script
    #[error("invalid top-level command")]
    InvalidTopLevelCommand,
    /// Translated coordinate is not a finite number
    #[error("coordinate overflow")]
    CoordinateOverflow,
}

impl Error {
    /// Create a compile error with a message
    pub fn compile(kind: CompileErrorKind, message: impl Into<String>) -> Self {
        Error::Compile {
            kind,
            message: message.into(),
        }
    }

    /// Source offset for lexer and parser errors
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Lex { position, .. } | Error::Parse { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Compile error category, if this is a compile error
    pub fn compile_kind(&self) -> Option<CompileErrorKind> {
        match self {
            Error::Compile { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Result type for xnilang operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_message_includes_offset() {
        let err = Error::Lex {
            position: 7,
            kind: LexErrorKind::UnexpectedCharacter { code: 35 },
        };
        assert_eq!(
            err.to_string(),
            "Lexical error at offset 7: unexpected character (code=35)"
        );
        assert_eq!(err.position(), Some(7));
    }

    #[test]
    fn test_compile_error_has_no_position() {
        let err = Error::compile(CompileErrorKind::UnknownTarget, "No such target: a");
        assert_eq!(err.position(), None);
        assert_eq!(err.compile_kind(), Some(CompileErrorKind::UnknownTarget));
        assert_eq!(err.to_string(), "Compile error: No such target: a");
    }
}
