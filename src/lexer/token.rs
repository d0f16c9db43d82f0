use serde::{Deserialize, Serialize};

/// A single token from the source script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub symbol: String,
    /// Character offset of the first character (0-indexed)
    pub position: usize,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(
        kind: TokenKind,
        symbol: impl Into<String>,
        position: usize,
        line: usize,
        column: usize,
    ) -> Self {
        Token {
            kind,
            symbol: symbol.into(),
            position,
            line,
            column,
        }
    }

    /// Broad token category
    pub fn category(&self) -> TokenCategory {
        self.kind.category()
    }

    /// True for integer and float operands
    pub fn is_operand(&self) -> bool {
        self.category() == TokenCategory::Operand
    }

    /// True for a symbol token
    pub fn is_symbol(&self) -> bool {
        self.kind == TokenKind::Symbol
    }

    /// True for `(`
    pub fn is_left_parenthesis(&self) -> bool {
        self.kind == TokenKind::LeftParen
    }

    /// True for `)`
    pub fn is_right_parenthesis(&self) -> bool {
        self.kind == TokenKind::RightParen
    }
}

/// All token types of the drawing language.
///
/// The variant doubles as the token's sub-type: operands are integers or
/// floats, parentheses are left or right, symbols have no sub-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Operand without a decimal point
    Integer,
    /// Operand with a decimal point
    Float,
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Command name, object name or direction
    Symbol,
}

/// Coarse token classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenCategory {
    /// Numeric literal
    Operand,
    /// `(` or `)`
    Parenthesis,
    /// Bare word
    Symbol,
}

impl TokenKind {
    /// Category this kind belongs to
    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::Integer | TokenKind::Float => TokenCategory::Operand,
            TokenKind::LeftParen | TokenKind::RightParen => TokenCategory::Parenthesis,
            TokenKind::Symbol => TokenCategory::Symbol,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TokenKind::Integer => write!(f, "integer"),
            TokenKind::Float => write!(f, "float"),
            TokenKind::LeftParen => write!(f, "`(`"),
            TokenKind::RightParen => write!(f, "`)`"),
            TokenKind::Symbol => write!(f, "symbol"),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind {
            TokenKind::LeftParen | TokenKind::RightParen => write!(f, "{}", self.kind),
            _ => write!(f, "{} `{}`", self.kind, self.symbol),
        }
    }
}
