//! # xnilang - A Tiny Language for Canvas Animations
//!
//! xnilang compiles a small parenthesized drawing language into a
//! frame-by-frame animation script for an HTML canvas. Scripts define shapes
//! as named objects, place them on the canvas and move them around; every
//! move produces one full frame.
//!
//! ## Quick Start
//!
//! ```rust
//! use xnilang::{compile_source, CompileOptions};
//!
//! # fn main() -> xnilang::Result<()> {
//! let script = compile_source(
//!     r#"
//!     (define ball ((area.circle (0 0) 5)))
//!     (place ball (10 10))
//!     (loop 3 ((shift ball right)))
//!     "#,
//!     &CompileOptions::default(),
//! )?;
//!
//! // One frame for the place, one per shift
//! assert_eq!(script.matches("$frames.push").count(), 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Step by Step
//!
//! ```rust
//! use xnilang::{CompileOptions, Compiler, Parser, Scanner, ScriptEmitter};
//!
//! # fn main() -> xnilang::Result<()> {
//! let mut scanner = Scanner::new("(define a ((line (0 0) (10 0)))) (place a (5 5))");
//! let tokens = scanner.scan_tokens()?;
//!
//! let mut parser = Parser::new(&tokens);
//! let program = parser.parse()?;
//!
//! let options = CompileOptions::default();
//! let animation = Compiler::new(options.clone()).compile(&program)?;
//! assert_eq!(animation.len(), 1);
//!
//! let script = ScriptEmitter::new(&options).emit(&animation);
//! assert!(script.contains("$ctx.moveTo(5, 5);"));
//! assert!(script.contains("$ctx.lineTo(15, 5);"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! ### Draw commands (only inside `define`)
//!
//! - `(line (x1 y1) (x2 y2))` - Stroked segment
//! - `(circle (x y) r)` - Stroked circle
//! - `(path ((x y) (x y) (x y) ...))` - Closed stroked polygon, at least 3 points
//! - `(area.circle (x y) r)` - Filled circle
//! - `(area.square (x y) w h)` - Filled rectangle centered on `(x y)`
//! - `(area.path (...))` - Filled closed polygon
//!
//! ### Move commands
//!
//! - `(place obj (x y))` - Show `obj` with its origin at `(x y)`
//! - `(shift obj up|down|left|right)` - Move a placed object by one unit
//! - `(erase obj)` - Hide a placed object
//! - `(loop n (move...))` - Repeat the moves `n` times, unrolled at compile time
//!
//! ### Definitions
//!
//! - `(define obj (draw...))` - Create or replace the shape of `obj`
//!
//! The canvas y axis points down, so `up` decreases y.
//!
//! ## Architecture
//!
//! ```text
//! Source → Scanner → Tokens → Parser → Program → Compiler → Animation → ScriptEmitter → Script
//! ```
//!
//! - [`Scanner`] - Tokenizes source text
//! - [`Parser`] - Recursive-descent parser producing a [`Program`]
//! - [`Compiler`] - Simulates object state, emits one [`Frame`] per move
//! - [`ScriptEmitter`] - Writes the frames and playback stepper as canvas script
//! - [`Pipeline`] - Runs all stages, optionally over many scripts in parallel
//!
//! ## Error Handling
//!
//! The first error aborts compilation. Lexical and syntax errors carry the
//! character offset of the offending input:
//!
//! ```rust
//! use xnilang::{compile_source, CompileOptions, Error};
//!
//! let err = compile_source("(shift a sideways)", &CompileOptions::default()).unwrap_err();
//! assert_eq!(err.position(), Some(9));
//!
//! let err = compile_source("(erase ghost)", &CompileOptions::default()).unwrap_err();
//! assert!(matches!(err, Error::Compile { .. }));
//! assert_eq!(err.to_string(), "Compile error: No such target: ghost.");
//! ```

/// Version of the xnilang compiler
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod codegen;
pub mod compiler;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pipeline;

// Re-export main types
pub use codegen::{render_page, PageOptions, ScriptEmitter};
pub use compiler::{Animation, CompileOptions, Compiler, DrawOp, Frame, Vertex};
pub use error::{CompileErrorKind, Error, LexErrorKind, ParseErrorKind, Result};
pub use lexer::{Scanner, Token, TokenKind};
pub use parser::{Command, CommandParser, DrawCommand, MoveCommand, ObjectDefine, Program};
pub use pipeline::{Pipeline, PipelineOptions, PipelineOutput};

/// Type alias for the command parser.
/// Converts tokens into a [`Program`].
pub type Parser<'t> = CommandParser<'t>;

/// Compile source text straight to an animation script.
///
/// Shorthand for a [`Pipeline`] with no token limit.
pub fn compile_source(source: &str, options: &CompileOptions) -> Result<String> {
    let pipeline = Pipeline::new(PipelineOptions {
        compile: options.clone(),
        ..PipelineOptions::default()
    })?;
    Ok(pipeline.run(source)?.script)
}
