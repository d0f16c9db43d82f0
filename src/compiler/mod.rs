//! # xnilang Compiler - commands to timed canvas frames
//!
//! Simulates object placement and movement over discrete time. Every
//! state-changing move emits one full redraw of the visible objects.
//!
//! ## Architecture
//!
//! ```text
//! Program → Compiler (object state + display order) → Frames → Animation → Script
//! ```
//!
//! ## Usage
//!
//! ```
//! use xnilang::compiler::{CompileOptions, Compiler};
//! use xnilang::{Parser, Scanner};
//!
//! let tokens = Scanner::new("(define a ((circle (0 0) 5))) (place a (10 10))").scan_tokens()?;
//! let program = Parser::new(&tokens).parse()?;
//! let animation = Compiler::new(CompileOptions::default()).compile(&program)?;
//! assert_eq!(animation.len(), 1);
//! # Ok::<(), xnilang::Error>(())
//! ```

pub mod animation;
pub mod debug;
pub mod frame;

pub use animation::Animation;
pub use debug::{dump_frames, format_frame, format_op};
pub use frame::{render, DrawOp, Frame, FrameBuilder, Vertex};

use crate::error::{CompileErrorKind, Error, Result};
use crate::parser::{Command, DrawCommand, MoveCommand, ObjectDefine, Operand, Program};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Compilation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Delay between frames in milliseconds (must be positive)
    pub interval_ms: u32,
    /// Restart playback after the last frame
    pub looped: bool,
    /// Name of the canvas variable the generated script draws on
    pub canvas: String,
    /// Fill style used by `area.*` shapes
    pub fill_style: String,
    /// Stroke style used by every shape
    pub stroke_style: String,
    /// Stroke width
    pub line_width: f64,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            interval_ms: 20,
            looped: true,
            canvas: "main".to_string(),
            fill_style: "rgb(0, 0, 0)".to_string(),
            stroke_style: "rgb(0, 0, 0)".to_string(),
            line_width: 1.0,
        }
    }
}

impl CompileOptions {
    /// Check that the options can produce a valid script
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(Error::InvalidOptions(
                "interval must be a positive number of milliseconds".to_string(),
            ));
        }

        validate_canvas_name(&self.canvas)?;

        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(Error::InvalidOptions(format!(
                "line width must be positive (got {})",
                self.line_width
            )));
        }

        Ok(())
    }
}

/// Canvas names must be plain script identifiers (`[A-Za-z_$][A-Za-z0-9_$]*`)
pub(crate) fn validate_canvas_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return Err(Error::InvalidOptions(format!(
            "canvas name '{}' is not a valid identifier",
            name
        )));
    }
    Ok(())
}

/// Simulation state of one defined object
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectState {
    /// Currently placed on the canvas
    pub visible: bool,
    /// X offset applied to the shape
    pub base_x: f64,
    /// Y offset applied to the shape
    pub base_y: f64,
    /// Shape in local coordinates
    pub shape: Vec<DrawCommand>,
}

/// Stateful command compiler.
///
/// One instance per compilation; object state is never shared between
/// instances.
pub struct Compiler {
    options: CompileOptions,
    objects: HashMap<String, ObjectState>,
    /// Visible objects in paint order, later entries on top
    display_order: Vec<String>,
    animation: Animation,
}

impl Compiler {
    /// Create a new compiler with options
    pub fn new(options: CompileOptions) -> Self {
        let animation = Animation::new(options.interval_ms, options.looped);
        Self {
            options,
            objects: HashMap::new(),
            display_order: Vec::new(),
            animation,
        }
    }

    /// Options this compiler was created with
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile a whole program into an animation
    pub fn compile(mut self, program: &Program) -> Result<Animation> {
        for command in &program.commands {
            self.compile_command(command)?;
        }
        Ok(self.finish())
    }

    /// Compile one top-level command
    pub fn compile_command(&mut self, command: &Command) -> Result<()> {
        tracing::debug!(command = command.name(), "compiling command");

        match command {
            Command::Define(define) => {
                self.compile_define(define);
                Ok(())
            }
            Command::Move(mv) => self.compile_move(mv),
            Command::Draw(draw) => Err(Error::compile(
                CompileErrorKind::InvalidTopLevelCommand,
                format!(
                    "Invalid top-level command: `{}` must appear inside a define.",
                    draw.name()
                ),
            )),
        }
    }

    /// Frames emitted so far
    pub fn frame_count(&self) -> usize {
        self.animation.len()
    }

    /// State of a defined object
    pub fn object(&self, name: &str) -> Option<&ObjectState> {
        self.objects.get(name)
    }

    /// Visible objects in paint order
    pub fn display_order(&self) -> &[String] {
        &self.display_order
    }

    /// Stop compiling and take the animation
    pub fn finish(self) -> Animation {
        self.animation
    }

    /// Redefinition keeps visibility and position, only the shape changes
    fn compile_define(&mut self, define: &ObjectDefine) {
        let state = self
            .objects
            .entry(define.target.name().to_string())
            .or_insert_with(|| ObjectState {
                visible: false,
                base_x: 0.0,
                base_y: 0.0,
                shape: Vec::new(),
            });
        state.shape = define.draws.clone();
    }

    fn compile_move(&mut self, mv: &MoveCommand) -> Result<()> {
        match mv {
            MoveCommand::Place { target, position } => {
                let name = target.name();
                let state = self.objects.get_mut(name).ok_or_else(|| unknown_target(name))?;

                if state.visible {
                    self.display_order.retain(|n| n != name);
                }

                state.base_x = position.x.value();
                state.base_y = position.y.value();
                state.visible = true;
                self.display_order.push(name.to_string());

                self.redraw()
            }
            MoveCommand::Shift { target, direction } => {
                let state = self.placed_object(target.name())?;
                let (dx, dy) = direction.delta();
                state.base_x += dx;
                state.base_y += dy;

                self.redraw()
            }
            MoveCommand::Erase { target } => {
                let name = target.name();
                let state = self.placed_object(name)?;
                state.visible = false;
                self.display_order.retain(|n| n != name);

                self.redraw()
            }
            MoveCommand::Loop { times, moves } => {
                // Unrolled here: one frame per inner move per iteration
                let count = loop_count(*times);
                if !emits_frames(moves) {
                    // Nothing to unroll; iterating would cost `count` with no output
                    return Ok(());
                }
                for _ in 0..count {
                    for inner in moves {
                        self.compile_move(inner)?;
                    }
                }
                Ok(())
            }
        }
    }

    fn placed_object(&mut self, name: &str) -> Result<&mut ObjectState> {
        let state = self.objects.get_mut(name).ok_or_else(|| unknown_target(name))?;
        if !state.visible {
            return Err(Error::compile(
                CompileErrorKind::NotPlaced,
                format!("Target hasn't been placed: {}.", name),
            ));
        }
        Ok(state)
    }

    /// Emit a frame: clear, then every visible object in display order
    fn redraw(&mut self) -> Result<()> {
        let mut builder = FrameBuilder::new();
        builder.clear();

        for name in &self.display_order {
            if let Some(state) = self.objects.get(name) {
                builder.draw(state.base_x, state.base_y, &state.shape)?;
            }
        }

        let frame = builder.finish();
        tracing::trace!(
            frame = self.animation.len(),
            ops = frame.len(),
            "emitted frame"
        );
        self.animation.push_frame(frame);
        Ok(())
    }
}

/// Repeat count of a loop: truncated toward zero, negative counts run zero times
fn loop_count(times: Operand) -> u64 {
    times.value().trunc().max(0.0) as u64
}

/// True if compiling `moves` once would emit at least one frame.
///
/// Place, shift and erase always emit a frame (or fail), so a loop body's
/// cost is bounded by its output only when this holds.
fn emits_frames(moves: &[MoveCommand]) -> bool {
    moves.iter().any(|mv| match mv {
        MoveCommand::Loop { times, moves } => loop_count(*times) > 0 && emits_frames(moves),
        _ => true,
    })
}

fn unknown_target(name: &str) -> Error {
    Error::compile(
        CompileErrorKind::UnknownTarget,
        format!("No such target: {}.", name),
    )
}
