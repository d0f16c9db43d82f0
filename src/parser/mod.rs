//! xnilang Parser Module
//!
//! Parses the token stream into drawing, movement and definition commands.

mod ast;
mod command_parser;

pub use ast::{
    Command, CommandCategory, Direction, DrawCommand, MoveCommand, ObjectDefine, Operand, Point,
    PointList, Program, Target,
};
pub use command_parser::{parse_command, CommandParser};
