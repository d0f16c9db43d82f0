//! Debug utilities for compiled animations
//!
//! Human-readable listings of frames and their drawing operations.

use super::animation::Animation;
use super::frame::{DrawOp, Frame, Vertex};

/// Render an animation as a frame-by-frame listing
pub fn dump_frames(animation: &Animation) -> String {
    let mut out = String::new();
    out.push_str("═══════════════════════════════════════════════════════════\n");
    out.push_str("                    FRAME DUMP\n");
    out.push_str("═══════════════════════════════════════════════════════════\n");
    out.push_str(&format!(
        "Frames: {}  Interval: {}ms  Loop: {}\n",
        animation.len(),
        animation.interval_ms,
        animation.looped
    ));

    for (i, frame) in animation.frames.iter().enumerate() {
        out.push_str("───────────────────────────────────────────────────────────\n");
        out.push_str(&format!("frame {:04}\n", i));
        out.push_str(&format_frame(frame));
    }
    out.push_str("═══════════════════════════════════════════════════════════\n");
    out
}

/// One operation per line, indented
pub fn format_frame(frame: &Frame) -> String {
    frame
        .ops
        .iter()
        .map(|op| format!("  {}\n", format_op(op)))
        .collect()
}

/// Format a single drawing operation
pub fn format_op(op: &DrawOp) -> String {
    match op {
        DrawOp::Clear => "clear".to_string(),
        DrawOp::StrokeLine { from, to } => {
            format!("stroke-line {} -> {}", vertex(from), vertex(to))
        }
        DrawOp::StrokeCircle { center, radius } => {
            format!("stroke-circle {} r={}", vertex(center), radius)
        }
        DrawOp::FillCircle { center, radius } => {
            format!("fill-circle {} r={}", vertex(center), radius)
        }
        DrawOp::StrokePath { points } => format!("stroke-path {}", path(points)),
        DrawOp::FillPath { points } => format!("fill-path {}", path(points)),
    }
}

fn vertex(v: &Vertex) -> String {
    format!("({}, {})", v.x, v.y)
}

fn path(points: &[Vertex]) -> String {
    let parts: Vec<String> = points.iter().map(vertex).collect();
    format!("[{}]", parts.join(" "))
}
