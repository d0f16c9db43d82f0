//! Canvas script emission
//!
//! Each frame becomes a self-contained procedure that sets up the 2-D context
//! and replays its operations; the frames are then wrapped with a timed stepper.

use crate::compiler::{Animation, CompileOptions, DrawOp, Frame, Vertex};

/// Writes generated script text line by line
struct ScriptWriter {
    script: String,
}

impl ScriptWriter {
    fn new() -> Self {
        ScriptWriter {
            script: String::new(),
        }
    }

    fn line(&mut self, line: impl AsRef<str>) {
        self.script.push_str(line.as_ref());
        self.script.push('\n');
    }

    fn into_string(self) -> String {
        self.script
    }
}

/// Turns frames into the final animation script
#[derive(Debug, Clone)]
pub struct ScriptEmitter {
    canvas: String,
    fill_style: String,
    stroke_style: String,
    line_width: f64,
}

impl ScriptEmitter {
    /// Create an emitter using the canvas and style settings of `options`
    pub fn new(options: &CompileOptions) -> Self {
        ScriptEmitter {
            canvas: options.canvas.clone(),
            fill_style: options.fill_style.clone(),
            stroke_style: options.stroke_style.clone(),
            line_width: options.line_width,
        }
    }

    /// Emit the script for a compiled animation
    pub fn emit(&self, animation: &Animation) -> String {
        self.finalize(&animation.frames, animation.interval_ms, animation.looped)
    }

    /// Emit the frame list, the timing configuration and the stepper.
    ///
    /// With `looped` the stepper wraps to frame 0 after the last frame,
    /// otherwise it stops. Zero frames stop immediately.
    pub fn finalize(&self, frames: &[Frame], interval_ms: u32, looped: bool) -> String {
        let mut out = ScriptWriter::new();

        out.line("var $frames = [];");
        for frame in frames {
            out.line(format!("$frames.push(function() {{\n{}}});", self.frame_body(frame)));
        }

        out.line(format!("var $interval = {};", interval_ms));
        out.line(format!("var $loop = {};", looped));

        out.line("var $current = 0;");
        out.line("function next_frame() {");
        out.line("    if ($current == $frames.length) {");
        out.line("        return false;");
        out.line("    } else {");
        out.line("        $frames[$current].call(this);");
        out.line("        $current++;");
        out.line("        if ($current == $frames.length) {");
        out.line("            if ($loop == true) {");
        out.line("                $current = 0;");
        out.line("                return true;");
        out.line("            } else {");
        out.line("                return false;");
        out.line("            }");
        out.line("        } else {");
        out.line("            return true;");
        out.line("        }");
        out.line("    }");
        out.line("}");
        out.line("var $animator = setInterval(function() {");
        out.line("    if (!next_frame()) {");
        out.line("        clearInterval($animator);");
        out.line("    }");
        out.line("}, $interval);");

        format!("{{{}}}", out.into_string())
    }

    /// Body of one frame procedure
    pub fn frame_body(&self, frame: &Frame) -> String {
        let mut out = ScriptWriter::new();

        out.line(format!("var $ctx = {}.getContext(\"2d\");", self.canvas));
        out.line(format!("$ctx.fillStyle = {};", js_string(&self.fill_style)));
        out.line(format!("$ctx.strokeStyle = {};", js_string(&self.stroke_style)));
        out.line(format!("$ctx.lineWidth = {};", js_number(self.line_width)));

        for op in &frame.ops {
            self.emit_op(&mut out, op);
        }

        out.into_string()
    }

    fn emit_op(&self, out: &mut ScriptWriter, op: &DrawOp) {
        match op {
            DrawOp::Clear => out.line(format!(
                "$ctx.clearRect(0, 0, {c}.width, {c}.height);",
                c = self.canvas
            )),
            DrawOp::StrokeLine { from, to } => {
                out.line("$ctx.beginPath();");
                out.line(format!("$ctx.moveTo({});", js_vertex(from)));
                out.line(format!("$ctx.lineTo({});", js_vertex(to)));
                out.line("$ctx.closePath();");
                out.line("$ctx.stroke();");
            }
            DrawOp::StrokeCircle { center, radius } => {
                emit_arc(out, center, *radius);
                out.line("$ctx.stroke();");
            }
            DrawOp::FillCircle { center, radius } => {
                emit_arc(out, center, *radius);
                out.line("$ctx.fill();");
            }
            DrawOp::StrokePath { points } => {
                emit_path(out, points);
                out.line("$ctx.stroke();");
            }
            DrawOp::FillPath { points } => {
                emit_path(out, points);
                out.line("$ctx.fill();");
            }
        }
    }
}

fn emit_arc(out: &mut ScriptWriter, center: &Vertex, radius: f64) {
    out.line("$ctx.beginPath();");
    out.line(format!(
        "$ctx.arc({}, {}, 0, 2 * Math.PI, false);",
        js_vertex(center),
        js_number(radius)
    ));
    out.line("$ctx.closePath();");
}

fn emit_path(out: &mut ScriptWriter, points: &[Vertex]) {
    out.line("$ctx.beginPath();");
    if let Some((first, rest)) = points.split_first() {
        out.line(format!("$ctx.moveTo({});", js_vertex(first)));
        for p in rest {
            out.line(format!("$ctx.lineTo({});", js_vertex(p)));
        }
    }
    out.line("$ctx.closePath();");
}

/// Format a number as a script literal; non-finite values use the script spellings
fn js_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

fn js_vertex(v: &Vertex) -> String {
    format!("{}, {}", js_number(v.x), js_number(v.y))
}

/// Quote a string as a script string literal
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Emit the script for `animation` with the given canvas/style settings
pub fn finalize(animation: &Animation, options: &CompileOptions) -> String {
    ScriptEmitter::new(options).emit(animation)
}
