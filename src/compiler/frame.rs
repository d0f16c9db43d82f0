//! Frame code generation
//!
//! Translates draw commands into primitive canvas operations for one instant.

use crate::error::{CompileErrorKind, Error, Result};
use crate::parser::{DrawCommand, Point, PointList};
use serde::{Deserialize, Serialize};

/// Absolute canvas coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// X axis value
    pub x: f64,
    /// Y axis value
    pub y: f64,
}

impl Vertex {
    /// Create a vertex
    pub fn new(x: f64, y: f64) -> Self {
        Vertex { x, y }
    }
}

/// Primitive drawing operation with offsets already applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Clear the whole canvas
    Clear,
    /// Outline a segment
    StrokeLine {
        /// Start
        from: Vertex,
        /// End
        to: Vertex,
    },
    /// Outline a circle
    StrokeCircle {
        /// Center
        center: Vertex,
        /// Radius
        radius: f64,
    },
    /// Outline a closed polygon
    StrokePath {
        /// Vertices in drawing order
        points: Vec<Vertex>,
    },
    /// Fill a circle
    FillCircle {
        /// Center
        center: Vertex,
        /// Radius
        radius: f64,
    },
    /// Fill a closed polygon
    FillPath {
        /// Vertices in drawing order
        points: Vec<Vertex>,
    },
}

/// One rendered snapshot of the canvas
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    /// Operations in paint order
    pub ops: Vec<DrawOp>,
}

impl Frame {
    /// Number of operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when the frame draws nothing
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Accumulates operations for one frame
#[derive(Debug, Default)]
pub struct FrameBuilder {
    ops: Vec<DrawOp>,
}

impl FrameBuilder {
    /// Start an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a canvas clear
    pub fn clear(&mut self) -> &mut Self {
        self.ops.push(DrawOp::Clear);
        self
    }

    /// Emit every draw command translated by `(base_x, base_y)`
    pub fn draw(&mut self, base_x: f64, base_y: f64, draws: &[DrawCommand]) -> Result<&mut Self> {
        for draw in draws {
            self.draw_command(base_x, base_y, draw)?;
        }
        Ok(self)
    }

    fn draw_command(&mut self, base_x: f64, base_y: f64, draw: &DrawCommand) -> Result<()> {
        let at = |p: &Point| translate(base_x, base_y, p);

        match draw {
            DrawCommand::Line { p1, p2 } => {
                self.ops.push(DrawOp::StrokeLine {
                    from: at(p1)?,
                    to: at(p2)?,
                });
            }
            DrawCommand::Circle { center, radius } => {
                self.ops.push(DrawOp::StrokeCircle {
                    center: at(center)?,
                    radius: radius.value(),
                });
            }
            DrawCommand::ClosedPath { path } => {
                let points = translate_path(base_x, base_y, path)?;
                self.ops.push(DrawOp::StrokePath { points });
            }
            DrawCommand::CircleArea { center, radius } => {
                let center = at(center)?;
                let radius = radius.value();
                self.ops.push(DrawOp::FillCircle { center, radius });
                self.ops.push(DrawOp::StrokeCircle { center, radius });
            }
            DrawCommand::SquareArea {
                center,
                width,
                height,
            } => {
                let path = square_corners(center, width.value(), height.value());
                let points = translate_path(base_x, base_y, &path)?;
                self.fill_and_stroke(points);
            }
            DrawCommand::ClosedPathArea { path } => {
                let points = translate_path(base_x, base_y, path)?;
                self.fill_and_stroke(points);
            }
        }

        Ok(())
    }

    fn fill_and_stroke(&mut self, points: Vec<Vertex>) {
        self.ops.push(DrawOp::FillPath {
            points: points.clone(),
        });
        self.ops.push(DrawOp::StrokePath { points });
    }

    /// Finish the frame
    pub fn finish(self) -> Frame {
        Frame { ops: self.ops }
    }
}

/// Render draw commands at a base offset.
///
/// Pure translation: every coordinate becomes `base + local`. No clear is
/// emitted; redraws add that themselves.
pub fn render(base_x: f64, base_y: f64, draws: &[DrawCommand]) -> Result<Frame> {
    let mut builder = FrameBuilder::new();
    builder.draw(base_x, base_y, draws)?;
    Ok(builder.finish())
}

/// Corners of a `width` x `height` rectangle around `center`, clockwise from top-left
fn square_corners(center: &Point, width: f64, height: f64) -> PointList {
    let (cx, cy) = (center.x.value(), center.y.value());
    let (hw, hh) = (width / 2.0, height / 2.0);
    PointList(vec![
        Point::new(cx - hw, cy - hh),
        Point::new(cx + hw, cy - hh),
        Point::new(cx + hw, cy + hh),
        Point::new(cx - hw, cy + hh),
    ])
}

fn translate_path(base_x: f64, base_y: f64, path: &PointList) -> Result<Vec<Vertex>> {
    if path.len() < 3 {
        return Err(Error::compile(
            CompileErrorKind::DegeneratePath,
            format!(
                "A path should contain at least 3 points (got {}).",
                path.len()
            ),
        ));
    }

    path.iter().map(|p| translate(base_x, base_y, p)).collect()
}

/// `base + local`, rejecting sums that overflow to infinity
fn translate(base_x: f64, base_y: f64, p: &Point) -> Result<Vertex> {
    let (x, y) = (base_x + p.x.value(), base_y + p.y.value());
    if !(x.is_finite() && y.is_finite()) {
        return Err(Error::compile(
            CompileErrorKind::CoordinateOverflow,
            format!(
                "Coordinate out of range: ({}, {}) + ({}, {}).",
                base_x,
                base_y,
                p.x.value(),
                p.y.value()
            ),
        ));
    }
    Ok(Vertex::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Operand;

    fn triangle() -> PointList {
        PointList(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 3.0),
        ])
    }

    #[test]
    fn test_line_is_translated() {
        let frame = render(
            10.0,
            20.0,
            &[DrawCommand::Line {
                p1: Point::new(0.0, 0.0),
                p2: Point::new(1.0, -1.0),
            }],
        )
        .unwrap();
        assert_eq!(
            frame.ops,
            vec![DrawOp::StrokeLine {
                from: Vertex::new(10.0, 20.0),
                to: Vertex::new(11.0, 19.0),
            }]
        );
    }

    #[test]
    fn test_area_circle_fills_then_strokes() {
        let frame = render(
            1.0,
            1.0,
            &[DrawCommand::CircleArea {
                center: Point::new(2.0, 3.0),
                radius: Operand(5.0),
            }],
        )
        .unwrap();
        let center = Vertex::new(3.0, 4.0);
        assert_eq!(
            frame.ops,
            vec![
                DrawOp::FillCircle {
                    center,
                    radius: 5.0
                },
                DrawOp::StrokeCircle {
                    center,
                    radius: 5.0
                },
            ]
        );
    }

    #[test]
    fn test_square_matches_path_area() {
        let square = render(
            0.0,
            0.0,
            &[DrawCommand::SquareArea {
                center: Point::new(0.0, 0.0),
                width: Operand(4.0),
                height: Operand(2.0),
            }],
        )
        .unwrap();
        let path = render(
            0.0,
            0.0,
            &[DrawCommand::ClosedPathArea {
                path: PointList(vec![
                    Point::new(-2.0, -1.0),
                    Point::new(2.0, -1.0),
                    Point::new(2.0, 1.0),
                    Point::new(-2.0, 1.0),
                ]),
            }],
        )
        .unwrap();
        assert_eq!(square, path);
        assert_eq!(square.len(), 2);
    }

    #[test]
    fn test_degenerate_paths() {
        for count in 0..3 {
            let path = PointList(triangle().0.into_iter().take(count).collect());
            for draw in [
                DrawCommand::ClosedPath { path: path.clone() },
                DrawCommand::ClosedPathArea { path: path.clone() },
            ] {
                let err = render(0.0, 0.0, &[draw]).unwrap_err();
                assert_eq!(err.compile_kind(), Some(CompileErrorKind::DegeneratePath));
            }
        }
    }

    #[test]
    fn test_three_point_path_succeeds() {
        let frame = render(1.0, 1.0, &[DrawCommand::ClosedPath { path: triangle() }]).unwrap();
        assert_eq!(
            frame.ops,
            vec![DrawOp::StrokePath {
                points: vec![
                    Vertex::new(1.0, 1.0),
                    Vertex::new(5.0, 1.0),
                    Vertex::new(1.0, 4.0)
                ]
            }]
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let draws = vec![
            DrawCommand::Circle {
                center: Point::new(0.0, 0.0),
                radius: Operand(2.0),
            },
            DrawCommand::ClosedPathArea { path: triangle() },
        ];
        assert_eq!(
            render(3.0, 4.0, &draws).unwrap(),
            render(3.0, 4.0, &draws).unwrap()
        );
    }

    #[test]
    fn test_overflowing_point_is_rejected() {
        let circle = DrawCommand::Circle {
            center: Point::new(f64::MAX, 0.0),
            radius: Operand(1.0),
        };
        let err = render(f64::MAX, 0.0, &[circle]).unwrap_err();
        assert_eq!(err.compile_kind(), Some(CompileErrorKind::CoordinateOverflow));

        let line = DrawCommand::Line {
            p1: Point::new(0.0, 0.0),
            p2: Point::new(0.0, -f64::MAX),
        };
        let err = render(0.0, -f64::MAX, &[line]).unwrap_err();
        assert_eq!(err.compile_kind(), Some(CompileErrorKind::CoordinateOverflow));
    }

    #[test]
    fn test_overflowing_path_is_rejected() {
        let path = PointList(vec![
            Point::new(0.0, 0.0),
            Point::new(f64::MAX, 0.0),
            Point::new(0.0, 1.0),
        ]);
        let err = render(f64::MAX, 0.0, &[DrawCommand::ClosedPath { path }]).unwrap_err();
        assert_eq!(err.compile_kind(), Some(CompileErrorKind::CoordinateOverflow));

        let square = DrawCommand::SquareArea {
            center: Point::new(f64::MAX, 0.0),
            width: Operand(f64::MAX),
            height: Operand(1.0),
        };
        let err = render(0.0, 0.0, &[square]).unwrap_err();
        assert_eq!(err.compile_kind(), Some(CompileErrorKind::CoordinateOverflow));
    }
}
