use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete parsed script
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    /// Top-level commands in source order
    pub commands: Vec<Command>,
}

/// Numeric literal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Operand(pub f64);

impl Operand {
    /// Numeric value
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Object name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target(pub String);

impl Target {
    /// Create a target from a name
    pub fn new(name: impl Into<String>) -> Self {
        Target(name.into())
    }

    /// Object name
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// `(x y)` coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X axis value
    pub x: Operand,
    /// Y axis value
    pub y: Operand,
}

impl Point {
    /// Create a point from raw values
    pub fn new(x: f64, y: f64) -> Self {
        Point {
            x: Operand(x),
            y: Operand(y),
        }
    }
}

/// `((x y) ...)` ordered point sequence, possibly empty
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointList(pub Vec<Point>);

impl PointList {
    /// Number of points
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the list holds no points
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over points in order
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.0.iter()
    }
}

impl From<Vec<Point>> for PointList {
    fn from(points: Vec<Point>) -> Self {
        PointList(points)
    }
}

/// Shift direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// y - 1
    Up,
    /// y + 1
    Down,
    /// x - 1
    Left,
    /// x + 1
    Right,
}

impl Direction {
    /// Parse a direction indicator
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Source spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// One unit of translation in canvas coordinates (y grows downwards)
    pub fn delta(&self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

/// Drawing primitive in an object's local coordinate space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// (line p1 p2)
    Line {
        /// Start point
        p1: Point,
        /// End point
        p2: Point,
    },

    /// (circle center radius)
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: Operand,
    },

    /// (path (p1 p2 p3 ...)) outlined polygon
    ClosedPath {
        /// Polygon vertices, at least three when rendered
        path: PointList,
    },

    /// (area.circle center radius) filled circle
    CircleArea {
        /// Center point
        center: Point,
        /// Radius
        radius: Operand,
    },

    /// (area.square center width height) filled rectangle
    SquareArea {
        /// Center point
        center: Point,
        /// Total width
        width: Operand,
        /// Total height
        height: Operand,
    },

    /// (area.path (p1 p2 p3 ...)) filled polygon
    ClosedPathArea {
        /// Polygon vertices, at least three when rendered
        path: PointList,
    },
}

impl DrawCommand {
    /// Command name as written in source
    pub fn name(&self) -> &'static str {
        match self {
            DrawCommand::Line { .. } => "line",
            DrawCommand::Circle { .. } => "circle",
            DrawCommand::ClosedPath { .. } => "path",
            DrawCommand::CircleArea { .. } => "area.circle",
            DrawCommand::SquareArea { .. } => "area.square",
            DrawCommand::ClosedPathArea { .. } => "area.path",
        }
    }

    /// True for the filled `area.*` variants
    pub fn is_area(&self) -> bool {
        matches!(
            self,
            DrawCommand::CircleArea { .. }
                | DrawCommand::SquareArea { .. }
                | DrawCommand::ClosedPathArea { .. }
        )
    }
}

/// Command that changes object state over simulated time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MoveCommand {
    /// (place target (x y))
    Place {
        /// Object to show
        target: Target,
        /// New base position
        position: Point,
    },

    /// (shift target direction)
    Shift {
        /// Object to move
        target: Target,
        /// One-unit step direction
        direction: Direction,
    },

    /// (erase target)
    Erase {
        /// Object to hide
        target: Target,
    },

    /// (loop times (move ...))
    Loop {
        /// Repetition count, truncated towards zero
        times: Operand,
        /// Moves repeated in full on every iteration
        moves: Vec<MoveCommand>,
    },
}

impl MoveCommand {
    /// Command name as written in source
    pub fn name(&self) -> &'static str {
        match self {
            MoveCommand::Place { .. } => "place",
            MoveCommand::Shift { .. } => "shift",
            MoveCommand::Erase { .. } => "erase",
            MoveCommand::Loop { .. } => "loop",
        }
    }
}

/// (define target (draw ...))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDefine {
    /// Object name
    pub target: Target,
    /// Shape in local coordinates
    pub draws: Vec<DrawCommand>,
}

/// Which list a command may appear in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandCategory {
    /// Drawing primitive
    Draw,
    /// State-changing movement
    Move,
    /// Object definition
    Define,
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandCategory::Draw => write!(f, "draw command"),
            CommandCategory::Move => write!(f, "move command"),
            CommandCategory::Define => write!(f, "object definition"),
        }
    }
}

/// Any parenthesized command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Drawing primitive
    Draw(DrawCommand),
    /// Movement
    Move(MoveCommand),
    /// Object definition
    Define(ObjectDefine),
}

impl Command {
    /// Category of this command
    pub fn category(&self) -> CommandCategory {
        match self {
            Command::Draw(_) => CommandCategory::Draw,
            Command::Move(_) => CommandCategory::Move,
            Command::Define(_) => CommandCategory::Define,
        }
    }

    /// Command name as written in source
    pub fn name(&self) -> &'static str {
        match self {
            Command::Draw(draw) => draw.name(),
            Command::Move(mv) => mv.name(),
            Command::Define(_) => "define",
        }
    }
}

// Display prints canonical source syntax that parses back to the same tree.

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.x, self.y)
    }
}

impl fmt::Display for PointList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.0)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Line { p1, p2 } => write!(f, "(line {} {})", p1, p2),
            DrawCommand::Circle { center, radius } => write!(f, "(circle {} {})", center, radius),
            DrawCommand::ClosedPath { path } => write!(f, "(path {})", path),
            DrawCommand::CircleArea { center, radius } => {
                write!(f, "(area.circle {} {})", center, radius)
            }
            DrawCommand::SquareArea {
                center,
                width,
                height,
            } => write!(f, "(area.square {} {} {})", center, width, height),
            DrawCommand::ClosedPathArea { path } => write!(f, "(area.path {})", path),
        }
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCommand::Place { target, position } => write!(f, "(place {} {})", target, position),
            MoveCommand::Shift { target, direction } => {
                write!(f, "(shift {} {})", target, direction)
            }
            MoveCommand::Erase { target } => write!(f, "(erase {})", target),
            MoveCommand::Loop { times, moves } => {
                write!(f, "(loop {} ", times)?;
                write_list(f, moves)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for ObjectDefine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(define {} ", self.target)?;
        write_list(f, &self.draws)?;
        f.write_str(")")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Draw(draw) => draw.fmt(f),
            Command::Move(mv) => mv.fmt(f),
            Command::Define(define) => define.fmt(f),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(")")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_symbols() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(Direction::from_symbol(direction.as_str()), Some(direction));
        }
        assert_eq!(Direction::from_symbol("north"), None);
        assert_eq!(Direction::Up.delta(), (0.0, -1.0));
        assert_eq!(Direction::Right.delta(), (1.0, 0.0));
    }

    #[test]
    fn test_display_canonical_syntax() {
        let define = Command::Define(ObjectDefine {
            target: Target::new("box"),
            draws: vec![
                DrawCommand::SquareArea {
                    center: Point::new(0.0, 0.0),
                    width: Operand(4.0),
                    height: Operand(2.5),
                },
                DrawCommand::ClosedPath {
                    path: vec![
                        Point::new(0.0, 0.0),
                        Point::new(1.0, 0.0),
                        Point::new(0.0, -1.0),
                    ]
                    .into(),
                },
            ],
        });
        assert_eq!(
            define.to_string(),
            "(define box ((area.square (0 0) 4 2.5) (path ((0 0) (1 0) (0 -1)))))"
        );

        let lp = MoveCommand::Loop {
            times: Operand(3.0),
            moves: vec![MoveCommand::Shift {
                target: Target::new("box"),
                direction: Direction::Left,
            }],
        };
        assert_eq!(lp.to_string(), "(loop 3 ((shift box left)))");
    }

    #[test]
    fn test_categories_and_names() {
        let erase = Command::Move(MoveCommand::Erase {
            target: Target::new("a"),
        });
        assert_eq!(erase.category(), CommandCategory::Move);
        assert_eq!(erase.name(), "erase");

        let circle = DrawCommand::CircleArea {
            center: Point::new(1.0, 1.0),
            radius: Operand(2.0),
        };
        assert!(circle.is_area());
        assert_eq!(circle.name(), "area.circle");
        assert!(!DrawCommand::Line {
            p1: Point::new(0.0, 0.0),
            p2: Point::new(1.0, 1.0)
        }
        .is_area());
    }
}
