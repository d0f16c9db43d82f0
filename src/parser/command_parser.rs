use super::ast::{
    Command, CommandCategory, Direction, DrawCommand, MoveCommand, ObjectDefine, Operand, Point,
    PointList, Program, Target,
};
use crate::error::{Error, ParseErrorKind, Result};
use crate::lexer::Token;

/// Recursive-descent parser producing one [`Command`] per parenthesized form.
///
/// Parsing is single pass and driven entirely by the first symbol after `(`.
pub struct CommandParser<'t> {
    tokens: &'t [Token],
    current: usize,
}

/// Parse one command starting at `cursor`, returning it with the cursor just past it
pub fn parse_command(tokens: &[Token], cursor: usize) -> Result<(Command, usize)> {
    let mut parser = CommandParser::at(tokens, cursor);
    let command = parser.parse_command()?;
    Ok((command, parser.cursor()))
}

impl<'t> CommandParser<'t> {
    /// Creates a parser positioned at the first token
    pub fn new(tokens: &'t [Token]) -> Self {
        Self::at(tokens, 0)
    }

    /// Creates a parser positioned at `cursor`
    pub fn at(tokens: &'t [Token], cursor: usize) -> Self {
        CommandParser {
            tokens,
            current: cursor.min(tokens.len()),
        }
    }

    /// Index of the next unread token
    pub fn cursor(&self) -> usize {
        self.current
    }

    /// True once every token has been consumed
    pub fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Parses every remaining top-level command
    pub fn parse(&mut self) -> Result<Program> {
        let mut commands = Vec::new();

        while !self.is_at_end() {
            commands.push(self.parse_command()?);
        }

        Ok(Program { commands })
    }

    /// Parses `( symbol body )`
    pub fn parse_command(&mut self) -> Result<Command> {
        self.consume_left_paren()?;

        let name_position = self.position();
        let name = self.consume_symbol()?;

        let command = match name.as_str() {
            "line" => {
                let p1 = self.parse_point()?;
                let p2 = self.parse_point()?;
                Command::Draw(DrawCommand::Line { p1, p2 })
            }
            "circle" => {
                let center = self.parse_point()?;
                let radius = self.parse_operand()?;
                Command::Draw(DrawCommand::Circle { center, radius })
            }
            "path" => {
                let path = self.parse_point_list()?;
                Command::Draw(DrawCommand::ClosedPath { path })
            }
            "area.circle" => {
                let center = self.parse_point()?;
                let radius = self.parse_operand()?;
                Command::Draw(DrawCommand::CircleArea { center, radius })
            }
            "area.square" => {
                let center = self.parse_point()?;
                let width = self.parse_operand()?;
                let height = self.parse_operand()?;
                Command::Draw(DrawCommand::SquareArea {
                    center,
                    width,
                    height,
                })
            }
            "area.path" => {
                let path = self.parse_point_list()?;
                Command::Draw(DrawCommand::ClosedPathArea { path })
            }
            "define" => {
                let target = self.parse_target()?;
                let draws = self.parse_draw_list()?;
                Command::Define(ObjectDefine { target, draws })
            }
            "place" => {
                let target = self.parse_target()?;
                let position = self.parse_point()?;
                Command::Move(MoveCommand::Place { target, position })
            }
            "shift" => {
                let target = self.parse_target()?;
                let direction = self.parse_direction()?;
                Command::Move(MoveCommand::Shift { target, direction })
            }
            "erase" => {
                let target = self.parse_target()?;
                Command::Move(MoveCommand::Erase { target })
            }
            "loop" => {
                let times = self.parse_operand()?;
                let moves = self.parse_move_list()?;
                Command::Move(MoveCommand::Loop { times, moves })
            }
            _ => {
                return Err(Error::Parse {
                    position: name_position,
                    kind: ParseErrorKind::UnknownCommand(name.clone()),
                    expected: "command name".to_string(),
                    found: format!("symbol `{}`", name),
                });
            }
        };

        self.consume_right_paren()?;
        Ok(command)
    }

    /// Parse `( draw-command* )`
    fn parse_draw_list(&mut self) -> Result<Vec<DrawCommand>> {
        self.parse_command_list(CommandCategory::Draw, |command| match command {
            Command::Draw(draw) => Some(draw),
            _ => None,
        })
    }

    /// Parse `( move-command* )`
    fn parse_move_list(&mut self) -> Result<Vec<MoveCommand>> {
        self.parse_command_list(CommandCategory::Move, |command| match command {
            Command::Move(mv) => Some(mv),
            _ => None,
        })
    }

    fn parse_command_list<T>(
        &mut self,
        category: CommandCategory,
        select: impl Fn(Command) -> Option<T>,
    ) -> Result<Vec<T>> {
        self.consume_left_paren()?;

        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.unterminated_list()),
                Some(token) if token.is_right_parenthesis() => break,
                Some(_) => {
                    let position = self.position();
                    let command = self.parse_command()?;
                    let name = command.name();
                    match select(command) {
                        Some(item) => items.push(item),
                        None => {
                            return Err(Error::Parse {
                                position,
                                kind: ParseErrorKind::WrongCommandCategory,
                                expected: category.to_string(),
                                found: format!("`{}`", name),
                            });
                        }
                    }
                }
            }
        }

        self.consume_right_paren()?;
        Ok(items)
    }

    /// Parse `( point* )`
    fn parse_point_list(&mut self) -> Result<PointList> {
        self.consume_left_paren()?;

        let mut points = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.unterminated_list()),
                Some(token) if token.is_right_parenthesis() => break,
                Some(_) => points.push(self.parse_point()?),
            }
        }

        self.consume_right_paren()?;
        Ok(PointList(points))
    }

    /// Parse `( operand operand )`
    fn parse_point(&mut self) -> Result<Point> {
        self.consume_left_paren()?;
        let x = self.parse_operand()?;
        let y = self.parse_operand()?;
        self.consume_right_paren()?;
        Ok(Point { x, y })
    }

    fn parse_operand(&mut self) -> Result<Operand> {
        match self.peek() {
            Some(token) if token.is_operand() => {
                let value = token.symbol.parse::<f64>().map_err(|_| Error::Parse {
                    position: token.position,
                    kind: ParseErrorKind::MissingOperand,
                    expected: "number".to_string(),
                    found: token.to_string(),
                })?;
                self.current += 1;
                Ok(Operand(value))
            }
            _ => Err(self.expected_error(ParseErrorKind::MissingOperand, "operand")),
        }
    }

    fn parse_target(&mut self) -> Result<Target> {
        Ok(Target(self.consume_symbol()?))
    }

    fn parse_direction(&mut self) -> Result<Direction> {
        let position = self.position();
        let symbol = self.consume_symbol()?;
        Direction::from_symbol(&symbol).ok_or_else(|| Error::Parse {
            position,
            kind: ParseErrorKind::InvalidDirection(symbol.clone()),
            expected: "one of up, down, left, right".to_string(),
            found: format!("symbol `{}`", symbol),
        })
    }

    // Helper methods

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.current)
    }

    /// Source offset of the next token, or just past the last one at the end
    fn position(&self) -> usize {
        match self.peek() {
            Some(token) => token.position,
            None => self
                .tokens
                .last()
                .map(|t| t.position + t.symbol.chars().count())
                .unwrap_or(0),
        }
    }

    fn consume_symbol(&mut self) -> Result<String> {
        match self.peek() {
            Some(token) if token.is_symbol() => {
                self.current += 1;
                Ok(token.symbol.clone())
            }
            _ => Err(self.expected_error(ParseErrorKind::MissingSymbol, "symbol")),
        }
    }

    fn consume_left_paren(&mut self) -> Result<()> {
        match self.peek() {
            Some(token) if token.is_left_parenthesis() => {
                self.current += 1;
                Ok(())
            }
            _ => Err(self.expected_error(ParseErrorKind::MissingParenthesis, "`(`")),
        }
    }

    fn consume_right_paren(&mut self) -> Result<()> {
        match self.peek() {
            Some(token) if token.is_right_parenthesis() => {
                self.current += 1;
                Ok(())
            }
            _ => Err(self.expected_error(ParseErrorKind::MissingParenthesis, "`)`")),
        }
    }

    /// Syntax error at the current token; running out of tokens is reported as such
    fn expected_error(&self, kind: ParseErrorKind, expected: &str) -> Error {
        let (kind, found) = match self.peek() {
            Some(token) => (kind, token.to_string()),
            None => (ParseErrorKind::UnexpectedEnd, "end of script".to_string()),
        };
        Error::Parse {
            position: self.position(),
            kind,
            expected: expected.to_string(),
            found,
        }
    }

    fn unterminated_list(&self) -> Error {
        Error::Parse {
            position: self.position(),
            kind: ParseErrorKind::UnterminatedList,
            expected: "`)`".to_string(),
            found: "end of script".to_string(),
        }
    }
}
