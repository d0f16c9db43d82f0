/// End-to-end integration tests
/// Demonstrates: Scanner → Parser → Compiler → ScriptEmitter working together
use xnilang::compiler::render;
use xnilang::lexer::{Scanner, TokenKind};
use xnilang::parser::{Command, DrawCommand, Operand, Point, PointList};
use xnilang::{
    compile_source, CompileErrorKind, CompileOptions, Compiler, DrawOp, Error, LexErrorKind,
    ParseErrorKind, Parser, Pipeline, PipelineOptions, Vertex,
};

#[test]
fn test_e2e_tokenize_line() {
    let mut scanner = Scanner::new("(line (1 2) (3 4))");
    let tokens = scanner.scan_tokens().unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    let symbols: Vec<&str> = tokens.iter().map(|t| t.symbol.as_str()).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::LeftParen,
            TokenKind::Symbol,
            TokenKind::LeftParen,
            TokenKind::Integer,
            TokenKind::Integer,
            TokenKind::RightParen,
            TokenKind::LeftParen,
            TokenKind::Integer,
            TokenKind::Integer,
            TokenKind::RightParen,
            TokenKind::RightParen,
        ]
    );
    assert_eq!(
        symbols,
        vec!["(", "line", "(", "1", "2", ")", "(", "3", "4", ")", ")"]
    );
}

#[test]
fn test_e2e_parse_circle() {
    let tokens = Scanner::new("(circle (0 0) 5)").scan_tokens().unwrap();
    let program = Parser::new(&tokens).parse().unwrap();

    assert_eq!(
        program.commands,
        vec![Command::Draw(DrawCommand::Circle {
            center: Point::new(0.0, 0.0),
            radius: Operand(5.0),
        })]
    );
}

#[test]
fn test_e2e_single_place() {
    let pipeline = Pipeline::new(PipelineOptions::default()).unwrap();
    let animation = pipeline
        .compile("(define a ((circle (0 0) 5))) (place a (10 10))")
        .unwrap();

    assert_eq!(animation.len(), 1);
    assert_eq!(
        animation.frames[0].ops,
        vec![
            DrawOp::Clear,
            DrawOp::StrokeCircle {
                center: Vertex::new(10.0, 10.0),
                radius: 5.0,
            },
        ]
    );
}

#[test]
fn test_e2e_loop_moves_one_unit_per_frame() {
    let source = r#"
        (define a ((circle (0 0) 5)))
        (place a (10 10))
        (loop 4 ((shift a right)))
    "#;
    let pipeline = Pipeline::new(PipelineOptions::default()).unwrap();
    let animation = pipeline.compile(source).unwrap();

    // place + 4 shifts
    assert_eq!(animation.len(), 5);
    for (i, frame) in animation.frames.iter().enumerate() {
        assert_eq!(
            frame.ops[1],
            DrawOp::StrokeCircle {
                center: Vertex::new(10.0 + i as f64, 10.0),
                radius: 5.0,
            }
        );
    }
}

#[test]
fn test_e2e_multiple_objects_and_erase() {
    let source = r#"
        (define box ((area.square (0 0) 4 2)))
        (define dot ((circle (0 0) 1)))
        (place box (5 5))
        (place dot (0 0))
        (shift dot down)
        (erase box)
    "#;
    let pipeline = Pipeline::new(PipelineOptions::default()).unwrap();
    let animation = pipeline.compile(source).unwrap();

    assert_eq!(animation.len(), 4);
    // clear + fill + stroke for the box
    assert_eq!(animation.frames[0].len(), 3);
    // box, then dot on top
    assert_eq!(animation.frames[1].len(), 4);
    assert_eq!(
        animation.frames[2].ops[3],
        DrawOp::StrokeCircle {
            center: Vertex::new(0.0, 1.0),
            radius: 1.0,
        }
    );
    assert_eq!(animation.frames[3].len(), 2);
}

#[test]
fn test_e2e_square_equals_path_area() {
    let square = DrawCommand::SquareArea {
        center: Point::new(0.0, 0.0),
        width: Operand(4.0),
        height: Operand(2.0),
    };
    let path = DrawCommand::ClosedPathArea {
        path: PointList(vec![
            Point::new(-2.0, -1.0),
            Point::new(2.0, -1.0),
            Point::new(2.0, 1.0),
            Point::new(-2.0, 1.0),
        ]),
    };

    assert_eq!(
        render(7.0, 3.0, &[square]).unwrap(),
        render(7.0, 3.0, &[path]).unwrap()
    );
}

#[test]
fn test_e2e_degenerate_paths() {
    for points in ["", "(0 0)", "(0 0) (1 1)"] {
        for command in ["path", "area.path"] {
            let source = format!("(define a (({} ({})))) (place a (0 0))", command, points);
            let err = compile_source(&source, &CompileOptions::default()).unwrap_err();
            assert_eq!(err.compile_kind(), Some(CompileErrorKind::DegeneratePath));
        }
    }

    let ok = "(define a ((area.path ((0 0) (1 0) (0 1))))) (place a (0 0))";
    assert!(compile_source(ok, &CompileOptions::default()).is_ok());
}

#[test]
fn test_e2e_unknown_and_unplaced_targets() {
    let options = CompileOptions::default();
    for source in ["(shift ghost up)", "(erase ghost)"] {
        let err = compile_source(source, &options).unwrap_err();
        assert_eq!(err.compile_kind(), Some(CompileErrorKind::UnknownTarget));
    }
    for source in ["(define a ()) (shift a up)", "(define a ()) (erase a)"] {
        let err = compile_source(source, &options).unwrap_err();
        assert_eq!(err.compile_kind(), Some(CompileErrorKind::NotPlaced));
    }
}

#[test]
fn test_e2e_replace_reorders_display() {
    let tokens = Scanner::new(
        "(define a ((circle (0 0) 1))) (define b ((circle (0 0) 2))) \
         (place a (0 0)) (place b (0 0)) (place a (3 3))",
    )
    .scan_tokens()
    .unwrap();
    let program = Parser::new(&tokens).parse().unwrap();

    let mut compiler = Compiler::new(CompileOptions::default());
    for command in &program.commands {
        compiler.compile_command(command).unwrap();
    }
    assert_eq!(compiler.display_order(), &["b".to_string(), "a".to_string()]);

    let animation = compiler.finish();
    let last = &animation.frames[2].ops;
    assert_eq!(last.len(), 3);
    assert_eq!(
        last[2],
        DrawOp::StrokeCircle {
            center: Vertex::new(3.0, 3.0),
            radius: 1.0,
        }
    );
}

#[test]
fn test_e2e_error_stages() {
    let options = CompileOptions::default();

    let err = compile_source("(place a (1.2.3 0))", &options).unwrap_err();
    assert!(matches!(
        err,
        Error::Lex {
            kind: LexErrorKind::DuplicateDecimalPoint,
            ..
        }
    ));

    let err = compile_source("(spin a)", &options).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse {
            kind: ParseErrorKind::UnknownCommand(_),
            position: 1,
            ..
        }
    ));

    let err = compile_source("(define a ((line (0 0) (1 1))", &options).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse {
            kind: ParseErrorKind::UnterminatedList,
            ..
        }
    ));

    let err = compile_source("(line (0 0) (1 1))", &options).unwrap_err();
    assert_eq!(
        err.compile_kind(),
        Some(CompileErrorKind::InvalidTopLevelCommand)
    );
}

#[test]
fn test_e2e_script_playback_settings() {
    let options = CompileOptions {
        interval_ms: 100,
        looped: false,
        canvas: "stage".to_string(),
        ..CompileOptions::default()
    };
    let script = compile_source("(define a ((circle (0 0) 5))) (place a (1 1))", &options).unwrap();

    assert!(script.starts_with('{'));
    assert!(script.ends_with('}'));
    assert!(script.contains("var $interval = 100;"));
    assert!(script.contains("var $loop = false;"));
    assert!(script.contains("var $ctx = stage.getContext(\"2d\");"));
    assert!(script.contains("$ctx.clearRect(0, 0, stage.width, stage.height);"));
}

#[test]
fn test_e2e_ast_display_round_trip() {
    let source = "(define a ((area.square (0 0) 4 2) (path ((0 0) (1 0) (0 1))))) \
                  (place a (1.5 -2)) (loop 3 ((shift a up) (erase a) (place a (0 0))))";
    let tokens = Scanner::new(source).scan_tokens().unwrap();
    let program = Parser::new(&tokens).parse().unwrap();

    let printed = program.to_string();
    let tokens = Scanner::new(&printed).scan_tokens().unwrap();
    let reparsed = Parser::new(&tokens).parse().unwrap();
    assert_eq!(program, reparsed);
}

#[test]
fn test_e2e_structured_output_serializes() {
    let pipeline = Pipeline::new(PipelineOptions::default()).unwrap();
    let output = pipeline
        .run("(define a ((line (0 0) (1 1)))) (place a (0 0))")
        .unwrap();

    let json: serde_json::Value = serde_json::to_value(&output).unwrap();
    assert_eq!(json["animation"]["interval_ms"], 20);
    assert_eq!(json["animation"]["frames"][0]["ops"][0]["op"], "clear");
    assert_eq!(json["animation"]["frames"][0]["ops"][1]["op"], "stroke_line");
    assert!(json["script"].as_str().unwrap().contains("$frames.push"));
}

#[test]
fn test_e2e_coordinate_overflow_is_a_compile_error() {
    let huge = f64::MAX.to_string();
    let source = format!(
        "(define a ((circle ({} 0) 1))) (place a ({} 0))",
        huge, huge
    );
    let err = compile_source(&source, &CompileOptions::default()).unwrap_err();
    assert_eq!(err.compile_kind(), Some(CompileErrorKind::CoordinateOverflow));

    // Large but representable coordinates still compile
    let source = format!("(define a ((circle ({} 0) 1))) (place a (0 0))", huge);
    let script = compile_source(&source, &CompileOptions::default()).unwrap();
    assert!(!script.contains("inf"));
}
