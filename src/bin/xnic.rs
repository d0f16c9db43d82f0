use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xnilang::{
    compiler::dump_frames, render_page, Error, PageOptions, Pipeline, PipelineOptions,
    PipelineOutput, Scanner,
};

#[derive(Parser, Debug)]
#[command(name = "xnic", version, about = "Compile xnilang scripts to canvas animations")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile scripts to animation scripts, HTML pages or JSON.
    Compile(CompileArgs),
    /// Print the token stream of a script.
    Tokens(InputArgs),
    /// Print the parsed commands in canonical syntax.
    Ast(InputArgs),
    /// Print the frame listing of a compiled script.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input script.
    input: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    /// Input script.
    input: PathBuf,

    #[command(flatten)]
    options: OptionArgs,
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Input scripts; several inputs compile in parallel.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output path (single input only).
    #[arg(long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// Write each output into this directory, named after its input.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Emit a standalone HTML page instead of a bare script.
    #[arg(long, conflicts_with = "json")]
    html: bool,

    /// Emit the animation and script as JSON.
    #[arg(long)]
    json: bool,

    /// Worker threads for multiple inputs.
    #[arg(long)]
    threads: Option<usize>,

    #[command(flatten)]
    options: OptionArgs,
}

#[derive(Args, Debug)]
struct OptionArgs {
    /// JSON file with pipeline options; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Delay between frames in milliseconds.
    #[arg(long)]
    interval: Option<u32>,

    /// Play the animation once instead of looping.
    #[arg(long)]
    no_loop: bool,

    /// Canvas element id / variable name.
    #[arg(long)]
    canvas: Option<String>,

    /// Reject scripts with more tokens than this.
    #[arg(long)]
    max_tokens: Option<usize>,
}

impl OptionArgs {
    fn load(&self) -> anyhow::Result<PipelineOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("read config '{}'", path.display()))?;
                serde_json::from_str::<PipelineOptions>(&text)
                    .with_context(|| format!("parse config '{}'", path.display()))?
            }
            None => PipelineOptions::default(),
        };

        if let Some(interval) = self.interval {
            options.compile.interval_ms = interval;
        }
        if self.no_loop {
            options.compile.looped = false;
        }
        if let Some(canvas) = &self.canvas {
            options.compile.canvas = canvas.clone();
        }
        if self.max_tokens.is_some() {
            options.max_tokens = self.max_tokens;
        }
        Ok(options)
    }
}

impl CompileArgs {
    /// Config file and flags merged; flags win only when given
    fn pipeline_options(&self) -> anyhow::Result<PipelineOptions> {
        let mut options = self.options.load()?;
        if self.threads.is_some() {
            options.threads = self.threads;
        }
        Ok(options)
    }
}

/// Failure already reported to the user
#[derive(Debug)]
struct Reported;

impl std::fmt::Display for Reported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("compilation failed")
    }
}

impl std::error::Error for Reported {}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
        Command::Tokens(args) => cmd_tokens(args),
        Command::Ast(args) => cmd_ast(args),
        Command::Frames(args) => cmd_frames(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.downcast_ref::<Reported>().is_none() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("read script '{}'", path.display()))
}

/// Print a compiler error with the line and column it points at
fn report(path: &Path, source: &str, err: &Error) {
    match err.position() {
        Some(offset) => {
            let (line, column) = line_column(source, offset);
            eprintln!("{}:{}:{}: {}", path.display(), line, column, err);
        }
        None => eprintln!("{}: {}", path.display(), err),
    }
}

/// 1-indexed line and column of a character offset
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for c in source.chars().take(offset) {
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    if args.out.is_some() && args.inputs.len() > 1 {
        anyhow::bail!("--out accepts a single input; use --out-dir for several");
    }

    let pipeline = Pipeline::new(args.pipeline_options()?)?;

    let sources = args
        .inputs
        .iter()
        .map(|path| read_source(path))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let refs: Vec<&str> = sources.iter().map(String::as_str).collect();
    let results = pipeline.run_batch(&refs)?;

    let page = PageOptions {
        canvas: pipeline.options().compile.canvas.clone(),
        ..PageOptions::default()
    };

    let mut failed = false;
    for ((path, source), result) in args.inputs.iter().zip(&sources).zip(results) {
        let output = match result {
            Ok(output) => output,
            Err(err) => {
                report(path, source, &err);
                failed = true;
                continue;
            }
        };

        let text = if args.json {
            serde_json::to_string_pretty(&output).context("serialize output")?
        } else if args.html {
            let title = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            render_page(&output.script, &PageOptions { title, ..page.clone() })?
        } else {
            output.script.clone()
        };

        write_output(&args, path, &output, &text)?;
    }

    if failed {
        return Err(Reported.into());
    }
    Ok(())
}

fn write_output(
    args: &CompileArgs,
    input: &Path,
    output: &PipelineOutput,
    text: &str,
) -> anyhow::Result<()> {
    let target = match (&args.out, &args.out_dir) {
        (Some(out), _) => out.clone(),
        (None, Some(dir)) => {
            let extension = if args.json {
                "json"
            } else if args.html {
                "html"
            } else {
                "js"
            };
            let stem = input.file_stem().unwrap_or(input.as_os_str());
            dir.join(stem).with_extension(extension)
        }
        (None, None) => {
            println!("{text}");
            return Ok(());
        }
    };

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
    }
    fs::write(&target, text).with_context(|| format!("write '{}'", target.display()))?;

    eprintln!(
        "wrote {} ({} frames)",
        target.display(),
        output.animation.len()
    );
    Ok(())
}

fn cmd_tokens(args: InputArgs) -> anyhow::Result<()> {
    let source = read_source(&args.input)?;
    let tokens = Scanner::new(&source).scan_tokens().map_err(|err| {
        report(&args.input, &source, &err);
        Reported
    })?;

    for token in &tokens {
        println!(
            "{:>4}:{:<4} {:<10} {}",
            token.line,
            token.column,
            format!("{:?}", token.kind),
            token.symbol
        );
    }
    Ok(())
}

fn cmd_ast(args: InputArgs) -> anyhow::Result<()> {
    let source = read_source(&args.input)?;
    let program = Scanner::new(&source)
        .scan_tokens()
        .and_then(|tokens| xnilang::Parser::new(&tokens).parse())
        .map_err(|err| {
            report(&args.input, &source, &err);
            Reported
        })?;

    println!("{program}");
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let source = read_source(&args.input)?;
    let pipeline = Pipeline::new(args.options.load()?)?;
    let animation = pipeline.compile(&source).map_err(|err| {
        report(&args.input, &source, &err);
        Reported
    })?;

    print!("{}", dump_frames(&animation));
    Ok(())
}
