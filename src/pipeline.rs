//! End-to-end driver: source text → tokens → commands → animation → script
//!
//! Every run builds its own scanner, parser and compiler, so independent
//! scripts can be compiled concurrently without shared state.

use crate::codegen::ScriptEmitter;
use crate::compiler::{Animation, CompileOptions, Compiler};
use crate::error::{Error, Result};
use crate::lexer::Scanner;
use crate::parser::CommandParser;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Compiler and script settings
    pub compile: CompileOptions,
    /// Reject scripts with more tokens than this before parsing.
    ///
    /// Loops are unrolled at compile time, so output size is bounded only by
    /// what callers let in.
    pub max_tokens: Option<usize>,
    /// Worker threads for [`Pipeline::run_batch`] (default: rayon's global pool)
    pub threads: Option<usize>,
}

/// Result of one successful run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    /// Structured animation for hosts that render directly
    pub animation: Animation,
    /// Generated canvas script
    pub script: String,
}

/// Source-to-script compiler driver
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a pipeline, validating the compile options
    pub fn new(options: PipelineOptions) -> Result<Self> {
        options.compile.validate()?;
        if options.threads == Some(0) {
            return Err(Error::InvalidOptions(
                "thread count must be positive".to_string(),
            ));
        }
        Ok(Self { options })
    }

    /// Options in use
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Compile one script; the first error aborts the run
    pub fn run(&self, source: &str) -> Result<PipelineOutput> {
        let animation = self.compile(source)?;
        let script = ScriptEmitter::new(&self.options.compile).emit(&animation);
        tracing::debug!(bytes = script.len(), "script emitted");
        Ok(PipelineOutput { animation, script })
    }

    /// Compile one script to its animation without emitting a script
    pub fn compile(&self, source: &str) -> Result<Animation> {
        let tokens = Scanner::new(source).scan_tokens()?;
        tracing::debug!(tokens = tokens.len(), "tokenized");

        if let Some(limit) = self.options.max_tokens {
            if tokens.len() > limit {
                return Err(Error::InputTooLarge {
                    tokens: tokens.len(),
                    limit,
                });
            }
        }

        let program = CommandParser::new(&tokens).parse()?;
        tracing::debug!(commands = program.commands.len(), "parsed");

        let animation = Compiler::new(self.options.compile.clone()).compile(&program)?;
        tracing::debug!(frames = animation.len(), "compiled");
        Ok(animation)
    }

    /// Compile independent scripts in parallel; results keep input order
    pub fn run_batch(&self, sources: &[&str]) -> Result<Vec<Result<PipelineOutput>>> {
        let run_all = || {
            sources
                .par_iter()
                .map(|source| self.run(source))
                .collect::<Vec<_>>()
        };

        match self.options.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads.min(sources.len().max(1)))
                    .build()
                    .map_err(|e| {
                        Error::InvalidOptions(format!("Failed to create thread pool: {}", e))
                    })?;
                Ok(pool.install(run_all))
            }
            None => Ok(run_all()),
        }
    }
}
