// parenc: S-expression to call-expression compiler

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use parenc::compiler::constants::MAX_INLINE_DEPTH;
use parenc::ui::App;
use parenc::{CompileOptions, Compiler};

/// What to print for each compiled line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Token stream
    Tokens,
    /// Input AST after optimization
    Ast,
    /// Generated call-expression text
    Output,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source file; each non-empty line is compiled on its own. Starts the REPL when omitted
    file: Option<PathBuf>,

    /// Compile a single expression and exit
    #[arg(short, long, conflicts_with = "file")]
    expr: Option<String>,

    /// Skip constant folding, dead-code elimination and inlining
    #[arg(long)]
    no_optimize: bool,

    /// How many inlined bodies may nest inside each other
    #[arg(long, default_value_t = MAX_INLINE_DEPTH)]
    max_inline_depth: usize,

    /// Output stage for batch mode
    #[arg(long, value_enum, default_value = "output")]
    emit: Emit,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let compiler = Compiler::new(CompileOptions {
        optimize: !cli.no_optimize,
        max_inline_depth: cli.max_inline_depth,
    });

    if let Some(expr) = &cli.expr {
        init_logging();
        return Ok(exit_code(emit(&compiler, cli.emit, expr, None)));
    }

    if let Some(path) = &cli.file {
        init_logging();
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Error: cannot read '{}': {}", path.display(), e);
                return Ok(ExitCode::FAILURE);
            }
        };

        let mut ok = true;
        for (index, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            ok &= emit(&compiler, cli.emit, line, Some(index + 1));
        }
        return Ok(exit_code(ok));
    }

    // Logging stays off in the REPL; stderr shares the alternate screen.
    run_repl(compiler)?;
    println!("Goodbye!");
    Ok(ExitCode::SUCCESS)
}

/// Log to stderr, filtered by `PARENC_LOG` (or `RUST_LOG`), warnings by default
fn init_logging() {
    let filter = EnvFilter::try_from_env("PARENC_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Compile one line and print the requested stage; false on error
fn emit(compiler: &Compiler, stage: Emit, source: &str, line: Option<usize>) -> bool {
    let printed = match stage {
        Emit::Tokens => compiler.tokens(source).map(|tokens| {
            tokens
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        }),
        Emit::Ast => compiler
            .optimized_ast(source)
            .map(|program| format!("{:#?}", program)),
        Emit::Output => compiler.compile(source),
    };

    match printed {
        Ok(text) => {
            println!("{}", text);
            true
        }
        Err(e) => {
            match line {
                Some(n) => eprintln!("line {}: {}", n, e),
                None => eprintln!("Error: {}", e),
            }
            false
        }
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_repl(compiler: Compiler) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(compiler);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }
    Ok(())
}
