use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};
use memmap2::Mmap;

use loxide as lox;

use lox::ast::Stmt;
use lox::ast_printer::AstPrinter;
use lox::interpreter::Interpreter;
use lox::parser::Parser;
use lox::report::Reporter;
use lox::resolver::Resolver;
use lox::scanner::Scanner;
use lox::token::Token;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Option<Commands>,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Emit tokens as JSON instead of the line-per-token form
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file and prints the syntax tree
    Parse { filename: PathBuf },

    /// Runs input from a file as a Lox program
    Run { filename: PathBuf },
}

/// Maps the file read-only and validates it as UTF-8. Mapping a zero-length
/// file fails on some platforms, so empty files short-circuit.
fn read_file(filename: &PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;

    let len: u64 = file
        .metadata()
        .context(format!("Failed to stat file {:?}", filename))?
        .len();

    if len == 0 {
        return Ok(String::new());
    }

    let mmap: Mmap = unsafe {
        Mmap::map(&file).context(format!("Failed to memory-map file {:?}", filename))?
    };

    let source: &str = std::str::from_utf8(&mmap)
        .context(format!("File {:?} is not valid UTF-8", filename))?;

    info!("Read {} bytes from {:?}", source.len(), filename);

    Ok(source.to_owned())
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'loxide::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("loxide::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

/// Front half of the pipeline: scan and parse, reporting diagnostics
/// through `reporter`.
fn parse_source(source: &str, reporter: &mut Reporter) -> Vec<Stmt> {
    let tokens: Vec<Token> = Scanner::new(source).scan_tokens(reporter);

    debug!("Scanned {} token(s)", tokens.len());

    Parser::new(&tokens, reporter).parse()
}

fn run_file(filename: &PathBuf) -> Result<()> {
    let source: String = read_file(filename)?;
    let mut reporter = Reporter::new();

    let statements: Vec<Stmt> = parse_source(&source, &mut reporter);

    if reporter.had_error() {
        debug!("Lexical or parse errors, exiting with code 65");
        std::process::exit(65);
    }

    let locals = Resolver::new(&mut reporter).resolve(&statements);

    if reporter.had_error() {
        debug!("Resolution errors, exiting with code 65");
        std::process::exit(65);
    }

    let mut interpreter = Interpreter::new();
    interpreter.add_resolutions(locals);
    interpreter.interpret(&statements, &mut reporter);

    if reporter.had_runtime_error() {
        debug!("Runtime error, exiting with code 70");
        std::process::exit(70);
    }

    info!("Program executed successfully");

    Ok(())
}

/// Interactive prompt. The interpreter persists across lines, so
/// definitions from earlier lines stay visible; diagnostics reset per line
/// so one bad line does not poison the session.
fn run_prompt() -> Result<()> {
    info!("Starting interactive session");

    let stdin = io::stdin();
    let mut interpreter = Interpreter::new();
    let mut reporter = Reporter::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes: usize = stdin.lock().read_line(&mut line)?;

        // EOF or a blank line ends the session.
        if bytes == 0 || line.trim().is_empty() {
            info!("Interactive session ended");
            return Ok(());
        }

        reporter.reset();

        let statements: Vec<Stmt> = parse_source(&line, &mut reporter);

        if reporter.had_error() {
            continue;
        }

        let locals = Resolver::new(&mut reporter).resolve(&statements);

        if reporter.had_error() {
            continue;
        }

        interpreter.add_resolutions(locals);
        interpreter.interpret(&statements, &mut reporter);
    }
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Some(Commands::Tokenize { filename, json }) => {
            info!("Running Tokenize subcommand");

            let source: String = read_file(&filename)?;
            let mut tokenized = true;

            let mut tokens: Vec<Token> = Vec::new();

            for token in Scanner::new(&source) {
                match token {
                    Ok(token) => {
                        debug!("Scanned token: {}", token);
                        tokens.push(token);
                    }

                    Err(e) => {
                        tokenized = false;

                        debug!("Tokenization debug: {}", e);
                        eprintln!("{}", e);
                    }
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else {
                for token in &tokens {
                    println!("{}", token);
                }
            }

            if !tokenized {
                debug!("Tokenization failed, exiting with code 65");
                std::process::exit(65);
            }

            info!("Tokenization completed successfully");
        }

        Some(Commands::Parse { filename }) => {
            info!("Running Parse subcommand");

            let source: String = read_file(&filename)?;
            let mut reporter = Reporter::new();

            let statements: Vec<Stmt> = parse_source(&source, &mut reporter);

            if reporter.had_error() {
                debug!("Parse failed, exiting with code 65");
                std::process::exit(65);
            }

            let printer = AstPrinter::new();

            for stmt in &statements {
                println!("{}", printer.print_stmt(stmt));
            }

            info!("Parse subcommand completed");
        }

        Some(Commands::Run { filename }) => {
            info!("Running Run subcommand");
            run_file(&filename)?;
        }

        None => run_prompt()?,
    }

    Ok(())
}
