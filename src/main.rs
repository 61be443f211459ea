use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use psh_lexer::format::{format_diagnostics, format_tokens, OutputFormat};
use psh_lexer::repl::{self, ReplOptions};
use psh_lexer::tokenize;

#[derive(Parser)]
#[command(name = "psh-lexer")]
#[command(about = "Tokenize shell command lines and print the tokens")]
#[command(version)]
struct Cli {
    /// Tokenize the given text and exit
    #[arg(short = 'c')]
    text: Option<String>,

    /// Script file to tokenize
    #[arg(short = 'f', long = "file")]
    file: Option<String>,

    /// Output tokens and diagnostics as JSON
    #[arg(long = "json")]
    json: bool,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Do not print diagnostics to stderr
    #[arg(long = "no-diagnostics")]
    no_diagnostics: bool,

    /// Script file to tokenize
    #[arg(conflicts_with = "file")]
    script_file: Option<String>,
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    // Determine source: -c, file, or stdin
    let script = if let Some(text) = cli.text {
        text
    } else if let Some(file) = cli.file.or(cli.script_file) {
        match std::fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error: Cannot read script file: {}: {}", file, e);
                return ExitCode::FAILURE;
            }
        }
    } else if io::stdin().is_terminal() {
        let options = ReplOptions {
            format,
            ..Default::default()
        };
        let stdin = io::stdin();
        return match repl::run(&mut stdin.lock(), &mut io::stdout(), &options) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("Error: Cannot read stdin: {}", e);
            return ExitCode::FAILURE;
        }
        buf
    };

    let lexed = tokenize(&script);
    println!("{}", format_tokens(&lexed, format));
    if format == OutputFormat::Text && !cli.no_diagnostics {
        eprint!("{}", format_diagnostics(&lexed));
    }

    if lexed.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
