//! Interactive read loop: prompt, read a line, print its tokens.

use std::io::{self, BufRead, Write};

use crate::format::{format_diagnostics, format_tokens, OutputFormat};
use crate::lexer::tokenize;

#[derive(Debug, Clone)]
pub struct ReplOptions {
    pub prompt: String,
    pub format: OutputFormat,
}

impl Default for ReplOptions {
    fn default() -> Self {
        Self {
            prompt: "$ ".to_string(),
            format: OutputFormat::Text,
        }
    }
}

/// Read one line, without its trailing newline. `None` at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Run the loop until `input` is exhausted. Diagnostics are printed after
/// the tokens of their line and never end the loop.
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    options: &ReplOptions,
) -> io::Result<()> {
    loop {
        write!(output, "{}", options.prompt)?;
        output.flush()?;

        let line = match read_line(input)? {
            Some(line) => line,
            None => break,
        };
        if line.is_empty() {
            continue;
        }

        let lexed = tokenize(&line);
        writeln!(output, "{}", format_tokens(&lexed, options.format))?;
        if options.format == OutputFormat::Text {
            write!(output, "{}", format_diagnostics(&lexed))?;
        }
    }
    writeln!(output)?;
    Ok(())
}
