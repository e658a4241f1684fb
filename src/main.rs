use mtkforth::runtime::{
    built_ins::register_all_words,
    error,
    interpreter::{
        BranchResolution, DEFAULT_MAX_CALL_DEPTH, InterpreterConfig,
        forth_interpreter::ForthInterpreter,
    },
};
use std::{
    env::{args, var},
    io::{BufRead, Write, stdin, stdout},
};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, for example `MTKFORTH_LOG=debug`.
const LOG_ENV: &str = "MTKFORTH_LOG";

/// Environment variable selecting how `if`/`else` find their targets.
const BRANCHES_ENV: &str = "MTKFORTH_BRANCHES";

/// Environment variable overriding how deeply compiled words may call each other.
const MAX_DEPTH_ENV: &str = "MTKFORTH_MAX_DEPTH";

const PROMPT: &str = "--> ";

/// Send log events to stderr so they never interleave with the interpreter's own output.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the interpreter configuration.  The `--nested-branches` flag wins, then the environment
/// variable, then the default first occurrence behaviour.
fn interpreter_config() -> InterpreterConfig {
    let flag = args().skip(1).any(|arg| arg == "--nested-branches");
    let from_env = var(BRANCHES_ENV)
        .map(|value| value.eq_ignore_ascii_case("nested"))
        .unwrap_or(false);

    let branch_resolution = if flag || from_env {
        BranchResolution::Nested
    } else {
        BranchResolution::FirstOccurrence
    };

    let max_call_depth = var(MAX_DEPTH_ENV)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_CALL_DEPTH);

    InterpreterConfig {
        branch_resolution,
        max_call_depth,
    }
}

/// Is a person typing at us?  When input is piped in the banner and prompts are left out.
#[cfg(unix)]
fn is_interactive() -> bool {
    // SAFETY: isatty only inspects the file descriptor.
    unsafe { libc::isatty(libc::STDIN_FILENO) == 1 }
}

#[cfg(not(unix))]
fn is_interactive() -> bool {
    true
}

fn print_banner() {
    println!("~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~");
    println!("          MTKFORTH            ");
    println!();
    println!(" - Hint: type 'words' (with   ");
    println!("   no quotes) to list words   ");
    println!();
    println!(" - Ctrl-D or Ctrl-C to exit   ");
    println!("~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~");
    println!();
}

fn prompt(interactive: bool) -> error::Result<()> {
    if interactive {
        print!("{}", PROMPT);
        stdout().flush()?;
    }

    Ok(())
}

/// A definition ends at the first `;`, even one written against the last word of the body.
fn has_terminator(text: &str) -> bool {
    text.contains(';')
}

/// Make the first `;` a token of its own, so `: sq dup *;` ends the same way as `: sq dup * ;`.
fn separate_terminator(buffer: String) -> String {
    match buffer.find(';') {
        Some(index) => format!("{} ; {}", &buffer[..index], &buffer[index + 1..]),
        None => buffer,
    }
}

/// Collect the next input unit.  A line starting with `:` opens a definition, which keeps taking
/// lines until one of them holds a `;`.  Returns None at the end of input.
fn read_input_unit(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    interactive: bool,
) -> error::Result<Option<String>> {
    prompt(interactive)?;

    let Some(first) = lines.next() else {
        return Ok(None);
    };

    let mut buffer = first?;

    if buffer.trim_start().starts_with(':') {
        while !has_terminator(&buffer) {
            prompt(interactive)?;

            match lines.next() {
                Some(line) => {
                    buffer.push(' ');
                    buffer.push_str(&line?);
                }

                // Let the compiler take whatever was typed before the input ran out.
                None => break,
            }
        }

        buffer = separate_terminator(buffer);
    }

    Ok(Some(buffer))
}

fn main() -> error::Result<()> {
    init_logging();

    let config = interpreter_config();
    tracing::info!(branch_resolution = ?config.branch_resolution, "starting interpreter");

    let mut interpreter = ForthInterpreter::with_config(config);
    register_all_words(&mut interpreter);

    let interactive = is_interactive();

    if interactive {
        print_banner();
    }

    let mut lines = stdin().lock().lines();

    while let Some(unit) = read_input_unit(&mut lines, interactive)? {
        if unit.trim().is_empty() {
            continue;
        }

        interpreter.process_line(&unit);
    }

    if interactive {
        println!();
    }

    Ok(())
}
