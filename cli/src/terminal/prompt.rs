use std::io::{self, BufRead, Write};

use colored::*;

use crate::terminal::colors;

const QUIT_WORDS: &[&str] = &["q", "quit", "exit"];

/// Asks one question on stderr and reads the answer from stdin.
///
/// Returns `None` when input is exhausted or the operator types a quit word.
pub fn ask(question: &str) -> io::Result<Option<String>> {
    let mut stderr = io::stderr().lock();
    write!(stderr, "{} {} ", "?".color(colors::ACCENT).bold(), question.color(colors::PRIMARY))?;
    stderr.flush()?;
    drop(stderr);

    read_answer(&mut io::stdin().lock())
}

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let answer = line.trim();
    if QUIT_WORDS.contains(&answer.to_ascii_lowercase().as_str()) {
        return Ok(None);
    }
    Ok(Some(answer.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
