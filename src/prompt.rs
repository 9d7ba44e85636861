//! Yes/no confirmation prompts gating destructive operations.
//!
//! Answer parsing is pure so the lifecycle decision procedure can be tested
//! with scripted answers. IO happens only in [`confirm`].

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{BufRead, Write};

/// Interpret one line of user input.
///
/// Empty input selects the default; anything unrecognized returns `None`
/// and the caller re-prompts.
pub(crate) fn parse_answer(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn hint(default: bool) -> &'static str {
    if default {
        "[Y/n]"
    } else {
        "[y/N]"
    }
}

/// Ask a yes/no question on stdin, re-prompting until an answer parses.
pub(crate) fn confirm(question: &str, default: bool) -> Result<bool> {
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("{} {} ", question.yellow(), hint(default).dimmed());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        line.clear();
        stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read answer")?;

        if let Some(answer) = parse_answer(&line, default) {
            return Ok(answer);
        }
        println!("Please answer 'y' or 'n'.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_answers() {
        assert_eq!(parse_answer("y", false), Some(true));
        assert_eq!(parse_answer("yes", false), Some(true));
        assert_eq!(parse_answer("YES", false), Some(true));
        assert_eq!(parse_answer("n", true), Some(false));
        assert_eq!(parse_answer("No", true), Some(false));
    }

    #[test]
    fn test_empty_takes_default() {
        assert_eq!(parse_answer("", true), Some(true));
        assert_eq!(parse_answer("\n", true), Some(true));
        assert_eq!(parse_answer("", false), Some(false));
    }

    #[test]
    fn test_garbage_reprompts() {
        assert_eq!(parse_answer("maybe", true), None);
        assert_eq!(parse_answer("yeah nah", false), None);
    }

    #[test]
    fn test_hint_matches_default() {
        assert_eq!(hint(true), "[Y/n]");
        assert_eq!(hint(false), "[y/N]");
    }
}
