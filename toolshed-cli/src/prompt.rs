/// Small stdin prompt helpers for the interactive loop
use std::io::{self, Write};

/// Prints a prompt and reads one trimmed line from stdin.
///
/// # Errors
///
/// Returns an error if stdin is closed or unreadable.
pub fn line(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Like [`line`], but lowercases the answer. Used for menu choices.
pub fn choice(label: &str) -> io::Result<String> {
    Ok(line(label)?.to_lowercase())
}

/// Prompts a yes/no question. Returns None for anything other than y/n.
pub fn yes_no(label: &str) -> io::Result<Option<bool>> {
    match choice(label)?.as_str() {
        "y" => Ok(Some(true)),
        "n" => Ok(Some(false)),
        _ => Ok(None),
    }
}
