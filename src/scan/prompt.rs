use crate::term::Console;
use std::io::BufRead;

/// Blank or non-numeric input means "no filter".
pub fn parse_year(input: &str) -> Option<i32> {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

pub fn ask_year<R: BufRead>(input: &mut R, console: &Console) -> Option<i32> {
    console.prompt(
        "Do you want to filter repositories by creation year? (Enter a year or press Enter to scan all)",
    );
    console.ask("Year: ");
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(_) => parse_year(&line),
        Err(e) => {
            tracing::warn!("could not read year from stdin: {e}");
            None
        }
    }
}
