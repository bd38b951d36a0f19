//! Presentation adapters.
//!
//! The core hands back plain response strings; this module decides how
//! they reach the user: styled terminal output, raw text, or a file.

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use portal_core::Exchange;

/// Print a response under a styled header, closed with a rule.
pub fn print_styled(label: &str, response: &str) {
    println!();
    println!("{}", format!("{label}:").green().bold());
    println!("{response}");
    println!("{}", rule().green());
}

/// Print the raw response text, nothing else.
pub fn print_raw(response: &str) {
    println!("{response}");
}

fn rule() -> String {
    "─".repeat(48)
}

/// Persist a response as UTF-8, creating parent directories as needed.
pub fn save_to_file(path: &Path, response: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = std::fs::File::create(path)?;
    file.write_all(response.as_bytes())
}

/// Serialize a transcript as pretty JSON, insertion order preserved.
pub fn save_transcript(path: &Path, exchanges: &[Exchange]) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(exchanges).map_err(std::io::Error::other)?;
    save_to_file(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.md");
        save_to_file(&path, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn transcripts_round_trip_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.json");
        let exchanges = vec![
            Exchange {
                query: "hello".into(),
                response: "hi there".into(),
            },
            Exchange {
                query: "bye".into(),
                response: "".into(),
            },
        ];
        save_transcript(&path, &exchanges).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: Vec<Exchange> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, exchanges);
    }
}
