//! Submission line parser
//!
//! One line is one submit attempt: `<form-id> <urlencoded body>`.

use std::collections::HashMap;
use url::form_urlencoded;

use crate::error::ConsoleError;

#[derive(Debug, PartialEq)]
pub enum ConsoleCommand {
    Submit {
        form_id: String,
        values: HashMap<String, String>,
    },
    Quit,
    Empty,
}

/// Parse a raw console line. A repeated key keeps its last value.
pub fn parse_line(raw: &str) -> Result<ConsoleCommand, ConsoleError> {
    let trimmed = raw.trim_end_matches(['\r', '\n']).trim_start();
    if trimmed.trim().is_empty() {
        return Ok(ConsoleCommand::Empty);
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let form_id = parts.next().unwrap_or("");
    // Trailing spaces belong to the last value, so only the start is trimmed
    let body = parts.next().unwrap_or("").trim_start();

    if body.is_empty() && matches!(form_id.to_ascii_lowercase().as_str(), "quit" | "exit") {
        return Ok(ConsoleCommand::Quit);
    }

    if form_id.contains(['=', '&']) {
        return Err(ConsoleError::Malformed(trimmed.to_string()));
    }

    let values = form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect::<HashMap<String, String>>();

    Ok(ConsoleCommand::Submit {
        form_id: form_id.to_string(),
        values,
    })
}
