use log::{error, info, warn};
use std::collections::HashMap;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::GuardConfig;
use crate::console::parser::{ConsoleCommand, parse_line};
use crate::error::{ConsoleError, FormGuardError};
use crate::guard::SubmitOutcome;
use crate::page::Page;

const MAX_LINE_LENGTH: usize = 8192;

/// Every configured page, loaded once and kept for the whole session so
/// error nodes and focus carry over between attempts.
pub struct Session {
    pages: HashMap<String, Page>,
}

impl Session {
    pub fn new(config: &GuardConfig) -> Result<Self, FormGuardError> {
        let mut pages = HashMap::new();
        for form in &config.forms {
            pages.insert(form.form_id.clone(), Page::load(form, config.classes())?);
        }
        Ok(Self { pages })
    }

    pub fn page(&self, form_id: &str) -> Option<&Page> {
        self.pages.get(form_id)
    }

    /// Runs one submit attempt on the named form.
    pub fn submit(
        &mut self,
        form_id: &str,
        values: &HashMap<String, String>,
    ) -> Result<SubmitOutcome, FormGuardError> {
        let page = self
            .pages
            .get_mut(form_id)
            .ok_or_else(|| ConsoleError::UnknownForm(form_id.to_string()))?;
        page.submit_values(values)
    }

    /// Handles one raw line. Returns `None` when the session should end.
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        let command = match parse_line(line) {
            Ok(command) => command,
            Err(e) => return Some(format!("ERROR {}\n", e)),
        };

        match command {
            ConsoleCommand::Quit => None,
            ConsoleCommand::Empty => Some(String::new()),
            ConsoleCommand::Submit { form_id, values } => match self.submit(&form_id, &values) {
                Ok(outcome) => Some(format_outcome(&form_id, &outcome)),
                Err(e) => {
                    warn!("Submit of {} failed: {}", form_id, e);
                    Some(format!("ERROR {}\n", e))
                }
            },
        }
    }
}

/// `SUBMIT <form>` or `BLOCKED <form> focus=<field>` plus one line per
/// invalid field.
pub fn format_outcome(form_id: &str, outcome: &SubmitOutcome) -> String {
    match outcome.first_invalid() {
        None => format!("SUBMIT {}\n", form_id),
        Some(focus) => {
            let mut reply = format!("BLOCKED {} focus={}\n", form_id, focus);
            for result in outcome.invalid() {
                reply.push_str(&format!("  {}: {}\n", result.field_id, result.message));
            }
            reply
        }
    }
}

/// Reads submit lines until EOF or `quit`, writing one reply per line.
/// Lines that are too long or not UTF-8 get an `ERROR` reply and the
/// session goes on.
pub async fn run_console<R, W>(session: &mut Session, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = reader;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                info!("Input closed, ending session");
                break;
            }
            Ok(_) => {
                if buf.len() > MAX_LINE_LENGTH {
                    warn!("Rejected {} byte line", buf.len());
                    writer.write_all(b"ERROR Line too long\n").await?;
                    writer.flush().await?;
                    continue;
                }

                let line = match std::str::from_utf8(&buf) {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Rejected non UTF-8 line: {}", e);
                        writer.write_all(b"ERROR Malformed submission: not UTF-8\n").await?;
                        writer.flush().await?;
                        continue;
                    }
                };

                match session.handle_line(line) {
                    Some(reply) => {
                        writer.write_all(reply.as_bytes()).await?;
                        writer.flush().await?;
                    }
                    None => {
                        info!("Quit requested, ending session");
                        break;
                    }
                }
            }
            Err(e) => {
                error!("Failed to read submission: {}", e);
                return Err(e);
            }
        }
    }

    writer.flush().await
}
