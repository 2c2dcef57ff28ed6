//! Reading blobs and messages from arguments or stdin.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::errors::CliError;

/// The blob argument, or stdin when it is piped.
pub fn read_blob(arg: Option<&str>) -> anyhow::Result<String> {
    if let Some(value) = arg {
        return non_empty_blob(value.trim());
    }
    if io::stdin().is_terminal() {
        return Err(CliError::invalid_input(
            "No blob provided. Pass it as an argument or pipe it on stdin.",
        )
        .into());
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    non_empty_blob(buffer.trim())
}

fn non_empty_blob(value: &str) -> anyhow::Result<String> {
    if value.is_empty() {
        return Err(CliError::invalid_input("Blob is empty").into());
    }
    Ok(value.to_string())
}

/// Read a message piped on stdin. One trailing line break is dropped.
pub fn read_message_stdin() -> anyhow::Result<Zeroizing<String>> {
    let mut buffer = Zeroizing::new(String::new());
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    strip_line_break(&mut buffer);
    if buffer.is_empty() {
        return Err(CliError::invalid_input("No message provided on stdin").into());
    }
    Ok(buffer)
}

fn strip_line_break(text: &mut String) {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
}
