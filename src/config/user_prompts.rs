//! Interactive prompts used by the config editing commands

use crate::error::AppError;
use tokio::io::{self, AsyncBufReadExt};

/// Prompts for a STRATZ API token on stdin and returns the trimmed input.
///
/// Used when `--set-token` is given without a value, so the token does not
/// end up in shell history.
pub async fn prompt_for_stratz_token() -> Result<String, AppError> {
    println!("Paste your STRATZ API token (https://stratz.com/api): ");
    let mut input = String::new();
    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin);
    reader.read_line(&mut input).await?;
    Ok(input.trim().to_string())
}
