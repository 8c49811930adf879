use serde_json::Value;

use crate::error::GenerateError;

pub const MAX_PROMPT_CHARS: usize = 1000;

/// Checks the raw `prompt` field and returns the effective (trimmed) prompt.
///
/// Order matters: presence, then non-empty string after trimming, then the
/// length of the untrimmed text.
pub fn validate_prompt(prompt: Option<&Value>) -> Result<String, GenerateError> {
    let raw = match prompt {
        None | Some(Value::Null) => return Err(GenerateError::MissingPrompt),
        Some(Value::String(s)) => s,
        Some(_) => return Err(GenerateError::InvalidPrompt),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GenerateError::InvalidPrompt);
    }

    let len = raw.chars().count();
    if len > MAX_PROMPT_CHARS {
        return Err(GenerateError::PromptTooLong(len));
    }

    Ok(trimmed.to_string())
}

// Short form of a prompt for log lines
pub fn preview(prompt: &str) -> String {
    const PREVIEW_CHARS: usize = 50;
    if prompt.chars().count() > PREVIEW_CHARS {
        let head: String = prompt.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        prompt.to_string()
    }
}
