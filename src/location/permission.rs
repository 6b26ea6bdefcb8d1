use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Answer to a location permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// How the host answers the permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PermissionPolicy {
    #[default]
    Granted,
    Denied,
    /// Ask on the terminal
    Prompt,
}

/// Text shown when asking for location access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRationale {
    pub title: String,
    pub message: String,
    pub button_neutral: String,
    pub button_negative: String,
    pub button_positive: String,
}

impl Default for PermissionRationale {
    fn default() -> Self {
        Self {
            title: "Location Permission".to_string(),
            message: "This app needs access to your location.".to_string(),
            button_neutral: "Ask Me Later".to_string(),
            button_negative: "Cancel".to_string(),
            button_positive: "OK".to_string(),
        }
    }
}

/// Ask for location access and read one answer line.
///
/// Only the positive button (by label or its first letter) grants access;
/// the neutral and negative answers, end of input and anything else deny it.
pub async fn prompt_permission<R, W>(
    rationale: &PermissionRationale,
    reader: &mut R,
    writer: &mut W,
) -> std::io::Result<Permission>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let prompt = format!(
        "{}\n{}\n[{}] [{}] [{}] > ",
        rationale.title,
        rationale.message,
        rationale.button_positive,
        rationale.button_negative,
        rationale.button_neutral,
    );
    writer.write_all(prompt.as_bytes()).await?;
    writer.flush().await?;

    let mut answer = String::new();
    reader.read_line(&mut answer).await?;
    let answer = answer.trim();

    let positive = &rationale.button_positive;
    let granted = answer.eq_ignore_ascii_case(positive)
        || answer.eq_ignore_ascii_case("y")
        || answer.eq_ignore_ascii_case("yes")
        || (answer.len() == 1
            && positive
                .get(..1)
                .is_some_and(|initial| initial.eq_ignore_ascii_case(answer)));

    Ok(if granted {
        Permission::Granted
    } else {
        Permission::Denied
    })
}
