pub mod check;
pub mod config;
pub mod render;
pub mod templates;

/// Outcome of one CLI invocation: what to print and how to exit.
///
/// Happy paths print their natural payload (rendered HTML, a handle
/// listing, a JSON report); only failures wear the structured envelope.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn raw(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    /// Machine-readable failure envelope shared by every subcommand.
    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = serde_json::json!({
            "command": command,
            "status": "error",
            "error_class": error_class,
            "message": message.into(),
        });
        Self { exit_code, output: payload.to_string() }
    }
}
