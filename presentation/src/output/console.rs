//! Console output formatter for chat replies and backend status

use colored::Colorize;
use twin_domain::BackendHealth;

/// Formats chat output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Status badge for the backend connection state
    pub fn status_badge(health: &BackendHealth) -> String {
        match health {
            BackendHealth::Connecting => format!("{} {}", "o".yellow(), health.label().yellow()),
            BackendHealth::Online(_) => format!("{} {}", "*".green(), health.label().green()),
            BackendHealth::Disconnected => format!("{} {}", "x".red(), health.label().red()),
        }
    }

    /// Error line for a failed request
    pub fn error_line(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    /// One-shot exchange as JSON
    pub fn reply_json(message: &str, reply: &str, streamed: bool) -> String {
        serde_json::to_string_pretty(&serde_json::json!({
            "message": message,
            "reply": reply,
            "streamed": streamed,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_badge_includes_backend_label() {
        let badge =
            ConsoleFormatter::status_badge(&BackendHealth::Online("Service running".to_string()));
        assert!(badge.contains("Service running"));

        let badge = ConsoleFormatter::status_badge(&BackendHealth::Disconnected);
        assert!(badge.contains("Disconnected"));
    }

    #[test]
    fn reply_json_is_valid_json() {
        let json = ConsoleFormatter::reply_json("hi", "hello there", true);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["message"], "hi");
        assert_eq!(value["reply"], "hello there");
        assert_eq!(value["streamed"], true);
    }
}
