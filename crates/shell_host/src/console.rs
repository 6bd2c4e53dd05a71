//! Console-bridge model: in-page console output mirrored to the shell's log sink.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Severity of a mirrored in-page console message.
pub enum ConsoleLevel {
    /// `console.log`.
    Log,
    /// `console.info`.
    Info,
    /// `console.warn`.
    Warn,
    /// `console.error`.
    Error,
    /// `console.debug`.
    Debug,
}

impl ConsoleLevel {
    /// Parses a page-supplied level name leniently; unknown names map to `Log`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "info" => Self::Info,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            "debug" => Self::Debug,
            _ => Self::Log,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One in-page console message as delivered over the console bridge.
pub struct ConsoleMessage {
    /// Console method the page invoked.
    pub level: ConsoleLevel,
    /// Message text after in-page stringification.
    pub message: String,
    /// Script source identifier (URL or inline marker), best effort.
    pub source_id: String,
    /// 1-based line number within the source, 0 when unknown.
    pub line_number: u32,
}

impl ConsoleMessage {
    /// Renders the log-sink line for this message.
    pub fn summary(&self) -> String {
        format!(
            "{} -- from line {} of {}",
            self.message, self.line_number, self.source_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsoleLevel, ConsoleMessage};

    #[test]
    fn parses_levels_leniently() {
        let cases = [
            ("log", ConsoleLevel::Log),
            ("INFO", ConsoleLevel::Info),
            ("warn", ConsoleLevel::Warn),
            ("warning", ConsoleLevel::Warn),
            ("error", ConsoleLevel::Error),
            ("debug", ConsoleLevel::Debug),
            ("trace", ConsoleLevel::Log),
            ("", ConsoleLevel::Log),
        ];
        for (raw, expected) in cases {
            assert_eq!(ConsoleLevel::parse(raw), expected, "raw={raw:?}");
        }
    }

    #[test]
    fn summary_carries_source_location() {
        let message = ConsoleMessage {
            level: ConsoleLevel::Warn,
            message: "segment cache miss".to_string(),
            source_id: "cable-map.js".to_string(),
            line_number: 42,
        };
        assert_eq!(
            message.summary(),
            "segment cache miss -- from line 42 of cable-map.js"
        );
    }

    #[test]
    fn deserializes_camel_case_bridge_payload() {
        let payload = r#"{"level":"error","message":"boom","sourceId":"inline","lineNumber":7}"#;
        let message: ConsoleMessage = serde_json::from_str(payload).expect("parse payload");
        assert_eq!(message.level, ConsoleLevel::Error);
        assert_eq!(message.line_number, 7);
    }
}
