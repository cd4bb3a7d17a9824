//! Routing Decision Parser.
//!
//! The routing model is an unreliable producer of structured data, so the
//! parser is total: every input yields a [`RoutingDecision`].
//!
//! 1. Trim the text.
//! 2. Any case-insensitive `NO_TOOL` wins, even next to a JSON blob.
//! 3. Take the greedy `{ ... }` span (first `{` to last `}`).
//! 4. Parse it; malformed JSON degrades to `NoTool`.
//! 5. Require `tool_name` and `tool_input`; otherwise `NoTool`.

use regex_lite::Regex;
use routeclaw_core::routing::{DecisionParser, RoutingDecision, ToolArguments};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, warn};

pub const NO_TOOL_SENTINEL: &str = "NO_TOOL";

const PREVIEW_CHARS: usize = 50;

fn json_object_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("static regex is valid"))
}

/// Heuristic parser for free-text model output with an embedded JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecisionParser;

impl JsonDecisionParser {
    pub fn new() -> Self {
        Self
    }
}

impl DecisionParser for JsonDecisionParser {
    fn parse(&self, raw_text: &str) -> RoutingDecision {
        let text = raw_text.trim();

        if text.to_uppercase().contains(NO_TOOL_SENTINEL) {
            debug!("Routing: model answered NO_TOOL");
            return RoutingDecision::NoTool;
        }

        let Some(candidate) = json_object_pattern().find(text) else {
            debug!("Routing: no JSON object in model output");
            return RoutingDecision::NoTool;
        };

        let value: Value = match serde_json::from_str(candidate.as_str()) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, preview = %preview(text), "Routing: failed to parse tool JSON");
                return RoutingDecision::NoTool;
            }
        };

        match decision_from_value(&value) {
            Some(decision) => decision,
            None => {
                warn!(json = %value, "Routing: JSON found but structure is not {{tool_name, tool_input}}");
                RoutingDecision::NoTool
            }
        }
    }
}

fn decision_from_value(value: &Value) -> Option<RoutingDecision> {
    let object = value.as_object()?;
    let name = object.get("tool_name")?.as_str()?.trim();
    let input = object.get("tool_input")?.as_object()?;

    let arguments: ToolArguments = input
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), text))
        })
        .collect();

    match RoutingDecision::tool_call(name, arguments) {
        RoutingDecision::NoTool => None,
        decision => Some(decision),
    }
}

/// First `PREVIEW_CHARS` characters of `text`, with an ellipsis when cut.
fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> RoutingDecision {
        JsonDecisionParser.parse(text)
    }

    fn call(name: &str, pairs: &[(&str, &str)]) -> RoutingDecision {
        RoutingDecision::ToolCall {
            name: name.into(),
            arguments: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    #[test]
    fn bare_sentinel_is_no_tool() {
        assert_eq!(parse("NO_TOOL"), RoutingDecision::NoTool);
        assert_eq!(parse("  no_tool\n"), RoutingDecision::NoTool);
    }

    #[test]
    fn sentinel_beats_json() {
        let raw = r#"{"tool_name": "info_empresa_contacto_filosofia", "tool_input": {"tema": "historia"}} o quizás NO_TOOL"#;
        assert_eq!(parse(raw), RoutingDecision::NoTool);
    }

    #[test]
    fn json_wrapped_in_prose() {
        let raw = r#"Claro, aquí está: {"tool_name": "info_empresa_contacto_filosofia", "tool_input": {"tema": "horario"}}"#;
        assert_eq!(
            parse(raw),
            call("info_empresa_contacto_filosofia", &[("tema", "horario")])
        );
    }

    #[test]
    fn json_in_code_fence_with_trailing_text() {
        let raw = "```json\n{\n  \"tool_name\": \"echo\",\n  \"tool_input\": {\"a\": \"1\", \"b\": \"2\"}\n}\n```\nEspero que ayude.";
        assert_eq!(parse(raw), call("echo", &[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn plain_prose_is_no_tool() {
        assert_eq!(parse("El check-in es a las 15:00."), RoutingDecision::NoTool);
        assert_eq!(parse(""), RoutingDecision::NoTool);
    }

    #[test]
    fn malformed_json_is_no_tool() {
        assert_eq!(parse(r#"{"tool_name": "echo", "tool_input": {"#), RoutingDecision::NoTool);
        assert_eq!(parse("{tool_name: echo}"), RoutingDecision::NoTool);
    }

    #[test]
    fn greedy_span_across_two_objects_is_malformed() {
        // First `{` to last `}` covers both objects, which is not valid JSON.
        let raw = r#"{"tool_name": "a", "tool_input": {}} y {"tool_name": "b", "tool_input": {}}"#;
        assert_eq!(parse(raw), RoutingDecision::NoTool);
    }

    #[test]
    fn missing_keys_are_no_tool() {
        assert_eq!(parse(r#"{"tool_name": "echo"}"#), RoutingDecision::NoTool);
        assert_eq!(parse(r#"{"tool_input": {"tema": "x"}}"#), RoutingDecision::NoTool);
        assert_eq!(parse(r#"{"name": "echo", "arguments": {}}"#), RoutingDecision::NoTool);
    }

    #[test]
    fn blank_or_non_string_name_is_no_tool() {
        assert_eq!(parse(r#"{"tool_name": " ", "tool_input": {}}"#), RoutingDecision::NoTool);
        assert_eq!(parse(r#"{"tool_name": 7, "tool_input": {}}"#), RoutingDecision::NoTool);
    }

    #[test]
    fn non_object_input_is_no_tool() {
        assert_eq!(parse(r#"{"tool_name": "echo", "tool_input": "horario"}"#), RoutingDecision::NoTool);
    }

    #[test]
    fn non_string_arguments_are_stringified() {
        let raw = r#"{"tool_name": "echo", "tool_input": {"noches": 3, "mascota": true, "nota": null}}"#;
        assert_eq!(parse(raw), call("echo", &[("mascota", "true"), ("noches", "3")]));
    }

    #[test]
    fn empty_input_object_is_tool_call() {
        assert_eq!(
            parse(r#"{"tool_name": "info_empresa_contacto_filosofia", "tool_input": {}}"#),
            call("info_empresa_contacto_filosofia", &[])
        );
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = "á".repeat(80);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
        assert_eq!(preview("corto"), "corto");
    }
}
