//! The `analyzePrompt` tool: the structured output a routing model must return
//!
//! The schema is advertised to the model with every request; the model's
//! invocation arguments are validated with [`ToolInput::from_value`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::ports::ToolInputError;

/// A callable tool as advertised to the model
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: InputSchema,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: AnalyzePromptProperties,
    pub required: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzePromptProperties {
    pub userinput: PropertySpec,
    pub selected_agent: PropertySpec,
    pub confidence: PropertySpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertySpec {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'static str,
}

pub const USER_INPUT: &str = "userinput";
pub const SELECTED_AGENT: &str = "selected_agent";
pub const CONFIDENCE: &str = "confidence";

pub const ANALYZE_PROMPT_TOOL: ToolSpec = ToolSpec {
    name: "analyzePrompt",
    description: "Analyze the user input and provide structured output",
    input_schema: InputSchema {
        kind: "object",
        properties: AnalyzePromptProperties {
            userinput: PropertySpec {
                kind: "string",
                description: "The original user input",
            },
            selected_agent: PropertySpec {
                kind: "string",
                description: "The name of the selected agent",
            },
            confidence: PropertySpec {
                kind: "number",
                description: "Confidence level between 0 and 1",
            },
        },
        required: &[USER_INPUT, SELECTED_AGENT, CONFIDENCE],
    },
};

/// Validated arguments of an `analyzePrompt` invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInput {
    pub userinput: String,
    pub selected_agent: String,
    pub confidence: f64,
}

impl ToolInput {
    /// Check `value` against the `analyzePrompt` schema.
    ///
    /// `confidence` may arrive as a JSON number or as a numeric string; local
    /// models emit both. Its range is deliberately left unchecked.
    pub fn from_value(value: &Value) -> Result<Self, ToolInputError> {
        let fields = value.as_object().ok_or(ToolInputError::NotAnObject)?;

        Ok(Self {
            userinput: string_field(fields, USER_INPUT)?,
            selected_agent: string_field(fields, SELECTED_AGENT)?,
            confidence: confidence_field(fields)?,
        })
    }
}

fn string_field(fields: &Map<String, Value>, name: &'static str) -> Result<String, ToolInputError> {
    match fields.get(name) {
        None => Err(ToolInputError::MissingField(name)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ToolInputError::WrongType {
            field: name,
            expected: "string",
        }),
    }
}

fn confidence_field(fields: &Map<String, Value>) -> Result<f64, ToolInputError> {
    let raw = fields
        .get(CONFIDENCE)
        .ok_or(ToolInputError::MissingField(CONFIDENCE))?;

    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => {
            return Err(ToolInputError::WrongType {
                field: CONFIDENCE,
                expected: "number or numeric string",
            });
        }
    };

    // Non-finite scores are rejected even though a leading "Infinity" would parse.
    match parsed {
        Some(confidence) if confidence.is_finite() => Ok(confidence),
        _ => Err(ToolInputError::InvalidConfidence(raw.to_string())),
    }
}

/// Parse the longest decimal prefix of `s`, ignoring whatever follows it.
///
/// `"0.87 (high)"` yields 0.87 and `"85%"` yields 85. Returns `None` when `s`
/// does not start with a number.
fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = count_digits(bytes.get(end + 1 + sign..).unwrap_or_default());
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_serializes_to_wire_shape() {
        let value = serde_json::to_value(ANALYZE_PROMPT_TOOL).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "analyzePrompt",
                "description": "Analyze the user input and provide structured output",
                "input_schema": {
                    "type": "object",
                    "properties": {
                        "userinput": {
                            "type": "string",
                            "description": "The original user input"
                        },
                        "selected_agent": {
                            "type": "string",
                            "description": "The name of the selected agent"
                        },
                        "confidence": {
                            "type": "number",
                            "description": "Confidence level between 0 and 1"
                        }
                    },
                    "required": ["userinput", "selected_agent", "confidence"]
                }
            })
        );
    }

    #[test]
    fn test_accepts_string_confidence() {
        let input = ToolInput::from_value(&json!({
            "userinput": "hi",
            "selected_agent": "agentA",
            "confidence": "0.87"
        }))
        .unwrap();

        assert_eq!(input.selected_agent, "agentA");
        assert_eq!(input.confidence, 0.87);
    }

    #[test]
    fn test_accepts_numeric_confidence() {
        let input = ToolInput::from_value(&json!({
            "userinput": "hi",
            "selected_agent": "agentA",
            "confidence": 0.5
        }))
        .unwrap();

        assert_eq!(input.confidence, 0.5);
    }

    #[test]
    fn test_out_of_range_confidence_passes_through() {
        let input = ToolInput::from_value(&json!({
            "userinput": "hi",
            "selected_agent": "agentA",
            "confidence": "1.7"
        }))
        .unwrap();
        assert_eq!(input.confidence, 1.7);

        let input = ToolInput::from_value(&json!({
            "userinput": "hi",
            "selected_agent": "agentA",
            "confidence": -3
        }))
        .unwrap();
        assert_eq!(input.confidence, -3.0);
    }

    #[test]
    fn test_missing_confidence() {
        let err = ToolInput::from_value(&json!({
            "userinput": "hi",
            "selected_agent": "agentA"
        }))
        .unwrap_err();

        assert_eq!(err, ToolInputError::MissingField("confidence"));
    }

    #[test]
    fn test_wrong_types() {
        let err = ToolInput::from_value(&json!({
            "userinput": "hi",
            "selected_agent": 7,
            "confidence": "0.1"
        }))
        .unwrap_err();
        assert_eq!(
            err,
            ToolInputError::WrongType {
                field: "selected_agent",
                expected: "string"
            }
        );

        let err = ToolInput::from_value(&json!({
            "userinput": "hi",
            "selected_agent": "agentA",
            "confidence": true
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            ToolInputError::WrongType {
                field: "confidence",
                ..
            }
        ));
    }

    #[test]
    fn test_confidence_ignores_trailing_text() {
        let cases = [
            ("0.87 (high)", 0.87),
            ("85%", 85.0),
            ("0.9.", 0.9),
            ("  .5 or so", 0.5),
            ("-0.25", -0.25),
            ("1e-1x", 0.1),
            ("3e", 3.0),
            ("7.", 7.0),
        ];

        for (raw, expected) in cases {
            let input = ToolInput::from_value(&json!({
                "userinput": "hi",
                "selected_agent": "agentA",
                "confidence": raw
            }))
            .unwrap();

            assert_eq!(input.confidence, expected, "parsing {raw:?}");
        }
    }

    #[test]
    fn test_unparseable_confidence() {
        for bad in [
            json!("high"),
            json!("NaN"),
            json!("inf"),
            json!("Infinity"),
            json!("-Infinity"),
            json!("1e400"),
            json!(""),
            json!("."),
            json!("-"),
            json!("%85"),
        ] {
            let err = ToolInput::from_value(&json!({
                "userinput": "hi",
                "selected_agent": "agentA",
                "confidence": bad
            }))
            .unwrap_err();

            assert!(
                matches!(err, ToolInputError::InvalidConfidence(_)),
                "unexpected {err:?}"
            );
        }
    }

    #[test]
    fn test_not_an_object() {
        assert_eq!(
            ToolInput::from_value(&Value::Null).unwrap_err(),
            ToolInputError::NotAnObject
        );
        assert_eq!(
            ToolInput::from_value(&json!(["hi", "agentA", 0.5])).unwrap_err(),
            ToolInputError::NotAnObject
        );
    }
}
