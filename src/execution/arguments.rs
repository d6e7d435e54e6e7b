use serde_json::Value;

use super::ExecutionError;

/// Values the host passes to one execute call in `inArguments[0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteArguments {
    pub uuid: String,
    pub contact_key: String,
    pub event_definition_key: String,
    pub payload: Value,
}

/// Whatever identifiers could be read, for the fallback record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Identifiers {
    pub uuid: Option<String>,
    pub contact_key: Option<String>,
}

fn first_in_argument(body: &Value) -> Option<&Value> {
    body.get("inArguments")?.as_array()?.first()
}

/// Strings are taken as is; numbers are rendered, since contact keys are often numeric.
fn text_field(args: &Value, key: &str) -> Option<String> {
    match args.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn identifiers(body: &Value) -> Identifiers {
    match first_in_argument(body) {
        Some(args) => Identifiers {
            uuid: text_field(args, "uuid"),
            contact_key: text_field(args, "contactKey"),
        },
        None => Identifiers::default(),
    }
}

pub fn parse(body: &Value) -> Result<ExecuteArguments, ExecutionError> {
    let args = first_in_argument(body).ok_or_else(|| {
        ExecutionError::MalformedInput("request has no inArguments[0]".to_string())
    })?;

    let required = |key: &str| {
        text_field(args, key)
            .ok_or_else(|| ExecutionError::MalformedInput(format!("missing '{key}' in inArguments")))
    };

    Ok(ExecuteArguments {
        contact_key: required("contactKey")?,
        event_definition_key: required("selectedJourneyAPIEventKey")?,
        uuid: required("uuid")?,
        payload: args.get("payload").cloned().unwrap_or(Value::Null),
    })
}
