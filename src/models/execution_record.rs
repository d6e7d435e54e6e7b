use chrono::{NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// A row of `activity_data`: the outcome of one execute attempt.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ExecutionRecord {
    pub id: i32,
    pub uuid: String,
    pub contact_key: String,
    /// Stored as UTC wall-clock time; rendered with an explicit `Z`.
    #[serde(serialize_with = "serialize_utc")]
    pub trigger_date: NaiveDateTime,
    pub status: String,
    pub error_log: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    Success,
    Error,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Success => "Success",
            ExecutionStatus::Error => "Error",
        }
    }
}

impl std::str::FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Success" => Ok(ExecutionStatus::Success),
            "Error" => Ok(ExecutionStatus::Error),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExecutionRecord {
    pub uuid: String,
    pub contact_key: String,
    pub trigger_date: NaiveDateTime,
    pub status: ExecutionStatus,
    pub error_log: Option<String>,
}

impl NewExecutionRecord {
    pub fn success(uuid: impl Into<String>, contact_key: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            contact_key: contact_key.into(),
            trigger_date: Utc::now().naive_utc(),
            status: ExecutionStatus::Success,
            error_log: None,
        }
    }

    pub fn error(
        uuid: impl Into<String>,
        contact_key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            contact_key: contact_key.into(),
            trigger_date: Utc::now().naive_utc(),
            status: ExecutionStatus::Error,
            error_log: Some(message.into()),
        }
    }

    /// Map a posted configuration payload onto a record, field by field.
    /// Returns the name of the first field that is missing or unusable.
    pub fn from_payload(payload: &serde_json::Value) -> Result<Self, String> {
        let text = |key: &'static str| -> Result<String, String> {
            payload
                .get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .ok_or_else(|| format!("missing field '{key}'"))
        };

        let uuid = text("uuid")?;
        let contact_key = text("contactKey")?;
        let status = text("status")?.parse::<ExecutionStatus>()?;

        let trigger_date = match payload.get("triggerDate").and_then(|v| v.as_str()) {
            Some(raw) => parse_trigger_date(raw)
                .ok_or_else(|| format!("invalid triggerDate '{raw}'"))?,
            None => Utc::now().naive_utc(),
        };

        let error_log = payload
            .get("errorLog")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        Ok(Self {
            uuid,
            contact_key,
            trigger_date,
            status,
            error_log,
        })
    }
}

fn serialize_utc<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn parse_trigger_date(raw: &str) -> Option<NaiveDateTime> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| raw.parse::<NaiveDateTime>())
        .ok()
}
