use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Raw DVLA-shaped vehicle enquiry payload. All fields optional; absence
/// degrades to `None` downstream.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVehicleRecord {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub registration: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub make: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub colour: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub year_of_manufacture: Option<i32>,
    #[serde(default)]
    pub engine_capacity: Option<u32>,
    #[serde(default)]
    pub co2_emissions: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub euro_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub tax_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub tax_due_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub mot_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub mot_expiry_date: Option<String>,
    #[serde(default, rename = "dateOfLastV5CIssued", deserialize_with = "empty_string_as_none")]
    pub date_of_last_v5c_issued: Option<String>,
    #[serde(default)]
    pub marked_for_export: Option<bool>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub type_approval: Option<String>,
}

/// Raw DVSA-shaped test history payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMotHistory {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub registration: Option<String>,
    #[serde(default)]
    pub mot_tests: Option<Vec<RawMotTest>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMotTest {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub mot_test_number: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub completed_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub test_result: Option<String>,
    #[serde(default)]
    pub odometer_value: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub odometer_unit: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub odometer_result_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub defects: Vec<RawDefect>,
    // Older API versions deliver defects under rfrAndComments.
    #[serde(default)]
    pub rfr_and_comments: Vec<RawDefect>,
}

impl RawMotTest {
    pub(crate) fn defect_items(&self) -> &[RawDefect] {
        if self.defects.is_empty() {
            &self.rfr_and_comments
        } else {
            &self.defects
        }
    }

    pub(crate) fn odometer_reading(&self) -> Option<i64> {
        match self.odometer_value.as_ref()? {
            serde_json::Value::Number(value) => value.as_i64(),
            serde_json::Value::String(value) => value.trim().replace(',', "").parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDefect {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub comment: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "empty_string_as_none")]
    pub kind: Option<String>,
}

impl RawDefect {
    pub(crate) fn description(&self) -> Option<&str> {
        self.text.as_deref().or(self.comment.as_deref())
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Lenient calendar-date parsing: accepts RFC 3339 datetimes, bare
/// `YYYY-MM-DD` strings, and datetime strings with a date prefix.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    // Provider datetimes sometimes use "YYYY.MM.DD HH:MM:SS" or similar;
    // the first ten characters still carry the date.
    if trimmed.len() >= 10 {
        let prefix: String = trimmed
            .chars()
            .take(10)
            .map(|c| if c == '.' || c == '/' { '-' } else { c })
            .collect();
        if let Ok(date) = NaiveDate::parse_from_str(&prefix, "%Y-%m-%d") {
            return Some(date);
        }
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}
