use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pseudo-field matched against a record's free text columns
pub const SEARCH_FIELD: &str = "search";
pub const SEARCH_COLUMNS: [&str; 3] = ["title", "description", "location"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    Greater,
    Less,
    Between,
}

/// A single predicate over one record field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<String>,
}

impl FilterDescriptor {
    pub fn new(field: &str, operator: FilterOperator, value: &str) -> Self {
        Self {
            field: field.to_string(),
            operator,
            value: value.to_string(),
            value2: None,
        }
    }

    pub fn between(field: &str, low: &str, high: &str) -> Self {
        Self {
            field: field.to_string(),
            operator: FilterOperator::Between,
            value: low.to_string(),
            value2: Some(high.to_string()),
        }
    }

    /// Whether `record` satisfies this predicate. A record without the
    /// field never matches.
    pub fn matches(&self, record: &Map<String, Value>) -> bool {
        if self.field == SEARCH_FIELD {
            let needle = self.value.to_lowercase();
            return SEARCH_COLUMNS
                .iter()
                .filter_map(|col| record.get(*col).and_then(as_text))
                .any(|text| text.to_lowercase().contains(&needle));
        }

        let Some(actual) = record.get(&self.field).and_then(as_text) else {
            return false;
        };

        match self.operator {
            FilterOperator::Equals => actual.eq_ignore_ascii_case(&self.value),
            FilterOperator::Contains => actual.to_lowercase().contains(&self.value.to_lowercase()),
            FilterOperator::StartsWith => actual
                .to_lowercase()
                .starts_with(&self.value.to_lowercase()),
            FilterOperator::EndsWith => actual.to_lowercase().ends_with(&self.value.to_lowercase()),
            FilterOperator::Greater => match day_bound(&actual, &self.value) {
                Some((day, start)) => day >= start,
                None => compare(&actual, &self.value) == Ordering::Greater,
            },
            FilterOperator::Less => match day_bound(&actual, &self.value) {
                Some((day, end)) => day <= end,
                None => compare(&actual, &self.value) == Ordering::Less,
            },
            FilterOperator::Between => match &self.value2 {
                Some(high) => match (day_bound(&actual, &self.value), day_bound(&actual, high)) {
                    (Some((day, start)), Some((_, end))) => start <= day && day <= end,
                    _ => {
                        compare(&actual, &self.value) != Ordering::Less
                            && compare(&actual, high) != Ordering::Greater
                    }
                },
                None => false,
            },
        }
    }
}

/// Logical AND across `descriptors`. An empty list matches everything.
pub fn matches_all(descriptors: &[FilterDescriptor], record: &Map<String, Value>) -> bool {
    descriptors.iter().all(|d| d.matches(record))
}

/// Keeps the records (JSON objects) matching every descriptor
pub fn apply_filters(descriptors: &[FilterDescriptor], records: &[Value]) -> Vec<Value> {
    records
        .iter()
        .filter(|r| {
            r.as_object()
                .map(|obj| matches_all(descriptors, obj))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// A bare `YYYY-MM-DD` bound names a whole day: as a lower bound it
// starts at midnight, as an upper bound it runs until the end of the
// day. Returns the record's day alongside the bound's when both sides
// are dates.
fn day_bound(actual: &str, bound: &str) -> Option<(NaiveDate, NaiveDate)> {
    let bound = NaiveDate::parse_from_str(bound.trim(), "%Y-%m-%d").ok()?;
    let actual = actual.trim();
    let day = DateTime::parse_from_rfc3339(actual)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            actual
                .get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })?;
    Some((day, bound))
}

// Numbers compare numerically, anything else lexically, which also
// orders full ISO 8601 timestamps correctly.
fn compare(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn it_serializes_operator_names() {
        let d = FilterDescriptor::new("location", FilterOperator::StartsWith, "Nai");
        assert_eq!(
            serde_json::to_value(&d).unwrap(),
            json!({"field": "location", "operator": "startsWith", "value": "Nai"})
        );
    }

    #[test]
    fn it_searches_text_columns() {
        let rec = record(json!({
            "title": "Borehole inspection",
            "description": "Handle pump broken",
            "location": "Kisumu"
        }));
        assert!(FilterDescriptor::new("search", FilterOperator::Contains, "PUMP").matches(&rec));
        assert!(FilterDescriptor::new("search", FilterOperator::Contains, "kisu").matches(&rec));
        assert!(!FilterDescriptor::new("search", FilterOperator::Contains, "clinic").matches(&rec));
    }

    #[test]
    fn it_compares_dates_and_numbers() {
        let rec = record(json!({"created_at": "2024-03-15T08:00:00Z", "latitude": -1.29}));
        assert!(
            FilterDescriptor::new("created_at", FilterOperator::Greater, "2024-03-01")
                .matches(&rec)
        );
        assert!(
            !FilterDescriptor::new("created_at", FilterOperator::Less, "2024-03-01")
                .matches(&rec)
        );
        assert!(FilterDescriptor::new("latitude", FilterOperator::Less, "0").matches(&rec));
        assert!(FilterDescriptor::between("latitude", "-2", "-1").matches(&rec));
    }

    #[test]
    fn it_includes_whole_days_for_date_bounds() {
        let rec = record(json!({"created_at": "2024-04-01T09:00:00Z"}));
        assert!(
            FilterDescriptor::new("created_at", FilterOperator::Less, "2024-04-01").matches(&rec)
        );
        assert!(
            FilterDescriptor::new("created_at", FilterOperator::Greater, "2024-04-01")
                .matches(&rec)
        );
        assert!(FilterDescriptor::between("created_at", "2024-04-01", "2024-04-01").matches(&rec));
        assert!(
            !FilterDescriptor::new("created_at", FilterOperator::Less, "2024-03-31").matches(&rec)
        );
        assert!(
            !FilterDescriptor::new("created_at", FilterOperator::Greater, "2024-04-02")
                .matches(&rec)
        );

        let late = record(json!({"created_at": "2024-04-01T23:59:59.999+00:00"}));
        assert!(
            FilterDescriptor::new("created_at", FilterOperator::Less, "2024-04-01").matches(&late)
        );
        let bare = record(json!({"created_at": "2024-04-01"}));
        assert!(
            FilterDescriptor::new("created_at", FilterOperator::Less, "2024-04-01").matches(&bare)
        );
    }

    #[test]
    fn it_never_matches_between_without_upper_bound() {
        let rec = record(json!({"latitude": 1.0}));
        let mut d = FilterDescriptor::between("latitude", "0", "2");
        assert!(d.matches(&rec));
        d.value2 = None;
        assert!(!d.matches(&rec));
    }

    #[test]
    fn it_requires_every_descriptor() {
        let rec = record(json!({"category": "health", "location": "Nakuru"}));
        let both = vec![
            FilterDescriptor::new("category", FilterOperator::Equals, "health"),
            FilterDescriptor::new("location", FilterOperator::Equals, "Nakuru"),
        ];
        assert!(matches_all(&both, &rec));

        let conflicting = vec![
            FilterDescriptor::new("category", FilterOperator::Equals, "health"),
            FilterDescriptor::new("category", FilterOperator::Equals, "water"),
        ];
        assert!(!matches_all(&conflicting, &rec));
        assert!(matches_all(&[], &rec));
        assert!(
            !FilterDescriptor::new("missing", FilterOperator::EndsWith, "x").matches(&rec)
        );
    }

    #[test]
    fn it_filters_record_lists() {
        let records = vec![
            json!({"category": "water", "location": "Kisumu"}),
            json!({"category": "health", "location": "Nakuru"}),
            json!("not a record"),
        ];
        let kept = apply_filters(
            &[FilterDescriptor::new("category", FilterOperator::Equals, "water")],
            &records,
        );
        assert_eq!(kept, vec![json!({"category": "water", "location": "Kisumu"})]);
    }
}
