//! Analytics payload returned by the backend reporting endpoint.
//!
//! All fields are optional. A series without labels means there is nothing to report for that
//! section, and values that are missing or non-numeric read as zero.

use super::format::{lenient_amount, lenient_count, parse_amount};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Envelope used by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalyticsPayload {
    pub summary: Option<Summary>,
    pub income_chart: Option<Series>,
    pub appointment_trend: Option<Series>,
    /// Appointment counts by status: completed, cancelled, in progress, pending.
    /// Accepts either a `{labels, data}` object or a bare four-element array.
    #[serde(deserialize_with = "status_series")]
    pub success_rate: Option<Series>,
    pub service_performance: Option<Series>,
}

/// Headline KPIs for the selected period.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Summary {
    #[serde(deserialize_with = "lenient_amount")]
    #[schemars(with = "Option<f64>")]
    pub total_income: Option<Decimal>,
    #[serde(deserialize_with = "lenient_count")]
    pub total_appointments: u64,
    #[serde(deserialize_with = "lenient_amount")]
    #[schemars(with = "Option<f64>")]
    pub completion_rate: Option<Decimal>,
    #[serde(deserialize_with = "lenient_count")]
    pub active_services: u64,
}

/// Parallel `labels` / `data` arrays as produced by the charting endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Series {
    #[serde(deserialize_with = "lenient_labels")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "lenient_values")]
    #[schemars(with = "Vec<f64>")]
    pub data: Vec<Decimal>,
}

impl Series {
    pub fn new<L, S>(labels: L, data: Vec<Decimal>) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            data,
        }
    }

    /// True when there are no labels, i.e. nothing to render.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn value_at(&self, index: usize) -> Decimal {
        self.data.get(index).copied().unwrap_or_default()
    }

    /// Each label paired with its value, missing values defaulting to zero.
    pub fn points(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), self.value_at(i)))
    }

    pub fn total(&self) -> Decimal {
        self.data.iter().copied().sum()
    }

    /// Largest plotted value, never below zero.
    pub fn max(&self) -> Decimal {
        self.points()
            .map(|(_, v)| v)
            .fold(Decimal::ZERO, |acc, v| acc.max(v))
    }
}

/// Labels used when the backend sends the status counts as a bare array.
pub const STATUS_LABELS: [&str; 4] = ["Completed", "Cancelled", "In Progress", "Pending"];

/// The fixed four-way split of appointments by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub completed: Decimal,
    pub cancelled: Decimal,
    pub in_progress: Decimal,
    pub pending: Decimal,
}

impl StatusBreakdown {
    pub fn from_series(series: &Series) -> Self {
        Self {
            completed: series.value_at(0),
            cancelled: series.value_at(1),
            in_progress: series.value_at(2),
            pending: series.value_at(3),
        }
    }

    pub fn total(&self) -> Decimal {
        self.completed + self.cancelled + self.in_progress + self.pending
    }

    pub fn categories(&self) -> [(&'static str, Decimal); 4] {
        [
            (STATUS_LABELS[0], self.completed),
            (STATUS_LABELS[1], self.cancelled),
            (STATUS_LABELS[2], self.in_progress),
            (STATUS_LABELS[3], self.pending),
        ]
    }

    /// Series form with the canonical labels, for the chart renderers.
    pub fn to_series(&self) -> Series {
        Series::new(
            STATUS_LABELS,
            self.categories().iter().map(|(_, v)| *v).collect(),
        )
    }
}

fn lenient_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect())
}

fn lenient_values<'de, D>(deserializer: D) -> Result<Vec<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .iter()
        .map(|item| parse_amount(item).unwrap_or_default())
        .collect())
}

fn status_series<'de, D>(deserializer: D) -> Result<Option<Series>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(Some(Series::new(
            STATUS_LABELS,
            items
                .iter()
                .map(|item| parse_amount(item).unwrap_or_default())
                .collect(),
        ))),
        other => serde_json::from_value(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn deserialize_full_payload() {
        let json = r#"{
            "summary": {
                "total_income": "LKR 45,000.00",
                "total_appointments": 42,
                "completion_rate": 85.5,
                "active_services": 6
            },
            "income_chart": { "labels": ["Jan", "Feb"], "data": [1000, 1500] },
            "appointment_trend": { "labels": ["Jan", "Feb"], "data": [10, "12"] },
            "success_rate": [30, 5, 4, 3],
            "service_performance": { "labels": ["Plumbing"], "data": [18] },
            "unexpected": true
        }"#;
        let payload: AnalyticsPayload = serde_json::from_str(json).unwrap();

        let summary = payload.summary.unwrap();
        assert_eq!(summary.total_income, Some(dec!(45000)));
        assert_eq!(summary.total_appointments, 42);
        assert_eq!(summary.completion_rate, Some(dec!(85.5)));

        let trend = payload.appointment_trend.unwrap();
        assert_eq!(trend.data, vec![dec!(10), dec!(12)]);

        let status = StatusBreakdown::from_series(&payload.success_rate.unwrap());
        assert_eq!(status.total(), dec!(42));
    }

    #[test]
    fn missing_sections_are_none() {
        let payload: AnalyticsPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload, AnalyticsPayload::default());
    }

    #[test]
    fn null_labels_read_as_empty() {
        let series: Series = serde_json::from_str(r#"{"labels": null, "data": null}"#).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.total(), Decimal::ZERO);
    }

    #[test]
    fn short_data_defaults_to_zero() {
        let series = Series::new(["a", "b", "c"], vec![dec!(5)]);
        let points: Vec<_> = series.points().collect();
        assert_eq!(points, vec![("a", dec!(5)), ("b", dec!(0)), ("c", dec!(0))]);
    }

    #[test]
    fn non_numeric_values_read_as_zero() {
        let series: Series =
            serde_json::from_str(r#"{"labels": ["x", "y"], "data": ["n/a", 7]}"#).unwrap();
        assert_eq!(series.data, vec![dec!(0), dec!(7)]);
    }

    #[test]
    fn status_breakdown_from_object() {
        let json = r#"{"success_rate": {"labels": ["Done", "No", "Busy", "Wait"], "data": [1, 2]}}"#;
        let payload: AnalyticsPayload = serde_json::from_str(json).unwrap();
        let status = StatusBreakdown::from_series(&payload.success_rate.unwrap());
        assert_eq!(status.cancelled, dec!(2));
        assert_eq!(status.pending, dec!(0));
    }

    #[test]
    fn api_envelope() {
        let json = r#"{"data": {"income_chart": {"labels": ["Q1"], "data": [10]}}}"#;
        let response: ApiResponse<AnalyticsPayload> = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.income_chart.unwrap().total(), dec!(10));
    }
}
