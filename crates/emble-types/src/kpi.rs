use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validate::{ensure_finite, Validate, ValidationError};

/// Reporting period of a KPI snapshot. Any bound may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// Year-to-date summary returned by `GET /kpi/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub currency: String,
    pub period: Period,
    pub revenue_ytd: f64,
    pub expenses_ytd: f64,
    pub net_result_ytd: f64,

    /// Free-form diagnostics some backends attach; passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<serde_json::Value>,
}

impl Validate for KpiSummary {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.currency.trim().is_empty() {
            return Err(ValidationError::new("currency", "must not be empty"));
        }
        ensure_finite("revenue_ytd", self.revenue_ytd)?;
        ensure_finite("expenses_ytd", self.expenses_ytd)?;
        ensure_finite("net_result_ytd", self.net_result_ytd)?;

        if let (Some(from), Some(to)) = (self.period.from, self.period.to) {
            if from > to {
                return Err(ValidationError::new(
                    "period",
                    format!("from ({}) is after to ({})", from, to),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KpiSummary {
        serde_json::from_str(
            r#"{
                "currency": "SEK",
                "period": {"year": 2024, "from": "2024-01-01", "to": "2024-06-30"},
                "revenue_ytd": 120000.0,
                "expenses_ytd": 80000.5,
                "net_result_ytd": 39999.5
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_decode_summary() {
        let kpi = sample();
        assert_eq!(kpi.currency, "SEK");
        assert_eq!(kpi.period.year, Some(2024));
        assert_eq!(kpi.period.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert!(kpi.diagnostic.is_none());
        assert!(kpi.validate().is_ok());
    }

    #[test]
    fn test_decode_null_period() {
        let kpi: KpiSummary = serde_json::from_str(
            r#"{"currency":"SEK","period":{"year":null,"from":null,"to":null},
                "revenue_ytd":0,"expenses_ytd":0,"net_result_ytd":0}"#,
        )
        .unwrap();
        assert_eq!(kpi.period, Period::default());
        assert!(kpi.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_period() {
        let mut kpi = sample();
        kpi.period.from = NaiveDate::from_ymd_opt(2024, 12, 31);
        assert_eq!(kpi.validate().unwrap_err().field, "period");
    }

    #[test]
    fn test_rejects_empty_currency() {
        let mut kpi = sample();
        kpi.currency = " ".to_string();
        assert_eq!(kpi.validate().unwrap_err().field, "currency");
    }

    #[test]
    fn test_keeps_diagnostic() {
        let kpi: KpiSummary = serde_json::from_str(
            r#"{"currency":"SEK","period":{},"revenue_ytd":1,"expenses_ytd":1,
                "net_result_ytd":0,"diagnostic":{"rows":42}}"#,
        )
        .unwrap();
        assert_eq!(kpi.diagnostic, Some(serde_json::json!({"rows": 42})));
    }
}
