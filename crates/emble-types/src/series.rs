use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validate::{ensure_finite, Validate, ValidationError};

/// Moving-average window, in months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum MaWindow {
    Three,
    #[default]
    Six,
    Twelve,
}

impl MaWindow {
    pub const ALL: [MaWindow; 3] = [MaWindow::Three, MaWindow::Six, MaWindow::Twelve];

    pub fn months(self) -> u32 {
        match self {
            Self::Three => 3,
            Self::Six => 6,
            Self::Twelve => 12,
        }
    }
}

impl From<MaWindow> for u32 {
    fn from(window: MaWindow) -> Self {
        window.months()
    }
}

impl TryFrom<u32> for MaWindow {
    type Error = String;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        match months {
            3 => Ok(Self::Three),
            6 => Ok(Self::Six),
            12 => Ok(Self::Twelve),
            other => Err(format!("unsupported moving-average window: {}", other)),
        }
    }
}

impl fmt::Display for MaWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-month MA", self.months())
    }
}

/// Body of `GET /account-groups`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountGroups {
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Validate for AccountGroups {
    fn validate(&self) -> Result<(), ValidationError> {
        for (i, group) in self.groups.iter().enumerate() {
            if group.trim().is_empty() {
                return Err(ValidationError::new(format!("groups[{}]", i), "must not be empty"));
            }
        }
        Ok(())
    }
}

/// One period of a series: the raw amount and its trailing moving average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// `YYYY-MM` (or `YYYY-MM-DD` for daily series)
    pub date: String,
    pub amount: f64,
    #[serde(rename = "amountMA")]
    pub amount_ma: f64,
}

impl SeriesPoint {
    /// Calendar date of the point; monthly points resolve to the first day.
    pub fn day(&self) -> Option<NaiveDate> {
        parse_period(&self.date)
    }
}

fn parse_period(date: &str) -> Option<NaiveDate> {
    match date.len() {
        7 => NaiveDate::parse_from_str(&format!("{}-01", date), "%Y-%m-%d").ok(),
        10 => NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMeta {
    #[serde(default)]
    pub group: Option<String>,
    pub window: u32,
}

/// Body of `GET /series/amount-by-group`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesResponse {
    #[serde(default)]
    pub series: Vec<SeriesPoint>,
    pub meta: SeriesMeta,
}

impl Validate for SeriesResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        MaWindow::try_from(self.meta.window).map_err(|e| ValidationError::new("meta.window", e))?;

        for (i, point) in self.series.iter().enumerate() {
            if point.day().is_none() {
                return Err(ValidationError::new(
                    format!("series[{}].date", i),
                    format!("expected YYYY-MM or YYYY-MM-DD, got {:?}", point.date),
                ));
            }
            ensure_finite(&format!("series[{}].amount", i), point.amount)?;
            ensure_finite(&format!("series[{}].amountMA", i), point.amount_ma)?;
        }
        Ok(())
    }
}
