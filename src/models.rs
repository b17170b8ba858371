use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "snake_case")]
pub enum WeatherSituation {
    Clear,
    Misty,
    LightPrecipitation,
    HeavyPrecipitation,
}

impl WeatherSituation {
    pub fn code(self) -> u8 {
        match self {
            Self::Clear => 1,
            Self::Misty => 2,
            Self::LightPrecipitation => 3,
            Self::HeavyPrecipitation => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Misty => "Misty",
            Self::LightPrecipitation => "Light precipitation",
            Self::HeavyPrecipitation => "Heavy precipitation",
        }
    }
}

impl TryFrom<String> for WeatherSituation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let raw = value.trim().to_ascii_lowercase();
        let situation = match raw.as_str() {
            "1" => Self::Clear,
            "2" => Self::Misty,
            "3" => Self::LightPrecipitation,
            "4" => Self::HeavyPrecipitation,
            s if s.starts_with("clear") => Self::Clear,
            s if s.starts_with("mist") || s.starts_with("cloud") => Self::Misty,
            s if s.starts_with("light") => Self::LightPrecipitation,
            s if s.starts_with("heavy") || s.starts_with("severe") => Self::HeavyPrecipitation,
            _ => return Err(format!("unknown weather situation '{value}'")),
        };
        Ok(situation)
    }
}

impl fmt::Display for WeatherSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyRecord {
    #[serde(rename = "dteday", alias = "date", deserialize_with = "deserialize_day")]
    pub date: NaiveDate,
    #[serde(rename = "cnt", alias = "count_cr", alias = "total_count")]
    pub total_count: u64,
    #[serde(rename = "registered", alias = "registered_count")]
    pub registered_count: u64,
    #[serde(rename = "casual", alias = "casual_count")]
    pub casual_count: u64,
    #[serde(rename = "weathersit", alias = "weather_situation")]
    pub weather_situation: WeatherSituation,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyRecord {
    #[serde(rename = "dteday", alias = "date", deserialize_with = "deserialize_day")]
    pub date: NaiveDate,
    #[serde(rename = "hr", alias = "hour")]
    pub hour: u8,
    #[serde(rename = "cnt", alias = "count_cr", alias = "total_count")]
    pub total_count: u64,
    #[serde(rename = "registered", alias = "registered_count")]
    pub registered_count: u64,
    #[serde(rename = "casual", alias = "casual_count")]
    pub casual_count: u64,
    #[serde(rename = "weathersit", alias = "weather_situation")]
    pub weather_situation: WeatherSituation,
}

fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
}

pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .ok()
}

/// Inclusive date range. Construction guarantees `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Narrows the interval to `bounds`. An interval with no overlap is
    /// returned unchanged so it still selects nothing.
    pub fn clamp_to(self, bounds: DateInterval) -> DateInterval {
        if self.end < bounds.start || self.start > bounds.end {
            return self;
        }
        Self {
            start: self.start.max(bounds.start),
            end: self.end.min(bounds.end),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub daily: Vec<DailyRecord>,
    pub hourly: Vec<HourlyRecord>,
}

impl Dataset {
    pub fn new(mut daily: Vec<DailyRecord>, mut hourly: Vec<HourlyRecord>) -> Self {
        daily.sort_by_key(|record| record.date);
        hourly.sort_by_key(|record| (record.date, record.hour));
        Self { daily, hourly }
    }

    pub fn bounds(&self) -> Option<DateInterval> {
        let first = self.daily.first()?;
        let last = self.daily.last()?;
        DateInterval::new(first.date, last.date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub total: u64,
    pub registered: u64,
    pub casual: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UserShare {
    pub registered_pct: f64,
    pub casual_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyTotal {
    pub year: i32,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: u32,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherAverage {
    pub weather: WeatherSituation,
    pub code: u8,
    pub mean_total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct BoundsResponse {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub daily_records: usize,
    pub hourly_records: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub interval: DateInterval,
    pub totals: Totals,
    pub user_share: UserShare,
    pub yearly: Vec<YearlyTotal>,
    pub monthly: Vec<MonthlyTotal>,
    pub weather: Vec<WeatherAverage>,
    pub daily: Vec<DailyPoint>,
}
