use crate::errors::AppError;
use crate::models::{
    parse_day, BoundsResponse, DailyPoint, DashboardView, Dataset, DateInterval, MonthlyTotal,
    Totals, WeatherAverage, YearlyTotal,
};
use crate::state::AppState;
use crate::stats::{
    build_dashboard, compute_monthly_totals, compute_totals, compute_weather_averages,
    compute_yearly_totals, daily_series, filter_by_interval,
};
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub struct IntervalQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IntervalQuery>,
) -> Result<Html<String>, AppError> {
    let interval = resolve_interval(&state.dataset, &query)?;
    let view = build_dashboard(&state.dataset, interval);
    Ok(Html(render_index(&view, state.dataset.bounds())))
}

pub async fn get_bounds(State(state): State<AppState>) -> Json<BoundsResponse> {
    let bounds = state.dataset.bounds();
    Json(BoundsResponse {
        min_date: bounds.map(|b| b.start()),
        max_date: bounds.map(|b| b.end()),
        daily_records: state.dataset.daily.len(),
        hourly_records: state.dataset.hourly.len(),
    })
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<IntervalQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let interval = resolve_interval(&state.dataset, &query)?;
    Ok(Json(build_dashboard(&state.dataset, interval)))
}

pub async fn get_totals(
    State(state): State<AppState>,
    Query(query): Query<IntervalQuery>,
) -> Result<Json<Totals>, AppError> {
    let interval = resolve_interval(&state.dataset, &query)?;
    let subset = filter_by_interval(&state.dataset.daily, interval);
    Ok(Json(compute_totals(subset)))
}

pub async fn get_daily(
    State(state): State<AppState>,
    Query(query): Query<IntervalQuery>,
) -> Result<Json<Vec<DailyPoint>>, AppError> {
    let interval = resolve_interval(&state.dataset, &query)?;
    let subset = filter_by_interval(&state.dataset.daily, interval);
    Ok(Json(daily_series(subset)))
}

pub async fn get_yearly(State(state): State<AppState>) -> Json<Vec<YearlyTotal>> {
    Json(compute_yearly_totals(&state.dataset.daily))
}

pub async fn get_monthly(State(state): State<AppState>) -> Json<Vec<MonthlyTotal>> {
    Json(compute_monthly_totals(&state.dataset.daily))
}

pub async fn get_weather(State(state): State<AppState>) -> Json<Vec<WeatherAverage>> {
    Json(compute_weather_averages(&state.dataset.daily))
}

pub fn resolve_interval(dataset: &Dataset, query: &IntervalQuery) -> Result<DateInterval, AppError> {
    let bounds = dataset.bounds();
    let start = parse_param("start", query.start.as_deref())?.unwrap_or(NaiveDate::MIN);
    let end = parse_param("end", query.end.as_deref())?.unwrap_or(NaiveDate::MAX);

    let requested = DateInterval::new(start, end)
        .ok_or_else(|| AppError::bad_request("start must not be after end"))?;
    let interval = match bounds {
        Some(bounds) => requested.clamp_to(bounds),
        None => requested,
    };

    debug!(start = %interval.start(), end = %interval.end(), "resolved interval");
    Ok(interval)
}

fn parse_param(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_day(value)
            .map(Some)
            .ok_or_else(|| AppError::bad_request(format!("{name} must be a YYYY-MM-DD date"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyRecord, WeatherSituation};
    use axum::http::StatusCode;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dataset() -> Dataset {
        let record = |date| DailyRecord {
            date,
            total_count: 5,
            registered_count: 4,
            casual_count: 1,
            weather_situation: WeatherSituation::Clear,
        };
        Dataset::new(vec![record(day(2011, 1, 1)), record(day(2012, 12, 31))], vec![])
    }

    fn query(start: Option<&str>, end: Option<&str>) -> IntervalQuery {
        IntervalQuery {
            start: start.map(String::from),
            end: end.map(String::from),
        }
    }

    #[test]
    fn missing_params_default_to_bounds() {
        let interval = resolve_interval(&dataset(), &IntervalQuery::default()).unwrap();
        assert_eq!(interval.start(), day(2011, 1, 1));
        assert_eq!(interval.end(), day(2012, 12, 31));

        let blank = resolve_interval(&dataset(), &query(Some(" "), None)).unwrap();
        assert_eq!(blank.start(), day(2011, 1, 1));
    }

    #[test]
    fn out_of_bounds_params_are_clamped() {
        let interval =
            resolve_interval(&dataset(), &query(Some("2010-05-01"), Some("2011-06-01"))).unwrap();
        assert_eq!(interval.start(), day(2011, 1, 1));
        assert_eq!(interval.end(), day(2011, 6, 1));
    }

    #[test]
    fn disjoint_params_pass_through() {
        let interval =
            resolve_interval(&dataset(), &query(Some("2013-01-03"), Some("2013-01-04"))).unwrap();
        assert_eq!(interval.start(), day(2013, 1, 3));
        assert!(filter_by_interval(&dataset().daily, interval).is_empty());
    }

    #[test]
    fn lone_end_outside_bounds_selects_nothing() {
        let after = resolve_interval(&dataset(), &query(Some("2013-01-05"), None)).unwrap();
        assert_eq!(after.start(), day(2013, 1, 5));
        assert!(filter_by_interval(&dataset().daily, after).is_empty());

        let before = resolve_interval(&dataset(), &query(None, Some("2010-06-01"))).unwrap();
        assert_eq!(before.end(), day(2010, 6, 1));
        assert!(filter_by_interval(&dataset().daily, before).is_empty());
    }

    #[test]
    fn lone_end_inside_bounds_keeps_other_bound() {
        let interval = resolve_interval(&dataset(), &query(Some("2011-06-01"), None)).unwrap();
        assert_eq!(interval.start(), day(2011, 6, 1));
        assert_eq!(interval.end(), day(2012, 12, 31));
    }

    #[test]
    fn reversed_params_are_rejected() {
        let err = resolve_interval(&dataset(), &query(Some("2012-01-02"), Some("2012-01-01")))
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unparseable_params_are_rejected() {
        let err = resolve_interval(&dataset(), &query(Some("yesterday"), None)).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("start"));
    }

    #[test]
    fn empty_dataset_accepts_defaults() {
        let interval = resolve_interval(&Dataset::default(), &IntervalQuery::default()).unwrap();
        assert_eq!(interval.start(), NaiveDate::MIN);
        assert_eq!(interval.end(), NaiveDate::MAX);
    }
}
