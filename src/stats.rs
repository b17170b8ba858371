use crate::models::{
    DailyPoint, DailyRecord, Dataset, DashboardView, DateInterval, MonthlyTotal, Totals,
    UserShare, WeatherAverage, WeatherSituation, YearlyTotal,
};
use chrono::Datelike;
use std::collections::BTreeMap;

pub fn build_dashboard(dataset: &Dataset, interval: DateInterval) -> DashboardView {
    // Only totals and the daily series are interval-scoped.
    let subset = filter_by_interval(&dataset.daily, interval);
    let totals = compute_totals(subset);

    DashboardView {
        interval,
        totals,
        user_share: compute_user_share(totals),
        yearly: compute_yearly_totals(&dataset.daily),
        monthly: compute_monthly_totals(&dataset.daily),
        weather: compute_weather_averages(&dataset.daily),
        daily: daily_series(subset),
    }
}

/// `records` must be sorted by date.
pub fn filter_by_interval(records: &[DailyRecord], interval: DateInterval) -> &[DailyRecord] {
    let lo = records.partition_point(|record| record.date < interval.start());
    let hi = records.partition_point(|record| record.date <= interval.end());
    &records[lo..hi.max(lo)]
}

pub fn compute_totals(records: &[DailyRecord]) -> Totals {
    records.iter().fold(Totals::default(), |acc, record| Totals {
        total: acc.total.saturating_add(record.total_count),
        registered: acc.registered.saturating_add(record.registered_count),
        casual: acc.casual.saturating_add(record.casual_count),
    })
}

pub fn compute_user_share(totals: Totals) -> UserShare {
    if totals.total == 0 {
        return UserShare::default();
    }
    let denom = totals.total as f64;
    UserShare {
        registered_pct: totals.registered as f64 * 100.0 / denom,
        casual_pct: totals.casual as f64 * 100.0 / denom,
    }
}

pub fn compute_yearly_totals(records: &[DailyRecord]) -> Vec<YearlyTotal> {
    let mut by_year: BTreeMap<i32, u64> = BTreeMap::new();
    for record in records {
        let sum = by_year.entry(record.date.year()).or_default();
        *sum = sum.saturating_add(record.total_count);
    }

    by_year
        .into_iter()
        .map(|(year, total)| YearlyTotal { year, total })
        .collect()
}

pub fn compute_monthly_totals(records: &[DailyRecord]) -> Vec<MonthlyTotal> {
    let mut buckets = [0u64; 12];
    for record in records {
        let slot = &mut buckets[record.date.month0() as usize];
        *slot = slot.saturating_add(record.total_count);
    }

    buckets
        .iter()
        .zip(1u32..)
        .map(|(&total, month)| MonthlyTotal { month, total })
        .collect()
}

pub fn compute_weather_averages(records: &[DailyRecord]) -> Vec<WeatherAverage> {
    let mut groups: BTreeMap<WeatherSituation, (u64, u64)> = BTreeMap::new();
    for record in records {
        let (sum, days) = groups.entry(record.weather_situation).or_default();
        *sum = sum.saturating_add(record.total_count);
        *days += 1;
    }

    groups
        .into_iter()
        .map(|(weather, (sum, days))| WeatherAverage {
            weather,
            code: weather.code(),
            mean_total: sum as f64 / days as f64,
        })
        .collect()
}

pub fn daily_series(records: &[DailyRecord]) -> Vec<DailyPoint> {
    records
        .iter()
        .map(|record| DailyPoint {
            date: record.date,
            total: record.total_count,
        })
        .collect()
}
