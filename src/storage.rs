use crate::errors::AppError;
use crate::models::{DailyRecord, Dataset, HourlyRecord};
use serde::de::DeserializeOwned;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct DataPaths {
    pub daily: PathBuf,
    pub hourly: PathBuf,
}

pub fn resolve_data_paths() -> DataPaths {
    let daily = env::var("APP_DAY_DATA_PATH").unwrap_or_else(|_| "data/day_clean.csv".into());
    let hourly = env::var("APP_HOUR_DATA_PATH").unwrap_or_else(|_| "data/hour_clean.csv".into());

    DataPaths {
        daily: PathBuf::from(daily),
        hourly: PathBuf::from(hourly),
    }
}

pub async fn load_dataset(paths: &DataPaths) -> Result<Dataset, AppError> {
    let daily: Vec<DailyRecord> = match read_records(&paths.daily).await {
        Ok(records) => records,
        Err(err) => {
            error!("failed to load daily data from {}: {err}", paths.daily.display());
            return Err(err);
        }
    };

    let hourly: Vec<HourlyRecord> = match read_records(&paths.hourly).await {
        Ok(records) => records,
        Err(err) => {
            warn!("hourly data unavailable at {}: {err}", paths.hourly.display());
            Vec::new()
        }
    };

    info!(
        daily = daily.len(),
        hourly = hourly.len(),
        "loaded bike sharing dataset"
    );
    Ok(Dataset::new(daily, hourly))
}

async fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AppError> {
    let bytes = fs::read(path).await?;
    let (records, skipped) = parse_records(&bytes)?;
    if skipped > 0 {
        warn!("skipped {skipped} malformed rows in {}", path.display());
    }
    Ok(records)
}

pub fn parse_records<T: DeserializeOwned>(bytes: &[u8]) -> Result<(Vec<T>, usize), AppError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(bytes);
    // Surface a missing or unreadable header as a hard error.
    reader.headers()?;

    let mut records = Vec::new();
    let mut skipped = 0;
    for (index, row) in reader.deserialize::<T>().enumerate() {
        match row {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(row = index + 1, "skipping row: {err}");
                skipped += 1;
            }
        }
    }

    Ok((records, skipped))
}
