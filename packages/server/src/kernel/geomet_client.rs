//! MSC GeoMet climate API client (climate-stations / climate-daily collections)
//!
//! GeoMet serves GeoJSON: `{ features: [ { properties: { ... } } ] }`.
//! Records with no usable observation values are skipped, not errored.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, warn};

use super::{BaseWeatherApi, ClimateDaily, ClimateStation};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct FeatureCollection<P> {
    #[serde(default)]
    features: Vec<Feature<P>>,
}

#[derive(Debug, Deserialize)]
struct Feature<P> {
    properties: P,
}

#[derive(Debug, Default, Deserialize)]
struct StationProperties {
    #[serde(rename = "CLIMATE_IDENTIFIER")]
    climate_identifier: Option<String>,
    #[serde(rename = "STATION_NAME")]
    station_name: Option<String>,
    #[serde(rename = "LATITUDE")]
    latitude: Option<f64>,
    #[serde(rename = "LONGITUDE")]
    longitude: Option<f64>,
    #[serde(rename = "PROV_STATE_TERR_CODE")]
    province_code: Option<String>,
    #[serde(rename = "FIRST_DATE")]
    first_date: Option<String>,
    #[serde(rename = "LAST_DATE")]
    last_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DailyProperties {
    #[serde(rename = "CLIMATE_IDENTIFIER")]
    climate_identifier: Option<String>,
    #[serde(rename = "LOCAL_DATE")]
    local_date: Option<String>,
    #[serde(rename = "MIN_TEMPERATURE")]
    min_temperature: Option<f64>,
    #[serde(rename = "MEAN_TEMPERATURE")]
    mean_temperature: Option<f64>,
    #[serde(rename = "MAX_TEMPERATURE")]
    max_temperature: Option<f64>,
    #[serde(rename = "TOTAL_PRECIPITATION")]
    total_precipitation: Option<f64>,
}

/// GeoMet dates come as "1990-01-01" or "1990-01-01 00:00:00".
fn parse_geomet_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split_whitespace().next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn year_of(raw: &Option<String>) -> Option<i32> {
    use chrono::Datelike;
    raw.as_deref()
        .and_then(parse_geomet_date)
        .map(|d| d.year())
}

#[derive(Debug, Clone)]
pub struct GeoMetClient {
    base_url: String,
    client: reqwest::Client,
}

impl GeoMetClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_features<P: serde::de::DeserializeOwned + Default>(
        &self,
        url: &str,
    ) -> Result<Vec<P>> {
        debug!(%url, "Fetching GeoMet collection");
        let response = self
            .client
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "GeoMet request failed");
                anyhow!("GeoMet request failed: {}", e)
            })?;

        if !response.status().is_success() {
            let http_status = response.status();
            error!(%http_status, "GeoMet returned non-success");
            return Err(anyhow!("GeoMet returned {}", http_status));
        }

        let collection: FeatureCollection<P> = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse GeoMet response");
            anyhow!("failed to parse GeoMet response: {}", e)
        })?;

        Ok(collection.features.into_iter().map(|f| f.properties).collect())
    }
}

#[async_trait]
impl BaseWeatherApi for GeoMetClient {
    async fn climate_stations(
        &self,
        province: &str,
        limit: usize,
    ) -> Result<Vec<ClimateStation>> {
        let url = format!(
            "{}/collections/climate-stations/items?PROV_STATE_TERR_CODE={}&limit={}&f=json",
            self.base_url, province, limit
        );
        let properties: Vec<StationProperties> = self.fetch_features(&url).await?;

        let mut stations = Vec::new();
        for p in properties {
            let (Some(climate_identifier), Some(station_name), Some(latitude), Some(longitude)) =
                (p.climate_identifier.clone(), p.station_name.clone(), p.latitude, p.longitude)
            else {
                warn!(?p, "Skipping climate station with missing fields");
                continue;
            };
            stations.push(ClimateStation {
                climate_identifier,
                station_name,
                latitude,
                longitude,
                province_code: p.province_code.clone().unwrap_or_default(),
                first_year: year_of(&p.first_date).unwrap_or(0),
                last_year: year_of(&p.last_date).unwrap_or(0),
            });
        }
        Ok(stations)
    }

    async fn climate_daily(
        &self,
        climate_identifier: &str,
        limit: usize,
    ) -> Result<Vec<ClimateDaily>> {
        let url = format!(
            "{}/collections/climate-daily/items?CLIMATE_IDENTIFIER={}&limit={}&sortby=-LOCAL_DATE&f=json",
            self.base_url, climate_identifier, limit
        );
        let properties: Vec<DailyProperties> = self.fetch_features(&url).await?;

        let mut records = Vec::new();
        for p in properties {
            let Some(date) = p.local_date.as_deref().and_then(parse_geomet_date) else {
                warn!(?p, "Skipping daily record without a parseable date");
                continue;
            };
            records.push(ClimateDaily {
                climate_identifier: p
                    .climate_identifier
                    .clone()
                    .unwrap_or_else(|| climate_identifier.to_string()),
                date,
                temperature_min: p.min_temperature,
                temperature_mean: p.mean_temperature,
                temperature_max: p.max_temperature,
                total_precipitation: p.total_precipitation,
            });
        }
        Ok(records)
    }
}
