//! Weather processors - transition actions

mod activate_station;
mod normalize_weather_data;

pub use activate_station::ActivateStationProcessor;
pub use normalize_weather_data::NormalizeWeatherDataProcessor;
