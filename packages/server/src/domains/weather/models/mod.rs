mod station;
mod weather_data;

pub use station::{states as station_states, WeatherStation};
pub use weather_data::{states as data_states, WeatherData};
