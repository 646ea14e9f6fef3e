pub mod influx;
pub mod price_data;
