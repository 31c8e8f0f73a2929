pub mod params;
pub mod query;
