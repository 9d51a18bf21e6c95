pub mod activities;
pub mod conditions;
pub mod forecast;
pub mod geo;
pub mod goweather;
pub mod observation;
pub mod pipeline;
pub mod units;
