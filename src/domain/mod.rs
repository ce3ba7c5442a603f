pub mod models;
pub mod timezone;
pub mod validation;
