pub mod config;
pub mod controller;
pub mod fetch;
pub mod form;
pub mod geocode;
pub mod models;
pub mod query;
pub mod severity;
