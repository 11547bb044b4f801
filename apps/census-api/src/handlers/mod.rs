//! HTTP handlers

pub mod country;
pub mod person;
