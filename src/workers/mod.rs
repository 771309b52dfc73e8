//! Background workers

pub mod refresher;
