//! Background services

pub mod score_refresh;
