//! Pure scoring calculators
//!
//! All functions here are stateless closed-form calculations over aggregate
//! counts. The HTTP layer gathers the counts; nothing in this module touches
//! the database.

pub mod retention;
pub mod sentiment;
pub mod signal;
pub mod weather;

pub use retention::retention_percentage;
pub use sentiment::{analyze_sentiment, SentimentLabel, SentimentResult};
pub use signal::{compute_signal_score, SignalInputs, SignalScore, SignalTier};
pub use weather::{demand_weather, DemandWeather};
