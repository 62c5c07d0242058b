//! Demand weather metaphor
//!
//! Maps a campaign's signal score and pledge momentum onto a weather
//! condition so brands get an at-a-glance read of demand trajectory.

use serde::{Deserialize, Serialize};

/// Weather condition for a campaign's demand trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandWeather {
    /// High score and momentum holding or rising
    Sunny,
    /// Solid score regardless of momentum
    PartlyCloudy,
    /// Moderate score with tolerable momentum
    Cloudy,
    /// Low score, momentum not collapsing
    Overcast,
    /// Momentum collapsed to less than half the prior window
    Stormy,
}

impl DemandWeather {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemandWeather::Sunny => "sunny",
            DemandWeather::PartlyCloudy => "partly_cloudy",
            DemandWeather::Cloudy => "cloudy",
            DemandWeather::Overcast => "overcast",
            DemandWeather::Stormy => "stormy",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            DemandWeather::Sunny => "Demand is strong and climbing",
            DemandWeather::PartlyCloudy => "Demand is solid with steady interest",
            DemandWeather::Cloudy => "Demand is building but needs momentum",
            DemandWeather::Overcast => "Demand is quiet; the campaign is still finding its audience",
            DemandWeather::Stormy => "Demand is collapsing; pledges have sharply slowed",
        }
    }
}

/// Ratio of pledges in the last 7 days to the prior 7 days
///
/// Empty prior window with current activity reads as a doubling; two empty
/// windows read as flat.
pub fn momentum_ratio(pledges_last_7_days: i64, pledges_prior_7_days: i64) -> f64 {
    if pledges_prior_7_days <= 0 {
        if pledges_last_7_days > 0 {
            2.0
        } else {
            1.0
        }
    } else {
        pledges_last_7_days.max(0) as f64 / pledges_prior_7_days as f64
    }
}

/// Map signal score and momentum ratio to a weather condition
pub fn demand_weather(signal_score: f64, momentum_ratio: f64) -> DemandWeather {
    if signal_score >= 75.0 && momentum_ratio >= 1.0 {
        DemandWeather::Sunny
    } else if signal_score >= 50.0 {
        DemandWeather::PartlyCloudy
    } else if signal_score >= 25.0 && momentum_ratio >= 0.5 {
        DemandWeather::Cloudy
    } else if momentum_ratio < 0.5 {
        DemandWeather::Stormy
    } else {
        DemandWeather::Overcast
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sunny_needs_score_and_momentum() {
        assert_eq!(demand_weather(80.0, 1.2), DemandWeather::Sunny);
        assert_eq!(demand_weather(80.0, 1.0), DemandWeather::Sunny);
        // High score, declining momentum: falls to PartlyCloudy
        assert_eq!(demand_weather(80.0, 0.8), DemandWeather::PartlyCloudy);
    }

    #[test]
    fn test_partly_cloudy_band() {
        assert_eq!(demand_weather(60.0, 0.3), DemandWeather::PartlyCloudy);
        assert_eq!(demand_weather(50.0, 2.0), DemandWeather::PartlyCloudy);
    }

    #[test]
    fn test_cloudy_band() {
        assert_eq!(demand_weather(30.0, 0.8), DemandWeather::Cloudy);
        assert_eq!(demand_weather(25.0, 0.5), DemandWeather::Cloudy);
    }

    #[test]
    fn test_stormy_on_collapse() {
        assert_eq!(demand_weather(30.0, 0.4), DemandWeather::Stormy);
        assert_eq!(demand_weather(10.0, 0.1), DemandWeather::Stormy);
    }

    #[test]
    fn test_overcast_default() {
        assert_eq!(demand_weather(10.0, 1.0), DemandWeather::Overcast);
        assert_eq!(demand_weather(0.0, 0.5), DemandWeather::Overcast);
    }

    #[test]
    fn test_momentum_ratio_empty_windows() {
        assert_eq!(momentum_ratio(0, 0), 1.0);
        assert_eq!(momentum_ratio(5, 0), 2.0);
        assert_eq!(momentum_ratio(5, 10), 0.5);
        assert_eq!(momentum_ratio(10, 5), 2.0);
    }
}
