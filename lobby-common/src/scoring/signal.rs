//! Signal score calculation
//!
//! The signal score condenses a campaign's credibility into a 0-100 value:
//! a weighted sum of normalized aggregate factors. Brands use the score and
//! its tier to judge whether demand is genuine.

use serde::{Deserialize, Serialize};

/// Factor weights. Must sum to 1.0.
const WEIGHT_GOAL_PROGRESS: f64 = 0.40;
const WEIGHT_DISCUSSION: f64 = 0.20;
const WEIGHT_TEAM: f64 = 0.10;
const WEIGHT_RESEARCH: f64 = 0.15;
const WEIGHT_MOMENTUM: f64 = 0.15;

/// Normalization ceilings: the count at which a factor saturates at 1.0
const DISCUSSION_CEILING: f64 = 25.0;
const TEAM_CEILING: f64 = 10.0;
const RESEARCH_CEILING: f64 = 50.0;
const MOMENTUM_CEILING: f64 = 20.0;

/// Aggregate counts a signal score is computed from
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalInputs {
    pub pledge_count: i64,
    pub pledge_goal: i64,
    pub unique_commenters: i64,
    pub team_size: i64,
    pub survey_response_count: i64,
    pub poll_vote_count: i64,
    pub pledges_last_7_days: i64,
}

/// Credibility tier derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalTier {
    Emerging,
    Building,
    Strong,
    Proven,
}

impl SignalTier {
    /// Tier from score using inclusive lower bounds: 25 Building, 50 Strong,
    /// 75 Proven
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            SignalTier::Proven
        } else if score >= 50.0 {
            SignalTier::Strong
        } else if score >= 25.0 {
            SignalTier::Building
        } else {
            SignalTier::Emerging
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalTier::Emerging => "emerging",
            SignalTier::Building => "building",
            SignalTier::Strong => "strong",
            SignalTier::Proven => "proven",
        }
    }
}

/// Normalized factor breakdown, each in [0, 1]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SignalFactors {
    pub goal_progress: f64,
    pub discussion: f64,
    pub team: f64,
    pub research: f64,
    pub momentum: f64,
}

/// Computed signal score with its factor breakdown
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SignalScore {
    /// Weighted sum scaled to [0, 100]
    pub score: f64,
    pub tier: SignalTier,
    pub factors: SignalFactors,
}

/// Normalize a count against a saturation ceiling, capped at 1.0
fn normalize(count: i64, ceiling: f64) -> f64 {
    if count <= 0 {
        return 0.0;
    }
    (count as f64 / ceiling).min(1.0)
}

/// Compute the signal score from aggregate inputs
///
/// A zero pledge goal contributes a zero goal-progress factor rather than
/// dividing by zero. The final score is clamped to [0, 100].
pub fn compute_signal_score(inputs: &SignalInputs) -> SignalScore {
    let goal_progress = if inputs.pledge_goal > 0 {
        (inputs.pledge_count.max(0) as f64 / inputs.pledge_goal as f64).min(1.0)
    } else {
        0.0
    };

    let factors = SignalFactors {
        goal_progress,
        discussion: normalize(inputs.unique_commenters, DISCUSSION_CEILING),
        team: normalize(inputs.team_size, TEAM_CEILING),
        research: normalize(
            inputs.survey_response_count + inputs.poll_vote_count,
            RESEARCH_CEILING,
        ),
        momentum: normalize(inputs.pledges_last_7_days, MOMENTUM_CEILING),
    };

    let weighted = factors.goal_progress * WEIGHT_GOAL_PROGRESS
        + factors.discussion * WEIGHT_DISCUSSION
        + factors.team * WEIGHT_TEAM
        + factors.research * WEIGHT_RESEARCH
        + factors.momentum * WEIGHT_MOMENTUM;

    let score = (weighted * 100.0).clamp(0.0, 100.0);

    SignalScore {
        score,
        tier: SignalTier::from_score(score),
        factors,
    }
}
