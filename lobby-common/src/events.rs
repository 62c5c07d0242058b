//! Event types for the ProductLobby activity stream

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ProductLobby event types, broadcast to SSE clients and recorded in the
/// contribution_events table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LobbyEvent {
    /// Campaign was created
    CampaignCreated {
        campaign_id: Uuid,
        title: String,
        brand_name: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A supporter pledged to a campaign
    PledgeAdded {
        campaign_id: Uuid,
        pledge_count: i64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A supporter withdrew their pledge
    PledgeRemoved {
        campaign_id: Uuid,
        pledge_count: i64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Comment posted on a campaign
    CommentAdded {
        campaign_id: Uuid,
        comment_id: Uuid,
        sentiment_label: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Creator opened a poll
    PollCreated {
        campaign_id: Uuid,
        poll_id: Uuid,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A milestone threshold was crossed
    MilestoneReached {
        campaign_id: Uuid,
        milestone_id: Uuid,
        label: String,
        threshold: i64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Cached signal score was recomputed
    SignalScoreUpdated {
        campaign_id: Uuid,
        score: f64,
        tier: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl LobbyEvent {
    /// Event type string used as the SSE event field
    pub fn event_type(&self) -> &'static str {
        match self {
            LobbyEvent::CampaignCreated { .. } => "CampaignCreated",
            LobbyEvent::PledgeAdded { .. } => "PledgeAdded",
            LobbyEvent::PledgeRemoved { .. } => "PledgeRemoved",
            LobbyEvent::CommentAdded { .. } => "CommentAdded",
            LobbyEvent::PollCreated { .. } => "PollCreated",
            LobbyEvent::MilestoneReached { .. } => "MilestoneReached",
            LobbyEvent::SignalScoreUpdated { .. } => "SignalScoreUpdated",
        }
    }
}
