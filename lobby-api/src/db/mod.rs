//! Per-domain database queries for lobby-api

pub mod campaigns;
pub mod comments;
pub mod events;
pub mod milestones;
pub mod pledges;
pub mod polls;
pub mod scores;
pub mod sessions;
pub mod surveys;
pub mod teams;
pub mod users;
