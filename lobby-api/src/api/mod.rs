//! HTTP API: handlers, authentication middleware, SSE

pub mod auth;
pub mod campaigns;
pub mod comments;
pub mod exports;
pub mod feed;
pub mod health;
pub mod milestones;
pub mod pledges;
pub mod polls;
pub mod sse;
pub mod stats;
pub mod surveys;
pub mod teams;
