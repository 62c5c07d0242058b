//! Shared application state

use lobby_common::events::LobbyEvent;
use sqlx::SqlitePool;
use tokio::sync::broadcast;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Event broadcaster for SSE clients
    pub event_tx: broadcast::Sender<LobbyEvent>,
    /// Default page size for list endpoints (from settings)
    pub list_page_size: i64,
    /// Default page size for the activity feed (from settings)
    pub feed_page_size: i64,
    /// Session lifetime in seconds (from settings)
    pub session_ttl_seconds: i64,
    /// Cached signal scores older than this are recomputed on read
    pub score_stale_after_seconds: i64,
}

impl AppState {
    /// Create application state with operational settings loaded from the
    /// settings table
    pub async fn load(db: SqlitePool) -> lobby_common::Result<Self> {
        let (event_tx, _) = broadcast::channel(256);

        let list_page_size = lobby_common::config::setting_i64(&db, "list_page_size", 25).await?;
        let feed_page_size = lobby_common::config::setting_i64(&db, "feed_page_size", 50).await?;
        let session_ttl_seconds =
            lobby_common::config::setting_i64(&db, "session_ttl_seconds", 2_592_000).await?;
        let score_stale_after_seconds =
            lobby_common::config::setting_i64(&db, "score_stale_after_seconds", 300).await?;

        Ok(Self {
            db,
            event_tx,
            list_page_size,
            feed_page_size,
            session_ttl_seconds,
            score_stale_after_seconds,
        })
    }

    /// Broadcast an event to all SSE listeners
    pub fn broadcast_event(&self, event: LobbyEvent) {
        // Ignore send errors (no receivers is OK)
        let _ = self.event_tx.send(event);
    }

    /// Subscribe to the event stream for SSE
    pub fn subscribe_events(&self) -> broadcast::Receiver<LobbyEvent> {
        self.event_tx.subscribe()
    }
}
