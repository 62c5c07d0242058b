//! Supporter CSV export

use crate::api::campaigns::load_campaign;
use crate::db::pledges;
use crate::error::Result;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

/// Quote a CSV field per RFC 4180 when it contains a comma, quote, or newline
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// GET /api/campaigns/:id/export/supporters - supporter list as CSV
pub async fn supporters_csv(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Response> {
    let campaign = load_campaign(&state, &campaign_id).await?;
    let rows = pledges::all_pledges(&state.db, &campaign_id).await?;

    let mut csv = String::from("username,amount_cents,note,pledged_at\n");
    for row in &rows {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            csv_field(&row.username),
            row.amount_cents,
            csv_field(row.note.as_deref().unwrap_or("")),
            row.created_at.format("%Y-%m-%dT%H:%M:%S"),
        ));
    }

    let filename = format!("supporters-{}.csv", campaign.slug);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
        .into_response())
}
