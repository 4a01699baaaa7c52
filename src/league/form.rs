use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::club_queries::all_club_ids;
use crate::db::store::LeagueStore;
use crate::league::error::LeagueError;
use crate::models::club::{ClubForm, FormResult, FORM_SLOTS};
use crate::models::matches::Match;

/// Most recent first; equal kickoff times fall back to match id ascending
fn most_recent_first(a: &Match, b: &Match) -> Ordering {
    b.kickoff_at.cmp(&a.kickoff_at).then_with(|| a.id.cmp(&b.id))
}

/// Finished matches of a club, most recent first, at most `limit` of them
pub fn recent_finished_matches(club_id: Uuid, matches: &[Match], limit: usize) -> Vec<Match> {
    let mut finished: Vec<&Match> = matches
        .iter()
        .filter(|m| m.is_finished() && m.involves(club_id))
        .collect();
    finished.sort_by(|a, b| most_recent_first(a, b));
    finished.into_iter().take(limit).cloned().collect()
}

/// Derive the recent form and the upcoming fixture flag of a club.
///
/// Slots are filled most recent first from the last five finished matches,
/// whether the club played home or away. Unused slots stay `NoResult`.
/// `has_upcoming_fixture` is set when a scheduled match kicks off strictly
/// after `now`.
pub fn summarize_form(club_id: Uuid, matches: &[Match], now: DateTime<Utc>) -> ClubForm {
    let mut form = ClubForm::default();

    for (slot, game) in form
        .slots
        .iter_mut()
        .zip(recent_finished_matches(club_id, matches, FORM_SLOTS))
    {
        *slot = game.outcome_for(club_id).unwrap_or(FormResult::NoResult);
    }

    form.has_upcoming_fixture = matches
        .iter()
        .any(|m| !m.is_finished() && m.involves(club_id) && m.kickoff_at > now);

    form
}

/// Fetch a club's matches, summarize them and store the result
pub async fn refresh_club_form<S: LeagueStore>(
    store: &mut S,
    club_id: Uuid,
    now: DateTime<Utc>,
) -> Result<ClubForm, sqlx::Error> {
    let matches = store.fetch_matches_for_club(club_id, None).await?;
    let form = summarize_form(club_id, &matches, now);
    store.save_club_form(club_id, &form).await?;
    tracing::debug!("Refreshed form of club {}: {:?}", club_id, form);
    Ok(form)
}

#[derive(Debug, Serialize, Default)]
pub struct FormRefreshSummary {
    pub refreshed: usize,
    pub failed: Vec<Uuid>,
}

/// Service keeping the stored club form in sync with the match log
#[derive(Debug, Clone)]
pub struct FormService {
    pool: PgPool,
}

impl FormService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn refresh_club(&self, club_id: Uuid) -> Result<ClubForm, LeagueError> {
        let mut conn = self.pool.acquire().await?;
        match refresh_club_form(&mut *conn, club_id, Utc::now()).await {
            Ok(form) => Ok(form),
            Err(sqlx::Error::RowNotFound) => Err(LeagueError::not_found("Club", club_id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Refresh several clubs. A failing club is logged and reported, the others still run.
    pub async fn refresh_clubs(&self, club_ids: &[Uuid]) -> Result<FormRefreshSummary, LeagueError> {
        let mut conn = self.pool.acquire().await?;
        let now = Utc::now();
        let mut summary = FormRefreshSummary::default();

        for club_id in club_ids {
            match refresh_club_form(&mut *conn, *club_id, now).await {
                Ok(_) => summary.refreshed += 1,
                Err(e) => {
                    tracing::error!("Failed to refresh form of club {}: {}", club_id, e);
                    summary.failed.push(*club_id);
                }
            }
        }

        tracing::info!(
            "Refreshed form of {} clubs ({} failed)",
            summary.refreshed,
            summary.failed.len()
        );
        Ok(summary)
    }

    pub async fn refresh_all(&self) -> Result<FormRefreshSummary, LeagueError> {
        let club_ids = all_club_ids(&self.pool).await?;
        self.refresh_clubs(&club_ids).await
    }
}
