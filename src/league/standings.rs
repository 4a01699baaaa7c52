use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::store::LeagueStore;
use crate::league::error::LeagueError;
use crate::league::ranking::rank_standings;
use crate::models::matches::{Match, MatchStatus};
use crate::models::tournament::*;

/// A finished match left out of the standings because one of its clubs is
/// not registered in the tournament
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SkippedMatch {
    pub match_id: Uuid,
    pub missing_club_ids: Vec<Uuid>,
}

/// Result of one aggregation pass over a tournament
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StandingsReport {
    pub tournament_id: Uuid,
    /// Fresh counters for every participant, keyed by club id
    pub counters: BTreeMap<Uuid, StatCounters>,
    pub processed_matches: usize,
    pub skipped: Vec<SkippedMatch>,
}

/// Rebuild participant counters of a tournament from its match log.
///
/// Every participant starts from zero. Scheduled matches and matches of other
/// tournaments are ignored. A finished match whose home or away club has no
/// participation row is skipped and reported instead of failing the batch.
pub fn aggregate_standings(
    tournament_id: Uuid,
    participations: &[Participation],
    matches: &[Match],
) -> StandingsReport {
    let mut counters: BTreeMap<Uuid, StatCounters> = participations
        .iter()
        .filter(|p| p.tournament_id == tournament_id)
        .map(|p| (p.club_id, StatCounters::default()))
        .collect();

    let mut processed_matches = 0;
    let mut skipped = Vec::new();

    for game in matches
        .iter()
        .filter(|m| m.is_finished() && m.tournament_id == Some(tournament_id))
    {
        let missing_club_ids: Vec<Uuid> = [game.home_club_id, game.away_club_id]
            .into_iter()
            .filter(|club_id| !counters.contains_key(club_id))
            .collect();

        if !missing_club_ids.is_empty() {
            tracing::warn!(
                "Skipping match {} in tournament {}: clubs {:?} are not registered participants",
                game.id, tournament_id, missing_club_ids
            );
            skipped.push(SkippedMatch { match_id: game.id, missing_club_ids });
            continue;
        }

        if let Some(home) = counters.get_mut(&game.home_club_id) {
            home.record(game.home_goals, game.away_goals);
        }
        if let Some(away) = counters.get_mut(&game.away_club_id) {
            away.record(game.away_goals, game.home_goals);
        }
        processed_matches += 1;
    }

    StandingsReport {
        tournament_id,
        counters,
        processed_matches,
        skipped,
    }
}

/// Recompute and persist the counters of every participant of a tournament.
///
/// Atomicity is the caller's business: pass a transaction to get all-or-nothing.
pub async fn recompute_tournament<S: LeagueStore>(
    store: &mut S,
    tournament_id: Uuid,
) -> Result<StandingsReport, sqlx::Error> {
    let participations = store.fetch_participations(tournament_id).await?;
    let matches = store
        .fetch_matches(tournament_id, Some(MatchStatus::Finished))
        .await?;

    let report = aggregate_standings(tournament_id, &participations, &matches);

    for (club_id, counters) in &report.counters {
        store.upsert_participation(tournament_id, *club_id, counters).await?;
    }

    Ok(report)
}

/// Which participation rows a reset applies to
#[derive(Debug, Clone)]
pub enum ResetScope {
    Tournament(Uuid),
    Participations(Vec<Uuid>),
}

/// Service responsible for tournament standings
#[derive(Debug, Clone)]
pub struct StandingsService {
    pool: PgPool,
}

impl StandingsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Recompute a tournament inside one transaction.
    ///
    /// The tournament row is locked first so concurrent recomputes of the same
    /// tournament run one after the other. The outcome is recorded in
    /// `standings_recomputes` outside the transaction.
    pub async fn recompute(&self, tournament_id: Uuid) -> Result<StandingsReport, LeagueError> {
        self.require_tournament(tournament_id).await?;

        tracing::info!("Starting standings recompute for tournament {}", tournament_id);
        self.record_pending(tournament_id).await?;

        match self.recompute_locked(tournament_id).await {
            Ok(report) => {
                tracing::info!(
                    "Standings recompute for tournament {} completed: {} matches processed, {} skipped",
                    tournament_id,
                    report.processed_matches,
                    report.skipped.len()
                );
                self.record_completed(&report).await?;
                Ok(report)
            }
            Err(sqlx::Error::RowNotFound) => {
                // Deleted between the existence check and the lock
                Err(LeagueError::not_found("Tournament", tournament_id))
            }
            Err(e) => {
                tracing::error!(
                    "Standings recompute for tournament {} failed and was rolled back: {}",
                    tournament_id, e
                );
                if let Err(record_err) = self.record_failed(tournament_id, &e.to_string()).await {
                    tracing::error!(
                        "Failed to record recompute failure for tournament {}: {}",
                        tournament_id, record_err
                    );
                }
                Err(LeagueError::TransactionFailure { tournament_id, source: e })
            }
        }
    }

    async fn recompute_locked(&self, tournament_id: Uuid) -> Result<StandingsReport, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT id FROM tournaments WHERE id = $1 FOR UPDATE")
            .bind(tournament_id)
            .fetch_one(&mut *tx)
            .await?;

        // Dropping `tx` on error rolls everything back
        let report = recompute_tournament(&mut *tx, tournament_id).await?;

        tx.commit().await?;
        Ok(report)
    }

    async fn require_tournament(&self, tournament_id: Uuid) -> Result<(), LeagueError> {
        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM tournaments WHERE id = $1")
            .bind(tournament_id)
            .fetch_optional(&self.pool)
            .await?;
        exists
            .map(|_| ())
            .ok_or_else(|| LeagueError::not_found("Tournament", tournament_id))
    }

    async fn record_pending(&self, tournament_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO standings_recomputes (tournament_id, status, started_at, completed_at)
            VALUES ($1, $2, NOW(), NULL)
            ON CONFLICT (tournament_id) DO UPDATE SET
                status = EXCLUDED.status,
                started_at = NOW(),
                completed_at = NULL
            "#,
        )
        .bind(tournament_id)
        .bind(RecomputeStatus::Pending.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn record_completed(&self, report: &StandingsReport) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE standings_recomputes
            SET status = $2, processed_matches = $3, skipped_matches = $4,
                last_error = NULL, completed_at = NOW()
            WHERE tournament_id = $1
            "#,
        )
        .bind(report.tournament_id)
        .bind(RecomputeStatus::Completed.as_str())
        .bind(report.processed_matches as i32)
        .bind(report.skipped.len() as i32)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn record_failed(&self, tournament_id: Uuid, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE standings_recomputes
            SET status = $2, last_error = $3, completed_at = NOW()
            WHERE tournament_id = $1
            "#,
        )
        .bind(tournament_id)
        .bind(RecomputeStatus::Failed.as_str())
        .bind(error)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Zero the counters of the selected participation rows. Returns the number of rows reset.
    ///
    /// The recompute status of every touched tournament goes back to `pending`
    /// until its standings are recalculated.
    pub async fn reset(&self, scope: ResetScope) -> Result<u64, LeagueError> {
        let mut tx = self.pool.begin().await?;

        let tournament_ids: Vec<Uuid> = match &scope {
            ResetScope::Tournament(tournament_id) => vec![*tournament_id],
            ResetScope::Participations(ids) => {
                sqlx::query_scalar("SELECT DISTINCT tournament_id FROM tournament_clubs WHERE id = ANY($1)")
                    .bind(ids.clone())
                    .fetch_all(&mut *tx)
                    .await?
            }
        };

        let query = match &scope {
            ResetScope::Tournament(tournament_id) => sqlx::query(
                r#"
                UPDATE tournament_clubs
                SET matches_played = 0, wins = 0, draws = 0, losses = 0,
                    goals_for = 0, goals_against = 0, updated_at = NOW()
                WHERE tournament_id = $1
                "#,
            )
            .bind(*tournament_id),
            ResetScope::Participations(ids) => sqlx::query(
                r#"
                UPDATE tournament_clubs
                SET matches_played = 0, wins = 0, draws = 0, losses = 0,
                    goals_for = 0, goals_against = 0, updated_at = NOW()
                WHERE id = ANY($1)
                "#,
            )
            .bind(ids.clone()),
        };

        let result = query.execute(&mut *tx).await?;

        sqlx::query(
            r#"
            INSERT INTO standings_recomputes (tournament_id, status, started_at, completed_at)
            SELECT t.id, $2, NOW(), NULL FROM tournaments t WHERE t.id = ANY($1)
            ON CONFLICT (tournament_id) DO UPDATE SET
                status = EXCLUDED.status,
                processed_matches = 0,
                skipped_matches = 0,
                last_error = NULL,
                started_at = NOW(),
                completed_at = NULL
            "#,
        )
        .bind(&tournament_ids)
        .bind(RecomputeStatus::Pending.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!("Reset statistics of {} participations ({:?})", result.rows_affected(), scope);
        Ok(result.rows_affected())
    }

    /// Create zeroed participation rows, leaving existing pairs untouched
    pub async fn initialize_for_tournament(
        &self,
        tournament_id: Uuid,
        club_ids: &[Uuid],
    ) -> Result<u64, LeagueError> {
        let mut tx = self.pool.begin().await?;
        let mut created = 0;

        for club_id in club_ids {
            let result = sqlx::query(
                r#"
                INSERT INTO tournament_clubs (id, tournament_id, club_id)
                VALUES ($1, $2, $3)
                ON CONFLICT (tournament_id, club_id) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(tournament_id)
            .bind(club_id)
            .execute(&mut *tx)
            .await?;
            created += result.rows_affected();
        }

        tx.commit().await?;
        tracing::info!(
            "Initialized standings for tournament {}: {} of {} clubs added",
            tournament_id, created, club_ids.len()
        );
        Ok(created)
    }

    /// Ranked table of a tournament with the latest recompute outcome
    pub async fn get_tournament_standings(
        &self,
        tournament_id: Uuid,
    ) -> Result<TournamentStandingsResponse, LeagueError> {
        let tournament = sqlx::query_as::<_, Tournament>("SELECT * FROM tournaments WHERE id = $1")
            .bind(tournament_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| LeagueError::not_found("Tournament", tournament_id))?;

        let rows = sqlx::query_as::<_, StandingRow>(
            r#"
            SELECT tc.club_id, c.name AS club_name,
                   tc.matches_played, tc.wins, tc.draws, tc.losses,
                   tc.goals_for, tc.goals_against
            FROM tournament_clubs tc
            JOIN clubs c ON c.id = tc.club_id
            WHERE tc.tournament_id = $1
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        let standings = rank_standings(rows.into_iter().map(StandingEntry::from).collect());

        let recompute = sqlx::query_as::<_, StandingsRecompute>(
            "SELECT * FROM standings_recomputes WHERE tournament_id = $1",
        )
        .bind(tournament_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(TournamentStandingsResponse {
            tournament,
            standings,
            recompute,
        })
    }

    /// Sums of all participant counters
    pub async fn tournament_totals(&self, tournament_id: Uuid) -> Result<TournamentTotals, LeagueError> {
        self.require_tournament(tournament_id).await?;

        let totals = sqlx::query_as::<_, TournamentTotals>(
            r#"
            SELECT COUNT(*) AS participants,
                   COALESCE(SUM(matches_played), 0)::BIGINT AS matches_played,
                   COALESCE(SUM(wins), 0)::BIGINT AS wins,
                   COALESCE(SUM(draws), 0)::BIGINT AS draws,
                   COALESCE(SUM(losses), 0)::BIGINT AS losses,
                   COALESCE(SUM(goals_for), 0)::BIGINT AS goals_for,
                   COALESCE(SUM(goals_against), 0)::BIGINT AS goals_against
            FROM tournament_clubs
            WHERE tournament_id = $1
            "#,
        )
        .bind(tournament_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }
}
