use std::collections::BTreeSet;

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::league::error::LeagueError;
use crate::league::form::{FormRefreshSummary, FormService};
use crate::league::standings::{StandingsReport, StandingsService};
use crate::models::matches::Match;

#[derive(Debug, Serialize)]
pub struct FailedRecompute {
    pub tournament_id: Uuid,
    pub error: String,
}

/// What happened after a batch of match changes
#[derive(Debug, Serialize, Default)]
pub struct MatchChangeSummary {
    pub standings: Vec<StandingsReport>,
    pub failed: Vec<FailedRecompute>,
    pub forms: FormRefreshSummary,
}

/// Tournaments and clubs touched by a set of matches, deduplicated and sorted
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AffectedEntities {
    pub tournament_ids: BTreeSet<Uuid>,
    pub club_ids: BTreeSet<Uuid>,
}

impl AffectedEntities {
    pub fn from_matches<'a>(matches: impl IntoIterator<Item = &'a Match>) -> Self {
        let mut affected = Self::default();
        for game in matches {
            affected.add(game);
        }
        affected
    }

    pub fn add(&mut self, game: &Match) {
        if let Some(tournament_id) = game.tournament_id {
            self.tournament_ids.insert(tournament_id);
        }
        self.club_ids.insert(game.home_club_id);
        self.club_ids.insert(game.away_club_id);
    }

    pub fn is_empty(&self) -> bool {
        self.tournament_ids.is_empty() && self.club_ids.is_empty()
    }
}

/// Main league service keeping derived data in step with the match log
pub struct LeagueService {
    standings: StandingsService,
    forms: FormService,
}

impl LeagueService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            standings: StandingsService::new(pool.clone()),
            forms: FormService::new(pool),
        }
    }

    /// Recompute every affected tournament, then refresh every affected club's form.
    ///
    /// Forms run last so they read the log once standings have settled. A failed
    /// recompute is reported in the summary; the other tournaments still run.
    pub async fn apply_match_changes(
        &self,
        affected: &AffectedEntities,
    ) -> Result<MatchChangeSummary, LeagueError> {
        let mut summary = self.recompute_tournaments(affected.tournament_ids.iter().copied()).await;

        let club_ids: Vec<Uuid> = affected.club_ids.iter().copied().collect();
        summary.forms = self.forms.refresh_clubs(&club_ids).await?;

        tracing::info!(
            "Applied match changes: {} tournaments recomputed, {} failed, {} club forms refreshed",
            summary.standings.len(),
            summary.failed.len(),
            summary.forms.refreshed
        );
        Ok(summary)
    }

    pub async fn recompute_tournaments(
        &self,
        tournament_ids: impl IntoIterator<Item = Uuid>,
    ) -> MatchChangeSummary {
        let mut summary = MatchChangeSummary::default();
        for tournament_id in tournament_ids {
            match self.standings.recompute(tournament_id).await {
                Ok(report) => summary.standings.push(report),
                Err(e) => summary.failed.push(FailedRecompute {
                    tournament_id,
                    error: e.to_string(),
                }),
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matches::MatchStatus;
    use chrono::Utc;

    fn game(tournament_id: Option<Uuid>, home: Uuid, away: Uuid) -> Match {
        let now = Utc::now();
        Match {
            id: Uuid::new_v4(),
            home_club_id: home,
            away_club_id: away,
            tournament_id,
            town: "Town".into(),
            stadium: "Stadium".into(),
            kickoff_at: now,
            status: MatchStatus::Scheduled,
            home_goals: 0,
            away_goals: 0,
            home_possession: 50,
            away_possession: 50,
            home_shots: 0,
            away_shots: 0,
            home_shots_on_target: 0,
            away_shots_on_target: 0,
            home_red_cards: 0,
            away_red_cards: 0,
            home_saves: 0,
            away_saves: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_affected_entities_deduplicate() {
        let tournament = Uuid::new_v4();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let matches = vec![
            game(Some(tournament), a, b),
            game(Some(tournament), b, c),
            game(None, c, a),
        ];

        let affected = AffectedEntities::from_matches(&matches);
        assert_eq!(affected.tournament_ids.len(), 1);
        assert_eq!(affected.club_ids.len(), 3);
        assert!(!affected.is_empty());
        assert!(AffectedEntities::default().is_empty());
    }
}
