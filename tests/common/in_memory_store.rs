use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use football_league_backend::db::store::LeagueStore;
use football_league_backend::models::club::ClubForm;
use football_league_backend::models::matches::{Match, MatchStatus};
use football_league_backend::models::tournament::{Participation, StatCounters};

/// Vec-backed store mirroring the Postgres behaviour the league code relies on
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub matches: Vec<Match>,
    pub participations: Vec<Participation>,
    pub forms: HashMap<Uuid, ClubForm>,
    /// Clubs known to the store; saving the form of any other club fails
    pub clubs: Vec<Uuid>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_club(&mut self) -> Uuid {
        let club_id = Uuid::new_v4();
        self.clubs.push(club_id);
        club_id
    }

    pub fn register(&mut self, tournament_id: Uuid, club_id: Uuid) {
        self.participations.push(Participation {
            id: Uuid::new_v4(),
            tournament_id,
            club_id,
            counters: StatCounters::default(),
            updated_at: Utc::now(),
        });
    }

    pub fn add_match(&mut self, game: Match) -> Uuid {
        let id = game.id;
        self.matches.push(game);
        id
    }

    pub fn counters(&self, tournament_id: Uuid, club_id: Uuid) -> Option<StatCounters> {
        self.participations
            .iter()
            .find(|p| p.tournament_id == tournament_id && p.club_id == club_id)
            .map(|p| p.counters)
    }
}

impl LeagueStore for InMemoryStore {
    async fn fetch_matches(
        &mut self,
        tournament_id: Uuid,
        status: Option<MatchStatus>,
    ) -> Result<Vec<Match>, sqlx::Error> {
        Ok(self
            .matches
            .iter()
            .filter(|m| m.tournament_id == Some(tournament_id))
            .filter(|m| status.map_or(true, |s| m.status == s))
            .cloned()
            .collect())
    }

    async fn fetch_participations(&mut self, tournament_id: Uuid) -> Result<Vec<Participation>, sqlx::Error> {
        Ok(self
            .participations
            .iter()
            .filter(|p| p.tournament_id == tournament_id)
            .cloned()
            .collect())
    }

    async fn upsert_participation(
        &mut self,
        tournament_id: Uuid,
        club_id: Uuid,
        counters: &StatCounters,
    ) -> Result<(), sqlx::Error> {
        match self
            .participations
            .iter_mut()
            .find(|p| p.tournament_id == tournament_id && p.club_id == club_id)
        {
            Some(participation) => {
                participation.counters = *counters;
                participation.updated_at = Utc::now();
            }
            None => self.participations.push(Participation {
                id: Uuid::new_v4(),
                tournament_id,
                club_id,
                counters: *counters,
                updated_at: Utc::now(),
            }),
        }
        Ok(())
    }

    async fn fetch_matches_for_club(
        &mut self,
        club_id: Uuid,
        status: Option<MatchStatus>,
    ) -> Result<Vec<Match>, sqlx::Error> {
        Ok(self
            .matches
            .iter()
            .filter(|m| m.involves(club_id))
            .filter(|m| status.map_or(true, |s| m.status == s))
            .cloned()
            .collect())
    }

    async fn save_club_form(&mut self, club_id: Uuid, form: &ClubForm) -> Result<(), sqlx::Error> {
        if !self.clubs.contains(&club_id) {
            return Err(sqlx::Error::RowNotFound);
        }
        self.forms.insert(club_id, *form);
        Ok(())
    }
}

/// Fixed reference instant so kickoff offsets are readable in tests
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 15, 0, 0).unwrap()
}

pub fn days_after_base(days: i64) -> DateTime<Utc> {
    base_time() + Duration::days(days)
}

fn blank_match(
    tournament_id: Option<Uuid>,
    home_club_id: Uuid,
    away_club_id: Uuid,
    kickoff_at: DateTime<Utc>,
    status: MatchStatus,
) -> Match {
    Match {
        id: Uuid::new_v4(),
        home_club_id,
        away_club_id,
        tournament_id,
        town: "Town".into(),
        stadium: "Stadium".into(),
        kickoff_at,
        status,
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
        created_at: kickoff_at,
        updated_at: kickoff_at,
    }
}

pub fn finished_match(
    tournament_id: Uuid,
    home_club_id: Uuid,
    away_club_id: Uuid,
    home_goals: i32,
    away_goals: i32,
    kickoff_at: DateTime<Utc>,
) -> Match {
    let mut game = blank_match(Some(tournament_id), home_club_id, away_club_id, kickoff_at, MatchStatus::Finished);
    game.home_goals = home_goals;
    game.away_goals = away_goals;
    game
}

pub fn scheduled_match(
    tournament_id: Uuid,
    home_club_id: Uuid,
    away_club_id: Uuid,
    kickoff_at: DateTime<Utc>,
) -> Match {
    blank_match(Some(tournament_id), home_club_id, away_club_id, kickoff_at, MatchStatus::Scheduled)
}
