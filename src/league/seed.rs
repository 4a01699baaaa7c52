//! Synthetic league data for demos and local development.
//!
//! Five national leagues of six clubs each, one round robin per league.
//! About 70% of the fixtures come out finished with a simulated result,
//! the rest stay scheduled. Standings and form are never generated here:
//! after inserting, `seed_database` runs the regular recompute and form refresh.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use sqlx::PgPool;

use crate::db::club_queries::insert_club;
use crate::db::match_queries::insert_match;
use crate::db::store::LeagueStore;
use crate::db::tournament_queries::insert_tournament;
use crate::league::error::LeagueError;
use crate::league::form::FormService;
use crate::league::standings::StandingsService;
use crate::league::validation::LeagueValidator;
use crate::models::club::CreateClubRequest;
use crate::models::matches::{MatchStats, MatchStatus, NewMatch};
use crate::models::tournament::StatCounters;

pub const FINISHED_PROBABILITY: f64 = 0.7;
const MAX_HOME_GOALS: i32 = 5;
const MAX_AWAY_GOALS: i32 = 4;
const RED_CARD_PROBABILITY: f64 = 0.02;

/// Catalogue entry. `avg_goals_for` doubles as attacking strength.
#[derive(Debug, Clone, Copy)]
pub struct ClubProfile {
    pub name: &'static str,
    pub town: &'static str,
    pub stadium: &'static str,
    pub price: i64,
    pub founded: i32,
    pub avg_goals_for: f64,
    pub avg_goals_against: f64,
    pub possession_avg: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct LeagueProfile {
    pub name: &'static str,
    pub country: &'static str,
    /// First kickoff as (year, month, day, hour, minute) UTC
    pub first_kickoff: (i32, u32, u32, u32, u32),
    pub clubs: [ClubProfile; 6],
}

const fn club(
    name: &'static str,
    town: &'static str,
    stadium: &'static str,
    price: i64,
    founded: i32,
    avg_goals_for: f64,
    avg_goals_against: f64,
    possession_avg: i32,
) -> ClubProfile {
    ClubProfile { name, town, stadium, price, founded, avg_goals_for, avg_goals_against, possession_avg }
}

pub const LEAGUES: [LeagueProfile; 5] = [
    LeagueProfile {
        name: "Premier League",
        country: "England",
        first_kickoff: (2023, 8, 12, 15, 0),
        clubs: [
            club("Manchester City", "Manchester", "Etihad Stadium", 1_250_000_000, 1880, 2.8, 0.9, 65),
            club("Arsenal", "London", "Emirates Stadium", 1_100_000_000, 1886, 2.5, 1.0, 62),
            club("Liverpool", "Liverpool", "Anfield", 900_000_000, 1892, 2.6, 1.1, 63),
            club("Chelsea", "London", "Stamford Bridge", 850_000_000, 1905, 1.8, 1.5, 58),
            club("Manchester United", "Manchester", "Old Trafford", 950_000_000, 1878, 1.9, 1.4, 55),
            club("Tottenham Hotspur", "London", "Tottenham Hotspur Stadium", 800_000_000, 1882, 2.1, 1.6, 57),
        ],
    },
    LeagueProfile {
        name: "La Liga",
        country: "Spain",
        first_kickoff: (2023, 8, 13, 17, 0),
        clubs: [
            club("Real Madrid", "Madrid", "Santiago Bernabeu", 1_200_000_000, 1902, 2.7, 0.8, 60),
            club("Barcelona", "Barcelona", "Camp Nou", 1_100_000_000, 1899, 2.4, 0.9, 68),
            club("Atletico Madrid", "Madrid", "Metropolitano", 850_000_000, 1903, 1.9, 0.7, 52),
            club("Sevilla", "Seville", "Ramon Sanchez-Pizjuan", 400_000_000, 1890, 1.5, 1.3, 54),
            club("Valencia", "Valencia", "Mestalla", 350_000_000, 1919, 1.6, 1.4, 53),
            club("Villarreal", "Villarreal", "Estadio de la Ceramica", 380_000_000, 1923, 1.8, 1.2, 56),
        ],
    },
    LeagueProfile {
        name: "Serie A",
        country: "Italy",
        first_kickoff: (2023, 8, 19, 20, 45),
        clubs: [
            club("Inter", "Milan", "Giuseppe Meazza", 900_000_000, 1908, 2.5, 0.6, 58),
            club("Juventus", "Turin", "Allianz Stadium", 850_000_000, 1897, 2.0, 0.8, 55),
            club("AC Milan", "Milan", "San Siro", 800_000_000, 1899, 2.1, 1.1, 56),
            club("Napoli", "Naples", "Diego Armando Maradona", 750_000_000, 1926, 2.2, 1.3, 57),
            club("Roma", "Rome", "Stadio Olimpico", 500_000_000, 1927, 1.8, 1.4, 54),
            club("Lazio", "Rome", "Stadio Olimpico", 450_000_000, 1900, 1.7, 1.2, 53),
        ],
    },
    LeagueProfile {
        name: "Bundesliga",
        country: "Germany",
        first_kickoff: (2023, 8, 18, 18, 30),
        clubs: [
            club("Bayern Munich", "Munich", "Allianz Arena", 1_000_000_000, 1900, 3.1, 0.7, 66),
            club("Borussia Dortmund", "Dortmund", "Signal Iduna Park", 800_000_000, 1909, 2.5, 1.2, 59),
            club("Bayer Leverkusen", "Leverkusen", "BayArena", 600_000_000, 1904, 2.4, 1.0, 58),
            club("RB Leipzig", "Leipzig", "Red Bull Arena", 550_000_000, 2009, 2.3, 1.3, 57),
            club("Eintracht Frankfurt", "Frankfurt", "Waldstadion", 400_000_000, 1899, 1.9, 1.4, 52),
            club("Borussia Monchengladbach", "Monchengladbach", "Borussia-Park", 350_000_000, 1900, 1.7, 1.5, 51),
        ],
    },
    LeagueProfile {
        name: "Ligue 1",
        country: "France",
        first_kickoff: (2023, 8, 11, 21, 0),
        clubs: [
            club("Paris Saint-Germain", "Paris", "Parc des Princes", 950_000_000, 1970, 2.9, 0.8, 67),
            club("Marseille", "Marseille", "Velodrome", 500_000_000, 1899, 2.1, 1.3, 55),
            club("Lyon", "Lyon", "Parc Olympique Lyonnais", 450_000_000, 1950, 1.9, 1.4, 56),
            club("Monaco", "Monaco", "Stade Louis II", 400_000_000, 1924, 2.0, 1.5, 54),
            club("Nice", "Nice", "Allianz Riviera", 350_000_000, 1904, 1.6, 0.9, 53),
            club("Lille", "Lille", "Stade Pierre-Mauroy", 380_000_000, 1944, 1.8, 1.1, 52),
        ],
    },
];

impl LeagueProfile {
    pub fn first_kickoff_at(&self) -> DateTime<Utc> {
        let (year, month, day, hour, minute) = self.first_kickoff;
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .unwrap_or_default()
    }
}

impl ClubProfile {
    fn to_request(self, country: &str) -> CreateClubRequest {
        CreateClubRequest {
            name: self.name.to_string(),
            country: country.to_string(),
            town: self.town.to_string(),
            price: self.price,
            emblem: None,
            founded: self.founded,
            stadium: self.stadium.to_string(),
            avg_goals_for: self.avg_goals_for,
            avg_goals_against: self.avg_goals_against,
            possession_avg: self.possession_avg,
        }
    }
}

/// A generated fixture; clubs are indexes into the league's club list
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMatch {
    pub home: usize,
    pub away: usize,
    pub kickoff_at: DateTime<Utc>,
    pub status: MatchStatus,
    pub stats: MatchStats,
}

#[derive(Debug, Clone)]
pub struct GeneratedLeague {
    pub profile: LeagueProfile,
    pub matches: Vec<GeneratedMatch>,
}

/// Deterministic generator: the same seed always yields the same data
pub struct SeedGenerator {
    rng: StdRng,
}

impl SeedGenerator {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn generate(&mut self) -> Vec<GeneratedLeague> {
        LEAGUES
            .iter()
            .map(|profile| GeneratedLeague {
                profile: *profile,
                matches: self.generate_league_matches(profile),
            })
            .collect()
    }

    /// Single round robin, 2 to 4 days between consecutive fixtures
    fn generate_league_matches(&mut self, profile: &LeagueProfile) -> Vec<GeneratedMatch> {
        let club_count = profile.clubs.len();
        let mut kickoff_at = profile.first_kickoff_at();
        let mut matches = Vec::with_capacity(club_count * (club_count - 1) / 2);

        for home in 0..club_count {
            for away in (home + 1)..club_count {
                let (status, stats) = if self.rng.gen_bool(FINISHED_PROBABILITY) {
                    (
                        MatchStatus::Finished,
                        self.simulate_result(&profile.clubs[home], &profile.clubs[away]),
                    )
                } else {
                    (MatchStatus::Scheduled, MatchStats::default())
                };

                matches.push(GeneratedMatch { home, away, kickoff_at, status, stats });
                kickoff_at += Duration::days(self.rng.gen_range(2..=4));
            }
        }

        matches
    }

    /// Simulate a finished match between two catalogue clubs
    pub fn simulate_result(&mut self, home: &ClubProfile, away: &ClubProfile) -> MatchStats {
        let home_advantage = self.rng.gen_range(0.8..1.2);
        let home_goals = self.sample_goals(home.avg_goals_for * home_advantage, MAX_HOME_GOALS);
        let away_goals = self.sample_goals(away.avg_goals_for, MAX_AWAY_GOALS);

        let home_possession = home.possession_avg.clamp(0, 100);
        let away_possession = 100 - home_possession;

        let total_shots: i32 = self.rng.gen_range(18..=30);
        let home_shots = (total_shots as f64 * home_possession as f64 / 100.0) as i32;
        let away_shots = total_shots - home_shots;

        let home_shots_on_target = (home_shots as f64 * self.rng.gen_range(0.3..0.6)) as i32;
        let away_shots_on_target = (away_shots as f64 * self.rng.gen_range(0.3..0.6)) as i32;

        MatchStats {
            home_goals,
            away_goals,
            home_possession,
            away_possession,
            home_shots,
            away_shots,
            home_shots_on_target,
            away_shots_on_target,
            home_red_cards: self.rng.gen_bool(RED_CARD_PROBABILITY) as i32,
            away_red_cards: self.rng.gen_bool(RED_CARD_PROBABILITY) as i32,
            home_saves: (away_shots_on_target - away_goals).max(0),
            away_saves: (home_shots_on_target - home_goals).max(0),
        }
    }

    /// Normal around `mean` with unit deviation, truncated toward zero and clamped
    fn sample_goals(&mut self, mean: f64, max: i32) -> i32 {
        let sample = Normal::new(mean, 1.0)
            .map(|normal| normal.sample(&mut self.rng))
            .unwrap_or(mean);
        (sample.trunc() as i32).clamp(0, max)
    }
}

#[derive(Debug, Serialize, Default)]
pub struct SeedSummary {
    pub seed: u64,
    pub tournaments: usize,
    pub clubs: usize,
    pub matches: usize,
    pub finished_matches: usize,
    pub skipped_matches: usize,
}

/// Replace all league data with generated data, then derive standings and form.
pub async fn seed_database(pool: &PgPool, seed: u64) -> Result<SeedSummary, LeagueError> {
    let leagues = SeedGenerator::new(seed).generate();
    let validator = LeagueValidator::new();
    let mut summary = SeedSummary { seed, ..Default::default() };
    let mut tournament_ids = Vec::with_capacity(leagues.len());

    tracing::info!("Seeding league data with seed {}", seed);

    let mut tx = pool.begin().await?;

    for table in ["matches", "tournament_clubs", "standings_recomputes", "tournaments", "clubs"] {
        let result = sqlx::query(&format!("DELETE FROM {}", table))
            .execute(&mut *tx)
            .await?;
        tracing::info!("Removed {} rows from {}", result.rows_affected(), table);
    }

    for league in &leagues {
        let profile = &league.profile;
        let tournament = insert_tournament(&mut *tx, profile.name, profile.country, None).await?;
        tournament_ids.push(tournament.id);

        let mut clubs = Vec::with_capacity(profile.clubs.len());
        for club_profile in &profile.clubs {
            let club = insert_club(&mut *tx, &club_profile.to_request(profile.country)).await?;
            LeagueStore::upsert_participation(&mut *tx, tournament.id, club.id, &StatCounters::default())
                .await?;
            clubs.push(club);
        }

        for generated in &league.matches {
            let home = &clubs[generated.home];
            let game = NewMatch {
                home_club_id: home.id,
                away_club_id: clubs[generated.away].id,
                tournament_id: Some(tournament.id),
                town: home.town.clone(),
                stadium: home.stadium.clone(),
                kickoff_at: generated.kickoff_at,
                status: generated.status,
                stats: generated.stats,
            };
            validator.validate_new_match(&game)?;
            insert_match(&mut *tx, &game).await?;

            summary.matches += 1;
            if generated.status == MatchStatus::Finished {
                summary.finished_matches += 1;
            }
        }

        summary.tournaments += 1;
        summary.clubs += clubs.len();
    }

    tx.commit().await?;

    let standings = StandingsService::new(pool.clone());
    for tournament_id in &tournament_ids {
        let report = standings.recompute(*tournament_id).await?;
        summary.skipped_matches += report.skipped.len();
    }
    FormService::new(pool.clone()).refresh_all().await?;

    tracing::info!(
        "Seeded {} tournaments, {} clubs and {} matches ({} finished)",
        summary.tournaments, summary.clubs, summary.matches, summary.finished_matches
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_data() {
        let first = SeedGenerator::new(42).generate();
        let second = SeedGenerator::new(42).generate();
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.matches, b.matches);
        }
    }

    #[test]
    fn test_goal_sampling_is_clamped() {
        let mut generator = SeedGenerator::new(7);
        for _ in 0..200 {
            let goals = generator.sample_goals(10.0, MAX_HOME_GOALS);
            assert!((0..=MAX_HOME_GOALS).contains(&goals));
            assert_eq!(generator.sample_goals(-5.0, MAX_AWAY_GOALS), 0);
        }
    }
}
