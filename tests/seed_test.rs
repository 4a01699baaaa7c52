use chrono::{Duration, Utc};
use uuid::Uuid;

use football_league_backend::league::seed::{SeedGenerator, LEAGUES};
use football_league_backend::league::standings::recompute_tournament;
use football_league_backend::league::validation::LeagueValidator;
use football_league_backend::models::matches::{Match, MatchStatus};

mod common;
use common::in_memory_store::InMemoryStore;

#[test]
fn test_generates_five_single_round_robins() {
    let leagues = SeedGenerator::new(1).generate();

    assert_eq!(leagues.len(), LEAGUES.len());
    for league in &leagues {
        let clubs = league.profile.clubs.len();
        assert_eq!(clubs, 6);
        assert_eq!(league.matches.len(), clubs * (clubs - 1) / 2);

        // Every unordered pair exactly once
        let mut pairs: Vec<(usize, usize)> = league
            .matches
            .iter()
            .map(|m| (m.home.min(m.away), m.home.max(m.away)))
            .collect();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), league.matches.len());
    }
}

#[test]
fn test_generated_matches_satisfy_match_invariants() {
    let validator = LeagueValidator::new();

    for seed in 0..10 {
        for league in SeedGenerator::new(seed).generate() {
            let mut previous = league.profile.first_kickoff_at() - Duration::days(2);

            for game in &league.matches {
                assert_ne!(game.home, game.away);
                validator.validate_match_stats(&game.stats).unwrap();

                let gap = game.kickoff_at - previous;
                assert!(gap >= Duration::days(2) && gap <= Duration::days(4), "gap {:?}", gap);
                previous = game.kickoff_at;

                match game.status {
                    MatchStatus::Finished => {
                        assert!(game.stats.home_goals <= 5);
                        assert!(game.stats.away_goals <= 4);
                        assert_eq!(
                            game.stats.home_possession,
                            league.profile.clubs[game.home].possession_avg
                        );
                    }
                    MatchStatus::Scheduled => {
                        assert_eq!(game.stats.home_goals + game.stats.away_goals, 0);
                        assert_eq!(game.stats.home_possession, 50);
                    }
                }
            }
        }
    }
}

#[test]
fn test_first_fixture_starts_on_the_league_start_date() {
    for league in SeedGenerator::new(3).generate() {
        assert_eq!(league.matches[0].kickoff_at, league.profile.first_kickoff_at());
    }
}

#[test]
fn test_roughly_seventy_percent_of_fixtures_are_finished() {
    let (mut total, mut finished) = (0usize, 0usize);
    for seed in 0..40 {
        for league in SeedGenerator::new(seed).generate() {
            total += league.matches.len();
            finished += league.matches.iter().filter(|m| m.status == MatchStatus::Finished).count();
        }
    }

    let fraction = finished as f64 / total as f64;
    assert!((0.6..0.8).contains(&fraction), "finished fraction {}", fraction);
}

#[test]
fn test_different_seeds_differ() {
    let first = SeedGenerator::new(10).generate();
    let second = SeedGenerator::new(11).generate();
    assert!(first.iter().zip(&second).any(|(a, b)| a.matches != b.matches));
}

#[tokio::test]
async fn test_generated_league_aggregates_without_skips() {
    let now = Utc::now();

    for league in SeedGenerator::new(99).generate() {
        let mut store = InMemoryStore::new();
        let tournament_id = Uuid::new_v4();
        let club_ids: Vec<Uuid> = league.profile.clubs.iter().map(|_| store.add_club()).collect();
        for club_id in &club_ids {
            store.register(tournament_id, *club_id);
        }

        for generated in &league.matches {
            let stats = generated.stats;
            store.add_match(Match {
                id: Uuid::new_v4(),
                home_club_id: club_ids[generated.home],
                away_club_id: club_ids[generated.away],
                tournament_id: Some(tournament_id),
                town: "Town".into(),
                stadium: "Stadium".into(),
                kickoff_at: generated.kickoff_at,
                status: generated.status,
                home_goals: stats.home_goals,
                away_goals: stats.away_goals,
                home_possession: stats.home_possession,
                away_possession: stats.away_possession,
                home_shots: stats.home_shots,
                away_shots: stats.away_shots,
                home_shots_on_target: stats.home_shots_on_target,
                away_shots_on_target: stats.away_shots_on_target,
                home_red_cards: stats.home_red_cards,
                away_red_cards: stats.away_red_cards,
                home_saves: stats.home_saves,
                away_saves: stats.away_saves,
                created_at: now,
                updated_at: now,
            });
        }

        let report = recompute_tournament(&mut store, tournament_id).await.unwrap();
        let finished = league.matches.iter().filter(|m| m.status == MatchStatus::Finished).count();

        assert!(report.skipped.is_empty());
        assert_eq!(report.processed_matches, finished);

        let played: i32 = report.counters.values().map(|c| c.matches_played).sum();
        let wins: i32 = report.counters.values().map(|c| c.wins).sum();
        let losses: i32 = report.counters.values().map(|c| c.losses).sum();
        assert_eq!(played as usize, 2 * finished);
        assert_eq!(wins, losses);
    }
}
