// Public read-only pages: home search, club, tournament and match detail.
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::club_queries::{club_participations, get_club, search_clubs};
use crate::db::helpers::{require_found, search_term};
use crate::db::match_queries::{
    finished_match_totals, get_match_with_clubs, list_tournament_matches, search_matches,
};
use crate::db::store::LeagueStore;
use crate::db::tournament_queries::list_tournament_summaries;
use crate::league::error::LeagueError;
use crate::league::form::recent_finished_matches;
use crate::league::standings::StandingsService;
use crate::models::club::{Club, ClubForm, FORM_SLOTS};
use crate::models::common::{ApiResponse, PaginationQuery};
use crate::models::matches::{Match, MatchDetailResponse, MatchStatus, MatchWithClubs};
use crate::models::tournament::{
    ParticipationWithNames, StandingEntry, StandingsRecompute, Tournament, TournamentMatchStats,
    TournamentSummary,
};

/// Tournaments shown on the home page when no tournament query is given
const HOME_TOURNAMENTS: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub club_q: Option<String>,
    pub match_home: Option<String>,
    pub match_away: Option<String>,
    pub tournament_q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub clubs: Vec<Club>,
    pub matches: Vec<MatchWithClubs>,
    pub tournaments: Vec<TournamentSummary>,
}

#[derive(Debug, Serialize)]
pub struct ClubDetailResponse {
    pub club: Club,
    pub form: ClubForm,
    pub last_matches: Vec<Match>,
    pub participations: Vec<ParticipationWithNames>,
}

#[derive(Debug, Serialize)]
pub struct TournamentDetailResponse {
    pub tournament: Tournament,
    pub standings: Vec<StandingEntry>,
    pub matches: Vec<MatchWithClubs>,
    pub stats: TournamentMatchStats,
    pub recompute: Option<StandingsRecompute>,
}

#[tracing::instrument(name = "Home search", skip(pool))]
pub async fn search(
    query: web::Query<SearchQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, LeagueError> {
    let club_pattern = search_term(query.club_q.as_deref());
    let home_pattern = search_term(query.match_home.as_deref());
    let away_pattern = search_term(query.match_away.as_deref());
    let tournament_pattern = search_term(query.tournament_q.as_deref());

    let clubs = search_clubs(pool.get_ref(), club_pattern.as_deref()).await?;
    let matches = search_matches(pool.get_ref(), home_pattern.as_deref(), away_pattern.as_deref()).await?;

    let tournament_limit = if tournament_pattern.is_some() {
        PaginationQuery::MAX_LIMIT
    } else {
        HOME_TOURNAMENTS
    };
    let tournaments =
        list_tournament_summaries(pool.get_ref(), tournament_pattern.as_deref(), tournament_limit, 0).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Search results",
        SearchResponse { clubs, matches, tournaments },
    )))
}

#[tracing::instrument(name = "Club detail", skip(pool))]
pub async fn club_detail(
    club_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, LeagueError> {
    let club_id = club_id.into_inner();
    let club = require_found(get_club(pool.get_ref(), club_id).await?, "Club", club_id)?;

    let mut conn = pool.acquire().await?;
    let finished = conn
        .fetch_matches_for_club(club_id, Some(MatchStatus::Finished))
        .await?;
    let last_matches = recent_finished_matches(club_id, &finished, FORM_SLOTS);
    let participations = club_participations(&mut *conn, club_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Club retrieved",
        ClubDetailResponse {
            form: club.form(),
            club,
            last_matches,
            participations,
        },
    )))
}

#[tracing::instrument(name = "Tournament detail", skip(pool))]
pub async fn tournament_detail(
    tournament_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, LeagueError> {
    let tournament_id = tournament_id.into_inner();
    let table = StandingsService::new(pool.get_ref().clone())
        .get_tournament_standings(tournament_id)
        .await?;

    let matches = list_tournament_matches(pool.get_ref(), tournament_id).await?;
    let (finished_matches, total_goals) = finished_match_totals(pool.get_ref(), tournament_id).await?;
    let stats = TournamentMatchStats::new(table.standings.len() as i64, finished_matches, total_goals);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Tournament retrieved",
        TournamentDetailResponse {
            tournament: table.tournament,
            standings: table.standings,
            matches,
            stats,
            recompute: table.recompute,
        },
    )))
}

#[tracing::instrument(name = "Match detail", skip(pool))]
pub async fn match_detail(
    match_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, LeagueError> {
    let match_id = match_id.into_inner();
    let game = require_found(get_match_with_clubs(pool.get_ref(), match_id).await?, "Match", match_id)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Match retrieved",
        MatchDetailResponse::from(game),
    )))
}
