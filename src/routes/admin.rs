use actix_web::web;

use crate::handlers::admin::{
    club_handler,
    match_handler,
    participation_handler,
    seed_handler,
    tournament_handler,
};
use crate::middleware::admin::AdminMiddleware;

pub fn init_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            // Club management routes
            .service(
                web::resource("/clubs")
                    .route(web::get().to(club_handler::get_clubs))
                    .route(web::post().to(club_handler::create_club))
            )
            .service(
                web::resource("/clubs/{id}")
                    .route(web::patch().to(club_handler::update_club_details))
                    .route(web::delete().to(club_handler::delete_club_by_id))
            )
            .service(
                web::resource("/clubs/{id}/refresh-form")
                    .route(web::post().to(club_handler::refresh_club_form))
            )

            // Tournament management routes
            .service(
                web::resource("/tournaments")
                    .route(web::get().to(tournament_handler::get_tournaments))
                    .route(web::post().to(tournament_handler::create_tournament))
            )
            .service(
                web::resource("/tournaments/{id}")
                    .route(web::patch().to(tournament_handler::update_tournament_details))
                    .route(web::delete().to(tournament_handler::delete_tournament_by_id))
            )
            .service(
                web::resource("/tournaments/{id}/participants")
                    .route(web::post().to(tournament_handler::add_participant))
            )
            .service(
                web::resource("/tournaments/{id}/participants/{club_id}")
                    .route(web::delete().to(tournament_handler::remove_participant))
            )
            .service(
                web::resource("/tournaments/{id}/fixtures")
                    .route(web::post().to(tournament_handler::generate_fixtures))
            )
            .service(
                web::resource("/tournaments/{id}/recalculate")
                    .route(web::post().to(tournament_handler::recalculate_standings))
            )
            .service(
                web::resource("/tournaments/{id}/reset")
                    .route(web::post().to(tournament_handler::reset_standings))
            )
            .service(
                web::resource("/tournaments/{id}/stats")
                    .route(web::get().to(tournament_handler::get_tournament_totals))
            )

            // Participation routes
            .service(
                web::resource("/participations")
                    .route(web::get().to(participation_handler::get_participations))
            )
            .service(
                web::resource("/participations/recalculate")
                    .route(web::post().to(participation_handler::recalculate_participations))
            )
            .service(
                web::resource("/participations/reset")
                    .route(web::post().to(participation_handler::reset_participations))
            )

            // Match management routes
            .service(
                web::resource("/matches")
                    .route(web::get().to(match_handler::get_matches))
                    .route(web::post().to(match_handler::create_match))
            )
            .service(
                web::resource("/matches/status")
                    .route(web::post().to(match_handler::set_matches_status))
            )
            .service(
                web::resource("/matches/{id}")
                    .route(web::patch().to(match_handler::update_match))
                    .route(web::delete().to(match_handler::delete_match))
            )

            // Seed route
            .service(
                web::resource("/seed")
                    .route(web::post().to(seed_handler::seed_league_data))
            )
    );
}
