use actix_web::web;

pub mod admin;
pub mod auth;
pub mod backend_health;
pub mod browse;

use crate::routes::admin::init_admin_routes;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health)
        .service(browse::search)
        .service(browse::club_detail)
        .service(browse::tournament_detail)
        .service(browse::match_detail);

    // Login sits outside the admin scope so it is reachable without a token
    cfg.service(auth::login);

    init_admin_routes(cfg);
}
