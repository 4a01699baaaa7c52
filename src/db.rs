pub mod admin_queries;
pub mod club_queries;
pub mod helpers;
pub mod match_queries;
pub mod store;
pub mod tournament_queries;
