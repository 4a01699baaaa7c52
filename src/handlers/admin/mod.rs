pub mod club_handler;
pub mod match_handler;
pub mod participation_handler;
pub mod seed_handler;
pub mod tournament_handler;
