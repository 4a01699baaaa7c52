pub mod auth;
pub mod club;
pub mod common;
pub mod matches;
pub mod tournament;
