pub mod error;
pub mod fixtures;
pub mod form;
pub mod league;
pub mod ranking;
pub mod seed;
pub mod standings;
pub mod validation;

pub use error::LeagueError;
