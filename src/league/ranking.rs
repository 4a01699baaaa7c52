// Ordering of tournament participants.

use std::cmp::Ordering;

use crate::models::tournament::StandingEntry;

type CmpFunc = fn(&StandingEntry, &StandingEntry) -> Ordering;

fn compare_points(a: &StandingEntry, b: &StandingEntry) -> Ordering {
    b.points.cmp(&a.points)
}

fn compare_goal_difference(a: &StandingEntry, b: &StandingEntry) -> Ordering {
    b.goal_difference.cmp(&a.goal_difference)
}

fn compare_goals_for(a: &StandingEntry, b: &StandingEntry) -> Ordering {
    b.counters.goals_for.cmp(&a.counters.goals_for)
}

fn compare_club_name(a: &StandingEntry, b: &StandingEntry) -> Ordering {
    a.club_name.cmp(&b.club_name)
}

fn compare_club_id(a: &StandingEntry, b: &StandingEntry) -> Ordering {
    a.club_id.cmp(&b.club_id)
}

/// Sporting criteria first, then name and id so that no two entries compare equal
const CRITERIA: [CmpFunc; 5] = [
    compare_points,
    compare_goal_difference,
    compare_goals_for,
    compare_club_name,
    compare_club_id,
];

pub fn compare_standings(a: &StandingEntry, b: &StandingEntry) -> Ordering {
    CRITERIA
        .iter()
        .map(|criterion| criterion(a, b))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Sort the table and assign 1-based positions.
pub fn rank_standings(mut entries: Vec<StandingEntry>) -> Vec<StandingEntry> {
    entries.sort_by(compare_standings);
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.position = index as i32 + 1;
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tournament::StatCounters;
    use uuid::Uuid;

    fn entry(name: &str, wins: i32, draws: i32, goals_for: i32, goals_against: i32) -> StandingEntry {
        let counters = StatCounters {
            matches_played: wins + draws,
            wins,
            draws,
            losses: 0,
            goals_for,
            goals_against,
        };
        StandingEntry::new(Uuid::new_v4(), name, counters)
    }

    #[test]
    fn test_points_beat_goal_difference() {
        let ranked = rank_standings(vec![entry("Big GD", 1, 0, 9, 0), entry("More points", 1, 1, 2, 1)]);
        assert_eq!(ranked[0].club_name, "More points");
        assert_eq!(ranked[0].position, 1);
        assert_eq!(ranked[1].position, 2);
    }

    #[test]
    fn test_goals_for_breaks_equal_goal_difference() {
        let ranked = rank_standings(vec![entry("Low", 1, 0, 2, 1), entry("High", 1, 0, 4, 3)]);
        assert_eq!(ranked[0].club_name, "High");
    }

    #[test]
    fn test_identical_records_fall_back_to_name() {
        let ranked = rank_standings(vec![entry("Zeta", 0, 1, 1, 1), entry("Alpha", 0, 1, 1, 1)]);
        assert_eq!(ranked[0].club_name, "Alpha");
        assert_ne!(compare_standings(&ranked[0], &ranked[1]), Ordering::Equal);
    }
}
