//! Revision sampling.
//!
//! Keeps the first commit, then every commit dated at least `months`
//! calendar months after the last kept one.

use chrono::{DateTime, FixedOffset, Months};

use crate::analyzer::history::git::Commit;

/// Default spacing between sampled revisions.
pub const DEFAULT_MONTHS_RANGE: u32 = 6;

/// `date` shifted by whole calendar months, clamped to the month's end.
pub fn add_months(date: DateTime<FixedOffset>, months: u32) -> Option<DateTime<FixedOffset>> {
    date.checked_add_months(Months::new(months))
}

/// Sample chronologically ordered commits.
pub fn sample_revisions(commits: &[Commit], months: u32) -> Vec<Commit> {
    let mut selected: Vec<Commit> = Vec::new();

    for commit in commits {
        let keep = match selected.last() {
            None => true,
            Some(last) => match add_months(last.date, months) {
                Some(next) => commit.date >= next,
                None => false,
            },
        };
        if keep {
            selected.push(commit.clone());
        }
    }

    selected
}
