//! Leaderboard message and command replies.
//!
//! The leaderboard renders as a titled table with medal places, profile links
//! and a timestamp, followed by its evidence attachments split into batches
//! small enough for a single chat message each.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use rankboard_capture::ProfileLocator;
use rankboard_core::{FormatError, LeaderboardSnapshot, PlayerId};
use rankboard_pipeline::{AddOutcome, RemoveOutcome};

pub const TITLE: &str = "Leaderboard TFT";
pub const DESCRIPTION: &str = "use add <id#TAG> to add your ID to the leaderboard";

/// Most files a chat message may carry.
pub const ATTACHMENTS_PER_MESSAGE: usize = 9;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Place label for the 1-based `place`.
pub fn place_label(place: usize) -> String {
    match place {
        1..=3 => MEDALS[place - 1].to_string(),
        _ => place.to_string(),
    }
}

/// `[id](url)`, or the bare id if no URL can be built.
fn linked(locator: &ProfileLocator, player: &PlayerId) -> String {
    match locator.profile_url(player) {
        Ok(url) => format!("[{player}]({url})"),
        Err(_) => player.to_string(),
    }
}

/// The leaderboard message for one snapshot.
pub struct Leaderboard<'a> {
    pub snapshot: &'a LeaderboardSnapshot,
    pub locator: &'a ProfileLocator,
    pub at: DateTime<Utc>,
}

impl fmt::Display for Leaderboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**{TITLE}**")?;
        writeln!(f, "{DESCRIPTION}")?;
        writeln!(f)?;

        if self.snapshot.is_empty() {
            writeln!(f, "No ranked players yet.")?;
        } else {
            writeln!(f, "{:<4} {:<40} {}", "#", "ID / Name", "Rank")?;
            for (i, entry) in self.snapshot.entries().iter().enumerate() {
                writeln!(
                    f,
                    "{:<4} {:<40} {}",
                    place_label(i + 1),
                    linked(self.locator, &entry.player),
                    entry.rank
                )?;
            }
        }

        if !self.snapshot.failed().is_empty() {
            writeln!(f)?;
            writeln!(f, "Could not refresh:")?;
            for failed in self.snapshot.failed() {
                writeln!(f, "  {} ({})", failed.player, failed.reason)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", self.at.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}

pub fn render_leaderboard(
    snapshot: &LeaderboardSnapshot,
    locator: &ProfileLocator,
    at: DateTime<Utc>,
) -> String {
    Leaderboard {
        snapshot,
        locator,
        at,
    }
    .to_string()
}

/// One `id<TAB>url` line per tracked id, in stored order.
pub fn render_id_list(ids: &[PlayerId], locator: &ProfileLocator) -> String {
    if ids.is_empty() {
        return "No tracked players.\n".into();
    }
    ids.iter()
        .map(|id| match locator.profile_url(id) {
            Ok(url) => format!("{id}\t{url}\n"),
            Err(_) => format!("{id}\n"),
        })
        .collect()
}

/// Evidence files grouped per message, in leaderboard order.
pub fn attachment_batches(snapshot: &LeaderboardSnapshot) -> Vec<Vec<&Path>> {
    snapshot
        .chunks(ATTACHMENTS_PER_MESSAGE)
        .map(|chunk| chunk.iter().map(|e| e.evidence.as_path()).collect())
        .collect()
}

fn invalid_message(e: &FormatError) -> String {
    match e {
        FormatError::EmptyId | FormatError::IdTooLong { .. } => "Please provide an ID.".into(),
        _ => "Please provide a valid ID. (ID should contain #)".into(),
    }
}

pub fn add_message(outcome: &AddOutcome, locator: &ProfileLocator) -> String {
    match outcome {
        AddOutcome::Added(id) | AddOutcome::AlreadyTracked(id) => {
            format!("ID {id} added successfully! You can now use rank to generate a Leaderboard")
        }
        AddOutcome::Invalid(e) => invalid_message(e),
        AddOutcome::NotFound(id) => {
            let url = locator
                .profile_url(id)
                .map(|u| u.to_string())
                .unwrap_or_default();
            format!("Player not found. Please provide a valid ID. check {url}")
        }
    }
}

pub fn remove_message(outcome: &RemoveOutcome) -> String {
    match outcome {
        RemoveOutcome::Removed(id) => format!("ID {id} removed from the leaderboard"),
        RemoveOutcome::NotTracked(id) => format!("ID {id} is not on the leaderboard"),
        RemoveOutcome::Invalid(e) => invalid_message(e),
    }
}
