//! hnsearch - Hacker News story search for the terminal
//!
//! A small client over the Algolia Hacker News search API. The story list
//! is driven by a reducer-style state machine, the last-used search term
//! is persisted between sessions, and results render in an interactive
//! table with per-row actions (open, copy link, remove).
//!
//! # Example
//!
//! ```no_run
//! use hnsearch::{ClientConfig, SearchClient};
//!
//! fn main() -> hnsearch::Result<()> {
//!     let client = SearchClient::new(ClientConfig::default())?;
//!
//!     let stories = client.search("rust")?;
//!     for story in stories {
//!         println!("{} ({} points)", story.title, story.points);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod prefs;
pub mod story;
pub mod tui;

// Re-export main types
pub use client::{parse_search_response, ClientConfig, SearchClient, API_ENDPOINT};
pub use error::{HnSearchError, Result};
pub use prefs::{
    FilePrefs, MemoryPrefs, PreferenceStore, DEFAULT_SEARCH_TERM, SEARCH_TERM_KEY,
};
pub use story::{StoriesAction, StoriesState, Story};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format a count as a compact human-readable string ("847", "1.2k")
pub fn format_count(n: u64) -> String {
    if n >= 1000 {
        format!("{:.1}k", n as f64 / 1000.0)
    } else {
        n.to_string()
    }
}

/// Format a story's age relative to now ("now", "42m", "3h", "2d", "1y")
pub fn format_age(created_at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    let Some(t) = created_at else {
        return String::new();
    };
    let delta = chrono::Utc::now().signed_duration_since(t);
    if delta.num_minutes() < 1 {
        "now".to_string()
    } else if delta.num_minutes() < 60 {
        format!("{}m", delta.num_minutes())
    } else if delta.num_hours() < 24 {
        format!("{}h", delta.num_hours())
    } else if delta.num_days() < 365 {
        format!("{}d", delta.num_days())
    } else {
        format!("{}y", delta.num_days() / 365)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn format_count_is_compact_above_a_thousand() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(847), "847");
        assert_eq!(format_count(1200), "1.2k");
        assert_eq!(format_count(15500), "15.5k");
    }

    #[test]
    fn format_age_picks_the_coarsest_sensible_unit() {
        assert_eq!(format_age(None), "");
        assert_eq!(format_age(Some(Utc::now())), "now");
        assert_eq!(format_age(Some(Utc::now() - Duration::minutes(5))), "5m");
        assert_eq!(format_age(Some(Utc::now() - Duration::hours(3))), "3h");
        assert_eq!(format_age(Some(Utc::now() - Duration::days(2))), "2d");
        assert_eq!(format_age(Some(Utc::now() - Duration::days(800))), "2y");
    }
}
