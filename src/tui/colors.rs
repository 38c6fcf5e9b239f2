//! Palette and small display helpers for the story table.

use ratatui::style::Color;

/// Hacker News orange, used for the title and status strips.
pub const ACCENT_BG: Color = Color::Rgb(255, 102, 0);
/// Foreground on the accent strips.
pub const ACCENT_FG: Color = Color::Rgb(23, 18, 18);

pub const ROW_ALT_BG: Color = Color::Rgb(25, 25, 35);
pub const SELECTED_BG: Color = Color::Rgb(60, 60, 80);

/// Color ramp for story points.
pub fn points_color(points: i64) -> Color {
    if points >= 500 {
        Color::Red
    } else if points >= 100 {
        Color::Yellow
    } else if points >= 10 {
        Color::White
    } else {
        Color::DarkGray
    }
}

/// Dim label for the story's source site, e.g. "blog.rust-lang.org".
/// Self posts (no URL) get none.
pub fn domain_label(story_url: &str) -> Option<String> {
    let parsed = url::Url::parse(story_url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_label_strips_www() {
        assert_eq!(
            domain_label("https://www.example.com/story").as_deref(),
            Some("example.com")
        );
        assert_eq!(
            domain_label("https://blog.rust-lang.org/2015/05/15/Rust-1.0.html").as_deref(),
            Some("blog.rust-lang.org")
        );
    }

    #[test]
    fn domain_label_is_none_for_self_posts() {
        assert_eq!(domain_label(""), None);
        assert_eq!(domain_label("not a url"), None);
    }

    #[test]
    fn points_ramp_is_monotonic_at_the_edges() {
        assert_eq!(points_color(0), Color::DarkGray);
        assert_eq!(points_color(10), Color::White);
        assert_eq!(points_color(100), Color::Yellow);
        assert_eq!(points_color(1000), Color::Red);
    }
}
