use chrono::{DateTime, Utc};
use url::form_urlencoded;

#[derive(Debug, Clone)]
pub struct ShareDetails {
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub confirmed_count: usize,
}

/// Human-readable invitation text for messaging apps.
pub fn whatsapp_message(details: &ShareDetails) -> String {
    let mut message = format!(
        "You're invited: {}\nWhen: {}",
        details.title,
        details.starts_at.format("%a %e %b %Y, %H:%M UTC")
    );

    if let Some(location) = &details.location {
        message.push_str(&format!("\nWhere: {}", location));
    }

    match details.confirmed_count {
        0 => {}
        1 => message.push_str("\n1 friend is already in."),
        n => message.push_str(&format!("\n{} friends are already in.", n)),
    }

    message
}

/// Prefilled wa.me share link for the given message.
pub fn whatsapp_link(message: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(message.as_bytes()).collect();
    format!("https://wa.me/?text={}", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn details() -> ShareDetails {
        ShareDetails {
            title: "Board game night".to_string(),
            starts_at: Utc.with_ymd_and_hms(2026, 9, 12, 18, 0, 0).unwrap(),
            location: Some("Cafe Brecht".to_string()),
            confirmed_count: 3,
        }
    }

    #[test]
    fn message_includes_title_time_location_and_count() {
        let message = whatsapp_message(&details());

        assert!(message.contains("You're invited: Board game night"));
        assert!(message.contains("Sat 12 Sep 2026, 18:00 UTC"));
        assert!(message.contains("Where: Cafe Brecht"));
        assert!(message.contains("3 friends are already in."));
    }

    #[test]
    fn message_skips_absent_location_and_zero_count() {
        let mut bare = details();
        bare.location = None;
        bare.confirmed_count = 0;
        let message = whatsapp_message(&bare);

        assert!(!message.contains("Where:"));
        assert!(!message.contains("already in"));
    }

    #[test]
    fn singular_count_reads_naturally() {
        let mut one = details();
        one.confirmed_count = 1;
        assert!(whatsapp_message(&one).contains("1 friend is already in."));
    }

    #[test]
    fn link_percent_encodes_the_message() {
        let link = whatsapp_link("Game night at 18:00?");

        assert!(link.starts_with("https://wa.me/?text="));
        assert!(!link.contains(' '));
        assert!(link.contains("Game+night") || link.contains("Game%20night"));
    }
}
