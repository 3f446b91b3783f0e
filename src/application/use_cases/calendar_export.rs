use chrono::{DateTime, Utc};
use url::Url;

/// Everything the exporters need about one scheduled event. Assembled by
/// the HTTP layer from the instance, its activity, and its location.
#[derive(Debug, Clone)]
pub struct EventDetails {
    pub uid: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// RFC 5545 basic UTC format, e.g. 20260912T180000Z.
fn format_utc(value: &DateTime<Utc>) -> String {
    value.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escapes a TEXT property value: backslash first, then semicolon, comma
/// and literal newlines.
fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\r', "")
        .replace('\n', "\\n")
}

/// Folds one content line at 75 octets, continuation lines prefixed with a
/// single space (RFC 5545 section 3.1). Splits on char boundaries only.
fn fold_line(line: &str) -> String {
    const LIMIT: usize = 75;

    if line.len() <= LIMIT {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / LIMIT * 3);
    let mut budget = LIMIT;
    let mut used = 0;

    for ch in line.chars() {
        let width = ch.len_utf8();
        if used + width > budget {
            folded.push_str("\r\n ");
            used = 0;
            // Continuation lines lose one octet to the leading space.
            budget = LIMIT - 1;
        }
        folded.push(ch);
        used += width;
    }

    folded
}

/// Renders one event as a standalone VCALENDAR document with CRLF line
/// endings. `generated_at` becomes DTSTAMP; callers pass `Utc::now()`.
pub fn to_ics(event: &EventDetails, generated_at: DateTime<Utc>) -> String {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//Gatherly//Gatherly Calendar Export//EN".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}@gatherly", event.uid),
        format!("DTSTAMP:{}", format_utc(&generated_at)),
        format!("DTSTART:{}", format_utc(&event.starts_at)),
        format!("DTEND:{}", format_utc(&event.ends_at)),
        format!("SUMMARY:{}", escape_text(&event.title)),
    ];

    if let Some(description) = &event.description {
        lines.push(format!("DESCRIPTION:{}", escape_text(description)));
    }
    if let Some(location) = &event.location {
        lines.push(format!("LOCATION:{}", escape_text(location)));
    }

    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    let mut out = String::new();
    for line in lines {
        out.push_str(&fold_line(&line));
        out.push_str("\r\n");
    }
    out
}

/// Builds a prefilled Google Calendar event-creation URL.
pub fn google_calendar_url(event: &EventDetails) -> String {
    let mut url = Url::parse("https://calendar.google.com/calendar/render")
        .expect("static URL is valid");

    let dates = format!(
        "{}/{}",
        format_utc(&event.starts_at),
        format_utc(&event.ends_at)
    );

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("action", "TEMPLATE");
        pairs.append_pair("text", &event.title);
        pairs.append_pair("dates", &dates);
        if let Some(description) = &event.description {
            pairs.append_pair("details", description);
        }
        if let Some(location) = &event.location {
            pairs.append_pair("location", location);
        }
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event() -> EventDetails {
        EventDetails {
            uid: "inst-42".to_string(),
            title: "Picnic; bring snacks, maybe".to_string(),
            description: Some("Meet at the\nnorth gate".to_string()),
            location: Some("Vondelpark".to_string()),
            starts_at: Utc.with_ymd_and_hms(2026, 9, 12, 18, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2026, 9, 12, 20, 30, 0).unwrap(),
        }
    }

    #[test]
    fn ics_has_crlf_terminated_calendar_shell() {
        let stamp = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();
        let ics = to_ics(&event(), stamp);

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(ics.contains("UID:inst-42@gatherly\r\n"));
        assert!(ics.contains("DTSTAMP:20260901T120000Z\r\n"));
        assert!(ics.contains("DTSTART:20260912T180000Z\r\n"));
        assert!(ics.contains("DTEND:20260912T203000Z\r\n"));
    }

    #[test]
    fn ics_escapes_text_properties() {
        let stamp = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();
        let ics = to_ics(&event(), stamp);

        assert!(ics.contains("SUMMARY:Picnic\\; bring snacks\\, maybe"));
        assert!(ics.contains("DESCRIPTION:Meet at the\\nnorth gate"));
    }

    #[test]
    fn long_lines_fold_at_75_octets() {
        let long = "x".repeat(300);
        let folded = fold_line(&format!("DESCRIPTION:{}", long));

        for segment in folded.split("\r\n") {
            assert!(segment.len() <= 75, "segment too long: {}", segment.len());
        }
        // Unfolding (strip CRLF + space) restores the original line.
        assert_eq!(folded.replace("\r\n ", ""), format!("DESCRIPTION:{}", long));
    }

    #[test]
    fn fold_respects_multibyte_boundaries() {
        let line = "SUMMARY:".to_string() + &"é".repeat(100);
        let folded = fold_line(&line);
        for segment in folded.split("\r\n") {
            assert!(segment.len() <= 75);
        }
        assert_eq!(folded.replace("\r\n ", ""), line);
    }

    #[test]
    fn google_url_carries_template_fields() {
        let url = google_calendar_url(&event());

        assert!(url.starts_with("https://calendar.google.com/calendar/render?"));
        assert!(url.contains("action=TEMPLATE"));
        assert!(url.contains("dates=20260912T180000Z%2F20260912T203000Z"));
        assert!(url.contains("location=Vondelpark"));
    }

    #[test]
    fn google_url_omits_absent_optionals() {
        let mut bare = event();
        bare.description = None;
        bare.location = None;
        let url = google_calendar_url(&bare);

        assert!(!url.contains("details="));
        assert!(!url.contains("location="));
    }
}
