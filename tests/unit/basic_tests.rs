/// Basic unit tests for the reading parser and journal types
use soulboost_core::*;
use chrono::NaiveDate;
use std::sync::Arc;

fn page_with_body(body: &str) -> String {
    format!(
        r#"<h1>Title</h1><td align="left">"<i>Quote</i>"</td><td align="center">Basic Text p. 42</td><td align="left">{}<br><br><b>Just for Today: </b>Act well.<br><br></td>"#,
        body
    )
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_pages_without_marker_are_unparseable() {
        let pages = [
            String::new(),
            "<html><body>Nothing useful</body></html>".to_string(),
            page_with_body("Body").replace("Just for Today:", "Just for today -"),
            r#""<i>Quote</i>" Basic Text p. 3 <p>Body without the closing section</p>"#.to_string(),
            r#"<table><tr><td align="left">Paragraph one.<br><br></td></tr></table>"#.to_string(),
        ];

        for page in &pages {
            assert!(MarkerParser.parse(page, date()).is_err(), "parsed: {}", page);
            assert!(TableCellParser.parse(page, date()).is_err(), "legacy parsed: {}", page);
        }
    }

    #[test]
    fn test_short_body_preview_equals_body() {
        let body = "b".repeat(150);
        let reading = MarkerParser.parse(&page_with_body(&body), date()).unwrap();
        assert_eq!(reading.full_content, body);
        assert_eq!(reading.preview, reading.full_content);
    }

    #[test]
    fn test_long_body_preview_is_bounded() {
        let body = "The quick brown fox jumps over the lazy dog. ".repeat(10);
        let reading = MarkerParser.parse(&page_with_body(&body), date()).unwrap();

        let expected: String = reading.full_content.chars().take(150).collect();
        assert_eq!(reading.preview, format!("{}...", expected));
        assert_eq!(reading.preview.chars().count(), 153);
    }

    #[test]
    fn test_reading_is_stamped_with_caller_date() {
        let other = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
        let reading = MarkerParser.parse(&page_with_body("Body"), other).unwrap();
        assert_eq!(reading.date, other);
        assert_eq!(reading.just_for_today, "Act well.");
        assert_eq!(reading.reference, "Basic Text p. 42");
    }

    #[test]
    fn test_whitespace_gratitude_is_incomplete() {
        let mut entry = DailyEntry::new(date());
        entry.merge(
            EntryUpdate::new()
                .gratitudes(["one".into(), "two".into(), "  ".into(), "four".into()])
                .goal("goal")
                .wish("wish"),
        );
        assert!(!entry.is_complete());
        assert_eq!(entry.progress().gratitudes_filled, 3);
    }

    #[test]
    fn test_memory_store_journal_round_trip() {
        tokio_test::block_on(async {
            let journal = JournalStore::new(Arc::new(MemoryStore::new()), StorageKeys::default());
            journal
                .merge_entry(date(), EntryUpdate::new().goal("Read"))
                .await
                .unwrap();

            let history = journal.history().await;
            assert_eq!(history.len(), 1);
            assert_eq!(history[0].goal, "Read");
        });
    }

    #[test]
    fn test_dates_helpers() {
        assert_eq!(dates::parse_iso("2026-10-18").unwrap(), date());
        assert_eq!(dates::to_iso(dates::yesterday(date())), "2026-10-17");
        assert!(matches!(dates::parse_iso("yesterday"), Err(DomainError::InvalidDate(_))));
    }
}
