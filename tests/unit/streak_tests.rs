/// Streak engine scenarios over full journal snapshots
use soulboost_core::*;
use chrono::{Duration, NaiveDate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn complete(date: NaiveDate) -> DailyEntry {
    let mut entry = DailyEntry::new(date);
    entry.merge(
        EntryUpdate::new()
            .gratitudes(["family".into(), "health".into(), "home".into(), "music".into()])
            .goal("Call a friend")
            .wish("Peace of mind"),
    );
    entry
}

fn snapshot(days_ago: impl IntoIterator<Item = i64>) -> JournalSnapshot {
    days_ago
        .into_iter()
        .map(|n| {
            let date = today() - Duration::days(n);
            (date, complete(date))
        })
        .collect()
}

#[cfg(test)]
mod streak_scenarios {
    use super::*;

    #[test]
    fn test_full_week() {
        let info = StreakInfo::calculate(&snapshot(0..=6), today());
        assert_eq!(info.current_streak, 7);
        assert!(info.is_today_complete);
        assert!(!info.is_streak_at_risk);
        assert_eq!(info.last_completed_date, Some(today()));
    }

    #[test]
    fn test_at_risk() {
        let info = StreakInfo::calculate(&snapshot(1..=3), today());
        assert_eq!(info.current_streak, 3);
        assert!(!info.is_today_complete);
        assert!(info.is_streak_at_risk);
        assert_eq!(info.last_completed_date, Some(today() - Duration::days(1)));
    }

    #[test]
    fn test_partial_today_does_not_break_streak() {
        let mut journal = snapshot(1..=3);
        let mut started = DailyEntry::new(today());
        started.merge(EntryUpdate::new().goal("Started"));
        journal.insert(today(), started);

        let info = StreakInfo::calculate(&journal, today());
        assert_eq!(info.current_streak, 3);
        assert!(info.is_streak_at_risk);
    }

    #[test]
    fn test_broken_streak_ignores_older_history() {
        let mut journal = snapshot((0..=1).chain(3..=30));
        let broken = today() - Duration::days(2);
        let mut incomplete = complete(broken);
        incomplete.gratitudes[1] = String::new();
        journal.insert(broken, incomplete);

        let info = StreakInfo::calculate(&journal, today());
        assert_eq!(info.current_streak, 2);
        assert!(info.is_today_complete);
    }

    #[test]
    fn test_cap_on_long_history() {
        let info = StreakInfo::calculate(&snapshot(0..400), today());
        assert_eq!(info.current_streak, 365);
    }

    #[test]
    fn test_missing_yesterday_resets() {
        let info = StreakInfo::calculate(&snapshot(2..=9), today());
        assert_eq!(info.current_streak, 0);
        assert!(!info.is_streak_at_risk);
        assert_eq!(info.last_completed_date, None);
        assert!(info.message().starts_with("Start your streak"));
    }
}
