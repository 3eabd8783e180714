//! Property tests for the age breakdown, next-birthday projection and history cap.

use age_engine::{
    compute_age_at, days_in_month, is_leap_year, next_birthday_info, AgeError, DisplayFormat,
    HistoryEntry, HistoryStore, MemoryStorage, HISTORY_LIMIT,
};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

const MAX_AGE_SECONDS: i64 = 120 * 366 * 86_400;

fn birth_instant() -> impl Strategy<Value = NaiveDateTime> {
    (1900i32..2100, 1u32..=12, 1u32..=31, 0u32..24, 0u32..60).prop_map(|(y, m, d, h, mi)| {
        let d = d.min(days_in_month(y, m));
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    })
}

fn birth_and_now() -> impl Strategy<Value = (NaiveDateTime, NaiveDateTime)> {
    (birth_instant(), 0i64..MAX_AGE_SECONDS, 0i64..1000).prop_map(|(birth, secs, ms)| {
        let now = birth + Duration::seconds(secs) + Duration::milliseconds(ms);
        (birth, now)
    })
}

fn inputs(birth: NaiveDateTime) -> (String, String) {
    (
        birth.format("%Y-%m-%d").to_string(),
        birth.format("%H:%M").to_string(),
    )
}

proptest! {
    #[test]
    fn past_births_always_compute((birth, now) in birth_and_now()) {
        let (dob, tob) = inputs(birth);
        let age = compute_age_at(&dob, Some(&tob), now, &DisplayFormat::default());
        prop_assert!(age.is_ok(), "{dob} {tob} @ {now}: {age:?}");
        prop_assert_eq!(age.unwrap().birth, birth);
    }

    #[test]
    fn total_months_match_breakdown((birth, now) in birth_and_now()) {
        let (dob, tob) = inputs(birth);
        let age = compute_age_at(&dob, Some(&tob), now, &DisplayFormat::default()).unwrap();
        prop_assert_eq!(i64::from(age.years) * 12 + i64::from(age.months), age.totals.months);
        prop_assert!(age.years >= 0);
        prop_assert!(age.months < 12);
        prop_assert!((-2..=30).contains(&age.days), "days = {}", age.days);
    }

    #[test]
    fn totals_are_nested((birth, now) in birth_and_now()) {
        let (dob, tob) = inputs(birth);
        let t = compute_age_at(&dob, Some(&tob), now, &DisplayFormat::default())
            .unwrap()
            .totals;
        prop_assert!(t.weeks * 7 <= t.days && t.days < (t.weeks + 1) * 7);
        prop_assert!(t.days * 24 <= t.hours && t.hours < (t.days + 1) * 24);
        prop_assert!(t.hours * 60 <= t.minutes && t.minutes < (t.hours + 1) * 60);
        prop_assert!(t.minutes * 60 <= t.seconds && t.seconds < (t.minutes + 1) * 60);
    }

    #[test]
    fn sub_day_remainder_in_range((birth, now) in birth_and_now()) {
        let (dob, tob) = inputs(birth);
        let age = compute_age_at(&dob, Some(&tob), now, &DisplayFormat::default()).unwrap();
        prop_assert!(age.hours < 24 && age.minutes < 60 && age.seconds < 60);
        prop_assert_eq!(
            i64::from(age.hours) * 3600 + i64::from(age.minutes) * 60 + i64::from(age.seconds),
            age.totals.seconds % 86_400
        );
    }

    #[test]
    fn next_birthday_is_within_a_year((birth, now) in birth_and_now()) {
        let info = next_birthday_info(birth, now, &DisplayFormat::default()).unwrap();
        prop_assert!(info.at > now);
        prop_assert!(info.at - now <= Duration::days(366));
        prop_assert_eq!(info.at.time(), birth.time());

        let leap_day = birth.month() == 2 && birth.day() == 29;
        if leap_day && !is_leap_year(info.at.year()) {
            prop_assert_eq!((info.at.month(), info.at.day()), (2, 28));
        } else {
            prop_assert_eq!((info.at.month(), info.at.day()), (birth.month(), birth.day()));
        }

        let (d, h, m, s) = (info.days, info.hours, info.minutes, info.seconds);
        prop_assert_eq!(info.countdown, format!("{d}d {h}h {m}m {s}s"));
    }

    #[test]
    fn births_after_now_are_rejected(birth in birth_instant(), ahead in 60i64..MAX_AGE_SECONDS) {
        let (dob, tob) = inputs(birth);
        let now = birth - Duration::seconds(ahead);
        let err = compute_age_at(&dob, Some(&tob), now, &DisplayFormat::default()).unwrap_err();
        prop_assert_eq!(err, AgeError::FutureDate);
    }

    #[test]
    fn history_keeps_newest_ten(count in 1usize..30) {
        let store = HistoryStore::new(MemoryStorage::new());
        for n in 0..count {
            store.append(HistoryEntry::new("2000-01-01", "", format!("#{n}"), n as i64));
        }
        let log = store.read();
        prop_assert_eq!(log.len(), count.min(HISTORY_LIMIT));
        prop_assert_eq!(log[0].ts, count as i64 - 1);
        prop_assert!(log.windows(2).all(|w| w[0].ts > w[1].ts));
    }
}

#[test]
fn leap_birthday_never_lands_on_feb_29_in_2025() {
    let birth = NaiveDate::from_ymd_opt(2000, 2, 29)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    for (month, day) in [(1, 1), (2, 27), (3, 1), (12, 31)] {
        let now = NaiveDate::from_ymd_opt(2025, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let info = next_birthday_info(birth, now, &DisplayFormat::default()).unwrap();
        let expected = if month <= 2 { "28/02/2025" } else { "28/02/2026" };
        assert_eq!(info.date, expected, "now = {now}");
    }
}
