use chrono::{DateTime, Duration, FixedOffset, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// Recurring coverage buckets. Every wall-clock instant falls into exactly one
/// of the three; B wraps midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
pub enum ShiftKey {
    A,
    B,
    C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftWindow {
    pub key: ShiftKey,
    pub label: &'static str,
    pub start_hour: u32,
    pub end_hour: u32,
}

pub const SHIFT_WINDOWS: [ShiftWindow; 3] = [
    ShiftWindow {
        key: ShiftKey::A,
        label: "Shift A (09:00-18:00)",
        start_hour: 9,
        end_hour: 18,
    },
    ShiftWindow {
        key: ShiftKey::B,
        label: "Shift B (18:00-02:00)",
        start_hour: 18,
        end_hour: 2,
    },
    ShiftWindow {
        key: ShiftKey::C,
        label: "Shift C (02:00-09:00)",
        start_hour: 2,
        end_hour: 9,
    },
];

/// A shift bucket resolved into concrete absolute instants, half-open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftRange {
    pub key: ShiftKey,
    pub label: &'static str,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Wall-clock anchor for shift bucketing. The marketplace runs nationwide
/// shifts against a single zone; keeping the anchor injected lets tests
/// exercise the bucketing from any zone without touching the window table.
#[derive(Debug, Clone, Copy)]
pub struct ShiftClock {
    pub zone_name: &'static str,
    offset: FixedOffset,
}

impl ShiftClock {
    pub fn new(zone_name: &'static str, offset: FixedOffset) -> Self {
        Self { zone_name, offset }
    }

    /// India Standard Time, the production anchor. IST has no DST, so a fixed
    /// offset is exact year-round.
    pub fn ist() -> Self {
        let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("IST offset is in range");
        Self::new("Asia/Kolkata", offset)
    }

    /// The bucket covering `now`, by anchor-local hour of day.
    pub fn current_window(&self, now: DateTime<Utc>) -> ShiftWindow {
        let hour = now.with_timezone(&self.offset).hour();

        if (9..18).contains(&hour) {
            SHIFT_WINDOWS[0]
        } else if hour >= 18 || hour < 2 {
            SHIFT_WINDOWS[1]
        } else {
            SHIFT_WINDOWS[2]
        }
    }

    /// Resolve the current bucket into an absolute `[start, end)` pair.
    ///
    /// For the overnight bucket the two sides anchor to different calendar
    /// days: before midnight the end rolls to tomorrow, after midnight the
    /// start rolls back to yesterday. Either way the caller sees one
    /// consistent, non-inverted range for the whole shift.
    pub fn resolve_range(&self, now: DateTime<Utc>) -> ShiftRange {
        let window = self.current_window(now);
        let local = now.with_timezone(&self.offset);
        let today = local.date_naive();

        let mut start_day = today;
        let mut end_day = today;
        if window.end_hour <= window.start_hour {
            if local.hour() >= window.start_hour {
                end_day = today + Duration::days(1);
            } else {
                start_day = today - Duration::days(1);
            }
        }

        ShiftRange {
            key: window.key,
            label: window.label,
            start: self.local_instant(start_day, window.start_hour),
            end: self.local_instant(end_day, window.end_hour),
        }
    }

    fn local_instant(&self, day: chrono::NaiveDate, hour: u32) -> DateTime<Utc> {
        // Window hours come from the const table above, so this cannot fail.
        let naive_local = day.and_hms_opt(hour, 0, 0).expect("shift hour is a valid hour of day");
        let naive_utc = naive_local - Duration::seconds(self.offset.local_minus_utc() as i64);
        Utc.from_utc_datetime(&naive_utc)
    }
}

impl Default for ShiftClock {
    fn default() -> Self {
        Self::ist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ist(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        // Build an instant from IST wall-clock components.
        let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        offset
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn buckets_cover_the_whole_day() {
        let clock = ShiftClock::ist();

        assert_eq!(clock.current_window(ist(2026, 3, 10, 9, 0)).key, ShiftKey::A);
        assert_eq!(clock.current_window(ist(2026, 3, 10, 17, 59)).key, ShiftKey::A);
        assert_eq!(clock.current_window(ist(2026, 3, 10, 18, 0)).key, ShiftKey::B);
        assert_eq!(clock.current_window(ist(2026, 3, 10, 23, 30)).key, ShiftKey::B);
        assert_eq!(clock.current_window(ist(2026, 3, 10, 0, 30)).key, ShiftKey::B);
        assert_eq!(clock.current_window(ist(2026, 3, 10, 1, 59)).key, ShiftKey::B);
        assert_eq!(clock.current_window(ist(2026, 3, 10, 2, 0)).key, ShiftKey::C);
        assert_eq!(clock.current_window(ist(2026, 3, 10, 8, 59)).key, ShiftKey::C);
    }

    #[test]
    fn daytime_range_resolves_within_one_day() {
        let clock = ShiftClock::ist();

        let range = clock.resolve_range(ist(2026, 3, 10, 11, 0));

        assert_eq!(range.key, ShiftKey::A);
        assert_eq!(range.start, ist(2026, 3, 10, 9, 0));
        assert_eq!(range.end, ist(2026, 3, 10, 18, 0));
        assert_eq!(range.end - range.start, Duration::hours(9));
    }

    #[test]
    fn overnight_range_before_midnight_ends_tomorrow() {
        let clock = ShiftClock::ist();

        let range = clock.resolve_range(ist(2026, 3, 10, 23, 0));

        assert_eq!(range.key, ShiftKey::B);
        assert_eq!(range.start, ist(2026, 3, 10, 18, 0));
        assert_eq!(range.end, ist(2026, 3, 11, 2, 0));
        assert_eq!(range.end - range.start, Duration::hours(8));
    }

    #[test]
    fn overnight_range_after_midnight_started_yesterday() {
        let clock = ShiftClock::ist();

        let range = clock.resolve_range(ist(2026, 3, 11, 1, 0));

        assert_eq!(range.key, ShiftKey::B);
        assert_eq!(range.start, ist(2026, 3, 10, 18, 0));
        assert_eq!(range.end, ist(2026, 3, 11, 2, 0));
        assert_eq!(range.end - range.start, Duration::hours(8));
    }

    #[test]
    fn both_sides_of_midnight_agree_on_the_same_shift() {
        let clock = ShiftClock::ist();

        let before = clock.resolve_range(ist(2026, 3, 10, 23, 0));
        let after = clock.resolve_range(ist(2026, 3, 11, 1, 0));

        assert_eq!(before, after);
    }

    #[test]
    fn anchor_zone_is_injectable() {
        let utc_clock = ShiftClock::new("Etc/UTC", FixedOffset::east_opt(0).unwrap());
        let noon_utc = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();

        // 12:00 UTC is 17:30 IST (still shift A) but noon under a UTC anchor too.
        assert_eq!(utc_clock.current_window(noon_utc).key, ShiftKey::A);
        // 20:00 UTC is 01:30 IST next day: shift B under IST, B under UTC as well,
        // but anchored to different calendar days.
        let evening = Utc.with_ymd_and_hms(2026, 3, 10, 20, 0, 0).unwrap();
        let utc_range = utc_clock.resolve_range(evening);
        let ist_range = ShiftClock::ist().resolve_range(evening);
        assert_eq!(utc_range.key, ShiftKey::B);
        assert_eq!(ist_range.key, ShiftKey::B);
        assert_ne!(utc_range.start, ist_range.start);
    }
}
