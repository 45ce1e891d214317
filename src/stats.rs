use crate::models::{
    AnalyticsResponse, ClickEvent, ClickSummary, CumulativePoint, LabelCount, MinuteBucket,
};
use crate::session::AUTO_CLICKER_LABEL;
use chrono::{Local, TimeZone, Timelike};
use std::{collections::HashMap, fmt};

const DENSE_SERIES_THRESHOLD: usize = 50;
const DENSE_SERIES_TICKS: usize = 20;

pub fn build_analytics(log: &[ClickEvent]) -> AnalyticsResponse {
    assemble(log, compute_minute_buckets(log))
}

pub fn build_analytics_in<Tz>(log: &[ClickEvent], tz: &Tz) -> AnalyticsResponse
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    assemble(log, compute_minute_buckets_in(log, tz))
}

fn assemble(log: &[ClickEvent], minute_buckets: Vec<MinuteBucket>) -> AnalyticsResponse {
    AnalyticsResponse {
        label_frequency: compute_label_frequency(log),
        minute_buckets,
        cumulative_series: compute_cumulative_series(log),
        summary: summarize(log),
        tick_stride: axis_tick_stride(log.len()),
    }
}

/// Counts events per label, in order of each label's first appearance.
pub fn compute_label_frequency(log: &[ClickEvent]) -> Vec<LabelCount> {
    let mut counts: Vec<LabelCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for event in log {
        match index.get(event.label.as_str()) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                index.insert(event.label.as_str(), counts.len());
                counts.push(LabelCount {
                    label: event.label.clone(),
                    count: 1,
                });
            }
        }
    }

    counts
}

pub fn compute_minute_buckets(log: &[ClickEvent]) -> Vec<MinuteBucket> {
    compute_minute_buckets_in(log, &Local)
}

/// Groups events by wall-clock minute in `tz`.
///
/// Buckets are keyed by `HH:MM`, so minutes a whole number of days apart share
/// a bucket. Each bucket lists every label seen anywhere in the log, zero
/// when absent from that minute. Output is ordered by the bucket's start
/// timestamp rather than by key, which keeps `23:59` ahead of `00:00`.
pub fn compute_minute_buckets_in<Tz>(log: &[ClickEvent], tz: &Tz) -> Vec<MinuteBucket>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let labels: Vec<String> = compute_label_frequency(log)
        .into_iter()
        .map(|entry| entry.label)
        .collect();

    let mut buckets: Vec<MinuteBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for event in log {
        let Some((minute, start_ms)) = minute_of(event.occurred_at, tz) else {
            continue;
        };

        let idx = match index.get(&minute) {
            Some(&idx) => idx,
            None => {
                buckets.push(MinuteBucket {
                    minute: minute.clone(),
                    start_ms,
                    counts: labels
                        .iter()
                        .map(|label| LabelCount {
                            label: label.clone(),
                            count: 0,
                        })
                        .collect(),
                });
                index.insert(minute, buckets.len() - 1);
                buckets.len() - 1
            }
        };

        let bucket = &mut buckets[idx];
        bucket.start_ms = bucket.start_ms.min(start_ms);
        if let Some(entry) = bucket.counts.iter_mut().find(|c| c.label == event.label) {
            entry.count += 1;
        }
    }

    buckets.sort_by_key(|bucket| bucket.start_ms);
    buckets
}

pub fn compute_cumulative_series(log: &[ClickEvent]) -> Vec<CumulativePoint> {
    log.iter()
        .zip(1u64..)
        .map(|(event, total)| CumulativePoint {
            sequence_index: event.sequence_index,
            occurred_at: event.occurred_at,
            cumulative_total: total,
            label: event.label.clone(),
        })
        .collect()
}

pub fn summarize(log: &[ClickEvent]) -> ClickSummary {
    let total = log.len() as u64;
    let auto = log
        .iter()
        .filter(|event| event.label == AUTO_CLICKER_LABEL)
        .count() as u64;
    let auto_click_percent = if total == 0 {
        0.0
    } else {
        (auto as f64 / total as f64 * 1000.0).round() / 10.0
    };

    ClickSummary {
        total_clicks: total,
        distinct_labels: compute_label_frequency(log).len() as u64,
        auto_click_percent,
    }
}

/// How many points apart labelled x-axis ticks sit on the cumulative chart.
pub fn axis_tick_stride(len: usize) -> usize {
    if len <= DENSE_SERIES_THRESHOLD {
        1
    } else {
        len.div_ceil(DENSE_SERIES_TICKS)
    }
}

fn minute_of<Tz>(occurred_at: i64, tz: &Tz) -> Option<(String, i64)>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let local = tz.timestamp_millis_opt(occurred_at).single()?;
    // Truncate the instant itself; local wall times inside a DST fold are ambiguous.
    let start_ms = occurred_at
        - i64::from(local.second()) * 1000
        - i64::from(local.timestamp_subsec_millis());
    Some((local.format("%H:%M").to_string(), start_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveDateTime};

    fn event(sequence_index: u64, occurred_at: i64, label: &str) -> ClickEvent {
        ClickEvent {
            occurred_at,
            sequence_index,
            label: label.to_string(),
        }
    }

    fn log_of(entries: &[(i64, &str)]) -> Vec<ClickEvent> {
        entries
            .iter()
            .zip(1u64..)
            .map(|((at, label), idx)| event(idx, *at, label))
            .collect()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn ms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> i64 {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    #[test]
    fn label_frequency_keeps_first_seen_order() {
        let log = log_of(&[(0, "Default"), (0, "Secondary"), (0, "Default")]);
        let freq = compute_label_frequency(&log);
        assert_eq!(
            freq,
            vec![
                LabelCount { label: "Default".into(), count: 2 },
                LabelCount { label: "Secondary".into(), count: 1 },
            ]
        );

        let totals: Vec<u64> = compute_cumulative_series(&log)
            .iter()
            .map(|point| point.cumulative_total)
            .collect();
        assert_eq!(totals, vec![1, 2, 3]);
    }

    #[test]
    fn empty_log_yields_empty_views() {
        let analytics = build_analytics_in(&[], &utc());
        assert!(analytics.label_frequency.is_empty());
        assert!(analytics.minute_buckets.is_empty());
        assert!(analytics.cumulative_series.is_empty());
        assert_eq!(analytics.summary.total_clicks, 0);
        assert_eq!(analytics.summary.auto_click_percent, 0.0);
        assert_eq!(analytics.tick_stride, 1);
    }

    #[test]
    fn frequency_sums_to_log_length() {
        let log = log_of(&[
            (0, "Ghost"),
            (5, "Link"),
            (9, "Ghost"),
            (12, "Auto Clicker"),
            (40, "Large"),
        ]);
        let sum: u64 = compute_label_frequency(&log).iter().map(|c| c.count).sum();
        assert_eq!(sum, log.len() as u64);
    }

    #[test]
    fn appending_bumps_exactly_one_label() {
        let mut log = log_of(&[(0, "Default"), (1, "Outline"), (2, "Default")]);
        let before = compute_label_frequency(&log);
        log.push(event(4, 3, "Outline"));
        let after = compute_label_frequency(&log);

        assert_eq!(before.len(), after.len());
        for (old, new) in before.iter().zip(after.iter()) {
            assert_eq!(old.label, new.label);
            let expected = if old.label == "Outline" { old.count + 1 } else { old.count };
            assert_eq!(new.count, expected);
        }
    }

    #[test]
    fn cumulative_total_matches_position() {
        let log = log_of(&[(10, "a"), (20, "b"), (20, "a"), (30, "c")]);
        for (i, point) in compute_cumulative_series(&log).iter().enumerate() {
            assert_eq!(point.cumulative_total, i as u64 + 1);
            assert_eq!(point.sequence_index, i as u64 + 1);
        }
    }

    #[test]
    fn minute_buckets_zero_fill_every_label() {
        let log = log_of(&[
            (ms(2026, 3, 1, 10, 15, 5), "Default"),
            (ms(2026, 3, 1, 10, 15, 59), "Default"),
            (ms(2026, 3, 1, 10, 16, 0), "Secondary"),
        ]);
        let buckets = compute_minute_buckets_in(&log, &utc());

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].minute, "10:15");
        assert_eq!(buckets[0].start_ms, ms(2026, 3, 1, 10, 15, 0));
        assert_eq!(
            buckets[0].counts,
            vec![
                LabelCount { label: "Default".into(), count: 2 },
                LabelCount { label: "Secondary".into(), count: 0 },
            ]
        );
        assert_eq!(buckets[1].minute, "10:16");
        assert_eq!(buckets[1].counts[0].count, 0);
        assert_eq!(buckets[1].counts[1].count, 1);
    }

    #[test]
    fn minute_buckets_order_by_timestamp_across_midnight() {
        let log = log_of(&[
            (ms(2026, 3, 1, 23, 59, 30), "Default"),
            (ms(2026, 3, 2, 0, 0, 10), "Ghost"),
        ]);
        let buckets = compute_minute_buckets_in(&log, &utc());
        let keys: Vec<&str> = buckets.iter().map(|b| b.minute.as_str()).collect();
        assert_eq!(keys, vec!["23:59", "00:00"]);
        assert!(buckets.windows(2).all(|w| w[0].start_ms <= w[1].start_ms));
    }

    #[test]
    fn minute_buckets_use_zone_offset() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let log = log_of(&[(ms(2026, 3, 1, 8, 30, 0), "Default")]);
        let buckets = compute_minute_buckets_in(&log, &plus_two);
        assert_eq!(buckets[0].minute, "10:30");
        assert_eq!(buckets[0].start_ms, ms(2026, 3, 1, 8, 30, 0));
    }

    #[test]
    fn same_clock_minute_on_different_days_merges() {
        let log = log_of(&[
            (ms(2026, 3, 1, 9, 0, 0), "Default"),
            (ms(2026, 3, 1, 9, 1, 0), "Default"),
            (ms(2026, 3, 2, 9, 0, 30), "Link"),
        ]);
        let buckets = compute_minute_buckets_in(&log, &utc());

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].minute, "09:00");
        assert_eq!(buckets[0].start_ms, ms(2026, 3, 1, 9, 0, 0));
        let total: u64 = buckets[0].counts.iter().map(|c| c.count).sum();
        assert_eq!(total, 2);
        for bucket in &buckets {
            let labels: Vec<&str> = bucket.counts.iter().map(|c| c.label.as_str()).collect();
            assert_eq!(labels, vec!["Default", "Link"]);
        }
    }

    #[test]
    fn summary_reports_auto_share() {
        let log = log_of(&[
            (0, "Auto Clicker"),
            (1, "Default"),
            (2, "Auto Clicker"),
        ]);
        let summary = summarize(&log);
        assert_eq!(summary.total_clicks, 3);
        assert_eq!(summary.distinct_labels, 2);
        assert_eq!(summary.auto_click_percent, 66.7);
    }

    #[test]
    fn tick_stride_thins_long_series() {
        assert_eq!(axis_tick_stride(0), 1);
        assert_eq!(axis_tick_stride(50), 1);
        assert_eq!(axis_tick_stride(51), 3);
        assert_eq!(axis_tick_stride(200), 10);
    }

    /// UTC-4 until the fall-back instant, UTC-5 after it, so the local hour
    /// before the switch repeats.
    #[derive(Debug, Clone, Copy)]
    struct FoldZone {
        fall_back: NaiveDateTime,
    }

    impl FoldZone {
        fn summer() -> FixedOffset {
            FixedOffset::west_opt(4 * 3600).unwrap()
        }

        fn winter() -> FixedOffset {
            FixedOffset::west_opt(5 * 3600).unwrap()
        }
    }

    impl TimeZone for FoldZone {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            Self {
                fall_back: NaiveDate::from_ymd_opt(2026, 11, 1)
                    .unwrap()
                    .and_hms_opt(6, 0, 0)
                    .unwrap(),
            }
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let as_summer = *local - Self::summer();
            let as_winter = *local - Self::winter();
            match (as_summer < self.fall_back, as_winter >= self.fall_back) {
                (true, true) => LocalResult::Ambiguous(Self::summer(), Self::winter()),
                (true, false) => LocalResult::Single(Self::summer()),
                (false, true) => LocalResult::Single(Self::winter()),
                (false, false) => LocalResult::None,
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < self.fall_back {
                Self::summer()
            } else {
                Self::winter()
            }
        }
    }

    #[test]
    fn minute_buckets_keep_events_in_dst_fold() {
        let zone = FoldZone::from_offset(&FoldZone::summer());
        // 01:30 EDT, then 01:30:20 EST an hour later
        let first = ms(2026, 11, 1, 5, 30, 0);
        let second = ms(2026, 11, 1, 6, 30, 20);
        let log = log_of(&[(first, "Default"), (second, "Ghost")]);

        let buckets = compute_minute_buckets_in(&log, &zone);
        let bucketed: u64 = buckets
            .iter()
            .flat_map(|bucket| bucket.counts.iter())
            .map(|entry| entry.count)
            .sum();
        assert_eq!(bucketed, log.len() as u64);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].minute, "01:30");
        assert_eq!(buckets[0].start_ms, first);
    }

    #[test]
    fn minute_start_drops_seconds_and_millis() {
        let at = ms(2026, 3, 1, 10, 15, 42) + 317;
        let buckets = compute_minute_buckets_in(&log_of(&[(at, "Default")]), &utc());
        assert_eq!(buckets[0].start_ms, ms(2026, 3, 1, 10, 15, 0));
    }

    #[test]
    fn views_are_repeatable() {
        let log = log_of(&[(0, "a"), (60_000, "b"), (61_000, "a")]);
        let first = serde_json::to_string(&build_analytics_in(&log, &utc())).unwrap();
        let second = serde_json::to_string(&build_analytics_in(&log, &utc())).unwrap();
        assert_eq!(first, second);
    }
}
