//! Post-hoc filters over a resolver run.
//!
//! Filters never drop metadata entries (suggestions, alternatives, notes,
//! errors). Relevance runs first when requested; date and content filtering
//! then work on its output.

use chrono::{NaiveDate, NaiveDateTime};

use super::types::{ArchiveSnapshot, ContentMatch, SnapshotKind};
use crate::config::MAX_RELEVANT_ENTRIES;

/// Inclusive capture-date bounds; either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    /// Earliest capture time kept
    pub from: Option<NaiveDateTime>,
    /// Latest capture time kept
    pub to: Option<NaiveDateTime>,
}

impl DateRange {
    /// Range with exact bounds.
    pub fn new(from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Self {
        Self { from, to }
    }

    /// Whole-day bounds: `from` at 00:00:00 and `to` at 23:59:59.
    pub fn between_dates(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            from: from.and_then(|d| d.and_hms_opt(0, 0, 0)),
            to: to.and_then(|d| d.and_hms_opt(23, 59, 59)),
        }
    }

    /// True when neither side is bounded; such a range filters nothing.
    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Inclusive on both sides.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.from.map_or(true, |from| at >= from) && self.to.map_or(true, |to| at <= to)
    }

    fn describe(&self) -> String {
        let day = |d: NaiveDateTime| d.format("%Y-%m-%d").to_string();
        match (self.from, self.to) {
            (Some(from), Some(to)) => format!("{} to {}", day(from), day(to)),
            (Some(from), None) => format!("after {}", day(from)),
            (None, Some(to)) => format!("before {}", day(to)),
            (None, None) => "without bounds".to_string(),
        }
    }
}

/// Filters requested for an archive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveFilters {
    /// Keep only the most relevant captures
    pub relevance: bool,
    /// Keep only captures inside the range
    pub date_range: Option<DateRange>,
    /// Flag captures that may contain this text (advisory)
    pub content: Option<String>,
}

impl ArchiveFilters {
    fn date_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref().filter(|r| !r.is_open())
    }

    fn content(&self) -> Option<&str> {
        self.content
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// True when at least one filter would change the output.
    pub fn is_active(&self) -> bool {
        self.relevance || self.date_range().is_some() || self.content().is_some()
    }

    /// Applies every requested filter and appends one note per date and
    /// content filter, in that order.
    pub fn apply(&self, entries: Vec<ArchiveSnapshot>) -> Vec<ArchiveSnapshot> {
        if !self.is_active() || entries.is_empty() {
            return entries;
        }

        let mut entries = if self.relevance {
            filter_relevant(entries)
        } else {
            entries
        };
        if let Some(range) = self.date_range() {
            entries = filter_date_range(entries, range);
        }
        if self.content().is_some() {
            flag_content(&mut entries);
        }

        if let Some(range) = self.date_range() {
            entries.push(ArchiveSnapshot::note(format!(
                "Date filter applied: showing archives {}",
                range.describe()
            )));
        }
        if let Some(content) = self.content() {
            entries.push(ArchiveSnapshot::note(format!(
                "Content filter applied: searching for \"{}\"",
                content
            )));
        }
        entries
    }
}

fn is_priority(entry: &ArchiveSnapshot) -> bool {
    entry.kind == SnapshotKind::LatestArchive || entry.is_available_capture()
}

/// Keeps at most `MAX_RELEVANT_ENTRIES` captures, newest first.
///
/// Output: the kept entries, then every metadata entry in its original
/// order, then a note with the number kept. Normal entries (warnings) are
/// only used when there is no capture at all.
pub fn filter_relevant(entries: Vec<ArchiveSnapshot>) -> Vec<ArchiveSnapshot> {
    let mut priority = Vec::new();
    let mut normal = Vec::new();
    let mut metadata = Vec::new();
    for entry in entries {
        if is_priority(&entry) {
            priority.push(entry);
        } else if entry.kind.is_metadata() {
            metadata.push(entry);
        } else {
            normal.push(entry);
        }
    }

    sort_newest_first(&mut priority);
    let mut kept = if priority.is_empty() { normal } else { priority };
    kept.truncate(MAX_RELEVANT_ENTRIES);

    let note = ArchiveSnapshot::note(format!(
        "Showing only the {} most relevant archives",
        kept.len()
    ));
    kept.extend(metadata);
    kept.push(note);
    kept
}

/// Sorts entries with a decoded date newest first; entries without one stay
/// in their positions. The sort is stable.
fn sort_newest_first(entries: &mut [ArchiveSnapshot]) {
    let slots: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.timestamp.parsed().is_some())
        .map(|(i, _)| i)
        .collect();
    let mut dated: Vec<ArchiveSnapshot> = slots.iter().map(|&i| entries[i].clone()).collect();
    dated.sort_by(|a, b| b.timestamp.parsed().cmp(&a.timestamp.parsed()));
    for (slot, entry) in slots.into_iter().zip(dated) {
        entries[slot] = entry;
    }
}

/// Keeps metadata entries, entries without a decoded date and entries whose
/// date falls inside `range`.
pub fn filter_date_range(entries: Vec<ArchiveSnapshot>, range: &DateRange) -> Vec<ArchiveSnapshot> {
    entries
        .into_iter()
        .filter(|entry| {
            if entry.kind.is_metadata() {
                return true;
            }
            entry
                .timestamp
                .parsed()
                .map_or(true, |at| range.contains(at))
        })
        .collect()
}

/// Marks available captures as possible content matches. Never removes
/// entries.
pub fn flag_content(entries: &mut [ArchiveSnapshot]) {
    for entry in entries.iter_mut().filter(|e| e.is_available_capture()) {
        entry.content_match = Some(ContentMatch::Possible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::types::{SnapshotDate, SnapshotStatus};

    fn capture(kind: SnapshotKind, token: &str) -> ArchiveSnapshot {
        ArchiveSnapshot::new(
            kind,
            SnapshotDate::decode(token),
            format!("https://web.archive.org/web/{}/twitter.com/x", token),
            SnapshotStatus::Available,
            "Wayback Machine",
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_relevance_keeps_newest_ten_and_all_metadata() {
        let mut entries = vec![capture(SnapshotKind::LatestArchive, "20230101000000")];
        for year in 2000..2015 {
            entries.push(capture(SnapshotKind::Archive, &format!("{}0601120000", year)));
        }
        for i in 0..12 {
            entries.push(ArchiveSnapshot::note(format!("note {}", i)));
        }
        entries.push(ArchiveSnapshot::new(
            SnapshotKind::Alternative,
            SnapshotDate::Unknown,
            "https://archive.ph/twitter.com/x",
            SnapshotStatus::Info,
            "archive.today",
        ));

        let filtered = filter_relevant(entries);
        let captures: Vec<&ArchiveSnapshot> =
            filtered.iter().filter(|e| e.kind.is_capture()).collect();
        assert_eq!(captures.len(), 10);
        assert_eq!(captures[0].kind, SnapshotKind::LatestArchive);
        assert_eq!(captures[1].timestamp.to_string(), "2014-06-01 12:00:00");
        assert_eq!(
            filtered
                .iter()
                .filter(|e| e.kind.is_metadata() && e.source.starts_with("note"))
                .count(),
            12
        );
        assert!(filtered
            .iter()
            .any(|e| e.kind == SnapshotKind::Alternative));
        assert_eq!(
            filtered.last().map(|e| e.source.as_str()),
            Some("Showing only the 10 most relevant archives")
        );
    }

    #[test]
    fn test_relevance_unparseable_dates_keep_position() {
        let entries = vec![
            capture(SnapshotKind::Archive, "20100101000000"),
            capture(SnapshotKind::Archive, "garbage"),
            capture(SnapshotKind::Archive, "20200101000000"),
        ];
        let filtered = filter_relevant(entries);
        let dates: Vec<String> = filtered
            .iter()
            .filter(|e| e.kind.is_capture())
            .map(|e| e.timestamp.to_string())
            .collect();
        assert_eq!(
            dates,
            vec!["2020-01-01 00:00:00", "garbage", "2010-01-01 00:00:00"]
        );
    }

    #[test]
    fn test_relevance_falls_back_to_normal_entries() {
        let warning = ArchiveSnapshot::new(
            SnapshotKind::Warning,
            SnapshotDate::Unknown,
            "https://web.archive.org/web/timemap/json",
            SnapshotStatus::Timeout,
            "Calendar API request timed out",
        );
        let filtered = filter_relevant(vec![warning.clone()]);
        assert_eq!(filtered[0], warning);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_date_range_filter() {
        let entries = vec![
            capture(SnapshotKind::Archive, "20200101000000"),
            capture(SnapshotKind::Archive, "20210615000000"),
            capture(SnapshotKind::Archive, "20221231000000"),
            capture(SnapshotKind::Archive, "bad"),
            ArchiveSnapshot::note("kept"),
        ];
        let range = DateRange::between_dates(Some(date(2020, 1, 1)), Some(date(2021, 6, 15)));
        let filtered = filter_date_range(entries, &range);
        let labels: Vec<String> = filtered.iter().map(|e| e.timestamp.to_string()).collect();
        assert_eq!(
            labels,
            vec!["2020-01-01 00:00:00", "2021-06-15 00:00:00", "bad", "N/A"]
        );
    }

    #[test]
    fn test_between_dates_covers_whole_day() {
        let range = DateRange::between_dates(None, Some(date(2021, 1, 30)));
        let late = date(2021, 1, 30).and_hms_opt(23, 59, 59).expect("valid time");
        assert!(range.contains(late));
        let next = date(2021, 1, 31).and_hms_opt(0, 0, 0).expect("valid time");
        assert!(!range.contains(next));
    }

    #[test]
    fn test_content_filter_is_advisory() {
        let filters = ArchiveFilters {
            content: Some("launch".to_string()),
            ..Default::default()
        };
        let entries = vec![
            capture(SnapshotKind::LatestArchive, "20210130142509"),
            ArchiveSnapshot::note("something"),
        ];
        let filtered = filters.apply(entries);
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[0].content_match, Some(ContentMatch::Possible));
        assert_eq!(filtered[1].content_match, None);
        assert_eq!(
            filtered[2].source,
            "Content filter applied: searching for \"launch\""
        );
    }

    #[test]
    fn test_filter_notes_order() {
        let filters = ArchiveFilters {
            relevance: false,
            date_range: Some(DateRange::between_dates(Some(date(2020, 1, 1)), None)),
            content: Some("x".to_string()),
        };
        let filtered = filters.apply(vec![capture(SnapshotKind::Archive, "20210101000000")]);
        let notes: Vec<&str> = filtered
            .iter()
            .filter(|e| e.kind == SnapshotKind::Note)
            .map(|e| e.source.as_str())
            .collect();
        assert_eq!(
            notes,
            vec![
                "Date filter applied: showing archives after 2020-01-01",
                "Content filter applied: searching for \"x\""
            ]
        );
    }

    #[test]
    fn test_inactive_filters_are_identity() {
        let filters = ArchiveFilters {
            relevance: false,
            date_range: Some(DateRange::default()),
            content: Some("   ".to_string()),
        };
        assert!(!filters.is_active());
        let entries = vec![capture(SnapshotKind::Archive, "20210101000000")];
        assert_eq!(filters.apply(entries.clone()), entries);
    }
}
