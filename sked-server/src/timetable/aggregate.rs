//! Week filtering, merging and deduplication across timetables.

use std::collections::{HashMap, HashSet};

use chrono::Datelike;
use futures::future::try_join_all;
use tracing::info;

use crate::domain::{Event, TimetableRequest};
use crate::parser::LectureParser;

use super::loader::{LoadError, TimetableService, TimetableSource};

impl<S: TimetableSource, P: LectureParser> TimetableService<S, P> {
    /// One representative event per distinct id, in first-seen order.
    ///
    /// Representatives are clones with `start`/`end` cleared: at the
    /// template level the concrete occurrence times are arbitrary instance
    /// data. The cached sequence itself is never mutated.
    pub async fn unique_events(
        &self,
        timetable: &TimetableRequest,
    ) -> Result<Vec<Event>, LoadError> {
        let all = self.load(timetable).await?;

        let mut seen = HashSet::new();
        let mut uniques = Vec::new();
        for event in all.iter() {
            if seen.insert(event.id.clone()) {
                let mut representative = event.clone();
                representative.start = None;
                representative.end = None;
                uniques.push(representative);
            }
        }
        Ok(uniques)
    }

    /// Merged, week-filtered, deduplicated events for a set of timetables.
    ///
    /// Per-request loads run concurrently and are awaited as one batch: any
    /// failure fails the whole call, with no partial results. Output order
    /// is request order, then parser order within a timetable, then
    /// first-seen dedup position.
    pub async fn events(
        &self,
        timetables: &[TimetableRequest],
    ) -> Result<Vec<Event>, LoadError> {
        let per_timetable = try_join_all(timetables.iter().map(|timetable| async move {
            let events = self.load(timetable).await?;
            let filtered: Vec<Event> = events
                .iter()
                .filter(|e| in_iso_week(e, timetable.week))
                .cloned()
                .collect();
            Ok::<_, LoadError>(filtered)
        }))
        .await?;

        let merged: Vec<Event> = per_timetable.into_iter().flatten().collect();
        let events = dedup_events(merged);
        info!(count = events.len(), "serving merged events");
        Ok(events)
    }
}

/// True when the event's start falls in the given ISO week.
fn in_iso_week(event: &Event, week: u32) -> bool {
    event.start.is_some_and(|s| s.iso_week().week() == week)
}

/// Collapse events sharing a composite key.
///
/// Last write wins on key collisions; the surviving event keeps the
/// position of the first occurrence of its key. Identical entries reported
/// by several source timetables collapse into one.
pub fn dedup_events(events: Vec<Event>) -> Vec<Event> {
    let mut order: Vec<String> = Vec::with_capacity(events.len());
    let mut by_key: HashMap<String, Event> = HashMap::with_capacity(events.len());

    for event in events {
        let key = event.dedup_key();
        if !by_key.contains_key(&key) {
            order.push(key.clone());
        }
        by_key.insert(key, event);
    }

    order
        .into_iter()
        .filter_map(|key| by_key.remove(&key))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    use crate::domain::EventMeta;

    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn event(id: &str, title: &str, day: u32, hour: u32) -> Event {
        Event {
            id: id.to_string(),
            title: title.to_string(),
            start: Some(at(day, hour)),
            end: Some(at(day, hour + 1)),
            location: "R123".to_string(),
            meta: EventMeta {
                organiser_shortname: "MUE".to_string(),
            },
        }
    }

    #[test]
    fn week_filter_checks_iso_week_of_start() {
        // 2026-03-02 is a Monday in ISO week 10.
        assert!(in_iso_week(&event("a", "A", 2, 9), 10));
        assert!(!in_iso_week(&event("a", "A", 9, 9), 10));

        let mut template = event("a", "A", 2, 9);
        template.start = None;
        assert!(!in_iso_week(&template, 10));
    }

    #[test]
    fn dedup_keeps_first_position_but_last_value() {
        let deduped = dedup_events(vec![
            event("a", "A", 2, 9),
            event("b", "B", 2, 11),
            event("a", "A (updated)", 2, 9),
        ]);

        assert_eq!(deduped.len(), 2);
        // "a" keeps its leading position, but carries the later title.
        assert_eq!(deduped[0].id, "a");
        assert_eq!(deduped[0].title, "A (updated)");
        assert_eq!(deduped[1].id, "b");
    }

    #[test]
    fn dedup_distinguishes_same_id_at_different_times() {
        let deduped = dedup_events(vec![event("a", "A", 2, 9), event("a", "A", 2, 14)]);
        assert_eq!(deduped.len(), 2);
    }

    fn arb_event() -> impl Strategy<Value = Event> {
        ("[a-c]{1,2}", "[A-C]{1,2}", 2u32..5, 8u32..12).prop_map(|(id, org, day, hour)| Event {
            id,
            title: "Title".to_string(),
            start: Some(at(day, hour)),
            end: Some(at(day, hour + 1)),
            location: "R1".to_string(),
            meta: EventMeta {
                organiser_shortname: org,
            },
        })
    }

    proptest! {
        #[test]
        fn dedup_yields_one_event_per_distinct_key(
            events in proptest::collection::vec(arb_event(), 0..40)
        ) {
            let distinct: HashSet<String> =
                events.iter().map(Event::dedup_key).collect();

            let deduped = dedup_events(events);
            let keys: Vec<String> = deduped.iter().map(Event::dedup_key).collect();
            let unique: HashSet<String> = keys.iter().cloned().collect();

            // No key survives twice, and exactly the distinct keys survive.
            prop_assert_eq!(keys.len(), unique.len());
            prop_assert_eq!(unique, distinct);
        }
    }
}
