//! crates/trip_planner_core/src/itinerary.rs
//!
//! Day-bucketing of approved activities across the trip's date range, plus the
//! read-only itinerary view built on top of it. Everything here is a pure function
//! of `(start_date, end_date, approved_activities)` and is recomputed on demand.

use crate::domain::{Activity, DayPlan};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

const MAP_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Longest trip, in days, that the host accepts for planning.
pub const MAX_TRIP_DAYS: i64 = 366;

/// Inclusive number of calendar days between two dates. Non-positive when `end < start`.
pub fn day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days() + 1
}

/// Human-readable label for a day, e.g. "Saturday, Jun 1".
pub fn day_label(date: NaiveDate) -> String {
    date.format("%A, %b %-d").to_string()
}

/// Spreads the approved activities round-robin across the days of the trip.
///
/// Activity `i` lands on day `i mod day_count`. A degenerate range yields no days,
/// so nothing is placed.
pub fn build_day_plans(start: NaiveDate, end: NaiveDate, approved: &[Activity]) -> Vec<DayPlan> {
    let count = day_count(start, end);
    if count <= 0 {
        return Vec::new();
    }

    let mut days: Vec<DayPlan> = start
        .iter_days()
        .take(count as usize)
        .map(|date| DayPlan {
            date,
            label: day_label(date),
            activities: Vec::new(),
        })
        .collect();

    let len = days.len();
    for (index, activity) in approved.iter().enumerate() {
        days[index % len].activities.push(activity.clone());
    }
    days
}

/// Builds a "search this place on a map" link for an activity at a destination.
pub fn map_search_url(map_query: &str, destination: &str) -> String {
    let query = format!("{} {}", map_query, destination);
    format!("{}{}", MAP_SEARCH_BASE, urlencoding::encode(&query))
}

//=========================================================================================
// Itinerary View
//=========================================================================================

/// An activity as it appears in the itinerary, with its map link resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryEntry {
    #[serde(flatten)]
    pub activity: Activity,
    pub map_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryDay {
    pub date: NaiveDate,
    pub label: String,
    pub entries: Vec<ItineraryEntry>,
}

/// The rendered, printable itinerary for a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub activity_count: usize,
    pub days: Vec<ItineraryDay>,
}

impl Itinerary {
    pub fn build(
        destination: &str,
        start: NaiveDate,
        end: NaiveDate,
        approved: &[Activity],
    ) -> Self {
        let days = build_day_plans(start, end, approved)
            .into_iter()
            .map(|day| ItineraryDay {
                date: day.date,
                label: day.label,
                entries: day
                    .activities
                    .into_iter()
                    .map(|activity| ItineraryEntry {
                        map_url: map_search_url(&activity.map_query, destination),
                        activity,
                    })
                    .collect(),
            })
            .collect();

        Self {
            destination: destination.to_string(),
            start_date: start,
            end_date: end,
            activity_count: approved.len(),
            days,
        }
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Your {} Trip", self.destination)?;
        writeln!(
            f,
            "{} - {} | {} Activities",
            self.start_date, self.end_date, self.activity_count
        )?;
        for (index, day) in self.days.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "Day {}: {}", index + 1, day.label)?;
            if day.entries.is_empty() {
                writeln!(f, "  Time to explore or find a local cafe!")?;
            }
            for entry in &day.entries {
                writeln!(f, "  * {} [{}]", entry.activity.name, entry.activity.kind)?;
                writeln!(f, "    {}", entry.activity.description)?;
                writeln!(f, "    {}", entry.map_url)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MatchType;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn activity(id: &str) -> Activity {
        Activity {
            id: id.to_string(),
            name: format!("Place {}", id),
            description: "A place".to_string(),
            kind: "sight".to_string(),
            tags: vec![],
            map_query: format!("Place {}", id),
            image_url: String::new(),
            match_type: MatchType::Match,
        }
    }

    fn ids(day: &DayPlan) -> Vec<&str> {
        day.activities.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn three_days_five_activities_round_robin() {
        let approved: Vec<_> = ["0", "1", "2", "3", "4"].into_iter().map(activity).collect();
        let days = build_day_plans(date("2024-06-01"), date("2024-06-03"), &approved);
        assert_eq!(days.len(), 3);
        assert_eq!(ids(&days[0]), vec!["0", "3"]);
        assert_eq!(ids(&days[1]), vec!["1", "4"]);
        assert_eq!(ids(&days[2]), vec!["2"]);
    }

    #[test]
    fn days_are_consecutive_and_labelled() {
        let days = build_day_plans(date("2024-06-01"), date("2024-06-03"), &[]);
        let labels: Vec<_> = days.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Saturday, Jun 1", "Sunday, Jun 2", "Monday, Jun 3"]);
        assert!(days.iter().all(|d| d.activities.is_empty()));
    }

    #[test]
    fn single_day_trip_takes_everything() {
        let approved: Vec<_> = ["a", "b"].into_iter().map(activity).collect();
        let days = build_day_plans(date("2024-06-01"), date("2024-06-01"), &approved);
        assert_eq!(days.len(), 1);
        assert_eq!(ids(&days[0]), vec!["a", "b"]);
    }

    #[test]
    fn reversed_range_yields_no_days() {
        let approved = vec![activity("x")];
        assert_eq!(day_count(date("2024-06-05"), date("2024-06-01")), -3);
        assert!(build_day_plans(date("2024-06-05"), date("2024-06-01"), &approved).is_empty());
    }

    #[test]
    fn building_is_deterministic() {
        let approved: Vec<_> = ["a", "b", "c"].into_iter().map(activity).collect();
        let first = build_day_plans(date("2024-12-30"), date("2025-01-02"), &approved);
        let second = build_day_plans(date("2024-12-30"), date("2025-01-02"), &approved);
        assert_eq!(first, second);
        assert_eq!(first[2].date, date("2025-01-01"));
    }

    #[test]
    fn map_link_round_trips_arbitrary_text() {
        let url = map_search_url("Café & Bar #1 / 100%", "São Paulo?");
        let encoded = url.strip_prefix(MAP_SEARCH_BASE).unwrap();
        assert!(!encoded.contains(' ') && !encoded.contains('&') && !encoded.contains('#'));
        let decoded = urlencoding::decode(encoded).unwrap();
        assert_eq!(decoded, "Café & Bar #1 / 100% São Paulo?");
    }

    #[test]
    fn printable_itinerary_mentions_every_day() {
        let approved = vec![activity("a")];
        let itinerary = Itinerary::build("Paris", date("2024-06-01"), date("2024-06-02"), &approved);
        let text = itinerary.to_string();
        assert!(text.starts_with("Your Paris Trip"));
        assert!(text.contains("Day 1: Saturday, Jun 1"));
        assert!(text.contains("Day 2: Sunday, Jun 2"));
        assert!(text.contains("Time to explore or find a local cafe!"));
        assert_eq!(itinerary.activity_count, 1);
        assert!(itinerary.days[0].entries[0].map_url.ends_with("Place%20a%20Paris"));
    }
}
