//! Sidebar filters: the closed date/tier enumerations, the dynamic track list,
//! and the query that feeds it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::db::query::{QueryKind, SqlQuery};

pub const ALL_DAYS: &str = "All Days";
pub const ALL_TRACKS: &str = "All Tracks";
pub const ALL_TIERS: &str = "All Tiers";

pub const TRACK_COLUMN: &str = "track";

/// Time window choice.
///
/// Captured and echoed on the page but never applied to a query: every
/// section reads the whole event regardless of the selected day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateWindow {
    #[default]
    #[serde(rename = "All Days")]
    AllDays,
    #[serde(rename = "Day 1 (Dec 15)")]
    Day1,
    #[serde(rename = "Day 2 (Dec 16)")]
    Day2,
    #[serde(rename = "Day 3 (Dec 17)")]
    Day3,
}

impl DateWindow {
    pub const ALL: [DateWindow; 4] = [
        DateWindow::AllDays,
        DateWindow::Day1,
        DateWindow::Day2,
        DateWindow::Day3,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DateWindow::AllDays => ALL_DAYS,
            DateWindow::Day1 => "Day 1 (Dec 15)",
            DateWindow::Day2 => "Day 2 (Dec 16)",
            DateWindow::Day3 => "Day 3 (Dec 17)",
        }
    }
}

impl FromStr for DateWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(DateWindow::AllDays);
        }
        DateWindow::ALL
            .into_iter()
            .find(|d| d.label() == s)
            .ok_or_else(|| format!("Unknown date window: {}", s))
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sponsor tier choice. Applies to the sponsor performance query only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SponsorTier {
    #[default]
    #[serde(rename = "All Tiers")]
    All,
    Platinum,
    Gold,
    Silver,
    Bronze,
}

impl SponsorTier {
    pub const ALL: [SponsorTier; 5] = [
        SponsorTier::All,
        SponsorTier::Platinum,
        SponsorTier::Gold,
        SponsorTier::Silver,
        SponsorTier::Bronze,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SponsorTier::All => ALL_TIERS,
            SponsorTier::Platinum => "Platinum",
            SponsorTier::Gold => "Gold",
            SponsorTier::Silver => "Silver",
            SponsorTier::Bronze => "Bronze",
        }
    }

    /// Value to match `tier` against, `None` for the sentinel.
    pub fn as_filter_value(&self) -> Option<&'static str> {
        match self {
            SponsorTier::All => None,
            other => Some(other.label()),
        }
    }
}

impl FromStr for SponsorTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(SponsorTier::All);
        }
        SponsorTier::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| format!("Unknown sponsor tier: {}", s))
    }
}

impl fmt::Display for SponsorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Session track choice. Applies to the top sessions query only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrackChoice {
    #[default]
    All,
    Track(String),
}

impl TrackChoice {
    pub fn label(&self) -> &str {
        match self {
            TrackChoice::All => ALL_TRACKS,
            TrackChoice::Track(name) => name,
        }
    }

    pub fn as_filter_value(&self) -> Option<&str> {
        match self {
            TrackChoice::All => None,
            TrackChoice::Track(name) => Some(name),
        }
    }
}

impl From<String> for TrackChoice {
    fn from(s: String) -> Self {
        if s.is_empty() || s == ALL_TRACKS {
            TrackChoice::All
        } else {
            TrackChoice::Track(s)
        }
    }
}

impl From<&str> for TrackChoice {
    fn from(s: &str) -> Self {
        TrackChoice::from(s.to_string())
    }
}

impl From<TrackChoice> for String {
    fn from(t: TrackChoice) -> Self {
        t.label().to_string()
    }
}

/// The complete sidebar selection for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub date: DateWindow,
    pub track: TrackChoice,
    pub tier: SponsorTier,
}

impl FilterSelection {
    /// Resolve raw labels against the current options.
    ///
    /// Missing labels fall back to the "all" sentinels. A track that is not in
    /// `options` is rejected the same way an unknown tier or date is.
    pub fn resolve(
        date: Option<&str>,
        track: Option<&str>,
        tier: Option<&str>,
        options: &FilterOptions,
    ) -> Result<Self, String> {
        let date = date.map(DateWindow::from_str).transpose()?.unwrap_or_default();
        let tier = tier.map(SponsorTier::from_str).transpose()?.unwrap_or_default();
        let track = track.map(TrackChoice::from).unwrap_or_default();

        if let TrackChoice::Track(name) = &track {
            if !options.contains_track(name) {
                return Err(format!("Unknown session track: {}", name));
            }
        }

        Ok(Self { date, track, tier })
    }
}

/// Choices offered by the three sidebar controls, sentinel first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub dates: Vec<String>,
    pub tracks: Vec<String>,
    pub tiers: Vec<String>,
}

impl FilterOptions {
    /// Build options from the distinct track values, which are sorted and
    /// deduplicated here so the list does not depend on backend ordering.
    pub fn new<I, S>(distinct_tracks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tracks: Vec<String> = distinct_tracks.into_iter().map(Into::into).collect();
        tracks.sort();
        tracks.dedup();
        tracks.insert(0, ALL_TRACKS.to_string());

        Self {
            dates: DateWindow::ALL.iter().map(|d| d.label().to_string()).collect(),
            tracks,
            tiers: SponsorTier::ALL.iter().map(|t| t.label().to_string()).collect(),
        }
    }

    pub fn contains_track(&self, track: &str) -> bool {
        self.tracks.iter().skip(1).any(|t| t == track)
    }
}

/// `SELECT DISTINCT track FROM raw_sessions ORDER BY track`.
pub fn distinct_tracks_query() -> SqlQuery {
    SqlQuery::new(
        QueryKind::DistinctTracks,
        "SELECT DISTINCT track FROM event_intelligence.raw_sessions",
    )
    .where_static("track IS NOT NULL")
    .order_by("track")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_window_labels_round_trip() {
        for window in DateWindow::ALL {
            assert_eq!(window.label().parse::<DateWindow>().unwrap(), window);
        }
        assert!("Day 4".parse::<DateWindow>().is_err());
    }

    #[test]
    fn test_tier_sentinel_has_no_filter_value() {
        assert_eq!(SponsorTier::All.as_filter_value(), None);
        assert_eq!(SponsorTier::Gold.as_filter_value(), Some("Gold"));
        assert_eq!("All Tiers".parse::<SponsorTier>().unwrap(), SponsorTier::All);
        assert!("Diamond".parse::<SponsorTier>().is_err());
    }

    #[test]
    fn test_track_choice_from_label() {
        assert_eq!(TrackChoice::from("All Tracks"), TrackChoice::All);
        assert_eq!(TrackChoice::from(""), TrackChoice::All);
        assert_eq!(
            TrackChoice::from("Wound Debridement").as_filter_value(),
            Some("Wound Debridement")
        );
    }

    #[test]
    fn test_options_put_sentinel_first_then_sorted_tracks() {
        let options = FilterOptions::new(["Research", "Clinical Practice", "Research"]);
        assert_eq!(
            options.tracks,
            vec!["All Tracks", "Clinical Practice", "Research"]
        );
        assert_eq!(options.tiers[0], ALL_TIERS);
        assert_eq!(options.dates[0], ALL_DAYS);
    }

    #[test]
    fn test_resolve_defaults_to_sentinels() {
        let options = FilterOptions::new(Vec::<String>::new());
        let selection = FilterSelection::resolve(None, None, None, &options).unwrap();
        assert_eq!(selection, FilterSelection::default());
    }

    #[test]
    fn test_resolve_rejects_unknown_track() {
        let options = FilterOptions::new(["Research"]);
        let err = FilterSelection::resolve(None, Some("Cardiology"), None, &options).unwrap_err();
        assert!(err.contains("Unknown session track"));
    }

    #[test]
    fn test_resolve_maps_sentinel_label_to_all() {
        // "All Tracks" is the sentinel, never a literal track.
        let options = FilterOptions::new(["Research"]);
        let selection =
            FilterSelection::resolve(None, Some("All Tracks"), None, &options).unwrap();
        assert_eq!(selection.track, TrackChoice::All);
    }

    #[test]
    fn test_distinct_tracks_query_shape() {
        let query = distinct_tracks_query();
        assert_eq!(query.kind(), QueryKind::DistinctTracks);
        assert!(query.sql().ends_with("ORDER BY track"));
        assert!(query.params().is_empty());
    }
}
