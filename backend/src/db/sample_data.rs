//! Deterministic synthetic event data for local runs and tests.
//!
//! The raw tables are generated from fixed arithmetic patterns, then the
//! derived views are computed from them the way the upstream dynamic tables
//! would, so every section of the dashboard has consistent data to show.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::models::*;

const SPECIALTIES: [&str; 10] = [
    "Wound Care Nursing",
    "Podiatry",
    "Vascular Surgery",
    "Dermatology",
    "Plastic Surgery",
    "Physical Therapy",
    "Infectious Disease",
    "Endocrinology",
    "Geriatrics",
    "Hyperbaric Medicine",
];

const ORGANIZATIONS: [&str; 12] = [
    "Mayo Clinic",
    "Cleveland Clinic",
    "Johns Hopkins Hospital",
    "Massachusetts General",
    "Kaiser Permanente",
    "Mount Sinai",
    "UCSF Health",
    "Northwestern Medicine",
    "Stanford Health Care",
    "Duke Health",
    "Cedars-Sinai",
    "NYU Langone",
];

const TRACKS: [&str; 5] = [
    "Wound Debridement",
    "Diabetic Foot Care",
    "Pressure Injury Prevention",
    "Advanced Therapies",
    "Research & Innovation",
];

const SPEAKERS: [&str; 8] = [
    "Dr. Maria Santos",
    "Dr. James Chen",
    "Dr. Aisha Patel",
    "Dr. Robert Kim",
    "Dr. Elena Petrova",
    "Dr. Samuel Okafor",
    "Dr. Laura Becker",
    "Dr. Hiro Tanaka",
];

const SPONSORS: [(&str, &str, f64); 10] = [
    ("Smith & Nephew", "Platinum", 75_000.0),
    ("Molnlycke", "Platinum", 75_000.0),
    ("3M Health Care", "Gold", 40_000.0),
    ("ConvaTec", "Gold", 40_000.0),
    ("Coloplast", "Gold", 40_000.0),
    ("Integra LifeSciences", "Silver", 20_000.0),
    ("Organogenesis", "Silver", 20_000.0),
    ("MiMedx", "Bronze", 8_000.0),
    ("Derma Sciences", "Bronze", 8_000.0),
    ("Hollister Wound Care", "Bronze", 8_000.0),
];

const ATTENDEES: i64 = 500;
const SESSIONS: i64 = 20;

impl EventDataset {
    /// Synthetic symposium: 500 registrants, 325 checked in, 20 sessions in
    /// five tracks, ten sponsors, and sentiment-tagged feedback.
    pub fn sample() -> Self {
        let attendees: Vec<AttendeeRecord> = (1..=ATTENDEES)
            .map(|id| AttendeeRecord {
                attendee_id: id,
                full_name: format!("Attendee {:03}", id),
                specialty: Some(
                    SPECIALTIES[((id * 7 + id / 13) % SPECIALTIES.len() as i64) as usize]
                        .to_string(),
                ),
                organization: Some(
                    ORGANIZATIONS[((id * 11 + id / 3) % ORGANIZATIONS.len() as i64) as usize]
                        .to_string(),
                ),
            })
            .collect();

        let sessions: Vec<SessionRecord> = (1..=SESSIONS)
            .map(|id| {
                let track = TRACKS[((id - 1) % TRACKS.len() as i64) as usize];
                SessionRecord {
                    session_id: id,
                    session_name: format!("{}: Session {}", track, (id - 1) / TRACKS.len() as i64 + 1),
                    track: track.to_string(),
                }
            })
            .collect();

        // 13 of every 20 registrants check in.
        let checkins: Vec<CheckinRecord> = attendees
            .iter()
            .filter(|a| a.attendee_id % 20 < 13)
            .flat_map(|a| {
                let id = a.attendee_id;
                let first = id % SESSIONS + 1;
                let second = (id * 3 + id / 7) % SESSIONS + 1;
                let mut visits = vec![CheckinRecord {
                    attendee_id: id,
                    session_id: first,
                }];
                if second != first {
                    visits.push(CheckinRecord {
                        attendee_id: id,
                        session_id: second,
                    });
                }
                if id % 3 == 0 {
                    visits.push(CheckinRecord {
                        attendee_id: id,
                        session_id: (id / 5) % 4 + 1,
                    });
                }
                visits
            })
            .collect();

        let booth_visits: Vec<BoothVisitRecord> = attendees
            .iter()
            .filter(|a| a.attendee_id % 20 < 13 && a.attendee_id % 4 != 1)
            .flat_map(|a| {
                let id = a.attendee_id;
                let visits = 1 + (id % 3);
                (0..visits).map(move |n| {
                    let slot = ((id + n * 7) * (n + 1)) % 17;
                    // Lower slots map to higher tiers, so bigger sponsors draw more traffic.
                    let sponsor = match slot {
                        0..=3 => 0,
                        4..=6 => 1,
                        7..=8 => 2,
                        9..=10 => 3,
                        11 => 4,
                        12 => 5,
                        13 => 6,
                        14 => 7,
                        15 => 8,
                        _ => 9,
                    };
                    BoothVisitRecord {
                        attendee_id: id,
                        sponsor_name: SPONSORS[sponsor].0.to_string(),
                        duration_sec: 60 + (id * 37 + n * 53) % 420,
                    }
                })
            })
            .collect();

        let feedback: Vec<FeedbackRecord> = checkins
            .iter()
            .filter(|c| (c.attendee_id + c.session_id) % 3 == 0)
            .map(|c| {
                let seed = c.attendee_id * 31 + c.session_id * 17;
                let rating = match seed % 10 {
                    0 => 2,
                    1 | 2 => 3,
                    3..=6 => 4,
                    _ => 5,
                } - i32::from(c.session_id % 7 == 0);
                FeedbackRecord {
                    attendee_id: c.attendee_id,
                    session_id: c.session_id,
                    rating: rating.max(1),
                    comment: format!("Feedback on session {}", c.session_id),
                }
            })
            .collect();

        let session_analytics = derive_session_analytics(&sessions, &checkins, &feedback);
        let sponsor_performance = derive_sponsor_performance(&booth_visits);
        let attendee_engagement =
            derive_attendee_engagement(&attendees, &checkins, &booth_visits, &feedback);
        let feedback_sentiment = Some(
            feedback
                .iter()
                .map(|f| SentimentFeedbackRow {
                    attendee_id: f.attendee_id,
                    rating: f.rating,
                    sentiment_category: match f.rating {
                        4..=5 => "Positive",
                        3 => "Neutral",
                        _ => "Negative",
                    }
                    .to_string(),
                })
                .collect(),
        );

        Self {
            attendees,
            sessions,
            checkins,
            booth_visits,
            feedback,
            session_analytics,
            sponsor_performance,
            attendee_engagement,
            feedback_sentiment,
        }
    }

    /// Same data with the sentiment view dropped.
    pub fn without_sentiment(mut self) -> Self {
        self.feedback_sentiment = None;
        self
    }
}

fn derive_session_analytics(
    sessions: &[SessionRecord],
    checkins: &[CheckinRecord],
    feedback: &[FeedbackRecord],
) -> Vec<SessionAnalyticsRow> {
    let mut attendance: HashMap<i64, HashSet<i64>> = HashMap::new();
    for c in checkins {
        attendance.entry(c.session_id).or_default().insert(c.attendee_id);
    }
    let mut ratings: HashMap<i64, Vec<i32>> = HashMap::new();
    for f in feedback {
        ratings.entry(f.session_id).or_default().push(f.rating);
    }

    sessions
        .iter()
        .map(|s| {
            let attendance_count = attendance.get(&s.session_id).map_or(0, |a| a.len()) as i64;
            let capacity = 40 + (s.session_id * 17) % 60;
            let avg_rating = ratings.get(&s.session_id).map(|r| {
                r.iter().map(|&v| f64::from(v)).sum::<f64>() / r.len() as f64
            });
            SessionAnalyticsRow {
                session_name: s.session_name.clone(),
                speaker: SPEAKERS[(s.session_id as usize * 5) % SPEAKERS.len()].to_string(),
                track: s.track.clone(),
                attendance_count,
                capacity,
                capacity_utilization_pct: attendance_count as f64 / capacity as f64 * 100.0,
                avg_rating,
            }
        })
        .collect()
}

fn derive_sponsor_performance(visits: &[BoothVisitRecord]) -> Vec<SponsorPerformanceRow> {
    let mut by_sponsor: BTreeMap<&str, Vec<&BoothVisitRecord>> = BTreeMap::new();
    for v in visits {
        by_sponsor.entry(v.sponsor_name.as_str()).or_default().push(v);
    }

    SPONSORS
        .iter()
        .map(|(name, tier, investment)| {
            let rows = by_sponsor.get(name).cloned().unwrap_or_default();
            let total = rows.len() as i64;
            let unique = rows.iter().map(|v| v.attendee_id).collect::<HashSet<_>>().len() as i64;
            let avg_duration = if rows.is_empty() {
                0.0
            } else {
                rows.iter().map(|v| v.duration_sec as f64).sum::<f64>() / rows.len() as f64
            };
            // Qualified visitor-minutes per $1k invested.
            let roi_score = (total > 0)
                .then(|| unique as f64 * (avg_duration / 60.0) / (investment / 1_000.0));
            SponsorPerformanceRow {
                sponsor_name: name.to_string(),
                tier: tier.to_string(),
                total_booth_visits: total,
                unique_visitors: unique,
                avg_visit_duration_sec: avg_duration,
                roi_score,
                investment_amount: *investment,
            }
        })
        .collect()
}

fn derive_attendee_engagement(
    attendees: &[AttendeeRecord],
    checkins: &[CheckinRecord],
    visits: &[BoothVisitRecord],
    feedback: &[FeedbackRecord],
) -> Vec<AttendeeEngagementRow> {
    let mut score: HashMap<i64, i64> = HashMap::new();
    for id in checkins
        .iter()
        .map(|c| c.attendee_id)
        .chain(visits.iter().map(|v| v.attendee_id))
        .chain(feedback.iter().map(|f| f.attendee_id))
    {
        *score.entry(id).or_default() += 1;
    }

    attendees
        .iter()
        .map(|a| {
            let tier = match score.get(&a.attendee_id).copied().unwrap_or(0) {
                s if s >= 6 => "Highly Engaged",
                4..=5 => "Engaged",
                1..=3 => "Participating",
                _ => "Registered Only",
            };
            AttendeeEngagementRow {
                attendee_id: a.attendee_id,
                engagement_tier: tier.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_headline_numbers() {
        let data = EventDataset::sample();
        assert_eq!(data.attendees.len(), 500);
        let checked_in: HashSet<i64> = data.checkins.iter().map(|c| c.attendee_id).collect();
        assert_eq!(checked_in.len(), 325);
    }

    #[test]
    fn test_sample_is_deterministic() {
        assert_eq!(EventDataset::sample(), EventDataset::sample());
    }

    #[test]
    fn test_views_cover_every_session_and_sponsor() {
        let data = EventDataset::sample();
        assert_eq!(data.session_analytics.len(), data.sessions.len());
        assert_eq!(data.sponsor_performance.len(), SPONSORS.len());
        assert_eq!(data.attendee_engagement.len(), data.attendees.len());
        assert!(data.feedback_sentiment.is_some());
    }

    #[test]
    fn test_without_sentiment_drops_only_sentiment() {
        let full = EventDataset::sample();
        let reduced = EventDataset::sample().without_sentiment();
        assert!(reduced.feedback_sentiment.is_none());
        assert_eq!(full.session_analytics, reduced.session_analytics);
    }

    #[test]
    fn test_feedback_ratings_in_range() {
        let data = EventDataset::sample();
        assert!(!data.feedback.is_empty());
        assert!(data.feedback.iter().all(|f| (1..=5).contains(&f.rating)));
    }
}
