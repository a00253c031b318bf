//! Catalog: fixture data and the page-level aggregations over it.
//!
//! DESIGN
//! ======
//! Transcripts, session videos, the emotion breakdown and the weekly
//! engagement timeline are static until the analytics backend exposes
//! them. Each page's derived figures (filters, sort orders, summaries) are
//! computed here so routes only serialize.

use serde::Serialize;
use time::Date;
use time::macros::date;

/// Subject filter value meaning "no filter".
pub const ALL_SUBJECTS: &str = "All";
/// Topics shown before collapsing the rest into a "+N" counter.
pub const TOPIC_PREVIEW: usize = 2;
/// Engagement at or above this is an "Excellent" day.
pub const EXCELLENT_ENGAGEMENT: u32 = 85;

// =============================================================================
// TRANSCRIPTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub date: Date,
    pub size: String,
    pub url: String,
    pub subject: String,
}

impl Transcript {
    fn new(id: &str, name: &str, date: Date, size: &str, subject: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_name: display_name(name),
            date,
            size: size.into(),
            url: format!("/transcripts/{name}"),
            subject: subject.into(),
        }
    }
}

/// `Physics_Experiment_Notes.pdf` -> `Physics Experiment Notes`.
#[must_use]
pub fn display_name(file_name: &str) -> String {
    file_name.trim_end_matches(".pdf").replace('_', " ")
}

// =============================================================================
// SESSION VIDEOS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionVideo {
    pub id: String,
    pub session_date: Date,
    pub duration: String,
    pub students_present: u32,
    pub total_students: u32,
    pub topics: Vec<String>,
    pub video_url: String,
    pub subject: String,
    /// Higher means more disengaged.
    pub disengagement: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionVideoCard {
    #[serde(flatten)]
    pub video: SessionVideo,
    pub attendance_percent: u32,
    pub topic_preview: Vec<String>,
    pub more_topics: usize,
}

impl SessionVideo {
    #[must_use]
    pub fn card(&self) -> SessionVideoCard {
        let attendance_percent = if self.total_students == 0 {
            0
        } else {
            (self.students_present * 100 + self.total_students / 2) / self.total_students
        };
        SessionVideoCard {
            video: self.clone(),
            attendance_percent,
            topic_preview: self.topics.iter().take(TOPIC_PREVIEW).cloned().collect(),
            more_topics: self.topics.len().saturating_sub(TOPIC_PREVIEW),
        }
    }
}

// =============================================================================
// EMOTIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmotionStatus {
    Positive,
    Neutral,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionRow {
    pub emotion: String,
    pub count: u32,
    pub percentage: u32,
    pub color: String,
    pub status: EmotionStatus,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionSummary {
    pub total_students: u32,
    pub positive: u32,
    pub neutral: u32,
    pub needs_attention: u32,
    pub positive_share: f64,
    pub needs_attention_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionDistribution {
    pub rows: Vec<EmotionRow>,
    pub summary: EmotionSummary,
}

/// Recommended teacher response for an emotion label.
#[must_use]
pub fn action_for(emotion: &str) -> &'static str {
    match emotion {
        "Happy" => "Maintain positive environment",
        "Excited" => "Channel enthusiasm into learning",
        "Neutral" => "Monitor for engagement opportunities",
        "Confused" => "Provide clarification and support",
        "Bored" => "Increase interactivity and engagement",
        _ => "Monitor closely",
    }
}

// =============================================================================
// ENGAGEMENT TIMELINE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayStatus {
    Excellent,
    Good,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementDay {
    pub day: String,
    pub date: Date,
    pub engagement: u32,
    pub students: u32,
    pub duration_minutes: u32,
    pub status: DayStatus,
}

impl EngagementDay {
    fn new(day: &str, date: Date, engagement: u32, students: u32, duration_minutes: u32) -> Self {
        let status = if engagement >= EXCELLENT_ENGAGEMENT { DayStatus::Excellent } else { DayStatus::Good };
        Self { day: day.into(), date, engagement, students, duration_minutes, status }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementSummary {
    pub average_engagement: u32,
    pub peak_day: Option<EngagementDay>,
    pub average_students: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngagementTimeline {
    pub days: Vec<EngagementDay>,
    pub summary: EngagementSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: u32,
}

// =============================================================================
// CATALOG
// =============================================================================

pub struct Catalog {
    transcripts: Vec<Transcript>,
    videos: Vec<SessionVideo>,
    emotions: Vec<EmotionRow>,
    timeline: Vec<EngagementDay>,
}

impl Catalog {
    #[must_use]
    pub fn new(
        transcripts: Vec<Transcript>,
        videos: Vec<SessionVideo>,
        emotions: Vec<EmotionRow>,
        timeline: Vec<EngagementDay>,
    ) -> Self {
        Self { transcripts, videos, emotions, timeline }
    }

    /// Transcripts for `subject`; `None` or `"All"` returns everything.
    #[must_use]
    pub fn transcripts(&self, subject: Option<&str>) -> Vec<Transcript> {
        match subject {
            None | Some(ALL_SUBJECTS) => self.transcripts.clone(),
            Some(s) => self.transcripts.iter().filter(|t| t.subject == s).cloned().collect(),
        }
    }

    #[must_use]
    pub fn transcript(&self, id: &str) -> Option<&Transcript> {
        self.transcripts.iter().find(|t| t.id == id)
    }

    /// Filter options: `"All"` then each subject once, in first-seen order.
    #[must_use]
    pub fn transcript_subjects(&self) -> Vec<String> {
        let mut subjects = vec![ALL_SUBJECTS.to_string()];
        for t in &self.transcripts {
            if !subjects.contains(&t.subject) {
                subjects.push(t.subject.clone());
            }
        }
        subjects
    }

    /// Videos as cards, newest session first.
    #[must_use]
    pub fn session_videos(&self) -> Vec<SessionVideoCard> {
        let mut videos: Vec<&SessionVideo> = self.videos.iter().collect();
        videos.sort_by(|a, b| b.session_date.cmp(&a.session_date));
        videos.into_iter().map(SessionVideo::card).collect()
    }

    /// The most recent session, shown in the dashboard video tile.
    #[must_use]
    pub fn latest_session(&self) -> Option<SessionVideoCard> {
        self.videos.iter().max_by_key(|v| v.session_date).map(SessionVideo::card)
    }

    #[must_use]
    pub fn emotion_distribution(&self) -> EmotionDistribution {
        let sum_for = |status: EmotionStatus| -> u32 {
            self.emotions.iter().filter(|e| e.status == status).map(|e| e.count).sum()
        };
        let positive = sum_for(EmotionStatus::Positive);
        let neutral = sum_for(EmotionStatus::Neutral);
        let needs_attention = sum_for(EmotionStatus::NeedsAttention);
        let total_students = positive + neutral + needs_attention;

        EmotionDistribution {
            rows: self.emotions.clone(),
            summary: EmotionSummary {
                total_students,
                positive,
                neutral,
                needs_attention,
                positive_share: share(positive, total_students),
                needs_attention_share: share(needs_attention, total_students),
            },
        }
    }

    #[must_use]
    pub fn engagement_timeline(&self) -> EngagementTimeline {
        let days = self.timeline.clone();
        let summary = EngagementSummary {
            average_engagement: rounded_mean(days.iter().map(|d| d.engagement)),
            // First maximum wins on ties.
            peak_day: days
                .iter()
                .fold(None::<&EngagementDay>, |best, d| match best {
                    Some(b) if b.engagement >= d.engagement => Some(b),
                    _ => Some(d),
                })
                .cloned(),
            average_students: rounded_mean(days.iter().map(|d| d.students)),
        };
        EngagementTimeline { days, summary }
    }

    #[must_use]
    pub fn engagement_chart(&self) -> Vec<ChartPoint> {
        self.timeline
            .iter()
            .map(|d| ChartPoint { name: d.day.clone(), value: d.engagement })
            .collect()
    }

    #[must_use]
    pub fn emotion_chart(&self) -> Vec<ChartPoint> {
        self.emotions
            .iter()
            .map(|e| ChartPoint { name: e.emotion.clone(), value: e.count })
            .collect()
    }

    #[must_use]
    pub fn session_count(&self) -> usize {
        self.videos.len()
    }

    #[must_use]
    pub fn transcript_count(&self) -> usize {
        self.transcripts.len()
    }

    /// The built-in demo data set.
    #[must_use]
    pub fn fixtures() -> Self {
        let transcripts = vec![
            Transcript::new("1", "Mathematics_Lesson_01.pdf", date!(2024 - 01 - 15), "2.3 MB", "Mathematics"),
            Transcript::new("2", "Physics_Experiment_Notes.pdf", date!(2024 - 01 - 14), "1.8 MB", "Physics"),
            Transcript::new("3", "Chemistry_Lab_Report.pdf", date!(2024 - 01 - 13), "3.1 MB", "Chemistry"),
            Transcript::new("4", "Biology_Discussion.pdf", date!(2024 - 01 - 12), "2.7 MB", "Biology"),
        ];

        let video = |id: &str, d: Date, duration: &str, present: u32, topics: &[&str], subject: &str, dis: u32| {
            SessionVideo {
                id: id.into(),
                session_date: d,
                duration: duration.into(),
                students_present: present,
                total_students: 30,
                topics: topics.iter().map(|t| (*t).to_string()).collect(),
                video_url: format!("/videos/{id}.mp4"),
                subject: subject.into(),
                disengagement: dis,
            }
        };
        let videos = vec![
            video("v1", date!(2024 - 01 - 15), "45:30", 28, &["Algebra", "Quadratic Equations", "Problem Solving"], "Mathematics", 35),
            video("v2", date!(2024 - 01 - 14), "40:10", 25, &["Thermodynamics"], "Physics", 50),
            video("v3", date!(2024 - 01 - 13), "42:05", 29, &["Organic Chemistry", "Reactions"], "Chemistry", 20),
            video("v4", date!(2024 - 01 - 12), "38:45", 22, &["World War II"], "History", 60),
        ];

        let emotion = |name: &str, count: u32, percentage: u32, color: &str, status: EmotionStatus| EmotionRow {
            emotion: name.into(),
            count,
            percentage,
            color: color.into(),
            status,
            action: action_for(name).into(),
        };
        let emotions = vec![
            emotion("Happy", 15, 38, "#10B981", EmotionStatus::Positive),
            emotion("Excited", 12, 30, "#3B82F6", EmotionStatus::Positive),
            emotion("Neutral", 8, 20, "#6B7280", EmotionStatus::Neutral),
            emotion("Confused", 3, 8, "#F59E0B", EmotionStatus::NeedsAttention),
            emotion("Bored", 2, 5, "#EF4444", EmotionStatus::NeedsAttention),
        ];

        let timeline = vec![
            EngagementDay::new("Mon", date!(2025 - 06 - 29), 80, 21, 43),
            EngagementDay::new("Tue", date!(2025 - 06 - 30), 85, 26, 36),
            EngagementDay::new("Wed", date!(2025 - 07 - 01), 78, 22, 48),
            EngagementDay::new("Thu", date!(2025 - 07 - 02), 90, 25, 58),
            EngagementDay::new("Fri", date!(2025 - 07 - 03), 88, 23, 31),
            EngagementDay::new("Sat", date!(2025 - 07 - 04), 82, 22, 32),
            EngagementDay::new("Sun", date!(2025 - 07 - 05), 75, 26, 39),
        ];

        Self::new(transcripts, videos, emotions, timeline)
    }
}

fn share(part: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(part) / f64::from(total) * 1000.0).round() / 10.0
}

fn rounded_mean(values: impl Iterator<Item = u32>) -> u32 {
    let (sum, n) = values.fold((0u64, 0u64), |(s, n), v| (s + u64::from(v), n + 1));
    if n == 0 {
        return 0;
    }
    u32::try_from((sum + n / 2) / n).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
