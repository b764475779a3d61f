//! Dashboard statistics
//!
//! Read-only aggregates computed by the server. The dashboard endpoints use
//! camelCase keys, unlike the entity endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform-wide statistics (`/admin/dashboard/stats`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub overview: Overview,
    pub recent_activity: RecentActivity,
    #[serde(default)]
    pub top_courses: Vec<TopCourse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_courses: u64,
    pub total_modules: u64,
    pub total_lessons: u64,
    pub total_enrollments: u64,
    pub total_categories: u64,
    pub total_reviews: u64,
    pub active_enrollments: u64,
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub enrollments_last30_days: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCourse {
    pub id: String,
    pub title: String,
    pub category: String,
    pub enrollment_count: u64,
    pub review_count: u64,
    pub avg_rating: f64,
}

/// Per-course summary row (`/admin/dashboard/courses`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseStats {
    pub id: String,
    pub title: String,
    pub category: String,
    pub difficulty: String,
    pub avg_rating: f64,
    pub content: ContentCounts,
    pub enrollments: EnrollmentSummary,
    pub reviews: ReviewTotal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCounts {
    pub modules: u64,
    pub lessons: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentSummary {
    pub total: u64,
    pub active: u64,
    pub average_progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewTotal {
    pub total: u64,
}

/// Drill-down for one course (`/admin/dashboard/courses/{id}/stats`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedCourseStats {
    pub course: CourseHeadline,
    pub content: DetailedContent,
    pub enrollments: DetailedEnrollments,
    pub engagement: Engagement,
    pub reviews: ReviewBreakdown,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseHeadline {
    pub id: String,
    pub title: String,
    pub category: String,
    pub difficulty: String,
    pub avg_rating: f64,
    pub review_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedContent {
    pub modules_count: u64,
    pub lessons_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedEnrollments {
    pub total: u64,
    pub active: u64,
    pub completed: u64,
    pub average_progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engagement {
    pub lesson_completions: u64,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBreakdown {
    pub total: u64,
    #[serde(default)]
    pub rating_distribution: Vec<RatingBucket>,
    #[serde(default)]
    pub recent: Vec<RecentReview>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub rating: u8,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentReview {
    pub id: String,
    pub rating: u8,
    pub text: String,
    pub date: DateTime<Utc>,
    pub user: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub enrollments_last7_days: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataEnvelope;

    #[test]
    fn dashboard_stats_decode_from_data_envelope() {
        let json = r#"{"data":{
            "overview":{"totalCourses":3,"totalModules":9,"totalLessons":27,
                "totalEnrollments":40,"totalCategories":2,"totalReviews":5,
                "activeEnrollments":31,"averageRating":4.4},
            "recentActivity":{"enrollmentsLast30Days":12},
            "topCourses":[{"id":"c1","title":"Rust","category":"Systems",
                "enrollmentCount":20,"reviewCount":3,"avgRating":4.7}]
        }}"#;
        let stats = serde_json::from_str::<DataEnvelope<DashboardStats>>(json)
            .unwrap()
            .into_inner();
        assert_eq!(stats.overview.total_lessons, 27);
        assert_eq!(stats.recent_activity.enrollments_last30_days, 12);
        assert_eq!(stats.top_courses[0].enrollment_count, 20);
    }
}
