use async_trait::async_trait;
use hrdesk_core::AppResult;
use hrdesk_domain::{Grade, GradePeriod};

/// Repository port for grades.
#[async_trait]
pub trait GradeRepository: Send + Sync {
    /// Inserts a grade or replaces the one already given by the same grader to
    /// the same target for the same period. Returns the stored grade.
    async fn save_grade(&self, grade: Grade) -> AppResult<Grade>;

    /// Lists grades given by a grader, optionally limited to one period.
    async fn list_grades_by_grader(
        &self,
        grader_code: &str,
        period: Option<&GradePeriod>,
    ) -> AppResult<Vec<Grade>>;
}
