use chrono::{DateTime, NaiveDate, Utc};
use hrdesk_core::{AppError, AppResult, NonEmptyString, trimmed_non_empty};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Grading period in `YYYY-MM` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GradePeriod(String);

impl GradePeriod {
    /// Parses and validates a `YYYY-MM` period.
    pub fn parse(value: &str) -> AppResult<Self> {
        let trimmed = value.trim();
        NaiveDate::parse_from_str(format!("{trimmed}-01").as_str(), "%Y-%m-%d")
            .ok()
            .filter(|_| trimmed.len() == 7)
            .map(|_| Self(trimmed.to_owned()))
            .ok_or_else(|| {
                AppError::Validation(format!("grading period must be YYYY-MM, got '{value}'"))
            })
    }

    /// Returns the period string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Score given by one employee to another for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    grade_id: Uuid,
    grader_code: NonEmptyString,
    target_code: NonEmptyString,
    period: GradePeriod,
    score: u8,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl Grade {
    /// Creates a validated grade.
    pub fn new(
        grade_id: Uuid,
        grader_code: impl Into<String>,
        target_code: impl Into<String>,
        period: GradePeriod,
        score: i32,
        comment: Option<String>,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let grader_code = NonEmptyString::new(grader_code)?;
        let target_code = NonEmptyString::new(target_code)?;
        if grader_code == target_code {
            return Err(AppError::Validation(
                "an employee cannot grade themselves".to_owned(),
            ));
        }

        let score = u8::try_from(score)
            .ok()
            .filter(|value| *value <= 100)
            .ok_or_else(|| {
                AppError::Validation(format!("score must be between 0 and 100, got {score}"))
            })?;

        Ok(Self {
            grade_id,
            grader_code,
            target_code,
            period,
            score,
            comment: trimmed_non_empty(comment),
            created_at,
        })
    }

    /// Returns the grade identifier.
    #[must_use]
    pub fn grade_id(&self) -> Uuid {
        self.grade_id
    }

    /// Returns the grader employee code.
    #[must_use]
    pub fn grader_code(&self) -> &NonEmptyString {
        &self.grader_code
    }

    /// Returns the graded employee code.
    #[must_use]
    pub fn target_code(&self) -> &NonEmptyString {
        &self.target_code
    }

    /// Returns the grading period.
    #[must_use]
    pub fn period(&self) -> &GradePeriod {
        &self.period
    }

    /// Returns the score.
    #[must_use]
    pub fn score(&self) -> u8 {
        self.score
    }

    /// Returns the optional comment.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns when the grade was recorded.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
