use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hrdesk_application::GradeRepository;
use hrdesk_core::{AppError, AppResult};
use hrdesk_domain::{Grade, GradePeriod};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::backend_error::sqlx_error;


/// PostgreSQL-backed grade repository.
#[derive(Clone)]
pub struct PostgresGradeRepository {
    pool: PgPool,
}

impl PostgresGradeRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GradeRow {
    id: Uuid,
    grader_code: String,
    target_code: String,
    period: String,
    score: i32,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<GradeRow> for Grade {
    type Error = AppError;

    fn try_from(row: GradeRow) -> Result<Self, Self::Error> {
        Grade::new(
            row.id,
            row.grader_code,
            row.target_code,
            GradePeriod::parse(row.period.as_str())?,
            row.score,
            row.comment,
            row.created_at,
        )
    }
}

#[async_trait]
impl GradeRepository for PostgresGradeRepository {
    async fn save_grade(&self, grade: Grade) -> AppResult<Grade> {
        let row = sqlx::query_as::<_, GradeRow>(
            r#"
            INSERT INTO grades (id, grader_code, target_code, period, score, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (grader_code, target_code, period) DO UPDATE
            SET score = EXCLUDED.score,
                comment = EXCLUDED.comment,
                created_at = EXCLUDED.created_at
            RETURNING id, grader_code, target_code, period, score, comment, created_at
            "#,
        )
        .bind(grade.grade_id())
        .bind(grade.grader_code().as_str())
        .bind(grade.target_code().as_str())
        .bind(grade.period().as_str())
        .bind(i32::from(grade.score()))
        .bind(grade.comment())
        .bind(grade.created_at())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| sqlx_error("save grade", error))?;

        Grade::try_from(row)
    }

    async fn list_grades_by_grader(
        &self,
        grader_code: &str,
        period: Option<&GradePeriod>,
    ) -> AppResult<Vec<Grade>> {
        let rows = sqlx::query_as::<_, GradeRow>(
            r#"
            SELECT id, grader_code, target_code, period, score, comment, created_at
            FROM grades
            WHERE grader_code = $1
              AND ($2::TEXT IS NULL OR period = $2)
            ORDER BY period DESC, target_code
            "#,
        )
        .bind(grader_code)
        .bind(period.map(GradePeriod::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| sqlx_error("list grades", error))?;

        rows.into_iter().map(Grade::try_from).collect()
    }
}
