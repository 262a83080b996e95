//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::{PaperId, UserId};

use crate::domain::entities::{
    AiReview, BadgeProfile, LeaderboardEntry, Paper, PaperMetadata, PaperWithUploader,
    UploaderStats,
};
use crate::domain::repository::{PaperRepository, UserDirectory};
use crate::domain::value_objects::{
    LeaderboardKind, MetadataPatch, ModerationStatus, PaperQuery, SortOrder,
};
use crate::error::PaperResult;

const PAPER_COLUMNS: &str = r#"
    p.paper_id,
    p.department,
    p.subject,
    p.year,
    p.semester,
    p.university,
    p.file_url,
    p.storage_id,
    p.uploaded_by,
    p.status,
    p.authenticity_score,
    p.is_authentic,
    p.ai_feedback,
    p.extracted_text,
    p.views,
    p.created_at,
    p.updated_at
"#;

/// PostgreSQL-backed paper repository
#[derive(Clone)]
pub struct PgPaperRepository {
    pool: PgPool,
}

impl PgPaperRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PaperRepository for PgPaperRepository {
    async fn create(&self, paper: &Paper) -> PaperResult<()> {
        sqlx::query(
            r#"
            INSERT INTO papers (
                paper_id,
                department,
                subject,
                year,
                semester,
                university,
                file_url,
                storage_id,
                uploaded_by,
                status,
                authenticity_score,
                is_authentic,
                ai_feedback,
                extracted_text,
                views,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(paper.paper_id.as_uuid())
        .bind(&paper.metadata.department)
        .bind(&paper.metadata.subject)
        .bind(paper.metadata.year)
        .bind(&paper.metadata.semester)
        .bind(&paper.metadata.university)
        .bind(&paper.file_url)
        .bind(&paper.storage_id)
        .bind(paper.uploaded_by.as_uuid())
        .bind(paper.status.id())
        .bind(paper.review.authenticity_score)
        .bind(paper.review.is_authentic)
        .bind(&paper.review.feedback)
        .bind(&paper.extracted_text)
        .bind(paper.views)
        .bind(paper.created_at)
        .bind(paper.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, paper_id: &PaperId) -> PaperResult<Option<PaperWithUploader>> {
        let sql = format!(
            r#"
            SELECT {PAPER_COLUMNS}, u.name AS uploader_name
            FROM papers p
            JOIN users u ON u.user_id = p.uploaded_by
            WHERE p.paper_id = $1
            "#
        );

        let row = sqlx::query_as::<_, PaperRow>(&sql)
            .bind(paper_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_record()))
    }

    async fn list(&self, query: &PaperQuery) -> PaperResult<Vec<PaperWithUploader>> {
        // NULL binds disable the matching predicate. Sorting by views puts
        // the CASE key first; otherwise every key is NULL and recency wins.
        let sql = format!(
            r#"
            SELECT {PAPER_COLUMNS}, u.name AS uploader_name
            FROM papers p
            JOIN users u ON u.user_id = p.uploaded_by
            WHERE ($1::TEXT IS NULL OR p.subject ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR p.department ILIKE '%' || $2 || '%')
              AND ($3::INT IS NULL OR p.year = $3)
              AND ($4::FLOAT8 IS NULL OR p.authenticity_score >= $4)
              AND (NOT $5 OR (p.status = 1 AND p.authenticity_score > 0))
            ORDER BY CASE WHEN $6 THEN p.views END DESC, p.created_at DESC
            "#
        );

        let rows = sqlx::query_as::<_, PaperRow>(&sql)
            .bind(query.subject.as_deref())
            .bind(query.department.as_deref())
            .bind(query.year)
            .bind(query.min_score)
            .bind(query.visible_only)
            .bind(query.sort == SortOrder::Views)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_record()).collect())
    }

    async fn update_metadata(
        &self,
        paper_id: &PaperId,
        patch: &MetadataPatch,
    ) -> PaperResult<Option<PaperWithUploader>> {
        let sql = format!(
            r#"
            UPDATE papers p SET
                department = COALESCE($2, p.department),
                subject = COALESCE($3, p.subject),
                year = COALESCE($4, p.year),
                semester = COALESCE($5, p.semester),
                university = COALESCE($6, p.university),
                updated_at = NOW()
            FROM users u
            WHERE p.paper_id = $1 AND u.user_id = p.uploaded_by
            RETURNING {PAPER_COLUMNS}, u.name AS uploader_name
            "#
        );

        let row = sqlx::query_as::<_, PaperRow>(&sql)
            .bind(paper_id.as_uuid())
            .bind(patch.department.as_deref())
            .bind(patch.subject.as_deref())
            .bind(patch.year)
            .bind(patch.semester.as_deref())
            .bind(patch.university.as_deref())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_record()))
    }

    async fn delete(&self, paper_id: &PaperId) -> PaperResult<bool> {
        let deleted = sqlx::query("DELETE FROM papers WHERE paper_id = $1")
            .bind(paper_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn increment_views(&self, paper_id: &PaperId) -> PaperResult<Option<PaperWithUploader>> {
        // Single-statement increment so concurrent bumps never lose updates
        let sql = format!(
            r#"
            UPDATE papers p SET
                views = p.views + 1,
                updated_at = NOW()
            FROM users u
            WHERE p.paper_id = $1 AND u.user_id = p.uploaded_by
            RETURNING {PAPER_COLUMNS}, u.name AS uploader_name
            "#
        );

        let row = sqlx::query_as::<_, PaperRow>(&sql)
            .bind(paper_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_record()))
    }

    async fn set_status(
        &self,
        paper_id: &PaperId,
        status: ModerationStatus,
    ) -> PaperResult<Option<PaperWithUploader>> {
        let sql = format!(
            r#"
            UPDATE papers p SET
                status = $2,
                updated_at = NOW()
            FROM users u
            WHERE p.paper_id = $1 AND u.user_id = p.uploaded_by
            RETURNING {PAPER_COLUMNS}, u.name AS uploader_name
            "#
        );

        let row = sqlx::query_as::<_, PaperRow>(&sql)
            .bind(paper_id.as_uuid())
            .bind(status.id())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_record()))
    }

    async fn corpus_texts(&self, before: Option<DateTime<Utc>>) -> PaperResult<Vec<String>> {
        let texts = sqlx::query_scalar::<_, String>(
            r#"
            SELECT extracted_text
            FROM papers
            WHERE extracted_text <> ''
              AND ($1::TIMESTAMPTZ IS NULL OR created_at < $1)
            "#,
        )
        .bind(before)
        .fetch_all(&self.pool)
        .await?;

        Ok(texts)
    }

    async fn approved_stats(&self, user_id: &UserId) -> PaperResult<UploaderStats> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                COUNT(*) AS approved_count,
                COALESCE(SUM(views), 0)::BIGINT AS approved_views
            FROM papers
            WHERE uploaded_by = $1 AND status = 1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(UploaderStats {
            approved_count: row.approved_count,
            approved_views: row.approved_views,
        })
    }
}

impl UserDirectory for PgPaperRepository {
    async fn find_badges(&self, user_id: &UserId) -> PaperResult<Option<Vec<String>>> {
        let badges = sqlx::query_scalar::<_, Vec<String>>(
            "SELECT badges FROM users WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(badges)
    }

    async fn set_badges(&self, user_id: &UserId, badges: &[String]) -> PaperResult<()> {
        sqlx::query("UPDATE users SET badges = $2, updated_at = NOW() WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .bind(badges)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn badge_profile(&self, user_id: &UserId) -> PaperResult<Option<BadgeProfile>> {
        let row = sqlx::query_as::<_, BadgeProfileRow>(
            "SELECT user_id, name, badges FROM users WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| BadgeProfile {
            user_id: UserId::from_uuid(r.user_id),
            name: r.name,
            badges: r.badges,
        }))
    }

    async fn leaderboard(&self, kind: LeaderboardKind) -> PaperResult<Vec<LeaderboardEntry>> {
        // One aggregate query over students (user_role = 0); approved
        // papers only (status = 1)
        let sql = match kind {
            LeaderboardKind::Uploads => {
                r#"
                SELECT
                    u.user_id,
                    u.name,
                    u.badges,
                    COUNT(p.paper_id) FILTER (WHERE p.status = 1) AS score
                FROM users u
                LEFT JOIN papers p ON p.uploaded_by = u.user_id
                WHERE u.user_role = 0
                GROUP BY u.user_id
                ORDER BY score DESC
                LIMIT 100
                "#
            }
            LeaderboardKind::Views => {
                r#"
                SELECT
                    u.user_id,
                    u.name,
                    u.badges,
                    COALESCE(SUM(p.views) FILTER (WHERE p.status = 1), 0)::BIGINT AS score
                FROM users u
                LEFT JOIN papers p ON p.uploaded_by = u.user_id
                WHERE u.user_role = 0
                GROUP BY u.user_id
                ORDER BY score DESC
                LIMIT 100
                "#
            }
        };

        let rows = sqlx::query_as::<_, LeaderboardRow>(sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| LeaderboardEntry {
                user_id: UserId::from_uuid(r.user_id),
                name: r.name,
                badges: r.badges,
                score: r.score,
            })
            .collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PaperRow {
    paper_id: Uuid,
    department: String,
    subject: String,
    year: i32,
    semester: String,
    university: Option<String>,
    file_url: String,
    storage_id: String,
    uploaded_by: Uuid,
    status: i16,
    authenticity_score: f64,
    is_authentic: bool,
    ai_feedback: String,
    extracted_text: String,
    views: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    uploader_name: String,
}

impl PaperRow {
    fn into_record(self) -> PaperWithUploader {
        PaperWithUploader {
            paper: Paper {
                paper_id: PaperId::from_uuid(self.paper_id),
                metadata: PaperMetadata {
                    department: self.department,
                    subject: self.subject,
                    year: self.year,
                    semester: self.semester,
                    university: self.university,
                },
                file_url: self.file_url,
                storage_id: self.storage_id,
                uploaded_by: UserId::from_uuid(self.uploaded_by),
                status: ModerationStatus::from_id(self.status).unwrap_or_default(),
                review: AiReview {
                    authenticity_score: self.authenticity_score,
                    is_authentic: self.is_authentic,
                    feedback: self.ai_feedback,
                },
                extracted_text: self.extracted_text,
                views: self.views,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            uploader_name: self.uploader_name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    approved_count: i64,
    approved_views: i64,
}

#[derive(sqlx::FromRow)]
struct BadgeProfileRow {
    user_id: Uuid,
    name: String,
    badges: Vec<String>,
}

#[derive(sqlx::FromRow)]
struct LeaderboardRow {
    user_id: Uuid,
    name: String,
    badges: Vec<String>,
    score: i64,
}
