use crate::models::{Comment, Post, PostSummary};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Community bulletin board backed by the `posts` and `comments` tables
#[derive(Debug, Clone)]
pub struct BoardStore {
    pool: SqlitePool,
}

impl BoardStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn add_post(&self, title: &str, content: &str) -> Result<i64, BoardError> {
        require_text("title", title)?;
        require_text("content", content)?;

        let result = sqlx::query("INSERT INTO posts (title, content) VALUES (?, ?)")
            .bind(title)
            .bind(content)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        tracing::info!("Created post {}", id);
        Ok(id)
    }

    pub async fn update_post(&self, post_id: i64, title: &str, content: &str) -> Result<(), BoardError> {
        require_text("title", title)?;
        require_text("content", content)?;

        let result = sqlx::query("UPDATE posts SET title = ?, content = ? WHERE id = ?")
            .bind(title)
            .bind(content)
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        found(result.rows_affected(), "post", post_id)
    }

    /// Delete a post together with its comments
    pub async fn delete_post(&self, post_id: i64) -> Result<(), BoardError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM comments WHERE post_id = ?")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        found(result.rows_affected(), "post", post_id)?;
        tx.commit().await?;

        tracing::info!("Deleted post {}", post_id);
        Ok(())
    }

    pub async fn like_post(&self, post_id: i64) -> Result<(), BoardError> {
        let result = sqlx::query("UPDATE posts SET likes = likes + 1 WHERE id = ?")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        found(result.rows_affected(), "post", post_id)
    }

    pub async fn get_post(&self, post_id: i64) -> Result<Post, BoardError> {
        sqlx::query("SELECT id, title, content, likes FROM posts WHERE id = ?")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| post_from_row(&row))
            .ok_or(BoardError::NotFound { kind: "post", id: post_id })
    }

    /// All posts, newest first
    pub async fn list_posts(&self) -> Result<Vec<PostSummary>, BoardError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.title, COUNT(c.id) AS comment_count
            FROM posts p
            LEFT JOIN comments c ON c.post_id = p.id
            GROUP BY p.id
            ORDER BY p.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(summary_from_row).collect())
    }

    /// Posts whose title contains `keyword`, newest first
    pub async fn search_posts(&self, keyword: &str) -> Result<Vec<PostSummary>, BoardError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.title, COUNT(c.id) AS comment_count
            FROM posts p
            LEFT JOIN comments c ON c.post_id = p.id
            WHERE instr(p.title, ?) > 0
            GROUP BY p.id
            ORDER BY p.id DESC
            "#,
        )
        .bind(keyword)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!("Search '{}' matched {} posts", keyword, rows.len());
        Ok(rows.iter().map(summary_from_row).collect())
    }

    pub async fn add_comment(&self, post_id: i64, content: &str) -> Result<i64, BoardError> {
        require_text("content", content)?;

        let exists = sqlx::query("SELECT 1 FROM posts WHERE id = ?")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?
            .is_some();
        if !exists {
            return Err(BoardError::NotFound { kind: "post", id: post_id });
        }

        let result = sqlx::query("INSERT INTO comments (post_id, content) VALUES (?, ?)")
            .bind(post_id)
            .bind(content)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update_comment(&self, comment_id: i64, content: &str) -> Result<(), BoardError> {
        require_text("content", content)?;

        let result = sqlx::query("UPDATE comments SET content = ? WHERE id = ?")
            .bind(content)
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        found(result.rows_affected(), "comment", comment_id)
    }

    pub async fn delete_comment(&self, comment_id: i64) -> Result<(), BoardError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        found(result.rows_affected(), "comment", comment_id)
    }

    pub async fn like_comment(&self, comment_id: i64) -> Result<(), BoardError> {
        let result = sqlx::query("UPDATE comments SET likes = likes + 1 WHERE id = ?")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        found(result.rows_affected(), "comment", comment_id)
    }

    /// Comments of a post, oldest first
    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, BoardError> {
        let rows = sqlx::query(
            "SELECT id, post_id, content, likes FROM comments WHERE post_id = ? ORDER BY id",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| Comment {
                id: row.get("id"),
                post_id: row.get("post_id"),
                content: row.get("content"),
                likes: row.get("likes"),
            })
            .collect())
    }

    pub async fn comment_count(&self, post_id: i64) -> Result<i64, BoardError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM comments WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("total"))
    }
}

fn require_text(field: &str, value: &str) -> Result<(), BoardError> {
    if value.trim().is_empty() {
        return Err(BoardError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn found(rows_affected: u64, kind: &'static str, id: i64) -> Result<(), BoardError> {
    if rows_affected == 0 {
        return Err(BoardError::NotFound { kind, id });
    }
    Ok(())
}

fn post_from_row(row: &SqliteRow) -> Post {
    Post {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        likes: row.get("likes"),
    }
}

fn summary_from_row(row: &SqliteRow) -> PostSummary {
    PostSummary {
        id: row.get("id"),
        title: row.get("title"),
        comment_count: row.get("comment_count"),
    }
}
