use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::application::ports::bookmark_repository::{
    BookmarkPage, BookmarkQuery, BookmarkRepository,
};
use crate::domain::bookmarks::bookmark::{Bookmark, BookmarkChanges, NewBookmark};
use crate::infrastructure::db::PgPool;

const COLUMNS: &str = "id, user_id, title, url, tags, is_favorite, created_at, updated_at";

pub struct SqlxBookmarkRepository {
    pub pool: PgPool,
}

impl SqlxBookmarkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row(r: PgRow) -> Bookmark {
    Bookmark {
        id: r.get("id"),
        owner_id: r.get("user_id"),
        title: r.get("title"),
        url: r.get("url"),
        tags: r.get("tags"),
        is_favorite: r.get("is_favorite"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

/// Wraps user input in `%…%` for ILIKE, escaping `\`, `%` and `_` so they match literally.
pub fn contains_pattern(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    out.push('%');
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &BookmarkQuery) {
    qb.push(" WHERE user_id = ").push_bind(query.owner_id);
    if let Some(tag) = &query.tag {
        qb.push(" AND ").push_bind(tag.clone()).push(" = ANY(tags)");
    }
    if let Some(fav) = query.favorite {
        qb.push(" AND is_favorite = ").push_bind(fav);
    }
    if let Some(search) = &query.search {
        let pattern = contains_pattern(search);
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR url ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR EXISTS (SELECT 1 FROM unnest(tags) AS t(tag) WHERE t.tag ILIKE ")
            .push_bind(pattern)
            .push("))");
    }
}

#[async_trait]
impl BookmarkRepository for SqlxBookmarkRepository {
    async fn create(&self, new: NewBookmark) -> anyhow::Result<Bookmark> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO bookmarks (user_id, title, url, tags, is_favorite)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {COLUMNS}"#
        ))
        .bind(new.owner_id)
        .bind(&new.title)
        .bind(&new.url)
        .bind(&new.tags)
        .bind(new.is_favorite)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_row(row))
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Bookmark>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM bookmarks WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(map_row))
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> anyhow::Result<Option<Bookmark>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM bookmarks WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_row))
    }

    async fn list(&self, query: &BookmarkQuery) -> anyhow::Result<BookmarkPage> {
        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM bookmarks"));
        push_filters(&mut select, query);
        // Column name comes from a closed enum, never from input.
        select
            .push(format!(" ORDER BY {} DESC, id DESC", query.sort.column()))
            .push(" LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);
        let rows = select.build().fetch_all(&self.pool).await?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*)::BIGINT FROM bookmarks");
        push_filters(&mut count, query);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(BookmarkPage {
            items: rows.into_iter().map(map_row).collect(),
            total,
        })
    }

    async fn update(&self, id: Uuid, changes: BookmarkChanges) -> anyhow::Result<Option<Bookmark>> {
        let row = sqlx::query(&format!(
            r#"UPDATE bookmarks SET
                    title = COALESCE($1, title),
                    url = COALESCE($2, url),
                    tags = COALESCE($3, tags),
                    is_favorite = COALESCE($4, is_favorite),
                    updated_at = now()
                WHERE id = $5
                RETURNING {COLUMNS}"#
        ))
        .bind(changes.title)
        .bind(changes.url)
        .bind(changes.tags)
        .bind(changes.is_favorite)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_row))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM bookmarks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
