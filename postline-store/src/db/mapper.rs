//! Row shapes and their conversion into domain aggregates
//!
//! Each statement in [`query`](super::query) has exactly one row shape here.
//! Row shapes hold raw column text; identifiers are parsed on the way into
//! the domain types so a corrupt key surfaces as
//! [`DbError::MalformedIdentifier`] instead of a panic.

use postline_core::{Identifier, Post, PostWithUser, User, UserWithPosts};
use sqlx::any::{AnyRow, AnyTypeInfoKind};
use sqlx::{FromRow, Row, ValueRef};

use crate::error::{DbError, DbResult};

/// Columns of `posts`, as returned by the select-by-user statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub id: String,
    pub title: String,
    pub body: String,
    pub user_id: String,
}

/// One row of the posts-join-users listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithUserRow {
    pub post_id: String,
    pub post_title: String,
    pub post_body: String,
    pub user_id: String,
    pub user_name: String,
}

/// One row of the user-left-join-posts statement.
///
/// The user columns repeat on every row. `post` is `None` when the join
/// found nothing, which the store reports as NULL (or, from some drivers,
/// an empty string) in `post_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPostRow {
    pub user_id: String,
    pub user_name: String,
    pub post: Option<PostRow>,
}

/// Read a character column that may arrive as text or as bytes.
///
/// MySQL sends `TEXT` columns with a blob wire type, so the `Any` driver
/// hands them over as [`AnyTypeInfoKind::Blob`]. Bytes must be valid UTF-8.
fn optional_text(row: &AnyRow, column: &str) -> Result<Option<String>, sqlx::Error> {
    let raw = row.try_get_raw(column)?;
    if raw.is_null() {
        return Ok(None);
    }

    if raw.type_info().kind() == AnyTypeInfoKind::Blob {
        let bytes: Vec<u8> = row.try_get(column)?;
        return String::from_utf8(bytes)
            .map(Some)
            .map_err(|err| sqlx::Error::ColumnDecode {
                index: format!("{column:?}"),
                source: Box::new(err),
            });
    }

    row.try_get(column).map(Some)
}

fn text(row: &AnyRow, column: &str) -> Result<String, sqlx::Error> {
    match optional_text(row, column)? {
        Some(value) => Ok(value),
        // NULL in a NOT NULL position; let the driver report it.
        None => row.try_get(column),
    }
}

impl<'r> FromRow<'r, AnyRow> for PostRow {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: text(row, "id")?,
            title: text(row, "title")?,
            body: text(row, "body")?,
            user_id: text(row, "user_id")?,
        })
    }
}

impl<'r> FromRow<'r, AnyRow> for PostWithUserRow {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            post_id: text(row, "post_id")?,
            post_title: text(row, "post_title")?,
            post_body: text(row, "post_body")?,
            user_id: text(row, "user_id")?,
            user_name: text(row, "user_name")?,
        })
    }
}

impl<'r> FromRow<'r, AnyRow> for UserPostRow {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        let post = match optional_text(row, "post_id")?.filter(|id| !id.is_empty()) {
            Some(id) => Some(PostRow {
                id,
                title: optional_text(row, "post_title")?.unwrap_or_default(),
                body: optional_text(row, "post_body")?.unwrap_or_default(),
                user_id: optional_text(row, "post_user_id")?.unwrap_or_default(),
            }),
            None => None,
        };

        Ok(Self {
            user_id: text(row, "user_id")?,
            user_name: text(row, "user_name")?,
            post,
        })
    }
}

fn parse_id(column: &'static str, value: &str) -> DbResult<Identifier> {
    Identifier::parse(value).map_err(|source| DbError::MalformedIdentifier { column, source })
}

impl PostRow {
    pub fn into_post(self) -> DbResult<Post> {
        Ok(Post {
            id: parse_id("post_id", &self.id)?,
            title: self.title,
            body: self.body,
            user_id: parse_id("post_user_id", &self.user_id)?,
        })
    }
}

impl PostWithUserRow {
    /// Direct 1:1 transform; the author is embedded per row, not deduplicated.
    pub fn into_post_with_user(self) -> DbResult<PostWithUser> {
        Ok(PostWithUser {
            id: parse_id("post_id", &self.post_id)?,
            title: self.post_title,
            body: self.post_body,
            user: User {
                id: parse_id("user_id", &self.user_id)?,
                name: self.user_name,
            },
        })
    }
}

pub fn map_posts(rows: Vec<PostRow>) -> DbResult<Vec<Post>> {
    rows.into_iter().map(PostRow::into_post).collect()
}

pub fn map_posts_with_user(rows: Vec<PostWithUserRow>) -> DbResult<Vec<PostWithUser>> {
    rows.into_iter()
        .map(PostWithUserRow::into_post_with_user)
        .collect()
}

/// Fold the rows of a single user's left join into one aggregate.
///
/// User id and name come from the first row. Rows without a post are
/// skipped; the remaining posts keep the order the store returned them in.
/// No rows at all means the user does not exist.
pub fn fold_user_with_posts(user_id: Identifier, rows: Vec<UserPostRow>) -> DbResult<UserWithPosts> {
    let mut rows = rows.into_iter();
    let UserPostRow {
        user_id: raw_id,
        user_name,
        post: first_post,
    } = rows.next().ok_or_else(|| DbError::not_found("user", user_id))?;

    let posts = first_post
        .into_iter()
        .chain(rows.filter_map(|row| row.post))
        .map(PostRow::into_post)
        .collect::<DbResult<Vec<_>>>()?;

    Ok(UserWithPosts {
        id: parse_id("user_id", &raw_id)?,
        name: user_name,
        posts,
    })
}
