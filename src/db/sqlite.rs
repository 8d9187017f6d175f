use crate::db::models::{Category, NewQuestion, Question};
use crate::db::schema::{SQLITE_INIT, SQLITE_SEED};
use crate::error::TriviaError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, QueryBuilder, Sqlite, SqliteConnection};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

const QUESTION_COLUMNS: &str = "SELECT id, question, answer, category, difficulty FROM questions";

/// Open a pool for `database_url`, creating the file if needed.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, TriviaError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(connect_opts)
        .await?;
    Ok(pool)
}

/// Which questions a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFilter {
    All,
    Category(i64),
}

/// One page of an ordered listing plus the size of the whole listing.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total: i64,
}

#[derive(Clone)]
pub struct TriviaStorage {
    pool: SqlitePool,
}

impl TriviaStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), TriviaError> {
        self.execute_script(SQLITE_INIT).await
    }

    /// Insert the bundled sample categories and questions.
    pub async fn seed(&self) -> Result<(), TriviaError> {
        self.execute_script(SQLITE_SEED).await
    }

    async fn execute_script(&self, script: &str) -> Result<(), TriviaError> {
        // sqlx::query runs one statement at a time
        let mut tx = self.pool.begin().await?;
        for stmt in script.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, TriviaError> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_category(&self, id: i64) -> Result<Option<Category>, TriviaError> {
        let mut conn = self.pool.acquire().await?;
        fetch_category(&mut *conn, id).await
    }

    pub async fn get_question(&self, id: i64) -> Result<Option<Question>, TriviaError> {
        let row = sqlx::query_as::<_, Question>(&format!("{QUESTION_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Questions ordered by id, `limit` rows starting at `offset`.
    pub async fn list_questions(
        &self,
        filter: QuestionFilter,
        limit: i64,
        offset: i64,
    ) -> Result<QuestionPage, TriviaError> {
        let mut conn = self.pool.acquire().await?;
        page_of(&mut *conn, filter, limit, offset).await
    }

    /// Case-insensitive substring match on question text, ordered by id.
    pub async fn search_questions(&self, term: &str) -> Result<Vec<Question>, TriviaError> {
        let rows = sqlx::query_as::<_, Question>(&format!(
            r"{QUESTION_COLUMNS} WHERE question LIKE ? ESCAPE '\' ORDER BY id"
        ))
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a question and read back the requested page in one transaction.
    /// The insert is the first statement so the write lock is taken up front;
    /// an unknown category fails the foreign key and nothing is written.
    pub async fn create_question(
        &self,
        new: NewQuestion,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, QuestionPage), TriviaError> {
        let mut tx = self.pool.begin().await?;

        let category = new.category;
        let id = sqlx::query(
            "INSERT INTO questions (question, answer, category, difficulty) VALUES (?, ?, ?, ?)",
        )
        .bind(new.question)
        .bind(new.answer)
        .bind(new.category)
        .bind(new.difficulty)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                TriviaError::unprocessable(format!("unknown category {category}"))
            }
            other => TriviaError::DatabaseError(other),
        })?
        .last_insert_rowid();

        let page = page_of(&mut *tx, QuestionFilter::All, limit, offset).await?;
        tx.commit().await?;
        Ok((id, page))
    }

    /// Delete by id and read back the requested page in one transaction.
    /// Returns `None` (and changes nothing) when the id does not exist.
    pub async fn delete_question(
        &self,
        id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Option<QuestionPage>, TriviaError> {
        let mut tx = self.pool.begin().await?;
        let affected = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if affected == 0 {
            debug!(id, "delete target missing");
            return Ok(None);
        }
        let page = page_of(&mut *tx, QuestionFilter::All, limit, offset).await?;
        tx.commit().await?;
        Ok(Some(page))
    }

    /// Questions matching `filter` whose id is not in `exclude`.
    pub async fn quiz_candidates(
        &self,
        filter: QuestionFilter,
        exclude: &[i64],
    ) -> Result<Vec<Question>, TriviaError> {
        let mut qb = QueryBuilder::<Sqlite>::new(QUESTION_COLUMNS);
        qb.push(" WHERE 1 = 1");
        push_filter(&mut qb, filter);
        if !exclude.is_empty() {
            // one JSON parameter regardless of list length
            let ids = serde_json::to_string(exclude).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
            qb.push(" AND id NOT IN (SELECT value FROM json_each(");
            qb.push_bind(ids);
            qb.push("))");
        }
        qb.push(" ORDER BY id");
        let rows = qb
            .build_query_as::<Question>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

async fn fetch_category(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Category>, TriviaError> {
    let row = sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

async fn page_of(
    conn: &mut SqliteConnection,
    filter: QuestionFilter,
    limit: i64,
    offset: i64,
) -> Result<QuestionPage, TriviaError> {
    let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM questions WHERE 1 = 1");
    push_filter(&mut count, filter);
    let total: i64 = count
        .build_query_scalar::<i64>()
        .fetch_one(&mut *conn)
        .await?;

    let mut qb = QueryBuilder::<Sqlite>::new(QUESTION_COLUMNS);
    qb.push(" WHERE 1 = 1");
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY id LIMIT ");
    qb.push_bind(limit);
    qb.push(" OFFSET ");
    qb.push_bind(offset);
    let questions = qb
        .build_query_as::<Question>()
        .fetch_all(&mut *conn)
        .await?;

    Ok(QuestionPage { questions, total })
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: QuestionFilter) {
    if let QuestionFilter::Category(id) = filter {
        qb.push(" AND category = ");
        qb.push_bind(id);
    }
}

/// `%term%` with LIKE wildcards in the term matched literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
