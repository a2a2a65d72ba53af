use crate::domain::entities::article::{Article, NewArticle};
use crate::domain::entities::odds_snapshot::{NewOddsSnapshot, OddsSnapshot};
use crate::domain::entities::sentiment_score::{NewSentimentScore, SentimentScore};
use crate::domain::error::DomainError;
use crate::domain::ports::store::{ScoredArticle, Store, StoreSession, StoreStats};
use crate::infrastructure::sqlite::migrations::run_migrations;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock};

const ARTICLE_COLS: &str =
    "a.id, a.source, a.author, a.title, a.description, a.url, a.content, a.published_at, a.collected_at";
const SCORE_COLS: &str =
    "s.id, s.article_id, s.positive, s.negative, s.neutral, s.compound, s.model_used, s.analyzed_at";
const ODDS_COLS: &str =
    "id, bookmaker, market, american_odds, decimal_odds, implied_probability, snapshot_at, collected_at";

pub struct SqliteStore {
    db_path: String,
    conn: OnceLock<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path`. Missing parent directories
    /// are created; `":memory:"` opens a private in-memory database.
    pub fn open(db_path: &str) -> Result<Self, DomainError> {
        let store = Self::deferred(db_path);
        store.lock()?;
        Ok(store)
    }

    /// A store that touches the filesystem only when first used.
    pub fn deferred(db_path: &str) -> Self {
        Self {
            db_path: db_path.to_string(),
            conn: OnceLock::new(),
        }
    }

    fn connect(db_path: &str) -> Result<Connection, DomainError> {
        if db_path != ":memory:" {
            if let Some(parent) = Path::new(db_path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        DomainError::Database(format!(
                            "Cannot create directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
        }
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| DomainError::Database(format!("Foreign key error: {e}")))?;
        Ok(conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DomainError> {
        if self.conn.get().is_none() {
            let conn = Self::connect(&self.db_path)?;
            let _ = self.conn.set(Mutex::new(conn));
        }
        self.conn
            .get()
            .ok_or_else(|| DomainError::Database("connection not initialized".into()))?
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn row_to_article(row: &rusqlite::Row) -> Result<Article, rusqlite::Error> {
    let published_str: String = row.get(7)?;
    let collected_str: String = row.get(8)?;
    Ok(Article {
        id: row.get(0)?,
        source: row.get(1)?,
        author: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        url: row.get(5)?,
        content: row.get(6)?,
        published_at: parse_timestamp(&published_str),
        collected_at: parse_timestamp(&collected_str),
    })
}

/// Reads a sentiment score starting at column `offset`.
fn row_to_score(row: &rusqlite::Row, offset: usize) -> Result<SentimentScore, rusqlite::Error> {
    let analyzed_str: String = row.get(offset + 7)?;
    let compound: Option<f64> = row.get(offset + 5)?;
    let positive: f64 = row.get(offset + 2)?;
    let negative: f64 = row.get(offset + 3)?;
    Ok(SentimentScore {
        id: row.get(offset)?,
        article_id: row.get(offset + 1)?,
        positive,
        negative,
        neutral: row.get(offset + 4)?,
        compound: compound.unwrap_or(positive - negative),
        model_used: row.get(offset + 6)?,
        analyzed_at: parse_timestamp(&analyzed_str),
    })
}

fn row_to_snapshot(row: &rusqlite::Row) -> Result<OddsSnapshot, rusqlite::Error> {
    let snapshot_str: String = row.get(6)?;
    let collected_str: String = row.get(7)?;
    Ok(OddsSnapshot {
        id: row.get(0)?,
        bookmaker: row.get(1)?,
        market: row.get(2)?,
        american_odds: row.get(3)?,
        decimal_odds: row.get(4)?,
        implied_probability: row.get(5)?,
        snapshot_at: parse_timestamp(&snapshot_str),
        collected_at: parse_timestamp(&collected_str),
    })
}

impl Store for SqliteStore {
    fn init_schema(&self) -> Result<(), DomainError> {
        let conn = self.lock()?;
        run_migrations(&conn).map_err(DomainError::Database)
    }

    fn session(&self) -> Result<Box<dyn StoreSession + '_>, DomainError> {
        let conn = self.lock()?;
        conn.execute_batch("BEGIN")
            .map_err(|e| DomainError::Database(format!("Failed to begin transaction: {e}")))?;
        Ok(Box::new(SqliteSession { conn, open: true }))
    }

    fn stats(&self) -> Result<StoreStats, DomainError> {
        let conn = self.lock()?;
        let total_articles: usize =
            conn.query_row("SELECT COUNT(*) FROM articles", [], |r| r.get(0))?;
        let scored_articles: usize =
            conn.query_row("SELECT COUNT(*) FROM sentiment_scores", [], |r| r.get(0))?;
        let total_odds_snapshots: usize =
            conn.query_row("SELECT COUNT(*) FROM odds_snapshots", [], |r| r.get(0))?;
        let average_compound: Option<f64> = conn.query_row(
            "SELECT AVG(compound) FROM sentiment_scores",
            [],
            |r| r.get(0),
        )?;
        let latest_odds = conn
            .query_row(
                &format!(
                    "SELECT {ODDS_COLS} FROM odds_snapshots ORDER BY collected_at DESC, id DESC LIMIT 1"
                ),
                [],
                row_to_snapshot,
            )
            .optional()?;

        Ok(StoreStats {
            total_articles,
            scored_articles,
            unscored_articles: total_articles.saturating_sub(scored_articles),
            total_odds_snapshots,
            average_compound,
            latest_odds,
        })
    }

    fn recent_articles(&self, limit: usize) -> Result<Vec<ScoredArticle>, DomainError> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {ARTICLE_COLS}, {SCORE_COLS} FROM articles a
             LEFT JOIN sentiment_scores s ON s.article_id = a.id
             ORDER BY a.published_at DESC, a.id DESC LIMIT ?1"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![limit as i64], |row| {
                let score_id: Option<i64> = row.get(9)?;
                let sentiment = match score_id {
                    Some(_) => Some(row_to_score(row, 9)?),
                    None => None,
                };
                Ok(ScoredArticle {
                    article: row_to_article(row)?,
                    sentiment,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn recent_odds(&self, limit: usize) -> Result<Vec<OddsSnapshot>, DomainError> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {ODDS_COLS} FROM odds_snapshots ORDER BY snapshot_at DESC, id DESC LIMIT ?1"
        );
        let mut stmt = conn.prepare(&sql)?;
        let snapshots = stmt
            .query_map(params![limit as i64], row_to_snapshot)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(snapshots)
    }

    fn sentiment_for_article(&self, article_id: i64) -> Result<Option<SentimentScore>, DomainError> {
        let conn = self.lock()?;
        let sql = format!("SELECT {SCORE_COLS} FROM sentiment_scores s WHERE s.article_id = ?1");
        let score = conn
            .query_row(&sql, params![article_id], |row| row_to_score(row, 0))
            .optional()?;
        Ok(score)
    }
}

/// Transaction over the locked connection. Rolls back on drop unless committed.
pub struct SqliteSession<'a> {
    conn: MutexGuard<'a, Connection>,
    open: bool,
}

impl SqliteSession<'_> {
    fn finish(&mut self, statement: &str) -> Result<(), DomainError> {
        self.conn
            .execute_batch(statement)
            .map_err(|e| DomainError::Database(format!("{statement} failed: {e}")))?;
        self.open = false;
        Ok(())
    }
}

impl StoreSession for SqliteSession<'_> {
    fn find_article_by_url(&mut self, url: &str) -> Result<Option<Article>, DomainError> {
        let sql = format!("SELECT {ARTICLE_COLS} FROM articles a WHERE a.url = ?1 LIMIT 1");
        let article = self
            .conn
            .query_row(&sql, params![url], row_to_article)
            .optional()?;
        Ok(article)
    }

    fn insert_article(&mut self, article: &NewArticle) -> Result<i64, DomainError> {
        self.conn
            .execute(
                "INSERT INTO articles (source, author, title, description, url, content, published_at, collected_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    article.source,
                    article.author,
                    article.title,
                    article.description,
                    article.url,
                    article.content,
                    article.published_at.to_rfc3339(),
                    article.collected_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to add article: {e}")))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn insert_odds_snapshot(&mut self, snapshot: &NewOddsSnapshot) -> Result<i64, DomainError> {
        self.conn
            .execute(
                "INSERT INTO odds_snapshots (bookmaker, market, american_odds, decimal_odds, implied_probability, snapshot_at, collected_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    snapshot.bookmaker,
                    snapshot.market,
                    snapshot.american_odds,
                    snapshot.decimal_odds,
                    snapshot.implied_probability,
                    snapshot.snapshot_at.to_rfc3339(),
                    snapshot.collected_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to add odds snapshot: {e}")))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn articles_without_sentiment(&mut self) -> Result<Vec<Article>, DomainError> {
        let sql = format!(
            "SELECT {ARTICLE_COLS} FROM articles a
             LEFT JOIN sentiment_scores s ON s.article_id = a.id
             WHERE s.id IS NULL ORDER BY a.id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let articles = stmt
            .query_map([], row_to_article)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(articles)
    }

    fn insert_sentiment_score(&mut self, score: &NewSentimentScore) -> Result<i64, DomainError> {
        self.conn
            .execute(
                "INSERT INTO sentiment_scores (article_id, positive, negative, neutral, compound, model_used, analyzed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    score.article_id,
                    score.scores.positive,
                    score.scores.negative,
                    score.scores.neutral,
                    score.scores.compound,
                    score.model_used,
                    score.analyzed_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to add sentiment score: {e}")))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn commit(mut self: Box<Self>) -> Result<(), DomainError> {
        self.finish("COMMIT")
    }

    fn rollback(mut self: Box<Self>) -> Result<(), DomainError> {
        self.finish("ROLLBACK")
    }
}

impl Drop for SqliteSession<'_> {
    fn drop(&mut self) {
        if self.open {
            if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                tracing::warn!(error = %e, "rollback on session drop failed");
            }
        }
    }
}
