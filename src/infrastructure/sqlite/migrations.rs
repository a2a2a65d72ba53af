use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS articles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source TEXT NOT NULL,
            author TEXT,
            title TEXT NOT NULL,
            description TEXT,
            url TEXT UNIQUE,
            content TEXT,
            published_at TEXT NOT NULL,
            collected_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sentiment_scores (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            article_id INTEGER NOT NULL UNIQUE REFERENCES articles(id),
            positive REAL NOT NULL,
            negative REAL NOT NULL,
            neutral REAL NOT NULL,
            compound REAL,
            model_used TEXT NOT NULL,
            analyzed_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS odds_snapshots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            bookmaker TEXT NOT NULL,
            market TEXT NOT NULL,
            american_odds INTEGER NOT NULL,
            decimal_odds REAL NOT NULL,
            implied_probability REAL NOT NULL,
            snapshot_at TEXT NOT NULL,
            collected_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_articles_published ON articles(published_at);
        CREATE INDEX IF NOT EXISTS idx_odds_snapshot ON odds_snapshots(snapshot_at);
        CREATE INDEX IF NOT EXISTS idx_odds_bookmaker ON odds_snapshots(bookmaker);
        "
    ).map_err(|e| format!("Migration failed: {e}"))
}
