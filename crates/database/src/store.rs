use crate::error::DbError;
use chrono::{DateTime, NaiveDateTime, Utc};
use core_types::{Candidate, Tally, Vote};
use sqlx::postgres::PgPool;
use sqlx::FromRow;

/// The `VoteStore` is the only component that issues SQL statements. It
/// encapsulates the `votes` schema and every query shape, and borrows the
/// shared pool for exactly one acquire-use-release cycle per operation.
///
/// All parameters are bound, never interpolated into statement text.
#[derive(Debug, Clone)]
pub struct VoteStore {
    pool: PgPool,
}

/// A raw row from the `votes` table. The `candidate` column is text in the
/// database; conversion into the closed enum happens in `into_vote`, and the
/// `timestamp` column is naive UTC by schema.
#[derive(Debug, FromRow)]
struct VoteRow {
    vote_id: i32,
    candidate: String,
    time_cast: NaiveDateTime,
}

impl VoteRow {
    fn into_vote(self) -> Result<Vote, DbError> {
        let candidate = Candidate::parse(&self.candidate).map_err(|_| {
            DbError::CorruptRow(format!(
                "vote {} holds unknown candidate '{}'",
                self.vote_id, self.candidate
            ))
        })?;
        Ok(Vote {
            vote_id: self.vote_id,
            candidate,
            time_cast: DateTime::from_naive_utc_and_offset(self.time_cast, Utc),
        })
    }
}

impl VoteStore {
    /// Creates a new `VoteStore` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts one vote record inside a single transaction and commits before
    /// returning. On any failure the transaction guard rolls back as it
    /// drops, so a partial write is never observable.
    pub async fn insert_vote(
        &self,
        candidate: Candidate,
        time_cast: DateTime<Utc>,
    ) -> Result<Vote, DbError> {
        let mut tx = self.pool.begin().await?;

        let (vote_id,): (i32,) = sqlx::query_as(
            "INSERT INTO votes (time_cast, candidate) VALUES ($1, $2) RETURNING vote_id",
        )
        .bind(time_cast.naive_utc())
        .bind(candidate.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(vote_id, candidate = %candidate, "Vote committed");
        Ok(Vote {
            vote_id,
            candidate,
            time_cast,
        })
    }

    /// Returns the `limit` most recently cast votes, newest first. The
    /// surrogate key breaks timestamp ties so the order stays consistent
    /// with insertion order.
    pub async fn recent_votes(&self, limit: i64) -> Result<Vec<Vote>, DbError> {
        let rows: Vec<VoteRow> = sqlx::query_as(
            "SELECT vote_id, candidate, time_cast FROM votes \
             ORDER BY time_cast DESC, vote_id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(VoteRow::into_vote).collect()
    }

    /// Counts the rows matching `candidate` exactly. A candidate nobody has
    /// voted for yields zero, not an error.
    pub async fn count_by_candidate(&self, candidate: Candidate) -> Result<i64, DbError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(vote_id) FROM votes WHERE candidate = $1")
                .bind(candidate.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Recomputes the per-candidate tally from the vote records. Always
    /// fresh; nothing is cached across requests.
    pub async fn tally(&self) -> Result<Tally, DbError> {
        let mut tally = Tally::default();
        for candidate in Candidate::ALL {
            let count = self.count_by_candidate(candidate).await?;
            tally.set_count(candidate, count);
        }
        Ok(tally)
    }

    /// Reads the whole table back in insertion order. Used by the `check-db`
    /// maintenance command, not by the request path.
    pub async fn all_votes(&self) -> Result<Vec<Vote>, DbError> {
        let rows: Vec<VoteRow> =
            sqlx::query_as("SELECT vote_id, candidate, time_cast FROM votes ORDER BY vote_id")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(VoteRow::into_vote).collect()
    }
}
