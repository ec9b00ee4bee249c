//! Live-database integration tests for the vote store.
//!
//! These run against a real, disposable PostgreSQL database and are ignored
//! by default. Point `DATABASE_URL` (env or `.env`) at a scratch database,
//! then run:
//!
//! ```text
//! cargo test -p database -- --ignored --test-threads=1
//! ```
//!
//! Single-threaded because the tests share one `votes` table.

use chrono::Utc;
use core_types::Candidate;
use database::{DbError, VoteStore};
use futures::future::join_all;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::{Duration, Instant};

async fn test_pool(max_connections: u32, acquire_timeout: Duration) -> PgPool {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a scratch database");
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(&url)
        .await
        .expect("failed to connect to the test database");
    database::run_migrations(&pool)
        .await
        .expect("failed to apply the votes schema");
    pool
}

async fn store() -> VoteStore {
    VoteStore::new(test_pool(5, Duration::from_secs(5)).await)
}

#[tokio::test]
#[ignore]
async fn cast_vote_increments_the_candidate_count_by_exactly_one() {
    let store = store().await;
    let before = store.count_by_candidate(Candidate::Tabs).await.unwrap();
    let floor = Utc::now();

    store.insert_vote(Candidate::Tabs, Utc::now()).await.unwrap();

    let after = store.count_by_candidate(Candidate::Tabs).await.unwrap();
    assert_eq!(after, before + 1);

    let recent = store.recent_votes(1).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].candidate, Candidate::Tabs);
    // The schema stores microseconds, so compare with a little slack.
    assert!(recent[0].time_cast >= floor - chrono::Duration::milliseconds(1));
}

#[tokio::test]
#[ignore]
async fn recent_votes_respects_the_limit_and_orders_newest_first() {
    let store = store().await;
    for candidate in [Candidate::Tabs, Candidate::Spaces, Candidate::Tabs] {
        store.insert_vote(candidate, Utc::now()).await.unwrap();
    }

    let recent = store.recent_votes(2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert!(recent[0].time_cast >= recent[1].time_cast);

    let all_recent = store.recent_votes(1000).await.unwrap();
    for pair in all_recent.windows(2) {
        assert!(pair[0].time_cast >= pair[1].time_cast);
    }
}

#[tokio::test]
#[ignore]
async fn counting_an_empty_table_returns_zero_not_an_error() {
    let pool = test_pool(5, Duration::from_secs(5)).await;
    sqlx::query("TRUNCATE votes").execute(&pool).await.unwrap();
    let store = VoteStore::new(pool);

    assert_eq!(store.count_by_candidate(Candidate::Tabs).await.unwrap(), 0);
    assert_eq!(store.count_by_candidate(Candidate::Spaces).await.unwrap(), 0);
    assert!(store.recent_votes(5).await.unwrap().is_empty());

    let tally = store.tally().await.unwrap();
    assert_eq!(tally.tab_count, 0);
    assert_eq!(tally.space_count, 0);
}

#[tokio::test]
#[ignore]
async fn a_single_tabs_vote_yields_a_one_zero_index_state() {
    let pool = test_pool(5, Duration::from_secs(5)).await;
    sqlx::query("TRUNCATE votes").execute(&pool).await.unwrap();
    let store = VoteStore::new(pool);

    let t0 = Utc::now();
    let inserted = store.insert_vote(Candidate::Tabs, t0).await.unwrap();

    // The index page is assembled from exactly these two reads.
    let tally = store.tally().await.unwrap();
    assert_eq!(tally.tab_count, 1);
    assert_eq!(tally.space_count, 0);

    let recent = store.recent_votes(5).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].vote_id, inserted.vote_id);
    assert_eq!(recent[0].candidate, Candidate::Tabs);
    // The timestamp column keeps microseconds, so the readback may drop
    // sub-microsecond precision relative to the writer's clock.
    assert!((recent[0].time_cast - t0).num_milliseconds().abs() < 1);
}

#[tokio::test]
#[ignore]
async fn concurrent_casts_lose_and_duplicate_nothing() {
    let store = store().await;
    let tabs_before = store.count_by_candidate(Candidate::Tabs).await.unwrap();
    let spaces_before = store.count_by_candidate(Candidate::Spaces).await.unwrap();

    let tasks: Vec<_> = (0..50)
        .map(|i| {
            let store = store.clone();
            let candidate = if i % 2 == 0 { Candidate::Tabs } else { Candidate::Spaces };
            tokio::spawn(async move { store.insert_vote(candidate, Utc::now()).await })
        })
        .collect();

    let mut tabs_ok = 0;
    let mut spaces_ok = 0;
    for result in join_all(tasks).await {
        match result.unwrap() {
            Ok(vote) if vote.candidate == Candidate::Tabs => tabs_ok += 1,
            Ok(_) => spaces_ok += 1,
            Err(e) => panic!("concurrent insert failed: {e}"),
        }
    }
    assert_eq!(tabs_ok + spaces_ok, 50);

    let tabs_after = store.count_by_candidate(Candidate::Tabs).await.unwrap();
    let spaces_after = store.count_by_candidate(Candidate::Spaces).await.unwrap();
    assert_eq!(tabs_after, tabs_before + tabs_ok);
    assert_eq!(spaces_after, spaces_before + spaces_ok);
}

#[tokio::test]
#[ignore]
async fn an_exhausted_pool_times_out_instead_of_deadlocking() {
    let pool = test_pool(1, Duration::from_secs(1)).await;
    let store = VoteStore::new(pool.clone());

    // Hold the pool's only connection so the store has nothing to acquire.
    let _held = pool.acquire().await.unwrap();

    let started = Instant::now();
    let result = store.count_by_candidate(Candidate::Tabs).await;
    let waited = started.elapsed();

    assert!(matches!(result, Err(DbError::PoolTimeout)), "got {result:?}");
    assert!(waited >= Duration::from_millis(900));
    assert!(waited < Duration::from_secs(10), "acquire did not respect its bound");
}

#[tokio::test]
#[ignore]
async fn released_connections_are_reused_after_the_unit_of_work_ends() {
    // Pool of one: consecutive operations can only succeed if each one
    // releases its connection on the way out.
    let pool = test_pool(1, Duration::from_secs(1)).await;
    let store = VoteStore::new(pool);

    for _ in 0..3 {
        store.insert_vote(Candidate::Spaces, Utc::now()).await.unwrap();
        store.tally().await.unwrap();
    }
}
