//! Integration tests for the session system: manager, actors, players,
//! and tallies working together.
//!
//! Time-dependent behavior (TTL expiry, rate limiting) is driven by
//! config — zero durations expire/allow immediately, one-hour durations
//! never do within a test — instead of sleeping.

use std::time::Duration;

use wordwall_protocol::SessionStatus;
use wordwall_session::{SessionConfig, SessionError, SessionManager};
use wordwall_tally::WordError;

// =========================================================================
// Helpers
// =========================================================================

/// Config for the common case: long TTL, no rate limit.
fn open_config() -> SessionConfig {
    SessionConfig {
        ttl: Duration::from_secs(3600),
        min_submit_interval: Duration::ZERO,
        ..SessionConfig::default()
    }
}

/// Config whose sessions are expired from the first access.
fn instant_expiry_config() -> SessionConfig {
    SessionConfig {
        ttl: Duration::ZERO,
        min_submit_interval: Duration::ZERO,
        ..SessionConfig::default()
    }
}

/// Config whose rate-limit window never elapses within a test.
fn strict_rate_limit_config() -> SessionConfig {
    SessionConfig {
        ttl: Duration::from_secs(3600),
        min_submit_interval: Duration::from_secs(3600),
        ..SessionConfig::default()
    }
}

// =========================================================================
// SessionManager: creation and lookup
// =========================================================================

#[tokio::test]
async fn test_create_returns_code_and_host_token() {
    let mut mgr = SessionManager::new(open_config());

    let created = mgr.create().expect("should allocate");

    assert_eq!(created.code.len(), 6);
    assert_eq!(created.host_token.len(), 24);
    assert_eq!(mgr.len(), 1);
}

#[tokio::test]
async fn test_create_many_sessions_unique_codes_and_ids() {
    let mut mgr = SessionManager::new(open_config());
    let mut codes = std::collections::HashSet::new();
    let mut ids = std::collections::HashSet::new();

    for _ in 0..50 {
        let created = mgr.create().unwrap();
        assert!(codes.insert(created.code), "duplicate code allocated");
        assert!(ids.insert(created.session_id), "duplicate id allocated");
    }
    assert_eq!(mgr.session_ids().len(), 50);
}

#[tokio::test]
async fn test_get_by_code_canonicalizes_typed_input() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();

    let typed = format!("  {}  ", created.code.to_lowercase());
    let handle = mgr.get_by_code(&typed).expect("should find session");

    assert_eq!(handle.session_id(), created.session_id);
}

#[tokio::test]
async fn test_get_by_code_unknown_returns_none() {
    let mgr = SessionManager::new(open_config());
    assert!(mgr.get_by_code("ZZZZZZ").is_none());
}

#[tokio::test]
async fn test_remove_frees_code_and_stops_actor() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap().clone();

    mgr.remove(created.session_id).await.unwrap();

    assert!(mgr.is_empty());
    assert!(mgr.get_by_code(&created.code).is_none());

    // The actor's mailbox is gone; commands now fail fast.
    let result = handle.join("Ann").await;
    assert!(matches!(result, Err(SessionError::Disconnected(_))));
}

#[tokio::test]
async fn test_remove_unknown_session_returns_not_found() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    mgr.remove(created.session_id).await.unwrap();

    let result = mgr.remove(created.session_id).await;
    assert!(matches!(result, Err(SessionError::NotFound(_))));
}

// =========================================================================
// Joining
// =========================================================================

#[tokio::test]
async fn test_join_returns_ticket_with_canonical_code() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    let ticket = handle.join("Ann").await.expect("should join");

    assert_eq!(ticket.session_id, created.session_id);
    assert_eq!(ticket.code, created.code);
    assert_eq!(ticket.player_token.len(), 24);
}

#[tokio::test]
async fn test_join_duplicate_name_returns_name_taken() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    handle.join("Ann").await.unwrap();
    let result = handle.join("Ann").await;

    assert!(matches!(result, Err(SessionError::NameTaken)));
}

#[tokio::test]
async fn test_join_same_name_in_different_sessions_succeeds() {
    let mut mgr = SessionManager::new(open_config());
    let first = mgr.create().unwrap();
    let second = mgr.create().unwrap();

    mgr.get(&first.session_id).unwrap().join("Ann").await.unwrap();
    let result = mgr.get(&second.session_id).unwrap().join("Ann").await;

    assert!(result.is_ok(), "names are scoped per session");
}

#[tokio::test]
async fn test_join_blank_name_returns_name_required() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    let result = handle.join("   ").await;

    assert!(matches!(result, Err(SessionError::NameRequired)));
}

#[tokio::test]
async fn test_join_expired_session_returns_unavailable() {
    let mut mgr = SessionManager::new(instant_expiry_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    let result = handle.join("Ann").await;

    assert!(matches!(result, Err(SessionError::Unavailable)));
}

// =========================================================================
// Submitting
// =========================================================================

#[tokio::test]
async fn test_submit_normalizes_and_counts() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();
    let ticket = handle.join("Ann").await.unwrap();

    handle
        .submit(ticket.player_id, &ticket.player_token, "  Hello! ")
        .await
        .expect("should accept");

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.words.len(), 1);
    assert_eq!(snapshot.words[0].word, "hello");
    assert_eq!(snapshot.words[0].count, 1);
    assert_eq!(snapshot.player_count, 1);
}

#[tokio::test]
async fn test_submit_wrong_token_returns_invalid_token() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();
    let ticket = handle.join("Ann").await.unwrap();

    let result = handle
        .submit(ticket.player_id, "not-the-token", "hello")
        .await;

    assert!(matches!(result, Err(SessionError::InvalidToken)));
}

#[tokio::test]
async fn test_submit_unknown_player_returns_player_not_found() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    let result = handle
        .submit(wordwall_protocol::PlayerId(u64::MAX), "token", "hello")
        .await;

    assert!(matches!(result, Err(SessionError::PlayerNotFound(_))));
}

#[tokio::test]
async fn test_submit_player_from_other_session_is_unknown() {
    let mut mgr = SessionManager::new(open_config());
    let first = mgr.create().unwrap();
    let second = mgr.create().unwrap();
    let ticket = mgr.get(&first.session_id).unwrap().join("Ann").await.unwrap();

    // Valid credentials, wrong session: the id doesn't exist there.
    let result = mgr
        .get(&second.session_id)
        .unwrap()
        .submit(ticket.player_id, &ticket.player_token, "hello")
        .await;

    assert!(matches!(result, Err(SessionError::PlayerNotFound(_))));
}

#[tokio::test]
async fn test_submit_blocked_word_rejected_without_state_change() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();
    let ticket = handle.join("Ann").await.unwrap();

    let result = handle
        .submit(ticket.player_id, &ticket.player_token, "HATE")
        .await;
    assert!(matches!(result, Err(SessionError::Word(WordError::Blocked))));

    let snapshot = handle.snapshot().await.unwrap();
    assert!(snapshot.words.is_empty(), "rejected word must not be tallied");
}

#[tokio::test]
async fn test_submit_unnormalizable_word_returns_empty() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();
    let ticket = handle.join("Ann").await.unwrap();

    let result = handle
        .submit(ticket.player_id, &ticket.player_token, "!!??")
        .await;

    assert!(matches!(result, Err(SessionError::Word(WordError::Empty))));
}

#[tokio::test]
async fn test_submit_expired_session_returns_closed() {
    let mut mgr = SessionManager::new(instant_expiry_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    let result = handle
        .submit(wordwall_protocol::PlayerId(1), "token", "hello")
        .await;

    // Expiry is checked before anything else.
    assert!(matches!(result, Err(SessionError::Closed)));
}

// =========================================================================
// Rate limiting
// =========================================================================

#[tokio::test]
async fn test_second_submit_within_interval_is_rate_limited() {
    let mut mgr = SessionManager::new(strict_rate_limit_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();
    let ticket = handle.join("Ann").await.unwrap();

    handle
        .submit(ticket.player_id, &ticket.player_token, "apple")
        .await
        .unwrap();
    let result = handle
        .submit(ticket.player_id, &ticket.player_token, "apple")
        .await;

    assert!(matches!(result, Err(SessionError::RateLimited)));

    // The rejected submission must not have touched the tally.
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.words[0].count, 1);
}

#[tokio::test]
async fn test_submit_accepted_again_after_interval_elapses() {
    let config = SessionConfig {
        ttl: Duration::from_secs(3600),
        min_submit_interval: Duration::from_millis(20),
        ..SessionConfig::default()
    };
    let mut mgr = SessionManager::new(config);
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();
    let ticket = handle.join("Ann").await.unwrap();

    handle
        .submit(ticket.player_id, &ticket.player_token, "apple")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;
    handle
        .submit(ticket.player_id, &ticket.player_token, "apple")
        .await
        .expect("interval elapsed, should accept");

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.words[0].count, 2);
}

#[tokio::test]
async fn test_rate_limit_is_per_player_not_global() {
    let mut mgr = SessionManager::new(strict_rate_limit_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();
    let ann = handle.join("Ann").await.unwrap();
    let ben = handle.join("Ben").await.unwrap();

    handle
        .submit(ann.player_id, &ann.player_token, "apple")
        .await
        .unwrap();

    // Ann is throttled; Ben submits freely.
    handle
        .submit(ben.player_id, &ben.player_token, "apple")
        .await
        .expect("other players are unaffected");
}

#[tokio::test]
async fn test_same_player_racing_two_submissions_passes_exactly_once() {
    let mut mgr = SessionManager::new(strict_rate_limit_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap().clone();
    let ticket = handle.join("Ann").await.unwrap();

    let h1 = handle.clone();
    let h2 = handle.clone();
    let (id, token) = (ticket.player_id, ticket.player_token.clone());
    let token2 = ticket.player_token.clone();

    let (r1, r2) = tokio::join!(
        tokio::spawn(async move { h1.submit(id, &token, "apple").await }),
        tokio::spawn(async move { h2.submit(id, &token2, "apple").await }),
    );
    let results = [r1.unwrap(), r2.unwrap()];

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    let limited = results
        .iter()
        .filter(|r| matches!(r, Err(SessionError::RateLimited)))
        .count();

    assert_eq!(accepted, 1, "exactly one racing submission may pass");
    assert_eq!(limited, 1);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.words[0].count, 1);
}

// =========================================================================
// Concurrent counting
// =========================================================================

#[tokio::test]
async fn test_fifty_concurrent_submissions_lose_no_increment() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap().clone();

    let mut tickets = Vec::new();
    for i in 0..50 {
        tickets.push(handle.join(&format!("player-{i}")).await.unwrap());
    }

    let mut tasks = Vec::new();
    for ticket in tickets {
        let handle = handle.clone();
        tasks.push(tokio::spawn(async move {
            handle
                .submit(ticket.player_id, &ticket.player_token, "apple")
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().expect("every submission should be accepted");
    }

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.words[0].word, "apple");
    assert_eq!(snapshot.words[0].count, 50, "no lost updates");
}

// =========================================================================
// Closing and expiry
// =========================================================================

#[tokio::test]
async fn test_close_rejects_further_joins_and_submissions() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();
    let ticket = handle.join("Ann").await.unwrap();

    handle.close(&created.host_token).await.unwrap();

    assert!(matches!(
        handle.join("Ben").await,
        Err(SessionError::Unavailable)
    ));
    assert!(matches!(
        handle
            .submit(ticket.player_id, &ticket.player_token, "apple")
            .await,
        Err(SessionError::Closed)
    ));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.status, SessionStatus::Closed);
}

#[tokio::test]
async fn test_close_wrong_token_returns_unauthorized() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    let result = handle.close("not-the-host-token").await;

    assert!(matches!(result, Err(SessionError::Unauthorized)));
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.status, SessionStatus::Active);
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    handle.close(&created.host_token).await.unwrap();
    handle
        .close(&created.host_token)
        .await
        .expect("second close is a no-op success");
}

#[tokio::test]
async fn test_expired_session_reports_closed_on_next_access() {
    let mut mgr = SessionManager::new(instant_expiry_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    // No scheduled closer has run; the snapshot itself applies expiry.
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.status, SessionStatus::Closed);
}

#[tokio::test]
async fn test_expire_signal_is_noop_within_ttl() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    // A stray early Expire must not close a live session.
    handle.expire().await.unwrap();

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.status, SessionStatus::Active);
}

#[tokio::test]
async fn test_expire_signal_tolerates_already_closed() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    handle.close(&created.host_token).await.unwrap();
    handle.expire().await.unwrap();

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.status, SessionStatus::Closed);
}

// =========================================================================
// Restore flows
// =========================================================================

#[tokio::test]
async fn test_restore_host_returns_code_while_active() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    let resume = handle.restore_host(&created.host_token).await;

    assert_eq!(resume.map(|r| r.code), Some(created.code));
}

#[tokio::test]
async fn test_restore_host_wrong_token_returns_none() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    assert!(handle.restore_host("bogus").await.is_none());
}

#[tokio::test]
async fn test_restore_host_closed_session_returns_none() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();
    handle.close(&created.host_token).await.unwrap();

    assert!(handle.restore_host(&created.host_token).await.is_none());
}

#[tokio::test]
async fn test_restore_player_returns_code_and_name() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();
    let ticket = handle.join("Ann").await.unwrap();

    let resume = handle
        .restore_player(ticket.player_id, &ticket.player_token)
        .await
        .expect("should resume");

    assert_eq!(resume.code, created.code);
    assert_eq!(resume.name, "Ann");
}

#[tokio::test]
async fn test_restore_player_bad_credentials_returns_none() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();
    let ticket = handle.join("Ann").await.unwrap();

    assert!(handle.restore_player(ticket.player_id, "bogus").await.is_none());
    assert!(
        handle
            .restore_player(wordwall_protocol::PlayerId(u64::MAX), &ticket.player_token)
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_restore_player_expired_session_returns_none() {
    let mut mgr = SessionManager::new(instant_expiry_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    let resume = handle
        .restore_player(wordwall_protocol::PlayerId(1), "token")
        .await;

    assert!(resume.is_none());
}

// =========================================================================
// Snapshot ranking
// =========================================================================

#[tokio::test]
async fn test_snapshot_ranking_breaks_ties_lexicographically() {
    let mut mgr = SessionManager::new(open_config());
    let created = mgr.create().unwrap();
    let handle = mgr.get(&created.session_id).unwrap();

    // Three players so the per-player limit never interferes; counts:
    // bee 3, ant 3, cat 2.
    let mut tickets = Vec::new();
    for name in ["Ann", "Ben", "Cid"] {
        tickets.push(handle.join(name).await.unwrap());
    }
    for (player, words) in tickets.iter().zip([
        vec!["bee", "ant", "cat"],
        vec!["bee", "ant", "cat"],
        vec!["bee", "ant"],
    ]) {
        for word in words {
            handle
                .submit(player.player_id, &player.player_token, word)
                .await
                .unwrap();
        }
    }

    let snapshot = handle.snapshot().await.unwrap();
    let ranked: Vec<(&str, u64)> = snapshot
        .words
        .iter()
        .map(|w| (w.word.as_str(), w.count))
        .collect();

    assert_eq!(ranked, vec![("ant", 3), ("bee", 3), ("cat", 2)]);
    assert_eq!(snapshot.top_word.unwrap().word, "ant");
}
