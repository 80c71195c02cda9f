//! End-to-end demo: one host, a handful of players, a live tally.
//!
//! Runs entirely in-process. The JSON printed at the end is exactly what
//! a word-cloud view would receive.
//!
//! ```text
//! RUST_LOG=debug cargo run -p word-wall
//! ```

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use wordwall::{Codec, JsonCodec, SessionConfig, WordWallError, WordWallService};

#[tokio::main]
async fn main() -> Result<(), WordWallError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let service = WordWallService::new(SessionConfig {
        // Short interval so the demo finishes quickly; production keeps
        // the 800 ms default.
        min_submit_interval: Duration::from_millis(50),
        ..SessionConfig::default()
    });

    let created = service.create_session().await?;
    tracing::info!(code = %created.code, "host opened a session");

    // Players join with the code as a human would type it.
    let typed_code = created.code.to_lowercase();
    let mut tasks = Vec::new();
    for (name, words) in [
        ("Ann", vec!["Rust!", "tokio", "rust"]),
        ("Ben", vec!["Tokio", "rust", "serde"]),
        ("Cid", vec!["rust", "Serde", "tracing"]),
        ("Dee", vec!["tokio", "rust"]),
    ] {
        let service = service.clone();
        let code = typed_code.clone();
        tasks.push(tokio::spawn(async move {
            let ticket = service.join_session(&code, name).await?;
            for word in words {
                service
                    .submit_word(
                        ticket.session_id,
                        ticket.player_id,
                        &ticket.player_token,
                        word,
                    )
                    .await?;
                tokio::time::sleep(Duration::from_millis(60)).await;
            }
            Ok::<_, WordWallError>(())
        }));
    }
    for task in tasks {
        task.await.expect("player task panicked")?;
    }

    let snapshot = service
        .snapshot(&created.code)
        .await
        .expect("session exists");
    let top = snapshot.top_word.as_ref().expect("tally is non-empty");
    tracing::info!(
        players = snapshot.player_count,
        words = snapshot.words.len(),
        top = %top.word,
        count = top.count,
        "live tally"
    );

    println!(
        "{}",
        String::from_utf8(JsonCodec.encode(&snapshot)?).expect("json is utf-8")
    );

    service
        .close_session(created.session_id, &created.host_token)
        .await?;
    service.retire_session(created.session_id).await?;

    Ok(())
}
