//! Example: Using Redis locks
//!
//! Run with: `cargo run --example redis_lock`
//!
//! Requires a Redis server. Set REDIS_URL environment variable
//! or modify the URL below.

use simple_redis_lock::prelude::*;
use simple_redis_lock::RedisLockStore;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Get Redis URL from environment or use default
    let redis_url = std::env::var("REDIS_URL")
        .unwrap_or_else(|_| "redis://localhost:6379".to_string());

    println!("Connecting to Redis...");
    let store = RedisLockStore::connect(&redis_url).await?;
    let locks = LockManager::new(store);

    // Run work under the lock; it is released when the work returns
    let outcome = locks
        .lock_with("example-resource", Duration::from_secs(5), || async {
            println!("Doing critical work...");
            tokio::time::sleep(Duration::from_millis(500)).await;
            "done"
        })
        .await?;
    match outcome {
        Some(result) => println!("Work finished: {}", result),
        None => println!("Lock is held by someone else, skipping"),
    }

    // Hold the lock without a closure
    if locks.lock("example-resource", Duration::from_secs(5)).await? {
        println!("Lock acquired at {:?}", locks.acquired_at("example-resource").await?);
        println!("Expires in {:?}", locks.ttl("example-resource").await?);

        // A second attempt fails while it is held
        let again = locks.lock("example-resource", Duration::from_secs(5)).await?;
        println!("Second attempt acquired: {}", again);

        locks.release("example-resource").await?;
        println!("Lock released");
    }

    Ok(())
}
