//! Example: Workers competing for an in-process lock
//!
//! Run with: `cargo run --example memory_lock`

use simple_redis_lock::prelude::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let locks = LockManager::new(MemoryLockStore::new());

    let workers: Vec<_> = (0..4)
        .map(|id| {
            let locks = locks.clone();
            tokio::spawn(async move {
                locks
                    .lock_with("report", Duration::from_secs(1), || async move {
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        id
                    })
                    .await
            })
        })
        .collect();

    for worker in workers {
        match worker.await?? {
            Some(id) => println!("Worker {} built the report", id),
            None => println!("A worker found the report already being built"),
        }
    }

    Ok(())
}
