//! Lock behaviour checks shared by every store backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use simple_redis_lock_core::manager::LockManager;
use simple_redis_lock_core::store::LockStore;

/// Expiry long enough that no check races it.
pub const EX: Duration = Duration::from_millis(500);

/// Slack allowed for store round trips and scheduling.
pub const JITTER: Duration = Duration::from_millis(100);

/// Locking without work holds the lock until release.
pub async fn hold_until_release<S: LockStore>(locks: &LockManager<S>, name: &str) {
    let before = Utc::now();
    assert!(locks.lock(name, EX).await.unwrap());

    let acquired_at = locks.acquired_at(name).await.unwrap().unwrap();
    let drift = (acquired_at.with_timezone(&Utc) - before).num_milliseconds();
    assert!(drift.abs() <= JITTER.as_millis() as i64, "drift {drift}ms");

    let ttl = locks.ttl(name).await.unwrap().unwrap();
    assert!(ttl <= EX && ttl >= EX - JITTER, "ttl {ttl:?}");

    assert!(!locks.lock(name, EX).await.unwrap());
    assert!(locks.is_locked(name).await.unwrap());

    locks.release(name).await.unwrap();
    assert!(locks.lock(name, EX).await.unwrap());
    locks.release(name).await.unwrap();
}

/// A free key has no acquisition time and no ttl.
pub async fn free_key_introspection<S: LockStore>(locks: &LockManager<S>, name: &str) {
    assert_eq!(locks.acquired_at(name).await.unwrap(), None);
    assert_eq!(locks.ttl(name).await.unwrap(), None);
    assert!(!locks.is_locked(name).await.unwrap());
}

/// Releasing a free key succeeds, any number of times.
pub async fn release_is_idempotent<S: LockStore>(locks: &LockManager<S>, name: &str) {
    locks.release(name).await.unwrap();
    locks.release(name).await.unwrap();

    assert!(locks.lock(name, EX).await.unwrap());
    locks.release(name).await.unwrap();
    locks.release(name).await.unwrap();
    assert!(!locks.is_locked(name).await.unwrap());
}

/// Work runs under the lock and the lock is free once it returns, whether the
/// work succeeded or reported an error.
pub async fn work_releases_lock<S: LockStore>(locks: &LockManager<S>, name: &str) {
    let output = locks
        .lock_with(name, EX, || async { "executed" })
        .await
        .unwrap();
    assert_eq!(output, Some("executed"));
    assert!(!locks.is_locked(name).await.unwrap());

    let held_inside = locks
        .lock_with(name, EX, || async { locks.is_locked(name).await.unwrap() })
        .await
        .unwrap();
    assert_eq!(held_inside, Some(true));

    let failed: Option<Result<(), String>> = locks
        .lock_with(name, EX, || async { Err("error will release lock".to_string()) })
        .await
        .unwrap();
    assert_eq!(failed, Some(Err("error will release lock".to_string())));
    assert!(!locks.is_locked(name).await.unwrap());

    // `false` from the work is a value, not a missed lock
    let output = locks.lock_with(name, EX, || async { false }).await.unwrap();
    assert_eq!(output, Some(false));
}

/// Work is skipped while someone else holds the lock.
pub async fn held_lock_skips_work<S: LockStore>(locks: &LockManager<S>, name: &str) {
    assert!(locks.lock(name, EX).await.unwrap());

    let ran = AtomicBool::new(false);
    let output = locks
        .lock_with(name, EX, || async {
            ran.store(true, Ordering::SeqCst);
        })
        .await
        .unwrap();
    assert_eq!(output, None);
    assert!(!ran.load(Ordering::SeqCst));

    locks.release(name).await.unwrap();
}

/// The remaining ttl shrinks over time and disappears at expiry.
pub async fn ttl_counts_down<S: LockStore>(locks: &LockManager<S>, name: &str) {
    let ttl = Duration::from_millis(300);
    assert!(locks.lock(name, ttl).await.unwrap());

    let first = locks.ttl(name).await.unwrap().unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let second = locks.ttl(name).await.unwrap().unwrap();
    assert!(second < first, "{second:?} should be below {first:?}");

    tokio::time::sleep(ttl + JITTER).await;
    assert_eq!(locks.ttl(name).await.unwrap(), None);
    assert_eq!(locks.acquired_at(name).await.unwrap(), None);
}

/// Exactly one of many concurrent attempts wins.
pub async fn only_one_holder<S>(locks: &LockManager<S>, name: &str)
where
    S: LockStore + Clone + 'static,
{
    let attempts: Vec<_> = (0..16)
        .map(|_| {
            let locks = locks.clone();
            let name = name.to_string();
            tokio::spawn(async move { locks.lock(&name, EX).await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for attempt in attempts {
        if attempt.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);

    locks.release(name).await.unwrap();
}

/// A holder whose work outlives the ttl loses the lock to the next caller.
pub async fn expiry_frees_slow_holder<S>(locks: &LockManager<S>, name: &str)
where
    S: LockStore + Clone + 'static,
{
    let short = Duration::from_millis(50);
    let slow = {
        let locks = locks.clone();
        let name = name.to_string();
        tokio::spawn(async move {
            locks
                .lock_with(&name, short, || tokio::time::sleep(short * 4))
                .await
                .unwrap()
        })
    };

    tokio::time::sleep(short * 2).await;
    let output = locks
        .lock_with(name, EX, || async { "executed" })
        .await
        .unwrap();
    assert_eq!(output, Some("executed"));
    assert!(!slow.is_finished());

    assert_eq!(slow.await.unwrap(), Some(()));
}
