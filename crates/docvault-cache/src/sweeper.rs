//! Background purge of expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::memory::TtlCache;

/// Spawn a task that purges expired entries every `interval` until
/// `shutdown` flips to `true` or its sender is dropped.
pub fn spawn_sweeper<V>(
    cache: Arc<TtlCache<V>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    info!(interval_secs = interval.as_secs(), "Starting cache sweeper");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = cache.purge_expired();
                    if removed > 0 {
                        debug!(removed, "Swept expired cache entries");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!("Cache sweeper stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sweeper_purges_and_stops_on_shutdown() {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(1)));
        cache.set("k", 1u8);
        let (tx, rx) = watch::channel(false);
        let handle = spawn_sweeper(Arc::clone(&cache), Duration::from_secs(2), rx);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(cache.is_empty());

        tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
