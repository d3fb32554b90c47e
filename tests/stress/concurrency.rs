//! Stress tests for the mapping cache under concurrent load.

use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use rpcfinder_cli::cache::MappingCache;
use rpcfinder_cli::mappings::MappingRepository;
use rpcfinder_cli::source::{TableId, TableSource};
use rpcfinder_cli::test_utils::{
    JS_TABLE_BASIC, RPC_TABLE_BASIC, StaticTableSource, init_test_logging,
};

/// A table source that takes a while to answer, so loads overlap.
#[derive(Clone)]
struct SlowSource {
    inner: StaticTableSource,
    delay: Duration,
}

impl SlowSource {
    fn new(delay: Duration) -> Self {
        Self {
            inner: StaticTableSource::new(RPC_TABLE_BASIC, JS_TABLE_BASIC),
            delay,
        }
    }
}

impl TableSource for SlowSource {
    fn fetch(&self, table: TableId) -> impl std::future::Future<Output = Result<String>> + Send {
        let inner = self.inner.clone();
        let delay = self.delay;
        async move {
            tokio::time::sleep(delay).await;
            inner.fetch(table).await
        }
    }

    fn describe(&self) -> String {
        format!("slow {}", self.inner.describe())
    }
}

#[tokio::test]
async fn overlapping_cold_loads_all_succeed() -> Result<()> {
    init_test_logging(None);

    let source = SlowSource::new(Duration::from_millis(20));
    let counters = source.inner.clone();
    let cache = Arc::new(MappingCache::new(MappingRepository::new(source)));

    let tasks = 16;
    let start = Instant::now();
    let mut handles = Vec::with_capacity(tasks);
    for _ in 0..tasks {
        let cache = Arc::clone(&cache);
        handles.push(tokio::spawn(async move { cache.get_or_load(false).await }));
    }

    for handle in handles {
        let data = handle.await??;
        assert_eq!(data.rpc_count(), 2);
    }
    let duration = start.elapsed();

    // Callers that miss the window each load; the lock is never held across
    // a load, so the duplicated work is bounded by the task count.
    let fetches = counters.fetches(TableId::RpcMappings);
    assert!(fetches >= 1 && fetches <= tasks, "fetches: {fetches}");
    debug!("overlapping loads finished with {fetches} fetches");
    println!("{tasks} overlapping cold loads in {duration:?} ({fetches} table fetches)");

    // The slot is now warm; nobody touches the source again.
    cache.get_or_load(false).await?;
    assert_eq!(counters.fetches(TableId::RpcMappings), fetches);
    Ok(())
}

#[tokio::test]
async fn reload_storm_keeps_every_reader_consistent() -> Result<()> {
    init_test_logging(None);

    let source = SlowSource::new(Duration::from_millis(2));
    let cache = Arc::new(MappingCache::new(MappingRepository::new(source)));

    let tasks = 8;
    let loads_per_task = 50;
    let start = Instant::now();

    let mut handles = Vec::with_capacity(tasks);
    for task in 0..tasks {
        let cache = Arc::clone(&cache);
        handles.push(tokio::spawn(async move {
            for i in 0..loads_per_task {
                // Every fourth load forces a reload to fight the window.
                let force = (task + i) % 4 == 0;
                let data = cache.get_or_load(force).await?;
                assert_eq!(data.rpc_count(), 2);
                assert_eq!(data.js_count(), 2);
            }
            anyhow::Ok(())
        }));
    }

    for handle in handles {
        handle.await??;
    }
    let duration = start.elapsed();

    assert!(cache.last_loaded().await.is_some());
    println!(
        "{} loads across {tasks} tasks in {duration:?}",
        tasks * loads_per_task
    );
    Ok(())
}

#[tokio::test]
async fn snapshots_survive_a_concurrent_invalidate() -> Result<()> {
    init_test_logging(None);

    let source = StaticTableSource::new(RPC_TABLE_BASIC, JS_TABLE_BASIC);
    let cache = Arc::new(MappingCache::new(MappingRepository::new(source)));

    let snapshot = cache.get_or_load(false).await?;

    let invalidator = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move {
            for _ in 0..100 {
                cache.invalidate().await;
                let _ = cache.get_or_load(false).await;
            }
        })
    };
    invalidator.await?;

    // The Arc handed out before the churn still reads the original data.
    assert_eq!(snapshot.rpc_count(), 2);
    assert_eq!(snapshot.rpc_mappings[0].rpc_name, "testRI");
    Ok(())
}
