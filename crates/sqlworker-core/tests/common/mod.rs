use async_trait::async_trait;
use sqlworker_core::{
    DatabaseHandle, Engine, EngineLoader, ResourceResolver, Result, WorkerError,
    DEFAULT_ASSET_NAME,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What the fake engine observed, shared with the test
#[derive(Default)]
pub struct FakeStats {
    pub initialized: AtomicUsize,
    pub databases: AtomicUsize,
    pub closed: AtomicUsize,
    pub located: Mutex<Vec<String>>,
    /// (database number, sql) for every successful exec
    pub executed: Mutex<Vec<(usize, String)>>,
}

impl FakeStats {
    #[allow(dead_code)]
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn databases(&self) -> usize {
        self.databases.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn executed(&self) -> Vec<(usize, String)> {
        self.executed.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn located(&self) -> Vec<String> {
        self.located.lock().unwrap().clone()
    }
}

/// Engine double: statements starting with INVALID fail like SQLite would
pub struct FakeLoader {
    stats: Arc<FakeStats>,
    successes_left: Option<AtomicUsize>,
    failure: String,
}

impl FakeLoader {
    #[allow(dead_code)]
    pub fn new() -> (Self, Arc<FakeStats>) {
        Self::build(None, "")
    }

    /// Every initialization fails with `message`
    #[allow(dead_code)]
    pub fn failing(message: &str) -> (Self, Arc<FakeStats>) {
        Self::build(Some(0), message)
    }

    /// The first `n` initializations succeed, later ones fail with `message`
    #[allow(dead_code)]
    pub fn succeeding_times(n: usize, message: &str) -> (Self, Arc<FakeStats>) {
        Self::build(Some(n), message)
    }

    fn build(successes: Option<usize>, message: &str) -> (Self, Arc<FakeStats>) {
        let stats = Arc::new(FakeStats::default());
        let loader = Self {
            stats: stats.clone(),
            successes_left: successes.map(AtomicUsize::new),
            failure: message.to_string(),
        };
        (loader, stats)
    }
}

#[async_trait]
impl EngineLoader for FakeLoader {
    async fn initialize(&self, resolver: &dyn ResourceResolver) -> Result<Box<dyn Engine>> {
        self.stats
            .located
            .lock()
            .unwrap()
            .push(resolver.locate(DEFAULT_ASSET_NAME));

        if let Some(left) = &self.successes_left {
            let allowed = left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if !allowed {
                return Err(WorkerError::engine_init(&self.failure));
            }
        }

        // Cooperative suspension point, like fetching a payload.
        tokio::task::yield_now().await;
        self.stats.initialized.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeEngine {
            stats: self.stats.clone(),
        }))
    }
}

struct FakeEngine {
    stats: Arc<FakeStats>,
}

impl Engine for FakeEngine {
    fn new_database(&self) -> Result<Box<dyn DatabaseHandle>> {
        let number = self.stats.databases.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Box::new(FakeDatabase {
            number,
            stats: self.stats.clone(),
        }))
    }
}

struct FakeDatabase {
    number: usize,
    stats: Arc<FakeStats>,
}

impl DatabaseHandle for FakeDatabase {
    fn exec(&mut self, sql: &str) -> Result<()> {
        if sql.trim_start().to_ascii_uppercase().starts_with("INVALID") {
            return Err(WorkerError::execution("near \"INVALID\": syntax error"));
        }
        self.stats
            .executed
            .lock()
            .unwrap()
            .push((self.number, sql.to_string()));
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.stats.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
