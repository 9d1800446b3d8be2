//! Bounded, single-retrieval result cache.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::metrics::{CACHE_ENTRIES, CACHE_OPERATIONS};

use super::config::CacheConfig;
use super::error::CacheError;
use super::ticket::{TicketGenerator, UuidTicketGenerator};

/// How many fresh tickets `insert` tries before giving up on collisions.
const MAX_TICKET_ATTEMPTS: usize = 8;

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// A handoff store keyed by ticket.
///
/// Entries are stored once and can be popped exactly once. An entry older
/// than the TTL is gone for every operation and frees its slot. All state
/// lives behind one mutex, so concurrent inserts can never overshoot the
/// capacity and concurrent pops of one ticket can never both succeed.
pub struct ResultCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    capacity: usize,
    ttl: Duration,
    tickets: Arc<dyn TicketGenerator>,
}

impl<V> ResultCache<V> {
    /// Create a cache that issues UUID tickets.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::with_ticket_generator(capacity, ttl, Arc::new(UuidTicketGenerator))
    }

    /// Create a cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity, config.ttl())
    }

    /// Create a cache with a custom ticket generator.
    pub fn with_ticket_generator(
        capacity: usize,
        ttl: Duration,
        tickets: Arc<dyn TicketGenerator>,
    ) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity,
            ttl,
            tickets,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store `value` and return its ticket, unless every slot is taken.
    pub async fn insert(&self, value: V) -> Result<String, CacheError> {
        let mut entries = self.entries.lock().await;
        self.sweep_locked(&mut entries);

        if entries.len() >= self.capacity {
            CACHE_OPERATIONS.with_label_values(&["insert", "full"]).inc();
            warn!(capacity = self.capacity, "Result cache is full");
            return Err(CacheError::Full {
                capacity: self.capacity,
            });
        }

        let mut ticket = None;
        for _ in 0..MAX_TICKET_ATTEMPTS {
            let candidate = self.tickets.generate();
            if !entries.contains_key(&candidate) {
                ticket = Some(candidate);
                break;
            }
        }
        let ticket = ticket.ok_or(CacheError::TicketCollision {
            attempts: MAX_TICKET_ATTEMPTS,
        })?;

        entries.insert(
            ticket.clone(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );

        CACHE_OPERATIONS.with_label_values(&["insert", "stored"]).inc();
        CACHE_ENTRIES.set(entries.len() as i64);
        debug!(ticket = %ticket, live = entries.len(), "Stored result");

        Ok(ticket)
    }

    /// Remove and return the value for `ticket`, if present and not expired.
    pub async fn pop(&self, ticket: &str) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let entry = entries.remove(ticket);
        CACHE_ENTRIES.set(entries.len() as i64);

        match entry {
            Some(entry) if !self.is_expired(&entry, Instant::now()) => {
                CACHE_OPERATIONS.with_label_values(&["pop", "hit"]).inc();
                debug!(ticket = %ticket, "Popped result");
                Some(entry.value)
            }
            Some(_) => {
                CACHE_OPERATIONS.with_label_values(&["pop", "miss"]).inc();
                debug!(ticket = %ticket, "Ticket expired before pickup");
                None
            }
            None => {
                CACHE_OPERATIONS.with_label_values(&["pop", "miss"]).inc();
                None
            }
        }
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        let mut entries = self.entries.lock().await;
        self.sweep_locked(&mut entries);
        entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop expired entries, returning how many were reclaimed.
    pub async fn sweep(&self) -> usize {
        let mut entries = self.entries.lock().await;
        self.sweep_locked(&mut entries)
    }

    fn sweep_locked(&self, entries: &mut HashMap<String, CacheEntry<V>>) -> usize {
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        let reclaimed = before - entries.len();

        if reclaimed > 0 {
            CACHE_OPERATIONS
                .with_label_values(&["sweep", "expired"])
                .inc_by(reclaimed as u64);
            CACHE_ENTRIES.set(entries.len() as i64);
        }
        reclaimed
    }

    fn is_expired(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        now.duration_since(entry.inserted_at) >= self.ttl
    }
}

impl<V: Send + 'static> ResultCache<V> {
    /// Spawn a background task that sweeps expired entries every `interval`.
    ///
    /// The task holds only a weak reference, so it also ends once the cache
    /// is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let cache: Weak<Self> = Arc::downgrade(self);

        let join = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Cache sweeper received shutdown signal");
                        break;
                    }
                    _ = ticker.tick() => {
                        let Some(cache) = cache.upgrade() else {
                            debug!("Cache dropped, sweeper exiting");
                            break;
                        };
                        let reclaimed = cache.sweep().await;
                        if reclaimed > 0 {
                            debug!(reclaimed, "Swept expired results");
                        }
                    }
                }
            }
        });

        SweeperHandle { shutdown_tx, join }
    }
}

/// Handle to a running cache sweeper.
pub struct SweeperHandle {
    shutdown_tx: broadcast::Sender<()>,
    join: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the sweeper to stop and wait for it.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.join.await {
            warn!("Cache sweeper ended abnormally: {}", e);
        }
    }
}
