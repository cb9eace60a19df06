use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::time::sleep;

/// Sliding window over two buckets: the previous window's count is weighted
/// by how much of it still overlaps the sliding interval.
#[derive(Debug)]
pub struct SlidingWindow {
    window_size: Duration,
    limit: u64,
    current_window_start: Instant,
    current_count: u64,
    prev_count: u64,
}

impl SlidingWindow {
    fn new(window_size: Duration, limit: u64) -> Self {
        Self {
            window_size,
            limit,
            current_window_start: Instant::now(),
            current_count: 0,
            prev_count: 0,
        }
    }

    fn allow(&mut self) -> bool {
        let now = Instant::now();
        let mut elapsed = now.duration_since(self.current_window_start);

        if elapsed >= self.window_size {
            // a full idle window in between clears the carried weight
            self.prev_count = if elapsed >= self.window_size * 2 {
                0
            } else {
                self.current_count
            };
            self.current_count = 0;
            self.current_window_start = now;
            elapsed = Duration::ZERO;
        }

        let weight = elapsed.as_secs_f64() / self.window_size.as_secs_f64();
        let effective = (self.prev_count as f64) * (1.0 - weight) + (self.current_count as f64);

        if effective < self.limit as f64 {
            self.current_count += 1;
            true
        } else {
            false
        }
    }
}

struct WindowEntry {
    window: SlidingWindow,
    last_seen: Instant,
}

/// Per-client-address limiter store with background eviction of idle keys.
#[derive(Clone)]
pub struct RateLimiterStore {
    map: Arc<DashMap<String, Arc<Mutex<WindowEntry>>>>,
    limit: u64,
    window_size: Duration,
}

impl RateLimiterStore {
    pub fn new(limit: u64, window_size: Duration, idle_ttl: Duration) -> Self {
        let store = Self {
            map: Arc::new(DashMap::new()),
            limit,
            window_size,
        };

        // eviction task
        {
            let map_clone = store.map.clone();
            tokio::spawn(async move {
                let interval = Duration::from_secs(60);
                loop {
                    sleep(interval).await;
                    let now = Instant::now();
                    let keys_to_remove: Vec<String> = map_clone
                        .iter()
                        .filter_map(|entry| {
                            let e = entry.value().lock();
                            if now.duration_since(e.last_seen) > idle_ttl {
                                Some(entry.key().clone())
                            } else {
                                None
                            }
                        })
                        .collect();

                    for k in keys_to_remove {
                        map_clone.remove(&k);
                    }
                }
            });
        }

        store
    }

    fn get_entry(&self, key: &str) -> Arc<Mutex<WindowEntry>> {
        if let Some(existing) = self.map.get(key) {
            existing.clone()
        } else {
            let entry = Arc::new(Mutex::new(WindowEntry {
                window: SlidingWindow::new(self.window_size, self.limit),
                last_seen: Instant::now(),
            }));
            match self.map.entry(key.to_string()) {
                dashmap::mapref::entry::Entry::Occupied(occupied) => occupied.get().clone(),
                dashmap::mapref::entry::Entry::Vacant(vacant) => {
                    vacant.insert(entry.clone());
                    entry
                }
            }
        }
    }

    pub fn is_allowed(&self, key: &str) -> bool {
        let entry = self.get_entry(key);
        let mut e = entry.lock();
        e.last_seen = Instant::now();
        e.window.allow()
    }
}
