//! Global named event counters, reported once at the end of a run.
//!
//! Counting is compiled in only with the `counter` feature; the macro is a no-op otherwise.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};

#[derive(Debug, Default)]
pub struct CounterU64 {
    atomic: AtomicU64,
}

impl CounterU64 {
    pub const fn new() -> Self {
        Self {
            atomic: AtomicU64::new(0),
        }
    }
    pub fn inc(&self) {
        self.atomic.fetch_add(1, Ordering::Relaxed);
    }
    pub fn value(&self) -> u64 {
        self.atomic.load(Ordering::Relaxed)
    }
}

lazy_static::lazy_static! {
    static ref COUNTERS: Mutex<BTreeMap<&'static str, Arc<CounterU64>>> = Mutex::new(BTreeMap::new());
}

/// Get the counter registered under `descr`, creating it on first use
pub fn register_counter(descr: &'static str) -> Arc<CounterU64> {
    let mut counters = COUNTERS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    counters
        .entry(descr)
        .or_insert_with(|| Arc::new(CounterU64::new()))
        .clone()
}

/// Snapshot of every counter, sorted by name
pub fn counter_values() -> Vec<(&'static str, u64)> {
    let counters = COUNTERS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    counters
        .iter()
        .map(|(name, counter)| (*name, counter.value()))
        .collect()
}

pub fn report_counters() {
    for (name, value) in counter_values() {
        log::info!(target: "counter_report", "{name}: {value}");
    }
}

#[macro_export]
macro_rules! counter {
    ($descr:literal) => {
        if cfg!(feature = "counter") {
            $crate::utils::counter::lazy_static::lazy_static! {
                static ref COUNTER_REF: std::sync::Arc<$crate::utils::counter::CounterU64> =
                    $crate::utils::counter::register_counter($descr);
            }
            COUNTER_REF.inc();
        }
    };
}

pub use counter;
// Reexport so the macro expands in downstream crates
pub use lazy_static;
