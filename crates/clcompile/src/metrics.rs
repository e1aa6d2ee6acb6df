#![cfg(feature = "metrics")]

use once_cell::sync::Lazy;
use std::{
    collections::BTreeMap,
    sync::{Mutex, PoisonError},
    time::Instant,
};

use crate::report::Reporter;

/* ───────────── Roh‑Latenzen ─────────────────────────── */

static TIMES: Lazy<Mutex<Vec<(&'static str, u128)>>> =
    Lazy::new(|| Mutex::new(Vec::new()));

/// Um einen Provider‑Call herum: `record("build_program", t)`
pub fn record(name: &'static str, start: Instant) {
    let dur = start.elapsed().as_micros();
    TIMES
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push((name, dur));
}

/* ───────────── Zusammenfassung ─────────────────────── */

/// Per provider call: number of calls, mean and max latency in µs.
pub fn stats() -> BTreeMap<&'static str, (usize, u128, u128)> {
    let mut map: BTreeMap<&str, Vec<u128>> = BTreeMap::new();
    for &(name, us) in TIMES.lock().unwrap_or_else(PoisonError::into_inner).iter() {
        map.entry(name).or_default().push(us);
    }

    map.into_iter()
        .map(|(name, v)| {
            let mean = v.iter().sum::<u128>() / v.len() as u128;
            let max = v.iter().copied().max().unwrap_or(0);
            (name, (v.len(), mean, max))
        })
        .collect()
}

/// Am Ende von `run` aufrufen
pub fn summary(reporter: &mut impl Reporter) {
    reporter.info("── metrics summary ──");
    for (name, (calls, mean, max)) in stats() {
        reporter.info(&format!(
            "{:<16} calls={:<3} mean={:>7} µs   max={:>7} µs",
            name, calls, mean, max
        ));
    }
}
