//! Tests for the bounded dispatcher.

mod test_utils;

use sceneforge_pipeline::{Dispatcher, Keyed, ProgressSpan};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use test_utils::jitter;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Tagged {
    key: usize,
    value: String,
}

impl Keyed for Tagged {
    fn key(&self) -> usize {
        self.key
    }
}

fn recorder() -> (Arc<Mutex<Vec<f64>>>, sceneforge_pipeline::ProgressCallback) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let callback: sceneforge_pipeline::ProgressCallback =
        Arc::new(move |value| sink.lock().unwrap().push(value));
    (seen, callback)
}

#[tokio::test]
async fn test_results_restored_to_key_order() {
    let items: Vec<usize> = (1..=40).collect();

    let results = Dispatcher::new(8)
        .dispatch(items, |key| async move {
            // Later keys tend to finish first.
            tokio::time::sleep(jitter(41 - key)).await;
            Some(Tagged {
                key,
                value: format!("v{key}"),
            })
        })
        .await;

    let keys: Vec<usize> = results.iter().map(|r| r.key).collect();
    assert_eq!(keys, (1..=40).collect::<Vec<_>>());
    assert_eq!(results[9].value, "v10");
}

#[tokio::test]
async fn test_absent_results_are_discarded() {
    let absent: HashSet<usize> = [2, 5, 6, 11].into_iter().collect();
    let skip = absent.clone();

    let results = Dispatcher::new(3)
        .dispatch((1..=12).collect(), move |key: usize| {
            let present = !skip.contains(&key);
            async move {
                tokio::time::sleep(jitter(key)).await;
                present.then(|| Tagged {
                    key,
                    value: String::new(),
                })
            }
        })
        .await;

    assert_eq!(results.len(), 12 - absent.len());
    let keys: Vec<usize> = results.iter().map(|r| r.key).collect();
    assert_eq!(keys, vec![1, 3, 4, 7, 8, 9, 10, 12]);
}

#[tokio::test]
async fn test_width_bounds_concurrency() {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let (counter, high) = (Arc::clone(&in_flight), Arc::clone(&peak));

    let results = Dispatcher::new(3)
        .dispatch((1..=20).collect(), move |key: usize| {
            let counter = Arc::clone(&counter);
            let high = Arc::clone(&high);
            async move {
                let now = counter.fetch_add(1, Ordering::SeqCst) + 1;
                high.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(jitter(key)).await;
                counter.fetch_sub(1, Ordering::SeqCst);
                Some(Tagged {
                    key,
                    value: String::new(),
                })
            }
        })
        .await;

    assert_eq!(results.len(), 20);
    assert!(peak.load(Ordering::SeqCst) <= 3);
    assert!(peak.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn test_progress_reported_per_completion() {
    let (seen, callback) = recorder();

    Dispatcher::new(4)
        .with_progress(ProgressSpan::IMAGES, callback)
        .dispatch((1..=4).collect(), |key: usize| async move {
            (key % 2 == 0).then(|| Tagged {
                key,
                value: String::new(),
            })
        })
        .await;

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen, vec![0.625, 0.75, 0.875, 1.0]);
}

#[tokio::test]
async fn test_no_items_no_progress() {
    let (seen, callback) = recorder();

    let results: Vec<Tagged> = Dispatcher::new(4)
        .with_progress(ProgressSpan::PROMPTS, callback)
        .dispatch(Vec::<usize>::new(), |key| async move {
            Some(Tagged {
                key,
                value: String::new(),
            })
        })
        .await;

    assert!(results.is_empty());
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_panicking_handler_does_not_cancel_siblings() {
    let results = Dispatcher::new(2)
        .dispatch((1..=5).collect(), |key: usize| async move {
            if key == 3 {
                panic!("handler blew up");
            }
            Some(Tagged {
                key,
                value: String::new(),
            })
        })
        .await;

    let keys: Vec<usize> = results.iter().map(|r| r.key).collect();
    assert_eq!(keys, vec![1, 2, 4, 5]);
}
