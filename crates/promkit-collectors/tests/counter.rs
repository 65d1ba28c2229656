#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use promkit_collectors::{Counter, MetricCollector, MetricKind};
use promkit_core::{ErrorCode, LabelSet};

fn counter() -> Counter {
    Counter::new(
        "logged_users_total",
        "Logged users in the application",
        &[("app", "my_app")],
    )
    .unwrap()
}

fn series() -> Vec<(LabelSet, std::ops::Range<u32>)> {
    vec![
        (LabelSet::new([("country", "sp"), ("device", "desktop")]), 0..10),
        (LabelSet::new([("country", "us"), ("device", "mobile")]), 10..20),
        (LabelSet::new([("country", "uk"), ("device", "desktop")]), 20..30),
    ]
}

#[test]
fn set_counts_distinct_labels() {
    let c = counter();
    let data = series();
    for (labels, values) in &data {
        for v in values.clone() {
            c.set(labels, f64::from(v)).unwrap();
        }
    }
    assert_eq!(c.len(), data.len());
}

#[test]
fn get_tracks_last_set() {
    let c = counter();
    let data = series();
    for (labels, values) in &data {
        for v in values.clone() {
            c.set(labels, f64::from(v)).unwrap();
            assert_eq!(c.get(labels).unwrap(), f64::from(v));
        }
    }
    for (labels, values) in &data {
        assert_eq!(c.get(labels).unwrap(), f64::from(values.end - 1));
    }
}

#[test]
fn set_may_lower_value() {
    let c = counter();
    let labels = [("country", "sp")];
    c.set(&labels, 10.0).unwrap();
    c.set(&labels, 3.0).unwrap();
    assert_eq!(c.get(&labels).unwrap(), 3.0);
}

#[test]
fn inc() {
    let c = counter();
    let labels = [("country", "sp"), ("device", "desktop")];
    for _ in 0..100 {
        c.inc(&labels).unwrap();
    }
    assert_eq!(c.get(&labels).unwrap(), 100.0);
}

#[test]
fn add() {
    let c = counter();
    let labels = [("country", "sp"), ("device", "desktop")];
    for i in 0..100u32 {
        c.add(&labels, f64::from(i)).unwrap();
    }
    assert_eq!(c.get(&labels).unwrap(), 4950.0);
}

#[test]
fn add_on_top_of_set() {
    let c = counter();
    let labels = [("country", "sp")];
    c.set(&labels, 10.0).unwrap();
    c.add(&labels, 5.0).unwrap();
    assert_eq!(c.get(&labels).unwrap(), 15.0);
}

#[test]
fn negative_add_rejected() {
    let c = counter();
    let labels = [("country", "sp"), ("device", "desktop")];

    let err = c.add(&labels, -1.0).expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::CounterDecrease);
    assert!(err.to_string().starts_with("counters can't decrease"));
    assert!(c.get(&labels).is_err());

    c.set(&labels, 5.0).unwrap();
    assert!(c.add(&labels, -1.0).is_err());
    assert_eq!(c.get(&labels).unwrap(), 5.0);
}

#[test]
fn nan_add_rejected() {
    let c = counter();
    let labels = [("country", "sp")];
    c.add(&labels, 5.0).unwrap();

    let err = c.add(&labels, f64::NAN).expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::CounterDecrease);
    assert_eq!(c.get(&labels).unwrap(), 5.0);

    assert!(c.add(&[("country", "us")], f64::NAN).is_err());
    assert!(c.get(&[("country", "us")]).is_err());
}

#[test]
fn reserved_labels_rejected_on_get() {
    let c = counter();
    c.inc(&[("country", "sp")]).unwrap();
    assert_eq!(c.get(&[("job", "x")]).unwrap_err().code(), ErrorCode::InvalidLabels);
    assert_eq!(c.get(&[("__x", "1")]).unwrap_err().code(), ErrorCode::InvalidLabels);
}

#[test]
fn reserved_labels_rejected() {
    let c = counter();
    assert_eq!(c.inc(&[("job", "x")]).unwrap_err().code(), ErrorCode::InvalidLabels);
    assert_eq!(c.add(&[("__x", "1")], 1.0).unwrap_err().code(), ErrorCode::InvalidLabels);
    assert_eq!(c.set(&[("job", "x")], 1.0).unwrap_err().code(), ErrorCode::InvalidLabels);
    assert!(c.is_empty());

    let err = Counter::new("c", "h", &[("__name__", "c")]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidLabels);
}

#[test]
fn concurrent_inc_loses_nothing() {
    let c = Arc::new(counter());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let c = Arc::clone(&c);
            thread::spawn(move || {
                for _ in 0..1000 {
                    c.inc(&[("route", "/")]).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(c.get(&[("route", "/")]).unwrap(), 8000.0);
}

#[test]
fn reports_counter_kind() {
    let c = counter();
    let dynamic: &dyn MetricCollector = &c;
    assert_eq!(dynamic.kind(), MetricKind::Counter);
    assert_eq!(dynamic.kind().to_string(), "counter");
}
