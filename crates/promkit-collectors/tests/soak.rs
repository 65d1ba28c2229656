#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use promkit_collectors::config::{self, Instrument};
use promkit_collectors::soak::{self, shared_labels, worker_labels};

const CFG: &str = r#"
version: 1
collectors:
  - name: requests_total
    kind: counter
    seed:
      - labels: { worker: shared }
        value: 10
  - name: inflight
    kind: gauge
  - name: build_info
    seed:
      - labels: { version: "1" }
        value: 1
soak:
  workers: 4
  iterations: 500
"#;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn soak_loses_no_updates() {
    let cfg = config::load_from_str(CFG).unwrap();
    let instruments = Arc::new(cfg.instantiate().unwrap());

    let report = soak::run(Arc::clone(&instruments), &cfg.soak).await.unwrap();
    assert!(report.is_ok(), "{:?}", report.mismatches);
    assert_eq!(report.expected_delta, 2000.0);

    let Instrument::Counter(counter) = &instruments[0] else {
        panic!("expected counter");
    };
    assert_eq!(counter.get(shared_labels()).unwrap(), 2010.0);
    for id in 0..4 {
        assert_eq!(counter.get(worker_labels(id)).unwrap(), 500.0);
    }
    assert_eq!(counter.len(), 5);

    let Instrument::Gauge(gauge) = &instruments[1] else {
        panic!("expected gauge");
    };
    assert_eq!(gauge.get(shared_labels()).unwrap(), 2000.0);
    assert_eq!(gauge.get(worker_labels(0)).unwrap(), 0.0);

    let Instrument::Untyped(info) = &instruments[2] else {
        panic!("expected untyped");
    };
    assert_eq!(info.len(), 1);
}
