use async_trait::async_trait;
use plusphite::application::StatusPoller;
use plusphite::domain::errors::{CycleError, FetchError, TransportError};
use plusphite::domain::ports::{GaugeTransport, StatusSource};
use plusphite::domain::{FilterSets, Flattener};
use plusphite::infrastructure::observability::AgentMetrics;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// Mock status source returning queued results
struct MockSource {
    responses: Mutex<VecDeque<Result<Value, FetchError>>>,
    fetches: Arc<Mutex<usize>>,
}

impl MockSource {
    fn new(responses: Vec<Result<Value, FetchError>>) -> (Self, Arc<Mutex<usize>>) {
        let fetches = Arc::new(Mutex::new(0));
        (
            Self {
                responses: Mutex::new(responses.into()),
                fetches: fetches.clone(),
            },
            fetches,
        )
    }
}

#[async_trait]
impl StatusSource for MockSource {
    async fn fetch(&self) -> Result<Value, FetchError> {
        *self.fetches.lock().unwrap() += 1;
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({})))
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

#[derive(Debug, Default)]
struct TransportLog {
    opened: usize,
    closed: usize,
    gauges: Vec<(String, i64)>,
}

// Recording transport; optionally refuses gauges with a given name
struct RecordingTransport {
    log: Arc<Mutex<TransportLog>>,
    fail_open: bool,
    reject: Option<String>,
}

impl RecordingTransport {
    fn new() -> (Self, Arc<Mutex<TransportLog>>) {
        let log = Arc::new(Mutex::new(TransportLog::default()));
        (
            Self {
                log: log.clone(),
                fail_open: false,
                reject: None,
            },
            log,
        )
    }
}

#[async_trait]
impl GaugeTransport for RecordingTransport {
    async fn open(&mut self) -> Result<(), TransportError> {
        if self.fail_open {
            return Err(TransportError::Open {
                addr: "statsd:8125".to_string(),
                source: std::io::Error::other("unreachable"),
            });
        }
        self.log.lock().unwrap().opened += 1;
        Ok(())
    }

    async fn gauge(&mut self, name: &str, value: i64) -> Result<(), TransportError> {
        if self.reject.as_deref() == Some(name) {
            return Err(TransportError::Send {
                name: name.to_string(),
                source: std::io::Error::other("buffer full"),
            });
        }
        self.log
            .lock()
            .unwrap()
            .gauges
            .push((name.to_string(), value));
        Ok(())
    }

    async fn close(&mut self) {
        self.log.lock().unwrap().closed += 1;
    }
}

fn poller(source: MockSource, transport: RecordingTransport) -> StatusPoller {
    StatusPoller::new(
        Arc::new(source),
        Box::new(transport),
        Flattener::new(FilterSets::default()),
        AgentMetrics::new().expect("metrics"),
        Duration::from_millis(10),
    )
}

#[tokio::test]
async fn test_cycle_sends_every_emission_in_order() {
    let (source, _) = MockSource::new(vec![Ok(json!({
        "version": 5,
        "connections": {"accepted": 10, "active": 2},
        "caches": {"c1": {"cold": true}},
        "upstreams": {"u": {"requests": 1}}
    }))]);
    let (transport, log) = RecordingTransport::new();
    let mut poller = poller(source, transport);

    let report = poller.run_cycle().await.expect("cycle succeeds");

    assert_eq!(report.emissions, 3);
    assert_eq!(report.gauges_sent, 3);
    assert_eq!(report.gauges_failed, 0);
    assert!(report.issues.is_empty());

    let log = log.lock().unwrap();
    assert_eq!(
        log.gauges,
        vec![
            ("connections.accepted".to_string(), 10),
            ("connections.active".to_string(), 2),
            ("caches.c1".to_string(), 1),
        ]
    );
    assert_eq!((log.opened, log.closed), (1, 1));

    let counters = poller.metrics().snapshot();
    assert_eq!(counters.cycles_ok, 1);
    assert_eq!(counters.gauges_sent, 3);
    assert_eq!(counters.last_emission_count, 3);
}

#[tokio::test]
async fn test_fetch_failure_closes_session_and_sends_nothing() {
    let (source, _) = MockSource::new(vec![Err(FetchError::Status {
        url: "http://nginx/status".to_string(),
        status: 502,
    })]);
    let (transport, log) = RecordingTransport::new();
    let mut poller = poller(source, transport);

    let err = poller.run_cycle().await.unwrap_err();
    assert!(matches!(
        err,
        CycleError::Fetch(FetchError::Status { status: 502, .. })
    ));

    let log = log.lock().unwrap();
    assert!(log.gauges.is_empty());
    assert_eq!((log.opened, log.closed), (1, 1));
    assert_eq!(poller.metrics().snapshot().cycles_failed, 1);
}

#[tokio::test]
async fn test_open_failure_skips_fetch() {
    let (source, fetches) = MockSource::new(vec![Ok(json!({"a": 1}))]);
    let (mut transport, log) = RecordingTransport::new();
    transport.fail_open = true;
    let mut poller = poller(source, transport);

    let err = poller.run_cycle().await.unwrap_err();
    assert!(matches!(err, CycleError::Transport(TransportError::Open { .. })));
    assert_eq!(*fetches.lock().unwrap(), 0);
    assert_eq!(log.lock().unwrap().closed, 0);
}

#[tokio::test]
async fn test_failed_gauge_does_not_stop_the_cycle() {
    let (source, _) = MockSource::new(vec![Ok(json!({"a": 1, "b": 2, "c": 3}))]);
    let (mut transport, log) = RecordingTransport::new();
    transport.reject = Some("b".to_string());
    let mut poller = poller(source, transport);

    let report = poller.run_cycle().await.expect("cycle still succeeds");
    assert_eq!(report.gauges_sent, 2);
    assert_eq!(report.gauges_failed, 1);
    assert_eq!(
        log.lock().unwrap().gauges,
        vec![("a".to_string(), 1), ("c".to_string(), 3)]
    );
    assert_eq!(poller.metrics().snapshot().gauges_failed, 1);
}

#[tokio::test]
async fn test_issues_are_counted() {
    let (source, _) = MockSource::new(vec![Ok(json!({"load": 0.5, "workers": [1, 2], "x": null}))]);
    let (transport, _) = RecordingTransport::new();
    let mut poller = poller(source, transport);

    let report = poller.run_cycle().await.unwrap();
    assert_eq!(report.issues.len(), 4);
    assert_eq!(poller.metrics().snapshot().flatten_issues, 4);
}

#[tokio::test]
async fn test_run_survives_failed_cycles_until_shutdown() {
    let (source, fetches) = MockSource::new(vec![
        Err(FetchError::Decode {
            url: "http://nginx/status".to_string(),
            reason: "EOF".to_string(),
        }),
        Ok(json!({"a": 1})),
    ]);
    let (transport, log) = RecordingTransport::new();
    let poller = poller(source, transport);

    let shutdown = tokio::time::sleep(Duration::from_millis(100));
    poller.run(shutdown).await.expect("non fail-fast run ends cleanly");

    assert!(*fetches.lock().unwrap() >= 2);
    assert!(log.lock().unwrap().gauges.contains(&("a".to_string(), 1)));
}

#[tokio::test]
async fn test_fail_fast_stops_on_first_failure() {
    let (source, fetches) = MockSource::new(vec![Err(FetchError::Request {
        url: "http://nginx/status".to_string(),
        reason: "connection refused".to_string(),
    })]);
    let (transport, _) = RecordingTransport::new();
    let poller = poller(source, transport).with_fail_fast(true);

    let result = poller.run(std::future::pending::<()>()).await;
    assert!(matches!(result, Err(CycleError::Fetch(FetchError::Request { .. }))));
    assert_eq!(*fetches.lock().unwrap(), 1);
}
