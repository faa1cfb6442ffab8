use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::LazyLock;

pub static METER: LazyLock<Meter> = LazyLock::new(|| global::meter("milestone-digest"));

// --- Source API ---

pub static SOURCE_REQUESTS_TOTAL: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("github.requests.total")
        .with_description("Number of GitHub API requests by endpoint and outcome")
        .with_unit("{request}")
        .build()
});

pub static SOURCE_REQUEST_DURATION: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("github.request.duration")
        .with_description("GitHub API request duration in milliseconds")
        .with_unit("ms")
        .with_boundaries(vec![
            10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0,
        ])
        .build()
});

// --- Report Metrics ---

pub static REPORT_GROUPS_FETCHED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("report.groups.fetched")
        .with_description("Milestones fetched per run, by outcome")
        .with_unit("{milestone}")
        .build()
});

pub static REPORT_DELIVERIES: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("report.deliveries")
        .with_description("Slack delivery attempts, by outcome")
        .with_unit("{message}")
        .build()
});

pub static REPORT_RUN_DURATION: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("report.run.duration")
        .with_description("End-to-end report run duration in seconds")
        .with_unit("s")
        .build()
});

pub static REPORT_AVERAGE_PROGRESS: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("report.average_progress")
        .with_description("Average milestone completion reported per run")
        .with_unit("%")
        .with_boundaries(vec![0.0, 25.0, 50.0, 75.0, 100.0])
        .build()
});
