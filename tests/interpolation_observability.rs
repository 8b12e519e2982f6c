use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use matrix_interpolate::interpolation::{
    interpolate_from_path, InterpolationObserver, InterpolationOptions, InterpolationSeverity, InterpolationStats,
    LineLogObserver, RunFailure,
};
use matrix_interpolate::InterpolationError;

#[derive(Debug, Clone, PartialEq)]
struct Aborted {
    severity: InterpolationSeverity,
    row: Option<u64>,
    progress: InterpolationStats,
}

impl From<&RunFailure<'_>> for Aborted {
    fn from(f: &RunFailure<'_>) -> Self {
        Self {
            severity: f.severity,
            row: f.row,
            progress: f.progress,
        }
    }
}

#[derive(Default)]
struct RecordingObserver {
    finished: Mutex<Vec<InterpolationStats>>,
    aborted: Mutex<Vec<Aborted>>,
    alerts: Mutex<Vec<InterpolationSeverity>>,
}

impl InterpolationObserver for RecordingObserver {
    fn on_finished(&self, _path: &Path, stats: &InterpolationStats) {
        self.finished.lock().unwrap().push(*stats);
    }

    fn on_aborted(&self, _path: &Path, failure: &RunFailure<'_>) {
        self.aborted.lock().unwrap().push(failure.into());
    }

    fn on_alert(&self, _path: &Path, failure: &RunFailure<'_>) {
        self.alerts.lock().unwrap().push(failure.severity);
    }
}

fn options_with(obs: &Arc<RecordingObserver>) -> InterpolationOptions {
    InterpolationOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    }
}

#[test]
fn finished_run_reports_reader_counters() {
    let obs = Arc::new(RecordingObserver::default());

    interpolate_from_path("tests/fixtures/matrix.csv", Vec::new(), &options_with(&obs)).unwrap();

    let finished = obs.finished.lock().unwrap().clone();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].rows, 5);
    assert_eq!(finished[0].reader.reads, 7);
    assert_eq!(finished[0].reader.seeks, 1);
    assert_eq!(finished[0].reader.cache_hits, 9);
    assert!(obs.aborted.lock().unwrap().is_empty());
}

#[test]
fn unreadable_file_is_critical_and_alerts() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(&obs);

    let err = interpolate_from_path("tests/fixtures/does_not_exist.csv", Vec::new(), &opts).unwrap_err();
    assert!(matches!(err, InterpolationError::Io(_)));

    let aborted = obs.aborted.lock().unwrap().clone();
    assert_eq!(aborted.len(), 1);
    assert_eq!(aborted[0].severity, InterpolationSeverity::Critical);
    assert_eq!(aborted[0].row, None);
    assert_eq!(aborted[0].progress, InterpolationStats::default());
    assert_eq!(*obs.alerts.lock().unwrap(), vec![InterpolationSeverity::Critical]);
}

#[test]
fn rejected_format_is_an_error_without_alert() {
    let obs = Arc::new(RecordingObserver::default());
    let mut opts = options_with(&obs);
    opts.format.window_cache_rows = 0;

    let _ = interpolate_from_path("tests/fixtures/matrix.csv", Vec::new(), &opts).unwrap_err();

    let aborted = obs.aborted.lock().unwrap().clone();
    assert_eq!(aborted.len(), 1);
    assert_eq!(aborted[0].severity, InterpolationSeverity::Error);
    assert_eq!(aborted[0].row, None);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn malformed_row_reports_where_the_run_stopped() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    write!(input, "1,2\n3,nan\n4\n").unwrap();
    let obs = Arc::new(RecordingObserver::default());
    let mut opts = options_with(&obs);
    opts.alert_at_or_above = InterpolationSeverity::Error;

    let err = interpolate_from_path(input.path(), Vec::new(), &opts).unwrap_err();
    assert!(matches!(err, InterpolationError::Csv(_)));

    let aborted = obs.aborted.lock().unwrap().clone();
    assert_eq!(aborted.len(), 1);
    assert_eq!(aborted[0].severity, InterpolationSeverity::Error);
    // Row 2's window needs row 3, which is short a field.
    assert_eq!(aborted[0].row, Some(2));
    assert_eq!(aborted[0].progress.rows, 1);
    assert_eq!(aborted[0].progress.reader.reads, 3);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![InterpolationSeverity::Error]);
}

#[test]
fn line_log_writes_one_line_per_event() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");
    let obs = Arc::new(LineLogObserver::new(Vec::new()));
    let opts = InterpolationOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    interpolate_from_path("tests/fixtures/matrix.csv", Vec::new(), &opts).unwrap();
    let _ = interpolate_from_path(&missing, Vec::new(), &opts).unwrap_err();
    drop(opts);

    let logged = String::from_utf8(Arc::try_unwrap(obs).unwrap().into_inner()).unwrap();
    let lines: Vec<_> = logged.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "[interpolate] finished path=tests/fixtures/matrix.csv rows=5 seeks=1 reads=7 cache_hits=9"
    );
    assert!(lines[1].starts_with(&format!(
        "[interpolate] aborted path={} severity=Critical row=- rows=0",
        missing.display()
    )));
    assert!(lines[1].contains("err=io error"));
    assert!(lines[2].starts_with("[interpolate][ALERT] path="));
}
