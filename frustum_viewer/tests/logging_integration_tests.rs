//! Integration tests for the viewer logging system
//!
//! These tests swap the process-wide logger, so they run serially.
//! No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

use frustum_viewer::fviewer::log::{self, Logger, LogEntry, LogSeverity};
use frustum_viewer::fviewer::{
    Error, FieldEdit, RenderFrame, Renderer, RendererStats, Result, Viewer, ViewerConfig,
};
use frustum_viewer::glam::Vec3;
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

/// Renderer that draws nothing
struct NullRenderer;

impl Renderer for NullRenderer {
    fn resize(&mut self, _width: u32, _height: u32, _scale_factor: f32) {}

    fn render(&mut self, _frame: &RenderFrame<'_>) -> Result<Vec<FieldEdit>> {
        Ok(Vec::new())
    }

    fn stats(&self) -> RendererStats {
        RendererStats::default()
    }
}

fn monitor_messages(entries: &Arc<Mutex<Vec<LogEntry>>>) -> Vec<(LogSeverity, String)> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.source == "fviewer::FrustumMonitor")
        .map(|e| (e.severity, e.message.clone()))
        .collect()
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);

    log::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    log::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());
    log::log_detailed(LogSeverity::Error, "test::module", "Test error message".to_string(), "lib.rs", 7);

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 3);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].message, "Test info message");
        assert_eq!(captured[1].severity, LogSeverity::Warn);
        assert_eq!(captured[2].severity, LogSeverity::Error);
        assert_eq!(captured[2].file, Some("lib.rs"));
        assert_eq!(captured[2].line, Some(7));
        assert!(captured.iter().all(|e| e.source == "test::module"));
    }

    log::reset_logger();
}

#[test]
#[serial]
fn test_integration_reset_logger_stops_capture() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);
    log::reset_logger();

    log::log(LogSeverity::Info, "test::module", "not captured".to_string());

    assert!(entries.lock().unwrap().is_empty());
}

#[test]
#[serial]
fn test_integration_visibility_changes_are_logged() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);

    let mut viewer = Viewer::new(ViewerConfig::default(), 800, 600).unwrap();
    let mut renderer = NullRenderer;

    viewer.run_frame(&mut renderer).unwrap();
    viewer.run_frame(&mut renderer).unwrap();
    assert!(monitor_messages(&entries).is_empty(), "unchanged visibility must stay silent");

    viewer.set_target_position(Vec3::new(1000.0, 0.0, 0.0)).unwrap();
    viewer.run_frame(&mut renderer).unwrap();
    viewer.run_frame(&mut renderer).unwrap();
    viewer.set_target_position(Vec3::ZERO).unwrap();
    viewer.run_frame(&mut renderer).unwrap();

    assert_eq!(
        monitor_messages(&entries),
        vec![
            (LogSeverity::Info, "Target visibility changed: false".to_string()),
            (LogSeverity::Info, "Target visibility changed: true".to_string()),
        ]
    );

    log::reset_logger();
}

#[test]
#[serial]
fn test_integration_errors_are_logged_with_location() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);

    let mut viewer = Viewer::new(ViewerConfig::default(), 800, 600).unwrap();
    let result = viewer.set_target_position(Vec3::new(f32::NAN, 0.0, 0.0));

    assert!(matches!(result, Err(Error::InvalidParameter(_))));
    {
        let captured = entries.lock().unwrap();
        let error = captured
            .iter()
            .find(|e| e.severity == LogSeverity::Error)
            .expect("error entry expected");
        assert_eq!(error.source, "fviewer::Mesh");
        assert!(error.file.is_some());
        assert!(error.line.is_some());
    }

    log::reset_logger();
}
