//! Structured log events emitted while a showcase runs.
//!
//! Requires `--features tracing`.

#![cfg(feature = "tracing")]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use spotlight::prelude::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Capture layer
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_tracing<F, R>(f: F) -> (R, Vec<CapturedEvent>)
where
    F: FnOnce() -> R,
{
    let capture = EventCapture::default();
    let events = Arc::clone(&capture.events);
    let subscriber = tracing_subscriber::registry().with(capture);
    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    (result, captured)
}

// ============================================================================
// Helpers
// ============================================================================

fn two_step_showcase() -> (Showcase, NodeId) {
    let mut tree = LayoutTree::default();
    let column = tree
        .push(tree.root(), Contribution::padded(Sides::all(16.0)))
        .unwrap();
    let mut showcase = Showcase::with_tree(ShowcaseConfig::default(), tree).unwrap();
    for i in 0..2 {
        showcase
            .register_step(i, showcase.step_config(), Box::new(|_| DialogContent::new("step")))
            .unwrap();
    }
    (showcase, column)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn transitions_are_logged_with_state_fields() {
    let (_, events) = with_captured_tracing(|| {
        let (mut showcase, column) = two_step_showcase();
        showcase.begin_layout_pass();
        showcase.measure(0, Rect::new(0.0, 0.0, 50.0, 20.0), column).unwrap();
        showcase.measure(1, Rect::new(0.0, 40.0, 50.0, 20.0), column).unwrap();
        showcase.layout_settled().unwrap();
        showcase.next().unwrap();
    });

    let transitions: Vec<_> = events
        .iter()
        .filter(|e| e.target == "spotlight" && e.fields.get("message").map(String::as_str) == Some("showcase transition"))
        .collect();
    assert_eq!(transitions.len(), 2);
    assert_eq!(transitions[0].level, tracing::Level::INFO);
    assert_eq!(transitions[0].fields["to"], "Running(0)");
    assert_eq!(transitions[1].fields["to"], "Running(1)");
    assert_eq!(transitions[1].fields["pending"], "false");

    assert!(
        events
            .iter()
            .any(|e| e.target == "spotlight::layout"
                && e.fields.get("message").map(String::as_str) == Some("layout pass settled"))
    );
}

#[test]
fn empty_start_warns() {
    let (result, events) = with_captured_tracing(|| {
        let mut showcase = Showcase::new(ShowcaseConfig::default()).unwrap();
        showcase.start()
    });
    assert!(result.is_err());
    assert!(events.iter().any(|e| e.level == tracing::Level::WARN
        && e.target == "spotlight::sequence"));
}

#[test]
fn unmeasured_step_logs_pending() {
    let (_, events) = with_captured_tracing(|| {
        let (mut showcase, _) = two_step_showcase();
        showcase.start().unwrap();
        assert!(showcase.is_pending());
    });
    assert!(events.iter().any(|e| {
        e.fields.get("message").map(String::as_str) == Some("anchor not fresh; overlay pending")
    }));
}
