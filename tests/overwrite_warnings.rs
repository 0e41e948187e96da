//! Integration tests for the diagnostics emitted on re-registration.

use model_rules::infrastructure::mocks::MockCaptureLayer;
use model_rules::{ModelSchema, RuleRegistration, RuleRegistry};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

fn invoice() -> ModelSchema {
    ModelSchema::builder("billing", "Invoice")
        .field("total")
        .property("is_paid")
        .method("is_customer", 2)
        .build()
        .unwrap()
}

#[test]
fn test_second_registration_warns_once() {
    let capture = MockCaptureLayer::new();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let invoice = invoice();
    let registry = RuleRegistry::new();

    tracing::subscriber::with_default(subscriber, || {
        registry
            .register(&invoice, RuleRegistration::new("is_paid"))
            .unwrap();
        registry
            .register(&invoice, RuleRegistration::new("is_paid"))
            .unwrap();
    });

    let warnings = capture.captured_at(Level::WARN);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("is_paid"));
    assert!(warnings[0].message.contains("registered twice"));
    assert_eq!(warnings[0].field("model"), Some("billing.Invoice"));
    assert_eq!(warnings[0].target, "model_rules::application::registry");
}

#[test]
fn test_distinct_codenames_do_not_warn() {
    let capture = MockCaptureLayer::new();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let invoice = invoice();
    let registry = RuleRegistry::new();

    tracing::subscriber::with_default(subscriber, || {
        registry
            .register(&invoice, RuleRegistration::new("is_paid"))
            .unwrap();
        registry
            .register(&invoice, RuleRegistration::new("is_customer"))
            .unwrap();
        registry
            .register(&invoice, RuleRegistration::new("has_total").field_name("total"))
            .unwrap();
    });

    assert_eq!(capture.count_at(Level::WARN), 0);
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_rejected_registration_does_not_warn() {
    let capture = MockCaptureLayer::new();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let invoice = invoice();
    let registry = RuleRegistry::new();

    tracing::subscriber::with_default(subscriber, || {
        registry
            .register(&invoice, RuleRegistration::new("is_paid"))
            .unwrap();
        assert!(registry
            .register(&invoice, RuleRegistration::new("is_paid").field_name("missing"))
            .is_err());
    });

    assert_eq!(capture.count_at(Level::WARN), 0);
    assert_eq!(
        registry.get("is_paid", invoice.model()).unwrap().field_name(),
        "is_paid"
    );

    let rejected = capture.captured_at(Level::DEBUG);
    assert!(rejected
        .iter()
        .any(|event| event.message == "rule registration rejected"));
}

#[test]
fn test_intentional_overwrite_logs_at_debug() {
    let capture = MockCaptureLayer::new();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let invoice = invoice();
    let registry = RuleRegistry::new();

    tracing::subscriber::with_default(subscriber, || {
        registry
            .register(&invoice, RuleRegistration::new("is_paid"))
            .unwrap();
        registry
            .register(
                &invoice,
                RuleRegistration::new("is_paid")
                    .description("replaced in test setup")
                    .allow_overwrite(true),
            )
            .unwrap();
    });

    assert_eq!(capture.count_at(Level::WARN), 0);
    assert!(capture
        .captured_at(Level::DEBUG)
        .iter()
        .any(|event| event.message == "rule replaced"));
    assert_eq!(
        registry.get("is_paid", invoice.model()).unwrap().description(),
        "replaced in test setup"
    );
}
