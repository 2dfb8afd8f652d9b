use prometheus::{
    Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry,
};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Order submissions (by resulting status) and rejections (by reason)
// - Order confirmation lookups
// - Notification email outcomes
// - Submission latency
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the entire application
pub struct Metrics {
    registry: Registry,

    // Submission Metrics
    pub orders_submitted: IntCounterVec,
    pub orders_rejected: IntCounterVec,
    pub submission_duration: Histogram,

    // Lookup Metrics
    pub order_lookups: IntCounterVec,

    // Notification Metrics
    pub emails_sent: IntCounterVec,
    pub email_failures: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_submitted = IntCounterVec::new(
            Opts::new("orders_submitted_total", "Orders persisted, by resulting status"),
            &["status"],
        )?;
        registry.register(Box::new(orders_submitted.clone()))?;

        let orders_rejected = IntCounterVec::new(
            Opts::new("orders_rejected_total", "Submissions rejected before persisting an order"),
            &["reason"],
        )?;
        registry.register(Box::new(orders_rejected.clone()))?;

        let submission_duration = Histogram::with_opts(
            HistogramOpts::new("order_submission_duration_seconds", "Order submission duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        )?;
        registry.register(Box::new(submission_duration.clone()))?;

        let order_lookups = IntCounterVec::new(
            Opts::new("order_lookups_total", "Order confirmation lookups"),
            &["outcome"],
        )?;
        registry.register(Box::new(order_lookups.clone()))?;

        let emails_sent = IntCounterVec::new(
            Opts::new("order_emails_sent_total", "Outcome emails dispatched, by template"),
            &["template"],
        )?;
        registry.register(Box::new(emails_sent.clone()))?;

        let email_failures = IntCounter::new(
            "order_email_failures_total",
            "Outcome emails that failed to send (swallowed)",
        )?;
        registry.register(Box::new(email_failures.clone()))?;

        Ok(Self {
            registry,
            orders_submitted,
            orders_rejected,
            submission_duration,
            order_lookups,
            emails_sent,
            email_failures,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record a persisted order
    pub fn record_submission(&self, status: &str) {
        self.orders_submitted.with_label_values(&[status]).inc();
    }

    /// Helper to record a rejected submission
    pub fn record_rejection(&self, reason: &str) {
        self.orders_rejected.with_label_values(&[reason]).inc();
    }

    /// Helper to record a lookup outcome
    pub fn record_lookup(&self, found: bool) {
        let outcome = if found { "found" } else { "not_found" };
        self.order_lookups.with_label_values(&[outcome]).inc();
    }

    /// Helper to record an email dispatch outcome
    pub fn record_email(&self, template: &str, success: bool) {
        if success {
            self.emails_sent.with_label_values(&[template]).inc();
        } else {
            self.email_failures.inc();
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}
