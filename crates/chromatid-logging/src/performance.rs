// ABOUTME: Operation timer for candidate generation, background rescoring and palette search
// ABOUTME: Records elapsed time and work size on a debug span and warns when a budget is exceeded

use std::time::{Duration, Instant};
use tracing::{Level, Span, field, span, warn};

/// Times one engine operation.
///
/// The span `perf_timer` carries `operation`, then `items` (how much work
/// the operation covered) and `elapsed_ms` once the timer finishes or drops.
pub struct PerfTimer {
    span: Span,
    start: Instant,
    operation: &'static str,
    budget: Option<Duration>,
    items: Option<u64>,
}

impl PerfTimer {
    pub fn new(operation: &'static str) -> Self {
        let span = span!(
            Level::DEBUG,
            "perf_timer",
            operation,
            items = field::Empty,
            elapsed_ms = field::Empty
        );
        Self {
            span,
            start: Instant::now(),
            operation,
            budget: None,
            items: None,
        }
    }

    /// Warn when the operation takes longer than `budget`
    pub fn with_warn_threshold(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Record how many candidates, combinations or colors the operation covered
    pub fn record_items(&mut self, items: usize) {
        let items = items as u64;
        self.items = Some(items);
        self.span.record("items", items);
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Enter the timer's span so events from synchronous work nest under it.
    /// Do not hold the guard across an `.await`.
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }

    /// Stop timing and return the elapsed milliseconds
    pub fn finish(self) -> f64 {
        self.elapsed_ms()
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        self.span.record("elapsed_ms", elapsed_ms);

        if let Some(budget) = self.budget
            && elapsed > budget
        {
            warn!(
                operation = self.operation,
                elapsed_ms,
                budget_ms = budget.as_secs_f64() * 1000.0,
                items = self.items.unwrap_or(0),
                "Slow operation detected"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tracing_mock::{expect, subscriber};

    #[test]
    fn test_finish_reports_elapsed() {
        let timer = PerfTimer::new("generate_candidates");
        thread::sleep(Duration::from_millis(5));
        let elapsed = timer.finish();
        assert!(elapsed >= 5.0, "{elapsed}");
    }

    #[test]
    fn test_span_names_the_operation() {
        let (subscriber, handle) = subscriber::mock()
            .new_span(
                expect::span()
                    .named("perf_timer")
                    .with_fields(expect::field("operation").with_value(&"palette_search")),
            )
            .drop_span(expect::span().named("perf_timer"))
            .only()
            .run_with_handle();

        tracing::subscriber::with_default(subscriber, || {
            let mut timer = PerfTimer::new("palette_search");
            timer.record_items(512);
            timer.finish();
        });

        handle.assert_finished();
    }

    #[test]
    fn test_over_budget_warns_with_work_size() {
        let (subscriber, handle) = subscriber::mock()
            .new_span(expect::span().named("perf_timer"))
            .event(
                expect::event().at_level(Level::WARN).with_fields(
                    expect::field("operation")
                        .with_value(&"recalculate_on_background_change")
                        .and(expect::field("items").with_value(&130_u64))
                        .and(expect::msg("Slow operation detected")),
                ),
            )
            .drop_span(expect::span().named("perf_timer"))
            .only()
            .run_with_handle();

        tracing::subscriber::with_default(subscriber, || {
            let mut timer = PerfTimer::new("recalculate_on_background_change")
                .with_warn_threshold(Duration::from_millis(1));
            timer.record_items(130);
            thread::sleep(Duration::from_millis(5));
        });

        handle.assert_finished();
    }

    #[test]
    fn test_within_budget_is_silent() {
        let (subscriber, handle) = subscriber::mock()
            .new_span(expect::span().named("perf_timer"))
            .drop_span(expect::span().named("perf_timer"))
            .only()
            .run_with_handle();

        tracing::subscriber::with_default(subscriber, || {
            let timer =
                PerfTimer::new("generate_candidates").with_warn_threshold(Duration::from_secs(60));
            timer.finish();
        });

        handle.assert_finished();
    }
}
