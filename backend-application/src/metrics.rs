use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    records_appended: AtomicU64,
    records_deleted: AtomicU64,
    stats_requests: AtomicU64,
    store_errors: AtomicU64,
}

impl Metrics {
    pub fn record_append(&self) {
        self.records_appended.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delete(&self) {
        self.records_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stats_request(&self) {
        self.stats_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_error(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let appended = self.records_appended.load(Ordering::Relaxed);
        let deleted = self.records_deleted.load(Ordering::Relaxed);
        let stats = self.stats_requests.load(Ordering::Relaxed);
        let errors = self.store_errors.load(Ordering::Relaxed);

        format!(
            "# TYPE toast_records_appended_total counter\n\
toast_records_appended_total {}\n\
# TYPE toast_records_deleted_total counter\n\
toast_records_deleted_total {}\n\
# TYPE toast_stats_requests_total counter\n\
toast_stats_requests_total {}\n\
# TYPE toast_store_errors_total counter\n\
toast_store_errors_total {}\n",
            appended, deleted, stats, errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_every_counter() {
        let metrics = Metrics::default();
        metrics.record_append();
        metrics.record_append();
        metrics.record_delete();
        metrics.record_store_error();

        let rendered = metrics.render_prometheus();
        assert!(rendered.contains("toast_records_appended_total 2"));
        assert!(rendered.contains("toast_records_deleted_total 1"));
        assert!(rendered.contains("toast_stats_requests_total 0"));
        assert!(rendered.contains("toast_store_errors_total 1"));
    }
}
