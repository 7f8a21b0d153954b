//! Metrics for the indexer storage layer.

#[derive(Debug, Clone)]
pub(crate) struct Metrics;

impl Metrics {
    pub(crate) const STORAGE_ROWS_WRITTEN_TOTAL: &'static str =
        "stakescan_storage_rows_written_total";
    pub(crate) const STORAGE_STATEMENT_ERROR_TOTAL: &'static str =
        "stakescan_storage_statement_error_total";

    /// Describes and zeroes all storage metrics. Called once when the
    /// database handle is constructed.
    pub(crate) fn init() {
        Self::describe();
        Self::zero();
    }

    fn describe() {
        metrics::describe_counter!(
            Self::STORAGE_ROWS_WRITTEN_TOTAL,
            metrics::Unit::Count,
            "Total number of rows written to the indexer store, per table",
        );

        metrics::describe_counter!(
            Self::STORAGE_STATEMENT_ERROR_TOTAL,
            metrics::Unit::Count,
            "Total number of statements rejected by the indexer store",
        );
    }

    fn zero() {
        metrics::counter!(Self::STORAGE_ROWS_WRITTEN_TOTAL,).increment(0);

        metrics::counter!(Self::STORAGE_STATEMENT_ERROR_TOTAL,).increment(0);
    }

    pub(crate) fn record_rows_written(table: &'static str, rows: u64) {
        metrics::counter!(
            Self::STORAGE_ROWS_WRITTEN_TOTAL,
            "table" => table,
        )
        .increment(rows);
    }

    pub(crate) fn record_statement_error() {
        metrics::counter!(Self::STORAGE_STATEMENT_ERROR_TOTAL,).increment(1);
    }
}
