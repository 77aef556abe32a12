/// Tuning knobs for [`crate::one_hot_encode_with_options`].
///
/// Options only decide *how* the work is scheduled; the produced table is identical for every
/// setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Minimum number of rows (input rows for classification, category rows for the key table)
    /// before a phase is run on the worker pool.
    pub parallel_threshold_rows: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            parallel_threshold_rows: 4_096,
        }
    }
}

impl EncodeOptions {
    /// Never use the worker pool.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold_rows: usize::MAX,
        }
    }

    /// Use the worker pool for every phase, regardless of size (when the `parallel` feature is
    /// available).
    pub fn always_parallel() -> Self {
        Self {
            parallel_threshold_rows: 0,
        }
    }

    #[cfg_attr(
        not(all(feature = "parallel", not(target_arch = "wasm32"))),
        allow(dead_code)
    )]
    pub(crate) fn wants_parallel(&self, rows: usize) -> bool {
        rows >= self.parallel_threshold_rows
    }
}
