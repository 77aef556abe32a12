use crate::category::CategoryKeyTable;
use crate::equality::KeySource;
use crate::options::EncodeOptions;
use std::hash::Hash;

#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
use rayon::prelude::*;

/// Per input row, the matched output column (`None` when the row matches no category).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    matches: Vec<Option<usize>>,
}

impl Classification {
    pub fn from_matches(matches: Vec<Option<usize>>) -> Self {
        Self { matches }
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<usize> {
        self.matches.get(row).copied().flatten()
    }

    pub fn matches(&self) -> &[Option<usize>] {
        &self.matches
    }

    /// Number of input rows that matched some category.
    pub fn matched_rows(&self) -> usize {
        self.matches.iter().filter(|m| m.is_some()).count()
    }
}

/// Classify every input row against the category table.
///
/// Rows are looked up independently, so the parallel path may evaluate them in any order.
pub fn classify<'a, K, S>(
    input: &S,
    table: &CategoryKeyTable<K>,
    options: &EncodeOptions,
) -> Classification
where
    K: Copy + Eq + Hash + Send + Sync,
    S: KeySource<'a, Key = K>,
{
    let rows = input.len();
    if table.is_empty() {
        return Classification {
            matches: vec![None; rows],
        };
    }

    #[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
    if options.wants_parallel(rows) {
        if let Some(pool) = crate::parallel::rayon_pool() {
            let matches: Vec<Option<usize>> = pool.install(|| {
                (0..rows)
                    .into_par_iter()
                    .map(|row| table.lookup(&input.key(row)))
                    .collect()
            });
            return Classification { matches };
        }
    }
    #[cfg(not(all(feature = "parallel", not(target_arch = "wasm32"))))]
    let _ = options;

    let matches: Vec<Option<usize>> = (0..rows)
        .map(|row| table.lookup(&input.key(row)))
        .collect();
    Classification { matches }
}
