use crate::equality::{CategoryKey, KeySource};
use crate::options::EncodeOptions;
use ahash::AHashMap;
use std::hash::Hash;

#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
use rayon::prelude::*;

/// Lookup from a category value to the output column that reports it.
///
/// When several category rows share a key, the lowest row index wins and the later duplicates
/// never match anything. The table is immutable once built.
#[derive(Clone, Debug)]
pub struct CategoryKeyTable<K> {
    slots: AHashMap<CategoryKey<K>, usize>,
    rows: usize,
}

impl<K> CategoryKeyTable<K>
where
    K: Copy + Eq + Hash + Send + Sync,
{
    pub fn build<'a, S>(categories: &S, options: &EncodeOptions) -> Self
    where
        S: KeySource<'a, Key = K>,
    {
        #[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
        if options.wants_parallel(categories.len()) {
            if let Some(pool) = crate::parallel::rayon_pool() {
                return pool.install(|| Self::build_parallel(categories));
            }
        }
        #[cfg(not(all(feature = "parallel", not(target_arch = "wasm32"))))]
        let _ = options;

        Self::build_sequential(categories)
    }

    fn build_sequential<'a, S>(categories: &S) -> Self
    where
        S: KeySource<'a, Key = K>,
    {
        let rows = categories.len();
        let mut slots = AHashMap::with_capacity(rows);
        for row in 0..rows {
            slots.entry(categories.key(row)).or_insert(row);
        }
        Self { slots, rows }
    }

    #[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
    fn build_parallel<'a, S>(categories: &S) -> Self
    where
        S: KeySource<'a, Key = K>,
    {
        use dashmap::DashMap;

        let rows = categories.len();
        let shared: DashMap<CategoryKey<K>, usize, ahash::RandomState> =
            DashMap::with_capacity_and_hasher(rows, ahash::RandomState::new());

        (0..rows).into_par_iter().for_each(|row| {
            shared
                .entry(categories.key(row))
                .and_modify(|slot| *slot = (*slot).min(row))
                .or_insert(row);
        });

        Self {
            slots: shared.into_iter().collect(),
            rows,
        }
    }

    /// Output column for `key`, if any category row holds it.
    pub fn lookup(&self, key: &CategoryKey<K>) -> Option<usize> {
        self.slots.get(key).copied()
    }

    /// Number of category rows, i.e. the output width.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of distinct keys among the category rows (null counts as one key).
    pub fn distinct_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}
