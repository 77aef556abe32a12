use crate::classify::Classification;
use crate::options::EncodeOptions;
use formula_columnar::{BitVec, BoolColumn, Column, Table};

#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
use rayon::prelude::*;

/// Rows handled by one parallel task. A multiple of 64, so every chunk starts on a word boundary.
#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
const CHUNK_ROWS: usize = 64 * 64;

/// Materialize `width` non-nullable boolean columns from a classification.
///
/// Column `j` is true exactly at the rows classified as `j`. Matches at or past `width` are
/// ignored. The parallel path splits the rows into word-aligned chunks, so no two tasks ever
/// write the same word.
pub fn build_indicator_table(
    classification: &Classification,
    width: usize,
    options: &EncodeOptions,
) -> Table {
    if width == 0 {
        return Table::empty();
    }

    let rows = classification.len();

    #[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
    if options.wants_parallel(rows) {
        if let Some(pool) = crate::parallel::rayon_pool() {
            return pool.install(|| build_parallel(classification.matches(), width));
        }
    }
    #[cfg(not(all(feature = "parallel", not(target_arch = "wasm32"))))]
    let _ = options;

    let mut columns = vec![BitVec::with_len_all_false(rows); width];
    for (row, matched) in classification.matches().iter().enumerate() {
        if let Some(bits) = matched.and_then(|col| columns.get_mut(col)) {
            bits.set(row, true);
        }
    }
    into_table(columns)
}

#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
fn build_parallel(matches: &[Option<usize>], width: usize) -> Table {
    let rows = matches.len();
    let chunks: Vec<Vec<Vec<u64>>> = matches
        .par_chunks(CHUNK_ROWS)
        .map(|chunk| chunk_words(chunk, width))
        .collect();

    let columns: Vec<BitVec> = (0..width)
        .into_par_iter()
        .map(|col| {
            let mut words = Vec::with_capacity(rows.div_ceil(64));
            for chunk in &chunks {
                words.extend_from_slice(&chunk[col]);
            }
            BitVec::from_words(words, rows)
        })
        .collect();
    into_table(columns)
}

/// Per column, the words covering one chunk of rows (bit 0 is the chunk's first row).
#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
fn chunk_words(chunk: &[Option<usize>], width: usize) -> Vec<Vec<u64>> {
    let mut words = vec![vec![0u64; chunk.len().div_ceil(64)]; width];
    for (offset, matched) in chunk.iter().enumerate() {
        if let Some(column) = matched.and_then(|col| words.get_mut(col)) {
            column[offset / 64] |= 1u64 << (offset % 64);
        }
    }
    words
}

fn into_table(columns: Vec<BitVec>) -> Table {
    Table::new(
        columns
            .into_iter()
            .map(|bits| Column::Bool(BoolColumn::new(bits)))
            .collect(),
    )
}
