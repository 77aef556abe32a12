#![no_main]

use formula_columnar::{Column, Table};
use formula_onehot::{one_hot_encode, OneHotError};
use libfuzzer_sys::fuzz_target;

/// Keep the harness itself bounded.
const MAX_INPUT_ROWS: usize = 4_096;
const MAX_CATEGORY_ROWS: usize = 64;

/// Decode a byte as a small nullable value; a zero low nibble is null.
fn cell(byte: u8) -> Option<u8> {
    if byte & 0x0F == 0 {
        None
    } else {
        Some(byte >> 5)
    }
}

fn build(kind: u8, cells: &[Option<u8>]) -> Column {
    match kind % 4 {
        0 => Column::from_options(cells.iter().map(|c| c.map(i64::from))),
        1 => Column::from_options(cells.iter().map(|c| c.map(|v| f64::from(v) - 2.0))),
        2 => Column::bool_options(cells.iter().map(|c| c.map(|v| v & 1 == 1))),
        _ => Column::utf8_options(
            cells
                .iter()
                .map(|c| c.map(|v| "abcdefgh"[..usize::from(v)].to_string())),
        ),
    }
}

fn row_sums_are_at_most_one(table: &Table, rows: usize) {
    for row in 0..rows {
        let hot = table
            .columns()
            .iter()
            .filter(|c| c.as_bool().is_some_and(|b| b.value(row)))
            .count();
        assert!(hot <= 1, "row {row} matched {hot} categories");
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let input_kind = data[0];
    let category_kind = data[1];
    let category_rows = usize::from(data[2]) % (MAX_CATEGORY_ROWS + 1);
    let rest = &data[3..];
    let (category_bytes, input_bytes) = rest.split_at(category_rows.min(rest.len()));
    let input_bytes = &input_bytes[..input_bytes.len().min(MAX_INPUT_ROWS)];

    let category_cells: Vec<Option<u8>> = category_bytes.iter().copied().map(cell).collect();
    let input_cells: Vec<Option<u8>> = input_bytes.iter().copied().map(cell).collect();
    let categories = build(category_kind, &category_cells);
    let input = build(input_kind, &input_cells);

    let table = match one_hot_encode(&input, &categories) {
        Ok(table) => table,
        Err(OneHotError::TypeMismatch { .. }) => {
            assert_ne!(input_kind % 4, category_kind % 4);
            return;
        }
    };

    assert_eq!(table.column_count(), categories.len());
    for column in table.columns() {
        assert_eq!(column.len(), input.len());
        assert_eq!(column.null_count(), 0);
    }
    row_sums_are_at_most_one(&table, input.len());

    // Dictionary encoding either side must not change the result.
    if let (Ok(dict_input), Ok(dict_categories)) =
        (input.dictionary_encode(), categories.dictionary_encode())
    {
        let encoded = one_hot_encode(&dict_input, &dict_categories);
        assert_eq!(encoded.as_ref().ok(), Some(&table));
    }
});
