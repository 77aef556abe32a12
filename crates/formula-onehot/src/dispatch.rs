use crate::category::CategoryKeyTable;
use crate::classify::classify;
use crate::equality::{BoolKeys, DictionaryKeys, KeySource, PrimitiveKeys, Utf8Keys};
use crate::error::{OneHotError, OneHotResult};
use crate::indicator::build_indicator_table;
use crate::options::EncodeOptions;
use formula_columnar::{Column, DictionaryColumn, Table};

/// One-hot encode `input` against `categories`.
///
/// The result has one non-nullable boolean column per category row, each `input.len()` rows long;
/// column `j` is true where the input row equals category row `j` (see [`crate::equality`] for
/// how nulls and floats compare). Dictionary-encoded columns are matched by their decoded values.
///
/// Fails with [`OneHotError::TypeMismatch`] before allocating anything when the two columns do not
/// share a comparable type.
pub fn one_hot_encode(input: &Column, categories: &Column) -> OneHotResult<Table> {
    one_hot_encode_with_options(input, categories, &EncodeOptions::default())
}

pub fn one_hot_encode_with_options(
    input: &Column,
    categories: &Column,
    options: &EncodeOptions,
) -> OneHotResult<Table> {
    let input_type = input.data_type();
    let category_type = categories.data_type();
    let mismatch = || OneHotError::TypeMismatch {
        input: input_type.clone(),
        categories: category_type.clone(),
    };
    if input_type.comparable() != category_type.comparable() {
        return Err(mismatch());
    }

    log::debug!(
        "one-hot encoding {} rows of {input_type} against {} categories of {category_type} \
         (parallel threshold {} rows)",
        input.len(),
        categories.len(),
        options.parallel_threshold_rows,
    );

    let input = Resolved::new(input);
    let categories = Resolved::new(categories);

    let table = match (input.values, categories.values) {
        (Column::Bool(a), Column::Bool(b)) => {
            encode_resolved(input, BoolKeys::new(a), categories, BoolKeys::new(b), options)
        }
        (Column::Int8(a), Column::Int8(b)) => encode_resolved(
            input,
            PrimitiveKeys::new(a),
            categories,
            PrimitiveKeys::new(b),
            options,
        ),
        (Column::Int16(a), Column::Int16(b)) => encode_resolved(
            input,
            PrimitiveKeys::new(a),
            categories,
            PrimitiveKeys::new(b),
            options,
        ),
        (Column::Int32(a), Column::Int32(b)) => encode_resolved(
            input,
            PrimitiveKeys::new(a),
            categories,
            PrimitiveKeys::new(b),
            options,
        ),
        (Column::Int64(a), Column::Int64(b)) => encode_resolved(
            input,
            PrimitiveKeys::new(a),
            categories,
            PrimitiveKeys::new(b),
            options,
        ),
        (Column::UInt8(a), Column::UInt8(b)) => encode_resolved(
            input,
            PrimitiveKeys::new(a),
            categories,
            PrimitiveKeys::new(b),
            options,
        ),
        (Column::UInt16(a), Column::UInt16(b)) => encode_resolved(
            input,
            PrimitiveKeys::new(a),
            categories,
            PrimitiveKeys::new(b),
            options,
        ),
        (Column::UInt32(a), Column::UInt32(b)) => encode_resolved(
            input,
            PrimitiveKeys::new(a),
            categories,
            PrimitiveKeys::new(b),
            options,
        ),
        (Column::UInt64(a), Column::UInt64(b)) => encode_resolved(
            input,
            PrimitiveKeys::new(a),
            categories,
            PrimitiveKeys::new(b),
            options,
        ),
        (Column::Float32(a), Column::Float32(b)) => encode_resolved(
            input,
            PrimitiveKeys::new(a),
            categories,
            PrimitiveKeys::new(b),
            options,
        ),
        (Column::Float64(a), Column::Float64(b)) => encode_resolved(
            input,
            PrimitiveKeys::new(a),
            categories,
            PrimitiveKeys::new(b),
            options,
        ),
        (Column::Utf8(a), Column::Utf8(b)) => {
            encode_resolved(input, Utf8Keys::new(a), categories, Utf8Keys::new(b), options)
        }
        // Dictionary keys are never dictionaries themselves, and the comparable types were
        // checked above, so only a keys/type disagreement can land here.
        _ => return Err(mismatch()),
    };

    Ok(table)
}

/// A column split into its plain values and, for dictionary columns, the index layer on top.
#[derive(Clone, Copy)]
struct Resolved<'a> {
    /// The column itself, or the keys column of a dictionary.
    values: &'a Column,
    dictionary: Option<&'a DictionaryColumn>,
}

impl<'a> Resolved<'a> {
    fn new(column: &'a Column) -> Self {
        match column {
            Column::Dictionary(dict) => Self {
                values: dict.keys(),
                dictionary: Some(dict),
            },
            plain => Self {
                values: plain,
                dictionary: None,
            },
        }
    }
}

/// Wrap each side in a dictionary view where needed and run the pipeline.
fn encode_resolved<'a, S>(
    input: Resolved<'a>,
    input_keys: S,
    categories: Resolved<'a>,
    category_keys: S,
    options: &EncodeOptions,
) -> Table
where
    S: KeySource<'a>,
    S::Key: Send + Sync,
{
    match (input.dictionary, categories.dictionary) {
        (None, None) => encode_keys(&input_keys, &category_keys, options),
        (Some(dict), None) => encode_keys(
            &DictionaryKeys::new(dict, input_keys),
            &category_keys,
            options,
        ),
        (None, Some(dict)) => encode_keys(
            &input_keys,
            &DictionaryKeys::new(dict, category_keys),
            options,
        ),
        (Some(input_dict), Some(category_dict)) => encode_keys(
            &DictionaryKeys::new(input_dict, input_keys),
            &DictionaryKeys::new(category_dict, category_keys),
            options,
        ),
    }
}

fn encode_keys<'a, K, I, C>(input: &I, categories: &C, options: &EncodeOptions) -> Table
where
    K: Copy + Eq + std::hash::Hash + Send + Sync,
    I: KeySource<'a, Key = K>,
    C: KeySource<'a, Key = K>,
{
    let table = CategoryKeyTable::build(categories, options);
    let classification = classify(input, &table, options);
    log::trace!(
        "one-hot: {} distinct category keys, {} of {} input rows matched",
        table.distinct_count(),
        classification.matched_rows(),
        classification.len(),
    );
    build_indicator_table(&classification, table.rows(), options)
}
