use formula_columnar::{Column, DataType, Table};
use formula_onehot::{one_hot_encode, one_hot_encode_with_options, EncodeOptions, OneHotError};
use pretty_assertions::assert_eq;

fn bools(bits: &[u8]) -> Column {
    Column::bools(bits.iter().map(|&b| b != 0))
}

fn expected(columns: Vec<Column>) -> Table {
    Table::new(columns)
}

macro_rules! typed_tests {
    ($name:ident, $ty:ty) => {
        mod $name {
            use super::*;
            use pretty_assertions::assert_eq;

            #[test]
            fn basic() {
                let input =
                    Column::from_values(vec![8 as $ty, 8 as $ty, 8 as $ty, 9 as $ty, 9 as $ty]);
                let categories = Column::from_values(vec![8 as $ty, 9 as $ty]);

                let got = one_hot_encode(&input, &categories).unwrap();
                assert_eq!(
                    got,
                    expected(vec![bools(&[1, 1, 1, 0, 0]), bools(&[0, 0, 0, 1, 1])])
                );
            }

            #[test]
            fn nulls() {
                let input = Column::from_options([
                    Some(8 as $ty),
                    Some(8 as $ty),
                    None,
                    Some(9 as $ty),
                    Some(9 as $ty),
                ]);
                let categories = Column::from_options([Some(8 as $ty), Some(9 as $ty), None]);

                let got = one_hot_encode(&input, &categories).unwrap();
                assert_eq!(
                    got,
                    expected(vec![
                        bools(&[1, 1, 0, 0, 0]),
                        bools(&[0, 0, 0, 1, 1]),
                        bools(&[0, 0, 1, 0, 0]),
                    ])
                );
            }
        }
    };
}

typed_tests!(int8, i8);
typed_tests!(int16, i16);
typed_tests!(int32, i32);
typed_tests!(int64, i64);
typed_tests!(uint8, u8);
typed_tests!(uint16, u16);
typed_tests!(uint32, u32);
typed_tests!(uint64, u64);
typed_tests!(float32, f32);
typed_tests!(float64, f64);

#[test]
fn bool_basic_and_nulls() {
    let input = Column::bool_options([Some(true), Some(true), None, Some(false), Some(false)]);
    let categories = Column::bool_options([Some(true), Some(false), None]);

    let got = one_hot_encode(&input, &categories).unwrap();
    assert_eq!(
        got,
        expected(vec![
            bools(&[1, 1, 0, 0, 0]),
            bools(&[0, 0, 0, 1, 1]),
            bools(&[0, 0, 1, 0, 0]),
        ])
    );
}

#[test]
fn diagonal() {
    let input = Column::from_values(vec![1i32, 2, 3, 4, 5]);
    let categories = Column::from_values(vec![1i32, 2, 3, 4, 5]);

    let got = one_hot_encode(&input, &categories).unwrap();
    assert_eq!(
        got,
        expected(vec![
            bools(&[1, 0, 0, 0, 0]),
            bools(&[0, 1, 0, 0, 0]),
            bools(&[0, 0, 1, 0, 0]),
            bools(&[0, 0, 0, 1, 0]),
            bools(&[0, 0, 0, 0, 1]),
        ])
    );
}

#[test]
fn zero_input() {
    let input = Column::utf8(Vec::<&str>::new());
    let categories = Column::utf8(["rapids", "cudf"]);

    let got = one_hot_encode(&input, &categories).unwrap();
    assert_eq!(got, expected(vec![bools(&[]), bools(&[])]));
    assert_eq!(got.row_count(), Some(0));
}

#[test]
fn zero_categories() {
    let input = Column::utf8(["ji", "ji", "ji"]);
    let categories = Column::utf8(Vec::<&str>::new());

    let got = one_hot_encode(&input, &categories).unwrap();
    assert_eq!(got, Table::empty());
}

#[test]
fn zero_input_and_categories() {
    let input = Column::utf8(Vec::<&str>::new());
    let categories = Column::utf8(Vec::<&str>::new());

    let got = one_hot_encode(&input, &categories).unwrap();
    assert_eq!(got.column_count(), 0);
}

#[test]
fn one_category() {
    let input = Column::utf8(["ji", "ji", "ji"]);
    let categories = Column::utf8(["ji"]);

    let got = one_hot_encode(&input, &categories).unwrap();
    assert_eq!(got, expected(vec![bools(&[1, 1, 1])]));
}

#[test]
fn nans() {
    let nan = f32::NAN;
    let input = Column::from_values(vec![8.0f32, 8.0, 8.0, 9.0, nan]);
    let categories = Column::from_values(vec![8.0f32, 9.0, nan]);

    let got = one_hot_encode(&input, &categories).unwrap();
    assert_eq!(
        got,
        expected(vec![
            bools(&[1, 1, 1, 0, 0]),
            bools(&[0, 0, 0, 1, 0]),
            bools(&[0, 0, 0, 0, 1]),
        ])
    );
}

#[test]
fn nan_with_other_payload_matches_nothing() {
    let nan = f64::NAN;
    let signaling = f64::from_bits(0x7FF0_0000_0000_0001);
    let input = Column::from_values(vec![signaling, nan, -nan]);
    let categories = Column::from_values(vec![nan]);

    let got = one_hot_encode(&input, &categories).unwrap();
    assert_eq!(got, expected(vec![bools(&[0, 1, 0])]));
}

#[test]
fn signed_zeros_are_different_categories() {
    let input = Column::from_values(vec![0.0f64, -0.0, 0.0]);
    let categories = Column::from_values(vec![-0.0f64, 0.0]);

    let got = one_hot_encode(&input, &categories).unwrap();
    assert_eq!(got, expected(vec![bools(&[0, 1, 0]), bools(&[1, 0, 1])]));
}

#[test]
fn strings() {
    let input = Column::utf8_options([
        Some("hello"),
        Some("rapidsai"),
        Some("cudf"),
        Some("hello"),
        None,
        Some("hello"),
        Some("world"),
        None,
    ]);
    let categories = Column::utf8_options([Some("hello"), Some("world"), None]);

    let got = one_hot_encode(&input, &categories).unwrap();
    assert_eq!(
        got,
        expected(vec![
            bools(&[1, 0, 0, 1, 0, 1, 0, 0]),
            bools(&[0, 0, 0, 0, 0, 0, 1, 0]),
            bools(&[0, 0, 0, 0, 1, 0, 0, 1]),
        ])
    );
}

#[test]
fn empty_string_is_not_null() {
    let input = Column::utf8_options([Some(""), None, Some("")]);
    let categories = Column::utf8_options([None, Some("")]);

    let got = one_hot_encode(&input, &categories).unwrap();
    assert_eq!(got, expected(vec![bools(&[0, 1, 0]), bools(&[1, 0, 1])]));
}

#[test]
fn null_input_without_null_category_matches_nothing() {
    let input = Column::from_options([Some(1i64), None]);
    let categories = Column::from_values(vec![1i64, 2]);

    let got = one_hot_encode(&input, &categories).unwrap();
    assert_eq!(got, expected(vec![bools(&[1, 0]), bools(&[0, 0])]));
}

#[test]
fn dictionary() {
    let input = Column::utf8(["aa", "xx", "aa", "aa", "yy", "ef"])
        .dictionary_encode()
        .unwrap();
    let categories = Column::utf8(["aa", "ef"]).dictionary_encode().unwrap();

    let got = one_hot_encode(&input, &categories).unwrap();
    assert_eq!(
        got,
        expected(vec![bools(&[1, 0, 1, 1, 0, 0]), bools(&[0, 0, 0, 0, 0, 1])])
    );
}

#[test]
fn dictionary_and_plain_mix() {
    let plain_input = Column::utf8_options([Some("aa"), None, Some("ef"), Some("zz")]);
    let plain_categories = Column::utf8_options([Some("ef"), None, Some("aa")]);
    let dict_input = plain_input.dictionary_encode().unwrap();
    let dict_categories = plain_categories.dictionary_encode().unwrap();

    let want = one_hot_encode(&plain_input, &plain_categories).unwrap();
    assert_eq!(
        want,
        expected(vec![
            bools(&[0, 0, 1, 0]),
            bools(&[0, 1, 0, 0]),
            bools(&[1, 0, 0, 0]),
        ])
    );
    assert_eq!(one_hot_encode(&dict_input, &plain_categories).unwrap(), want);
    assert_eq!(one_hot_encode(&plain_input, &dict_categories).unwrap(), want);
    assert_eq!(one_hot_encode(&dict_input, &dict_categories).unwrap(), want);
}

#[test]
fn mismatch_types() {
    let input = Column::utf8(["xx", "yy", "xx"]);
    let categories = Column::from_values(vec![1i64]);

    assert_eq!(
        one_hot_encode(&input, &categories),
        Err(OneHotError::TypeMismatch {
            input: DataType::Utf8,
            categories: DataType::Int64,
        })
    );
}

#[test]
fn mismatch_through_dictionary_keys() {
    let input = Column::utf8(["xx"]).dictionary_encode().unwrap();
    let categories = Column::from_values(vec![1i64]).dictionary_encode().unwrap();

    assert_eq!(
        one_hot_encode(&input, &categories),
        Err(OneHotError::TypeMismatch {
            input: DataType::Dictionary(Box::new(DataType::Utf8)),
            categories: DataType::Dictionary(Box::new(DataType::Int64)),
        })
    );
}

#[test]
fn duplicate_categories_report_lowest_row() {
    let input = Column::from_values(vec![3u8, 4, 3]);
    let categories = Column::from_values(vec![3u8, 4, 3]);

    for options in [EncodeOptions::sequential(), EncodeOptions::always_parallel()] {
        let got = one_hot_encode_with_options(&input, &categories, &options).unwrap();
        assert_eq!(
            got,
            expected(vec![bools(&[1, 0, 1]), bools(&[0, 1, 0]), bools(&[0, 0, 0])])
        );
    }
}

#[test]
fn repeated_calls_are_identical() {
    let input = Column::utf8_options([Some("a"), None, Some("b")]);
    let categories = Column::utf8_options([Some("b"), None]);

    let first = one_hot_encode(&input, &categories).unwrap();
    let second = one_hot_encode(&input, &categories).unwrap();
    assert_eq!(first, second);
}

#[test]
fn parallel_and_sequential_agree_on_large_input() {
    let rows = 20_000usize;
    let input = Column::from_options((0..rows).map(|i| {
        if i % 97 == 0 {
            None
        } else {
            Some((i % 13) as i64)
        }
    }));
    let categories =
        Column::from_options((0..10).map(|c| if c == 9 { None } else { Some(c as i64) }));

    let sequential =
        one_hot_encode_with_options(&input, &categories, &EncodeOptions::sequential()).unwrap();
    let parallel =
        one_hot_encode_with_options(&input, &categories, &EncodeOptions::always_parallel())
            .unwrap();
    assert_eq!(sequential, parallel);

    assert_eq!(sequential.column_count(), 10);
    assert_eq!(sequential.row_count(), Some(rows));
    let null_rows = (0..rows).filter(|i| i % 97 == 0).count();
    let null_column = sequential.column(9).unwrap().as_bool().unwrap();
    assert_eq!(null_column.values().count_ones(), null_rows);
}
