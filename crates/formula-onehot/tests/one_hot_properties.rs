use formula_columnar::{Column, Table};
use formula_onehot::{one_hot_encode, one_hot_encode_with_options, EncodeOptions};
use proptest::prelude::*;

fn true_cells_in_row(table: &Table, row: usize) -> usize {
    table
        .columns()
        .iter()
        .filter(|c| c.as_bool().is_some_and(|b| b.value(row)))
        .count()
}

fn small_ints(max_len: usize) -> impl Strategy<Value = Vec<Option<i8>>> {
    prop::collection::vec(prop::option::weighted(0.8, 0i8..6), 0..max_len)
}

fn short_strings(max_len: usize) -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(prop::option::weighted(0.8, "[ab]{0,2}"), 0..max_len)
}

proptest! {
    #[test]
    fn each_row_matches_at_most_once(input in small_ints(64), categories in small_ints(8)) {
        let input = Column::from_options(input);
        let categories = Column::from_options(categories);
        let table = one_hot_encode(&input, &categories).unwrap();

        prop_assert_eq!(table.column_count(), categories.len());
        for column in table.columns() {
            prop_assert_eq!(column.len(), input.len());
            prop_assert_eq!(column.null_count(), 0);
        }
        for row in 0..input.len() {
            prop_assert!(true_cells_in_row(&table, row) <= 1);
        }
    }

    #[test]
    fn matches_agree_with_value_equality(input in small_ints(32), categories in small_ints(6)) {
        let table = one_hot_encode(
            &Column::from_options(input.clone()),
            &Column::from_options(categories.clone()),
        )
        .unwrap();

        for (row, value) in input.iter().enumerate() {
            let first_match = categories.iter().position(|c| c == value);
            for (col, column) in table.columns().iter().enumerate() {
                let hot = column.as_bool().unwrap().value(row);
                prop_assert_eq!(hot, first_match == Some(col));
            }
        }
    }

    #[test]
    fn dictionary_encoding_is_transparent(
        input in short_strings(48),
        categories in short_strings(6)
    ) {
        let input = Column::utf8_options(input);
        let categories = Column::utf8_options(categories);
        let dict_input = input.dictionary_encode().unwrap();
        let dict_categories = categories.dictionary_encode().unwrap();

        let plain = one_hot_encode(&input, &categories).unwrap();
        prop_assert_eq!(&one_hot_encode(&dict_input, &dict_categories).unwrap(), &plain);
        prop_assert_eq!(&one_hot_encode(&dict_input, &categories).unwrap(), &plain);
        prop_assert_eq!(&one_hot_encode(&input, &dict_categories).unwrap(), &plain);
    }

    #[test]
    fn schedule_does_not_change_result(input in small_ints(256), categories in small_ints(8)) {
        let input = Column::from_options(input);
        let categories = Column::from_options(categories);

        let sequential =
            one_hot_encode_with_options(&input, &categories, &EncodeOptions::sequential()).unwrap();
        let parallel =
            one_hot_encode_with_options(&input, &categories, &EncodeOptions::always_parallel())
                .unwrap();
        prop_assert_eq!(sequential, parallel);
    }
}
