//! Equality used to match input rows against category rows.
//!
//! This differs from the natural `PartialEq` of the value types:
//! - null is a key of its own: it equals null and nothing else
//! - floats compare by bit pattern, so a NaN matches a NaN with the same payload, while `0.0` and
//!   `-0.0` (or NaNs with different sign/payload) are distinct
//! - text compares byte-for-byte, and `""` is a present value
//!
//! Each row is turned into a [`CategoryKey`] whose derived `Eq`/`Hash` implement exactly these
//! rules, so the key table and the classifier cannot disagree.

use formula_columnar::{BoolColumn, DictionaryColumn, NativeType, PrimitiveColumn, StringColumn};
use std::fmt;
use std::hash::Hash;

/// The identity of one logical value under one-hot equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryKey<K> {
    Null,
    Value(K),
}

impl<K> CategoryKey<K> {
    pub fn is_null(&self) -> bool {
        matches!(self, CategoryKey::Null)
    }
}

/// Maps a fixed-width value to the bits it is compared by.
pub trait BitEq: Copy + Send + Sync {
    type Bits: Copy + Eq + Hash + Send + Sync + fmt::Debug + 'static;

    fn bits(self) -> Self::Bits;
}

macro_rules! bit_eq_identity {
    ($($ty:ty),*) => {
        $(
            impl BitEq for $ty {
                type Bits = $ty;

                fn bits(self) -> $ty {
                    self
                }
            }
        )*
    };
}

bit_eq_identity!(bool, i8, i16, i32, i64, u8, u16, u32, u64);

impl BitEq for f32 {
    type Bits = u32;

    fn bits(self) -> u32 {
        self.to_bits()
    }
}

impl BitEq for f64 {
    type Bits = u64;

    fn bits(self) -> u64 {
        self.to_bits()
    }
}

/// Row-wise access to [`CategoryKey`]s of a column borrowed for `'a`.
///
/// Implementations are read-only views, so they can be shared across worker threads.
pub trait KeySource<'a>: Sync {
    type Key: Copy + Eq + Hash + Send + Sync + 'a;

    fn len(&self) -> usize;

    fn key(&self, row: usize) -> CategoryKey<Self::Key>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct PrimitiveKeys<'a, T> {
    column: &'a PrimitiveColumn<T>,
}

impl<'a, T: NativeType> PrimitiveKeys<'a, T> {
    pub fn new(column: &'a PrimitiveColumn<T>) -> Self {
        Self { column }
    }
}

impl<'a, T: NativeType + BitEq> KeySource<'a> for PrimitiveKeys<'a, T> {
    type Key = T::Bits;

    fn len(&self) -> usize {
        self.column.len()
    }

    fn key(&self, row: usize) -> CategoryKey<T::Bits> {
        if self.column.is_valid(row) {
            CategoryKey::Value(self.column.value(row).bits())
        } else {
            CategoryKey::Null
        }
    }
}

pub struct BoolKeys<'a> {
    column: &'a BoolColumn,
}

impl<'a> BoolKeys<'a> {
    pub fn new(column: &'a BoolColumn) -> Self {
        Self { column }
    }
}

impl<'a> KeySource<'a> for BoolKeys<'a> {
    type Key = bool;

    fn len(&self) -> usize {
        self.column.len()
    }

    fn key(&self, row: usize) -> CategoryKey<bool> {
        if self.column.is_valid(row) {
            CategoryKey::Value(self.column.value(row).bits())
        } else {
            CategoryKey::Null
        }
    }
}

pub struct Utf8Keys<'a> {
    column: &'a StringColumn,
}

impl<'a> Utf8Keys<'a> {
    pub fn new(column: &'a StringColumn) -> Self {
        Self { column }
    }
}

impl<'a> KeySource<'a> for Utf8Keys<'a> {
    type Key = &'a str;

    fn len(&self) -> usize {
        self.column.len()
    }

    fn key(&self, row: usize) -> CategoryKey<&'a str> {
        let column: &'a StringColumn = self.column;
        if column.is_valid(row) {
            CategoryKey::Value(column.value(row))
        } else {
            CategoryKey::Null
        }
    }
}

/// Reads a dictionary column through its keys without decoding it.
///
/// A null index row is null; a valid index pointing at a null key is null too.
pub struct DictionaryKeys<'a, S> {
    column: &'a DictionaryColumn,
    keys: S,
}

impl<'a, S: KeySource<'a>> DictionaryKeys<'a, S> {
    /// `keys` must read `column.keys()`.
    pub fn new(column: &'a DictionaryColumn, keys: S) -> Self {
        debug_assert_eq!(keys.len(), column.keys().len());
        Self { column, keys }
    }
}

impl<'a, S: KeySource<'a>> KeySource<'a> for DictionaryKeys<'a, S> {
    type Key = S::Key;

    fn len(&self) -> usize {
        self.column.len()
    }

    fn key(&self, row: usize) -> CategoryKey<S::Key> {
        if self.column.is_valid(row) {
            self.keys.key(self.column.index(row) as usize)
        } else {
            CategoryKey::Null
        }
    }
}
