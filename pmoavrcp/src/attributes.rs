//! Flattening of per-item attribute lists into parallel arrays.
//!
//! The native side cannot walk nested collections, so `N` items carrying
//! `M_i` attributes each are passed as three arrays: the per-item counts,
//! and the ids and values of every item concatenated in item order.
//! Item `i` starts at the prefix sum of `counts[..i]`; that offset table is
//! computed on demand and never stored.

use serde::Serialize;
use tracing::warn;

use crate::errors::{BrowseError, Result};

/// The attributes of a single item: parallel ids and values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AttributeSet {
    ids: Vec<u32>,
    values: Vec<String>,
}

impl AttributeSet {
    pub fn new(ids: Vec<u32>, values: Vec<String>) -> Result<Self> {
        if ids.len() != values.len() {
            return Err(BrowseError::length_mismatch(
                "attribute values",
                ids.len(),
                values.len(),
            ));
        }
        Ok(Self { ids, values })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: impl Into<u32>, value: impl Into<String>) {
        self.ids.push(id.into());
        self.values.push(value.into());
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn get(&self, id: u32) -> Option<&str> {
        self.ids
            .iter()
            .position(|candidate| *candidate == id)
            .map(|i| self.values[i].as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.ids
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }
}

impl<V: Into<String>> FromIterator<(u32, V)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (u32, V)>>(iter: I) -> Self {
        let mut set = AttributeSet::empty();
        for (id, value) in iter {
            set.push(id, value);
        }
        set
    }
}

/// Attributes of a sequence of items laid out as parallel arrays.
///
/// `counts.len()` is the item count and `ids.len() == values.len() ==
/// sum(counts)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FlattenedAttributes {
    counts: Vec<usize>,
    ids: Vec<u32>,
    values: Vec<String>,
}

impl FlattenedAttributes {
    /// Validates raw arrays received from elsewhere.
    pub fn from_parts(counts: Vec<usize>, ids: Vec<u32>, values: Vec<String>) -> Result<Self> {
        let total = count_total(&counts, ids.len())?;
        if total != ids.len() {
            return Err(BrowseError::length_mismatch("attribute ids", total, ids.len()));
        }
        if ids.len() != values.len() {
            return Err(BrowseError::length_mismatch(
                "attribute values",
                ids.len(),
                values.len(),
            ));
        }
        Ok(Self {
            counts,
            ids,
            values,
        })
    }

    pub fn item_count(&self) -> usize {
        self.counts.len()
    }

    /// Total number of attributes over all items.
    pub fn total(&self) -> usize {
        self.ids.len()
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Start index of each item's attributes in `ids`/`values`.
    pub fn offsets(&self) -> Vec<usize> {
        self.counts
            .iter()
            .scan(0usize, |acc, count| {
                let start = *acc;
                *acc += count;
                Some(start)
            })
            .collect()
    }

    /// The id and value slices of item `index`.
    pub fn item(&self, index: usize) -> Option<(&[u32], &[String])> {
        let count = *self.counts.get(index)?;
        let start: usize = self.counts[..index].iter().sum();
        let range = start..start + count;
        Some((&self.ids[range.clone()], &self.values[range]))
    }
}

/// Sum of `counts`; a sum past `usize::MAX` can never match `ids_len`.
fn count_total(counts: &[usize], ids_len: usize) -> Result<usize> {
    counts
        .iter()
        .try_fold(0usize, |acc, count| acc.checked_add(*count))
        .ok_or_else(|| {
            warn!(items = counts.len(), "attribute counts overflow");
            BrowseError::length_mismatch("attribute ids", usize::MAX, ids_len)
        })
}

pub struct AttributeFlattener;

impl AttributeFlattener {
    pub fn flatten(per_item: &[AttributeSet]) -> FlattenedAttributes {
        let total = per_item.iter().map(AttributeSet::count).sum();
        let mut flat = FlattenedAttributes {
            counts: Vec::with_capacity(per_item.len()),
            ids: Vec::with_capacity(total),
            values: Vec::with_capacity(total),
        };

        for set in per_item {
            flat.counts.push(set.count());
            flat.ids.extend_from_slice(&set.ids);
            flat.values.extend(set.values.iter().cloned());
        }
        flat
    }

    pub fn unflatten(
        counts: &[usize],
        ids: &[u32],
        values: &[String],
    ) -> Result<Vec<AttributeSet>> {
        let total = count_total(counts, ids.len())?;
        if total != ids.len() {
            warn!(expected = total, actual = ids.len(), "attribute id count mismatch");
            return Err(BrowseError::length_mismatch("attribute ids", total, ids.len()));
        }
        if ids.len() != values.len() {
            warn!(
                expected = ids.len(),
                actual = values.len(),
                "attribute value count mismatch"
            );
            return Err(BrowseError::length_mismatch(
                "attribute values",
                ids.len(),
                values.len(),
            ));
        }

        let mut start = 0;
        let sets = counts
            .iter()
            .map(|count| {
                let end = start + count;
                let set = AttributeSet {
                    ids: ids[start..end].to_vec(),
                    values: values[start..end].to_vec(),
                };
                start = end;
                set
            })
            .collect();
        Ok(sets)
    }

    pub fn unflatten_all(flat: &FlattenedAttributes) -> Vec<AttributeSet> {
        // Already validated at construction
        flat.counts
            .iter()
            .enumerate()
            .filter_map(|(i, _)| flat.item(i))
            .map(|(ids, values)| AttributeSet {
                ids: ids.to_vec(),
                values: values.to_vec(),
            })
            .collect()
    }
}
