//! Single-pass grouping with numeric accumulation.
//!
//! Keys keep the order in which they were first encountered, which is what
//! makes the ranker's tie-breaking stable. Records whose key extractor
//! returns `None` are skipped; the rest of the run is unaffected.

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Borrow;
use std::hash::Hash;

/// How a group's values collapse into one number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    #[default]
    Sum,
    Mean,
}

/// Running sum and count for one key
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    pub sum: f64,
    pub count: usize,
}

impl Tally {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    pub fn reduce(&self, reduction: Reduction) -> f64 {
        match reduction {
            Reduction::Sum => self.sum,
            Reduction::Mean => self.mean(),
        }
    }
}

/// A grouping key paired with its accumulated total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateEntry<K> {
    pub key: K,
    pub total: f64,
}

impl<K> AggregateEntry<K> {
    pub fn new(key: K, total: f64) -> Self {
        Self { key, total }
    }
}

/// Totals per key, in first-encounter order
///
/// Serializes as a JSON object `{ key: sum }`. Equality compares keys and
/// sums in order; counts are not part of it.
#[derive(Debug, Clone)]
pub struct Totals<K: Hash + Eq> {
    entries: IndexMap<K, Tally>,
}

impl<K: Hash + Eq> Default for Totals<K> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq> Totals<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to `key`, starting from 0 for a new key
    pub fn add(&mut self, key: K, value: f64) {
        self.entries.entry(key).or_default().add(value);
    }

    /// Summed total for a key
    pub fn get<Q>(&self, key: &Q) -> Option<f64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|t| t.sum)
    }

    pub fn tally<Q>(&self, key: &Q) -> Option<Tally>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(key, sum)` pairs in encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.entries.iter().map(|(k, t)| (k, t.sum))
    }

    /// Largest summed total, `None` when empty
    pub fn max_total(&self) -> Option<f64> {
        self.iter().map(|(_, v)| v).reduce(f64::max)
    }

    pub fn to_entries(&self) -> Vec<AggregateEntry<K>>
    where
        K: Clone,
    {
        self.iter()
            .map(|(k, total)| AggregateEntry::new(k.clone(), total))
            .collect()
    }
}

impl<K: Hash + Eq> PartialEq for Totals<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}

impl<K: Hash + Eq + Serialize> Serialize for Totals<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de, K> Deserialize<'de> for Totals<K>
where
    K: Hash + Eq + Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = IndexMap::<K, f64>::deserialize(deserializer)?;
        let mut totals = Totals::new();
        for (key, value) in map {
            totals.add(key, value);
        }
        Ok(totals)
    }
}

/// Two-level grouping: outer key, then inner key
///
/// Both levels keep first-encounter order.
#[derive(Debug, Clone, PartialEq)]
pub struct Grouped<O: Hash + Eq, I: Hash + Eq> {
    groups: IndexMap<O, Totals<I>>,
}

impl<O: Hash + Eq, I: Hash + Eq> Default for Grouped<O, I> {
    fn default() -> Self {
        Self {
            groups: IndexMap::new(),
        }
    }
}

impl<O: Hash + Eq, I: Hash + Eq> Grouped<O, I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, outer: O, inner: I, value: f64) {
        self.groups.entry(outer).or_default().add(inner, value);
    }

    pub fn get<Q>(&self, outer: &Q) -> Option<&Totals<I>>
    where
        O: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.groups.get(outer)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn outer_keys(&self) -> impl Iterator<Item = &O> {
        self.groups.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&O, &Totals<I>)> {
        self.groups.iter()
    }
}

/// Group records by one key and sum a value
///
/// # Arguments
/// * `records` - Records to aggregate (visited once)
/// * `key_fn` - Grouping key; `None` excludes the record
/// * `value_fn` - Value added to the record's group
///
/// # Example
/// ```ignore
/// let totals = group_sum(&records, |r| r.text(COUNTRY_FIELD).map(str::to_string),
///                        |r| r.number(REFUGEES_FIELD));
/// ```
pub fn group_sum<'a, R, K, It, FK, FV>(records: It, key_fn: FK, value_fn: FV) -> Totals<K>
where
    R: 'a,
    K: Hash + Eq,
    It: IntoIterator<Item = &'a R>,
    FK: Fn(&R) -> Option<K>,
    FV: Fn(&R) -> f64,
{
    let mut totals = Totals::new();
    let mut skipped = 0usize;

    for record in records {
        match key_fn(record) {
            Some(key) => totals.add(key, value_fn(record)),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} records without a grouping key", skipped);
    }

    totals
}

/// Group records by an outer then an inner key and sum a value
///
/// A record is excluded when either key is `None`.
pub fn group_nested<'a, R, O, I, It, FO, FI, FV>(
    records: It,
    outer_fn: FO,
    inner_fn: FI,
    value_fn: FV,
) -> Grouped<O, I>
where
    R: 'a,
    O: Hash + Eq,
    I: Hash + Eq,
    It: IntoIterator<Item = &'a R>,
    FO: Fn(&R) -> Option<O>,
    FI: Fn(&R) -> Option<I>,
    FV: Fn(&R) -> f64,
{
    let mut grouped = Grouped::new();
    let mut skipped = 0usize;

    for record in records {
        match (outer_fn(record), inner_fn(record)) {
            (Some(outer), Some(inner)) => grouped.add(outer, inner, value_fn(record)),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} records without a complete grouping key", skipped);
    }

    grouped
}
