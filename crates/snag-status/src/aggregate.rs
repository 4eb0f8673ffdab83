//! Counting, ranking and adjacency views over a loaded reflection log.
//!
//! Every function is pure and linear in the number of reflections apart from
//! the final sort over distinct keys.

use std::collections::HashMap;

use serde::Serialize;
use snag_memory::Reflection;

/// A key (failure kind, pair key or signature) and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCount {
    pub key: String,
    pub count: usize,
}

impl KeyCount {
    fn new(key: impl Into<String>, count: usize) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

pub fn count_by_kind(reflections: &[Reflection]) -> HashMap<String, usize> {
    into_map(tally(reflections.iter().map(|r| r.failure_kind.as_str())))
}

/// Kinds sorted by descending count; equal counts keep first-seen order.
pub fn ranked_by_frequency(reflections: &[Reflection]) -> Vec<KeyCount> {
    ranked(tally(reflections.iter().map(|r| r.failure_kind.as_str())))
}

pub fn top_n(reflections: &[Reflection], n: usize) -> Vec<KeyCount> {
    let mut ranked = ranked_by_frequency(reflections);
    ranked.truncate(n);
    ranked
}

/// Count each adjacent pair `(i, i + 1)` under `"a|b"` with the kinds sorted.
pub fn adjacent_co_occurrence(reflections: &[Reflection]) -> HashMap<String, usize> {
    into_map(adjacent_pairs(reflections))
}

/// Pairs seen more than once, most frequent first.
pub fn top_co_occurrences(reflections: &[Reflection], n: usize) -> Vec<KeyCount> {
    let mut pairs = ranked(adjacent_pairs(reflections));
    pairs.retain(|pair| pair.count > 1);
    pairs.truncate(n);
    pairs
}

pub fn last_reflection(reflections: &[Reflection]) -> Option<&Reflection> {
    reflections.last()
}

pub fn pending_count(reflections: &[Reflection]) -> usize {
    reflections.iter().filter(|r| r.is_pending()).count()
}

/// Records without a signature (older logs) are left out.
pub fn count_by_signature(reflections: &[Reflection]) -> HashMap<String, usize> {
    into_map(tally(signatures(reflections)))
}

pub fn top_signatures(reflections: &[Reflection], n: usize) -> Vec<KeyCount> {
    let mut ranked = ranked(tally(signatures(reflections)));
    ranked.truncate(n);
    ranked
}

fn signatures(reflections: &[Reflection]) -> impl Iterator<Item = &str> {
    reflections
        .iter()
        .map(|r| r.signature.as_str())
        .filter(|signature| !signature.is_empty())
}

fn adjacent_pairs(reflections: &[Reflection]) -> Vec<KeyCount> {
    let keys: Vec<String> = reflections
        .windows(2)
        .map(|pair| pair_key(&pair[0].failure_kind, &pair[1].failure_kind))
        .collect();
    tally(keys.iter().map(String::as_str))
}

fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}|{b}")
    } else {
        format!("{b}|{a}")
    }
}

/// Counts in first-seen order.
fn tally<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<KeyCount> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<KeyCount> = Vec::new();
    for key in keys {
        match index.get(key) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(key, counts.len());
                counts.push(KeyCount::new(key, 1));
            }
        }
    }
    counts
}

fn ranked(mut counts: Vec<KeyCount>) -> Vec<KeyCount> {
    // Stable sort: ties stay in first-seen order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

fn into_map(counts: Vec<KeyCount>) -> HashMap<String, usize> {
    counts.into_iter().map(|kc| (kc.key, kc.count)).collect()
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
