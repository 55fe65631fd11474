//! Unordered, sorted, and prefix-bounded traversal of the composite
//! trie/bucket structure.
//!
//! Because buckets are shared through `Rc<RefCell<_>>`, a lazily
//! streaming iterator would need to hold a live `Ref` guard across
//! `next()` calls while also owning the `Rc` it was borrowed from — a
//! self-referential structure that safe Rust cannot express directly.
//! Rather than reach for unsafe `Ref` extension, traversal is eager: it
//! walks the whole (sub)tree once, buffers `(key, value)` pairs into a
//! `Vec`, and hands back a plain `Vec` iterator. This also trivially
//! gives the "consistent snapshot" guarantee the spec asks for, since an
//! eager walk cannot observe a mutation that happens after it returns.

use crate::trie::{BucketRef, TrieChild, TrieNode};
use std::collections::HashSet;
use std::rc::Rc;

/// The result of a public iteration call: owns a fully materialized list
/// of `(key, value)` pairs.
pub struct Iter {
    items: std::vec::IntoIter<(Vec<u8>, u64)>,
}

impl Iter {
    pub(crate) fn new(mut items: Vec<(Vec<u8>, u64)>, sorted: bool) -> Self {
        if sorted {
            items.sort_by(|a, b| a.0.cmp(&b.0));
        }
        Iter {
            items: items.into_iter(),
        }
    }
}

impl Iterator for Iter {
    type Item = (Vec<u8>, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }
}

/// Depth-first, unordered walk of `node`'s subtree, deduplicating
/// aliased buckets by pointer identity.
pub(crate) fn collect_unordered(
    node: &TrieNode,
    prefix: &mut Vec<u8>,
    out: &mut Vec<(Vec<u8>, u64)>,
    visited: &mut HashSet<*const ()>,
) {
    if let Some(v) = node.value {
        out.push((prefix.clone(), v));
    }
    for (i, child) in node.children.iter().enumerate() {
        match child {
            TrieChild::Empty => {}
            TrieChild::Trie(child_node) => {
                prefix.push(i as u8);
                collect_unordered(child_node, prefix, out, visited);
                prefix.pop();
            }
            TrieChild::Pure(bucket) => {
                if !visited.insert(bucket_ptr(bucket)) {
                    continue;
                }
                let b = bucket.borrow();
                if let Some(v) = b.empty_value {
                    let mut full = prefix.clone();
                    full.push(i as u8);
                    out.push((full, v));
                }
                for (k, v) in b.table.iter() {
                    let mut full = prefix.clone();
                    full.push(i as u8);
                    full.extend_from_slice(k);
                    out.push((full, v));
                }
            }
            TrieChild::Hybrid(bucket) => {
                if !visited.insert(bucket_ptr(bucket)) {
                    continue;
                }
                let b = bucket.borrow();
                for (k, v) in b.table.iter() {
                    let mut full = prefix.clone();
                    full.extend_from_slice(k);
                    out.push((full, v));
                }
            }
        }
    }
}

/// Depth-first walk visiting children in ascending byte order. Hybrid
/// buckets aliased across several leading bytes are scanned once per
/// byte position, filtered down to the records that actually begin
/// with that byte, so no alias-collapsing is needed to keep output
/// sorted: concatenating each byte position's (locally sorted) slice in
/// ascending order already yields a globally sorted sequence.
pub(crate) fn collect_sorted(node: &TrieNode, prefix: &mut Vec<u8>, out: &mut Vec<(Vec<u8>, u64)>) {
    if let Some(v) = node.value {
        out.push((prefix.clone(), v));
    }
    for (i, child) in node.children.iter().enumerate() {
        let byte = i as u8;
        match child {
            TrieChild::Empty => {}
            TrieChild::Trie(child_node) => {
                prefix.push(byte);
                collect_sorted(child_node, prefix, out);
                prefix.pop();
            }
            TrieChild::Pure(bucket) => {
                let b = bucket.borrow();
                let mut slice: Vec<(Vec<u8>, u64)> = Vec::new();
                if let Some(v) = b.empty_value {
                    let mut full = prefix.clone();
                    full.push(byte);
                    slice.push((full, v));
                }
                slice.extend(b.table.iter().map(|(k, v)| {
                    let mut full = prefix.clone();
                    full.push(byte);
                    full.extend_from_slice(k);
                    (full, v)
                }));
                slice.sort_by(|a, b| a.0.cmp(&b.0));
                out.extend(slice);
            }
            TrieChild::Hybrid(bucket) => {
                let b = bucket.borrow();
                let mut slice: Vec<(Vec<u8>, u64)> = b
                    .table
                    .iter()
                    .filter(|(k, _)| k.first() == Some(&byte))
                    .map(|(k, v)| {
                        let mut full = prefix.clone();
                        full.extend_from_slice(k);
                        (full, v)
                    })
                    .collect();
                slice.sort_by(|a, b| a.0.cmp(&b.0));
                out.extend(slice);
            }
        }
    }
}

fn bucket_ptr(bucket: &BucketRef) -> *const () {
    Rc::as_ptr(bucket) as *const ()
}

/// Descend `prefix` through trie nodes, then collect every key that
/// begins with `prefix`, in the requested order.
pub(crate) fn collect_prefix(root: &TrieNode, prefix: &[u8], sorted: bool) -> Vec<(Vec<u8>, u64)> {
    let mut node = root;
    let mut consumed: Vec<u8> = Vec::new();
    let mut idx = 0usize;

    loop {
        if idx == prefix.len() {
            let mut out = Vec::new();
            if sorted {
                collect_sorted(node, &mut consumed, &mut out);
            } else {
                collect_unordered(node, &mut consumed, &mut out, &mut HashSet::new());
            }
            return out;
        }

        let byte = prefix[idx];
        match &node.children[byte as usize] {
            TrieChild::Empty => return Vec::new(),
            TrieChild::Trie(child_node) => {
                node = child_node;
                consumed.push(byte);
                idx += 1;
            }
            TrieChild::Pure(bucket) => {
                let remaining = &prefix[idx + 1..];
                return collect_bucket_with_prefix(bucket, true, byte, &consumed, remaining, sorted);
            }
            TrieChild::Hybrid(bucket) => {
                let remaining = &prefix[idx..];
                return collect_bucket_with_prefix(
                    bucket, false, byte, &consumed, remaining, sorted,
                );
            }
        }
    }
}

fn collect_bucket_with_prefix(
    bucket: &BucketRef,
    is_pure: bool,
    leading_byte: u8,
    consumed: &[u8],
    remaining_prefix: &[u8],
    sorted: bool,
) -> Vec<(Vec<u8>, u64)> {
    let b = bucket.borrow();
    let mut out: Vec<(Vec<u8>, u64)> = Vec::new();
    if is_pure && remaining_prefix.is_empty() {
        if let Some(v) = b.empty_value {
            let mut full = consumed.to_vec();
            full.push(leading_byte);
            out.push((full, v));
        }
    }
    out.extend(
        b.table
            .iter()
            .filter(|(k, _)| {
                k.len() >= remaining_prefix.len() && &k[..remaining_prefix.len()] == remaining_prefix
            })
            .map(|(k, v)| {
                let mut full = consumed.to_vec();
                if is_pure {
                    full.push(leading_byte);
                }
                full.extend_from_slice(k);
                (full, v)
            }),
    );
    if sorted {
        out.sort_by(|a, b| a.0.cmp(&b.0));
    }
    out
}

#[cfg(test)]
mod tests {
    // Exercised indirectly through `HatTrie`'s own test suite, which has
    // access to concrete buckets/tries to build fixtures from.
}
