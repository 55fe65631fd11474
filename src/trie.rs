//! The fan-out-256 trie node.
//!
//! Each node carries an optional terminal value (set when some inserted
//! key ends exactly at this node) and 256 child references. A child is
//! either another trie node, a pure bucket, a hybrid bucket, or absent.
//!
//! This is the safe realization of the spec's "one-byte kind flag read
//! at a known offset": a tagged `enum` stored behind `Rc`/`Box`
//! indirection instead of a hand-rolled union with a manual discriminant
//! byte. Trie nodes are never aliased (a burst always installs a freshly
//! allocated node into exactly one parent slot), so they are owned
//! through a plain `Box`; buckets *can* be aliased across many leading
//! bytes, so they are shared through `Rc<RefCell<_>>`.

use crate::bucket::Bucket;
use std::cell::RefCell;
use std::rc::Rc;

pub(crate) type BucketRef = Rc<RefCell<Bucket>>;

pub(crate) enum TrieChild {
    Empty,
    Trie(Box<TrieNode>),
    Pure(BucketRef),
    Hybrid(BucketRef),
}

impl Clone for TrieChild {
    fn clone(&self) -> Self {
        match self {
            TrieChild::Empty => TrieChild::Empty,
            TrieChild::Trie(_) => panic!("trie nodes are never aliased and cannot be cloned"),
            TrieChild::Pure(b) => TrieChild::Pure(Rc::clone(b)),
            TrieChild::Hybrid(b) => TrieChild::Hybrid(Rc::clone(b)),
        }
    }
}

pub(crate) struct TrieNode {
    pub value: Option<u64>,
    pub children: Box<[TrieChild; 256]>,
}

impl TrieNode {
    /// A node with no terminal value and every child empty.
    pub fn empty() -> Self {
        TrieNode {
            value: None,
            children: Box::new(std::array::from_fn(|_| TrieChild::Empty)),
        }
    }

    /// The root node: all 256 children alias one hybrid bucket spanning
    /// the whole byte range, as required at trie initialization.
    pub fn new_root() -> Self {
        let bucket: BucketRef = Rc::new(RefCell::new(Bucket::new_hybrid(0x00, 0xff)));
        TrieNode {
            value: None,
            children: Box::new(std::array::from_fn(|_| {
                TrieChild::Hybrid(Rc::clone(&bucket))
            })),
        }
    }
}
