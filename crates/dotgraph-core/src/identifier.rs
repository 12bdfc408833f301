//! Identity management for graph elements.
//!
//! Every graph owns a single [`Registry`] shared by reference with all of
//! its containers, so generated ids never collide anywhere in the tree.
//! Keys are arbitrary application values; the registry never inspects them
//! beyond equality and hashing.

use std::{cell::RefCell, collections::HashMap, fmt, hash::Hash, rc::Rc};

/// Prefix of every generated identifier in its textual form.
const ID_PREFIX: &str = "c";

/// A generated element identifier, unique for the lifetime of one graph.
///
/// Ids render as `c<counter>` in DOT output. They are opaque: the only
/// guarantee beyond distinctness is that a later registration receives a
/// higher counter value. `Ord` follows the counter, giving the render
/// ordering an explicit total tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(u32);

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ID_PREFIX}{}", self.0)
    }
}

/// Maps arbitrary application keys to stable generated [`Id`]s.
///
/// Once a key is assigned an id the mapping never changes; the counter
/// strictly increases; two distinct keys never receive the same id.
#[derive(Debug, Default)]
pub struct Registry<K> {
    ids: HashMap<K, Id>,
    next: u32,
}

impl<K> Registry<K>
where
    K: Eq + Hash,
{
    pub(crate) fn new() -> Self {
        Registry {
            ids: HashMap::new(),
            next: 0,
        }
    }

    /// Returns the id previously assigned to `key`, or assigns the next
    /// counter value. Never fails.
    pub fn register(&mut self, key: K) -> Id {
        *self.ids.entry(key).or_insert_with(|| {
            let id = Id(self.next);
            self.next += 1;
            id
        })
    }

    /// Returns the id previously assigned to `key`, if any. Never creates.
    pub fn lookup(&self, key: &K) -> Option<Id> {
        self.ids.get(key).copied()
    }

    /// Returns the number of registered keys.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Checks whether no key has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Registry handle shared across one graph's containment tree.
///
/// The build phase is single-writer (see the crate docs); `RefCell` is
/// enough, no cross-thread sharing is supported.
pub(crate) type SharedRegistry<K> = Rc<RefCell<Registry<K>>>;
