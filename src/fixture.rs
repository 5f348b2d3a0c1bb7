use rand::Rng;

use crate::container::{Container, HashContainer, Populated, Staged, TreeContainer};
use crate::error::BenchError;

/// Fixture is the per-invocation context handed from setup to the timed
/// lookup. It owns both containers and their marked keys, so nothing is
/// shared between invocations.
#[derive(Clone, Debug)]
pub struct Fixture {
    capacity: usize,
    tree: Populated<TreeContainer>,
    hash: Populated<HashContainer>,
}

impl Fixture {
    /// Populate a tree container and then a hash container, each with
    /// `capacity` random entries plus its own marked key. Both draw from
    /// `rng` in sequence, so their key sets are independent.
    ///
    /// Storage for both is reserved before either is filled, a refused
    /// allocation fails the setup without inserting anything.
    pub fn setup<R: Rng>(capacity: usize, rng: &mut R) -> Result<Fixture, BenchError> {
        let tree = Staged::<TreeContainer>::new(capacity)?;
        let hash = Staged::<HashContainer>::new(capacity)?;
        let tree = tree.fill(&mut *rng);
        let hash = hash.fill(rng);
        Ok(Fixture {
            capacity,
            tree,
            hash,
        })
    }

    /// Replace both containers with empty instances of the same kind.
    pub fn reset(&mut self) {
        self.tree.container.reset();
        self.hash.container.reset();
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn tree(&self) -> &Populated<TreeContainer> {
        &self.tree
    }

    #[inline]
    pub fn hash(&self) -> &Populated<HashContainer> {
        &self.hash
    }

    /// Single lookup of the marked key in the tree container. This is the
    /// whole of the timed work for the ordered target.
    #[inline]
    pub fn tree_lookup(&self) -> Option<&'static str> {
        self.tree.container.lookup(&self.tree.marked)
    }

    /// Single lookup of the marked key in the hash container.
    #[inline]
    pub fn hash_lookup(&self) -> Option<&'static str> {
        self.hash.container.lookup(&self.hash.marked)
    }

    /// Dump every entry of both containers, useful while debugging
    /// population. Never called from the timed region.
    pub fn pretty_print(&self) {
        for (key, value) in self.tree.container.entries().into_iter() {
            println!("[treeMap] Name: {}", key);
            println!("[treeMap] Value: {}", value);
        }
        for (key, value) in self.hash.container.entries().into_iter() {
            println!("[hashMap] Name: {}", key);
            println!("[hashMap] Value: {}", value);
        }
    }
}
