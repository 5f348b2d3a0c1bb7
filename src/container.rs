use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

use rand::Rng;

use crate::error::BenchError;
use crate::key::{MapKey, MAP_ELEMENT};

/// Ordered container under test, tree backed.
pub type TreeContainer = BTreeMap<MapKey, &'static str>;

/// Hash container under test.
pub type HashContainer = HashMap<MapKey, &'static str>;

/// Kind of associative container being benchmarked.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ContainerKind {
    Ordered,
    Hash,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContainerKind::Ordered => write!(f, "ordered"),
            ContainerKind::Hash => write!(f, "hash"),
        }
    }
}

/// Container abstracts over the two maps so that population, lookup and
/// reset are written once.
pub trait Container: Sized {
    const KIND: ContainerKind;

    /// Create an empty container able to hold `capacity` entries.
    fn try_with_capacity(capacity: usize) -> Result<Self, BenchError>;

    /// Insert `value` for `key` only if `key` is not already present.
    /// Return true if a new entry was created. An existing value is
    /// never overwritten.
    fn insert_if_absent(&mut self, key: MapKey, value: &'static str) -> bool;

    /// Get the value for key.
    fn lookup(&self, key: &MapKey) -> Option<&'static str>;

    /// Return number of entries in this container.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the contents with an empty instance of the same kind.
    fn reset(&mut self);

    /// Snapshot of all entries, in the container's own iteration order.
    fn entries(&self) -> Vec<(MapKey, &'static str)>;
}

impl Container for TreeContainer {
    const KIND: ContainerKind = ContainerKind::Ordered;

    fn try_with_capacity(_capacity: usize) -> Result<Self, BenchError> {
        Ok(BTreeMap::new())
    }

    #[inline]
    fn insert_if_absent(&mut self, key: MapKey, value: &'static str) -> bool {
        let mut inserted = false;
        self.entry(key).or_insert_with(|| {
            inserted = true;
            value
        });
        inserted
    }

    #[inline]
    fn lookup(&self, key: &MapKey) -> Option<&'static str> {
        self.get(key).copied()
    }

    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn reset(&mut self) {
        *self = BTreeMap::new();
    }

    fn entries(&self) -> Vec<(MapKey, &'static str)> {
        self.iter().map(|(k, v)| (*k, *v)).collect()
    }
}

impl Container for HashContainer {
    const KIND: ContainerKind = ContainerKind::Hash;

    fn try_with_capacity(capacity: usize) -> Result<Self, BenchError> {
        let mut map: HashContainer = HashMap::new();
        map.try_reserve(capacity)
            .map_err(|err| BenchError::ResourceExhaustion {
                kind: ContainerKind::Hash,
                requested: capacity,
                reason: err.to_string(),
            })?;
        Ok(map)
    }

    #[inline]
    fn insert_if_absent(&mut self, key: MapKey, value: &'static str) -> bool {
        let mut inserted = false;
        self.entry(key).or_insert_with(|| {
            inserted = true;
            value
        });
        inserted
    }

    #[inline]
    fn lookup(&self, key: &MapKey) -> Option<&'static str> {
        self.get(key).copied()
    }

    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn reset(&mut self) {
        *self = HashMap::new();
    }

    fn entries(&self) -> Vec<(MapKey, &'static str)> {
        self.iter().map(|(k, v)| (*k, *v)).collect()
    }
}

/// A freshly populated container along with its marked key.
#[derive(Clone, Debug)]
pub struct Populated<C>
where
    C: Container,
{
    pub container: C,
    pub marked: MapKey,
}

/// An empty container and a key buffer, both sized for `capacity + 1`
/// entries. Every allocation that can be refused happens while staging,
/// so a caller can stage several containers before filling any.
#[derive(Debug)]
pub struct Staged<C>
where
    C: Container,
{
    container: C,
    keys: Vec<MapKey>,
    capacity: usize,
}

impl<C> Staged<C>
where
    C: Container,
{
    /// Reserve storage for `capacity` random keys plus the marked key.
    pub fn new(capacity: usize) -> Result<Staged<C>, BenchError> {
        let exhausted = |requested: usize, reason: String| BenchError::ResourceExhaustion {
            kind: C::KIND,
            requested,
            reason,
        };

        let requested = capacity
            .checked_add(1)
            .ok_or_else(|| exhausted(capacity, "capacity overflow".to_string()))?;
        let mut keys: Vec<MapKey> = Vec::new();
        keys.try_reserve_exact(requested)
            .map_err(|err| exhausted(requested, err.to_string()))?;
        let container = C::try_with_capacity(requested)?;

        Ok(Staged {
            container,
            keys,
            capacity,
        })
    }

    /// Draw `capacity` random keys and then the marked key, inserting
    /// each with insert-if-absent.
    pub fn fill<R: Rng>(self, rng: &mut R) -> Populated<C> {
        let Staged {
            mut container,
            mut keys,
            capacity,
        } = self;

        keys.extend((0..=capacity).map(|_| MapKey::new(rng.gen::<i32>())));
        for key in keys.iter() {
            container.insert_if_absent(*key, MAP_ELEMENT);
        }
        // staged for capacity + 1, never empty.
        let marked = keys[capacity];

        Populated { container, marked }
    }
}

/// Fill a new container with `capacity` random keys followed by one more
/// random key, the marked key, all mapped to [`MAP_ELEMENT`].
///
/// Duplicate keys, including a marked key that collides with an earlier
/// one, keep the first inserted value. The container can therefore hold
/// fewer than `capacity + 1` entries, but always holds the marked key.
pub fn populate<C, R>(capacity: usize, rng: &mut R) -> Result<Populated<C>, BenchError>
where
    C: Container,
    R: Rng,
{
    Ok(Staged::<C>::new(capacity)?.fill(rng))
}
