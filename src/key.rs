use std::fmt;

/// Value stored against every key in both containers.
pub const MAP_ELEMENT: &str = "MyBenchmark App for \"TreeMap vs HashMap comparison\"";

/// MapKey wraps a signed 32-bit integer. Equality, ordering and hashing
/// are those of the wrapped integer and nothing else.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct MapKey(i32);

impl MapKey {
    #[inline]
    pub fn new(key: i32) -> MapKey {
        MapKey(key)
    }

    /// Return the wrapped integer.
    #[inline]
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for MapKey {
    fn from(key: i32) -> MapKey {
        MapKey(key)
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
