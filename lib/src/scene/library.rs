use fnv::FnvHashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::marker::PhantomData;

/// Typed index of an entry stored in a [Library].
///
/// A handle is only meaningful for the library that issued it.
pub struct Handle<T> {
    index: u32,
    marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(index: usize) -> Self {
        Handle {
            index: index as u32,
            marker: PhantomData,
        }
    }

    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state)
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.index)
    }
}

/// Insertion-ordered arena of named entries.
///
/// Entries are deduplicated by key: inserting an existing key returns the handle of the entry
/// already stored and discards the new value.
#[derive(Debug, Clone)]
pub struct Library<T> {
    data: Vec<(String, T)>,
    index: FnvHashMap<String, u32>,
}

impl<T> Library<T> {
    pub fn new() -> Library<T> {
        Library {
            data: Vec::new(),
            index: FnvHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Library<T> {
        Library {
            data: Vec::with_capacity(capacity),
            index: FnvHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Inserts `data` under `key`, unless the key is already present.
    pub fn insert(&mut self, key: &str, data: T) -> Handle<T> {
        self.get_or_insert_with(key, || data)
    }

    /// Returns the entry stored under `key`, creating it with `f` on a miss.
    pub fn get_or_insert_with(&mut self, key: &str, f: impl FnOnce() -> T) -> Handle<T> {
        match self.find(key) {
            Some(handle) => handle,
            None => self.push_unchecked(key, f()),
        }
    }

    /// Fallible version of [Library::get_or_insert_with]: nothing is inserted if `f` fails.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: &str,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<Handle<T>, E> {
        match self.find(key) {
            Some(handle) => Ok(handle),
            None => Ok(self.push_unchecked(key, f()?)),
        }
    }

    /// Appends an entry even if the key is already present.
    ///
    /// [Library::find] keeps returning the first entry stored under a repeated key.
    pub fn push(&mut self, key: &str, data: T) -> Handle<T> {
        self.push_unchecked(key, data)
    }

    fn push_unchecked(&mut self, key: &str, data: T) -> Handle<T> {
        let id = self.data.len();
        self.index.entry(key.to_string()).or_insert(id as u32);
        self.data.push((key.to_string(), data));
        Handle::new(id)
    }

    pub fn find(&self, key: &str) -> Option<Handle<T>> {
        self.index.get(key).map(|id| Handle::new(*id as usize))
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.data.get(handle.index()).map(|(_, data)| data)
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.data.get_mut(handle.index()).map(|(_, data)| data)
    }

    pub fn key(&self, handle: Handle<T>) -> Option<&str> {
        self.data.get(handle.index()).map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &str, &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(id, (key, data))| (Handle::new(id), key.as_str(), data))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle<T>, &str, &mut T)> + '_ {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(id, (key, data))| (Handle::new(id), key.as_str(), data))
    }

    pub fn handles(&self) -> impl Iterator<Item = Handle<T>> {
        (0..self.data.len()).map(Handle::new)
    }
}

impl<T> Default for Library<T> {
    fn default() -> Self {
        Library::new()
    }
}

impl<T> IntoIterator for Library<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<T> FromIterator<(String, T)> for Library<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut library = Library::new();
        for (key, data) in iter {
            library.insert(&key, data);
        }
        library
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, Library};

    #[test]
    fn dedup_by_key() {
        let mut lib = Library::new();
        let a = lib.insert("a", 1);
        let b = lib.insert("b", 2);
        let again = lib.insert("a", 3);
        assert_eq!(a, again);
        assert_ne!(a, b);
        assert_eq!(lib.len(), 2);
        assert_eq!(lib.get(a), Some(&1));
        assert_eq!(lib.key(b), Some("b"));
    }

    #[test]
    fn lazy_insert() {
        let mut lib = Library::new();
        let mut calls = 0;
        for _ in 0..3 {
            lib.get_or_insert_with("mesh", || {
                calls += 1;
                "built"
            });
        }
        assert_eq!(calls, 1);
        let failed: Result<_, &str> = lib.get_or_try_insert_with("other", || Err("nope"));
        assert!(failed.is_err());
        assert!(lib.find("other").is_none());
        assert_eq!(lib.len(), 1);
    }

    #[test]
    fn push_keeps_duplicates() {
        let mut lib = Library::new();
        let first = lib.push("node", 'a');
        let second = lib.push("node", 'b');
        assert_ne!(first, second);
        assert_eq!(lib.len(), 2);
        assert_eq!(lib.find("node"), Some(first));
    }

    #[test]
    fn foreign_handle() {
        let lib: Library<u8> = ["x", "y"].iter().map(|k| (k.to_string(), 0)).collect();
        assert_eq!(lib.len(), 2);
        assert!(lib.get(Handle::new(5)).is_none());
        let order = lib.iter().map(|(_, key, _)| key).collect::<Vec<_>>();
        assert_eq!(order, vec!["x", "y"]);
    }
}
