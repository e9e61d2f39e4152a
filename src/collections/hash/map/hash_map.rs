use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash};
use std::{cmp, iter, mem};

use super::{IntoKeys, IntoValues, Iter, IterMut, Keys, Values, ValuesMut};
use crate::collections::contiguous::Vector;
use crate::collections::contiguous::buffer::{self, MIN_CAP};
use crate::collections::traits::hashing::{DefaultHashing, KeyHashing};
use crate::util::error::CapacityExhausted;
use crate::util::option::OptionExtension;
use crate::util::result::ResultExtension;

const LOAD_FACTOR_NUMERATOR: usize = 3;
const LOAD_FACTOR_DENOMINATOR: usize = 4;

/// A map of keys to values, stored in chained buckets chosen by a [`KeyHashing`] scheme.
///
/// Each bucket holds a singly linked chain of boxed entries, and every entry caches the hash of its
/// key. When an insertion pushes the load factor (entries per bucket) above 3/4, the number of
/// buckets doubles (with a minimum of 4) and every entry is moved to the bucket given by its
/// cached hash.
///
/// Keys are compared and hashed only through the map's [`KeyHashing`] scheme, which defaults to
/// [`DefaultHashing`] for keys implementing [`Hash`] and [`Eq`]. There is no special null key, an
/// `Option<K>` key treats [`None`] like any other value.
///
/// It is a logic error for keys in a HashMap to be manipulated in a way that changes their hash.
/// Because of this, HashMap's API prevents mutable access to its keys.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the HashMap.
/// - `c`: The length of the chain in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(1)`*, `O(n)` |
/// | `get` | `O(1)`, `O(c)` |
/// | `remove` | `O(1)`, `O(c)` |
/// | `contains_key` | `O(1)`, `O(c)` |
/// | `reserve` | `O(n)`**, `O(1)` |
///
/// \* If the new entry pushes the HashMap over its load factor, `insert` rehashes every entry,
/// taking `O(n)`.
///
/// \** If the HashMap has enough buckets for the additional entries already, `reserve` is `O(1)`.
pub struct HashMap<K, V, H: KeyHashing<K> = DefaultHashing> {
    pub(crate) buckets: Vector<Chain<K, V>>,
    pub(crate) len: usize,
    pub(crate) hashing: H,
}

pub(crate) type Chain<K, V> = Option<Box<Entry<K, V>>>;

pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
    pub(crate) next: Chain<K, V>,
}

impl<K: Hash + Eq, V> HashMap<K, V> {
    /// Creates a new HashMap with no buckets, using [`DefaultHashing`]. Memory will be allocated
    /// when the first entry is inserted.
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::hash::HashMap;
    /// let map: HashMap<&str, u32> = HashMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.bucket_count(), 0);
    /// ```
    pub fn new() -> HashMap<K, V> {
        HashMap::with_hashing(DefaultHashing::default())
    }

    /// Creates a new HashMap with enough buckets to hold `cap` entries without rehashing.
    ///
    /// # Panics
    /// Panics if the buckets can't be allocated.
    pub fn with_cap(cap: usize) -> HashMap<K, V> {
        HashMap::with_cap_and_hashing(cap, DefaultHashing::default())
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> HashMap<K, V, DefaultHashing<B>> {
    /// Creates a new HashMap which hashes keys with the provided [`BuildHasher`].
    pub fn with_hasher(hasher: B) -> HashMap<K, V, DefaultHashing<B>> {
        HashMap::with_hashing(DefaultHashing(hasher))
    }
}

impl<K, V, H: KeyHashing<K>> HashMap<K, V, H> {
    /// Creates a new HashMap with no buckets, using the provided `hashing` scheme for its keys.
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::hash::HashMap;
    /// # use standard_collections::collections::traits::FnHashing;
    /// let mut map = HashMap::with_hashing(FnHashing::new(
    ///     |k: &String| k.len() as u64,
    ///     |a: &String, b: &String| a.eq_ignore_ascii_case(b),
    /// ));
    /// map.insert(String::from("Key"), 1);
    /// assert_eq!(map.insert(String::from("KEY"), 2), Some(1));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub const fn with_hashing(hashing: H) -> HashMap<K, V, H> {
        HashMap {
            buckets: Vector::new(),
            len: 0,
            hashing,
        }
    }

    /// Creates a new HashMap with enough buckets to hold `cap` entries without rehashing, using
    /// the provided `hashing` scheme for its keys.
    ///
    /// # Panics
    /// Panics if the buckets can't be allocated.
    pub fn with_cap_and_hashing(cap: usize, hashing: H) -> HashMap<K, V, H> {
        let mut map = HashMap::with_hashing(hashing);
        map.reserve(cap);
        map
    }

    /// Returns the number of entries in the HashMap.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the HashMap contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets currently allocated.
    pub const fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the ratio of entries to buckets, or 0 if there are no buckets.
    pub fn load_factor(&self) -> f64 {
        if self.bucket_count() == 0 {
            return 0.0;
        }
        self.len as f64 / self.bucket_count() as f64
    }

    /// Returns a reference to the hashing scheme used by this HashMap.
    pub const fn hashing(&self) -> &H {
        &self.hashing
    }

    /// Inserts the provided `key`-`value` pair into the HashMap, rehashing if the load factor is
    /// exceeded. If the key was already associated with a value, the previous value is returned
    /// and the stored key is left unchanged.
    ///
    /// # Panics
    /// Panics if the HashMap needs to rehash and the new buckets can't be allocated, see
    /// [`HashMap::try_insert`].
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::hash::HashMap;
    /// let mut map = HashMap::new();
    /// assert_eq!(map.insert("A", 1), None);
    /// assert_eq!(map.insert("B", 2), None);
    /// assert_eq!(map.insert("A", 3), Some(1));
    /// assert_eq!(map.get(&"A"), Some(&3));
    /// assert_eq!(map.len(), 2);
    /// ```
    #[track_caller]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.try_insert(key, value).throw()
    }

    /// Inserts the provided `key`-`value` pair, returning an error if the HashMap needs to rehash
    /// and the new buckets can't be allocated. On error, the HashMap is unchanged and the pair is
    /// dropped.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, CapacityExhausted> {
        let hash = self.hashing.hash(&key);
        if let Some(entry) = self.find_mut(hash, &key) {
            return Ok(Some(mem::replace(&mut entry.value, value)));
        }

        // Rehashing before the entry is linked gives the same table as rehashing straight after,
        // and a failed allocation then leaves the map as it was.
        let new_len = self.len.checked_add(1).ok_or(CapacityExhausted)?;
        if exceeds_load(new_len, self.bucket_count()) {
            let bucket_count = cmp::max(
                buffer::grown_cap(self.bucket_count())?,
                buckets_for(new_len)?,
            );
            self.try_rehash(bucket_count)?;
        }

        // UNREACHABLE: A HashMap with no buckets always exceeds its load, so it has just grown.
        let index = unsafe { self.bucket_index(hash).unreachable() };

        let mut cursor = &mut self.buckets[index];
        while let Some(entry) = cursor {
            cursor = &mut entry.next;
        }
        *cursor = Some(Box::new(Entry {
            key,
            value,
            hash,
            next: None,
        }));

        self.len = new_len;
        Ok(None)
    }

    /// Returns a reference to the value associated with the provided `key` or None if the map
    /// contains no value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(self.hashing.hash(key), key).map(|entry| &entry.value)
    }

    /// Returns the stored key and its value for the provided `key`, or None if there is no entry.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find(self.hashing.hash(key), key).map(|entry| (&entry.key, &entry.value))
    }

    /// Returns a mutable reference to the value associated with the provided `key` or None if the
    /// map contains no value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hashing.hash(key);
        self.find_mut(hash, key).map(|entry| &mut entry.value)
    }

    /// Returns true if there is a value associated with the provided `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(self.hashing.hash(key), key).is_some()
    }

    /// Removes the entry associated with `key`, returning the value if it exists.
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::hash::HashMap;
    /// let mut map: HashMap<_, _> = [("A", 1), ("B", 2)].into_iter().collect();
    /// assert_eq!(map.remove(&"A"), Some(1));
    /// assert_eq!(map.remove(&"A"), None);
    /// assert!(!map.contains_key(&"A"));
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry associated with `key`, returning the stored key and value if it exists.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hashing.hash(key);
        let index = self.bucket_index(hash)?;
        let position = chain_entries(&self.buckets[index])
            .position(|entry| entry.hash == hash && self.hashing.eq(&entry.key, key))?;

        let mut cursor = &mut self.buckets[index];
        for _ in 0..position {
            // UNREACHABLE: The chain has more than position entries.
            cursor = unsafe { &mut cursor.as_mut().unreachable().next };
        }

        // UNREACHABLE: The entry at position was found above.
        let Entry { key, value, next, .. } = *unsafe { cursor.take().unreachable() };
        *cursor = next;

        self.len -= 1;
        Some((key, value))
    }

    /// Ensures that the HashMap has enough buckets to hold an additional `extra` entries without
    /// exceeding its load factor.
    ///
    /// # Panics
    /// Panics if the buckets can't be allocated, see [`HashMap::try_reserve`].
    #[track_caller]
    pub fn reserve(&mut self, extra: usize) {
        self.try_reserve(extra).throw()
    }

    /// Ensures that the HashMap has enough buckets to hold an additional `extra` entries, returning
    /// an error and leaving the HashMap unchanged if the buckets can't be allocated.
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), CapacityExhausted> {
        let wanted = self.len.checked_add(extra).ok_or(CapacityExhausted)?;
        let bucket_count = buckets_for(wanted)?;
        if bucket_count <= self.bucket_count() {
            return Ok(());
        }

        log::debug!("Reserving HashMap buckets {} -> {bucket_count}", self.bucket_count());
        self.try_rehash(bucket_count)
    }

    /// Removes every entry from the HashMap, keeping its buckets.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            drop_chain(bucket.take());
        }
        self.len = 0;
    }

    /// Returns an iterator over all key-value pairs in the HashMap, as references.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over all key-value pairs in the HashMap, with mutable references to the
    /// values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over all keys in the HashMap, as references.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Consumes self and returns an iterator over all contained keys.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys(self.into_iter())
    }

    /// Returns an iterator over all values in the HashMap, as references.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Returns an iterator over all values in the HashMap, as mutable references.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.iter_mut())
    }

    /// Consumes self and returns an iterator over all contained values.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues(self.into_iter())
    }
}

impl<K, V, H: KeyHashing<K>> HashMap<K, V, H> {
    /// Calculates the bucket that an entry with the provided `hash` belongs in, or None if the
    /// HashMap has no buckets.
    pub(crate) fn bucket_index(&self, hash: u64) -> Option<usize> {
        hash.checked_rem(self.bucket_count() as u64).map(|i| i as usize)
    }

    pub(crate) fn find(&self, hash: u64, key: &K) -> Option<&Entry<K, V>> {
        let index = self.bucket_index(hash)?;
        chain_entries(&self.buckets[index])
            .find(|entry| entry.hash == hash && self.hashing.eq(&entry.key, key))
    }

    pub(crate) fn find_mut(&mut self, hash: u64, key: &K) -> Option<&mut Entry<K, V>> {
        let index = self.bucket_index(hash)?;
        let mut cursor = self.buckets[index].as_deref_mut();
        while let Some(entry) = cursor {
            if entry.hash == hash && self.hashing.eq(&entry.key, key) {
                return Some(entry);
            }
            cursor = entry.next.as_deref_mut();
        }
        None
    }

    /// Moves every entry into a new set of `bucket_count` buckets, using the cached hashes. The
    /// new buckets are allocated before anything is moved, so on error the HashMap is unchanged.
    pub(crate) fn try_rehash(&mut self, bucket_count: usize) -> Result<(), CapacityExhausted> {
        let mut buckets: Vector<Chain<K, V>> = Vector::try_with_cap(bucket_count)?;
        buckets.extend(iter::repeat_with(|| None).take(bucket_count));

        log::trace!("Rehashing HashMap buckets {} -> {bucket_count}", self.bucket_count());
        let old_buckets = mem::replace(&mut self.buckets, buckets);

        for mut chain in old_buckets {
            while let Some(mut entry) = chain {
                chain = entry.next.take();

                // UNREACHABLE: There are entries to move, so bucket_count can't be 0.
                let index = unsafe { self.bucket_index(entry.hash).unreachable() };
                entry.next = self.buckets[index].take();
                self.buckets[index] = Some(entry);
            }
        }

        Ok(())
    }
}

/// Returns true if `len` entries spread over `bucket_count` buckets exceed the load factor.
const fn exceeds_load(len: usize, bucket_count: usize) -> bool {
    len.saturating_mul(LOAD_FACTOR_DENOMINATOR) > bucket_count.saturating_mul(LOAD_FACTOR_NUMERATOR)
}

/// Calculates the number of buckets needed to hold `len` entries without exceeding the load
/// factor.
fn buckets_for(len: usize) -> Result<usize, CapacityExhausted> {
    if len == 0 {
        return Ok(0);
    }

    let bucket_count = len.checked_mul(LOAD_FACTOR_DENOMINATOR)
        .ok_or(CapacityExhausted)?
        .div_ceil(LOAD_FACTOR_NUMERATOR);
    Ok(cmp::max(bucket_count, MIN_CAP))
}

pub(crate) fn chain_entries<K, V>(chain: &Chain<K, V>) -> impl Iterator<Item = &Entry<K, V>> {
    iter::successors(chain.as_deref(), |entry| entry.next.as_deref())
}

/// Drops a chain one entry at a time, rather than recursing through the boxes.
pub(crate) fn drop_chain<K, V>(mut chain: Chain<K, V>) {
    while let Some(mut entry) = chain {
        chain = entry.next.take();
    }
}

impl<K, V, H: KeyHashing<K>> Drop for HashMap<K, V, H> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V, H: KeyHashing<K> + Default> Default for HashMap<K, V, H> {
    fn default() -> Self {
        HashMap::with_hashing(H::default())
    }
}

impl<K, V, H: KeyHashing<K>> Extend<(K, V)> for HashMap<K, V, H> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, H: KeyHashing<K> + Default> FromIterator<(K, V)> for HashMap<K, V, H> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HashMap::default();
        map.extend(iter);
        map
    }
}

impl<K: Clone, V: Clone, H: KeyHashing<K> + Clone> Clone for HashMap<K, V, H> {
    fn clone(&self) -> Self {
        let mut buckets = Vector::with_cap(self.bucket_count());

        for chain in self.buckets.iter() {
            let mut cloned = None;
            let mut tail = &mut cloned;
            for entry in chain_entries(chain) {
                tail = &mut tail.insert(Box::new(Entry {
                    key: entry.key.clone(),
                    value: entry.value.clone(),
                    hash: entry.hash,
                    next: None,
                })).next;
            }
            buckets.push(cloned);
        }

        HashMap {
            buckets,
            len: self.len,
            hashing: self.hashing.clone(),
        }
    }
}

impl<K, V: PartialEq, H: KeyHashing<K>> PartialEq for HashMap<K, V, H> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V: Eq, H: KeyHashing<K>> Eq for HashMap<K, V, H> {}

impl<K: Debug, V: Debug, H: KeyHashing<K> + Debug> Debug for HashMap<K, V, H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashMap")
            .field("buckets", &DebugBuckets(&self.buckets))
            .field("len", &self.len)
            .field("hashing", &self.hashing)
            .finish()
    }
}

impl<K: Debug, V: Debug, H: KeyHashing<K>> Display for HashMap<K, V, H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

struct DebugBuckets<'a, K, V>(&'a Vector<Chain<K, V>>);

impl<K: Debug, V: Debug> Debug for DebugBuckets<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter().map(DebugChain)).finish()
    }
}

/// Draws a chain as `(key: value) -> (key: value)`, or `-` for an empty bucket.
struct DebugChain<'a, K, V>(&'a Chain<K, V>);

impl<K: Debug, V: Debug> Debug for DebugChain<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_none() {
            return write!(f, "-");
        }

        for (i, entry) in chain_entries(self.0).enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "({:?}: {:?})", entry.key, entry.value)?;
        }
        Ok(())
    }
}
