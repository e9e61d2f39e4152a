use std::iter::FusedIterator;
use std::mem;
use std::slice;

use super::{Chain, Entry, HashMap, drop_chain};
use crate::collections::contiguous::vector::IntoIter as VecIntoIter;
use crate::collections::traits::hashing::KeyHashing;

impl<K, V, H: KeyHashing<K>> IntoIterator for HashMap<K, V, H> {
    type Item = (K, V);

    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let len = mem::replace(&mut self.len, 0);
        IntoIter {
            buckets: mem::take(&mut self.buckets).into_iter(),
            chain: None,
            len,
        }
    }
}

/// A type for owned iteration over a [`HashMap`]. Produces key-value pairs in an unspecified
/// order.
///
/// See [`HashMap::into_iter`].
pub struct IntoIter<K, V> {
    pub(crate) buckets: VecIntoIter<Chain<K, V>>,
    pub(crate) chain: Chain<K, V>,
    pub(crate) len: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.take() {
                let Entry { key, value, next, .. } = *entry;
                self.chain = next;
                self.len -= 1;
                return Some((key, value));
            }
            self.chain = self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        drop_chain(self.chain.take());
        for chain in &mut self.buckets {
            drop_chain(chain);
        }
    }
}

impl<'a, K, V, H: KeyHashing<K>> IntoIterator for &'a HashMap<K, V, H> {
    type Item = (&'a K, &'a V);

    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            buckets: self.buckets.iter(),
            entry: None,
            len: self.len,
        }
    }
}

/// A type for borrowed iteration over a [`HashMap`]. Produces key-value pairs as references, in
/// an unspecified order that is stable as long as the map isn't modified.
///
/// See [`HashMap::iter`].
pub struct Iter<'a, K, V> {
    pub(crate) buckets: slice::Iter<'a, Chain<K, V>>,
    pub(crate) entry: Option<&'a Entry<K, V>>,
    pub(crate) len: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.entry {
                self.entry = entry.next.as_deref();
                self.len -= 1;
                return Some((&entry.key, &entry.value));
            }
            self.entry = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            buckets: self.buckets.clone(),
            entry: self.entry,
            len: self.len,
        }
    }
}

impl<'a, K, V, H: KeyHashing<K>> IntoIterator for &'a mut HashMap<K, V, H> {
    type Item = (&'a K, &'a mut V);

    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            buckets: self.buckets.iter_mut(),
            entry: None,
            len: self.len,
        }
    }
}

/// A type for mutable iteration over a [`HashMap`]. Produces keys as references and values as
/// mutable references.
///
/// See [`HashMap::iter_mut`].
pub struct IterMut<'a, K, V> {
    pub(crate) buckets: slice::IterMut<'a, Chain<K, V>>,
    pub(crate) entry: Option<&'a mut Entry<K, V>>,
    pub(crate) len: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.entry.take() {
                let Entry { key, value, next, .. } = entry;
                self.entry = next.as_deref_mut();
                self.len -= 1;
                return Some((&*key, value));
            }
            self.entry = self.buckets.next()?.as_deref_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An owned iterator over the keys of a [`HashMap`].
///
/// See [`HashMap::into_keys`].
pub struct IntoKeys<K, V>(pub(crate) IntoIter<K, V>);

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

/// A borrowed iterator over the keys of a [`HashMap`].
///
/// See [`HashMap::keys`].
pub struct Keys<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An owned iterator over the values of a [`HashMap`].
///
/// See [`HashMap::into_values`].
pub struct IntoValues<K, V>(pub(crate) IntoIter<K, V>);

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {}

impl<K, V> FusedIterator for IntoValues<K, V> {}

/// A borrowed iterator over the values of a [`HashMap`].
///
/// See [`HashMap::values`].
pub struct Values<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a [`HashMap`].
///
/// See [`HashMap::values_mut`].
pub struct ValuesMut<'a, K, V>(pub(crate) IterMut<'a, K, V>);

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}
