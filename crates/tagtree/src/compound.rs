use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::ops::Index;

use indexmap::IndexMap;

use crate::Tag;

type Map = IndexMap<String, Tag>;

/// A map type with [`String`] keys and [`Tag`] values.
///
/// Entries are kept in insertion order. Re-inserting an existing key replaces
/// its value in place without moving it, and removing a key keeps the
/// relative order of the remaining entries. Encoders walk the map in this
/// order, which keeps serialized output deterministic.
#[derive(Clone, PartialEq, Default)]
pub struct Compound {
    map: Map,
}

impl fmt::Debug for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.map.fmt(f)
    }
}

impl Compound {
    pub fn new() -> Self {
        Self { map: Map::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            map: Map::with_capacity(cap),
        }
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn get<Q>(&self, k: &Q) -> Option<&Tag>
    where
        String: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.map.get(k)
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        String: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.map.contains_key(k)
    }

    pub fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut Tag>
    where
        String: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.map.get_mut(k)
    }

    pub fn get_key_value<Q>(&self, k: &Q) -> Option<(&String, &Tag)>
    where
        String: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.map.get_key_value(k)
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert<K, V>(&mut self, k: K, v: V) -> Option<Tag>
    where
        K: Into<String>,
        V: Into<Tag>,
    {
        self.map.insert(k.into(), v.into())
    }

    pub fn remove<Q>(&mut self, k: &Q) -> Option<Tag>
    where
        String: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.map.shift_remove(k)
    }

    pub fn remove_entry<Q>(&mut self, k: &Q) -> Option<(String, Tag)>
    where
        String: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.map.shift_remove_entry(k)
    }

    /// Moves every entry of `other` into `self`, replacing values of keys
    /// present in both.
    pub fn append(&mut self, other: &mut Self) {
        for (k, v) in std::mem::take(&mut other.map) {
            self.map.insert(k, v);
        }
    }

    /// Recursively merges `other` into `self`.
    ///
    /// When both sides hold a compound under the same key, the two compounds
    /// are merged. Any other value from `other` replaces the existing one.
    ///
    /// ```
    /// use tagtree::compound;
    ///
    /// let mut base = compound! {
    ///     "name" => "zombie",
    ///     "attrs" => compound! { "speed" => 0.2, "health" => 20 },
    /// };
    ///
    /// base.merge(compound! {
    ///     "attrs" => compound! { "health" => 40 },
    ///     "baby" => true,
    /// });
    ///
    /// assert_eq!(
    ///     base,
    ///     compound! {
    ///         "name" => "zombie",
    ///         "attrs" => compound! { "speed" => 0.2, "health" => 40 },
    ///         "baby" => true,
    ///     }
    /// );
    /// ```
    pub fn merge(&mut self, other: Compound) {
        for (k, v) in other {
            let Tag::Compound(incoming) = v else {
                self.map.insert(k, v);
                continue;
            };

            if let Some(Tag::Compound(existing)) = self.map.get_mut(&k) {
                existing.merge(incoming);
            } else {
                self.map.insert(k, Tag::Compound(incoming));
            }
        }
    }

    pub fn entry<K>(&mut self, k: K) -> Entry
    where
        K: Into<String>,
    {
        match self.map.entry(k.into()) {
            indexmap::map::Entry::Vacant(ve) => Entry::Vacant(VacantEntry { ve }),
            indexmap::map::Entry::Occupied(oe) => Entry::Occupied(OccupiedEntry { oe }),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> Iter {
        Iter {
            iter: self.map.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut {
        IterMut {
            iter: self.map.iter_mut(),
        }
    }

    pub fn keys(&self) -> Keys {
        Keys {
            iter: self.map.keys(),
        }
    }

    pub fn values(&self) -> Values {
        Values {
            iter: self.map.values(),
        }
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&String, &mut Tag) -> bool,
    {
        self.map.retain(f);
    }
}

impl Extend<(String, Tag)> for Compound {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = (String, Tag)>,
    {
        self.map.extend(iter);
    }
}

impl FromIterator<(String, Tag)> for Compound {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (String, Tag)>,
    {
        Self {
            map: Map::from_iter(iter),
        }
    }
}

pub enum Entry<'a> {
    Vacant(VacantEntry<'a>),
    Occupied(OccupiedEntry<'a>),
}

impl<'a> Entry<'a> {
    pub fn key(&self) -> &String {
        match self {
            Entry::Vacant(ve) => ve.key(),
            Entry::Occupied(oe) => oe.key(),
        }
    }

    pub fn or_insert(self, default: impl Into<Tag>) -> &'a mut Tag {
        match self {
            Entry::Vacant(ve) => ve.insert(default),
            Entry::Occupied(oe) => oe.into_mut(),
        }
    }

    pub fn or_insert_with<F, V>(self, default: F) -> &'a mut Tag
    where
        F: FnOnce() -> V,
        V: Into<Tag>,
    {
        match self {
            Entry::Vacant(ve) => ve.insert(default()),
            Entry::Occupied(oe) => oe.into_mut(),
        }
    }

    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut Tag),
    {
        match self {
            Entry::Vacant(ve) => Entry::Vacant(ve),
            Entry::Occupied(mut oe) => {
                f(oe.get_mut());
                Entry::Occupied(oe)
            }
        }
    }
}

pub struct VacantEntry<'a> {
    ve: indexmap::map::VacantEntry<'a, String, Tag>,
}

impl<'a> VacantEntry<'a> {
    pub fn key(&self) -> &String {
        self.ve.key()
    }

    pub fn insert(self, v: impl Into<Tag>) -> &'a mut Tag {
        self.ve.insert(v.into())
    }
}

pub struct OccupiedEntry<'a> {
    oe: indexmap::map::OccupiedEntry<'a, String, Tag>,
}

impl<'a> OccupiedEntry<'a> {
    pub fn key(&self) -> &String {
        self.oe.key()
    }

    pub fn get(&self) -> &Tag {
        self.oe.get()
    }

    pub fn get_mut(&mut self) -> &mut Tag {
        self.oe.get_mut()
    }

    pub fn into_mut(self) -> &'a mut Tag {
        self.oe.into_mut()
    }

    pub fn insert(&mut self, v: impl Into<Tag>) -> Tag {
        self.oe.insert(v.into())
    }

    pub fn remove(self) -> Tag {
        self.oe.shift_remove()
    }
}

impl<Q> Index<&'_ Q> for Compound
where
    String: Borrow<Q>,
    Q: ?Sized + Eq + Hash,
{
    type Output = Tag;

    fn index(&self, index: &Q) -> &Self::Output {
        self.map.index(index)
    }
}

macro_rules! impl_iterator_traits {
    (($name:ident $($generics:tt)*) => $item:ty) => {
        impl $($generics)* Iterator for $name $($generics)* {
            type Item = $item;
            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                self.iter.next()
            }
            #[inline]
            fn size_hint(&self) -> (usize, Option<usize>) {
                self.iter.size_hint()
            }
        }

        impl $($generics)* DoubleEndedIterator for $name $($generics)* {
            #[inline]
            fn next_back(&mut self) -> Option<Self::Item> {
                self.iter.next_back()
            }
        }

        impl $($generics)* ExactSizeIterator for $name $($generics)* {
            #[inline]
            fn len(&self) -> usize {
                self.iter.len()
            }
        }

        impl $($generics)* FusedIterator for $name $($generics)* {}
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Tag);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone)]
pub struct Iter<'a> {
    iter: indexmap::map::Iter<'a, String, Tag>,
}

impl_iterator_traits!((Iter<'a>) => (&'a String, &'a Tag));

impl<'a> IntoIterator for &'a mut Compound {
    type Item = (&'a String, &'a mut Tag);
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

pub struct IterMut<'a> {
    iter: indexmap::map::IterMut<'a, String, Tag>,
}

impl_iterator_traits!((IterMut<'a>) => (&'a String, &'a mut Tag));

impl IntoIterator for Compound {
    type Item = (String, Tag);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            iter: self.map.into_iter(),
        }
    }
}

pub struct IntoIter {
    iter: indexmap::map::IntoIter<String, Tag>,
}

impl_iterator_traits!((IntoIter) => (String, Tag));

#[derive(Clone)]
pub struct Keys<'a> {
    iter: indexmap::map::Keys<'a, String, Tag>,
}

impl_iterator_traits!((Keys<'a>) => &'a String);

#[derive(Clone)]
pub struct Values<'a> {
    iter: indexmap::map::Values<'a, String, Tag>,
}

impl_iterator_traits!((Values<'a>) => &'a Tag);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compound;

    #[test]
    fn preserves_order() {
        let letters = ["g", "b", "d", "e", "h", "z", "m", "a", "q"];

        let mut c = Compound::new();
        for l in letters {
            c.insert(l, 0_i8);
        }

        for (k, l) in c.keys().zip(letters) {
            assert_eq!(k, l);
        }
    }

    #[test]
    fn reinsert_keeps_position_and_remove_keeps_order() {
        let mut c = compound! { "a" => 1, "b" => 2, "c" => 3 };

        assert_eq!(c.insert("a", 10), Some(Tag::Int(1)));
        assert_eq!(c.remove("b"), Some(Tag::Int(2)));

        let keys: Vec<_> = c.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "c"]);
        assert_eq!(c["a"], Tag::Int(10));
    }

    #[test]
    fn merge_replaces_non_compounds() {
        let mut c = compound! {
            "list" => crate::List::try_from(vec![Tag::Int(1)]).unwrap(),
            "inner" => compound! { "keep" => 1_i8, "swap" => 1_i8 },
        };

        c.merge(compound! {
            "list" => "now a string",
            "inner" => compound! { "swap" => 2_i8, "new" => 3_i8 },
        });

        assert_eq!(c["list"], Tag::from("now a string"));
        assert_eq!(
            c["inner"],
            Tag::Compound(compound! { "keep" => 1_i8, "swap" => 2_i8, "new" => 3_i8 })
        );
    }
}
