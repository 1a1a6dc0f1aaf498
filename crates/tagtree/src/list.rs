use std::slice;

use thiserror::Error;

use crate::{Tag, TagType};

/// A homogeneous, ordered sequence of tags.
///
/// The element type starts out as [`TagType::End`] and is fixed by the first
/// element pushed into the list (or by the element type read from the wire).
/// From then on every element must have exactly that type. Heterogeneous lists
/// are rejected at insertion time rather than coerced.
///
/// ```
/// use tagtree::{List, Tag, TagType};
///
/// let mut list = List::new();
/// assert_eq!(list.element_type(), TagType::End);
///
/// list.push(5_i32).unwrap();
/// assert_eq!(list.element_type(), TagType::Int);
///
/// assert!(list.push("five").is_err());
/// assert_eq!(list.len(), 1);
/// ```
#[derive(Clone, PartialEq, Debug, Default)]
pub struct List {
    element_type: TagType,
    items: Vec<Tag>,
}

/// Errors raised when constructing or mutating a [`List`].
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum ListError {
    #[error("cannot add {found} to a list of {expected}")]
    ElementTypeMismatch { expected: TagType, found: TagType },
    #[error("TAG_End cannot be a list element")]
    EndElement,
    #[error("index {index} is out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list whose element type is already fixed.
    pub fn with_element_type(element_type: TagType) -> Self {
        Self {
            element_type,
            items: Vec::new(),
        }
    }

    pub(crate) fn from_parts_unchecked(element_type: TagType, items: Vec<Tag>) -> Self {
        debug_assert!(items.iter().all(|t| t.tag_type() == element_type));
        Self {
            element_type,
            items,
        }
    }

    /// The type shared by every element, or [`TagType::End`] if it has not
    /// been fixed yet.
    pub fn element_type(&self) -> TagType {
        self.element_type
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check(&self, tag: &Tag) -> Result<(), ListError> {
        let found = tag.tag_type();

        if found == TagType::End {
            return Err(ListError::EndElement);
        }

        if self.element_type != TagType::End && self.element_type != found {
            return Err(ListError::ElementTypeMismatch {
                expected: self.element_type,
                found,
            });
        }

        Ok(())
    }

    /// Appends an element, fixing the element type if this is the first one.
    pub fn push(&mut self, tag: impl Into<Tag>) -> Result<(), ListError> {
        let tag = tag.into();
        self.check(&tag)?;
        self.element_type = tag.tag_type();
        self.items.push(tag);
        Ok(())
    }

    /// Inserts an element at `index`, shifting later elements to the right.
    pub fn insert(&mut self, index: usize, tag: impl Into<Tag>) -> Result<(), ListError> {
        let tag = tag.into();
        if index > self.items.len() {
            return Err(ListError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        self.check(&tag)?;
        self.element_type = tag.tag_type();
        self.items.insert(index, tag);
        Ok(())
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, tag: impl Into<Tag>) -> Result<Tag, ListError> {
        let tag = tag.into();
        let len = self.items.len();
        if index >= len {
            return Err(ListError::IndexOutOfBounds { index, len });
        }
        self.check(&tag)?;
        Ok(std::mem::replace(&mut self.items[index], tag))
    }

    /// Removes and returns the element at `index`. The element type stays
    /// fixed even if the list becomes empty.
    pub fn remove(&mut self, index: usize) -> Option<Tag> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Removes every element. The element type stays fixed.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }

    /// Mutable access to an element. Replacing the element through this
    /// reference with one of a different type would break the list's
    /// invariant, so only in-place edits are offered: use [`List::set`] to
    /// swap elements.
    pub fn get_mut(&mut self, index: usize) -> Option<ElementMut<'_>> {
        self.items.get_mut(index).map(ElementMut)
    }

    pub fn iter(&self) -> slice::Iter<'_, Tag> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Tag> {
        self.items
    }
}

/// A mutable handle to a list element that cannot change the element's type.
#[derive(Debug)]
pub struct ElementMut<'a>(&'a mut Tag);

impl<'a> ElementMut<'a> {
    pub fn get(&self) -> &Tag {
        self.0
    }

    pub fn into_list_mut(self) -> Option<&'a mut List> {
        self.0.as_list_mut()
    }

    pub fn into_compound_mut(self) -> Option<&'a mut crate::Compound> {
        self.0.as_compound_mut()
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        self.0.as_list_mut()
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut crate::Compound> {
        self.0.as_compound_mut()
    }

    /// Replaces the element with another of the same type.
    pub fn replace(&mut self, tag: impl Into<Tag>) -> Result<Tag, ListError> {
        let tag = tag.into();
        let expected = self.0.tag_type();
        if tag.tag_type() != expected {
            return Err(ListError::ElementTypeMismatch {
                expected,
                found: tag.tag_type(),
            });
        }
        Ok(std::mem::replace(self.0, tag))
    }
}

impl TryFrom<Vec<Tag>> for List {
    type Error = ListError;

    fn try_from(items: Vec<Tag>) -> Result<Self, Self::Error> {
        let mut list = List::new();
        list.items.reserve(items.len());
        for tag in items {
            list.push(tag)?;
        }
        Ok(list)
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for List {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_push_fixes_element_type() {
        let mut list = List::new();
        assert_eq!(list.element_type(), TagType::End);
        assert!(list.is_empty());

        list.push(1_i16).unwrap();
        assert_eq!(list.element_type(), TagType::Short);

        assert_eq!(
            list.push(1_i32),
            Err(ListError::ElementTypeMismatch {
                expected: TagType::Short,
                found: TagType::Int
            })
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn end_is_never_an_element() {
        let mut list = List::new();
        assert_eq!(list.push(Tag::End), Err(ListError::EndElement));
        assert_eq!(list.element_type(), TagType::End);
    }

    #[test]
    fn type_survives_removal() {
        let mut list = List::try_from(vec![Tag::Int(1), Tag::Int(2)]).unwrap();
        assert_eq!(list.remove(0), Some(Tag::Int(1)));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.element_type(), TagType::Int);
        assert!(list.push("x").is_err());
    }

    #[test]
    fn set_and_insert_are_checked() {
        let mut list = List::try_from(vec![Tag::from("a"), Tag::from("c")]).unwrap();
        list.insert(1, "b").unwrap();
        assert_eq!(list.set(0, "z"), Ok(Tag::from("a")));
        assert!(list.set(0, 1_i8).is_err());
        assert_eq!(
            list.set(3, "x"),
            Err(ListError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert!(list.insert(4, "x").is_err());

        let strings: Vec<_> = list.iter().filter_map(Tag::as_str).collect();
        assert_eq!(strings, ["z", "b", "c"]);
    }

    #[test]
    fn element_handle_keeps_type() {
        let mut list = List::try_from(vec![Tag::Long(1)]).unwrap();
        let mut elem = list.get_mut(0).unwrap();
        assert!(elem.replace(2_i32).is_err());
        assert_eq!(elem.replace(2_i64), Ok(Tag::Long(1)));
        assert_eq!(list.get(0), Some(&Tag::Long(2)));
    }

    #[test]
    fn heterogeneous_vec_is_rejected() {
        assert!(List::try_from(vec![Tag::Int(1), Tag::Long(1)]).is_err());
    }
}
