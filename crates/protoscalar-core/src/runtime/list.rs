use crate::error::{Error, Result};
use std::ops::Deref;

/// Backing store of a repeated extended field.
///
/// A message build seals the list; after that every mutator fails with
/// [`Error::SealedList`]. Cloning yields an unsealed copy, which is how a
/// builder starts from a built message.
#[derive(Debug)]
pub struct SealedList<T> {
    items: Vec<T>,
    sealed: bool,
}

impl<T> Default for SealedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            sealed: false,
        }
    }
}

impl<T: Clone> Clone for SealedList<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            sealed: false,
        }
    }
}

impl<T: PartialEq> PartialEq for SealedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T> Deref for SealedList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for SealedList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            sealed: false,
        }
    }
}

impl<T> SealedList<T> {
    /// Creates an empty, unsealed list
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the elements
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Whether the list has been sealed
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Makes the list read-only. Sealing twice is harmless.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    fn check_open(&self) -> Result<()> {
        if self.sealed {
            Err(Error::SealedList)
        } else {
            Ok(())
        }
    }

    /// Appends one element
    pub fn push(&mut self, value: T) -> Result<()> {
        self.check_open()?;
        self.items.push(value);
        Ok(())
    }

    /// Replaces the element at `index`
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        self.check_open()?;
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Appends every element of `values`
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) -> Result<()> {
        self.check_open()?;
        self.items.extend(values);
        Ok(())
    }

    /// Removes all elements
    pub fn clear(&mut self) -> Result<()> {
        self.check_open()?;
        self.items.clear();
        Ok(())
    }
}
