use core::hash::Hash;
use std::collections::HashSet;
use std::fmt::Debug;
use std::time::{Duration, Instant};

/// A set that remembers insertion order.
#[derive(Clone, Eq)]
pub struct VecSet<T: Hash> {
    vec: Vec<T>,
    set: HashSet<T>,
}

pub fn timed<R>(func: impl FnOnce() -> R) -> (Duration, R) {
    let start = Instant::now();
    let r = func();
    (start.elapsed(), r)
}

impl<T: Hash + Eq + Clone> VecSet<T> {
    /// false if already present; order is left unchanged in that case
    pub fn insert(&mut self, element: T) -> bool {
        let success = self.set.insert(element.clone());
        if success {
            self.vec.push(element);
        }
        success
    }
    pub fn contains(&self, element: &T) -> bool {
        self.set.contains(element)
    }
    /// Returns how many of `elements` were new.
    pub fn extend(&mut self, elements: impl IntoIterator<Item = T>) -> usize {
        elements.into_iter().filter(|x| self.insert(x.clone())).count()
    }
    pub fn clear(&mut self) {
        self.vec.clear();
        self.set.clear();
    }
    pub fn into_vec(self) -> Vec<T> {
        self.vec
    }
}
impl<T: Hash + Eq + Clone> FromIterator<T> for VecSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut c = VecSet::default();
        c.extend(iter);
        c
    }
}
impl<T: Hash> VecSet<T> {
    pub fn as_slice(&self) -> &[T] {
        self.vec.as_slice()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.vec.iter()
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
}

impl<'a, T: Hash> IntoIterator for &'a VecSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.vec.iter()
    }
}

impl<T: Debug + Hash> Debug for VecSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_set().entries(self.as_slice().iter()).finish()
    }
}

impl<T: Hash + PartialEq> PartialEq for VecSet<T> {
    fn eq(&self, other: &VecSet<T>) -> bool {
        self.vec == other.vec
    }
}

impl<T: Hash> Default for VecSet<T> {
    fn default() -> Self {
        Self { vec: Default::default(), set: Default::default() }
    }
}
