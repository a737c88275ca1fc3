//! Fixed-length circular sequences.

/// A sequence indexed modulo its length.
///
/// Every transform returns a new value; nothing is rotated in place, so two
/// tiles looking at the same boundary never observe each other's edits.
///
/// ```text
/// [0, 1, 2, 3, 4, 5].rotated(2)  == [2, 3, 4, 5, 0, 1]
/// [0, 1, 2, 3, 4, 5].reversed(2) == [2, 1, 0, 5, 4, 3]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Cycle<T> {
    items: Vec<T>,
}

impl<T> Cycle<T> {
    pub const fn new(items: Vec<T>) -> Self {
        Cycle { items }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    fn wrap(&self, index: isize) -> usize {
        index.rem_euclid(self.items.len() as isize) as usize
    }

    /// Element at `index mod len`; negative indices count from the end.
    ///
    /// # Panics
    /// On an empty cycle.
    #[inline]
    pub fn get(&self, index: isize) -> &T {
        &self.items[self.wrap(index)]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Consecutive pairs `(self[i], self[i + 1])`, closing back to the start.
    pub fn edges(&self) -> impl Iterator<Item = (&T, &T)> + '_ {
        let n = self.items.len();
        (0..n).map(move |i| (&self.items[i], &self.items[(i + 1) % n]))
    }

    /// Index `i` such that `self[i] == value`, if any.
    pub fn position(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.items.iter().position(|item| item == value)
    }

    /// True if the cycle contains `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(value)
    }
}

impl<T: Clone> Cycle<T> {
    /// `result[i] == self[i + shift]`
    pub fn rotated(&self, shift: isize) -> Cycle<T> {
        if self.items.is_empty() {
            return self.clone();
        }
        let start = self.wrap(shift);
        let mut items = Vec::with_capacity(self.items.len());
        items.extend_from_slice(&self.items[start..]);
        items.extend_from_slice(&self.items[..start]);
        Cycle { items }
    }

    /// Reverse the direction of travel: `result[i] == self[pivot − i]`.
    ///
    /// So `result[0] == self[pivot]`, `result[1] == self[pivot − 1]`, and the
    /// edge `(self[pivot − 1], self[pivot])` appears as
    /// `(result[1], result[0])`.
    pub fn reversed(&self, pivot: isize) -> Cycle<T> {
        if self.items.is_empty() {
            return self.clone();
        }
        let items = (0..self.items.len() as isize)
            .map(|i| self.get(pivot - i).clone())
            .collect();
        Cycle { items }
    }
}

impl<T> From<Vec<T>> for Cycle<T> {
    fn from(items: Vec<T>) -> Self {
        Cycle::new(items)
    }
}

impl<'a, T> IntoIterator for &'a Cycle<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
