/// Binary min-heap over `(priority, value)` pairs.
///
/// Entries live in a `Vec` laid out as a complete binary tree: the parent of
/// `i` is `(i - 1) / 2`, its children are `2i + 1` and `2i + 2`. There is no
/// decrease-key; callers push a fresh entry and skip the stale one when it is
/// popped.
///
/// Priorities must be totally ordered among themselves: a value that is not
/// comparable with itself (a float NaN) breaks the ordering of every entry.
#[derive(Clone, Debug)]
pub struct MinHeap<P, T> {
    data: Vec<(P, T)>,
}

impl<P, T> Default for MinHeap<P, T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<P: PartialOrd, T> MinHeap<P, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn peek(&self) -> Option<(&P, &T)> {
        self.data.first().map(|(p, v)| (p, v))
    }

    /// Entries in array order. Index 0 is the minimum; the rest is only
    /// heap-ordered, not sorted.
    pub fn as_slice(&self) -> &[(P, T)] {
        &self.data
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn push(&mut self, priority: P, value: T) {
        debug_assert!(
            priority.partial_cmp(&priority).is_some(),
            "heap priority must be comparable"
        );
        self.data.push((priority, value));
        self.sift_up(self.data.len() - 1);
    }

    pub fn pop(&mut self) -> Option<(P, T)> {
        match self.data.len() {
            0 => None,
            1 => self.data.pop(),
            len => {
                self.data.swap(0, len - 1);
                let root = self.data.pop();
                self.sift_down(0);
                root
            }
        }
    }

    #[inline]
    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.data[idx].0 < self.data[parent].0 {
                self.data.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    #[inline]
    fn sift_down(&mut self, mut idx: usize) {
        let len = self.data.len();
        loop {
            let left = idx * 2 + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let mut child = left;
            if right < len && self.data[right].0 < self.data[left].0 {
                child = right;
            }

            if self.data[child].0 < self.data[idx].0 {
                self.data.swap(idx, child);
                idx = child;
            } else {
                break;
            }
        }
    }
}

impl<P: PartialOrd, T> Extend<(P, T)> for MinHeap<P, T> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.data.reserve(iter.size_hint().0);
        for (priority, value) in iter {
            self.push(priority, value);
        }
    }
}

impl<P: PartialOrd, T> FromIterator<(P, T)> for MinHeap<P, T> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}
