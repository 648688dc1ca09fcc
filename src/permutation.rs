//! Every ordering of a sequence, by position.
//!
//! Orderings are produced with Heap's iterative interchange method
//! (Sedgewick, "Permutation Generation Methods", ACM Computing Surveys
//! 9(2), 1977): each ordering after the first differs from the previous
//! one by a single swap. Repeated values are not collapsed, so a sequence
//! of length `L` always yields exactly `L!` orderings.

/// Lazy iterator over the orderings of an owned buffer.
#[derive(Debug, Clone)]
pub struct Permutations<T> {
    items: Vec<T>,
    counters: Vec<usize>,
    index: usize,
    started: bool,
}

impl<T: Clone> Permutations<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            counters: vec![0; items.len()],
            items,
            index: 1,
            started: false,
        }
    }
}

impl<T: Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.items.clone());
        }

        while self.index < self.items.len() {
            let i = self.index;
            if self.counters[i] < i {
                let k = if i % 2 == 1 { self.counters[i] } else { 0 };
                self.items.swap(i, k);
                self.counters[i] += 1;
                self.index = 1;
                return Some(self.items.clone());
            }
            self.counters[i] = 0;
            self.index += 1;
        }
        None
    }
}

/// Materializes every ordering of `items`, starting with `items` itself.
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    Permutations::new(items.to_vec()).collect()
}
