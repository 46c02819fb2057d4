/// Position of the displayed record within the visible set.
///
/// `index` is `None` exactly when the visible set is empty. Callers pass the
/// current visible length on every call; the cursor never stores it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    index: Option<usize>,
}

impl Cursor {
    pub fn at(index: usize) -> Self {
        Self { index: Some(index) }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Wraps from the last record to the first. No-op on an empty set.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let current = self.index.unwrap_or(len - 1);
        self.index = Some((current + 1) % len);
    }

    /// Wraps from the first record to the last. No-op on an empty set.
    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let current = self.index.unwrap_or(0);
        self.index = Some((current + len - 1) % len);
    }

    /// Moves to `target` when it lies in `0..len`; anything else is ignored.
    /// Returns whether the cursor moved.
    pub fn go_to(&mut self, target: isize, len: usize) -> bool {
        match usize::try_from(target) {
            Ok(i) if i < len => {
                self.index = Some(i);
                true
            }
            _ => false,
        }
    }

    /// Pulls the cursor back inside a visible set of length `len`.
    pub fn reclamp(&mut self, len: usize) {
        self.index = match (self.index, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), n) if i >= n => Some(n - 1),
            (keep, _) => keep,
        };
    }

    /// Back to the first record, or undefined if there is none.
    pub fn reset(&mut self, len: usize) {
        self.index = if len == 0 { None } else { Some(0) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 0)]
    #[case(4, 0)]
    #[case(4, 3)]
    #[case(7, 5)]
    fn next_and_prev_cycle_back(#[case] len: usize, #[case] start: usize) {
        let mut cursor = Cursor::at(start);
        for _ in 0..len {
            cursor.next(len);
        }
        assert_eq!(cursor.index(), Some(start));
        for _ in 0..len {
            cursor.prev(len);
        }
        assert_eq!(cursor.index(), Some(start));
    }

    #[test]
    fn wraps_at_both_ends() {
        let mut cursor = Cursor::at(2);
        cursor.next(3);
        assert_eq!(cursor.index(), Some(0));
        cursor.prev(3);
        assert_eq!(cursor.index(), Some(2));
    }

    #[test]
    fn navigation_on_empty_set_is_noop() {
        let mut cursor = Cursor::default();
        cursor.next(0);
        cursor.prev(0);
        assert_eq!(cursor.index(), None);
    }

    #[rstest]
    #[case(-1)]
    #[case(3)]
    #[case(isize::MAX)]
    fn go_to_out_of_range_is_ignored(#[case] target: isize) {
        let mut cursor = Cursor::at(1);
        assert!(!cursor.go_to(target, 3));
        assert_eq!(cursor.index(), Some(1));
    }

    #[test]
    fn go_to_in_range_moves() {
        let mut cursor = Cursor::at(0);
        assert!(cursor.go_to(2, 3));
        assert_eq!(cursor.index(), Some(2));
    }

    #[test]
    fn reclamp_pulls_back_inside() {
        let mut cursor = Cursor::at(2);
        cursor.reclamp(1);
        assert_eq!(cursor.index(), Some(0));
        cursor.reclamp(0);
        assert_eq!(cursor.index(), None);
        cursor.reclamp(5);
        assert_eq!(cursor.index(), Some(0));

        let mut inside = Cursor::at(1);
        inside.reclamp(4);
        assert_eq!(inside.index(), Some(1));
    }
}
