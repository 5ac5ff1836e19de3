//! Jagged (variable-length) columns.

use teff_core::{Error, Result};

/// A jagged column: flat values + per-event offsets.
///
/// `offsets` has length `n_events + 1`. Event `i` owns
/// `flat[offsets[i]..offsets[i+1]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct JaggedCol {
    flat: Vec<f64>,
    offsets: Vec<usize>,
}

impl JaggedCol {
    /// Build from parts, validating the offset table.
    pub fn new(flat: Vec<f64>, offsets: Vec<usize>) -> Result<Self> {
        if offsets.is_empty() {
            return Err(Error::Validation("jagged column requires at least one offset".into()));
        }
        if offsets[0] != 0 {
            return Err(Error::Validation(format!(
                "jagged offsets must start at 0, got {}",
                offsets[0]
            )));
        }
        for w in offsets.windows(2) {
            if w[1] < w[0] {
                return Err(Error::Validation(format!(
                    "jagged offsets must be non-decreasing, got {} after {}",
                    w[1], w[0]
                )));
            }
        }
        let last = offsets[offsets.len() - 1];
        if last != flat.len() {
            return Err(Error::Validation(format!(
                "jagged offsets end at {last} but flat storage has {} values",
                flat.len()
            )));
        }
        Ok(Self { flat, offsets })
    }

    /// Build from per-event rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Self {
        let mut flat = Vec::new();
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        offsets.push(0);
        for row in rows {
            flat.extend_from_slice(row.as_ref());
            offsets.push(flat.len());
        }
        Self { flat, offsets }
    }

    /// Column with `n_events` empty rows.
    pub fn empty(n_events: usize) -> Self {
        Self { flat: Vec::new(), offsets: vec![0; n_events + 1] }
    }

    pub fn n_events(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn n_values(&self) -> usize {
        self.flat.len()
    }

    /// Values of one event.
    pub fn row(&self, event: usize) -> &[f64] {
        &self.flat[self.offsets[event]..self.offsets[event + 1]]
    }

    /// Value `index` of `event`, if present.
    pub fn get(&self, event: usize, index: usize) -> Option<f64> {
        self.row(event).get(index).copied()
    }

    /// Per-event "any value satisfies `pred`". Empty rows give `false`.
    pub fn any<F: Fn(f64) -> bool>(&self, pred: F) -> Vec<bool> {
        (0..self.n_events()).map(|i| self.row(i).iter().any(|&v| pred(v))).collect()
    }

    /// Per-event "all values satisfy `pred`". Empty rows give `true`.
    pub fn all<F: Fn(f64) -> bool>(&self, pred: F) -> Vec<bool> {
        (0..self.n_events()).map(|i| self.row(i).iter().all(|&v| pred(v))).collect()
    }

    /// Per-event maximum. Empty rows give `None`.
    pub fn max(&self) -> Vec<Option<f64>> {
        (0..self.n_events())
            .map(|i| self.row(i).iter().copied().reduce(f64::max))
            .collect()
    }

    /// Per-event count of values satisfying `pred`.
    pub fn count_where<F: Fn(f64) -> bool>(&self, pred: F) -> Vec<u32> {
        (0..self.n_events())
            .map(|i| self.row(i).iter().filter(|&&v| pred(v)).count() as u32)
            .collect()
    }

    /// Append another column's events after this one's, rebasing offsets.
    pub fn append(&mut self, other: &JaggedCol) {
        let base = self.flat.len();
        self.flat.extend_from_slice(&other.flat);
        self.offsets.extend(other.offsets.iter().skip(1).map(|o| base + o));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ragged() -> JaggedCol {
        // rows: [1,2,3], [], [5]
        JaggedCol::from_rows(&[vec![1.0, 2.0, 3.0], vec![], vec![5.0]])
    }

    #[test]
    fn from_rows_layout() {
        let col = ragged();
        assert_eq!(col.n_events(), 3);
        assert_eq!(col.n_values(), 4);
        assert_eq!(col.row(0), &[1.0, 2.0, 3.0]);
        assert_eq!(col.row(1), &[] as &[f64]);
        assert_eq!(col.get(2, 0), Some(5.0));
        assert_eq!(col.get(2, 1), None);
    }

    #[test]
    fn new_validates_offsets() {
        assert!(JaggedCol::new(vec![1.0], vec![0, 1]).is_ok());
        assert!(JaggedCol::new(vec![1.0], vec![]).is_err());
        assert!(JaggedCol::new(vec![1.0], vec![1, 1]).is_err());
        assert!(JaggedCol::new(vec![1.0, 2.0], vec![0, 2, 1]).is_err());
        assert!(JaggedCol::new(vec![1.0, 2.0], vec![0, 1]).is_err());
    }

    #[test]
    fn any_all_on_ragged_rows() {
        let col = ragged();
        assert_eq!(col.any(|v| v > 2.0), vec![true, false, true]);
        assert_eq!(col.any(|v| v > 10.0), vec![false, false, false]);
        // Vacuous truth on the empty row.
        assert_eq!(col.all(|v| v > 0.0), vec![true, true, true]);
        assert_eq!(col.all(|v| v > 1.5), vec![false, true, true]);
    }

    #[test]
    fn max_is_none_for_empty_rows() {
        let col = ragged();
        assert_eq!(col.max(), vec![Some(3.0), None, Some(5.0)]);
    }

    #[test]
    fn count_where_ragged() {
        let col = ragged();
        assert_eq!(col.count_where(|v| v >= 2.0), vec![2, 0, 1]);
    }

    #[test]
    fn append_rebases_offsets() {
        let mut a = ragged();
        let b = JaggedCol::from_rows(&[vec![7.0], vec![8.0, 9.0]]);
        a.append(&b);
        assert_eq!(a.n_events(), 5);
        assert_eq!(a.row(3), &[7.0]);
        assert_eq!(a.row(4), &[8.0, 9.0]);
        assert_eq!(a.row(0), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_column() {
        let col = JaggedCol::empty(4);
        assert_eq!(col.n_events(), 4);
        assert_eq!(col.max(), vec![None; 4]);
        assert_eq!(col.any(|_| true), vec![false; 4]);
    }
}
