// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Dense boolean matrices and the reductions the kernels are built from
//!
//! Matrices are chunk-major: one row per retrieved chunk, one column per
//! claim. Reductions never allocate more than one output vector.

/// A dense row-major boolean matrix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoolMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl BoolMatrix {
    /// Create an all-false matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Build from row slices. Returns `None` when rows differ in length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Option<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return None;
            }
            cells.extend_from_slice(row);
        }
        Some(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Number of rows (chunks).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (claims).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Cell value.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        self.cells[row * self.cols + col]
    }

    /// Set a cell value.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        self.cells[row * self.cols + col] = value;
    }

    /// A single row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[inline]
    pub fn row(&self, row: usize) -> &[bool] {
        assert!(row < self.rows, "row out of bounds");
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterate over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        // zero-width matrices have no cells; the floor only keeps chunks_exact happy
        self.cells.chunks_exact(self.cols.max(1))
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        let mut out = Self::new(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.cells[c * self.rows + r] = self.cells[r * self.cols + c];
            }
        }
        out
    }

    /// OR across columns: one entry per row.
    pub fn any_per_row(&self) -> Vec<bool> {
        let mut out = vec![false; self.rows];
        for (flag, row) in out.iter_mut().zip(self.iter_rows()) {
            *flag = row.iter().any(|&b| b);
        }
        out
    }

    /// OR across rows: one entry per column.
    pub fn any_per_col(&self) -> Vec<bool> {
        let mut out = vec![false; self.cols];
        for row in self.iter_rows() {
            or_assign(&mut out, row);
        }
        out
    }

    /// OR across the rows selected by `row_mask`: one entry per column.
    ///
    /// Rows beyond the end of the mask are treated as unselected.
    pub fn any_per_col_where(&self, row_mask: &[bool]) -> Vec<bool> {
        let mut out = vec![false; self.cols];
        for (row, _) in self.iter_rows().zip(row_mask).filter(|&(_, &keep)| keep) {
            or_assign(&mut out, row);
        }
        out
    }
}

#[inline]
fn or_assign(acc: &mut [bool], row: &[bool]) {
    for (a, &b) in acc.iter_mut().zip(row) {
        *a |= b;
    }
}

/// Number of `true` entries.
#[inline]
pub fn count(values: &[bool]) -> usize {
    values.iter().filter(|&&b| b).count()
}

/// Fraction of `true` entries; 0 for an empty slice.
#[inline]
pub fn mean(values: &[bool]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        count(values) as f64 / values.len() as f64
    }
}

/// Elementwise negation.
pub fn not(values: &[bool]) -> Vec<bool> {
    values.iter().map(|&b| !b).collect()
}

/// Elementwise AND, truncated to the shorter input.
pub fn and(a: &[bool], b: &[bool]) -> Vec<bool> {
    a.iter().zip(b).map(|(&x, &y)| x && y).collect()
}

/// Elementwise `a AND NOT b`, truncated to the shorter input.
pub fn and_not(a: &[bool], b: &[bool]) -> Vec<bool> {
    a.iter().zip(b).map(|(&x, &y)| x && !y).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[bool]]) -> BoolMatrix {
        BoolMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(BoolMatrix::from_rows(&[vec![true, false], vec![true]]).is_none());
    }

    #[test]
    fn test_empty_shapes() {
        let none: &[&[bool]] = &[];
        let zero = m(none);
        assert_eq!((zero.rows(), zero.cols()), (0, 0));
        assert!(zero.is_empty());

        let no_claims = m(&[&[], &[]]);
        assert_eq!((no_claims.rows(), no_claims.cols()), (2, 0));
        assert!(no_claims.is_empty());
        assert_eq!(no_claims.any_per_row(), vec![false, false]);
        assert!(no_claims.any_per_col().is_empty());
        assert_eq!(no_claims.iter_rows().count(), 0);
    }

    #[test]
    fn test_reductions() {
        let matrix = m(&[&[false, false, true], &[true, false, false]]);
        assert_eq!(matrix.any_per_row(), vec![true, true]);
        assert_eq!(matrix.any_per_col(), vec![true, false, true]);
        assert_eq!(
            matrix.any_per_col_where(&[false, true]),
            vec![true, false, false]
        );
        assert_eq!(
            matrix.any_per_col_where(&[true]),
            vec![false, false, true]
        );
    }

    #[test]
    fn test_transpose() {
        let matrix = m(&[&[true, false, true], &[false, false, true]]);
        let t = matrix.transpose();
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert_eq!(t.row(0), &[true, false]);
        assert_eq!(t.row(2), &[true, true]);
        assert_eq!(t.transpose(), matrix);

        let tall = BoolMatrix::new(0, 4).transpose();
        assert_eq!((tall.rows(), tall.cols()), (4, 0));
    }

    #[test]
    fn test_get_set() {
        let mut matrix = BoolMatrix::new(2, 2);
        matrix.set(1, 0, true);
        assert!(matrix.get(1, 0));
        assert!(!matrix.get(0, 1));
    }

    #[test]
    #[should_panic(expected = "row out of bounds")]
    fn test_row_out_of_bounds() {
        m(&[&[true, false]]).row(1);
    }

    #[test]
    #[should_panic(expected = "row out of bounds")]
    fn test_row_out_of_bounds_without_columns() {
        m(&[&[], &[]]).row(2);
    }

    #[test]
    fn test_vector_helpers() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[true, false, true, true]), 0.75);
        assert_eq!(count(&[true, false, true]), 2);
        assert_eq!(not(&[true, false]), vec![false, true]);
        assert_eq!(and(&[true, true, false], &[true, false]), vec![true, false]);
        assert_eq!(and_not(&[true, true], &[true, false]), vec![false, true]);
    }
}
