//! Binary assignment matrix.

/// A `material_count x dept_count` matrix of assignment bits.
///
/// Cell `(material, dept)` set means `material` is acquired for `dept`.
/// Storage is flat and material-major, so [`Solution::cell_index`] is also
/// the identifier used by the tabu list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    material_count: usize,
    dept_count: usize,
    cells: Vec<bool>,
}

impl Solution {
    /// Creates an all-zero assignment.
    pub fn empty(material_count: usize, dept_count: usize) -> Self {
        Self {
            material_count,
            dept_count,
            cells: vec![false; material_count * dept_count],
        }
    }

    /// Builds a solution from 0/1 rows, one per material.
    ///
    /// Any non-zero entry counts as assigned.
    ///
    /// # Panics
    /// Panics if the rows do not all have the same length.
    pub fn from_rows(rows: &[Vec<u8>]) -> Self {
        let dept_count = rows.first().map_or(0, Vec::len);
        let mut solution = Self::empty(rows.len(), dept_count);
        for (material, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), dept_count, "ragged solution rows");
            for (dept, &bit) in row.iter().enumerate() {
                solution.set(material, dept, bit != 0);
            }
        }
        solution
    }

    pub fn material_count(&self) -> usize {
        self.material_count
    }

    pub fn dept_count(&self) -> usize {
        self.dept_count
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flattened index of `(material, dept)`.
    #[inline]
    pub fn cell_index(&self, material: usize, dept: usize) -> usize {
        material * self.dept_count + dept
    }

    #[inline]
    pub fn get(&self, material: usize, dept: usize) -> bool {
        self.cells[self.cell_index(material, dept)]
    }

    #[inline]
    pub fn set(&mut self, material: usize, dept: usize, value: bool) {
        let idx = self.cell_index(material, dept);
        self.cells[idx] = value;
    }

    /// Toggles a cell between 0 and 1.
    #[inline]
    pub fn flip(&mut self, material: usize, dept: usize) {
        let idx = self.cell_index(material, dept);
        self.cells[idx] = !self.cells[idx];
    }

    /// Toggles a cell addressed by its flattened index.
    #[inline]
    pub fn flip_index(&mut self, index: usize) {
        self.cells[index] = !self.cells[index];
    }

    /// Cells in flattened (material-major) order.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    /// Returns `true` if `material` is assigned to at least one department.
    pub fn is_acquired(&self, material: usize) -> bool {
        let start = material * self.dept_count;
        self.cells[start..start + self.dept_count].iter().any(|&b| b)
    }

    /// Number of materials assigned to `dept`.
    pub fn assigned_to(&self, dept: usize) -> usize {
        (0..self.material_count)
            .filter(|&m| self.get(m, dept))
            .count()
    }

    /// Clears every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_and_index() {
        let mut s = Solution::empty(3, 2);
        assert_eq!(s.len(), 6);
        assert_eq!(s.cell_index(2, 1), 5);

        s.flip(2, 1);
        assert!(s.get(2, 1));
        s.flip_index(5);
        assert!(!s.get(2, 1));
    }

    #[test]
    fn test_from_rows() {
        let s = Solution::from_rows(&[vec![1, 0], vec![0, 1], vec![1, 1]]);
        assert_eq!(s.material_count(), 3);
        assert!(s.get(0, 0));
        assert!(!s.get(0, 1));
        assert_eq!(s.assigned_to(0), 2);
        assert_eq!(s.assigned_to(1), 2);
    }

    #[test]
    fn test_acquired_and_clear() {
        let mut s = Solution::from_rows(&[vec![0, 0], vec![0, 1]]);
        assert!(!s.is_acquired(0));
        assert!(s.is_acquired(1));
        s.clear();
        assert!(!s.is_acquired(1));
    }
}
