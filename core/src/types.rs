use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn cell_product(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub(crate) fn dim_to_coords(dim: (usize, usize)) -> Coord2 {
    (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        neighbors(index, dim_to_coords(self.dim()))
    }
}

/// Iterates the up-to-8 in-bounds neighbors of `center`, row-major order.
pub fn neighbors(center: Coord2, bounds: Coord2) -> NeighborIter {
    NeighborIter {
        center,
        bounds,
        pending: &DISPLACEMENTS,
    }
}

const DISPLACEMENTS: [(i16, i16); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// `coords` shifted by `(d_row, d_col)`, if that lands inside `bounds`.
fn step(coords: Coord2, (d_row, d_col): (i16, i16), bounds: Coord2) -> Option<Coord2> {
    let row = coords.0.checked_add_signed(d_row)?;
    let col = coords.1.checked_add_signed(d_col)?;
    (row < bounds.0 && col < bounds.1).then_some((row, col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    pending: &'static [(i16, i16)],
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((&delta, rest)) = self.pending.split_first() {
            self.pending = rest;
            if let Some(coords) = step(self.center, delta, self.bounds) {
                return Some(coords);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let found: Vec<_> = neighbors((1, 1), (3, 3)).collect();
        assert_eq!(found.len(), 8);
        assert!(!found.contains(&(1, 1)));
    }

    #[test]
    fn corner_cell_has_three_neighbors() {
        let found: Vec<_> = neighbors((0, 0), (3, 3)).collect();
        assert_eq!(found, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn edge_cell_has_five_neighbors() {
        let found: Vec<_> = neighbors((0, 1), (3, 3)).collect();
        assert_eq!(found.len(), 5);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(neighbors((0, 0), (1, 1)).count(), 0);
    }
}
