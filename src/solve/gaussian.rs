/*!
Dense Gaussian elimination on augmented systems [M | b]
*/

use na::{DMatrix, DVector};

use crate::Error;

/// Index of the first row at or below start_row with a nonzero entry in column
pub fn find_first_nonzero_row(m: &DMatrix<f64>, column: usize, start_row: usize) -> Option<usize> {
    (start_row..m.nrows()).find(|&i| m[(i, column)] != 0.0)
}

/// Transform m in place to (unnormalized) row echelon form.
///
/// The pivot in each column is the first nonzero entry at or below the current row; a column
/// without one is skipped without advancing the row.
pub fn transform_to_row_echelon(m: &mut DMatrix<f64>) {
    let rows = m.nrows();
    let columns = m.ncols();

    let mut i = 0;
    let mut j = 0;
    while i < rows && j < columns {
        let pivot_row = match find_first_nonzero_row(m, j, i) {
            Some(row) => row,
            None => {
                j += 1;
                continue;
            }
        };
        if pivot_row != i {
            m.swap_rows(pivot_row, i);
        }
        let pivot = m[(i, j)];
        for r in (i + 1)..rows {
            let factor = m[(r, j)] / pivot;
            m[(r, j)] = 0.0;
            if factor == 0.0 {continue;}
            for c in (j + 1)..columns {
                m[(r, c)] -= factor * m[(i, c)];
            }
        }
        i += 1;
        j += 1;
    }
}

/// Solve M x = b given as the n x (n + 1) augmented matrix [M | b], n > 0.
///
/// The matrix is overwritten with its row echelon form. Row swaps only reorder equations, so
/// the solution needs no permutation afterwards. A singular system is not detected: the zero
/// pivot shows up as Inf or NaN entries in the returned vector.
pub fn solve_gaussian(m: &mut DMatrix<f64>) -> Result<DVector<f64>, Error> {
    let rows = m.nrows();
    let columns = m.ncols();
    if rows == 0 || columns != rows + 1 {
        return Err(Error::InvalidShape { rows, columns });
    }

    transform_to_row_echelon(m);

    let mut x = DVector::<f64>::zeros(rows);
    for i in (0..rows).rev() {
        let mut xi = m[(i, rows)];
        for j in (i + 1)..rows {
            xi -= x[j] * m[(i, j)];
        }
        x[i] = xi / m[(i, i)];
    }
    Ok(x)
}
