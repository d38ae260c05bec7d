use na::{DMatrix, DVector};

use crate::Error;

/// Solve the augmented system [M | b] with a partial-pivot LU decomposition of M.
///
/// Same contract as the Gaussian elimination solver, except the input is not modified. A
/// singular M yields a vector of NaN.
pub fn solve_lu(m: &DMatrix<f64>) -> Result<DVector<f64>, Error> {
    let rows = m.nrows();
    let columns = m.ncols();
    if rows == 0 || columns != rows + 1 {
        return Err(Error::InvalidShape { rows, columns });
    }
    let lhs = m.columns(0, rows).into_owned();
    let rhs = m.column(rows).into_owned();
    match lhs.lu().solve(&rhs) {
        Some(x) => Ok(x),
        None => {
            warn!("LU decomposition is singular");
            Ok(DVector::<f64>::from_element(rows, f64::NAN))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn matches_gaussian_elimination() {
        let m = DMatrix::from_row_slice(3, 4, &[
             2.0,  1.0, -1.0,   8.0,
            -3.0, -1.0,  2.0, -11.0,
            -2.0,  1.0,  2.0,  -3.0]);
        let x = solve_lu(&m).unwrap();
        assert_relative_eq!(x, DVector::from_vec(vec![2.0, 3.0, -1.0]), epsilon = 1e-12);
        let xg = crate::solve::gaussian::solve_gaussian(&mut m.clone()).unwrap();
        assert_relative_eq!(x, xg, epsilon = 1e-12);
    }

    #[test]
    fn singular_gives_nan_and_bad_shape_is_rejected() {
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 1.0, 2.0, 1.0, 1.0, 2.0]);
        assert!(solve_lu(&m).unwrap().iter().all(|x| x.is_nan()));
        let bad = DMatrix::<f64>::zeros(2, 2);
        assert_eq!(solve_lu(&bad), Err(Error::InvalidShape { rows: 2, columns: 2 }));
    }

    #[test]
    fn zero_rows_is_invalid_shape() {
        let m = DMatrix::<f64>::zeros(0, 1);
        assert_eq!(solve_lu(&m), Err(Error::InvalidShape { rows: 0, columns: 1 }));
    }
}
