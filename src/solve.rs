/*!
Solve for the source panel strengths
*/

pub mod gaussian;
pub mod lu;

use na::{DVector, Vector3};

use crate::elements::RectangularSourcePanel;
use crate::influence_matrix;
use crate::preprocess::input::Solver;
use crate::Error;

/// Solve for the panel strengths that make the flow tangential at every control point.
///
/// The strengths are index aligned with `panels`; the panels themselves are not modified.
/// Fails only when there are no panels. A rank-deficient panel set is reported through
/// non-finite strengths, not an error.
pub fn solve_strengths(panels: &[RectangularSourcePanel], v_far_field: &Vector3<f64>, solver: Solver)
    -> Result<DVector<f64>, Error> {

    if panels.is_empty() {
        return Err(Error::InvalidShape { rows: 0, columns: 1 });
    }
    let mut m = influence_matrix::get_influence_matrix(panels, v_far_field);

    info!(" Solving for {} panel strengths ({:?})...", panels.len(), solver);
    let strengths = match solver {
        Solver::GaussianElimination => gaussian::solve_gaussian(&mut m)?,
        Solver::Lu => lu::solve_lu(&m)?,
    };
    let num_bad = strengths.iter().filter(|s| !s.is_finite()).count();
    if num_bad > 0 {
        warn!("{} of {} panel strengths are not finite, the system is singular", num_bad, strengths.len());
    }
    Ok(strengths)
}

/// Solve for the panel strengths with Gaussian elimination
pub fn solve(panels: &[RectangularSourcePanel], v_far_field: &Vector3<f64>) -> Result<DVector<f64>, Error> {
    solve_strengths(panels, v_far_field, Solver::GaussianElimination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::geometry;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn unit_cube() -> Vec<RectangularSourcePanel> {
        geometry::cuboid(&Vector3::zeros(), &Vector3::new(1.0, 1.0, 1.0), &[1, 1, 1])
    }

    #[test]
    fn no_panels_is_invalid_shape() {
        let result = solve(&[], &Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(result, Err(Error::InvalidShape { rows: 0, columns: 1 }));
    }

    #[test]
    fn unit_cube_strengths() {
        let sigma = solve(&unit_cube(), &Vector3::new(10.0, 0.0, 0.0)).unwrap();
        // the two faces normal to the flow see each other through a solid angle of 4 asin(1/5)
        let coupling = (0.2_f64).asin() / std::f64::consts::PI;
        let expected = 10.0 / (0.5 - coupling);
        // -x face is a source, +x face a sink
        assert_relative_eq!(sigma[0], expected, max_relative = 1e-10);
        assert_relative_eq!(sigma[1], -expected, max_relative = 1e-10);
        for s in sigma.iter().skip(2) {
            assert_abs_diff_eq!(*s, 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn lu_and_gaussian_agree() {
        let panels = geometry::cuboid(&Vector3::new(0.0, 1.0, 0.0), &Vector3::new(2.0, 1.0, 0.5), &[2, 2, 1]);
        let v_inf = Vector3::new(3.0, -1.0, 0.5);
        let sg = solve_strengths(&panels, &v_inf, Solver::GaussianElimination).unwrap();
        let sl = solve_strengths(&panels, &v_inf, Solver::Lu).unwrap();
        assert_relative_eq!(sg, sl, epsilon = 1e-9, max_relative = 1e-9);
    }

    #[test]
    fn solving_twice_is_identical() {
        let panels = unit_cube();
        let v_inf = Vector3::new(10.0, 0.0, 0.0);
        let s1 = solve(&panels, &v_inf).unwrap();
        let s2 = solve(&panels, &v_inf).unwrap();
        assert_eq!(s1, s2);
        assert_eq!(panels, unit_cube());
    }

    #[test]
    fn strengths_satisfy_the_assembled_system() {
        let panels = geometry::cuboid(&Vector3::zeros(), &Vector3::new(1.0, 2.0, 3.0), &[2, 3, 2]);
        let v_inf = Vector3::new(1.0, 2.0, -0.5);
        let sigma = solve(&panels, &v_inf).unwrap();
        let m = influence_matrix::get_influence_matrix(&panels, &v_inf);
        let n = panels.len();
        let lhs = m.columns(0, n) * &sigma;
        assert_relative_eq!(lhs, m.column(n).into_owned(), epsilon = 1e-9);
    }
}
