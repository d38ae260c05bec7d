use scoped_threadpool::Pool;
use na::{DMatrix, Vector3};

use crate::elements::RectangularSourcePanel;
use crate::far_field;

/// Normal velocity induced at the outward side of a unit-strength flat panel's own centroid
pub const SELF_INFLUENCE: f64 = 0.5;

/// Below this many panels the rows are assembled on the calling thread
const SERIAL_ASSEMBLY_LIMIT: usize = 32;

/// evaluate the augmented influence matrix [M | rhs] of the source panel method.
/// M is real-valued, square and non-symmetric in general; M[i][j] is the normal velocity at
/// the control point of panel i due to panel j at unit strength, and the last column
/// carries -(v_inf . n_i)
pub fn get_influence_matrix(panels: &[RectangularSourcePanel], v_far_field: &Vector3<f64>) -> DMatrix<f64> {
    info!(" Assembling source panel influence matrix...");
    let n = panels.len();
    let positions: Vec<Vector3<f64>> = panels.iter().map(|p| p.get_position()).collect();
    let normals: Vec<Vector3<f64>> = panels.iter().map(|p| p.normal_vector()).collect();
    let rhs = far_field::get_far_field_rhs(panels, v_far_field);

    let rows = assemble_rows(n, n + 1, |i, row| {
        for (j, panel) in panels.iter().enumerate() {
            row[j] = if i == j {
                // the kernel is blind to the normal jump across the panel itself
                SELF_INFLUENCE
            }
            else {
                panel.velocity_at_with_strength(&positions[i], 1.0).dot(&normals[i])
            };
        }
        row[n] = rhs[i];
    });
    debug!(" Influence matrix assembled ({} x {})", n, n + 1);
    return DMatrix::<f64>::from_fn(n, n + 1, |i, j| rows[i][j]);
}

/// evaluate the unit-strength induced velocity at every control point, returned per
/// cartesian component (x, y, z) as n x n matrices. The diagonal holds the self term n_i / 2
pub fn get_surface_velocity_matrices(panels: &[RectangularSourcePanel]) -> [DMatrix<f64>; 3] {
    info!(" Assembling surface velocity matrices...");
    let n = panels.len();
    let positions: Vec<Vector3<f64>> = panels.iter().map(|p| p.get_position()).collect();

    let rows = assemble_rows(n, 3 * n, |i, row| {
        for (j, panel) in panels.iter().enumerate() {
            let vel = if i == j {
                SELF_INFLUENCE * panel.normal_vector()
            }
            else {
                panel.velocity_at_with_strength(&positions[i], 1.0)
            };
            for k in 0..3 {
                row[k * n + j] = vel[k];
            }
        }
    });
    return [0, 1, 2].map(|k| DMatrix::<f64>::from_fn(n, n, |i, j| rows[i][k * n + j]));
}

/// evaluate the unit-strength induced velocity and potential at arbitrary field points,
/// returned as ([vx, vy, vz], phi) with one row per field point and one column per panel
pub fn get_field_matrices(panels: &[RectangularSourcePanel], field_points: &[[f64; 3]])
    -> ([DMatrix<f64>; 3], DMatrix<f64>) {

    info!(" Assembling field point matrices...");
    let n = panels.len();
    let nfp = field_points.len();

    let rows = assemble_rows(nfp, 4 * n, |i, row| {
        let coord = Vector3::from_column_slice(&field_points[i]);
        for (j, panel) in panels.iter().enumerate() {
            let dr = coord - panel.get_position();
            let vel = crate::kernel::velocity(panel.a_over_2, panel.b_over_2, &dr, 1.0,
                                              &panel.get_u(), &panel.get_v());
            for k in 0..3 {
                row[k * n + j] = vel[k];
            }
            row[3 * n + j] = crate::kernel::potential(panel.a_over_2, panel.b_over_2, &dr, 1.0,
                                                      &panel.get_u(), &panel.get_v());
        }
    });
    let vel = [0, 1, 2].map(|k| DMatrix::<f64>::from_fn(nfp, n, |i, j| rows[i][k * n + j]));
    let phi = DMatrix::<f64>::from_fn(nfp, n, |i, j| rows[i][3 * n + j]);
    return (vel, phi);
}

/// number of worker threads for assembly
fn get_num_threads() -> usize {
    match std::thread::available_parallelism() {
        Ok(result) => std::cmp::max(result.get() / 2, 2),
        Err(_) => 2
    }
}

/// Fill nrows row buffers of length ncols with fill_row(i, row). Each job owns exactly one
/// row, so the workers share nothing mutable
fn assemble_rows<F>(nrows: usize, ncols: usize, fill_row: F) -> Vec<Vec<f64>>
    where F: Fn(usize, &mut [f64]) + Sync {

    let mut rows = vec![vec![0.0; ncols]; nrows];
    if nrows < SERIAL_ASSEMBLY_LIMIT {
        for (i, row) in rows.iter_mut().enumerate() {
            fill_row(i, row);
        }
        return rows;
    }
    let num_threads = get_num_threads();
    // use a parallel pool of threads
    debug!(" Using {} threads for {} rows...", num_threads, nrows);
    let mut pool = Pool::new(num_threads as u32);
    let fill_row = &fill_row;
    pool.scoped(|scope| {
        for (i, row) in rows.iter_mut().enumerate() {
            scope.execute(move || {
                fill_row(i, row);
            });
        }
    });
    return rows;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::geometry;
    use approx::assert_relative_eq;

    fn unit_cube() -> Vec<RectangularSourcePanel> {
        geometry::cuboid(&Vector3::zeros(), &Vector3::new(1.0, 1.0, 1.0), &[1, 1, 1])
    }

    #[test]
    fn shape_is_n_by_n_plus_one() {
        let m = get_influence_matrix(&unit_cube(), &Vector3::new(10.0, 0.0, 0.0));
        assert_eq!(m.nrows(), 6);
        assert_eq!(m.ncols(), 7);
    }

    #[test]
    fn diagonal_is_self_influence_limit() {
        let m = get_influence_matrix(&unit_cube(), &Vector3::new(10.0, 0.0, 0.0));
        for i in 0..6 {
            assert_eq!(m[(i, i)], SELF_INFLUENCE);
        }
    }

    #[test]
    fn off_diagonal_matches_kernel() {
        let panels = unit_cube();
        let m = get_influence_matrix(&panels, &Vector3::new(10.0, 0.0, 0.0));
        for i in 0..panels.len() {
            for j in 0..panels.len() {
                if i == j {continue;}
                let vel = panels[j].velocity_at_with_strength(&panels[i].get_position(), 1.0);
                assert_eq!(m[(i, j)], vel.dot(&panels[i].normal_vector()));
            }
        }
    }

    #[test]
    fn opposite_face_sees_the_solid_angle() {
        // a unit square seen from one unit away subtends 4 asin(1/5)
        let panels = unit_cube();
        let m = get_influence_matrix(&panels, &Vector3::new(1.0, 0.0, 0.0));
        let expected = (0.2_f64).asin() / std::f64::consts::PI;
        // panels 0 and 1 are the -x and +x faces; the -x source pushes fluid out through the +x face
        assert_relative_eq!(m[(1, 0)], expected, max_relative = 1e-12);
        assert_relative_eq!(m[(0, 1)], expected, max_relative = 1e-12);
    }

    #[test]
    fn rhs_column_is_negative_normal_free_stream() {
        let panels = unit_cube();
        let m = get_influence_matrix(&panels, &Vector3::new(10.0, 0.0, 0.0));
        let rhs: Vec<f64> = m.column(6).iter().copied().collect();
        assert_relative_eq!(rhs[0], 10.0);
        assert_relative_eq!(rhs[1], -10.0);
        for r in &rhs[2..] {
            assert_relative_eq!(*r, 0.0);
        }
    }

    #[test]
    fn parallel_and_serial_assembly_agree() {
        // 4 x 4 x 4 divisions give 96 panels, above the serial limit
        let panels = geometry::cuboid(&Vector3::zeros(), &Vector3::new(2.0, 1.0, 1.0), &[4, 4, 4]);
        assert!(panels.len() >= SERIAL_ASSEMBLY_LIMIT);
        let v_inf = Vector3::new(1.0, 0.5, 0.0);
        let m = get_influence_matrix(&panels, &v_inf);
        let n = panels.len();
        for i in [0, n / 2, n - 1] {
            for j in 0..n {
                let expected = if i == j {SELF_INFLUENCE} else {
                    panels[j].velocity_at_with_strength(&panels[i].get_position(), 1.0)
                        .dot(&panels[i].normal_vector())
                };
                assert_eq!(m[(i, j)], expected);
            }
        }
    }

    #[test]
    fn surface_velocity_normal_projection_is_influence_matrix() {
        let panels = unit_cube();
        let m = get_influence_matrix(&panels, &Vector3::zeros());
        let [vx, vy, vz] = get_surface_velocity_matrices(&panels);
        for i in 0..6 {
            let n = panels[i].normal_vector();
            for j in 0..6 {
                let vn = vx[(i, j)] * n.x + vy[(i, j)] * n.y + vz[(i, j)] * n.z;
                assert_relative_eq!(vn, m[(i, j)], epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn field_matrices_match_panel_evaluation() {
        let panels = unit_cube();
        let pts = [[2.0, 0.1, -0.3], [0.0, 0.0, 3.0]];
        let ([vx, _vy, vz], phi) = get_field_matrices(&panels, &pts);
        assert_eq!(phi.nrows(), 2);
        assert_eq!(phi.ncols(), 6);
        let r = Vector3::from(pts[1]);
        assert_relative_eq!(phi[(1, 4)], panels[4].potential_at(&r));
        assert_relative_eq!(vz[(1, 4)], panels[4].velocity_at(&r).z);
        let r = Vector3::from(pts[0]);
        assert_relative_eq!(vx[(0, 1)], panels[1].velocity_at(&r).x);
    }
}
