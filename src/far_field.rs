use na::{DVector, Vector3};

use crate::elements::RectangularSourcePanel;

/// return the boundary condition right-hand side on the surface, -(v_inf . n) at each control point
pub fn get_far_field_rhs(panels: &[RectangularSourcePanel], v_far_field: &Vector3<f64>) -> DVector<f64> {
    let mut rhs = DVector::<f64>::zeros(panels.len());
    for (i, panel) in panels.iter().enumerate() {
        // total normal velocity v_inf . n + sum(M_ij sigma_j) must vanish
        rhs[i] = -v_far_field.dot(&panel.normal_vector());
    }
    return rhs;
}

/// return the free-stream velocity at field points (uniform)
pub fn get_far_field_velocity(field_points: &[[f64; 3]], v_far_field: &Vector3<f64>) -> Vec<Vector3<f64>> {
    return vec![*v_far_field; field_points.len()];
}

/// return the free-stream velocity potential at field points, phi = v_inf . r
pub fn get_far_field_potential(field_points: &[[f64; 3]], v_far_field: &Vector3<f64>) -> DVector<f64> {
    let mut phi = DVector::<f64>::zeros(field_points.len());
    for (i, fp) in field_points.iter().enumerate() {
        let coord = Vector3::from_column_slice(fp);
        phi[i] = v_far_field.dot(&coord);
    }
    return phi;
}
