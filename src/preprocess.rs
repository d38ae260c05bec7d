/*!
Preprocessing steps and input
*/

pub mod input;
pub mod geometry;

use na::Vector3;

use crate::elements::RectangularSourcePanel;
use crate::tools;

/// Preprocessing data, held by analysis
pub struct PreData {
    input: input::UserInput,
    panels: Vec<RectangularSourcePanel>,
    field_points: Vec<[f64; 3]>,
}

impl PreData {
    /// Get far-field flow velocity (v_inf)
    #[inline]
    pub fn get_far_field(&self) -> Vector3<f64> {return Vector3::from(self.input.far_field);}
    /// Get mass density of the fluid (rho)
    #[inline]
    pub fn get_mass_density(&self) -> f64 {return self.input.fluid.density;}
    /// Get free-stream static pressure (p_inf)
    #[inline]
    pub fn get_pressure(&self) -> f64 {return self.input.fluid.pressure;}
    /// Get linear solver type
    #[inline]
    pub fn get_solver(&self) -> input::Solver {return self.input.solver;}
    /// Return reference to body panels
    #[inline]
    pub fn get_panels(&self) -> &[RectangularSourcePanel] {return &self.panels;}
    /// Return number of equations (one per panel)
    #[inline]
    pub fn get_num_eqn(&self) -> usize {return self.panels.len();}
    /// Return reference to vector of field points
    #[inline]
    pub fn get_field_points(&self) -> &[[f64; 3]] {return &self.field_points;}
    /// Return reference to surface output file name
    #[inline]
    pub fn get_surface_filename(&self) -> Option<&String> {return self.input.output.surface_file.as_ref();}
    /// Return reference to field output file name
    #[inline]
    pub fn get_field_filename(&self) -> Option<&String> {return self.input.output.field_file.as_ref();}
}

/// Wrapper of preprocessing steps
pub fn preprocess(input: input::UserInput) -> Result<PreData, crate::Error> {
    info!(" Preprocessing...");
    let panels = process_body(&input.body)?;
    info!(" Body: {} panels", panels.len());
    let (lo, hi) = bounding_box(&panels);
    info!(" Body extent: [{}, {}, {}] to [{}, {}, {}]", lo.x, lo.y, lo.z, hi.x, hi.y, hi.z);
    let field_points = process_field_points(&input.field_points);
    info!(" Field points: {}", field_points.len());

    // take ownership of input data
    return Ok(PreData{input, panels, field_points});
}

/// Build the panel list from the body input
fn process_body(body: &input::BodyInput) -> Result<Vec<RectangularSourcePanel>, crate::Error> {
    let panels = match body {
        input::BodyInput::Panels { panels } => panels.clone(),
        input::BodyInput::Cuboid { center, lengths, divisions } => {
            if divisions.contains(&0) {
                error!("Cuboid divisions must be nonzero, got {:?}", divisions);
                Vec::new()
            }
            else {
                geometry::cuboid(&Vector3::from(*center), &Vector3::from(*lengths), divisions)
            }
        }
    };
    if panels.is_empty() {
        return Err(crate::Error::InvalidShape { rows: 0, columns: 1 });
    }
    for (i, panel) in panels.iter().enumerate() {
        let (u, v) = (panel.get_u(), panel.get_v());
        if (u.norm() - 1.0).abs() > 1e-6 || (v.norm() - 1.0).abs() > 1e-6 || u.dot(&v).abs() > 1e-6 {
            warn!("Panel {} tangents are not orthonormal (|u| = {}, |v| = {}, u.v = {})",
                  i, u.norm(), v.norm(), u.dot(&v));
        }
    }
    return Ok(panels);
}

/// Axis-aligned box spanned by the panel corners
pub fn bounding_box(panels: &[RectangularSourcePanel]) -> (Vector3<f64>, Vector3<f64>) {
    let mut lo = Vector3::repeat(f64::INFINITY);
    let mut hi = Vector3::repeat(f64::NEG_INFINITY);
    for corner in panels.iter().flat_map(|p| p.corners()) {
        lo = lo.inf(&corner);
        hi = hi.sup(&corner);
    }
    return (lo, hi);
}

/// Set up field point vector based on input
fn process_field_points(fp_input: &input::FieldPointInput) -> Vec<[f64; 3]> {
    match fp_input {
        input::FieldPointInput::List { points } => {
            return points.to_vec();
        },
        input::FieldPointInput::Line { start, end, number } => {
            let axes = [0, 1, 2].map(|k| tools::linspace(start[k], end[k], *number));
            return (0..*number).map(|i| [axes[0][i], axes[1][i], axes[2][i]]).collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cuboid_body_and_line_points() {
        let u = input::read_input_json("./src/tests/cube.json").unwrap();
        let predata = preprocess(u).unwrap();
        assert_eq!(predata.get_num_eqn(), 6);
        assert_eq!(predata.get_far_field(), Vector3::new(10.0, 0.0, 0.0));
        let fps = predata.get_field_points();
        assert_eq!(fps.len(), 5);
        assert_eq!(fps[0], [-2.0, 0.0, 0.0]);
        assert_eq!(fps[2], [-1.5, 0.0, 0.0]);
        assert_eq!(fps[4], [-1.0, 0.0, 0.0]);
    }

    #[test]
    fn body_extent_spans_the_cuboid() {
        let panels = geometry::cuboid(&Vector3::new(1.0, 0.0, -2.0), &Vector3::new(2.0, 1.0, 0.5), &[2, 1, 1]);
        let (lo, hi) = bounding_box(&panels);
        assert_relative_eq!(lo, Vector3::new(0.0, -0.5, -2.25), epsilon = 1e-12);
        assert_relative_eq!(hi, Vector3::new(2.0, 0.5, -1.75), epsilon = 1e-12);
    }

    #[test]
    fn empty_body_is_rejected() {
        let u = input::read_input_string(r#"{"body": {"Panels": {"panels": []}}, "far_field": [1, 0, 0]}"#).unwrap();
        assert!(matches!(preprocess(u), Err(crate::Error::InvalidShape { rows: 0, .. })));
        let u = input::read_input_string(r#"{"body": {"Cuboid": {"center": [0, 0, 0], "lengths": [1, 1, 1],
            "divisions": [1, 0, 1]}}, "far_field": [1, 0, 0]}"#).unwrap();
        assert!(preprocess(u).is_err());
    }
}
