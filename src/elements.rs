/*!
Rectangular source panel descriptor
*/

use na::{DVector, Vector3};
use serde::Deserialize;
use schemars::JsonSchema;

use crate::kernel;

/// One flat, rectangular, constant-strength source element on a body surface.
///
/// `u` and `v` are assumed to be unit length and mutually orthogonal; this is
/// not checked.
#[derive(Clone, Debug, PartialEq, Deserialize, JsonSchema)]
pub struct RectangularSourcePanel {
    /// Centroid of the rectangle (also the control point)
    pub position: [f64; 3],
    /// Unit tangent parallel to one side of the rectangle
    pub u: [f64; 3],
    /// Unit tangent parallel to the other side of the rectangle
    pub v: [f64; 3],
    /// Half of the side length along u
    pub a_over_2: f64,
    /// Half of the side length along v
    pub b_over_2: f64,
    /// Volume flux per unit area, > 0 for a source and < 0 for a sink
    #[serde(default = "unit_strength")]
    pub strength: f64,
}

fn unit_strength() -> f64 { 1.0 }

impl RectangularSourcePanel {
    /// New unit-strength panel
    pub fn new(position: Vector3<f64>, u: Vector3<f64>, v: Vector3<f64>, a_over_2: f64, b_over_2: f64) -> RectangularSourcePanel {
        RectangularSourcePanel {
            position: position.into(),
            u: u.into(),
            v: v.into(),
            a_over_2,
            b_over_2,
            strength: 1.0,
        }
    }
    #[inline]
    pub fn get_position(&self) -> Vector3<f64> {Vector3::from(self.position)}
    #[inline]
    pub fn get_u(&self) -> Vector3<f64> {Vector3::from(self.u)}
    #[inline]
    pub fn get_v(&self) -> Vector3<f64> {Vector3::from(self.v)}
    /// Outward unit normal, u x v normalized
    #[inline]
    pub fn normal_vector(&self) -> Vector3<f64> {
        self.get_u().cross(&self.get_v()).normalize()
    }
    /// Area of the rectangle
    #[inline]
    pub fn area(&self) -> f64 {4.0 * self.a_over_2 * self.b_over_2}
    /// Corners in the order (-u,-v), (-u,+v), (+u,-v), (+u,+v)
    pub fn corners(&self) -> [Vector3<f64>; 4] {
        let p = self.get_position();
        let du = self.a_over_2 * self.get_u();
        let dv = self.b_over_2 * self.get_v();
        [p - du - dv, p - du + dv, p + du - dv, p + du + dv]
    }
    /// Velocity induced at r by this panel at its current strength
    pub fn velocity_at(&self, r: &Vector3<f64>) -> Vector3<f64> {
        self.velocity_at_with_strength(r, self.strength)
    }
    /// Velocity induced at r by this panel at the given strength (1 for influence coefficients)
    pub fn velocity_at_with_strength(&self, r: &Vector3<f64>, strength: f64) -> Vector3<f64> {
        let dr = r - self.get_position();
        kernel::velocity(self.a_over_2, self.b_over_2, &dr, strength, &self.get_u(), &self.get_v())
    }
    /// Velocity potential at r due to this panel at its current strength
    pub fn potential_at(&self, r: &Vector3<f64>) -> f64 {
        let dr = r - self.get_position();
        kernel::potential(self.a_over_2, self.b_over_2, &dr, self.strength, &self.get_u(), &self.get_v())
    }
}

/// Write solved strengths back onto the panels (index aligned)
pub fn set_strengths(panels: &mut [RectangularSourcePanel], strengths: &DVector<f64>) {
    if panels.len() != strengths.len() {
        warn!("Panel count ({}) and strength count ({}) differ, assigning {} values",
              panels.len(), strengths.len(), usize::min(panels.len(), strengths.len()));
    }
    for (panel, strength) in panels.iter_mut().zip(strengths.iter()) {
        panel.strength = *strength;
    }
}
