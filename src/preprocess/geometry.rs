/*!
Panel generation for simple bodies
*/

use na::Vector3;

use crate::elements::RectangularSourcePanel;

/// Tile the six faces of an axis-aligned box with outward-oriented rectangular panels.
///
/// `divisions[k]` is the number of panels along axis k on every face that spans that axis.
/// Faces are emitted in the order -x, +x, -y, +y, -z, +z, each face row-major in (u, v).
pub fn cuboid(center: &Vector3<f64>, lengths: &Vector3<f64>, divisions: &[usize; 3]) -> Vec<RectangularSourcePanel> {
    let mut panels = Vec::new();
    for k in 0..3 {
        let k1 = (k + 1) % 3;
        let k2 = (k + 2) % 3;
        for side in [-1.0, 1.0] {
            // e_k1 x e_k2 = e_k, so swap the tangents on the negative face
            let (iu, iv) = if side > 0.0 {(k1, k2)} else {(k2, k1)};
            let u = Vector3::ith(iu, 1.0);
            let v = Vector3::ith(iv, 1.0);
            let nu = divisions[iu];
            let nv = divisions[iv];
            let a_over_2 = 0.5 * lengths[iu] / (nu as f64);
            let b_over_2 = 0.5 * lengths[iv] / (nv as f64);
            let face_center = center + side * 0.5 * lengths[k] * Vector3::ith(k, 1.0);
            for i in 0..nu {
                for j in 0..nv {
                    let su = -0.5 * lengths[iu] + (2 * i + 1) as f64 * a_over_2;
                    let sv = -0.5 * lengths[iv] + (2 * j + 1) as f64 * b_over_2;
                    let position = face_center + su * u + sv * v;
                    panels.push(RectangularSourcePanel::new(position, u, v, a_over_2, b_over_2));
                }
            }
        }
    }
    return panels;
}
