/*!
Analytic velocity and velocity potential of a rectangular constant-strength source panel

The panel is described by its half-extents along the orthonormal tangents `u` and `v`,
and the field point by `dr`, the displacement from the panel centroid. With the field point
projected onto the panel plane at (x, y) and a perpendicular distance `sqrt_k`, corner kl
sits at (xi_k, eta_l) with xi = (-a/2, +a/2) and eta = (-b/2, +b/2). Corner sums are taken
with the signs (+, -, -, +) for corners (11, 12, 21, 22).
*/

use std::f64::consts::PI;
use na::Vector3;

/// Corner offsets, distances and out-of-plane component shared by both kernels
struct PanelGeometry {
    /// xi_k - x
    x_off: [f64; 2],
    /// eta_l - y
    y_off: [f64; 2],
    /// distance from the field point to corner kl
    d: [[f64; 2]; 2],
    /// component of dr normal to the panel plane
    c: Vector3<f64>,
    sqrt_k: f64,
}

impl PanelGeometry {
    #[inline]
    fn new(a_over_2: f64, b_over_2: f64, dr: &Vector3<f64>, u: &Vector3<f64>, v: &Vector3<f64>) -> PanelGeometry {
        let u_dot_dr = u.dot(dr);
        let v_dot_dr = v.dot(dr);
        let c = dr - u_dot_dr * u - v_dot_dr * v;
        let xi = [-a_over_2, a_over_2];
        let eta = [-b_over_2, b_over_2];
        let mut d = [[0.0; 2]; 2];
        for k in 0..2 {
            for l in 0..2 {
                d[k][l] = (dr - xi[k] * u - eta[l] * v).norm();
            }
        }
        PanelGeometry {
            x_off: [xi[0] - u_dot_dr, xi[1] - u_dot_dr],
            y_off: [eta[0] - v_dot_dr, eta[1] - v_dot_dr],
            d,
            sqrt_k: c.norm(),
            c,
        }
    }
    /// Squared distance from the field point to the line through corner k parallel to v
    #[inline]
    fn rho_sq_u(&self, k: usize) -> f64 {self.x_off[k] * self.x_off[k] + self.sqrt_k * self.sqrt_k}
    /// Squared distance from the field point to the line through corner l parallel to u
    #[inline]
    fn rho_sq_v(&self, l: usize) -> f64 {self.y_off[l] * self.y_off[l] + self.sqrt_k * self.sqrt_k}
    /// Signed corner sum of the solid angle terms, atan22 - atan21 - atan12 + atan11.
    /// Zero when the point lies in the panel plane.
    #[inline]
    fn atan_sum(&self) -> f64 {
        if self.sqrt_k == 0.0 {
            return 0.0;
        }
        let mut t = [[0.0; 2]; 2];
        for k in 0..2 {
            for l in 0..2 {
                t[k][l] = f64::atan2(self.x_off[k] * self.y_off[l], self.sqrt_k * self.d[k][l]);
            }
        }
        corner_sum(&t)
    }
}

/// (t22 - t12) - (t21 - t11); grouped so that a zero half-extent cancels exactly
#[inline]
fn corner_sum(t: &[[f64; 2]; 2]) -> f64 {
    (t[1][1] - t[0][1]) - (t[1][0] - t[0][0])
}

/// offset + dist, with the negative offset case rewritten as rho^2 / (dist - offset)
#[inline]
fn offset_plus_dist(offset: f64, dist: f64, rho_sq: f64) -> f64 {
    if offset >= 0.0 {
        offset + dist
    }
    else {
        rho_sq / (dist - offset)
    }
}

/// (hi + d_hi) / (lo + d_lo) along one edge line, where lo <= hi are the corner offsets
/// and rho_sq the squared distance to that line. The common rho^2 factor cancels when
/// both offsets are negative, which removes the 0/0 on the extension of the edge.
#[inline]
fn edge_ratio(lo: f64, hi: f64, d_lo: f64, d_hi: f64, rho_sq: f64) -> f64 {
    if lo >= 0.0 {
        (hi + d_hi) / (lo + d_lo)
    }
    else if hi <= 0.0 {
        (d_lo - lo) / (d_hi - hi)
    }
    else {
        (hi + d_hi) * (d_lo - lo) / rho_sq
    }
}

/// coef * ln(offset + dist), zero whenever coef is zero
#[inline]
fn scaled_ln(coef: f64, offset: f64, dist: f64, rho_sq: f64) -> f64 {
    if coef == 0.0 {
        return 0.0;
    }
    coef * offset_plus_dist(offset, dist, rho_sq).ln()
}

/// Velocity induced at `dr` (relative to the panel centroid) by a rectangular source panel
/// of half-extents `a_over_2`, `b_over_2` along `u`, `v`.
///
/// Returns the zero vector at the centroid itself. Points in the panel plane get no
/// normal component; the self-induced normal velocity of a panel is left to the caller.
pub fn velocity(a_over_2: f64, b_over_2: f64, dr: &Vector3<f64>, strength: f64,
                u: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    if dr.x == 0.0 && dr.y == 0.0 && dr.z == 0.0 {
        return Vector3::zeros();
    }
    let g = PanelGeometry::new(a_over_2, b_over_2, dr, u, v);

    // ratio of the two edge lines parallel to v (k = 2 over k = 1)
    let q1 = [0, 1].map(|k| edge_ratio(g.y_off[0], g.y_off[1], g.d[k][0], g.d[k][1], g.rho_sq_u(k)));
    // ratio of the two edge lines parallel to u (l = 2 over l = 1)
    let q2 = [0, 1].map(|l| edge_ratio(g.x_off[0], g.x_off[1], g.d[0][l], g.d[1][l], g.rho_sq_v(l)));
    let ln1 = (q1[1] / q1[0]).abs().ln();
    let ln2 = (q2[1] / q2[0]).abs().ln();

    let scale = strength / (4.0 * PI);
    if g.sqrt_k > 0.0 {
        let atan_sum = g.atan_sum();
        return scale * (ln1 * u + ln2 * v + (atan_sum / g.sqrt_k) * g.c);
    }
    scale * (ln1 * u + ln2 * v)
}

/// Velocity potential at `dr` (relative to the panel centroid) due to a rectangular source
/// panel of half-extents `a_over_2`, `b_over_2` along `u`, `v`.
///
/// Finite everywhere except at the corners themselves, including the centroid.
pub fn potential(a_over_2: f64, b_over_2: f64, dr: &Vector3<f64>, strength: f64,
                 u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    let g = PanelGeometry::new(a_over_2, b_over_2, dr, u, v);

    let mut t1 = [[0.0; 2]; 2];
    let mut t2 = [[0.0; 2]; 2];
    for k in 0..2 {
        for l in 0..2 {
            // (xi_k - x) ln(eta_l - y + d_kl)
            t1[k][l] = scaled_ln(g.x_off[k], g.y_off[l], g.d[k][l], g.rho_sq_u(k));
            // (eta_l - y) ln(xi_k - x + d_kl)
            t2[k][l] = scaled_ln(g.y_off[l], g.x_off[k], g.d[k][l], g.rho_sq_v(l));
        }
    }
    let ln_sum_1 = corner_sum(&t1);
    let ln_sum_2 = corner_sum(&t2);
    let scaled_atan_sum = g.sqrt_k * g.atan_sum();

    -strength / (4.0 * PI) * (ln_sum_1 + ln_sum_2 - scaled_atan_sum)
}
