use std::error::Error;

use csv::Writer;
use na::{DVector, Vector3};

use crate::far_field;
use crate::influence_matrix;
use crate::preprocess;

/// standard gravity
const G: f64 = 9.81;

/// Results at the panel control points (outer side of the surface)
pub struct SurfaceResult {
    pub strength: f64,
    pub velocity: Vector3<f64>,
    /// Cp = 1 - |v|^2 / |v_inf|^2
    pub pressure_coefficient: f64,
    pub pressure: f64,
}

/// Results at a field point
pub struct FieldResult {
    pub velocity: Vector3<f64>,
    pub potential: f64,
    pub pressure: f64,
}

/// Static pressure p from Bernoulli's principle, (1/2) rho v^2 + rho g z + p = const,
/// given the state (p0, rho0, v0^2, z0) at some other point on the streamline
pub fn static_pressure(p0: f64, rho: f64, rho0: f64, v_sq: f64, v0_sq: f64, z: f64, z0: f64) -> f64 {
    let const0 = 0.5 * rho0 * v0_sq + rho0 * G * z0 + p0;
    return const0 - (0.5 * rho * v_sq + rho * G * z);
}

/// Static pressure relative to the free stream at the same altitude
#[inline]
fn pressure_from_speed(predata: &preprocess::PreData, v_sq: f64) -> f64 {
    let rho = predata.get_mass_density();
    let v_inf_sq = predata.get_far_field().norm_squared();
    return static_pressure(predata.get_pressure(), rho, rho, v_sq, v_inf_sq, 0.0, 0.0);
}

/// Pressure coefficient, NaN when there is no free stream
#[inline]
fn pressure_coefficient(v_sq: f64, v_inf_sq: f64) -> f64 {
    if v_inf_sq == 0.0 {
        return f64::NAN;
    }
    return 1.0 - v_sq / v_inf_sq;
}

/// Evaluate the total velocity and pressure at every control point for the given strengths
pub fn get_surface_results(predata: &preprocess::PreData, strengths: &DVector<f64>) -> Vec<SurfaceResult> {
    info!(" Calculating surface results...");
    let panels = predata.get_panels();
    let v_inf = predata.get_far_field();
    let [vx, vy, vz] = influence_matrix::get_surface_velocity_matrices(panels);
    let (ux, uy, uz) = (&vx * strengths, &vy * strengths, &vz * strengths);

    let mut results = Vec::with_capacity(panels.len());
    for i in 0..panels.len() {
        let velocity = v_inf + Vector3::new(ux[i], uy[i], uz[i]);
        let v_sq = velocity.norm_squared();
        let normal_flow = velocity.dot(&panels[i].normal_vector());
        if normal_flow.abs() > 1e-6 * f64::max(v_inf.norm(), 1.0) {
            debug!("Panel {} has residual normal velocity {}", i, normal_flow);
        }
        results.push(SurfaceResult {
            strength: strengths[i],
            velocity,
            pressure_coefficient: pressure_coefficient(v_sq, v_inf.norm_squared()),
            pressure: pressure_from_speed(predata, v_sq),
        });
    }
    return results;
}

/// Evaluate the total velocity, potential and pressure at the field points
pub fn get_field_results(predata: &preprocess::PreData, strengths: &DVector<f64>) -> Vec<FieldResult> {
    let field_points = predata.get_field_points();
    if field_points.is_empty() {
        return Vec::new();
    }
    info!(" Calculating field results...");
    let v_inf = predata.get_far_field();
    let ([vx, vy, vz], phi) = influence_matrix::get_field_matrices(predata.get_panels(), field_points);

    let vel_inf = far_field::get_far_field_velocity(field_points, &v_inf);
    let mut phi_fp = far_field::get_far_field_potential(field_points, &v_inf);
    // phi_fp = phi * sigma + phi_inf
    phi_fp.gemv(1.0, &phi, strengths, 1.0);
    let (ux, uy, uz) = (&vx * strengths, &vy * strengths, &vz * strengths);

    let mut results = Vec::with_capacity(field_points.len());
    for i in 0..field_points.len() {
        let velocity = vel_inf[i] + Vector3::new(ux[i], uy[i], uz[i]);
        results.push(FieldResult {
            velocity,
            potential: phi_fp[i],
            pressure: pressure_from_speed(predata, velocity.norm_squared()),
        });
    }
    return results;
}

/// Write surface results to a csv file, one row per panel
pub fn write_surface_results(predata: &preprocess::PreData, results: &[SurfaceResult], path: &str)
    -> Result<(), Box<dyn Error>> {
    let panels = predata.get_panels();
    if panels.len() != results.len() {
        return Err(format!("surface result count ({}) does not match panel count ({})",
                           results.len(), panels.len()).into());
    }
    info!(" Writing surface results to '{}'", path);
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(["index","x","y","z","strength","vx","vy","vz","cp","p"])?;
    for (i, (panel, result)) in panels.iter().zip(results.iter()).enumerate() {
        wtr.write_record(&[i.to_string(),
                           panel.position[0].to_string(),
                           panel.position[1].to_string(),
                           panel.position[2].to_string(),
                           result.strength.to_string(),
                           result.velocity.x.to_string(),
                           result.velocity.y.to_string(),
                           result.velocity.z.to_string(),
                           result.pressure_coefficient.to_string(),
                           result.pressure.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write field point results to a csv file, one row per field point
pub fn write_field_results(predata: &preprocess::PreData, results: &[FieldResult], path: &str)
    -> Result<(), Box<dyn Error>> {
    let points = predata.get_field_points();
    if points.len() != results.len() {
        return Err(format!("field result count ({}) does not match field point count ({})",
                           results.len(), points.len()).into());
    }
    info!(" Writing field results to '{}'", path);
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(["index","x","y","z","vx","vy","vz","phi","p"])?;
    for (i, (point, result)) in points.iter().zip(results.iter()).enumerate() {
        wtr.write_record(&[i.to_string(),
                           point[0].to_string(),
                           point[1].to_string(),
                           point[2].to_string(),
                           result.velocity.x.to_string(),
                           result.velocity.y.to_string(),
                           result.velocity.z.to_string(),
                           result.potential.to_string(),
                           result.pressure.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}
