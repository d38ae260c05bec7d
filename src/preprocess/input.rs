/*!
Input processing
*/

use schemars::JsonSchema;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::error::Error;
use std::path::Path;

use crate::elements::RectangularSourcePanel;

/// Body surface, an explicit list of panels or a generated box
#[derive(Deserialize, JsonSchema)]
pub enum BodyInput {
    Panels { panels: Vec<RectangularSourcePanel> },
    /// Axis-aligned box with `divisions[k]` panels along axis k
    Cuboid { center: [f64; 3], lengths: [f64; 3], divisions: [usize; 3] }
}

/// Field point input, can be a list or evenly spaced points on a line
#[derive(Deserialize, JsonSchema)]
pub enum FieldPointInput {
    List { points: Vec<[f64; 3]> },
    Line { start: [f64; 3], end: [f64; 3], number: usize }
}

impl Default for FieldPointInput {
    fn default() -> FieldPointInput {
        FieldPointInput::List { points: Vec::new() }
    }
}

/// Linear solver type
///
/// GaussianElimination = in-place elimination with first-nonzero pivoting
/// Lu = partial-pivot LU decomposition
#[derive(Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Default)]
pub enum Solver {
    #[default]
    GaussianElimination,
    Lu
}

/// Fluid properties of the free stream
#[derive(Deserialize, JsonSchema)]
pub struct Fluid {
    /// Mass density (rho)
    pub density: f64,
    /// Static pressure of the free stream (p_inf)
    #[serde(default)]
    pub pressure: f64,
}

impl Default for Fluid {
    fn default() -> Fluid {
        Fluid { density: 1.0, pressure: 0.0 }
    }
}

/// Output struct, a file is only written when its name is given
#[derive(Deserialize, JsonSchema, Default)]
pub struct Output {
    /// Surface (control point) results file name
    pub surface_file: Option<String>,
    /// Field point results file name
    pub field_file: Option<String>,
}

/// Struct of user inputs
#[derive(Deserialize, JsonSchema)]
pub struct UserInput {
    pub body: BodyInput,
    /// Far-field flow velocity (the negative of the body velocity relative to the fluid)
    pub far_field: [f64; 3],
    #[serde(default)]
    pub fluid: Fluid,
    #[serde(default)]
    pub solver: Solver,
    #[serde(default)]
    pub field_points: FieldPointInput,
    #[serde(default)]
    pub output: Output
}

/// Read input from json at path
pub fn read_input_json<P: AsRef<Path>>(path: P) -> Result<UserInput, Box<dyn Error>> {
    // Open the file in read-only mode with buffer.
    info!(" Reading json file '{}' ...", path.as_ref().display());
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    // Read the JSON contents of the file as an instance of `UserInput`
    let u = serde_json::from_reader(reader)?;
    Ok(u)
}
/// Read input from json in a string (for testing)
pub fn read_input_string(str: &str) -> Result<UserInput, Box<dyn Error>> {
    let u = serde_json::from_str(str)?;
    Ok(u)
}

#[cfg(test)]
mod tests {
    use schemars::schema_for;
    use crate::preprocess::input;

    #[test]
    fn json_reader() {
        use std::path::Path;
        let u = input::read_input_json(Path::new("./src/tests/cube.json")).unwrap();
        assert_eq!(u.far_field, [10.0, 0.0, 0.0]);
        assert_eq!(u.solver, input::Solver::GaussianElimination);
        match u.body {
            input::BodyInput::Cuboid { divisions, .. } => assert_eq!(divisions, [1, 1, 1]),
            _ => panic!("expected a cuboid body"),
        }
    }

    #[test]
    fn defaults_for_optional_sections() {
        let u = input::read_input_string(r#"{
            "body": {"Panels": {"panels": [
                {"position": [0, 0, 0], "u": [1, 0, 0], "v": [0, 1, 0], "a_over_2": 0.5, "b_over_2": 0.5}
            ]}},
            "far_field": [0, 0, 1]
        }"#).unwrap();
        assert_eq!(u.solver, input::Solver::GaussianElimination);
        assert_eq!(u.fluid.density, 1.0);
        assert!(u.output.surface_file.is_none());
        match u.body {
            input::BodyInput::Panels { panels } => assert_eq!(panels[0].strength, 1.0),
            _ => panic!("expected explicit panels"),
        }
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(input::read_input_string(r#"{"far_field": [1, 0]}"#).is_err());
    }

    #[test]
    fn schema_describes_the_deck() {
        let schema = schema_for!(input::UserInput);
        let text = serde_json::to_string_pretty(&schema).unwrap();
        assert!(text.contains("far_field"));
        assert!(text.contains("Cuboid"));
    }
}
