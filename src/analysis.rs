/*!
Defines the analysis object (struct) and analysis states
*/

use simplelog::*;
use std::error::Error;
use std::fs::File;
use std::path::Path;

use na::DVector;

use crate::elements;
use crate::preprocess;
use crate::solve;
use crate::postprocess;

/// Enumerate the analysis states for tracking
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AnalysisState {
    PostInput,
    PostSolve,
    Null
}

///This contains all data related to the analysis and the main wrapper functions
///
/// Methods:
/// - create an Analysis
/// - input
/// - run
/// - get/write results
pub struct Analysis {
    temp_input: Option<preprocess::input::UserInput>,
    log_file: String,
    predata: Option<preprocess::PreData>,
    analysis_state: AnalysisState,
    strengths: Option<DVector<f64>>,
    surface_results: Vec<postprocess::SurfaceResult>,
    field_results: Vec<postprocess::FieldResult>,
}

impl Default for Analysis {
    fn default() -> Analysis {
        Analysis::new()
    }
}

impl Analysis {
    pub fn new() -> Analysis {
        Analysis {
            temp_input: None,
            log_file: "".to_string(),
            predata: None,
            analysis_state: AnalysisState::Null,
            strengths: None,
            surface_results: Vec::new(),
            field_results: Vec::new(),
        }
    }
    /// Input from json file at path (string)
    pub fn input_from_file(&mut self, input_path_str: &str) -> Result<(), Box<dyn Error>> {
        println!(" Attempting to read input file: {}", input_path_str);
        let path = Path::new(input_path_str);
        self.log_file = path.file_stem().and_then(|s| s.to_str()).unwrap_or("panel_flow").to_string();
        self.temp_input = Some(preprocess::input::read_input_json(path)?);
        self.analysis_state = AnalysisState::PostInput;
        Ok(())
    }
    /// Input from json string (mostly for tests)
    pub fn input_from_string(&mut self, input_str: &str) -> Result<(), Box<dyn Error>> {
        self.temp_input = Some(preprocess::input::read_input_string(input_str)?);
        self.analysis_state = AnalysisState::PostInput;
        Ok(())
    }
    /// Directly set a user input (mostly for tests)
    pub fn set_input(&mut self, input: preprocess::input::UserInput) {
        self.temp_input = Some(input);
        self.analysis_state = AnalysisState::PostInput;
    }
    /// Current analysis state
    pub fn get_state(&self) -> AnalysisState {self.analysis_state}
    /// Run the analysis, writing out to the log file if created
    ///
    /// Analysis stages:
    ///     - Preamble
    ///     - Preprocess (panels, field points)
    ///     - Assemble and solve for panel strengths
    ///     - Surface and field results
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {

        let input = match self.temp_input.take() {
            Some(input) => input,
            None => return Err("No input found".into()),
        };

        // set up logger, if no input file, just output to stdout
        if self.log_file.is_empty() {
            let _ = TermLogger::init(LevelFilter::Info, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
        }
        else {
            let logfile = File::create(format!("{}{}",self.log_file,".log"))?;
            let _ = CombinedLogger::init(
                vec![
                    TermLogger::new(LevelFilter::Info, Config::default(), TerminalMode::Mixed, ColorChoice::Auto),
                    WriteLogger::new(LevelFilter::Info, Config::default(), logfile),
                ]
            );
        }

        info!("=== panel_flow <=> SOURCE PANEL METHOD ===");
        info!("Ver. {}", crate::VERSION);
        if let Ok(dir) = std::env::current_dir() {
            info!(" Current directory: {}", dir.display());
        }
        if !self.log_file.is_empty() {
            info!(" Starting analysis... (see log file: {}{})", self.log_file,".log");
        }

        // preprocess
        let predata = self.predata.insert(preprocess::preprocess(input)?);

        let v_inf = predata.get_far_field();
        info!(" Far-field velocity: [{}, {}, {}]", v_inf.x, v_inf.y, v_inf.z);
        let strengths = solve::solve_strengths(predata.get_panels(), &v_inf, predata.get_solver())?;

        self.surface_results = postprocess::get_surface_results(predata, &strengths);
        self.field_results = postprocess::get_field_results(predata, &strengths);
        self.strengths = Some(strengths);

        self.analysis_state = AnalysisState::PostSolve;

        info!(" Complete!");
        Ok(())
    }
    /// Return ref to panel strengths from analysis
    pub fn get_strengths(&self) -> Option<&DVector<f64>> {
        return self.strengths.as_ref();
    }
    /// Return ref to control point results from analysis
    pub fn get_surface_results(&self) -> &Vec<postprocess::SurfaceResult> {
        return &self.surface_results;
    }
    /// Return ref to field results from analysis
    pub fn get_field_results(&self) -> &Vec<postprocess::FieldResult> {
        return &self.field_results;
    }
    /// Return the body panels with the solved strengths assigned
    pub fn get_solved_panels(&self) -> Option<Vec<elements::RectangularSourcePanel>> {
        let predata = self.predata.as_ref()?;
        let strengths = self.strengths.as_ref()?;
        let mut panels = predata.get_panels().to_vec();
        elements::set_strengths(&mut panels, strengths);
        return Some(panels);
    }
    /// Write results to the output files named in the input
    pub fn write_results(&self) -> Result<(), Box<dyn Error>> {
        if self.analysis_state != AnalysisState::PostSolve {
            return Err("Analysis has not been run".into());
        }
        let predata = self.predata.as_ref().ok_or("Analysis has not been run")?;
        if let Some(file) = predata.get_surface_filename() {
            postprocess::write_surface_results(predata, &self.surface_results, file)?;
        }
        if let Some(file) = predata.get_field_filename() {
            postprocess::write_field_results(predata, &self.field_results, file)?;
        }
        Ok(())
    }
}
