use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let input_path_str = match args.get(1) {
        Some(path) => path,
        None => {
            eprintln!("Usage: panel_flow <input.json>");
            return ExitCode::FAILURE;
        }
    };
    let mut analysis = panel_flow::Analysis::new();
    let result = analysis.input_from_file(input_path_str)
        .and_then(|_| analysis.run())
        .and_then(|_| analysis.write_results());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
