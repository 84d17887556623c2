//! CLI logic for the Stepflow diagram tool.
//!
//! The CLI is the boundary around the renderer: it assembles and validates a
//! [`DiagramRequest`], renders it, and writes the PNG to disk.

mod args;
mod config;
mod error;

pub use args::Args;
pub use config::load_config;
pub use error::CliError;

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use log::{debug, info};

use stepflow::{DiagramBuilder, DiagramRequest, parse_steps};

/// Run the Stepflow CLI application
///
/// Builds the request from `args`, renders it, and writes the image.
///
/// # Returns
///
/// The path of the written PNG file.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or incomplete requests
/// - Rendering errors
pub fn run(args: &Args) -> Result<PathBuf, CliError> {
    let mut app_config = load_config(args.config.as_deref())?;
    if let Some(family) = &args.font_family {
        app_config.style_mut().set_font_family(family);
    }

    let request = load_request(args)?;
    request.validate()?;
    debug!(request:?; "Request loaded");

    let output = args
        .output
        .as_ref()
        .map_or_else(|| PathBuf::from(request.output_file_name()), PathBuf::from);
    info!(
        title = request.title.as_str(),
        output_path = output.display().to_string();
        "Processing diagram"
    );

    let diagram = DiagramBuilder::new(app_config).render(&request)?;

    fs::write(&output, diagram.bytes())
        .map_err(|err| CliError::io(output.display().to_string(), err))?;

    info!(
        output_file = output.display().to_string(),
        width = diagram.width(),
        height = diagram.height();
        "PNG exported successfully"
    );

    Ok(output)
}

/// Assembles the request from a JSON input or from the step flags.
///
/// # Errors
///
/// Returns [`CliError::Usage`] when neither an input nor a title is given,
/// [`CliError::Request`] for malformed JSON, and [`CliError::Io`] for
/// unreadable files.
pub fn load_request(args: &Args) -> Result<DiagramRequest, CliError> {
    if let Some(input) = &args.input {
        let json = read_source(input)?;
        return Ok(serde_json::from_str(&json)?);
    }

    let Some(title) = &args.title else {
        return Err(CliError::Usage(
            "either a request file or --title is required".to_string(),
        ));
    };

    let mut manual_steps = args.manual.clone();
    if let Some(path) = &args.manual_file {
        manual_steps.extend(parse_steps(&read_source(path)?));
    }

    let mut automation_steps = args.automation.clone();
    if let Some(path) = &args.automation_file {
        automation_steps.extend(parse_steps(&read_source(path)?));
    }

    Ok(DiagramRequest::new(
        title.as_str(),
        manual_steps,
        automation_steps,
    ))
}

/// Reads a file, or standard input when `path` is `-`.
fn read_source(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|err| CliError::io("<stdin>", err))?;
        return Ok(content);
    }
    fs::read_to_string(path).map_err(|err| CliError::io(path, err))
}
