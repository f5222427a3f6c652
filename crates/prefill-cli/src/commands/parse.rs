use prefill_core::config::{load_config, ExtractConfig, ExtractOptions};
use prefill_core::error::PrefillError;
use prefill_core::extraction::decoder_for_path;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    explain: bool,
) -> Result<(), PrefillError> {
    let config = match config_file {
        Some(path) => load_config(&path)?,
        None => ExtractConfig::default(),
    };
    let options = ExtractOptions {
        trace: explain,
        keep_raw_text: false,
    };

    let bytes = std::fs::read(&input_file)?;
    let decoder = decoder_for_path(&input_file)?;
    log::info!(
        "decoding {} with {}",
        input_file.display(),
        decoder.backend_name()
    );
    let extraction = prefill_core::extract_document(&bytes, decoder.as_ref(), &config, &options);

    if !extraction.success {
        let reason = extraction.error.unwrap_or_else(|| "unknown error".to_string());
        return Err(PrefillError::Extraction(reason));
    }

    let output_str = match output_format {
        "json" => output::json::format(&extraction)?,
        _ => output::table::format_extraction(&extraction),
    };

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            std::fs::write(&path, output::json::format(&extraction)?)?;
            eprintln!(
                "Extracted {} experience and {} education entr(ies), written to {}",
                extraction.resume.experience.len(),
                extraction.resume.education.len(),
                path.display()
            );
            for w in &extraction.warnings {
                eprintln!("  warning: {w}");
            }
            if explain && output_format != "json" {
                if let Some(ref trace) = extraction.trace {
                    eprintln!("{}", output::table::format_trace(trace));
                }
            }
        }
        None => {
            println!("{output_str}");
        }
    }

    Ok(())
}
