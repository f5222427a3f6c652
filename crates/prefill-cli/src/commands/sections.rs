use prefill_core::error::PrefillError;
use prefill_core::extraction::decoder_for_path;
use prefill_core::parsing::sections::segment;
use prefill_core::trace::build_section_traces;
use std::path::Path;

pub fn run(input_file: &Path) -> Result<(), PrefillError> {
    let bytes = std::fs::read(input_file)?;
    let decoder = decoder_for_path(input_file)?;
    let content = decoder.decode(&bytes)?;
    let lines = prefill_core::normalize::normalize(&content);
    let segmentation = segment(&lines);

    println!("{} line(s) after normalization\n", lines.len());

    let traces = build_section_traces(&segmentation);
    if traces.is_empty() {
        println!("No section headers detected.");
        return Ok(());
    }

    let max_header = traces
        .iter()
        .map(|t| t.header.chars().count())
        .max()
        .unwrap_or(10);

    println!(
        "  {:>5}  {:<width$}  {:<14}  Lines",
        "Line",
        "Header",
        "Section",
        width = max_header
    );
    for t in &traces {
        println!(
            "  {:>5}  {:<width$}  {:<14}  {}",
            t.line_index + 1,
            t.header,
            t.key.as_str(),
            t.line_count,
            width = max_header
        );
    }

    Ok(())
}
