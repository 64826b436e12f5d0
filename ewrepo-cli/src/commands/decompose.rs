//! `decompose` command: split a suffix into typed segments.

use ewrepo::suffix::{Segment, SuffixComponents, SuffixParser};

use crate::error::CliError;

/// Decompose `suffix` and print the result.
pub fn run(parser: &SuffixParser<'_>, suffix: &str, json: bool) -> Result<(), CliError> {
    let segments = parser.decompose(suffix)?;
    tracing::debug!(suffix, count = segments.len(), "decomposed suffix");
    println!("{}", render(&segments, json)?);
    Ok(())
}

/// Render segments as `kind<TAB>text` lines, or as JSON components.
pub fn render(segments: &[Segment], json: bool) -> Result<String, CliError> {
    if !json {
        return Ok(segments
            .iter()
            .map(|s| format!("{}\t{}", s.kind, s.text))
            .collect::<Vec<_>>()
            .join("\n"));
    }

    let components = SuffixComponents::from_segments(segments)
        .ok_or_else(|| CliError::Output("segments do not start with an erts version".into()))?;
    serde_json::to_string_pretty(&components).map_err(|e| CliError::Output(e.to_string()))
}
