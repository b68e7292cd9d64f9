//! One-shot visualizer view over a `VisualizationSession`.

use std::io::Write;
use std::path::Path;

use base64::Engine as _;
use evergreen_ai::prompts::VISUALIZER_PRESETS;
use evergreen_ai::VisualizationSession;
use evergreen_common::EvergreenError;

/// Pick the description: a 1-based preset, else the free text.
pub fn resolve_description(
    description: Option<String>,
    preset: Option<usize>,
) -> Result<String, EvergreenError> {
    match (preset, description) {
        (Some(n), _) => n
            .checked_sub(1)
            .and_then(|i| VISUALIZER_PRESETS.get(i))
            .map(|p| p.to_string())
            .ok_or_else(|| {
                EvergreenError::Other(format!(
                    "preset {n} does not exist (1-{})",
                    VISUALIZER_PRESETS.len()
                ))
            }),
        (None, Some(text)) => Ok(text),
        (None, None) => Err(EvergreenError::Other(
            "describe your garden or pass --preset".into(),
        )),
    }
}

/// Split a `data:<mime>;base64,<payload>` reference into mime type and bytes.
pub fn decode_data_url(reference: &str) -> Option<(String, Vec<u8>)> {
    let rest = reference.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()?;
    Some((mime.to_string(), bytes))
}

/// Generate once and report the outcome. Inline images are written to `out_path`.
pub async fn run<W: Write>(
    session: &VisualizationSession,
    description: &str,
    out_path: &Path,
    out: &mut W,
) -> Result<(), EvergreenError> {
    session.set_prompt(description);
    writeln!(out, "Designing: {}", session.prompt())?;

    if !session.generate().await.was_accepted() {
        writeln!(out, "Nothing to design.")?;
        return Ok(());
    }

    for notice in session.drain_notifications() {
        writeln!(out, "{}", notice.message)?;
    }

    if let Some(reference) = session.result() {
        match decode_data_url(&reference) {
            Some((mime, bytes)) => {
                std::fs::write(out_path, &bytes)?;
                tracing::info!(%mime, bytes = bytes.len(), path = %out_path.display(), "design saved");
                writeln!(out, "Saved {mime} design to {}", out_path.display())?;
            }
            None => writeln!(out, "Design available at {reference}")?,
        }
    }
    Ok(())
}
