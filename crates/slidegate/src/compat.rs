//! Start-up checks for deck problems the viewer can work around but the
//! presenter should know about. Each warning becomes a banner.

use std::path::Path;

use crate::controller::access::GateConfig;
use crate::parser::Presentation;

/// Digit shortcuts only reach this far.
const MAX_DIGIT_SLIDE: usize = 9;

pub fn check(presentation: &Presentation, base_dir: &Path) -> Vec<String> {
    let mut warnings = Vec::new();
    let total = presentation.slides.len();

    let marked = presentation
        .slides
        .iter()
        .any(|s| s.marked_sensitive());

    match &presentation.meta.access {
        Some(access) => {
            for &n in &access.sensitive {
                if n == 0 || n > total {
                    warnings.push(format!(
                        "Sensitive slide {n} does not exist (deck has {total} slides)"
                    ));
                }
            }
            if marked || !access.sensitive.is_empty() {
                if let Err(e) = GateConfig::from_meta(access).expected_bytes() {
                    warnings.push(format!("{e}; admin access will always fail"));
                }
            }
        }
        None if marked => warnings.push(
            "Slides are marked @sensitive but the deck has no access section; they are shown to everyone"
                .to_string(),
        ),
        None => {}
    }

    let option_images = presentation
        .meta
        .characters
        .iter()
        .flat_map(|r| r.options.iter().map(|o| o.image.as_str()));
    let slide_images = presentation.slides.iter().flat_map(|s| s.image_paths());

    let mut seen = std::collections::BTreeSet::new();
    for path in slide_images.chain(option_images) {
        if is_remote(path) || !seen.insert(path) {
            continue;
        }
        if !base_dir.join(path).exists() {
            warnings.push(format!("Image not found: {path}"));
        }
    }

    if total > MAX_DIGIT_SLIDE {
        warnings.push(format!(
            "Deck has {total} slides; number keys only reach slides 1-{MAX_DIGIT_SLIDE}"
        ));
    }

    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    warnings
}

fn is_remote(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}
