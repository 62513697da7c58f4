//! Headless inspector for annotation documents.
//!
//! ```text
//! specmark <document.json> [config.toml|config.json]
//! ```
//!
//! Loads the document into an editing session using the given config (or
//! the platform default config when present) and prints a summary of its
//! boxes and overlap groups.

use std::path::PathBuf;

use anyhow::{bail, Context};
use specmark::{
    init_logging, DomainContext, EditorConfig, EditorSession, BUILD_DATE, BUILD_PROFILE, VERSION,
};
use tracing::{info, warn};

fn load_config(path: Option<PathBuf>) -> anyhow::Result<EditorConfig> {
    if let Some(path) = path {
        return EditorConfig::load_from_file(&path)
            .with_context(|| format!("loading config {}", path.display()));
    }

    match EditorConfig::default_config_path() {
        Ok(path) if path.exists() => Ok(EditorConfig::load_from_file(&path)?),
        Ok(_) => Ok(EditorConfig::default()),
        Err(e) => {
            warn!("No config directory: {}", e);
            Ok(EditorConfig::default())
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("specmark {} ({} build, {})", VERSION, BUILD_PROFILE, BUILD_DATE);

    let mut args = std::env::args_os().skip(1);
    let Some(document) = args.next().map(PathBuf::from) else {
        bail!("usage: specmark <document.json> [config]");
    };
    let config = load_config(args.next().map(PathBuf::from))?;

    let mut session = EditorSession::new(config, DomainContext::default());
    session
        .load_from_file(&document)
        .with_context(|| format!("loading {}", document.display()))?;

    let boxes = session.boxes();
    println!("{}: {} boxes", document.display(), boxes.len());
    for (index, b) in boxes.iter().enumerate() {
        println!(
            "  [{index}] {:<12} {:>8.3}s - {:>8.3}s  {}",
            b.label,
            b.start_time,
            b.end_time,
            match (b.min_frequency, b.max_frequency) {
                (Some(lo), Some(hi)) => format!("{lo:.0}-{hi:.0} Hz"),
                _ => "-".to_string(),
            }
        );
    }

    let groups: Vec<_> = session
        .overlap_groups()
        .into_iter()
        .filter(|g| g.len() > 1)
        .collect();
    println!("{} overlapping groups", groups.len());
    for group in groups {
        println!("  {:?}", group);
    }

    Ok(())
}
