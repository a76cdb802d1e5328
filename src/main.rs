use anyhow::{Context, Result};
use colored::Colorize;
use showcqt_patcher::{Patch, PatchOutcome};

/// File patched in place, resolved against the current working directory.
const TARGET_FILE: &str = "showcqt-element.mjs";

/// Pinned CDN import the upstream bundle ships with.
const CDN_URL: &str = "https://cdn.jsdelivr.net/npm/showcqt@1.2.1/showcqt.mjs";

/// Bare specifier the bundler resolves locally.
const BARE_SPECIFIER: &str = "showcqt";

fn main() -> Result<()> {
    let patch = Patch::new(TARGET_FILE, CDN_URL, BARE_SPECIFIER);

    let outcome = patch
        .apply()
        .with_context(|| format!("failed to patch {TARGET_FILE}"))?;

    match outcome {
        PatchOutcome::Applied { file, byte_offset } => {
            println!(
                "{} {}: rewrote CDN import at byte {}",
                "✓".green(),
                file.display(),
                byte_offset
            );
        }
        PatchOutcome::Unchanged { file } => {
            println!(
                "{} {}: no CDN import found (already patched)",
                "⊙".yellow(),
                file.display()
            );
        }
    }

    Ok(())
}
