use std::path::{Path, PathBuf};

use crate::cask::LoadError;
use crate::runtime::Runtime;

/// Definition files for `token` across every tap under `taps_dir`.
///
/// Layout: `<taps_dir>/<user>/<repo>/Casks/<token>.json`, optionally sharded
/// as `Casks/<shard>/<token>.json`. Results are sorted and free of duplicates.
#[tracing::instrument(skip(runtime))]
pub fn find_tap_paths<R: Runtime>(
    runtime: &R,
    taps_dir: &Path,
    token: &str,
) -> Result<Vec<PathBuf>, LoadError> {
    if !runtime.exists(taps_dir) {
        return Ok(vec![]);
    }

    let taps = glob::Pattern::escape(&taps_dir.to_string_lossy());
    let file = format!("{}.json", glob::Pattern::escape(token));

    let mut paths = runtime.glob(&format!("{}/*/*/Casks/{}", taps, file))?;
    paths.extend(runtime.glob(&format!("{}/*/*/Casks/*/{}", taps, file))?);
    paths.sort();
    paths.dedup();
    Ok(paths)
}
