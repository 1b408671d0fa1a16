//! Capture Set Discovery
//!
//! A capture run leaves three parallel directories behind; the files of
//! one measurement share a capture segment at a fixed position in their
//! names. Sets are paired by that segment directly — lexicographic order
//! only breaks ties between files that carry the same segment — so a
//! missing file in one directory can never silently shift the pairing of
//! everything after it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::PipelineError;

/// Bitrate metadata subdirectory of a capture root
pub const BR_METADATA_DIR: &str = "br_metadata";

/// CSI metadata subdirectory of a capture root
pub const CSI_METADATA_DIR: &str = "csi_metadata";

/// CSI magnitude subdirectory of a capture root
pub const CSI_MAGNITUDE_DIR: &str = "csi_magnitude_data";

/// One matched triple of capture files
#[derive(Debug, Clone)]
pub struct CaptureSet {
    /// Shared capture segment (filename characters 3..18)
    pub segment: String,
    /// Bitrate metadata file
    pub bitrate_path: PathBuf,
    /// CSI metadata file
    pub csi_metadata_path: PathBuf,
    /// CSI magnitude file
    pub csi_magnitude_path: PathBuf,
}

/// Capture identifier segment of a filename: characters 3..18
/// (0-indexed, half-open). Shorter names yield a shorter segment.
pub fn capture_segment(name: &str) -> String {
    name.chars().skip(3).take(15).collect()
}

/// Discover matched capture sets under `base`, ordered by segment.
pub fn discover_sets(base: &Path) -> Result<Vec<CaptureSet>, PipelineError> {
    let br_dir = base.join(BR_METADATA_DIR);
    let meta_dir = base.join(CSI_METADATA_DIR);
    let mag_dir = base.join(CSI_MAGNITUDE_DIR);

    let br = sorted_listing(&br_dir)?;
    let meta = sorted_listing(&meta_dir)?;
    let mag = sorted_listing(&mag_dir)?;

    let sets = pair_listings(&br, &meta, &mag)
        .into_iter()
        .map(|(segment, br_name, meta_name, mag_name)| CaptureSet {
            segment,
            bitrate_path: br_dir.join(br_name),
            csi_metadata_path: meta_dir.join(meta_name),
            csi_magnitude_path: mag_dir.join(mag_name),
        })
        .collect();
    Ok(sets)
}

/// Regular files of `dir`, sorted lexicographically.
fn sorted_listing(dir: &Path) -> Result<Vec<String>, PipelineError> {
    if !dir.is_dir() {
        return Err(PipelineError::MissingDirectory(dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(dir).map_err(|source| PipelineError::ListDirectory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PipelineError::ListDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    debug!("{}: {} capture files", dir.display(), names.len());
    Ok(names)
}

/// Pair three sorted listings by capture segment.
///
/// Within one directory the lexicographically first file wins a duplicate
/// segment; segments without a file in all three directories are skipped
/// with a diagnostic naming where they were seen.
pub(crate) fn pair_listings(
    br: &[String],
    meta: &[String],
    mag: &[String],
) -> Vec<(String, String, String, String)> {
    let br_by_segment = index_by_segment(br, BR_METADATA_DIR);
    let meta_by_segment = index_by_segment(meta, CSI_METADATA_DIR);
    let mag_by_segment = index_by_segment(mag, CSI_MAGNITUDE_DIR);

    let mut segments: Vec<&String> = br_by_segment
        .keys()
        .chain(meta_by_segment.keys())
        .chain(mag_by_segment.keys())
        .collect();
    segments.sort();
    segments.dedup();

    let mut sets = Vec::new();
    for segment in segments {
        match (
            br_by_segment.get(segment),
            meta_by_segment.get(segment),
            mag_by_segment.get(segment),
        ) {
            (Some(br_name), Some(meta_name), Some(mag_name)) => {
                sets.push((
                    segment.clone(),
                    (*br_name).clone(),
                    (*meta_name).clone(),
                    (*mag_name).clone(),
                ));
            }
            (br_name, meta_name, mag_name) => {
                warn!(
                    "skipping segment {:?}: {}={:?}, {}={:?}, {}={:?}",
                    segment,
                    BR_METADATA_DIR,
                    br_name,
                    CSI_METADATA_DIR,
                    meta_name,
                    CSI_MAGNITUDE_DIR,
                    mag_name
                );
            }
        }
    }
    sets
}

fn index_by_segment<'a>(names: &'a [String], dir: &str) -> BTreeMap<String, &'a String> {
    let mut index = BTreeMap::new();
    for name in names {
        let segment = capture_segment(name);
        if let Some(kept) = index.get(&segment) {
            warn!(
                "{}: duplicate capture segment {:?} ({:?} kept, {:?} ignored)",
                dir, segment, kept, name
            );
            continue;
        }
        index.insert(segment, name);
    }
    index
}
