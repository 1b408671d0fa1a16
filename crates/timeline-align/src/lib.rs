//! Timeline Alignment and Gap Filling
//!
//! Resamples irregularly timestamped packet measurements onto a uniform
//! grid and fills the gaps the resampling leaves behind. The grid never
//! extrapolates: it spans exactly the rounded range the raw data covers,
//! and filling only ever replaces cell values, never manufactures rows.

mod align;
mod error;
mod fill;
mod table;

pub use align::{
    align_bitrate, align_csi_magnitude, Aggregation, AlignConfig, BitrateAlignConfig,
    BITRATE_COLUMN, SUBCARRIER_PREFIX,
};
pub use error::AlignError;
pub use fill::{fill_missing_bitrate, fill_missing_csi};
pub use table::{is_missing, AlignedTable, Column, MISSING};
