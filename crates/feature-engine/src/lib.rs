//! Feature Engineering Engine
//!
//! Sliding-window reducers over aligned capture tables and the join that
//! merges their outputs into one time-keyed feature table.

mod error;
mod features;
mod join;
mod pca;
mod window;

pub use error::FeatureError;
pub use features::{
    csi_feature_extraction, median_filter_bitrate, FeatureSeries, BITRATE_MEDIAN, CSI_FEATURE,
    DEFAULT_CSI_WINDOW, DEFAULT_MEDIAN_WINDOW,
};
pub use join::{join_features, JoinMode, JoinedFeatures};
pub use pca::dominant_variance;
pub use window::WindowSpec;
