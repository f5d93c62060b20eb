#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/linfactor/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::FactorModelConfig;

mod factor_model;
pub use factor_model::FactorModel;

mod error;
pub use error::ModelError;

/// Re-export commonly used types.
pub mod prelude {
    pub use linfactor_traits::{FitState, ResidualModel};

    pub use super::{FactorModel, FactorModelConfig, ModelError};
}
