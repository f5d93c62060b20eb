//! # linfactor
//!
//! A least squares linear factor model for asset returns.
//!
//! This crate provides a unified interface to the linfactor crates.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `traits`: Trait abstractions
//! - `math`: Linear algebra (pseudo-inverse, checked matrix operations)
//! - `model`: The factor model
//!
//! ## Example
//!
//! ```rust,ignore
//! use linfactor::model::FactorModel;
//!
//! // asset_returns: (n_assets x n_steps), factor_returns: (n_factors x n_steps)
//! let residual = FactorModel::new().fit_forward(&asset_returns, &factor_returns)?;
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "traits")]
#[doc(inline)]
pub use linfactor_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use linfactor_math as math;
#[cfg(feature = "model")]
#[doc(inline)]
pub use linfactor_model as model;
