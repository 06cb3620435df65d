//! talus-fit - Parametric distribution fitting for block-size samples
//!
//! Fits each of three candidate families to an ascending sample of linear
//! block sizes by maximum likelihood:
//!
//! - **Exponential** (location, scale): closed-form MLE
//! - **Generalized exponential** (3 shapes + location + scale):
//!   Nelder-Mead minimization of the negative log-likelihood
//! - **Power-law** (shape + location + scale): Nelder-Mead likewise
//!
//! Each fitted model exposes its pdf, cdf, and quantile function (inverse
//! CDF), which downstream code evaluates for comparison tables and
//! density/CDF overlay curves. Fits are independent and deterministic:
//! a fixed starting simplex means refitting the same sample reproduces
//! identical parameters.
//!
//! A lognormal family is deliberately not offered; the candidate set is
//! fixed to the three families above.

pub mod family;
pub mod fit;
pub mod simplex;

pub use family::*;
pub use fit::*;
pub use simplex::*;
