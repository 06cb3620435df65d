//! talus-io - Value ingestion and persistence for block-size data
//!
//! Input files are plain text, one decimal value per line, representing
//! block volumes (m³) or masses (t). The decimal separator must be `.`;
//! no other numeric format is accepted.
//!
//! The parser is a two-stage validate-then-parse pipeline: a token must
//! first match the accepted numeric-literal shape (digits with at most
//! one decimal point, no sign or exponent) before it is converted, so
//! format errors stay distinguishable from range errors downstream.
//!
//! Writers persist intermediate volume and linear-size sequences in the
//! same one-value-per-line format. This is a convenience side channel;
//! the analysis itself never reads these files back.

pub mod reader;
pub mod token;
pub mod writer;

pub use reader::*;
pub use token::*;
pub use writer::*;
