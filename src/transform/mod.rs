//! Transformation module.
//!
//! This module handles sample-layout to Coretax-layout conversion:
//! - Template: the fixed two-sheet output structure and its header contract
//! - Mapper: the per-row column remapping and rounding rules
//! - Pipeline: read, transform, serialize orchestration

pub mod mapper;
pub mod pipeline;
pub mod template;

pub use mapper::{round_to_whole, transform, ColumnMapping, DETAIL_COLUMN_MAP};
pub use pipeline::*;
pub use template::CoretaxWorkbook;
