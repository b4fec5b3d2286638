//! In-memory grid: storage, spatial transform, and category extraction.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │     GridBuffer       │      │   SpatialTransform   │
//! │  row-major Vec<u8>   │      │ origin + m/px scale  │
//! └──────────┬───────────┘      └──────────┬───────────┘
//!            └──────────────┬──────────────┘
//!                           ▼
//!                 ┌───────────────────┐       extract_*       ┌───────────────┐
//!                 │   OccupancyGrid   │ ────────────────────▶ │  derived mask │
//!                 └───────────────────┘                       └───────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`GridBuffer`]: Bounds-checked dense storage, one byte per cell
//! - [`SpatialTransform`]: Metric <-> pixel conversion
//! - [`extract`]: Single-category binary masks

pub mod extract;
mod storage;
mod transform;

pub use extract::{extract_category, extract_covered, extract_floor, extract_obstacle};
pub use storage::GridBuffer;
pub use transform::SpatialTransform;
