//! Core-Domäne: Referenzdaten, Auflösung, Normalisierung und Positionen.

pub mod checksum;
pub mod dataset;
pub mod error;
pub mod normalizer;
pub mod positions;
pub mod resolver;
pub mod rounding;

pub use checksum::{verify, verify_with_tolerance};
pub use dataset::{DatasetIndex, ReferenceRow};
pub use error::{LayoutError, LayoutResult};
pub use normalizer::{NormalizerParams, consolidate, normalize};
pub use positions::build_positions;
pub use resolver::{Origin, Resolution, resolve};
