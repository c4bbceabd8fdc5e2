#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod cross_section;
pub mod drawing;
mod errors;
mod floor_plan;
mod geometry;
mod parameters;
mod structure;
mod wing;

pub use cross_section::{compute_cross_section, CrossSectionGeometry};
pub use errors::{GeometryError, RenderError};
pub use floor_plan::{compute_floor_plan, front_arc, front_entry, FloorPlan, FrontArc, FrontEntry};
pub use geometry::{heading, point, Point2D};
pub use parameters::{validate_pitch, StructureParameters};
pub use structure::{solve, StructureGeometry};
pub use wing::{closing_wall, compute_wing, ClosingWall, WingGeometry};
