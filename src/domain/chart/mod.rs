//! Chart panels: declarative specs plus the geometry derived from them.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use services::ChartGeometryService;
pub use value_objects::*;
