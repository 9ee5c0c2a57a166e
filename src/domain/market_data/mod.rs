//! Market data aggregate: API bars, chart points and their conversion.

pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
