//! Engine module for the Hydrator implementation
//!
//! Provides the core engine, its builder, the per-call mapping context and
//! the per-class access plan.

pub mod builder;
pub mod context;
pub mod core;
pub mod plan;

pub use builder::HydratorBuilder;
pub use context::MappingContext;
pub use core::Hydrator;
pub use plan::{ClassPlan, PropertyAccessor};
