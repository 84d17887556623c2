//! Stepflow Core Types and Drawing Primitives
//!
//! This crate provides the foundational types used to draw Stepflow process
//! diagrams. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Text measurement and wrapping, ovals, arrows, and the
//!   rasterizing [`draw::Canvas`] ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
