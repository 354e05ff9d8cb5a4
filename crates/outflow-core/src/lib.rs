//! Outflow Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Outflow Sankey
//! renderer. It includes:
//!
//! - **Colors**: Color handling with CSS and RGB-triple support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Strokes, text and polygon drawables rendered to SVG ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
