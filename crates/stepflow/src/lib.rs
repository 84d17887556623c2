//! Stepflow - renders two-section process diagrams to PNG.
//!
//! A diagram has a title and two ordered lists of steps: manual steps and
//! automation steps. Each step becomes a labeled oval; consecutive steps in a
//! section are joined by downward arrows. The canvas is exactly as tall as
//! the steps require.
//!
//! ```rust,no_run
//! use stepflow::{DiagramRequest, render};
//!
//! let request = DiagramRequest::new(
//!     "Customer Onboarding Process",
//!     vec!["Receive customer application".to_string(), "Verify customer identity".to_string()],
//!     vec!["Create customer account in system".to_string()],
//! );
//! let diagram = render(&request).expect("Failed to render");
//! assert_eq!(diagram.width(), 800);
//! ```
//!
//! Every render is independent: it allocates its own surface, shares no
//! mutable state, and may run concurrently with other renders.

pub mod config;

mod error;
mod layout;
mod render;
mod request;

pub use stepflow_core::{color, draw, geometry};

pub use error::RenderError;
pub use layout::canvas_height;
pub use render::{DiagramBuilder, RenderedDiagram, render};
pub use request::{DiagramRequest, SectionKind, parse_steps};
