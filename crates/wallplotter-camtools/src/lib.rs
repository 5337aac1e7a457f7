//! # Wall Plotter CAM Tools
//!
//! Turns vector drawings into ordered point strokes on the canvas.
//!
//! - **SVG Import**: path elements split into continuous curves
//! - **Curve**: line, bezier and arc segments chained into one curve
//! - **Sampler**: curve flattening with collinear collapse
//! - **Normalizer**: aspect-preserving fit into the padded canvas
//! - **Sequencer**: greedy nearest-next stroke ordering
//! - **Quality**: advisory scan for moves too short to resolve

pub mod curve;
pub mod normalizer;
pub mod quality;
pub mod sampler;
pub mod sequencer;
pub mod svg_import;

pub use curve::{Curve, CurvePath, CurveSegment};
pub use normalizer::{fit_scale, fit_to_canvas, normalize};
pub use quality::check_pack_quality;
pub use sampler::{sample_curve, sample_pack, SamplerParams};
pub use sequencer::{permutation_of, sequence, travel_distance};
pub use svg_import::{load_svg, parse_path_data, parse_svg, SvgDocument, ViewBox};
