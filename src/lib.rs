//! A progressive, physically-motivated Monte Carlo path tracer for a single
//! fixed Cornell-box-style scene.
//!
//! ## Rendering equation
//!
//! ```text
//!   L_o(p, ω_o) = L_e(p, ω_o) + ∫_Ω f_r(p, ω_i, ω_o) · L_i(p, ω_i) · |cos θ_i| dω_i
//! ```
//!
//! [`Engine`] owns the whole pipeline: camera placement, the fixed scene, a
//! progressive film accumulator, and the reconstruction filter used to
//! splat each sample onto neighboring pixels. Call [`Engine::init`] once,
//! then [`Engine::refine`] as many times as needed to add more passes, and
//! read out the current estimate at any point with [`Engine::read_ldr`] or
//! [`Engine::read_hdr`].

pub mod camera;
pub mod engine;
pub mod error;
pub mod film;
pub mod filter;
pub mod geometry;
pub mod image_io;
pub mod integrator;
pub mod math;
pub mod sampling;
pub mod scene;
pub mod tonemap;

pub use engine::Engine;
pub use error::EngineError;
pub use filter::Filter;
