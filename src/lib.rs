#![allow(non_snake_case)]

//! Two-body orbital mechanics: a Lambert solver working in Battin's variable
//! and an [`Orbit`] type converting between state vectors and Keplerian
//! elements.
//!
//! ```
//! use lambert_orbits::lambert::{self, TransferKind};
//! use lambert_orbits::{vec3, Orbit, SolverConfig};
//!
//! let r1 = vec3(1.0, 0.0, 0.0);
//! let r2 = vec3(0.0, 1.0, 0.0);
//! let tof = std::f64::consts::FRAC_PI_2;
//!
//! let transfer = lambert::solve(r1, r2, tof, 1.0, TransferKind::short_way(), &SolverConfig::default())?;
//!
//! let mut orbit = Orbit::from_position_velocity(r1, transfer.v1, 1.0)?;
//! orbit.propagate(tof)?;
//!
//! assert!(orbit.state_vectors().unwrap().position.distance(r2) < 1e-6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod astro;
pub mod config;
pub mod constants;
pub mod elements;
pub mod error;
pub mod lambert;
pub mod math;
pub mod orbit;
pub mod state_vectors;

pub use self::config::SolverConfig;
pub use self::constants::*;
pub use self::elements::KeplerianElements;
pub use self::error::{LambertError, OrbitError};
pub use self::orbit::{Orbit, OrbitType};
pub use self::state_vectors::StateVectors;

pub type Num = f64;
pub type Vec3 = glam::DVec3;
pub type Mat3 = glam::DMat3;

#[inline(always)]
pub fn vec3(x: Num, y: Num, z: Num) -> Vec3 {
    glam::dvec3(x, y, z)
}
