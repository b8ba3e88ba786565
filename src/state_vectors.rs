use crate::astro::{elliptic, hyperbolic, parabolic, wrap_angle};
use crate::error::OrbitError;
use crate::orbit::OrbitType;
use crate::{KeplerianElements, Num, Vec3};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateVectors {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl StateVectors {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    pub fn abs_diff(&self, other: &Self) -> Num {
        self.position.distance(other.position) + self.velocity.distance(other.velocity)
    }

    /// Specific orbital energy
    pub fn energy(&self, mu: Num) -> Num {
        self.velocity.length_squared() / 2.0 - mu / self.position.length()
    }

    pub fn angular_momentum(&self) -> Vec3 {
        self.position.cross(self.velocity)
    }

    pub fn to_elements(&self, mu: Num, epoch: Num) -> Result<KeplerianElements, OrbitError> {
        log::trace!("calculating elements from {self:?} (mu = {mu}, epoch = {epoch})");

        // Position magnitude
        let rv = self.position;
        let r = rv.length();
        let vv = self.velocity;
        let v_mag = vv.length();

        if !r.is_normal() || !v_mag.is_finite() {
            return Err(OrbitError::DegenerateState(
                "position must be non-zero and finite",
            ));
        }

        // Orbital angular momentum
        // This vector should point in the normal direction of the orbit
        let hv = rv.cross(vv);
        let h = hv.length();

        if h <= Num::EPSILON * r * v_mag {
            return Err(OrbitError::DegenerateState(
                "rectilinear motion has no orbital plane",
            ));
        }

        // N vector - it's the vector parallel to the node line
        let nv = Vec3::Z.cross(hv);
        let n = nv.length();

        // Equatorial orbits measure from the X axis instead
        let (node, Ω) = if n <= Num::EPSILON * h {
            (Vec3::X, 0.0)
        } else {
            let node = nv / n;
            (node, wrap_angle(node.y.atan2(node.x)))
        };

        // In-plane axis 90° ahead of the node line
        let q = (hv / h).cross(node);
        let angle_from_node = |u: Vec3| u.dot(q).atan2(u.dot(node));

        // Eccentricity
        let ev = ((v_mag.powi(2) - (mu / r)) * rv - rv.dot(vv) * vv) / mu;
        let e = ev.length();
        let orbit_type = OrbitType::from_eccentricity(e);

        // Inclination
        // Equation is i = arccos(hz / h)
        let i = (hv.z / h).clamp(-1.0, 1.0).acos();

        // Argument of periapsis, undefined (so zero) for a circular orbit
        let ω = if orbit_type == OrbitType::Circular {
            0.0
        } else {
            wrap_angle(angle_from_node(ev))
        };

        // True anomaly
        let v = wrap_angle(angle_from_node(rv) - ω);

        let p = h.powi(2) / mu;

        // Semi-major axis
        let a = match orbit_type {
            OrbitType::Parabolic => Num::INFINITY,
            _ => p / (1.0 - e.powi(2)).abs(),
        };

        // Mean anomaly
        let M = match orbit_type {
            OrbitType::Circular | OrbitType::Elliptical => {
                wrap_angle(elliptic::mean_anomaly(elliptic::eccentric_anomaly(v, e), e))
            }
            OrbitType::Parabolic => parabolic::mean_anomaly(parabolic::parabolic_anomaly(v)),
            OrbitType::Hyperbolic => {
                hyperbolic::mean_anomaly(hyperbolic::hyperbolic_anomaly(v, e), e)
            }
        };

        log::trace!("e = {e}, a = {a}, i = {i}, Ω = {Ω}, ω = {ω}, v = {v}, M = {M}");

        Ok(KeplerianElements {
            eccentricity: e,
            semi_major_axis: a,
            semi_latus_rectum: p,
            inclination: i,
            right_ascension_of_the_ascending_node: Ω,
            argument_of_periapsis: ω,
            mean_anomaly_at_epoch: M,
            epoch,
        })
    }
}
