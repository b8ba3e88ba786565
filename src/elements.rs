use crate::astro::{elliptic, hyperbolic, parabolic, wrap_angle};
use crate::error::OrbitError;
use crate::orbit::OrbitType;
use crate::{vec3, Mat3, Num, StateVectors, Vec3, PI};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeplerianElements {
    pub eccentricity: Num,
    /// Positive for both ellipses and hyperbolae, infinite for a parabola
    pub semi_major_axis: Num,
    pub semi_latus_rectum: Num,
    pub inclination: Num,
    pub right_ascension_of_the_ascending_node: Num,
    pub argument_of_periapsis: Num,
    /// For a parabola this is Barker's `D + D³/3`
    pub mean_anomaly_at_epoch: Num,
    pub epoch: Num,
}

impl KeplerianElements {
    /// Elements of an ellipse or a hyperbola.
    pub fn new(
        semi_major_axis: Num,
        eccentricity: Num,
        inclination: Num,
        right_ascension_of_the_ascending_node: Num,
        argument_of_periapsis: Num,
        mean_anomaly_at_epoch: Num,
        epoch: Num,
    ) -> Self {
        Self {
            eccentricity,
            semi_major_axis,
            semi_latus_rectum: semi_major_axis * (1.0 - eccentricity.powi(2)).abs(),
            inclination,
            right_ascension_of_the_ascending_node,
            argument_of_periapsis,
            mean_anomaly_at_epoch,
            epoch,
        }
    }

    pub fn parabolic(
        semi_latus_rectum: Num,
        inclination: Num,
        right_ascension_of_the_ascending_node: Num,
        argument_of_periapsis: Num,
        mean_anomaly_at_epoch: Num,
        epoch: Num,
    ) -> Self {
        Self {
            eccentricity: 1.0,
            semi_major_axis: Num::INFINITY,
            semi_latus_rectum,
            inclination,
            right_ascension_of_the_ascending_node,
            argument_of_periapsis,
            mean_anomaly_at_epoch,
            epoch,
        }
    }

    pub fn from_state_vectors(
        state_vectors: &StateVectors,
        mu: Num,
        epoch: Num,
    ) -> Result<Self, OrbitError> {
        state_vectors.to_elements(mu, epoch)
    }

    pub fn orbit_type(&self) -> OrbitType {
        OrbitType::from_eccentricity(self.eccentricity)
    }

    pub fn is_elliptical(&self) -> bool {
        self.orbit_type().is_closed()
    }

    pub fn is_parabolic(&self) -> bool {
        self.orbit_type() == OrbitType::Parabolic
    }

    pub fn is_hyperbolic(&self) -> bool {
        self.orbit_type() == OrbitType::Hyperbolic
    }

    pub fn periapsis(&self) -> Vec3 {
        self.position_at_true_anomaly(0.0)
    }

    /// `None` for open orbits.
    pub fn apoapsis(&self) -> Option<Vec3> {
        self.is_elliptical()
            .then(|| self.position_at_true_anomaly(PI))
    }

    pub fn normal(&self) -> Vec3 {
        self.perifocal_to_equatorial(Vec3::Z)
    }

    /// https://en.wikipedia.org/wiki/Orbital_period
    pub fn period(&self, mu: Num) -> Result<Num, OrbitError> {
        if self.is_elliptical() {
            Ok(crate::astro::period(self.semi_major_axis, mu))
        } else {
            Err(OrbitError::UnsupportedOrbitType(self.orbit_type()))
        }
    }

    /// Rate of change of [`Self::mean_anomaly`].
    pub fn mean_motion(&self, mu: Num) -> Num {
        if self.is_parabolic() {
            parabolic::mean_motion(self.semi_latus_rectum, mu)
        } else {
            crate::astro::mean_motion(self.semi_major_axis, mu)
        }
    }

    /// https://en.wikipedia.org/wiki/Mean_anomaly
    pub fn mean_anomaly(&self, mu: Num, epoch: Num) -> Num {
        let epoch_diff = epoch - self.epoch;
        let M = self.mean_anomaly_at_epoch + self.mean_motion(mu) * epoch_diff;

        if self.is_elliptical() {
            wrap_angle(M)
        } else {
            M
        }
    }

    /// Calculates true anomaly
    pub fn true_anomaly_at_epoch(
        &self,
        mu: Num,
        epoch: Num,
        tolerance: Num,
    ) -> Result<Num, OrbitError> {
        let M = self.mean_anomaly(mu, epoch);
        let e = self.eccentricity;

        let v = match self.orbit_type() {
            OrbitType::Circular | OrbitType::Elliptical => {
                elliptic::true_anomaly(elliptic::estimate_anomaly(M, e, tolerance)?, e)
            }
            OrbitType::Parabolic => parabolic::true_anomaly(parabolic::estimate_anomaly(M)),
            OrbitType::Hyperbolic => {
                hyperbolic::true_anomaly(hyperbolic::estimate_anomaly(M, e, tolerance)?, e)
            }
        };

        Ok(wrap_angle(v))
    }

    pub fn state_vectors_at_epoch(
        &self,
        mu: Num,
        epoch: Num,
        tolerance: Num,
    ) -> Result<StateVectors, OrbitError> {
        let v = self.true_anomaly_at_epoch(mu, epoch, tolerance)?;

        log::trace!("true anomaly at epoch {epoch}: {v}");

        Ok(StateVectors {
            position: self.position_at_true_anomaly(v),
            velocity: self.velocity_at_true_anomaly(mu, v),
        })
    }

    #[inline]
    pub fn position_at_true_anomaly(&self, v: Num) -> Vec3 {
        let e = self.eccentricity;

        let r = self.semi_latus_rectum / (1.0 + e * v.cos());

        // Perifocal coordinates
        let p = r * v.cos();
        let q = r * v.sin();

        self.perifocal_to_equatorial(vec3(p, q, 0.0))
    }

    #[inline]
    pub fn velocity_at_true_anomaly(&self, mu: Num, v: Num) -> Vec3 {
        let e = self.eccentricity;
        let h = self.specific_angular_momentum(mu);

        let vp = -(mu / h) * v.sin();
        let vq = (mu / h) * (e + v.cos());

        self.perifocal_to_equatorial(vec3(vp, vq, 0.0))
    }

    #[inline(always)]
    pub fn perifocal_to_equatorial(&self, perifocal: Vec3) -> Vec3 {
        let mut m = Mat3::IDENTITY;

        let Ω = self.right_ascension_of_the_ascending_node;
        let i = self.inclination;
        let ω = self.argument_of_periapsis;

        m *= Mat3::from_rotation_z(Ω);
        m *= Mat3::from_rotation_x(i);
        m *= Mat3::from_rotation_z(ω);

        m.mul_vec3(perifocal)
    }

    pub fn specific_angular_momentum(&self, mu: Num) -> Num {
        (mu * self.semi_latus_rectum).sqrt()
    }
}
