use crate::constants::{ECCENTRICITY_EPSILON, KEPLER_TOLERANCE};
use crate::error::OrbitError;
use crate::{KeplerianElements, Num, StateVectors, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrbitType {
    Circular,
    Elliptical,
    Parabolic,
    Hyperbolic,
}

impl OrbitType {
    pub fn from_eccentricity(e: Num) -> Self {
        if e < ECCENTRICITY_EPSILON {
            OrbitType::Circular
        } else if (e - 1.0).abs() < ECCENTRICITY_EPSILON {
            OrbitType::Parabolic
        } else if e < 1.0 {
            OrbitType::Elliptical
        } else {
            OrbitType::Hyperbolic
        }
    }

    pub fn is_closed(self) -> bool {
        matches!(self, OrbitType::Circular | OrbitType::Elliptical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Osculating {
    state_vectors: StateVectors,
    elements: KeplerianElements,
}

/// A two-body orbit around an attractor with gravitational parameter `mu`.
///
/// Both the state vectors and the elements are kept up to date, setting one
/// recomputes the other.
#[derive(Debug, Clone, PartialEq)]
pub struct Orbit {
    mu: Num,
    osculating: Option<Osculating>,
}

impl Orbit {
    /// An orbit without a state yet, see [`Orbit::is_init`].
    pub fn new(mu: Num) -> Result<Self, OrbitError> {
        if mu.is_nan() || mu <= 0.0 || mu.is_infinite() {
            return Err(OrbitError::InvalidGravitationalParameter { mu });
        }

        Ok(Self {
            mu,
            osculating: None,
        })
    }

    pub fn from_state_vectors(state_vectors: StateVectors, mu: Num) -> Result<Self, OrbitError> {
        let mut orbit = Self::new(mu)?;
        orbit.set_state_vectors(state_vectors)?;
        Ok(orbit)
    }

    pub fn from_position_velocity(
        position: Vec3,
        velocity: Vec3,
        mu: Num,
    ) -> Result<Self, OrbitError> {
        Self::from_state_vectors(StateVectors::new(position, velocity), mu)
    }

    pub fn from_elements(elements: KeplerianElements, mu: Num) -> Result<Self, OrbitError> {
        let mut orbit = Self::new(mu)?;
        orbit.set_elements(elements)?;
        Ok(orbit)
    }

    /// Keeps the current epoch, or zero if the orbit had no state.
    pub fn set_state_vectors(&mut self, state_vectors: StateVectors) -> Result<(), OrbitError> {
        let epoch = self.epoch().unwrap_or(0.0);
        let elements = state_vectors.to_elements(self.mu, epoch)?;

        self.osculating = Some(Osculating {
            state_vectors,
            elements,
        });

        Ok(())
    }

    pub fn set_position_velocity(
        &mut self,
        position: Vec3,
        velocity: Vec3,
    ) -> Result<(), OrbitError> {
        self.set_state_vectors(StateVectors::new(position, velocity))
    }

    pub fn set_elements(&mut self, elements: KeplerianElements) -> Result<(), OrbitError> {
        let valid = elements.semi_latus_rectum > 0.0 && elements.eccentricity >= 0.0;

        if !valid {
            return Err(OrbitError::DegenerateState(
                "elements need a positive semi-latus rectum and a non-negative eccentricity",
            ));
        }

        let state_vectors =
            elements.state_vectors_at_epoch(self.mu, elements.epoch, KEPLER_TOLERANCE)?;

        self.osculating = Some(Osculating {
            state_vectors,
            elements,
        });

        Ok(())
    }

    pub fn state_vectors(&self) -> Option<&StateVectors> {
        self.osculating.as_ref().map(|o| &o.state_vectors)
    }

    pub fn elements(&self) -> Option<&KeplerianElements> {
        self.osculating.as_ref().map(|o| &o.elements)
    }

    pub fn mu(&self) -> Num {
        self.mu
    }

    pub fn orbit_type(&self) -> Option<OrbitType> {
        self.elements().map(KeplerianElements::orbit_type)
    }

    pub fn is_init(&self) -> bool {
        self.osculating.is_some()
    }

    pub fn epoch(&self) -> Option<Num> {
        self.elements().map(|elements| elements.epoch)
    }

    /// Distance from the attractor
    pub fn radius(&self) -> Option<Num> {
        self.state_vectors().map(|sv| sv.position.length())
    }

    pub fn period(&self) -> Result<Num, OrbitError> {
        self.elements()
            .ok_or(OrbitError::Uninitialized)?
            .period(self.mu)
    }

    /// Advances the orbit by `time_of_flight`, which may be negative.
    pub fn propagate(&mut self, time_of_flight: Num) -> Result<(), OrbitError> {
        let Osculating { elements, .. } = self.osculating.ok_or(OrbitError::Uninitialized)?;

        let epoch = elements.epoch + time_of_flight;
        let state_vectors = elements.state_vectors_at_epoch(self.mu, epoch, KEPLER_TOLERANCE)?;

        let elements = KeplerianElements {
            mean_anomaly_at_epoch: elements.mean_anomaly(self.mu, epoch),
            epoch,
            ..elements
        };

        log::debug!("propagated by {time_of_flight} to {state_vectors:?}");

        self.osculating = Some(Osculating {
            state_vectors,
            elements,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{vec3, PI};
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(0.0, OrbitType::Circular)]
    #[test_case(0.5, OrbitType::Elliptical)]
    #[test_case(1.0, OrbitType::Parabolic)]
    #[test_case(1.0 + 1e-12, OrbitType::Parabolic)]
    #[test_case(2.0, OrbitType::Hyperbolic)]
    fn classification(e: Num, expected: OrbitType) {
        assert_eq!(OrbitType::from_eccentricity(e), expected);
    }

    #[test]
    fn uninitialized_orbit() {
        let mut orbit = Orbit::new(1.0).unwrap();

        assert!(!orbit.is_init());
        assert!(orbit.state_vectors().is_none());
        assert!(orbit.elements().is_none());
        assert!(orbit.orbit_type().is_none());
        assert_eq!(orbit.propagate(1.0), Err(OrbitError::Uninitialized));
        assert_eq!(orbit.period(), Err(OrbitError::Uninitialized));
    }

    #[test_case(0.0)]
    #[test_case(-1.0)]
    #[test_case(Num::INFINITY)]
    fn rejects_gravitational_parameter(mu: Num) {
        assert_eq!(
            Orbit::new(mu),
            Err(OrbitError::InvalidGravitationalParameter { mu })
        );
    }

    #[test]
    fn setting_state_updates_elements() {
        let mut orbit = Orbit::from_position_velocity(Vec3::X, Vec3::Y, 1.0).unwrap();
        assert_eq!(orbit.orbit_type(), Some(OrbitType::Circular));

        orbit
            .set_position_velocity(Vec3::X, vec3(0.0, 1.2, 0.0))
            .unwrap();

        assert_eq!(orbit.orbit_type(), Some(OrbitType::Elliptical));
        assert_abs_diff_eq!(orbit.elements().unwrap().eccentricity, 0.44, epsilon = 1e-12);
        assert_abs_diff_eq!(orbit.radius().unwrap(), 1.0);
    }

    #[test]
    fn setting_elements_updates_state() {
        let elements = KeplerianElements::new(2.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0);

        let orbit = Orbit::from_elements(elements, 1.0).unwrap();

        let state = orbit.state_vectors().unwrap();
        assert_abs_diff_eq!(state.position.distance(Vec3::X), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(state.velocity.distance(vec3(0.0, 1.5f64.sqrt(), 0.0)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn half_period_reaches_apoapsis() {
        let elements = KeplerianElements::new(2.0, 0.5, 0.3, 0.2, 0.1, 0.0, 0.0);
        let mut orbit = Orbit::from_elements(elements, 1.0).unwrap();

        orbit.propagate(orbit.period().unwrap() / 2.0).unwrap();

        assert_abs_diff_eq!(orbit.radius().unwrap(), 3.0, epsilon = 1e-10);
        assert_abs_diff_eq!(orbit.elements().unwrap().mean_anomaly_at_epoch, PI, epsilon = 1e-10);
    }

    #[test]
    fn propagation_advances_the_epoch() {
        let mut orbit = Orbit::from_position_velocity(Vec3::X, vec3(0.0, 1.1, 0.2), 1.0).unwrap();

        orbit.propagate(2.5).unwrap();
        orbit.propagate(-1.0).unwrap();

        assert_abs_diff_eq!(orbit.epoch().unwrap(), 1.5);
    }

    #[test]
    fn rejects_rectilinear_state() {
        assert!(matches!(
            Orbit::from_position_velocity(Vec3::X, Vec3::X, 1.0),
            Err(OrbitError::DegenerateState(_))
        ));
    }
}
