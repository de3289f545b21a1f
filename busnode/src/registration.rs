//! Device registration state machine
//!
//! Controllers act as registrars from the start. Other transmitting devices request
//! registration once the bus comes online and fall back to `Unregistered` when it goes
//! offline. Confirmation arrives from the registrar protocol through
//! [`Registration::acknowledge`].

use crate::core::DeviceRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistrationState {
    Unregistered,
    RegistrationPending,
    Registered,
    /// Terminal state of controllers
    Registrar,
}

#[derive(Debug, Clone)]
pub struct Registration {
    state: RegistrationState,
}

impl Registration {
    pub fn new(role: DeviceRole) -> Self {
        let state = match role {
            DeviceRole::Controller => RegistrationState::Registrar,
            _ => RegistrationState::Unregistered,
        };
        Self { state }
    }

    pub fn state(&self) -> RegistrationState {
        self.state
    }

    /// Advances the machine for the current bus presence.
    ///
    /// Returns `true` if the caller must emit a registration request.
    pub fn update(&mut self, role: DeviceRole, online: bool) -> bool {
        match role {
            DeviceRole::ReadOnly => return false,
            DeviceRole::Controller => {
                self.state = RegistrationState::Registrar;
                return false;
            }
            DeviceRole::Node | DeviceRole::Unclassified => {}
        }

        match (self.state, online) {
            (RegistrationState::RegistrationPending | RegistrationState::Registered, false) => {
                info!("Bus lost, {:?} -> Unregistered", self.state);
                self.state = RegistrationState::Unregistered;
                false
            }
            (RegistrationState::Unregistered, true) => {
                info!("Requesting registration");
                self.state = RegistrationState::RegistrationPending;
                true
            }
            _ => false,
        }
    }

    /// Confirms a pending registration.
    ///
    /// Returns `true` if the state changed to `Registered`.
    pub fn acknowledge(&mut self) -> bool {
        if self.state != RegistrationState::RegistrationPending {
            return false;
        }
        info!("Registration acknowledged");
        self.state = RegistrationState::Registered;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_is_registrar() {
        let mut registration = Registration::new(DeviceRole::Controller);
        assert_eq!(registration.state(), RegistrationState::Registrar);
        assert!(!registration.update(DeviceRole::Controller, true));
        assert!(!registration.update(DeviceRole::Controller, false));
        assert_eq!(registration.state(), RegistrationState::Registrar);
        assert!(!registration.acknowledge());
    }

    #[test]
    fn test_node_lifecycle() {
        let role = DeviceRole::Node;
        let mut registration = Registration::new(role);
        assert_eq!(registration.state(), RegistrationState::Unregistered);

        assert!(!registration.update(role, false));
        assert_eq!(registration.state(), RegistrationState::Unregistered);

        assert!(registration.update(role, true));
        assert_eq!(registration.state(), RegistrationState::RegistrationPending);
        // Request is emitted once
        assert!(!registration.update(role, true));

        assert!(registration.acknowledge());
        assert_eq!(registration.state(), RegistrationState::Registered);
        assert!(!registration.acknowledge());

        assert!(!registration.update(role, false));
        assert_eq!(registration.state(), RegistrationState::Unregistered);
    }

    #[test]
    fn test_pending_deregisters_on_bus_loss() {
        let role = DeviceRole::Node;
        let mut registration = Registration::new(role);
        registration.update(role, true);
        registration.update(role, false);
        assert_eq!(registration.state(), RegistrationState::Unregistered);
        assert!(registration.update(role, true));
    }

    #[test]
    fn test_acknowledge_requires_pending() {
        let mut registration = Registration::new(DeviceRole::Node);
        assert!(!registration.acknowledge());
        assert_eq!(registration.state(), RegistrationState::Unregistered);
    }

    #[test]
    fn test_read_only_never_registers() {
        let role = DeviceRole::ReadOnly;
        let mut registration = Registration::new(role);
        assert!(!registration.update(role, true));
        assert_eq!(registration.state(), RegistrationState::Unregistered);
    }
}
