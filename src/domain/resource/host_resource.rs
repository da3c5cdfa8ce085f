use crate::domain::utils::id::HostId;
use crate::error::{Error, Result};

/// CPU bookkeeping of one physical host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostResource {
    pub id: HostId,
    pub cpu_capacity: i64,
    pub used_cpu: i64,

    /// Set on the first reservation; an activated host is not charged the activation cost again.
    pub activated: bool,
}

impl HostResource {
    pub fn new(id: HostId, cpu_capacity: i64) -> Self {
        Self { id, cpu_capacity, used_cpu: 0, activated: false }
    }

    pub fn available_cpu(&self) -> i64 {
        self.cpu_capacity - self.used_cpu
    }

    pub fn has_resources(&self, required: i64) -> bool {
        self.available_cpu() >= required
    }

    /// Claims `required` CPU and activates the host.
    ///
    /// # Returns
    /// Returns `true` if this reservation activated the host.
    pub fn reserve(&mut self, required: i64) -> Result<bool> {
        if !self.has_resources(required) {
            return Err(Error::CapacityInvariantViolated { host: self.id, requested: required, available: self.available_cpu() });
        }

        let newly_activated = !self.activated;
        self.activated = true;
        self.used_cpu += required;

        Ok(newly_activated)
    }

    pub fn reset(&mut self) {
        self.used_cpu = 0;
        self.activated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_activates_once() {
        let mut host = HostResource::new(HostId::new(0), 7);

        assert!(host.reserve(2).unwrap());
        assert!(!host.reserve(3).unwrap());
        assert_eq!(host.used_cpu, 5);
        assert_eq!(host.available_cpu(), 2);
        assert!(host.activated);
    }

    #[test]
    fn test_reserve_past_capacity_is_rejected_untouched() {
        let mut host = HostResource::new(HostId::new(1), 4);
        host.reserve(3).unwrap();

        let result = host.reserve(2);

        assert!(matches!(result, Err(Error::CapacityInvariantViolated { requested: 2, available: 1, .. })));
        assert_eq!(host.used_cpu, 3);
    }

    #[test]
    fn test_reset_clears_usage_and_activation() {
        let mut host = HostResource::new(HostId::new(2), 10);
        host.reserve(10).unwrap();

        host.reset();
        assert_eq!(host.used_cpu, 0);
        assert!(!host.activated);

        host.reset();
        assert_eq!(host, HostResource::new(HostId::new(2), 10));
    }
}
