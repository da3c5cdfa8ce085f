use std::collections::{BTreeMap, HashSet};

use crate::domain::resource::host_resource::HostResource;
use crate::domain::utils::id::HostId;
use crate::error::{Error, Result};

/// Running record of per-host CPU usage and activation across a batch.
///
/// The ledger is the only mutable state shared between requests. Placement calls borrow it
/// mutably, so there is exactly one writer at a time and the MSG construction of a request
/// always sees the state left by the previous commit.
#[derive(Debug, Clone, Default)]
pub struct ResourceLedger {
    /// Ordered by host id, which fixes the candidate order of every MSG stage.
    hosts: BTreeMap<HostId, HostResource>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self { hosts: BTreeMap::new() }
    }

    /// Creates a ledger where every host has the same capacity.
    pub fn with_uniform_capacity(host_ids: impl IntoIterator<Item = HostId>, cpu_capacity: i64) -> Result<Self> {
        let mut ledger = ResourceLedger::new();
        for host_id in host_ids {
            ledger.add_host(HostResource::new(host_id, cpu_capacity))?;
        }
        Ok(ledger)
    }

    //---------------------
    // --- Host Methods ---
    //---------------------
    pub fn add_host(&mut self, host: HostResource) -> Result<()> {
        if host.cpu_capacity <= 0 {
            return Err(Error::ModelConstructionError(format!("Host {} has non-positive capacity {}", host.id, host.cpu_capacity)));
        }
        if self.hosts.contains_key(&host.id) {
            return Err(Error::ModelConstructionError(format!("Host {} is defined twice", host.id)));
        }

        self.hosts.insert(host.id, host);
        Ok(())
    }

    pub fn get(&self, host_id: HostId) -> Option<&HostResource> {
        self.hosts.get(&host_id)
    }

    pub fn contains(&self, host_id: HostId) -> bool {
        self.hosts.contains_key(&host_id)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn host_ids(&self) -> impl Iterator<Item = HostId> + '_ {
        self.hosts.keys().copied()
    }

    /// Hosts, in ascending id order, that can take `demand` CPU and are not excluded.
    pub fn candidates(&self, demand: i64, excluded: &HashSet<HostId>) -> Vec<HostId> {
        self.hosts.values().filter(|host| host.has_resources(demand) && !excluded.contains(&host.id)).map(|host| host.id).collect()
    }

    //----------------------------
    // --- Reservation Methods ---
    //----------------------------

    /// Verifies that every `(host, demand)` pair fits. Nothing is mutated.
    pub fn ensure_capacity(&self, demands: &[(HostId, i64)]) -> Result<()> {
        for &(host_id, demand) in demands {
            let host = self.hosts.get(&host_id).ok_or(Error::UnknownHost(host_id))?;
            if !host.has_resources(demand) {
                return Err(Error::CapacityInvariantViolated { host: host_id, requested: demand, available: host.available_cpu() });
            }
        }
        Ok(())
    }

    /// Claims CPU on one host.
    ///
    /// # Returns
    /// Returns `true` if the host was activated by this reservation.
    pub fn reserve(&mut self, host_id: HostId, demand: i64) -> Result<bool> {
        let host = self.hosts.get_mut(&host_id).ok_or(Error::UnknownHost(host_id))?;
        host.reserve(demand)
    }

    /// Returns every host to `used_cpu = 0, activated = false` for an independent trial.
    pub fn reset_all(&mut self) {
        for host in self.hosts.values_mut() {
            host.reset();
        }
    }

    //----------------------------
    // --- Aggregation Methods ---
    //----------------------------
    pub fn total_capacity(&self) -> i64 {
        self.hosts.values().map(|host| host.cpu_capacity).sum()
    }

    pub fn total_used(&self) -> i64 {
        self.hosts.values().map(|host| host.used_cpu).sum()
    }

    pub fn activated_count(&self) -> usize {
        self.hosts.values().filter(|host| host.activated).count()
    }

    /// Copy of the current per-host state, ordered by host id.
    pub fn snapshot(&self) -> Vec<HostResource> {
        self.hosts.values().cloned().collect()
    }
}
