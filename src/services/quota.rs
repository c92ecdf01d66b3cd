use dashmap::DashMap;

/// Per-client count of successful uploads, held in process memory for the
/// life of the server. Deleting an object does not give quota back, and
/// entries are never evicted; `tracked_clients` is surfaced on the health
/// endpoint so the map's growth stays visible.
pub struct UploadQuota {
    counts: DashMap<String, u32>,
    ceiling: u32,
}

impl UploadQuota {
    pub fn new(ceiling: u32) -> Self {
        Self {
            counts: DashMap::new(),
            ceiling,
        }
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Read-only view of a client's current count.
    pub fn peek(&self, client: &str) -> u32 {
        self.counts.get(client).map(|c| *c).unwrap_or(0)
    }

    /// Reserves one upload slot. Runs under the map's entry lock, so two
    /// concurrent requests from the same client cannot both take the last
    /// slot. Call `release` if the upload ends up failing.
    pub fn try_reserve(&self, client: &str) -> bool {
        let mut count = self.counts.entry(client.to_string()).or_insert(0);
        if *count >= self.ceiling {
            return false;
        }
        *count += 1;
        true
    }

    /// Rolls back a reservation after a failed store write, keeping counts
    /// equal to the number of successful uploads.
    pub fn release(&self, client: &str) {
        if let Some(mut count) = self.counts.get_mut(client) {
            *count = count.saturating_sub(1);
        }
    }

    pub fn tracked_clients(&self) -> usize {
        self.counts.len()
    }
}
