//! Ray slots and the rotating position permutation.
//!
//! Two parallel fixed-length arrays: `slots[i]` holds the ray stored in slot
//! `i`, `positions[i]` is that slot's current angular position. Emitting a ray
//! rotates every position by one and writes into whichever slot lands on
//! position 0, so rays drift outward without any data being moved.

/// One emitted light streak. Everything except `age` is frozen at spawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub intensity: f32,
    pub length: f32,
    pub thickness: f32,
    pub alpha: f32,
    pub age: u32,
    pub source: usize,
    pub hue: f32,
}

#[derive(Clone, Debug)]
pub struct RayField {
    slots: Box<[Option<Ray>]>,
    positions: Box<[usize]>,
}

impl RayField {
    /// `ray_count` must be non-zero; `VisualizerConfig::validate` enforces it.
    pub fn new(ray_count: usize) -> Self {
        Self {
            slots: vec![None; ray_count].into_boxed_slice(),
            positions: (0..ray_count).collect::<Vec<_>>().into_boxed_slice(),
        }
    }

    #[inline]
    pub fn ray_count(&self) -> usize {
        self.slots.len()
    }

    /// Empty every slot and restore the identity permutation.
    pub fn reset(&mut self) {
        self.slots.fill(None);
        for (i, p) in self.positions.iter_mut().enumerate() {
            *p = i;
        }
    }

    /// Insert `ray` at position 0 and age every other stored ray by one.
    /// Returns the slot index the ray was written to.
    pub fn spawn(&mut self, mut ray: Ray) -> usize {
        let slot = self.rotate();
        ray.age = 0;
        self.slots[slot] = Some(ray);
        slot
    }

    /// Rotate and age like `spawn`, but leave position 0 empty.
    pub fn advance_idle(&mut self) -> usize {
        let slot = self.rotate();
        self.slots[slot] = None;
        slot
    }

    fn rotate(&mut self) -> usize {
        let n = self.positions.len();
        let mut head = 0;
        for (i, p) in self.positions.iter_mut().enumerate() {
            *p = (*p + 1) % n;
            if *p == 0 {
                head = i;
            }
        }
        for ray in self.slots.iter_mut().flatten() {
            ray.age = ray.age.saturating_add(1);
        }
        head
    }

    #[inline]
    pub fn is_expired(&self, ray: &Ray) -> bool {
        ray.age as usize >= self.slots.len()
    }

    #[inline]
    pub fn slot(&self, index: usize) -> Option<&Ray> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    #[inline]
    pub fn position(&self, index: usize) -> usize {
        self.positions[index]
    }

    /// Slot currently mapped to `position`.
    pub fn slot_at_position(&self, position: usize) -> Option<usize> {
        self.positions.iter().position(|&p| p == position)
    }

    /// Non-expired rays with their current angular position.
    pub fn live(&self) -> impl Iterator<Item = (usize, &Ray)> + '_ {
        self.slots
            .iter()
            .zip(self.positions.iter())
            .filter_map(|(slot, &pos)| slot.as_ref().map(|r| (pos, r)))
            .filter(move |(_, r)| !self.is_expired(r))
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }
}
