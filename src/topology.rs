//! Swarm communication topologies.

/// Which particles influence a particle's social component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Every particle sees every particle, itself included.
    #[default]
    Global,
    /// Particle `i` sees `i - 1`, `i` and `i + 1`, wrapping at both ends.
    Ring,
}

impl Topology {
    /// Neighbor indices of particle `index` in a swarm of `particle_count`.
    ///
    /// # Examples
    ///
    /// ```
    /// use acq_metaheur::topology::Topology;
    ///
    /// assert_eq!(Topology::Ring.neighbors(5, 0), vec![4, 0, 1]);
    /// assert_eq!(Topology::Global.neighbors(3, 1), vec![0, 1, 2]);
    /// ```
    pub fn neighbors(self, particle_count: usize, index: usize) -> Vec<usize> {
        debug_assert!(index < particle_count);
        match self {
            Topology::Global => (0..particle_count).collect(),
            Topology::Ring => {
                let prev = if index == 0 { particle_count - 1 } else { index - 1 };
                let next = if index + 1 == particle_count { 0 } else { index + 1 };
                vec![prev, index, next]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ring_wraps_at_both_ends() {
        assert_eq!(Topology::Ring.neighbors(5, 0), vec![4, 0, 1]);
        assert_eq!(Topology::Ring.neighbors(5, 4), vec![3, 4, 0]);
        assert_eq!(Topology::Ring.neighbors(5, 2), vec![1, 2, 3]);
    }

    #[test]
    fn test_ring_single_particle() {
        assert_eq!(Topology::Ring.neighbors(1, 0), vec![0, 0, 0]);
    }

    #[test]
    fn test_default_is_global() {
        assert_eq!(Topology::default(), Topology::Global);
    }

    proptest! {
        #[test]
        fn prop_global_returns_everyone(n in 1usize..200, seed in any::<usize>()) {
            let i = seed % n;
            let neighbors = Topology::Global.neighbors(n, i);
            prop_assert_eq!(neighbors, (0..n).collect::<Vec<_>>());
        }

        #[test]
        fn prop_ring_returns_three_adjacent(n in 2usize..200, seed in any::<usize>()) {
            let i = seed % n;
            let neighbors = Topology::Ring.neighbors(n, i);
            prop_assert_eq!(neighbors.len(), 3);
            prop_assert_eq!(neighbors[1], i);
            prop_assert_eq!((neighbors[0] + 1) % n, i);
            prop_assert_eq!(neighbors[2], (i + 1) % n);
        }
    }
}
