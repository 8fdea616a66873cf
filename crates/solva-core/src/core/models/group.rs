/// A set of particle indices drawn from one frame.
///
/// The indices are kept sorted and deduplicated, so two groups selecting the
/// same particles compare equal regardless of construction order. A group may
/// span multiple molecules; validity of the indices against a concrete frame
/// is checked at the engine boundary, not here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParticleGroup {
    indices: Vec<usize>,
}

impl ParticleGroup {
    /// Creates a group from arbitrary particle indices, sorting and
    /// deduplicating them.
    pub fn new(mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }

    /// Returns the member indices in ascending order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the number of particles in the group.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the group selects no particles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns `true` if the group contains the given particle index.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Returns an iterator over the member indices.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}

impl FromIterator<usize> for ParticleGroup {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sorts_and_deduplicates_indices() {
        let group = ParticleGroup::new(vec![5, 1, 3, 1, 5]);
        assert_eq!(group.indices(), &[1, 3, 5]);
        assert_eq!(group.len(), 3);
    }

    #[test]
    fn groups_with_same_members_are_equal() {
        let a = ParticleGroup::new(vec![2, 0, 7]);
        let b = ParticleGroup::new(vec![7, 2, 0, 2]);
        assert_eq!(a, b);
    }

    #[test]
    fn contains_and_emptiness() {
        let group = ParticleGroup::new(vec![4, 9]);
        assert!(group.contains(4));
        assert!(!group.contains(5));
        assert!(!group.is_empty());
        assert!(ParticleGroup::default().is_empty());
    }

    #[test]
    fn collects_from_iterator() {
        let group: ParticleGroup = [3usize, 1, 3].into_iter().collect();
        assert_eq!(group.indices(), &[1, 3]);
    }
}
