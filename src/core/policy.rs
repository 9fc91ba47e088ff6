/// Optional-axis resolution for a single generation call.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::schema::policy::AxisPolicy;

pub struct PolicyResolver;

impl PolicyResolver {
    /// Decide which optional axes participate in this call.
    ///
    /// Draws a count uniformly from `0..=min(max_optional, |optional|)`, then
    /// that many distinct axis names without replacement. Names come back in
    /// draw order.
    pub fn choose_optional_axes<'p, R: Rng + ?Sized>(
        policy: &'p AxisPolicy,
        rng: &mut R,
    ) -> Vec<&'p str> {
        let count = rng.gen_range(0..=policy.optional_limit());
        policy
            .optional
            .choose_multiple(rng, count)
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn policy(optional: &[&str], max_optional: usize) -> AxisPolicy {
        AxisPolicy {
            mandatory: vec!["a".to_string()],
            optional: optional.iter().map(|s| s.to_string()).collect(),
            max_optional,
        }
    }

    #[test]
    fn never_exceeds_max_optional() {
        let p = policy(&["c", "d", "e"], 2);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let chosen = PolicyResolver::choose_optional_axes(&p, &mut rng);
            assert!(chosen.len() <= 2);
        }
    }

    #[test]
    fn chosen_axes_are_distinct_and_declared() {
        let p = policy(&["c", "d", "e", "f"], 4);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let chosen = PolicyResolver::choose_optional_axes(&p, &mut rng);
            let unique: HashSet<&str> = chosen.iter().copied().collect();
            assert_eq!(unique.len(), chosen.len());
            assert!(chosen.iter().all(|axis| p.is_optional(axis)));
        }
    }

    #[test]
    fn max_optional_larger_than_candidates_is_clamped() {
        let p = policy(&["c", "d"], 10);
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen_counts = HashSet::new();
        for _ in 0..500 {
            seen_counts.insert(PolicyResolver::choose_optional_axes(&p, &mut rng).len());
        }
        assert_eq!(seen_counts, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn empty_optional_set_yields_nothing() {
        let p = policy(&[], 3);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(PolicyResolver::choose_optional_axes(&p, &mut rng).is_empty());
    }
}
