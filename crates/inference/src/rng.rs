//! Deterministic pseudo-random generation and content-derived seeding
//!
//! Re-running an analysis over the same underlying counts must yield
//! bit-identical probabilities, so the simulation seed is derived from the
//! experiment data itself rather than from wall-clock entropy. The generator
//! is mulberry32: one 32-bit state word, fast, and fully determined by its
//! seed. It is NOT cryptographically secure; adversary-resistant hashing for
//! traffic assignment lives in [`crate::assignment`].

use uplift_types::VariantObservation;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Derive a 32-bit seed from the experiment's current data
///
/// Variants are canonicalized as `key:exposures:conversions` entries joined
/// with `|`, sorted by key first so the seed does not depend on input order.
/// The requested simulation count is folded in at the end, so asking for a
/// different precision also changes the sample path deterministically.
pub fn derive_seed(variants: &[VariantObservation], simulations: u64) -> u32 {
    let mut ordered: Vec<&VariantObservation> = variants.iter().collect();
    ordered.sort_by(|a, b| a.key.cmp(&b.key));

    let canonical = ordered
        .iter()
        .map(|v| format!("{}:{}:{}", v.key, v.exposures, v.conversions))
        .collect::<Vec<_>>()
        .join("|");

    let mut hash = FNV_OFFSET_BASIS;
    for byte in canonical.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }

    hash ^ simulations as u32
}

/// Deterministic pseudo-random number generator (mulberry32)
///
/// Each instance is scoped to one inference call; concurrent callers each
/// construct their own, so no sequences interleave.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Create a generator from a seed
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next value in [0, 1)
    ///
    /// Advances the state word and returns the mixed output divided by 2^32.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sequence() {
        let mut rng = Mulberry32::new(42);

        assert_eq!(rng.next_f64(), 0.6011037519201636);
        assert_eq!(rng.next_f64(), 0.44829055899754167);
        assert_eq!(rng.next_f64(), 0.8524657934904099);
        assert_eq!(rng.next_f64(), 0.6697340414393693);
        assert_eq!(rng.next_f64(), 0.17481389874592423);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Mulberry32::new(12345);
        let mut b = Mulberry32::new(12345);

        for _ in 0..1000 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let mut a = Mulberry32::new(7);
        let mut burned = Mulberry32::new(7);
        for _ in 0..50 {
            burned.next_f64();
        }

        // Advancing one instance must not perturb another.
        let mut b = Mulberry32::new(7);
        assert_eq!(a.next_f64(), b.next_f64());
    }

    #[test]
    fn test_output_range() {
        let mut rng = Mulberry32::new(0xdead_beef);
        for _ in 0..10_000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_derive_seed_reference_value() {
        let variants = vec![
            VariantObservation::new("a", 10, 2),
            VariantObservation::new("b", 20, 5),
        ];

        assert_eq!(derive_seed(&variants, 10_000), 3_894_042_686);
    }

    #[test]
    fn test_derive_seed_order_independent() {
        let forward = vec![
            VariantObservation::new("a", 10, 2),
            VariantObservation::new("b", 20, 5),
        ];
        let reversed = vec![
            VariantObservation::new("b", 20, 5),
            VariantObservation::new("a", 10, 2),
        ];

        assert_eq!(derive_seed(&forward, 10_000), derive_seed(&reversed, 10_000));
    }

    #[test]
    fn test_derive_seed_sensitive_to_simulations() {
        let variants = vec![
            VariantObservation::new("a", 10, 2),
            VariantObservation::new("b", 20, 5),
        ];

        assert_eq!(derive_seed(&variants, 10_001), 3_894_042_687);
        assert_ne!(derive_seed(&variants, 10_000), derive_seed(&variants, 10_001));
    }

    #[test]
    fn test_derive_seed_sensitive_to_counts() {
        let base = vec![
            VariantObservation::new("a", 10, 2),
            VariantObservation::new("b", 20, 5),
        ];
        let bumped = vec![
            VariantObservation::new("a", 10, 3),
            VariantObservation::new("b", 20, 5),
        ];

        assert_eq!(derive_seed(&bumped, 10_000), 3_293_531_231);
        assert_ne!(derive_seed(&base, 10_000), derive_seed(&bumped, 10_000));
    }
}
