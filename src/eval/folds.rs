//! Stratified k-fold splitting

use crate::error::{Result, SpanflagError};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Default number of folds
pub const DEFAULT_FOLDS: usize = 5;

/// Default shuffle seed
pub const DEFAULT_SEED: u64 = 42;

/// One train/test partition. Both index lists are sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split rows into `k` folds preserving the label ratio.
///
/// Each class is shuffled with a seeded RNG and dealt round-robin across
/// folds; the deal continues where the previous class stopped so fold sizes
/// differ by at most one. A class smaller than `k` is allowed, with a
/// warning, as long as some class has at least `k` rows.
pub fn stratified_k_fold(labels: &[u8], k: usize, seed: u64) -> Result<Vec<Fold>> {
    if k < 2 || k > labels.len() {
        return Err(SpanflagError::InvalidFolds {
            k,
            rows: labels.len(),
        });
    }

    let positives = labels.iter().filter(|&&y| y == 1).count();
    let largest = positives.max(labels.len() - positives);
    if largest < k {
        return Err(SpanflagError::ClassTooSmall { k, largest });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut assignment = vec![0usize; labels.len()];
    let mut next = 0usize;
    for class in [0u8, 1u8] {
        let mut members: Vec<usize> = (0..labels.len())
            .filter(|&i| labels[i] == class)
            .collect();
        if !members.is_empty() && members.len() < k {
            tracing::warn!(
                "Class {} has only {} rows, fewer than k={}; some folds will lack it",
                class,
                members.len(),
                k
            );
        }
        members.shuffle(&mut rng);
        for idx in members {
            assignment[idx] = next % k;
            next += 1;
        }
    }

    Ok((0..k)
        .map(|fold| {
            let (test, train): (Vec<usize>, Vec<usize>) =
                (0..labels.len()).partition(|&i| assignment[i] == fold);
            Fold { train, test }
        })
        .collect())
}
