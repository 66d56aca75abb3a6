//! Seeded train/test index splitting
//!
//! Splits are over row indices so callers can slice feature matrices and
//! target vectors consistently. A fixed seed reproduces the exact same
//! partition on every run.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{PipelineError, Result};

/// Shuffle `0..n` with a seeded generator and split off the trailing
/// `test_size` fraction as the test set
pub fn train_test_split(n: usize, test_size: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = (n as f64 * test_size) as usize;
    let n_train = n - n_test;

    let test = indices.split_off(n_train);
    (indices, test)
}

/// Stratified split: each class contributes its share of test rows so the
/// class balance is preserved on both sides
///
/// Fails when any class has fewer than 2 members; such a distribution
/// cannot be represented on both sides of the split.
pub fn stratified_train_test_split(
    labels: &[i32],
    test_size: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    let mut by_class: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(idx);
    }

    for (label, members) in &by_class {
        if members.len() < 2 {
            return Err(PipelineError::InputData(format!(
                "label class {} has only {} member(s); stratified splitting needs at least 2",
                label,
                members.len()
            )));
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for members in by_class.values() {
        let mut members = members.clone();
        members.shuffle(&mut rng);

        // Keep at least one member of every class on the training side
        let n_test =
            ((members.len() as f64 * test_size).round() as usize).min(members.len() - 1);
        let split_at = members.len() - n_test;

        train.extend_from_slice(&members[..split_at]);
        test.extend_from_slice(&members[split_at..]);
    }

    Ok((train, test))
}
