use log::debug;
use rand::seq::index;
use rand::Rng;

use crate::error::{Result, VisualizeError};

// Draw `requested` distinct row indices uniformly from 0..available.
// Indices come back in the order they were drawn.
// Asking for more rows than exist is an error, never a silent clamp.
pub fn sample_rows(available: usize, requested: usize, rng: &mut impl Rng) -> Result<Vec<usize>> {
    if requested == 0 {
        return Err(VisualizeError::EmptySample);
    }
    if requested > available {
        return Err(VisualizeError::Sampling {
            requested,
            available,
        });
    }

    let rows = index::sample(rng, available, requested).into_vec();
    debug!("Sampled rows {:?} out of {}", rows, available);
    Ok(rows)
}
