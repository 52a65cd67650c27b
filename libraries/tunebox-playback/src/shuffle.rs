//! Next/previous index selection over a queue

use rand::Rng;

/// Uniformly random index in `0..len`, different from `current` whenever
/// another index exists.
///
/// Draws from the `len - 1` other slots and shifts past `current`, so no
/// retry loop is needed. Returns `None` for an empty queue.
pub fn pick_other_index<R: Rng + ?Sized>(
    len: usize,
    current: Option<usize>,
    rng: &mut R,
) -> Option<usize> {
    match (len, current) {
        (0, _) => None,
        (1, _) => Some(0),
        (_, Some(current)) if current < len => {
            let pick = rng.gen_range(0..len - 1);
            Some(if pick >= current { pick + 1 } else { pick })
        }
        _ => Some(rng.gen_range(0..len)),
    }
}

/// Sequential successor of `current`.
///
/// A current track missing from the queue restarts at the head; the last
/// index has no successor.
pub fn next_index(len: usize, current: Option<usize>) -> Option<usize> {
    match current {
        Some(i) if i + 1 < len => Some(i + 1),
        Some(_) => None,
        None if len > 0 => Some(0),
        None => None,
    }
}

/// Sequential predecessor of `current`; none at the head or when the
/// current track is not in the queue.
pub fn prev_index(current: Option<usize>) -> Option<usize> {
    current.and_then(|i| i.checked_sub(1))
}
