//! Dense Ordering Rules
//!
//! Pure functions behind the ordered-collection protocol shared by links and
//! sections. Siblings under one parent always carry the indices `0..n`.

use std::collections::HashSet;

use super::entity::{DomainError, DomainResult};

/// Index given to a newly appended child.
///
/// `max_index` is the largest index currently used under the parent.
pub fn next_index(max_index: Option<u32>) -> u32 {
    match max_index {
        Some(max) => max + 1,
        None => 0,
    }
}

/// Pair every id with its offset in `ids_in_order`
pub fn renumber(ids_in_order: &[u32]) -> Vec<(u32, u32)> {
    ids_in_order
        .iter()
        .enumerate()
        .map(|(pos, id)| (*id, pos as u32))
        .collect()
}

/// Check that `new_order` is a permutation of `current`.
///
/// Rejects empty lists, duplicates, unknown ids and missing ids.
pub fn validate_permutation(current: &[u32], new_order: &[u32]) -> DomainResult<()> {
    if new_order.is_empty() {
        return Err(DomainError::Validation("New order must not be empty".to_string()));
    }

    let mut seen = HashSet::with_capacity(new_order.len());
    for id in new_order {
        if !seen.insert(*id) {
            return Err(DomainError::Validation(format!(
                "Id {} appears more than once in the new order",
                id
            )));
        }
    }

    let existing: HashSet<u32> = current.iter().copied().collect();
    if let Some(extra) = new_order.iter().find(|id| !existing.contains(id)) {
        return Err(DomainError::Validation(format!(
            "Id {} does not belong to this collection",
            extra
        )));
    }
    if let Some(missing) = current.iter().find(|id| !seen.contains(id)) {
        return Err(DomainError::Validation(format!(
            "New order is missing id {}",
            missing
        )));
    }

    Ok(())
}

/// Remove `id` from its current offset and insert it at `to_index`.
///
/// `to_index` past the end lands on the last offset.
pub fn splice(order: &[u32], id: u32, to_index: u32) -> DomainResult<Vec<u32>> {
    let from = order
        .iter()
        .position(|x| *x == id)
        .ok_or_else(|| DomainError::NotFound(format!("Id {} not found in collection", id)))?;

    let mut result = order.to_vec();
    let moved = result.remove(from);
    let to = (to_index as usize).min(result.len());
    result.insert(to, moved);
    Ok(result)
}

/// True when `indices` is exactly `{0, .., n-1}`
#[cfg(test)]
pub fn is_contiguous(indices: &[u32]) -> bool {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.iter().enumerate().all(|(pos, idx)| *idx == pos as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_index() {
        assert_eq!(next_index(None), 0);
        assert_eq!(next_index(Some(0)), 1);
        assert_eq!(next_index(Some(4)), 5);
    }

    #[test]
    fn test_renumber() {
        assert_eq!(renumber(&[9, 3, 5]), vec![(9, 0), (3, 1), (5, 2)]);
        assert!(renumber(&[]).is_empty());
    }

    #[test]
    fn test_validate_permutation_accepts_reordering() {
        assert!(validate_permutation(&[1, 2, 3], &[3, 1, 2]).is_ok());
        assert!(validate_permutation(&[1, 2, 3], &[1, 2, 3]).is_ok());
    }

    #[test]
    fn test_validate_permutation_rejects_malformed_lists() {
        let cases: [&[u32]; 4] = [&[], &[1, 1, 2, 3], &[1, 2], &[1, 2, 3, 4]];
        for case in cases {
            assert!(
                matches!(validate_permutation(&[1, 2, 3], case), Err(DomainError::Validation(_))),
                "expected rejection for {:?}",
                case
            );
        }
    }

    #[test]
    fn test_splice_moves_item() {
        // a=1, b=2, c=3: drag c to the top
        assert_eq!(splice(&[1, 2, 3], 3, 0).unwrap(), vec![3, 1, 2]);
        // drag a down one slot
        assert_eq!(splice(&[1, 2, 3], 1, 1).unwrap(), vec![2, 1, 3]);
        // past the end clamps
        assert_eq!(splice(&[1, 2, 3], 1, 10).unwrap(), vec![2, 3, 1]);
        // same slot is a no-op
        assert_eq!(splice(&[1, 2, 3], 2, 1).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_splice_unknown_id() {
        assert!(matches!(splice(&[1, 2], 7, 0), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_is_contiguous() {
        assert!(is_contiguous(&[]));
        assert!(is_contiguous(&[2, 0, 1]));
        assert!(!is_contiguous(&[0, 2]));
        assert!(!is_contiguous(&[0, 0, 1]));
    }
}
