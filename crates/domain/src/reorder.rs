//! Request ordering inside folders.
//!
//! Every folder keeps its requests at dense, zero-based positions. Any move
//! re-numbers the folders it touches and reports the new positions so they
//! can be written back in one batch.

use serde::{Deserialize, Serialize};

use crate::request::ApiRequest;

/// Where a request lands relative to the request it was dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPlacement {
    /// Upper half of the target row.
    Above,
    /// Lower half of the target row.
    Below,
}

/// What a dragged request was released over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A folder header. The request is appended to that folder.
    Folder(String),
    /// Another request row.
    Request {
        /// The request under the cursor
        id: String,
        /// Which half of its row
        placement: DropPlacement,
    },
}

/// New location of one request after a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    /// Request identifier
    pub id: String,
    /// Folder the request now belongs to
    pub folder_id: String,
    /// Position inside that folder
    pub position: usize,
}

/// Result of [`reorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderOutcome {
    /// Untouched requests, then the re-numbered source folder (cross-folder
    /// moves only), then the re-numbered target folder.
    pub requests: Vec<ApiRequest>,
    /// Positions of every request in the touched folder(s).
    pub updates: Vec<PositionUpdate>,
}

/// Sorts requests by position. Ties keep their relative order.
pub fn sort_by_position(requests: &mut [ApiRequest]) {
    requests.sort_by_key(|r| r.position);
}

/// Requests of one folder in display order.
#[must_use]
pub fn folder_requests<'a>(requests: &'a [ApiRequest], folder_id: &str) -> Vec<&'a ApiRequest> {
    let mut list: Vec<&ApiRequest> = requests.iter().filter(|r| r.folder_id == folder_id).collect();
    list.sort_by_key(|r| r.position);
    list
}

/// Position for a request appended to `folder_id`: one past the highest
/// existing position, or 0 for an empty folder.
#[must_use]
pub fn next_position(requests: &[ApiRequest], folder_id: &str) -> usize {
    requests
        .iter()
        .filter(|r| r.folder_id == folder_id)
        .map(|r| r.position)
        .max()
        .map_or(0, |max| max + 1)
}

/// Re-numbers the requests of one folder by their current order.
///
/// Returns the updates for every request of that folder; `requests` is
/// modified in place.
pub fn reindex_folder(requests: &mut [ApiRequest], folder_id: &str) -> Vec<PositionUpdate> {
    let mut indices: Vec<usize> = requests
        .iter()
        .enumerate()
        .filter(|(_, r)| r.folder_id == folder_id)
        .map(|(i, _)| i)
        .collect();
    indices.sort_by_key(|&i| requests[i].position);

    indices
        .into_iter()
        .enumerate()
        .map(|(position, i)| {
            requests[i].position = position;
            PositionUpdate {
                id: requests[i].id.clone(),
                folder_id: folder_id.to_string(),
                position,
            }
        })
        .collect()
}

/// Moves `dragged_id` into `target_folder_id` at `target_index`.
///
/// The index is interpreted against the target folder with the dragged
/// request already removed; indices past the end append. Returns `None` when
/// the dragged request does not exist.
#[must_use]
pub fn reorder(
    requests: &[ApiRequest],
    dragged_id: &str,
    target_folder_id: &str,
    target_index: usize,
) -> Option<ReorderOutcome> {
    let dragged = requests.iter().find(|r| r.id == dragged_id)?;
    let source_folder_id = dragged.folder_id.clone();
    let remaining: Vec<&ApiRequest> = requests.iter().filter(|r| r.id != dragged_id).collect();

    let mut target: Vec<ApiRequest> = remaining
        .iter()
        .filter(|r| r.folder_id == target_folder_id)
        .map(|r| (*r).clone())
        .collect();
    sort_by_position(&mut target);

    let mut moved = dragged.clone();
    moved.folder_id = target_folder_id.to_string();
    let index = target_index.min(target.len());
    target.insert(index, moved);
    renumber(&mut target);

    let same_folder = source_folder_id == target_folder_id;
    let mut source: Vec<ApiRequest> = Vec::new();
    if !same_folder {
        source = remaining
            .iter()
            .filter(|r| r.folder_id == source_folder_id)
            .map(|r| (*r).clone())
            .collect();
        sort_by_position(&mut source);
        renumber(&mut source);
    }

    let updates = source
        .iter()
        .chain(target.iter())
        .map(|r| PositionUpdate {
            id: r.id.clone(),
            folder_id: r.folder_id.clone(),
            position: r.position,
        })
        .collect();

    let mut combined: Vec<ApiRequest> = remaining
        .into_iter()
        .filter(|r| r.folder_id != source_folder_id && r.folder_id != target_folder_id)
        .cloned()
        .collect();
    combined.extend(source);
    combined.extend(target);

    Some(ReorderOutcome {
        requests: combined,
        updates,
    })
}

/// Turns a drop gesture into `(target_folder_id, target_index)` for
/// [`reorder`].
///
/// A folder drop appends. A request drop takes the row index of the target,
/// plus one below its midpoint, minus one when moving down inside the same
/// folder (the dragged row is removed before inserting). Dropping a request
/// onto itself, or onto an unknown request, yields `None`.
#[must_use]
pub fn resolve_drop(
    requests: &[ApiRequest],
    dragged_id: &str,
    target: &DropTarget,
) -> Option<(String, usize)> {
    let dragged = requests.iter().find(|r| r.id == dragged_id)?;
    match target {
        DropTarget::Folder(folder_id) => {
            let len = requests.iter().filter(|r| &r.folder_id == folder_id).count();
            Some((folder_id.clone(), len))
        }
        DropTarget::Request { id, placement } => {
            if id == dragged_id {
                return None;
            }
            let over = requests.iter().find(|r| &r.id == id)?;
            let siblings = folder_requests(requests, &over.folder_id);
            let mut index = siblings.iter().position(|r| r.id == over.id)?;
            if *placement == DropPlacement::Below {
                index += 1;
            }
            if dragged.folder_id == over.folder_id {
                let dragged_index = siblings.iter().position(|r| r.id == dragged_id)?;
                if dragged_index < index {
                    index -= 1;
                }
            }
            Some((over.folder_id.clone(), index))
        }
    }
}

/// Pure list form of a single-folder move, on ids only.
#[must_use]
pub fn reorder_ids<S: AsRef<str>>(ordered: &[S], dragged_id: &str, target_index: usize) -> Vec<String> {
    let mut ids: Vec<String> = ordered
        .iter()
        .map(|s| s.as_ref().to_string())
        .filter(|id| id != dragged_id)
        .collect();
    if ids.len() == ordered.len() {
        return ids;
    }
    let index = target_index.min(ids.len());
    ids.insert(index, dragged_id.to_string());
    ids
}

fn renumber(list: &mut [ApiRequest]) {
    for (position, request) in list.iter_mut().enumerate() {
        request.position = position;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(id: &str, folder: &str, position: usize) -> ApiRequest {
        let mut r = ApiRequest::new(folder, id).with_position(position);
        r.id = id.to_string();
        r
    }

    fn folder(prefix: &str, folder: &str, n: usize) -> Vec<ApiRequest> {
        (0..n).map(|i| request(&format!("{prefix}{i}"), folder, i)).collect()
    }

    fn order(requests: &[ApiRequest], folder_id: &str) -> Vec<String> {
        folder_requests(requests, folder_id)
            .into_iter()
            .map(|r| r.id.clone())
            .collect()
    }

    fn assert_dense(requests: &[ApiRequest], folder_id: &str) {
        let positions: Vec<usize> = folder_requests(requests, folder_id)
            .into_iter()
            .map(|r| r.position)
            .collect();
        let expected: Vec<usize> = (0..positions.len()).collect();
        assert_eq!(positions, expected, "folder {folder_id} is not dense");
    }

    #[test]
    fn test_move_within_folder() {
        let requests = folder("a", "A", 4);
        let outcome = reorder(&requests, "a0", "A", 2).unwrap();
        assert_eq!(order(&outcome.requests, "A"), vec!["a1", "a2", "a0", "a3"]);
        assert_dense(&outcome.requests, "A");
        assert_eq!(outcome.updates.len(), 4);
    }

    #[test]
    fn test_move_across_folders_renumbers_both() {
        let mut requests = folder("a", "A", 3);
        requests.extend(folder("b", "B", 2));
        requests.push(request("c0", "C", 0));

        let outcome = reorder(&requests, "a1", "B", 1).unwrap();
        assert_eq!(order(&outcome.requests, "A"), vec!["a0", "a2"]);
        assert_eq!(order(&outcome.requests, "B"), vec!["b0", "a1", "b1"]);
        assert_dense(&outcome.requests, "A");
        assert_dense(&outcome.requests, "B");
        assert_eq!(outcome.updates.len(), 5);
        assert!(outcome.updates.iter().all(|u| u.id != "c0"));
        assert_eq!(outcome.requests[0].id, "c0");
    }

    #[test]
    fn test_index_past_end_appends() {
        let mut requests = folder("a", "A", 2);
        requests.extend(folder("b", "B", 2));
        let outcome = reorder(&requests, "a0", "B", 99).unwrap();
        assert_eq!(order(&outcome.requests, "B"), vec!["b0", "b1", "a0"]);
    }

    #[test]
    fn test_move_into_empty_folder() {
        let requests = folder("a", "A", 2);
        let outcome = reorder(&requests, "a1", "E", 0).unwrap();
        assert_eq!(order(&outcome.requests, "E"), vec!["a1"]);
        assert_eq!(outcome.requests.iter().find(|r| r.id == "a1").unwrap().folder_id, "E");
    }

    #[test]
    fn test_unknown_dragged_request() {
        assert!(reorder(&folder("a", "A", 2), "zz", "A", 0).is_none());
    }

    #[test]
    fn test_sparse_positions_become_dense() {
        let requests = vec![request("x", "A", 4), request("y", "A", 9), request("z", "A", 1)];
        let outcome = reorder(&requests, "y", "A", 0).unwrap();
        assert_eq!(order(&outcome.requests, "A"), vec!["y", "z", "x"]);
        assert_dense(&outcome.requests, "A");
    }

    #[test]
    fn test_drop_on_folder_header_appends() {
        let mut requests = folder("a", "A", 3);
        requests.extend(folder("b", "B", 2));
        let (folder_id, index) =
            resolve_drop(&requests, "a0", &DropTarget::Folder("B".into())).unwrap();
        assert_eq!((folder_id.as_str(), index), ("B", 2));

        let (folder_id, index) =
            resolve_drop(&requests, "a0", &DropTarget::Folder("A".into())).unwrap();
        let outcome = reorder(&requests, "a0", &folder_id, index).unwrap();
        assert_eq!(order(&outcome.requests, "A"), vec!["a1", "a2", "a0"]);
    }

    #[test]
    fn test_drop_on_itself_is_ignored() {
        let requests = folder("a", "A", 3);
        let target = DropTarget::Request {
            id: "a1".into(),
            placement: DropPlacement::Below,
        };
        assert_eq!(resolve_drop(&requests, "a1", &target), None);
    }

    #[test]
    fn test_cross_folder_drop_has_no_compensation() {
        let mut requests = folder("a", "A", 3);
        requests.extend(folder("b", "B", 3));
        let target = DropTarget::Request {
            id: "b1".into(),
            placement: DropPlacement::Below,
        };
        let (folder_id, index) = resolve_drop(&requests, "a0", &target).unwrap();
        assert_eq!(index, 2);
        let outcome = reorder(&requests, "a0", &folder_id, index).unwrap();
        assert_eq!(order(&outcome.requests, "B"), vec!["b0", "b1", "a0", "b2"]);
    }

    /// Every same-folder drop for folders of up to six requests lands the
    /// dragged request next to the target on the chosen side.
    #[test]
    fn test_same_folder_drops_exhaustive() {
        for n in 2..=6 {
            let requests = folder("r", "F", n);
            for dragged in 0..n {
                for over in (0..n).filter(|&o| o != dragged) {
                    for placement in [DropPlacement::Above, DropPlacement::Below] {
                        let dragged_id = format!("r{dragged}");
                        let over_id = format!("r{over}");
                        let target = DropTarget::Request {
                            id: over_id.clone(),
                            placement,
                        };
                        let (folder_id, index) =
                            resolve_drop(&requests, &dragged_id, &target).unwrap();
                        let outcome = reorder(&requests, &dragged_id, &folder_id, index).unwrap();
                        assert_dense(&outcome.requests, "F");

                        let ids = order(&outcome.requests, "F");
                        assert_eq!(ids.len(), n);
                        let d = ids.iter().position(|id| *id == dragged_id).unwrap();
                        let o = ids.iter().position(|id| *id == over_id).unwrap();
                        match placement {
                            DropPlacement::Above => assert_eq!(d + 1, o, "{n} {dragged} {over} above"),
                            DropPlacement::Below => assert_eq!(o + 1, d, "{n} {dragged} {over} below"),
                        }

                        let pure = reorder_ids(&order(&requests, "F"), &dragged_id, index);
                        assert_eq!(pure, ids);
                    }
                }
            }
        }
    }

    /// Dropping a request just below its upper neighbour or just above its
    /// lower neighbour keeps the order unchanged.
    #[test]
    fn test_drop_on_own_slot_is_noop() {
        for n in 2..=6 {
            let requests = folder("r", "F", n);
            let before = order(&requests, "F");
            for dragged in 0..n {
                let dragged_id = format!("r{dragged}");
                let mut targets = Vec::new();
                if dragged > 0 {
                    targets.push(DropTarget::Request {
                        id: format!("r{}", dragged - 1),
                        placement: DropPlacement::Below,
                    });
                }
                if dragged + 1 < n {
                    targets.push(DropTarget::Request {
                        id: format!("r{}", dragged + 1),
                        placement: DropPlacement::Above,
                    });
                }
                for target in targets {
                    let (folder_id, index) = resolve_drop(&requests, &dragged_id, &target).unwrap();
                    assert_eq!(index, dragged);
                    let outcome = reorder(&requests, &dragged_id, &folder_id, index).unwrap();
                    assert_eq!(order(&outcome.requests, "F"), before);
                }
            }
        }
    }

    #[test]
    fn test_sequences_of_moves_stay_dense() {
        let mut requests = folder("a", "A", 4);
        requests.extend(folder("b", "B", 3));
        let moves = [("a0", "B", 0), ("b2", "A", 1), ("a3", "A", 0), ("b0", "B", 5), ("a1", "B", 2)];
        for (dragged, target, index) in moves {
            requests = reorder(&requests, dragged, target, index).unwrap().requests;
            assert_dense(&requests, "A");
            assert_dense(&requests, "B");
        }
        assert_eq!(requests.len(), 7);
    }

    #[test]
    fn test_next_position_and_reindex() {
        let mut requests = vec![request("x", "A", 0), request("y", "A", 3), request("z", "B", 0)];
        assert_eq!(next_position(&requests, "A"), 4);
        assert_eq!(next_position(&requests, "C"), 0);

        let updates = reindex_folder(&mut requests, "A");
        assert_eq!(
            updates,
            vec![
                PositionUpdate { id: "x".into(), folder_id: "A".into(), position: 0 },
                PositionUpdate { id: "y".into(), folder_id: "A".into(), position: 1 },
            ]
        );
        assert_eq!(requests[1].position, 1);
    }

    #[test]
    fn test_reorder_ids_ignores_unknown() {
        let ids = ["a", "b"];
        assert_eq!(reorder_ids(&ids, "c", 0), vec!["a", "b"]);
        assert_eq!(reorder_ids(&ids, "b", 0), vec!["b", "a"]);
    }
}
