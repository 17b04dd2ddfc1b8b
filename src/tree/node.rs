use std::cmp::Ordering;

use super::container::{Container, InsertEffect};
use super::payload::{Payload, PayloadKind};
use super::Ctx;

/// An ordered array of containers. Keys less than `containers[0].first_key()`
/// do not occur; the implicit range of `containers[i]` is
/// `[containers[i].first_key(), containers[i + 1].first_key())`.
pub(crate) struct Node<K, V> {
    pub(crate) containers: Vec<Container<K, V>>,
}

/// A container produced by a node split (or bubbled further up by an
/// absorbed promotion), still waiting to be spliced into its new parent.
pub(crate) struct Promotion<K, V> {
    pub(crate) container: Container<K, V>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn destroy(self, ctx: &mut Ctx<K, V>) {
        for container in self.containers {
            destroy_container(container, ctx);
        }
    }
}

fn destroy_container<K, V>(container: Container<K, V>, ctx: &mut Ctx<K, V>) {
    if let Some(child) = container.child {
        child.destroy(ctx);
    }
    let mut cursor = container.payload_first;
    while let Some(boxed) = cursor {
        let Payload { key, mut value, next, .. } = *boxed;
        cursor = next;
        if let Some(v) = value.take() {
            if let Some(destroy_value) = ctx.config.value_destructor.as_mut() {
                destroy_value(v);
            }
        }
        if let Some(destroy_key) = ctx.config.key_destructor.as_mut() {
            destroy_key(key);
        }
    }
}

/// Linear scan for the rightmost container whose first key is `<= key`,
/// starting from `start`. A plain forward scan, not a binary search: the
/// container array is small by construction (bounded by the container
/// threshold) and a linear scan lets callers resume from the index their
/// previous lookup landed on instead of restarting from zero.
pub(crate) fn find_container<K, V>(
    node: &Node<K, V>,
    key: &K,
    start: usize,
    compare: &dyn Fn(&K, &K) -> Ordering,
) -> usize {
    let mut idx = start;
    while idx + 1 < node.containers.len() {
        match node.containers[idx + 1].first_key() {
            Some(next_key) if compare(next_key, key) != Ordering::Greater => idx += 1,
            _ => break,
        }
    }
    idx
}

pub(crate) fn get<'a, K, V>(
    node: &'a Node<K, V>,
    key: &K,
    compare: &dyn Fn(&K, &K) -> Ordering,
) -> Option<&'a V> {
    if node.containers.is_empty() {
        return None;
    }
    let idx = find_container(node, key, 0, compare);
    let container = &node.containers[idx];
    match container.get(key, compare) {
        Some(payload) => match payload.kind {
            PayloadKind::Put => payload.value.as_ref(),
            PayloadKind::Del => None,
        },
        None => match &container.child {
            Some(child) => get(child, key, compare),
            None => None,
        },
    }
}

/// Inserts `new` into `node.containers[idx]` (creating a fresh leftmost
/// container first if `idx` names a not-yet-existing slot), then, if the
/// insert was a genuine addition and pushed the container over the payload
/// threshold, pushes half its payloads down to its child or splits it.
///
/// `migrating` gates the overflow check. Every call site in this crate
/// passes `true` (see DESIGN.md's open-question ledger, item 5) but the
/// parameter is kept because it documents overflow handling as a distinct,
/// conditionally-skippable phase of this function rather than folding it in
/// unconditionally.
pub(crate) fn container_insert<K, V>(
    node: &mut Node<K, V>,
    idx: usize,
    new: Box<Payload<K, V>>,
    migrating: bool,
    ctx: &mut Ctx<K, V>,
) -> (InsertEffect, Vec<Promotion<K, V>>) {
    if idx >= node.containers.len() {
        node.containers.insert(idx, Container::empty());
    }

    let effect = node.containers[idx].insert(new, ctx);

    let mut promotions = Vec::new();
    if migrating
        && matches!(effect, InsertEffect::Inserted)
        && node.containers[idx].payload_size > ctx.config.payload_threshold
    {
        promotions = if node.containers[idx].child.is_some() {
            push_to_child(node, idx, ctx)
        } else {
            split_container(node, idx, ctx)
        };
    }
    (effect, promotions)
}

/// Splits an overflowing, childless container in two, inserting the new
/// sibling immediately after it, then checks whether `node` itself must now
/// split because it holds one more container.
fn split_container<K, V>(
    node: &mut Node<K, V>,
    idx: usize,
    ctx: &mut Ctx<K, V>,
) -> Vec<Promotion<K, V>> {
    let original_size = node.containers[idx].payload_size;
    let tail = node.containers[idx].split_off_tail();
    node.containers[idx].payload_size = original_size / 2;

    let sibling = Container {
        payload_first: tail,
        payload_size: original_size - original_size / 2,
        child: None,
    };
    node.containers.insert(idx + 1, sibling);

    match try_split_node(node, ctx) {
        Some(promotion) => vec![promotion],
        None => Vec::new(),
    }
}

/// Migrates roughly half of an overflowing container's payloads down into
/// its child, eliding tombstones along the way if deletes currently
/// outnumber live puts in the tree. Payloads that survive are reinserted
/// into the responsible child container under `migrating = true`, so any
/// further overflow cascades immediately instead of being deferred.
fn push_to_child<K, V>(node: &mut Node<K, V>, idx: usize, ctx: &mut Ctx<K, V>) -> Vec<Promotion<K, V>> {
    let push_count = node.containers[idx].payload_size / 2;
    let tombstone_dominant = ctx.counters.del_count > ctx.counters.put_count;

    let mut tail = node.containers[idx]
        .payload_first
        .as_mut()
        .and_then(|head| head.next.take());

    let mut remaining = push_count;
    let mut moved = 0usize;
    let mut last_found_idx = 0usize;
    let mut pending = Vec::new();

    while remaining > 0 {
        let mut current = match tail.take() {
            Some(p) => p,
            None => break,
        };
        tail = current.next.take();
        remaining -= 1;
        moved += 1;

        if tombstone_dominant && current.kind == PayloadKind::Del {
            ctx.counters.del_count = ctx.counters.del_count.saturating_sub(1);
            if let Some(destroy_key) = ctx.config.key_destructor.as_mut() {
                destroy_key(current.key);
            }
            continue;
        }

        current.next = None;
        let child = node.containers[idx]
            .child
            .as_deref_mut()
            .expect("push_to_child only runs on a container with a child");
        let child_idx = find_container(child, &current.key, last_found_idx, ctx.config.compare.as_ref());
        last_found_idx = child_idx;

        let (_effect, mut more) = container_insert(child, child_idx, current, true, ctx);
        pending.append(&mut more);
    }

    if let Some(head) = node.containers[idx].payload_first.as_mut() {
        head.next = tail;
    }
    node.containers[idx].payload_size -= moved;

    let mut bubbled = Vec::new();
    for promotion in pending {
        bubbled.append(&mut absorb_promotion(node, promotion, ctx));
    }
    bubbled
}

/// Splices a promoted container into `node` at the position immediately
/// after the container that previously owned its key range, reconciles
/// payload ownership between the two, and checks whether `node` itself must
/// now split in turn.
fn absorb_promotion<K, V>(
    node: &mut Node<K, V>,
    promotion: Promotion<K, V>,
    ctx: &mut Ctx<K, V>,
) -> Vec<Promotion<K, V>> {
    let owner_idx = {
        let key = promotion
            .container
            .first_key()
            .expect("a promoted container always carries at least one payload");
        find_container(node, key, 0, ctx.config.compare.as_ref())
    };
    let insert_idx = owner_idx + 1;
    node.containers.insert(insert_idx, promotion.container);

    // `order_container_payload` may itself cause further cascading splits
    // while reinserting displaced payloads; `node` having simply gained one
    // more container slot can independently push it over its own
    // threshold too, so both are checked.
    let mut bubbled = order_container_payload(node, owner_idx, insert_idx, ctx);
    if let Some(p) = try_split_node(node, ctx) {
        bubbled.push(p);
    }
    bubbled
}

/// If `node` now holds at least `container_threshold` containers, splits it
/// in half: the lower half stays in place, the container at the midpoint is
/// promoted (its child re-targeted to a brand new sibling node holding the
/// upper half) for the caller to splice into its own parent.
///
/// `promoted` may already own a child of its own, if it was itself promoted
/// by an earlier split (or is the root's synthetic leftmost container): that
/// subtree's keys fall in `promoted`'s own range, which becomes the new
/// sibling's leftmost slot, so it is carried forward as a synthetic empty
/// leftmost container there rather than being overwritten and dropped.
fn try_split_node<K, V>(node: &mut Node<K, V>, ctx: &mut Ctx<K, V>) -> Option<Promotion<K, V>> {
    if node.containers.len() < ctx.config.container_threshold {
        return None;
    }
    let mid = node.containers.len() / 2;
    let mut sibling_containers = node.containers.split_off(mid + 1);
    let mut promoted = node.containers.remove(mid);

    if let Some(old_child) = promoted.child.take() {
        sibling_containers.insert(0, Container::empty_with_child(*old_child));
    }

    promoted.child = Some(Box::new(Node {
        containers: sibling_containers,
    }));
    Some(Promotion { container: promoted })
}

/// Reconciles payload ownership between two adjacent containers after a
/// promoted container has been inserted at `right_idx`, right after the
/// container at `left_idx` that previously owned its whole range.
///
/// If `left` holds a payload with a key equal to `right`'s separator, that
/// payload is the authoritative one (it was written after the split point
/// was chosen) and is folded into `right`'s head. Every payload in `left`
/// from that point onward belongs to `right`'s range and is detached and
/// reinserted into `right` (or pushed further down through it) one at a
/// time, snapshotting each payload's own `next` pointer before reinserting
/// it so the reinsertion's own list surgery cannot invalidate our walk.
fn order_container_payload<K, V>(
    node: &mut Node<K, V>,
    left_idx: usize,
    right_idx: usize,
    ctx: &mut Ctx<K, V>,
) -> Vec<Promotion<K, V>> {
    let moving = {
        let (left_part, right_part) = node.containers.split_at_mut(right_idx);
        let left = &mut left_part[left_idx];
        let right = &mut right_part[0];

        let right_key = match right.first_key() {
            Some(k) => k,
            None => return Vec::new(),
        };
        let (cell, equal) =
            super::payload::locate_mut(&mut left.payload_first, right_key, ctx.config.compare.as_ref());

        if equal {
            let mut dup = cell.take().expect("equal implies a payload is present");
            let rest = dup.next.take();
            let right_head = right
                .payload_first
                .as_mut()
                .expect("right always has payloads once it is no longer transiently empty");

            let old_kind = right_head.kind;
            let old_value = std::mem::replace(&mut right_head.value, dup.value.take());
            right_head.kind = dup.kind;

            if old_kind != dup.kind {
                match dup.kind {
                    PayloadKind::Put => {
                        ctx.counters.del_count = ctx.counters.del_count.saturating_sub(1);
                        ctx.counters.put_count += 1;
                    }
                    PayloadKind::Del => {
                        ctx.counters.put_count = ctx.counters.put_count.saturating_sub(1);
                        ctx.counters.del_count += 1;
                    }
                }
            }

            if let Some(value) = old_value {
                if let Some(destroy_value) = ctx.config.value_destructor.as_mut() {
                    destroy_value(value);
                }
            }
            if let Some(destroy_key) = ctx.config.key_destructor.as_mut() {
                destroy_key(dup.key);
            }
            left.payload_size -= 1;
            *cell = rest;
        }
        cell.take()
    };

    let mut moving = moving;
    let mut moved_count = 0usize;
    let mut promotions = Vec::new();
    while let Some(mut payload) = moving {
        moving = payload.next.take();
        payload.next = None;
        moved_count += 1;
        let (_effect, mut more) = container_insert(node, right_idx, payload, true, ctx);
        promotions.append(&mut more);
    }
    node.containers[left_idx].payload_size -= moved_count;

    promotions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufferedTreeConfig;

    fn ctx(config: &mut BufferedTreeConfig<i32, &'static str>) -> Ctx<'_, i32, &'static str> {
        Ctx {
            config,
            counters: Box::leak(Box::new(super::super::Counters::default())),
        }
    }

    #[test]
    fn find_container_picks_rightmost_non_exceeding() {
        let node = Node {
            containers: vec![
                Container {
                    payload_first: Some(Payload::new_put(0, "a")),
                    payload_size: 1,
                    child: None,
                },
                Container {
                    payload_first: Some(Payload::new_put(10, "b")),
                    payload_size: 1,
                    child: None,
                },
                Container {
                    payload_first: Some(Payload::new_put(20, "c")),
                    payload_size: 1,
                    child: None,
                },
            ],
        };
        let compare: &dyn Fn(&i32, &i32) -> Ordering = &|a, b| a.cmp(b);
        assert_eq!(0, find_container(&node, &5, 0, compare));
        assert_eq!(1, find_container(&node, &10, 0, compare));
        assert_eq!(2, find_container(&node, &99, 0, compare));
    }

    #[test]
    fn container_insert_overflow_splits_childless_container() {
        let mut config = BufferedTreeConfig::<i32, &'static str>::default().payload_threshold(2);
        let mut node = Node { containers: Vec::new() };
        for k in 0..5 {
            let mut c = ctx(&mut config);
            container_insert(&mut node, 0, Payload::new_put(k, "v"), true, &mut c);
        }
        // Three puts past the threshold of 2 must have split the sole
        // container into at least two.
        assert!(node.containers.len() >= 2);
    }
}
