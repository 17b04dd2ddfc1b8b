use super::node::Node;
use super::payload::{self, Payload, PayloadKind};
use super::Ctx;

/// An ordered, deduplicated run of payloads, plus the (optional) subtree
/// covering the key range between this container's first key and the next
/// container's first key in its owning node.
pub(crate) struct Container<K, V> {
    pub(crate) payload_first: Option<Box<Payload<K, V>>>,
    pub(crate) payload_size: usize,
    pub(crate) child: Option<Box<Node<K, V>>>,
}

/// Outcome of splicing a payload into a container's list.
#[derive(PartialEq, Eq)]
pub(crate) enum InsertEffect {
    /// A genuinely new payload was spliced into the list.
    Inserted,
    /// An existing payload with the same key absorbed the new one.
    Replaced,
}

impl<K, V> Container<K, V> {
    pub(crate) fn empty() -> Self {
        Container {
            payload_first: None,
            payload_size: 0,
            child: None,
        }
    }

    /// A payload-less leftmost container whose sole purpose is to own
    /// `child`. Used when the root splits: the new root's own leftmost slot
    /// has never buffered anything directly (all writes before the split
    /// landed in what is now its child), so it starts genuinely empty and
    /// fills in the ordinary way as future writes land in it.
    pub(crate) fn empty_with_child(child: Node<K, V>) -> Self {
        Container {
            payload_first: None,
            payload_size: 0,
            child: Some(Box::new(child)),
        }
    }

    pub(crate) fn first_key(&self) -> Option<&K> {
        self.payload_first.as_ref().map(|p| &p.key)
    }

    pub(crate) fn get(&self, key: &K, compare: &dyn Fn(&K, &K) -> std::cmp::Ordering) -> Option<&Payload<K, V>> {
        payload::locate(&self.payload_first, key, compare)
    }

    /// Inserts `new`, replacing an existing payload with an equal key in
    /// place. Counter bookkeeping and destructor invocation for the
    /// replace case happen here, unconditionally: a replace can only ever
    /// be caused by two live `put`/`del` calls targeting the same key, never
    /// by migration (migration only ever relocates a payload that is still
    /// unique in the tree), so there is no ambiguity about attribution.
    pub(crate) fn insert(&mut self, new: Box<Payload<K, V>>, ctx: &mut Ctx<K, V>) -> InsertEffect {
        let Payload {
            key: new_key,
            value: new_value,
            kind: new_kind,
            ..
        } = *new;

        let (cell, equal) =
            payload::locate_mut(&mut self.payload_first, &new_key, ctx.config.compare.as_ref());

        if equal {
            let existing = cell.as_mut().expect("equal implies a payload is present");
            let old_kind = existing.kind;
            let old_value = std::mem::replace(&mut existing.value, new_value);
            existing.kind = new_kind;

            if old_kind != new_kind {
                match new_kind {
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
                destroy_key(new_key);
            }
            InsertEffect::Replaced
        } else {
            let mut fresh = Box::new(Payload {
                key: new_key,
                value: new_value,
                kind: new_kind,
                next: None,
            });
            fresh.next = cell.take();
            *cell = Some(fresh);
            self.payload_size += 1;
            InsertEffect::Inserted
        }
    }

    /// Detaches and returns everything from the `(payload_size / 2)`-th
    /// payload onward, keeping the first half in place. Used by container
    /// split; does not itself adjust `payload_size` on either half.
    pub(crate) fn split_off_tail(&mut self) -> Option<Box<Payload<K, V>>> {
        let keep = self.payload_size / 2;
        let mut cursor = &mut self.payload_first;
        for _ in 0..keep {
            match cursor.as_mut() {
                Some(node) => cursor = &mut node.next,
                None => return None,
            }
        }
        cursor.take()
    }
}
