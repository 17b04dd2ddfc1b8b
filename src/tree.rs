mod container;
mod node;
mod payload;


use crate::config::{BufferedTreeConfig, MIN_CONTAINER_THRESHOLD, MIN_PAYLOAD_THRESHOLD};
use crate::error::{Error, Result};
use container::{Container, InsertEffect};
use node::{Node, Promotion};
use payload::{Payload, PayloadKind};

/// Running totals of live Puts and Dels reachable from the root, maintained
/// incrementally so callers never have to walk the tree to answer "how many
/// keys does this hold".
#[derive(Default)]
pub(crate) struct Counters {
    pub(crate) put_count: usize,
    pub(crate) del_count: usize,
}

/// The host-supplied collaborators and structural thresholds, bundled with
/// the running counters, threaded through every node/container-level
/// function instead of being passed as a handful of loose parameters.
pub(crate) struct Ctx<'a, K, V> {
    pub(crate) config: &'a mut BufferedTreeConfig<K, V>,
    pub(crate) counters: &'a mut Counters,
}

/// An in-memory, ordered key-value index built as a buffered tree: a node
/// holds an ordered array of containers, each of which buffers recent writes
/// in a small linked list and optionally owns a child subtree that those
/// writes eventually migrate into.
///
/// `put`, `get`, and `del` are infallible once the tree is constructed; the
/// only fallible step is [`BufferedTree::create`], which validates the
/// configuration's structural thresholds.
pub struct BufferedTree<K, V> {
    root: Node<K, V>,
    height: usize,
    config: BufferedTreeConfig<K, V>,
    counters: Counters,
}

impl<K, V> BufferedTree<K, V> {
    /// Builds an empty tree from `config`, rejecting thresholds too small for
    /// the structural algorithms to make progress.
    pub fn create(config: BufferedTreeConfig<K, V>) -> Result<Self> {
        if config.container_threshold < MIN_CONTAINER_THRESHOLD {
            return Err(Error::ContainerThresholdTooSmall {
                min: MIN_CONTAINER_THRESHOLD,
                actual: config.container_threshold,
            });
        }
        if config.payload_threshold < MIN_PAYLOAD_THRESHOLD {
            return Err(Error::PayloadThresholdTooSmall {
                min: MIN_PAYLOAD_THRESHOLD,
                actual: config.payload_threshold,
            });
        }

        Ok(BufferedTree {
            root: Node {
                containers: Vec::with_capacity(config.default_container_capacity),
            },
            height: 1,
            config,
            counters: Counters::default(),
        })
    }

    /// Inserts or overwrites `key` with `value`.
    pub fn put(&mut self, key: K, value: V) {
        let payload = Payload::new_put(key, value);
        self.insert_payload(payload);
    }

    /// Records a tombstone for `key`. Subsequent [`BufferedTree::get`] calls
    /// for `key` return `None` until it is `put` again, even if an older,
    /// not-yet-migrated value for it is still buffered deeper in the tree.
    pub fn del(&mut self, key: K) {
        let payload = Payload::new_del(key);
        self.insert_payload(payload);
    }

    /// Looks up the live value for `key`, if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        node::get(&self.root, key, self.config.compare.as_ref())
    }

    /// Number of internal node levels, including the root. A freshly created
    /// tree has height 1.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Count of live (non-tombstoned) keys reachable from the root.
    pub fn put_count(&self) -> usize {
        self.counters.put_count
    }

    /// Count of tombstones reachable from the root.
    pub fn del_count(&self) -> usize {
        self.counters.del_count
    }

    fn insert_payload(&mut self, payload: Box<Payload<K, V>>) {
        let kind = payload.kind;
        let idx = node::find_container(&self.root, &payload.key, 0, self.config.compare.as_ref());

        let mut ctx = Ctx {
            config: &mut self.config,
            counters: &mut self.counters,
        };
        let (effect, promotions) = node::container_insert(&mut self.root, idx, payload, true, &mut ctx);

        if matches!(effect, InsertEffect::Inserted) {
            match kind {
                PayloadKind::Put => self.counters.put_count += 1,
                PayloadKind::Del => self.counters.del_count += 1,
            }
        }

        for promotion in promotions {
            self.absorb_root_promotion(promotion);
        }
    }

    /// A node split that bubbled all the way up past the root has nowhere
    /// left to be absorbed into: a brand new root is built instead, with a
    /// fresh, empty leftmost container whose child is the old root (demoted
    /// one level) and the promoted container installed right after it.
    fn absorb_root_promotion(&mut self, promotion: Promotion<K, V>) {
        let old_root = std::mem::replace(
            &mut self.root,
            Node {
                containers: Vec::new(),
            },
        );
        let leftmost = Container::empty_with_child(old_root);
        self.root.containers = vec![leftmost, promotion.container];
        self.height += 1;
    }
}

impl<K, V> Drop for BufferedTree<K, V> {
    fn drop(&mut self) {
        let root = std::mem::replace(
            &mut self.root,
            Node {
                containers: Vec::new(),
            },
        );
        let mut ctx = Ctx {
            config: &mut self.config,
            counters: &mut self.counters,
        };
        root.destroy(&mut ctx);
    }
}
