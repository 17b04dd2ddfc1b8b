use std::cmp::Ordering;

/// Minimum number of containers a node must be able to hold before it is
/// forced to split. Below this, `try_split_node` could never make progress.
pub const MIN_CONTAINER_THRESHOLD: usize = 2;

/// Minimum number of payloads a container must be able to hold before it is
/// forced to push down or split.
pub const MIN_PAYLOAD_THRESHOLD: usize = 1;

const DEFAULT_CONTAINER_THRESHOLD: usize = 8;
const DEFAULT_PAYLOAD_THRESHOLD: usize = 16;
const DEFAULT_CONTAINER_CAPACITY: usize = 4;

/// Configuration for a [`crate::BufferedTree`], bundling both the structural
/// thresholds and the host-supplied collaborators (comparator and optional
/// destructors) described in the buffered-tree design.
///
/// Construct with [`BufferedTreeConfig::default`] when `K: Ord`, or with
/// [`BufferedTreeConfig::with_comparator`] to supply a custom total order.
pub struct BufferedTreeConfig<K, V> {
    pub(crate) container_threshold: usize,
    pub(crate) payload_threshold: usize,
    pub(crate) default_container_capacity: usize,
    pub(crate) compare: Box<dyn Fn(&K, &K) -> Ordering>,
    pub(crate) key_destructor: Option<Box<dyn FnMut(K)>>,
    pub(crate) value_destructor: Option<Box<dyn FnMut(V)>>,
}

impl<K, V> Default for BufferedTreeConfig<K, V>
where
    K: Ord + 'static,
    V: 'static,
{
    fn default() -> Self {
        Self::with_comparator(|a, b| a.cmp(b))
    }
}

impl<K, V> BufferedTreeConfig<K, V> {
    /// Create a configuration with a custom key comparator.
    ///
    /// Use this when `K` does not implement [`Ord`], or when a non-default
    /// total order over the key domain is needed.
    pub fn with_comparator(compare: impl Fn(&K, &K) -> Ordering + 'static) -> Self {
        Self {
            container_threshold: DEFAULT_CONTAINER_THRESHOLD,
            payload_threshold: DEFAULT_PAYLOAD_THRESHOLD,
            default_container_capacity: DEFAULT_CONTAINER_CAPACITY,
            compare: Box::new(compare),
            key_destructor: None,
            value_destructor: None,
        }
    }

    /// Sets the number of containers a node may hold before it must split.
    pub fn container_threshold(mut self, container_threshold: usize) -> Self {
        self.container_threshold = container_threshold;
        self
    }

    /// Sets the number of payloads a container may hold before it must push
    /// down to its child (or split, if it has none).
    pub fn payload_threshold(mut self, payload_threshold: usize) -> Self {
        self.payload_threshold = payload_threshold;
        self
    }

    /// Sets the initial container-array capacity reserved per node.
    pub fn default_container_capacity(mut self, default_container_capacity: usize) -> Self {
        self.default_container_capacity = default_container_capacity;
        self
    }

    /// Registers a destructor invoked exactly once when an owned key is
    /// freed or replaced.
    pub fn key_destructor(mut self, destructor: impl FnMut(K) + 'static) -> Self {
        self.key_destructor = Some(Box::new(destructor));
        self
    }

    /// Registers a destructor invoked exactly once when an owned value is
    /// freed or replaced.
    pub fn value_destructor(mut self, destructor: impl FnMut(V) + 'static) -> Self {
        self.value_destructor = Some(Box::new(destructor));
        self
    }
}
