// Live-instance counters, one per shape kind
//
// Each shape constructor asks a `Registry` for a `Registration` token and
// stores it. Creating the token increments the counter for that kind, dropping
// it decrements. Clones of the token are detached so copies of shapes are
// never counted (and never uncounted).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

/// Tag identifying which counter a shape belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Point,
    Segment,
    Circle,
    Rectangle,
    Triangle,
    Polygon,
    Parallelogram,
    Square,
    EquilateralTriangle,
    RegularHexagon,
}

/// Number of distinct shape kinds
pub const KIND_COUNT: usize = 10;

impl ShapeKind {
    /// Every kind, in the order counters are reported
    pub const ALL: [ShapeKind; KIND_COUNT] = [
        ShapeKind::Point,
        ShapeKind::Segment,
        ShapeKind::Circle,
        ShapeKind::Rectangle,
        ShapeKind::Triangle,
        ShapeKind::Polygon,
        ShapeKind::Parallelogram,
        ShapeKind::Square,
        ShapeKind::EquilateralTriangle,
        ShapeKind::RegularHexagon,
    ];

    /// Position of this kind's counter in the table
    fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name used in summaries and `describe()` output
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Point => "Point",
            ShapeKind::Segment => "Segment",
            ShapeKind::Circle => "Circle",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Polygon => "Polygon",
            ShapeKind::Parallelogram => "Parallelogram",
            ShapeKind::Square => "Square",
            ShapeKind::EquilateralTriangle => "EquilateralTriangle",
            ShapeKind::RegularHexagon => "RegularHexagon",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A table of live-instance counters
///
/// `Registry` is a handle: cloning it shares the same counters. Shapes built
/// with `new(...)` count against `Registry::global()`, shapes built with
/// `new_in(&registry, ...)` count against the given one. Tests use private
/// registries so parallel test threads never see each other's shapes.
///
/// **Rust Concept: Atomics instead of locks**
/// The demo renders phases on several rayon threads, so shapes get created and
/// dropped concurrently. `AtomicUsize` lets every thread bump a counter without
/// a `Mutex`, and `Arc` lets many tokens point at the same table.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    counters: Arc<[AtomicUsize; KIND_COUNT]>,
}

static GLOBAL_REGISTRY: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// Create an empty registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by the plain `new(...)` constructors
    pub fn global() -> &'static Registry {
        GLOBAL_REGISTRY.get_or_init(Registry::new)
    }

    /// Number of live, registered instances of `kind`
    pub fn count(&self, kind: ShapeKind) -> usize {
        self.counters[kind.index()].load(Ordering::Relaxed)
    }

    /// Sum of all counters
    pub fn total(&self) -> usize {
        ShapeKind::ALL.iter().map(|&kind| self.count(kind)).sum()
    }

    /// Current value of every counter, in `ShapeKind::ALL` order
    pub fn snapshot(&self) -> Vec<(ShapeKind, usize)> {
        ShapeKind::ALL
            .iter()
            .map(|&kind| (kind, self.count(kind)))
            .collect()
    }

    /// Count a new instance of `kind`; the count drops again when the returned
    /// token is dropped
    pub fn register(&self, kind: ShapeKind) -> Registration {
        let live = self.counters[kind.index()].fetch_add(1, Ordering::Relaxed) + 1;
        log::trace!("registered {} (live: {})", kind, live);
        Registration {
            slot: Some((self.clone(), kind)),
        }
    }

    fn unregister(&self, kind: ShapeKind) {
        let previous = self.counters[kind.index()].fetch_sub(1, Ordering::Relaxed);
        // Only registered tokens reach this, so the counter is at least 1.
        debug_assert!(previous > 0, "{} counter underflow", kind);
        log::trace!("unregistered {} (live: {})", kind, previous.saturating_sub(1));
    }
}

/// Summary line in the form `Point=1 Segment=0 Circle=2 ...`
impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (kind, count)) in self.snapshot().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", kind, count)?;
        }
        Ok(())
    }
}

/// Live count of `kind` in the global registry
pub fn instance_count(kind: ShapeKind) -> usize {
    Registry::global().count(kind)
}

/// Proof that one instance was counted
///
/// Owned by the shape it counts. Dropping the shape drops the token, which
/// decrements the counter exactly once.
#[derive(Debug)]
pub struct Registration {
    slot: Option<(Registry, ShapeKind)>,
}

impl Registration {
    /// A token that counts nothing (used for copies and for helper values
    /// owned by another shape)
    pub fn detached() -> Self {
        Self { slot: None }
    }

    /// Whether this token holds a counter slot
    pub fn is_registered(&self) -> bool {
        self.slot.is_some()
    }

    /// The kind this token counts, if any
    pub fn kind(&self) -> Option<ShapeKind> {
        self.slot.as_ref().map(|(_, kind)| *kind)
    }
}

/// Copies are not registered: only a constructor call counts.
impl Clone for Registration {
    fn clone(&self) -> Self {
        Registration::detached()
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some((registry, kind)) = self.slot.take() {
            registry.unregister(kind);
        }
    }
}
