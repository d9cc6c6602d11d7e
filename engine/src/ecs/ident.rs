//! Kind identity for everything stored in a world.
//!
//! Components, resources and states are all addressed by an [`Ident`]: a dense, process-wide
//! token resolved from the kind's [`std::any::TypeId`]. Resolution is memoized in a global
//! registry, so the first lookup of a kind allocates the next index and every later lookup is a
//! single concurrent map read.
//!
//! Because idents are dense they double as bit positions in entity signatures and query filters.
//!
//! # Example
//!
//! ```rust,ignore
//! let a = ident::of::<Position>();
//! let b = ident::of_val(&Position { x: 0.0, y: 0.0 });
//! assert_eq!(a, b);
//! assert_eq!(a.name(), "Position");
//! ```

use std::{
    any::{TypeId, type_name},
    fmt,
    sync::{
        LazyLock, PoisonError, RwLock,
        atomic::{AtomicU32, Ordering},
    },
};

use dashmap::DashMap;

/// Process-wide identity of a component, resource or state kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ident(u32);

impl Ident {
    /// Dense index of this kind, usable as a bit position or vector slot.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// The fully qualified Rust type name of the kind.
    pub fn type_name(&self) -> &'static str {
        REGISTRY.type_name(*self)
    }

    /// The type name with module paths stripped, e.g. `Counter` or `Wrapper<Inner>`.
    pub fn name(&self) -> String {
        short_name(self.type_name())
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Resolve the identity of kind `T`.
#[inline]
pub fn of<T: ?Sized + 'static>() -> Ident {
    REGISTRY.resolve::<T>()
}

/// Resolve the identity of the kind of `value`.
#[inline]
pub fn of_val<T: ?Sized + 'static>(_value: &T) -> Ident {
    REGISTRY.resolve::<T>()
}

/// Number of kinds resolved so far in this process.
pub fn resolved() -> usize {
    REGISTRY.next_id.load(Ordering::Relaxed) as usize
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

struct Registry {
    /// Rust type id to ident. Lock-free reads via the sharded map.
    idents: DashMap<TypeId, Ident>,

    /// Type names indexed by ident. Only written the first time a kind is seen.
    names: RwLock<Vec<Option<&'static str>>>,

    next_id: AtomicU32,
}

impl Registry {
    fn new() -> Self {
        Self {
            idents: DashMap::new(),
            names: RwLock::new(Vec::new()),
            next_id: AtomicU32::new(0),
        }
    }

    fn resolve<T: ?Sized + 'static>(&self) -> Ident {
        let type_id = TypeId::of::<T>();

        // Fast path: already known.
        if let Some(ident) = self.idents.get(&type_id) {
            return *ident;
        }

        match self.idents.entry(type_id) {
            dashmap::Entry::Occupied(occupied) => *occupied.get(),
            dashmap::Entry::Vacant(vacant) => {
                let ident = Ident(self.next_id.fetch_add(1, Ordering::Relaxed));

                let mut names = self.names.write().unwrap_or_else(PoisonError::into_inner);
                if ident.index() >= names.len() {
                    names.resize(ident.index() + 1, None);
                }
                names[ident.index()] = Some(type_name::<T>());
                vacant.insert(ident);

                ident
            }
        }
    }

    fn type_name(&self, ident: Ident) -> &'static str {
        let names = self.names.read().unwrap_or_else(PoisonError::into_inner);
        names.get(ident.index()).copied().flatten().unwrap_or("<unknown>")
    }
}

/// Strip module paths from every path segment of a type name.
pub(crate) fn short_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut start = 0;
    for (index, ch) in full.char_indices() {
        if matches!(ch, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';') {
            out.push_str(last_segment(&full[start..index]));
            out.push(ch);
            start = index + ch.len_utf8();
        }
    }
    out.push_str(last_segment(&full[start..]));
    out
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
