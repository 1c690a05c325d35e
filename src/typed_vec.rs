/// Defines a `Debug` impl for an index newtype and, optionally, a slot arena
/// keyed by that index.
///
/// The arena hands out indices on insertion and recycles the slots of removed
/// elements, so its footprint follows the number of live elements rather than
/// the number ever inserted. An index is only meaningful until its element is
/// removed; after that the slot may be handed out again.
macro_rules! impl_typed_idx {
    ($idx_name:ident, $dbg_prefix:expr) => {
        impl std::fmt::Debug for $idx_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}_{}", $dbg_prefix, self.0)
            }
        }
    };
    ($arena_name:ident, $idx_name:ident, $dbg_prefix:expr) => {
        impl_typed_idx!($idx_name, $dbg_prefix);

        #[derive(Clone)]
        pub(crate) struct $arena_name<T> {
            slots: Vec<Option<T>>,
            free: Vec<usize>,
            len: usize,
        }

        impl<T> $arena_name<T> {
            /// The number of occupied slots.
            pub fn len(&self) -> usize {
                self.len
            }

            /// Stores a new element, returning its index.
            pub fn insert(&mut self, elt: T) -> $idx_name {
                self.len += 1;
                if let Some(slot) = self.free.pop() {
                    debug_assert!(self.slots[slot].is_none());
                    self.slots[slot] = Some(elt);
                    $idx_name(slot)
                } else {
                    self.slots.push(Some(elt));
                    $idx_name(self.slots.len() - 1)
                }
            }

            /// Removes the element at `idx`, making its slot available for reuse.
            pub fn remove(&mut self, idx: $idx_name) -> Option<T> {
                let elt = self.slots.get_mut(idx.0)?.take()?;
                self.free.push(idx.0);
                self.len -= 1;
                Some(elt)
            }

            /// Returns an iterator over indices and occupied slots.
            pub fn iter(&self) -> impl Iterator<Item = ($idx_name, &T)> + '_ {
                self.slots
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, t)| Some(($idx_name(idx), t.as_ref()?)))
            }

            /// Empties the arena, forgetting all slots.
            pub fn clear(&mut self) {
                self.slots.clear();
                self.free.clear();
                self.len = 0;
            }
        }

        impl<T> Default for $arena_name<T> {
            fn default() -> Self {
                Self {
                    slots: Vec::new(),
                    free: Vec::new(),
                    len: 0,
                }
            }
        }

        impl<T> std::ops::Index<$idx_name> for $arena_name<T> {
            type Output = T;

            fn index(&self, index: $idx_name) -> &Self::Output {
                self.slots[index.0]
                    .as_ref()
                    .unwrap_or_else(|| panic!("{index:?} is vacant"))
            }
        }

        impl<T> std::ops::IndexMut<$idx_name> for $arena_name<T> {
            fn index_mut(&mut self, index: $idx_name) -> &mut T {
                self.slots[index.0]
                    .as_mut()
                    .unwrap_or_else(|| panic!("{index:?} is vacant"))
            }
        }

        impl<T: std::fmt::Debug> std::fmt::Debug for $arena_name<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                struct Entry<'a, T> {
                    idx: $idx_name,
                    inner: &'a T,
                }

                impl<T: std::fmt::Debug> std::fmt::Debug for Entry<'_, T> {
                    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                        write!(f, "{idx:?}: {inner:?}", idx = self.idx, inner = self.inner,)
                    }
                }

                let mut list = f.debug_list();
                for (idx, inner) in self.iter() {
                    list.entry(&Entry { idx, inner });
                }
                list.finish()
            }
        }
    };
}
