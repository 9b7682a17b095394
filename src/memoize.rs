//! Call-result cache for pure functions.
//!
//! Results are keyed by the canonical JSON form of the arguments. Passing
//! the arguments as a tuple keeps the key order-sensitive, and maps are
//! written with sorted keys so equal arguments always produce equal keys.
//! The cache is unbounded and lives as long as the [`Memoize`] value.

use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum MemoizeError {
    #[error("Could not build cache key: {0}")]
    Key(#[from] serde_json::Error),
}

pub struct Memoize<A, R, F>
where
    F: Fn(&A) -> R,
{
    function: F,
    cache: RefCell<HashMap<String, Rc<R>>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
    _args: PhantomData<fn(&A)>,
}

pub fn memoize<A, R, F>(function: F) -> Memoize<A, R, F>
where
    A: Serialize,
    F: Fn(&A) -> R,
{
    Memoize::new(function)
}

/// Canonical, order-sensitive key for an argument list.
pub fn cache_key<A: Serialize>(args: &A) -> Result<String, MemoizeError> {
    let value = serde_json::to_value(args)?;
    Ok(value.to_string())
}

impl<A, R, F> Memoize<A, R, F>
where
    A: Serialize,
    F: Fn(&A) -> R,
{
    pub fn new(function: F) -> Self {
        Memoize {
            function,
            cache: RefCell::new(HashMap::new()),
            hits: Cell::new(0),
            misses: Cell::new(0),
            _args: PhantomData,
        }
    }

    /// Returns the cached result for `args`, computing it on first use.
    pub fn call(&self, args: &A) -> Result<Rc<R>, MemoizeError> {
        let key = cache_key(args)?;
        if let Some(result) = self.cache.borrow().get(&key) {
            self.hits.set(self.hits.get() + 1);
            trace!("Memoize hit for {}", key);
            return Ok(Rc::clone(result));
        }

        // The borrow above is released before calling out, so the wrapped
        // function may itself use other memoized functions.
        let result = Rc::new((self.function)(args));
        self.misses.set(self.misses.get() + 1);
        trace!("Memoize miss for {}", key);
        self.cache.borrow_mut().insert(key, Rc::clone(&result));
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits.get()
    }

    pub fn misses(&self) -> u64 {
        self.misses.get()
    }
}

impl<A, R, F> std::fmt::Debug for Memoize<A, R, F>
where
    F: Fn(&A) -> R,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memoize")
            .field("entries", &self.cache.borrow().len())
            .field("hits", &self.hits.get())
            .field("misses", &self.misses.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn invokes_function_once_per_argument_list() {
        let calls = Cell::new(0);
        let add = memoize(|(a, b): &(i32, i32)| {
            calls.set(calls.get() + 1);
            a + b
        });

        let first = add.call(&(1, 2)).unwrap();
        let second = add.call(&(1, 2)).unwrap();

        assert_eq!(*first, 3);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(calls.get(), 1);
        assert_eq!(add.hits(), 1);
        assert_eq!(add.misses(), 1);
    }

    #[test]
    fn argument_order_matters() {
        let calls = Cell::new(0);
        let sub = memoize(|(a, b): &(i32, i32)| {
            calls.set(calls.get() + 1);
            a - b
        });

        assert_eq!(*sub.call(&(5, 2)).unwrap(), 3);
        assert_eq!(*sub.call(&(2, 5)).unwrap(), -3);
        assert_eq!(calls.get(), 2);
        assert_eq!(sub.len(), 2);
    }

    #[test]
    fn keys_are_structural() {
        assert_eq!(cache_key(&(1, "a")).unwrap(), r#"[1,"a"]"#);
        assert_ne!(
            cache_key(&(1, "a")).unwrap(),
            cache_key(&("1", "a")).unwrap()
        );
    }

    #[test]
    fn map_arguments_have_canonical_keys() {
        let mut forward = HashMap::new();
        let mut backward = HashMap::new();
        for i in 0..16 {
            forward.insert(format!("k{}", i), i);
            backward.insert(format!("k{}", 15 - i), 15 - i);
        }
        let sorted: BTreeMap<String, i32> = forward.clone().into_iter().collect();

        assert_eq!(
            cache_key(&forward).unwrap(),
            cache_key(&backward).unwrap()
        );
        assert_eq!(cache_key(&forward).unwrap(), cache_key(&sorted).unwrap());
    }

    #[test]
    fn unserializable_arguments_are_rejected_without_calling() {
        let calls = Cell::new(0);
        let size = memoize(|m: &HashMap<(i32, i32), i32>| {
            calls.set(calls.get() + 1);
            m.len()
        });
        let mut args = HashMap::new();
        args.insert((1, 2), 3);

        assert!(matches!(size.call(&args), Err(MemoizeError::Key(_))));
        assert_eq!(calls.get(), 0);
        assert!(size.is_empty());
    }

    #[test]
    fn nested_memoized_calls_do_not_conflict() {
        let inner = memoize(|n: &u64| n * 2);
        let outer = memoize(|n: &u64| *inner.call(n).unwrap() + 1);

        assert_eq!(*outer.call(&4).unwrap(), 9);
        assert_eq!(*outer.call(&4).unwrap(), 9);
        assert_eq!(inner.misses(), 1);
        assert_eq!(outer.hits(), 1);
    }
}
