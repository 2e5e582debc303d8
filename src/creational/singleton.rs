// Singleton
//
// Intent: make sure a type has only one instance and give it a global access
// point. `OnceLock` replaces double-checked locking: initialisation runs
// exactly once even when several threads race for it.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;
use std::thread;

use tracing::{debug, info};

use crate::transcript::Transcript;

#[derive(Debug)]
pub struct Singleton {
    value: String,
}

impl Singleton {
    /// Returns the process-wide instance. The value passed by the first caller
    /// wins; later values are ignored.
    pub fn instance(value: &str) -> &'static Singleton {
        static INSTANCE: SingletonCell = SingletonCell::new();
        INSTANCE.get_or_init(value)
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Storage for one lazily created [`Singleton`]. Usable in a `static`.
pub struct SingletonCell {
    cell: OnceLock<Singleton>,
}

impl SingletonCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub fn get_or_init(&self, value: &str) -> &Singleton {
        self.cell.get_or_init(|| {
            info!(value, "creating singleton instance");
            Singleton {
                value: value.to_string(),
            }
        })
    }

    pub fn get(&self) -> Option<&Singleton> {
        self.cell.get()
    }
}

impl Default for SingletonCell {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Non-thread-safe variant
// ============================================================================

thread_local! {
    static LOCAL_INSTANCE: RefCell<Option<Rc<LocalSingleton>>> = RefCell::new(None);
}

/// Lazily created without any synchronisation, so it can only be a
/// per-thread singleton.
#[derive(Debug)]
pub struct LocalSingleton {
    value: String,
}

impl LocalSingleton {
    pub fn instance(value: &str) -> Rc<LocalSingleton> {
        LOCAL_INSTANCE.with(|slot| {
            slot.borrow_mut()
                .get_or_insert_with(|| {
                    debug!(value, "creating thread-local singleton");
                    Rc::new(LocalSingleton {
                        value: value.to_string(),
                    })
                })
                .clone()
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

// ============================================================================
// Demos
// ============================================================================

pub fn conceptual_demo() -> Transcript {
    static DEMO: SingletonCell = SingletonCell::new();
    let mut out = Transcript::new();

    let a = LocalSingleton::instance("Initial Value");
    out.line(format!("Non-Thread-Safe Singleton Value: {}", a.value()));
    let b = LocalSingleton::instance("New Value");
    out.line(format!("Non-Thread-Safe Singleton Value: {}", b.value()));

    let c = DEMO.get_or_init("Initial Value");
    out.line(format!("Thread-Safe Singleton Value: {}", c.value()));
    let d = DEMO.get_or_init("New Value");
    out.line(format!("Thread-Safe Singleton Value: {}", d.value()));
    out
}

/// Asks for the instance from one thread per value and reports what each
/// thread saw.
pub fn observe_from_threads(cell: &SingletonCell, values: &[String]) -> Vec<String> {
    thread::scope(|scope| {
        let handles: Vec<_> = values
            .iter()
            .map(|value| scope.spawn(move || cell.get_or_init(value).value().to_string()))
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| "<thread panicked>".to_string())
            })
            .collect()
    })
}

pub fn real_world_demo(values: &[String]) -> Transcript {
    static SHARED: SingletonCell = SingletonCell::new();

    let mut out = Transcript::new();
    out.line("If you see the same value, then singleton was reused (yay!)");
    out.line("If you see different values, then 2 singletons were created (booo!!)");
    out.blank();
    out.line("RESULT:");

    let seen = observe_from_threads(&SHARED, values);
    let all_same = seen.windows(2).all(|w| w[0] == w[1]);
    out.lines(seen);
    out.line(format!("All threads saw one instance: {}", all_same));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        static CELL: SingletonCell = SingletonCell::new();
        assert!(CELL.get().is_none());

        let first = CELL.get_or_init("first");
        let second = CELL.get_or_init("second");

        assert_eq!(second.value(), "first");
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_threads_share_one_instance() {
        static CELL: SingletonCell = SingletonCell::new();
        let values: Vec<String> = (0..8).map(|i| format!("value-{i}")).collect();

        let seen = observe_from_threads(&CELL, &values);

        assert_eq!(seen.len(), values.len());
        assert!(seen.iter().all(|v| v == &seen[0]));
        assert!(values.contains(&seen[0]));
    }

    #[test]
    fn test_global_instance_is_stable() {
        let a = Singleton::instance("whatever");
        let b = Singleton::instance("something else");
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_local_singleton_is_per_thread() {
        let first = thread::spawn(|| {
            let here = LocalSingleton::instance("first thread");
            let again = LocalSingleton::instance("ignored");
            assert!(Rc::ptr_eq(&here, &again));
            again.value().to_string()
        })
        .join()
        .unwrap();

        let other = thread::spawn(|| LocalSingleton::instance("other thread").value().to_string())
            .join()
            .unwrap();

        assert_eq!(first, "first thread");
        assert_eq!(other, "other thread");
    }

    #[test]
    fn test_real_world_demo_reports_agreement() {
        let values = vec!["FOO".to_string(), "BAR".to_string()];
        let out = real_world_demo(&values);
        assert!(out.contains("All threads saw one instance: true"));
    }
}
