//! Type aliases for shared handles.
//!
//! Bounds references read the current extent of an object that the rest of
//! the application keeps editing. These aliases name the two handle shapes
//! such an object can live behind.
//!
//! ## Usage
//!
//! ```rust
//! use millkit_core::types::{shared, Shared};
//!
//! let extent: Shared<[f64; 3]> = shared([0.0, 0.0, 0.0]);
//! extent.borrow_mut()[2] = 10.0;
//! assert_eq!(extent.borrow()[2], 10.0);
//! ```

use parking_lot::Mutex;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// The usual home of a model whose extent feeds a bounds reference in a
/// single-threaded UI.
pub type Shared<T> = Rc<RefCell<T>>;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex` for better performance than `std::sync::Mutex`.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// Create a new shared value
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Create a new thread-safe value
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
