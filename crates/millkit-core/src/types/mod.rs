//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Type aliases for `Rc<RefCell<T>>` and `Arc<Mutex<T>>` handles
//!   used to bind bounds references to live model objects.

pub mod aliases;

pub use aliases::*;
