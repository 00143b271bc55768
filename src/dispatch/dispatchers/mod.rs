//! [`Dispatcher`](crate::Dispatcher) implementations.

mod null;
pub use null::*;

#[cfg(any(test, feature = "mock"))]
#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
mod mock;
#[cfg(any(test, feature = "mock"))]
pub use mock::*;
