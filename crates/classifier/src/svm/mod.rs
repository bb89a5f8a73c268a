//! Support-vector classification

mod svc;

pub use svc::{Kernel, Svc};
