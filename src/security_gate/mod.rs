//! Security gate core: scan data model, scan parameter building and the
//! baseline/head delta computation. Pure, synchronous, no I/O.
pub mod domain;
pub mod services;
