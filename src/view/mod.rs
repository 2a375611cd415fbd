//! View state: selection, URL route, responsive layout, and the
//! synchronizer that keeps them and the camera mutually consistent.

pub mod layout;
pub mod route;
pub mod selection;
pub mod sync;
