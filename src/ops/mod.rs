//! One module per public operation, mirroring the facade's own surface.
//! [`traverse`] holds the fast/safe descent shared by all three.

pub(crate) mod get;
pub(crate) mod insert;
pub(crate) mod remove;
mod traverse;

pub(crate) use traverse::locate;
