//! Core time primitives shared by the generator and the linker

pub mod time;
