//! Transport: listening socket and the sequential accept loop.

pub mod listener;
