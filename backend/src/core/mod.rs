//! Run timing primitives

pub mod time;
