//! Common types used throughout highroller.

pub mod casino;
