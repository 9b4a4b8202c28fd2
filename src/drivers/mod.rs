//! Board bring-up for the supported targets.

pub mod hw_init;
