//! Message types exchanged between systems and the host.
//!
//! Submodules:
//! - [`audio`] – sound cue commands forwarded to the host's audio service
pub mod audio;
