//! Straight-through processing engines for letter of credit issuance.
//!
//! The crate is organised the same way the surrounding bank systems consume it:
//! pure rule/templating engines under [`workflows::issuance`], a deterministic
//! KYC stand-in under [`workflows::kyc`], and thin ambient concerns (config,
//! telemetry, errors) at the root. Engines never touch the clock, the network,
//! or the filesystem; the only I/O lives in the outbox gateway and the
//! repository implementations supplied by callers.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
