//! SWIFT FIN message rendering: tag-formatted bodies for MT700 (issuance),
//! MT707 (amendment), and MT734 (refusal), plus the shared field formatting
//! and envelope helpers. Tag order inside each body is a wire contract.

pub mod format;
pub mod mt700;
pub mod mt707;
pub mod mt734;
