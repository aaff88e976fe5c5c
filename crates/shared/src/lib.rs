//! Types shared by the intake core and its front ends: field identifiers,
//! error taxonomy and the outbound wire payload.

pub mod domain;
pub mod error;
pub mod protocol;
