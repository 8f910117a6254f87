//! Payment Verification Engine
//!
//! The one subsystem here with real correctness hazards. Given a pending
//! order and one of its pending proofs, an administrator's decision must
//! atomically move proof → `verificado`, order → `pagado` and decrement
//! every touched inventory slot - or change nothing at all. Two concurrent
//! verifications drawing from the same slot must never jointly overdraw it.
//!
//! See [`VerificationEngine::resolve_payment`] for the contract.

mod engine;

#[cfg(test)]
mod tests;

pub use engine::{PaymentError, ResolvedPayment, VerificationEngine};
