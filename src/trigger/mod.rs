//! Check-request triggers: the periodic ticker and the external-event
//! handler. Both obey the same contract: set the latch, never block, never
//! perform the check themselves.

pub mod input;
pub mod periodic;
