//! `av-msg` — status broadcast channels and payload codec for the `rust_av`
//! framework.
//!
//! # Design
//!
//! Two logical channels exist on the shared transport: every vehicle
//! broadcasts its [`VehicleStatusMsg`] and every traffic signal its
//! [`TrafficSignalStatusMsg`].  A raw broadcast is a `(topic, payload)` pair;
//! [`decode`] maps it in one pure step to a tagged [`Broadcast`] variant, or
//! to a [`MsgError`] the caller can drop-and-log.  There is no substring
//! matching anywhere: topic routing is the [`Channel`] enum plus an explicit
//! match.
//!
//! Payloads are JSON; the schema is just the serde derive of the status
//! structs.
//!
//! # Modules
//!
//! | Module    | Contents                                            |
//! |-----------|-----------------------------------------------------|
//! | `channel` | [`Channel`], topic building and parsing             |
//! | `status`  | [`SignalState`], status payload structs, [`Broadcast`] |
//! | `codec`   | [`decode`], [`encode_vehicle_status`], [`encode_signal_status`] |
//! | `error`   | [`MsgError`]                                        |

pub mod channel;
pub mod codec;
pub mod error;
pub mod status;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use channel::Channel;
pub use codec::{decode, encode_signal_status, encode_vehicle_status};
pub use error::{MsgError, MsgResult};
pub use status::{Broadcast, SignalState, TrafficSignalStatusMsg, VehicleStatusMsg};
