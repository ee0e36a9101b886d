//! Pure broadcast codec: `(topic, payload)` ⇄ [`Broadcast`].

use av_core::VehicleId;

use crate::channel::{signal_status_topic, vehicle_status_topic, Channel};
use crate::status::{Broadcast, TrafficSignalStatusMsg, VehicleStatusMsg};
use crate::{MsgError, MsgResult};

/// Decode one raw broadcast.
///
/// Fails — distinguishably — on a topic from neither channel, a malformed
/// sender segment, or an undecodable JSON payload.  Callers drop failures;
/// nothing here mutates state.
pub fn decode(topic: &str, payload: &[u8]) -> MsgResult<Broadcast> {
    match Channel::of_topic(topic) {
        None => Err(MsgError::UnknownTopic(topic.to_string())),

        Some((Channel::VehicleStatus, id)) => {
            let sender = id
                .parse::<u32>()
                .map(VehicleId)
                .map_err(|_| MsgError::BadSender(id.to_string()))?;
            let status: VehicleStatusMsg = serde_json::from_slice(payload)?;
            Ok(Broadcast::Vehicle { sender, status })
        }

        Some((Channel::TrafficSignalStatus, _)) => {
            let status: TrafficSignalStatusMsg = serde_json::from_slice(payload)?;
            Ok(Broadcast::TrafficSignal { status })
        }
    }
}

/// Encode a vehicle status broadcast as `(topic, payload)`.
pub fn encode_vehicle_status(
    sender: VehicleId,
    status: &VehicleStatusMsg,
) -> MsgResult<(String, Vec<u8>)> {
    let payload = serde_json::to_vec(status)?;
    Ok((vehicle_status_topic(sender), payload))
}

/// Encode a traffic signal status broadcast as `(topic, payload)`.
///
/// The publisher-id topic segment is the governed route code's textual form.
pub fn encode_signal_status(status: &TrafficSignalStatusMsg) -> MsgResult<(String, Vec<u8>)> {
    let payload = serde_json::to_vec(status)?;
    Ok((signal_status_topic(&status.route_code.to_string()), payload))
}
