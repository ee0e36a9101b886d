//! The two logical broadcast channels and their topic naming.
//!
//! Topic shape: `<channel root>/<publisher id>`.  The publisher id segment is
//! a vehicle id for vehicle status and a free-form signal name for signal
//! status (signal payloads carry their own route code, so the segment is
//! informational there).

use av_core::VehicleId;

/// One of the two logical channels every agent subscribes to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Channel {
    VehicleStatus,
    TrafficSignalStatus,
}

impl Channel {
    pub const VEHICLE_STATUS_ROOT: &'static str = "/vehicle_status";
    pub const TRAFFIC_SIGNAL_ROOT: &'static str = "/traffic_signal_status";

    /// Classify a topic string.
    ///
    /// Returns the channel and the publisher-id segment, or `None` for a
    /// topic on neither channel.
    pub fn of_topic(topic: &str) -> Option<(Channel, &str)> {
        if let Some(id) = strip_root(topic, Self::VEHICLE_STATUS_ROOT) {
            return Some((Channel::VehicleStatus, id));
        }
        if let Some(id) = strip_root(topic, Self::TRAFFIC_SIGNAL_ROOT) {
            return Some((Channel::TrafficSignalStatus, id));
        }
        None
    }

    /// The channel's topic root.
    pub fn root(self) -> &'static str {
        match self {
            Channel::VehicleStatus => Self::VEHICLE_STATUS_ROOT,
            Channel::TrafficSignalStatus => Self::TRAFFIC_SIGNAL_ROOT,
        }
    }
}

/// Topic on which `vehicle` publishes its status.
pub fn vehicle_status_topic(vehicle: VehicleId) -> String {
    format!("{}/{}", Channel::VEHICLE_STATUS_ROOT, vehicle.0)
}

/// Topic on which a signal publishes its status; `name` identifies the
/// publisher (conventionally the governed route code's textual form).
pub fn signal_status_topic(name: &str) -> String {
    format!("{}/{}", Channel::TRAFFIC_SIGNAL_ROOT, name)
}

fn strip_root<'a>(topic: &'a str, root: &str) -> Option<&'a str> {
    topic.strip_prefix(root)?.strip_prefix('/')
}
