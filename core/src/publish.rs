//! The publish boundary — how completed readings leave the core.
//!
//! RULES:
//!   - The core never talks to a broker itself. Station tasks push
//!     readings into a channel; the publisher loop drains it and hands
//!     each record to whatever sink the process wired in.
//!   - A failed publish is logged and the reading dropped. A Reading is
//!     never requeued or retried once produced.

use crate::reading::Reading;
use crossbeam_channel::Receiver;

/// External transport boundary. Implementations own connection and retry
/// semantics; the core only reports one reading at a time.
pub trait PublishSink: Send {
    fn publish(&mut self, topic: &str, payload: &str) -> anyhow::Result<()>;
}

/// Serialize one reading and hand it to the sink.
pub fn publish_one(sink: &mut dyn PublishSink, reading: &Reading) {
    let payload = match serde_json::to_string(reading) {
        Ok(payload) => payload,
        Err(e) => {
            log::error!("station {}: reading serialization failed: {e}", reading.name);
            return;
        }
    };
    let topic = reading.topic();
    match sink.publish(&topic, &payload) {
        Ok(()) => log::debug!("{} published on {topic}", reading.name),
        Err(e) => log::warn!("publish failed on {topic}: {e}"),
    }
}

/// Drain the reading channel into the sink until every sender hangs up.
pub fn run_publisher(rx: Receiver<Reading>, sink: &mut dyn PublishSink) {
    for reading in rx.iter() {
        publish_one(sink, &reading);
    }
}
