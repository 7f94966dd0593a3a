//! Capability discovery: one GetInfo exchange populating the tracker.

use ciborium::value::Value;
use f2t_core::{Command, DeviceInterface, Outcome, Status, TransportError};
use f2t_tracker::DeviceTracker;
use thiserror::Error;

/// GetInfo response keys this layer reads.
const KEY_VERSIONS: u64 = 0x01;
const KEY_EXTENSIONS: u64 = 0x02;
const KEY_OPTIONS: u64 = 0x04;

/// Failure to obtain or parse the discovery response. Run-aborting: without
/// a capability set no later check can be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("device rejected GetInfo with {}", .0.symbol())]
    Rejected(Status),

    #[error("GetInfo response is not a map")]
    NotAMap,

    #[error("GetInfo field {field} has the wrong shape")]
    MalformedField { field: &'static str },
}

fn parse_text_array(value: &Value, field: &'static str) -> Result<Vec<String>, DiscoveryError> {
    let Value::Array(items) = value else {
        return Err(DiscoveryError::MalformedField { field });
    };
    items
        .iter()
        .map(|item| match item {
            Value::Text(text) => Ok(text.clone()),
            _ => Err(DiscoveryError::MalformedField { field }),
        })
        .collect()
}

fn parse_options(value: &Value) -> Result<Vec<(String, bool)>, DiscoveryError> {
    let Value::Map(pairs) = value else {
        return Err(DiscoveryError::MalformedField { field: "options" });
    };
    pairs
        .iter()
        .map(|(key, option_value)| match (key, option_value) {
            (Value::Text(name), Value::Bool(flag)) => Ok((name.clone(), *flag)),
            _ => Err(DiscoveryError::MalformedField { field: "options" }),
        })
        .collect()
}

/// Send GetInfo and record the advertised capabilities on the tracker.
///
/// # Errors
/// [`DiscoveryError`] on transport failure, rejection, or a response map
/// whose versions/extensions/options fields have the wrong shape.
pub fn discover(
    device: &mut dyn DeviceInterface,
    tracker: &mut DeviceTracker,
) -> Result<(), DiscoveryError> {
    let outcome = device.send(Command::GetInfo, &[])?;
    let info = match outcome {
        Outcome::Value(value) => value,
        Outcome::Status(status) => return Err(DiscoveryError::Rejected(status)),
    };
    let Value::Map(pairs) = info else {
        return Err(DiscoveryError::NotAMap);
    };

    let mut versions = Vec::new();
    let mut extensions = Vec::new();
    let mut options = Vec::new();
    for (key, value) in &pairs {
        let Value::Integer(integer) = key else {
            continue;
        };
        match u64::try_from(i128::from(*integer)) {
            Ok(KEY_VERSIONS) => versions = parse_text_array(value, "versions")?,
            Ok(KEY_EXTENSIONS) => extensions = parse_text_array(value, "extensions")?,
            Ok(KEY_OPTIONS) => options = parse_options(value)?,
            _ => {}
        }
    }

    tracing::info!(
        versions = versions.len(),
        extensions = extensions.len(),
        options = options.len(),
        "device capabilities discovered"
    );
    tracker.initialize(versions, extensions, &options);
    Ok(())
}
