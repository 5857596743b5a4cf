use std::io::IsTerminal;

use serde_json::Value;

use crate::api::ApiClient;
use crate::devices::{
    methods_mask, sensor_capabilities_mask, state_label, SUPPORTED_METHODS,
    SUPPORTED_SENSOR_CAPABILITIES,
};
use crate::error::TdtoolError;

use super::output::{field_text, ljust, state_display};
use super::sensor::run_sensor;

/// List configured devices and sensors.
///
/// Devices are filtered to the method set the tool can issue; sensors to
/// the readings it can display.
pub async fn run_list(client: &ApiClient) -> Result<(), TdtoolError> {
    let devices = client
        .request(
            "devices/list",
            vec![("supportedMethods", methods_mask(SUPPORTED_METHODS).into())],
        )
        .await?;
    if let Some(err) = devices.get("error").and_then(Value::as_str) {
        return Err(TdtoolError::RemoteOperation(err.to_string()));
    }

    let sensors = client
        .request(
            "sensors/list",
            vec![(
                "supportedMethods",
                sensor_capabilities_mask(SUPPORTED_SENSOR_CAPABILITIES).into(),
            )],
        )
        .await?;
    if let Some(err) = sensors.get("error").and_then(Value::as_str) {
        return Err(TdtoolError::RemoteOperation(err.to_string()));
    }

    let is_tty = std::io::stdout().is_terminal();
    let device_rows = devices
        .get("device")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    println!("Number of devices: {}", device_rows.len());
    for device in &device_rows {
        let state = state_label(device.get("state").and_then(Value::as_u64).unwrap_or(0));
        println!(
            "{}\t{}\t{}",
            field_text(device, "id"),
            ljust(&field_text(device, "name"), 30),
            state_display(state, is_tty)
        );
    }

    let sensor_rows = sensors
        .get("sensor")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    println!("\nNumber of sensors: {}", sensor_rows.len());
    for sensor in &sensor_rows {
        run_sensor(client, &field_text(sensor, "id")).await?;
    }

    Ok(())
}
