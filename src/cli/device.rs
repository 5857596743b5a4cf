use serde_json::Value;

use crate::api::ApiClient;
use crate::devices::DeviceMethod;
use crate::error::TdtoolError;

use super::output::field_text;

/// Send one command to a device.
///
/// Always two calls: `device/info` first, then `device/command` — the
/// listing is never trusted for a device about to be actuated. An `error`
/// payload from either call lands verbatim in the status line; it is a
/// normal outcome of the exchange, not a failure of this invocation.
pub async fn run_device_action(
    client: &ApiClient,
    device_id: &str,
    method: DeviceMethod,
    dim_level: Option<u8>,
) -> Result<(), TdtoolError> {
    let info = client
        .request("device/info", vec![("id", device_id.into())])
        .await?;

    let value = i64::from(dim_level.unwrap_or(0));
    let (name, status) = if let Some(err) = info.get("error").and_then(Value::as_str) {
        (String::new(), err.to_string())
    } else {
        let name = field_text(&info, "name");
        let response = client
            .request(
                "device/command",
                vec![
                    ("id", device_id.into()),
                    ("method", method.bit().into()),
                    ("value", value.into()),
                ],
            )
            .await?;
        let status = match response.get("error").and_then(Value::as_str) {
            Some(err) => err.to_string(),
            None => field_text(&response, "status"),
        };
        (name, status)
    };

    println!(
        "{}",
        action_message(method, device_id, &name, value, &status)
    );
    Ok(())
}

/// Status line for a completed (or refused) device command.
pub(crate) fn action_message(
    method: DeviceMethod,
    device_id: &str,
    name: &str,
    value: i64,
    status: &str,
) -> String {
    match method {
        DeviceMethod::TurnOn | DeviceMethod::TurnOff => format!(
            "Turning {} device {}, {} - {}",
            method.command_name(),
            device_id,
            name,
            status
        ),
        DeviceMethod::Bell | DeviceMethod::Up | DeviceMethod::Down => format!(
            "Sending {} to: {} {} - {}",
            method.command_name(),
            device_id,
            name,
            status
        ),
        DeviceMethod::Dim => {
            format!("Dimming device: {device_id} {name} to {value} - {status}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_on_message() {
        assert_eq!(
            action_message(DeviceMethod::TurnOn, "3", "Kitchen", 0, "success"),
            "Turning on device 3, Kitchen - success"
        );
    }

    #[test]
    fn bell_message() {
        assert_eq!(
            action_message(DeviceMethod::Bell, "7", "Door", 0, "success"),
            "Sending bell to: 7 Door - success"
        );
    }

    #[test]
    fn dim_message_includes_level() {
        assert_eq!(
            action_message(DeviceMethod::Dim, "2", "Lamp", 128, "success"),
            "Dimming device: 2 Lamp to 128 - success"
        );
    }

    #[test]
    fn error_status_goes_verbatim_into_the_line() {
        assert_eq!(
            action_message(DeviceMethod::TurnOff, "9", "", 0, "Invalid token"),
            "Turning off device 9,  - Invalid token"
        );
    }
}
