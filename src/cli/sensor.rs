use serde_json::Value;

use crate::api::ApiClient;
use crate::error::TdtoolError;

use super::output::{field_text, ljust, title_case};

/// Fetch and print one sensor's readings.
///
/// An `error` payload is a failed lookup and aborts the invocation.
pub async fn run_sensor(client: &ApiClient, sensor_id: &str) -> Result<(), TdtoolError> {
    let response = client
        .request("sensor/info", vec![("id", sensor_id.into())])
        .await?;

    if let Some(err) = response.get("error").and_then(Value::as_str) {
        return Err(TdtoolError::SensorNotFound(err.to_string()));
    }

    print!("{}", render_sensor(&response));
    Ok(())
}

/// Format the sensor block: id and name, then one row per reading with
/// its unit (degree sign for `temp`, percent for `humidity`).
pub(crate) fn render_sensor(response: &Value) -> String {
    let mut out = format!(
        "{} {}\n",
        field_text(response, "id"),
        field_text(response, "name")
    );

    if let Some(data) = response.get("data").and_then(Value::as_array) {
        for reading in data {
            let name = field_text(reading, "name");
            let unit = match name.as_str() {
                "temp" => "\u{00B0}",
                "humidity" => "%",
                _ => "",
            };
            out.push_str(&format!(
                "\t{}\t{}{}\n",
                ljust(&title_case(&name), 30),
                field_text(reading, "value"),
                unit
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_sensor_with_readings() {
        let response = json!({
            "id": 5,
            "name": "Greenhouse",
            "data": [
                {"name": "temp", "value": "21.4"},
                {"name": "humidity", "value": "58"}
            ]
        });
        let out = render_sensor(&response);
        assert!(out.starts_with("5 Greenhouse\n"));
        assert!(out.contains("Temp"));
        assert!(out.contains("21.4\u{00B0}"));
        assert!(out.contains("58%"));
    }

    #[test]
    fn render_sensor_unknown_reading_has_no_unit() {
        let response = json!({
            "id": 1,
            "name": "Roof",
            "data": [{"name": "rainrate", "value": "0.2"}]
        });
        let out = render_sensor(&response);
        assert!(out.contains("Rainrate"));
        assert!(out.contains("0.2\n"));
    }

    #[test]
    fn render_sensor_without_data() {
        let response = json!({"id": 2, "name": "Bare"});
        assert_eq!(render_sensor(&response), "2 Bare\n");
    }
}
