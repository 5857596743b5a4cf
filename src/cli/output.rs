use colored::Colorize;
use serde_json::Value;

/// Read a payload field as display text, whether the API sent a string
/// or a number.
pub fn field_text(payload: &Value, key: &str) -> String {
    match payload.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Left-justify to `width`, mirroring the classic column layout.
pub fn ljust(s: &str, width: usize) -> String {
    if s.len() >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - s.len()))
    }
}

/// Uppercase the first letter of each word (`temp` -> `Temp`).
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Colorize a device state label when writing to a terminal.
pub fn state_display(label: &str, is_tty: bool) -> String {
    if !is_tty {
        return label.to_string();
    }
    match label {
        "ON" => label.green().to_string(),
        "OFF" => label.red().to_string(),
        "DIMMED" => label.yellow().to_string(),
        _ => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_text_string() {
        let payload = json!({"name": "Kitchen"});
        assert_eq!(field_text(&payload, "name"), "Kitchen");
    }

    #[test]
    fn field_text_number() {
        let payload = json!({"id": 3});
        assert_eq!(field_text(&payload, "id"), "3");
    }

    #[test]
    fn field_text_missing_is_empty() {
        let payload = json!({});
        assert_eq!(field_text(&payload, "name"), "");
    }

    #[test]
    fn ljust_pads_short_strings() {
        assert_eq!(ljust("abc", 6), "abc   ");
    }

    #[test]
    fn ljust_leaves_long_strings() {
        assert_eq!(ljust("abcdefgh", 4), "abcdefgh");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("temp"), "Temp");
        assert_eq!(title_case("wind gust"), "Wind Gust");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn state_display_plain_without_tty() {
        assert_eq!(state_display("ON", false), "ON");
        assert_eq!(state_display("Unknown state", true), "Unknown state");
    }
}
