//! Device and sensor capability tags.
//!
//! The remote API speaks in integer bit-flags; these enums keep the wire
//! values in one place so the rest of the crate works with named tags.

/// A command a device can support or report as its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceMethod {
    TurnOn,
    TurnOff,
    Bell,
    Dim,
    Up,
    Down,
}

impl DeviceMethod {
    /// Wire bit for the `supportedMethods` filter and `method` parameter.
    pub const fn bit(self) -> u32 {
        match self {
            DeviceMethod::TurnOn => 1,
            DeviceMethod::TurnOff => 2,
            DeviceMethod::Bell => 4,
            DeviceMethod::Dim => 16,
            DeviceMethod::Up => 128,
            DeviceMethod::Down => 256,
        }
    }

    /// Human verb used in status lines.
    pub const fn command_name(self) -> &'static str {
        match self {
            DeviceMethod::TurnOn => "on",
            DeviceMethod::TurnOff => "off",
            DeviceMethod::Bell => "bell",
            DeviceMethod::Dim => "dim",
            DeviceMethod::Up => "up",
            DeviceMethod::Down => "down",
        }
    }
}

/// Methods the tool knows how to issue; used as the device listing filter.
pub const SUPPORTED_METHODS: &[DeviceMethod] = &[
    DeviceMethod::TurnOn,
    DeviceMethod::TurnOff,
    DeviceMethod::Bell,
    DeviceMethod::Dim,
    DeviceMethod::Up,
    DeviceMethod::Down,
];

/// A reading a sensor can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorCapability {
    Temperature,
    Humidity,
    RainRate,
    RainTotal,
    WindDirection,
    WindAverage,
    WindGust,
}

impl SensorCapability {
    pub const fn bit(self) -> u32 {
        match self {
            SensorCapability::Temperature => 1,
            SensorCapability::Humidity => 2,
            SensorCapability::RainRate => 4,
            SensorCapability::RainTotal => 8,
            SensorCapability::WindDirection => 16,
            SensorCapability::WindAverage => 32,
            SensorCapability::WindGust => 64,
        }
    }
}

/// Readings the tool displays; used as the sensor listing filter.
pub const SUPPORTED_SENSOR_CAPABILITIES: &[SensorCapability] =
    &[SensorCapability::Temperature, SensorCapability::Humidity];

/// Fold a set of device methods into the wire mask.
pub fn methods_mask(methods: &[DeviceMethod]) -> u32 {
    methods.iter().fold(0, |mask, m| mask | m.bit())
}

/// Fold a set of sensor capabilities into the wire mask.
pub fn sensor_capabilities_mask(caps: &[SensorCapability]) -> u32 {
    caps.iter().fold(0, |mask, c| mask | c.bit())
}

/// Decode the `state` integer a device listing reports.
pub fn state_label(state: u64) -> &'static str {
    match state {
        s if s == DeviceMethod::TurnOn.bit() as u64 => "ON",
        s if s == DeviceMethod::TurnOff.bit() as u64 => "OFF",
        s if s == DeviceMethod::Dim.bit() as u64 => "DIMMED",
        s if s == DeviceMethod::Up.bit() as u64 => "UP",
        s if s == DeviceMethod::Down.bit() as u64 => "DOWN",
        _ => "Unknown state",
    }
}
