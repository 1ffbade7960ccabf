use crate::profile::{DeviceKind, ThermostatMode};
use chrono::Utc;
use pulse_types::{CommandRequest, CommandResponse, StatusUpdate, TelemetryFrame};
use rand::Rng;

/// 环境温度，温控器关机时向它回落
const AMBIENT_TEMPERATURE: f64 = 21.0;

/// 模拟设备
///
/// 状态随时间漂移，响应控制指令，产生状态与遥测载荷。
#[derive(Debug, Clone)]
pub struct SimDevice {
    device_id: String,
    kind: DeviceKind,
    name: String,
    power_on: bool,
    brightness: f64,
    color: String,
    power_usage: f64,
    current_temperature: f64,
    target_temperature: f64,
    humidity: f64,
    pressure: f64,
    battery_level: f64,
    mode: ThermostatMode,
}

impl SimDevice {
    pub fn new(kind: DeviceKind) -> Self {
        let device_id = format!("dev_{}", uuid::Uuid::new_v4().simple());
        Self::with_id(device_id, kind)
    }

    pub fn with_id(device_id: impl Into<String>, kind: DeviceKind) -> Self {
        let device_id = device_id.into();
        let short = device_id.chars().take(10).collect::<String>();
        Self {
            name: format!("{} {}", kind.as_str(), short),
            device_id,
            kind,
            power_on: false,
            brightness: 50.0,
            color: "#ffffff".to_string(),
            power_usage: 0.0,
            current_temperature: 22.0,
            target_temperature: 22.0,
            humidity: 40.0,
            pressure: 1013.25,
            battery_level: 100.0,
            mode: ThermostatMode::Off,
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 当前状态载荷
    pub fn status_update(&self, online: bool) -> StatusUpdate {
        StatusUpdate::new(if online { "online" } else { "offline" })
            .with_timestamp(Utc::now())
    }

    /// 当前遥测帧
    pub fn telemetry_frame(&self) -> TelemetryFrame {
        let power_state = if self.power_on { 1.0 } else { 0.0 };
        let mut frame = TelemetryFrame::new(Utc::now());

        match self.kind {
            DeviceKind::Light => {
                frame = frame
                    .with_reading("power_state", power_state)
                    .with_reading("brightness", self.brightness)
                    .with_reading("power_usage", self.power_usage);
                // 颜色不是数值，留给显示层，不进图表
                frame
                    .readings
                    .insert("color".to_string(), self.color.as_str().into());
            }
            DeviceKind::Thermostat => {
                frame = frame
                    .with_reading("power_state", power_state)
                    .with_reading("current_temperature", round2(self.current_temperature))
                    .with_reading("target_temperature", self.target_temperature)
                    .with_reading("humidity", round2(self.humidity));
                // 工作模式不是数值，留给显示层，不进图表
                frame
                    .readings
                    .insert("mode".to_string(), self.mode.as_str().into());
            }
            DeviceKind::Switch => {
                frame = frame
                    .with_reading("power_state", power_state)
                    .with_reading("power_usage", self.power_usage);
            }
            DeviceKind::Sensor => {
                frame = frame
                    .with_reading("temperature", round2(self.current_temperature))
                    .with_reading("humidity", round2(self.humidity))
                    .with_reading("pressure", round2(self.pressure))
                    .with_reading("battery_level", round2(self.battery_level));
            }
        }

        frame
    }

    /// 处理一条控制指令
    pub fn handle_command(&mut self, request: &CommandRequest) -> CommandResponse {
        if !self.kind.commands().contains(&request.command.as_str()) {
            return CommandResponse::new(
                false,
                format!("Command '{}' not supported by this device", request.command),
            )
            .for_command(&request.command);
        }

        let response = match request.command.as_str() {
            "status" => CommandResponse::new(true, "Status retrieved successfully"),
            "power" => self.set_power(request.param("state").unwrap_or("toggle")),
            "set_brightness" => self.set_brightness(
                request
                    .param("brightness")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(50.0),
            ),
            "set_color" => self.set_color(request.param("color").unwrap_or("#ffffff")),
            "set_temperature" => self.set_temperature(
                request
                    .param("temperature")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(22.0),
            ),
            "set_mode" => self.set_mode(request.param("mode").unwrap_or("auto")),
            "calibrate" => self.calibrate(
                request
                    .param("offset")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0.0),
            ),
            _ => CommandResponse::new(false, format!("Command '{}' not handled", request.command)),
        };

        response.for_command(&request.command)
    }

    fn set_power(&mut self, state: &str) -> CommandResponse {
        self.power_on = match state {
            "toggle" => !self.power_on,
            "on" => true,
            _ => false,
        };

        self.power_usage = if self.power_on {
            match self.kind {
                // 功耗与亮度成正比
                DeviceKind::Light => round2(0.1 * self.brightness / 100.0),
                DeviceKind::Switch => round2(rand::thread_rng().gen_range(0.5..2.0)),
                DeviceKind::Thermostat if self.mode != ThermostatMode::Off => {
                    round2(rand::thread_rng().gen_range(1.0..3.0))
                }
                _ => 0.0,
            }
        } else {
            0.0
        };

        let state = if self.power_on { "on" } else { "off" };
        CommandResponse::new(true, format!("Power set to {}", state))
    }

    fn set_brightness(&mut self, brightness: f64) -> CommandResponse {
        self.brightness = brightness.clamp(0.0, 100.0);
        if self.power_on {
            self.power_usage = round2(0.1 * self.brightness / 100.0);
        }
        CommandResponse::new(true, format!("Brightness set to {}", self.brightness))
    }

    fn set_color(&mut self, color: &str) -> CommandResponse {
        if color.starts_with('#') && (color.len() == 4 || color.len() == 7) {
            self.color = color.to_string();
            CommandResponse::new(true, format!("Color set to {}", color))
        } else {
            CommandResponse::new(false, "Invalid color format")
        }
    }

    fn set_temperature(&mut self, temperature: f64) -> CommandResponse {
        self.target_temperature = temperature.clamp(16.0, 30.0);
        CommandResponse::new(
            true,
            format!("Temperature set to {}", self.target_temperature),
        )
    }

    fn set_mode(&mut self, mode: &str) -> CommandResponse {
        match ThermostatMode::from_str(mode) {
            Some(parsed) => {
                self.mode = parsed;
                CommandResponse::new(true, format!("Mode set to {}", mode))
            }
            None => CommandResponse::new(false, format!("Mode {} not supported", mode)),
        }
    }

    fn calibrate(&mut self, offset: f64) -> CommandResponse {
        self.current_temperature += offset;
        CommandResponse::new(true, format!("Sensor calibrated with offset {}", offset))
    }

    /// 推进一步模拟状态
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        match self.kind {
            DeviceKind::Sensor => {
                self.current_temperature += rng.gen_range(-0.1..0.1);
                self.humidity = (self.humidity + rng.gen_range(-0.5..0.5)).clamp(0.0, 100.0);
                self.pressure += rng.gen_range(-0.1..0.1);
                if rng.gen_bool(0.1) {
                    self.battery_level = (self.battery_level - 0.1).max(0.0);
                }
            }
            DeviceKind::Thermostat => {
                if self.power_on && self.mode != ThermostatMode::Off {
                    // 向目标温度靠拢
                    let delta = self.target_temperature - self.current_temperature;
                    self.current_temperature += delta.clamp(-0.2, 0.2);
                } else {
                    // 关机时向环境温度回落
                    let delta = AMBIENT_TEMPERATURE - self.current_temperature;
                    self.current_temperature += delta.clamp(-0.1, 0.1);
                }
                self.humidity = (self.humidity + rng.gen_range(-1.0..1.0)).clamp(20.0, 70.0);
            }
            DeviceKind::Light | DeviceKind::Switch => {}
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_unsupported_command_fails() {
        let mut device = SimDevice::with_id("dev_switch", DeviceKind::Switch);
        let response = device.handle_command(&CommandRequest::new("set_brightness"));

        assert!(!response.success);
        assert_eq!(
            response.message.as_deref(),
            Some("Command 'set_brightness' not supported by this device")
        );
        assert_eq!(response.command.as_deref(), Some("set_brightness"));
    }

    #[test]
    fn test_power_toggle() {
        let mut device = SimDevice::with_id("dev_light", DeviceKind::Light);

        let response = device.handle_command(&CommandRequest::new("power"));
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("Power set to on"));

        let response = device.handle_command(&CommandRequest::new("power"));
        assert_eq!(response.message.as_deref(), Some("Power set to off"));
        assert_eq!(device.power_usage, 0.0);
    }

    #[test]
    fn test_brightness_clamped() {
        let mut device = SimDevice::with_id("dev_light", DeviceKind::Light);
        device.handle_command(&CommandRequest::new("power").with_param("state", "on"));

        let response = device.handle_command(
            &CommandRequest::new("set_brightness").with_param("brightness", "250"),
        );
        assert_eq!(response.message.as_deref(), Some("Brightness set to 100"));
        assert_eq!(device.power_usage, 0.1);
    }

    #[test]
    fn test_invalid_color_rejected() {
        let mut device = SimDevice::with_id("dev_light", DeviceKind::Light);
        let response =
            device.handle_command(&CommandRequest::new("set_color").with_param("color", "red"));

        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Invalid color format"));
    }

    #[test]
    fn test_temperature_clamped_to_range() {
        let mut device = SimDevice::with_id("dev_thermo", DeviceKind::Thermostat);
        let response = device.handle_command(
            &CommandRequest::new("set_temperature").with_param("temperature", "45"),
        );

        assert_eq!(response.message.as_deref(), Some("Temperature set to 30"));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let mut device = SimDevice::with_id("dev_thermo", DeviceKind::Thermostat);
        let response =
            device.handle_command(&CommandRequest::new("set_mode").with_param("mode", "turbo"));

        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Mode turbo not supported"));
    }

    #[test]
    fn test_thermostat_approaches_target() {
        let mut device = SimDevice::with_id("dev_thermo", DeviceKind::Thermostat);
        device.handle_command(&CommandRequest::new("power").with_param("state", "on"));
        device.handle_command(&CommandRequest::new("set_mode").with_param("mode", "heat"));
        device.handle_command(
            &CommandRequest::new("set_temperature").with_param("temperature", "25"),
        );

        let mut rng = StepRng::new(0, 0);
        let before = device.current_temperature;
        device.tick(&mut rng);
        assert!(device.current_temperature > before);
        assert!(device.current_temperature <= device.target_temperature);
    }

    #[test]
    fn test_telemetry_readings_match_profile() {
        let device = SimDevice::with_id("dev_sensor", DeviceKind::Sensor);
        let frame = device.telemetry_frame();

        let ids: Vec<&str> = frame.numeric_readings().map(|(id, _)| id).collect();
        assert_eq!(ids, DeviceKind::Sensor.sensor_ids());
    }

    #[test]
    fn test_thermostat_mode_reading_is_not_numeric() {
        let device = SimDevice::with_id("dev_thermo", DeviceKind::Thermostat);
        let frame = device.telemetry_frame();

        assert!(frame.readings.contains_key("mode"));
        assert!(frame.numeric_readings().all(|(id, _)| id != "mode"));
    }

    #[test]
    fn test_status_update_carries_timestamp() {
        let device = SimDevice::with_id("dev_sensor", DeviceKind::Sensor);
        let update = device.status_update(true);

        assert_eq!(update.status, "online");
        assert!(update.timestamp.is_some());
    }
}
