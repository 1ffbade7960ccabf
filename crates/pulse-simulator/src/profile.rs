/// 模拟设备种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// 灯具
    Light,
    /// 温控器
    Thermostat,
    /// 开关
    Switch,
    /// 传感器
    Sensor,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Light => "light",
            DeviceKind::Thermostat => "thermostat",
            DeviceKind::Switch => "switch",
            DeviceKind::Sensor => "sensor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(DeviceKind::Light),
            "thermostat" => Some(DeviceKind::Thermostat),
            "switch" => Some(DeviceKind::Switch),
            "sensor" => Some(DeviceKind::Sensor),
            _ => None,
        }
    }

    pub fn all() -> &'static [DeviceKind] {
        &[
            DeviceKind::Light,
            DeviceKind::Thermostat,
            DeviceKind::Switch,
            DeviceKind::Sensor,
        ]
    }

    /// 该种类支持的指令
    pub fn commands(&self) -> &'static [&'static str] {
        match self {
            DeviceKind::Light => &["power", "set_brightness", "set_color", "status"],
            DeviceKind::Thermostat => &["power", "set_temperature", "set_mode", "status"],
            DeviceKind::Switch => &["power", "status"],
            DeviceKind::Sensor => &["status", "calibrate"],
        }
    }

    /// 该种类上报的数值读数键
    pub fn sensor_ids(&self) -> &'static [&'static str] {
        match self {
            DeviceKind::Light => &["power_state", "brightness", "power_usage"],
            DeviceKind::Thermostat => &[
                "power_state",
                "current_temperature",
                "target_temperature",
                "humidity",
            ],
            DeviceKind::Switch => &["power_state", "power_usage"],
            DeviceKind::Sensor => &["temperature", "humidity", "pressure", "battery_level"],
        }
    }
}

/// 温控器工作模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThermostatMode {
    Auto,
    Heat,
    Cool,
    #[default]
    Off,
}

impl ThermostatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThermostatMode::Auto => "auto",
            ThermostatMode::Heat => "heat",
            ThermostatMode::Cool => "cool",
            ThermostatMode::Off => "off",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(ThermostatMode::Auto),
            "heat" => Some(ThermostatMode::Heat),
            "cool" => Some(ThermostatMode::Cool),
            "off" => Some(ThermostatMode::Off),
            _ => None,
        }
    }
}
