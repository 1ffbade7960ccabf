use anyhow::bail;
use clap::Parser;
use pulse_config::ConfigLoader;
use pulse_control::{CommandDispatcher, ControlForm};
use pulse_dashboard::{ChartRegistry, Dispatcher, NoticeRenderer, NullChartHandle};
use pulse_simulator::{DeviceKind, LoopbackChannel, SimDevice};
use pulse_types::{PushEvent, SensorSeed};
use pulse_view::{DeviceCard, MemoryView};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config directory containing pulse.toml
    #[arg(short, long, default_value = ".")]
    config_dir: String,

    /// Number of devices to simulate
    #[arg(short, long)]
    devices: Option<usize>,

    /// Comma-separated list of device kinds to simulate
    #[arg(short, long, default_value = "light,thermostat,switch,sensor")]
    kinds: String,

    /// Seconds between telemetry frames
    #[arg(short, long)]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = ConfigLoader::new(&args.config_dir).load()?;

    let device_count = args.devices.unwrap_or(config.simulator.devices);
    let interval = Duration::from_secs(
        args.interval
            .unwrap_or(config.simulator.telemetry_interval_secs),
    );

    let kinds: Vec<DeviceKind> = args
        .kinds
        .split(',')
        .filter_map(|s| {
            let kind = DeviceKind::from_str(s.trim());
            if kind.is_none() {
                warn!(kind = s.trim(), "Unknown device kind, skipped");
            }
            kind
        })
        .collect();
    if kinds.is_empty() {
        bail!("No valid device kinds given");
    }

    // 组装设备、卡片和图表
    let mut view = MemoryView::new();
    let mut charts = ChartRegistry::with_capacity(config.chart.capacity);
    let mut devices = HashMap::new();
    {
        let mut rng = rand::thread_rng();
        for _ in 0..device_count {
            let kind = kinds[rng.gen_range(0..kinds.len())];
            let device = SimDevice::new(kind);

            let mut card = DeviceCard::new(device.device_id()).with_control_form();
            for sensor_id in kind.sensor_ids() {
                card = card.with_sensor(*sensor_id);
                if !charts.contains(sensor_id) {
                    charts.register(
                        &SensorSeed::empty(*sensor_id, *sensor_id),
                        Box::new(NullChartHandle),
                    );
                }
            }
            view.push_card(card);

            info!(device_id = %device.device_id(), kind = kind.as_str(), "Created device");
            devices.insert(device.device_id().to_string(), device);
        }
    }

    let device_ids: Vec<String> = devices.keys().cloned().collect();
    let view = Arc::new(RwLock::new(view));
    let charts = Arc::new(RwLock::new(charts));
    let devices = Arc::new(RwLock::new(devices));
    // 分发循环启动前还有一轮上线状态要发，容量必须盖得住
    let (events_tx, events_rx) = mpsc::channel(256.max(device_count * 4));

    let notices = NoticeRenderer::with_ttl(Duration::from_millis(config.notice.ttl_ms));
    let dispatcher = Dispatcher::new(Arc::clone(&view), Arc::clone(&charts), notices.clone());
    let commands = CommandDispatcher::new(
        Box::new(LoopbackChannel::new(Arc::clone(&devices), events_tx.clone())),
        Arc::clone(&view),
        notices,
    );

    // 上线状态
    {
        let devices = devices.read().await;
        for device in devices.values() {
            events_tx
                .send(PushEvent::DeviceStatus {
                    device_id: device.device_id().to_string(),
                    data: device.status_update(true),
                })
                .await?;
        }
    }

    // 遥测循环
    {
        let devices = Arc::clone(&devices);
        let events_tx = events_tx.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;

                let frames: Vec<PushEvent> = {
                    let mut devices = devices.write().await;
                    let mut rng = rand::thread_rng();
                    devices
                        .values_mut()
                        .map(|device| {
                            device.tick(&mut rng);
                            PushEvent::DeviceTelemetry {
                                device_id: device.device_id().to_string(),
                                data: device.telemetry_frame(),
                            }
                        })
                        .collect()
                };

                for frame in frames {
                    if events_tx.send(frame).await.is_err() {
                        return;
                    }
                }
            }
        });
    }

    // 指令演练：周期性地给随机设备发一条电源指令
    {
        let device_ids = device_ids.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval * 3);
            ticker.tick().await;
            loop {
                ticker.tick().await;

                let device_id = {
                    let mut rng = rand::thread_rng();
                    device_ids.choose(&mut rng).cloned()
                };
                let Some(device_id) = device_id else { return };

                let form = ControlForm::new(device_id.as_str())
                    .with_field("command", "power")
                    .with_field("param_state", "toggle");
                match commands.submit(&form).await {
                    Ok(_) => info!(device_id = %device_id, "Power command submitted"),
                    Err(err) => warn!(device_id = %device_id, error = %err, "Command submission failed"),
                }
            }
        });
    }

    // 周期性摘要
    {
        let view = Arc::clone(&view);
        let device_ids = device_ids.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(10));
            ticker.tick().await;
            loop {
                ticker.tick().await;

                let view = view.read().await;
                for device_id in &device_ids {
                    if let Some(card) = view.card(device_id) {
                        info!(
                            device_id = %device_id,
                            status = card.status_marker.as_deref().unwrap_or("-"),
                            notices = view.notices().len(),
                            "Dashboard state"
                        );
                    }
                }
            }
        });
    }

    info!(
        devices = device_count,
        interval_secs = interval.as_secs(),
        "Simulator running, press Ctrl-C to stop"
    );

    tokio::select! {
        _ = dispatcher.run(events_rx) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Simulator shutting down");
        }
    }

    // 下线状态直接走分发器，推送通道此时可能已关闭
    {
        let devices = devices.read().await;
        for device in devices.values() {
            dispatcher
                .handle(PushEvent::DeviceStatus {
                    device_id: device.device_id().to_string(),
                    data: device.status_update(false),
                })
                .await;
        }
    }

    Ok(())
}
