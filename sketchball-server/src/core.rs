use crate::config::ConfigLoader;
use crate::media::encoder::PngFrameEncoder;
use crate::media::synthetic::IdleHandTracker;
use crate::media::synthetic::SyntheticCamera;
use crate::media::CameraSource;
use crate::media::FrameEncoder;
use crate::media::FrameSlot;
use crate::media::HandTracker;
use crate::notify::LogNotifier;
use crate::notify::WinNotifier;
use crate::overlay;
use crate::terminal;
use chrono::SecondsFormat;
use chrono::Utc;
use futures_channel::mpsc;
use futures_util::StreamExt;
use log::info;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use sketchball_base::anyhow::Result;
use sketchball_base::error_continue;
use sketchball_base::game::GamePhase;
use sketchball_base::game::WinEvent;
use sketchball_base::game::World;
use sketchball_base::levels::LevelCatalog;
use sketchball_base::network::packet::Packet;
use sketchball_base::network::server::client::WebSocketConnectedClient;
use sketchball_base::network::server::listener::WebSocketListener;
use sketchball_base::packets::*;
use sketchball_base::parking_lot::RwLock;
use std::fs;
use std::panic;
use std::sync::Arc;
use std::time::Duration;
use std::time::SystemTime;
use tokio::io::AsyncReadExt;
use tokio::select;
use tokio::time;

pub struct Core {
    pub world: Arc<RwLock<World>>,
    pub latest_frame: Arc<FrameSlot>,
    pub clients: Arc<RwLock<FxHashMap<u64, WebSocketConnectedClient>>>,
    pub streams: Arc<RwLock<FxHashSet<u64>>>,
    pub config: Arc<RwLock<ConfigLoader>>,
}

impl Core {
    pub fn new() -> Self {
        let config = ConfigLoader::new("config.json");

        Self {
            world: Arc::new(RwLock::new(World::new(LevelCatalog::default()))),
            latest_frame: Arc::default(),
            clients: Arc::default(),
            streams: Arc::default(),
            config: Arc::new(RwLock::new(config)),
        }
    }

    pub async fn run(&mut self) {
        if let Err(err) = self.init_logger() {
            println!("Failed to initialize logger ({})", err);
            return;
        }

        let mut listener = WebSocketListener::new();
        let (listener_tx, mut listener_rx) = mpsc::unbounded::<WebSocketConnectedClient>();
        let (packet_event_tx, mut packet_event_rx) = mpsc::unbounded::<(u64, Packet)>();
        let (disconnection_event_tx, mut disconnection_event_rx) = mpsc::unbounded::<u64>();

        let world = self.world.clone();
        let latest_frame = self.latest_frame.clone();
        let clients = self.clients.clone();
        let streams = self.streams.clone();
        let config = self.config.clone();

        let endpoint = config.read().data.endpoint.clone();
        let listen = listener.listen(&endpoint, listener_tx);

        let accept_clients = async {
            while let Some(mut client) = listener_rx.next().await {
                client.run(packet_event_tx.clone(), disconnection_event_tx.clone());
                clients.write().insert(client.id, client);
            }
        };
        let read_frames = async {
            while let Some((id, packet)) = packet_event_rx.next().await {
                match packet.get_id() {
                    Some(PACKET_STATUS_REQUEST) => {
                        let status = world.read().status();
                        let response = Packet::from_object(
                            PACKET_STATUS_RESPONSE,
                            &PacketStatusResponse { phase: status.phase.id(), level: status.level, total_levels: status.total_levels },
                        );

                        if let Some(client) = clients.read().get(&id) {
                            client.send_packet(response);
                        } else {
                            error_continue!("Cannot reply with status, client {} does not exists", id);
                        }
                    }
                    Some(PACKET_START_REQUEST) => {
                        let phase = world.write().request_start();
                        let response = Packet::from_object(PACKET_START_RESPONSE, &PacketStartResponse { success: 1, phase: phase.id() });

                        if let Some(client) = clients.read().get(&id) {
                            client.send_packet(response);
                        } else {
                            error_continue!("Cannot reply for start request, client {} does not exists", id);
                        }
                    }
                    Some(PACKET_ADVANCE_REQUEST) => {
                        let level = world.write().request_advance() as u32 + 1;
                        let response = Packet::from_object(PACKET_ADVANCE_RESPONSE, &PacketAdvanceResponse { success: 1, level });

                        if let Some(client) = clients.read().get(&id) {
                            client.send_packet(response);
                        } else {
                            error_continue!("Cannot reply for advance request, client {} does not exists", id);
                        }
                    }
                    Some(PACKET_RESET_REQUEST) => {
                        let phase = world.write().request_reset();
                        let response = Packet::from_object(PACKET_RESET_RESPONSE, &PacketResetResponse { success: 1, phase: phase.id() });

                        if let Some(client) = clients.read().get(&id) {
                            client.send_packet(response);
                        } else {
                            error_continue!("Cannot reply for reset request, client {} does not exists", id);
                        }
                    }
                    Some(PACKET_STREAM_REQUEST) => {
                        streams.write().insert(id);
                        info!("Client {} subscribed to the video stream", id);

                        let response = Packet::from_object(PACKET_STREAM_RESPONSE, &PacketStreamResponse { tick: config.read().data.stream_tick });
                        if let Some(client) = clients.read().get(&id) {
                            client.send_packet(response);
                        } else {
                            error_continue!("Cannot reply for stream request, client {} does not exists", id);
                        }
                    }
                    Some(packet_id) => error_continue!("Unhandled packet ID ({})", packet_id),
                    None => error_continue!("Invalid frame ID ({:?})", packet.get_id()),
                }
            }
        };
        let process_clients = async {
            let client_ping_interval = config.read().data.client_ping_interval;
            let mut interval = time::interval(Duration::from_millis(client_ping_interval as u64));

            loop {
                for client in clients.read().iter() {
                    client.1.send_ping();
                }

                let client_ping_interval = config.read().data.client_ping_interval;
                if interval.period().as_millis() != client_ping_interval as u128 {
                    interval = time::interval(Duration::from_millis(client_ping_interval as u64));
                    info!("Client ping interval changed to {} ms", client_ping_interval);
                }

                interval.tick().await;
            }
        };
        let process_disconnection = async {
            while let Some(id) = disconnection_event_rx.next().await {
                streams.write().remove(&id);
                clients.write().remove(&id);
            }
        };
        let process_terminal = async {
            let mut stdin = tokio::io::stdin();
            loop {
                let mut buffer = vec![0; 128];
                let n = match stdin.read(&mut buffer).await {
                    Err(_) | Ok(0) => break,
                    Ok(n) => n,
                };
                buffer.truncate(n);

                let command = match String::from_utf8(buffer) {
                    Ok(command) => command,
                    Err(_) => break,
                };

                terminal::process(&command, self);
            }
        };
        let tick = async {
            let notifier: Box<dyn WinNotifier + Send> = Box::new(LogNotifier);
            let tick_interval = config.read().data.tick;
            let mut interval = time::interval(Duration::from_millis(tick_interval as u64));

            loop {
                let tick_interval = config.read().data.tick;
                let event = world.write().tick(tick_interval as f32 / 1000.0);

                // The transition itself is the only trigger, a phase that
                // stays terminal does not re-fire the notification
                match event {
                    Some(WinEvent::LevelComplete { level }) | Some(WinEvent::GameOver { level }) => notifier.level_complete(level),
                    None => {}
                }

                if interval.period().as_millis() != tick_interval as u128 {
                    interval = time::interval(Duration::from_millis(tick_interval as u64));
                    info!("Simulation tick changed to {} ms", tick_interval);
                }

                interval.tick().await;
            }
        };
        let capture = async {
            let (capture_tick, camera_width, camera_height) = {
                let config = config.read();
                (config.data.capture_tick, config.data.camera_width, config.data.camera_height)
            };

            let mut camera: Box<dyn CameraSource + Send> = Box::new(SyntheticCamera::new(camera_width, camera_height));
            let mut tracker: Box<dyn HandTracker + Send> = Box::new(IdleHandTracker);
            let mut interval = time::interval(Duration::from_millis(capture_tick as u64));

            loop {
                let mut frame = match camera.next_frame() {
                    Some(frame) => frame,
                    None => break,
                };

                frame.flip_horizontal();

                // Detection runs outside the world lock, the phase gate is
                // re-checked inside apply_gesture under the write lock
                if world.read().phase == GamePhase::Idle {
                    let detection = tracker.track(&frame);
                    if let Some(marker) = world.write().apply_gesture(detection, frame.width, frame.height) {
                        overlay::draw_marker(&mut frame, &marker);
                    }
                }

                latest_frame.publish(frame);
                interval.tick().await;
            }

            info!("Camera signalled end of stream, capture loop stopped");
        };
        let stream = async {
            let mut encoder: Box<dyn FrameEncoder + Send> = Box::new(PngFrameEncoder);
            let stream_tick = config.read().data.stream_tick;
            let mut interval = time::interval(Duration::from_millis(stream_tick as u64));

            loop {
                interval.tick().await;

                if streams.read().is_empty() {
                    continue;
                }

                let mut frame = match latest_frame.snapshot() {
                    Some(frame) => frame,
                    None => continue,
                };

                {
                    let world = world.read();
                    overlay::compose(&mut frame, &world);
                }

                let data = match encoder.encode(&frame) {
                    Ok(data) => data,
                    Err(err) => error_continue!("Failed to encode frame ({})", err),
                };

                let timestamp = match SystemTime::now().duration_since(SystemTime::UNIX_EPOCH) {
                    Ok(now) => now.as_millis() as u64,
                    Err(err) => error_continue!("Failed to obtain current time ({})", err),
                };

                let header = PacketFrameHeader { timestamp, width: frame.width, height: frame.height };
                let packet = Packet::from_array_with_header(PACKET_FRAME, &header, &data);

                let clients = clients.read();
                for id in streams.read().iter() {
                    if let Some(client) = clients.get(id) {
                        client.send_packet(packet.clone());
                    }
                }
            }
        };

        select! {
            _ = listen => {}
            _ = accept_clients => {}
            _ = read_frames => {}
            _ = process_clients => {}
            _ = process_disconnection => {}
            _ = process_terminal => {}
            _ = tick => {}
            _ = capture => {}
            _ = stream => {}
        }
    }

    fn init_logger(&self) -> Result<()> {
        fs::create_dir_all("./logs/")?;

        fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] [{}] [{}] {}",
                    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .chain(fern::Dispatch::new().level(log::LevelFilter::Debug).chain(fern::DateBased::new("./logs/", "log_info_%Y-%m-%d.log")))
            .apply()?;

        panic::set_hook(Box::new(move |info| {
            log::error!("Critical error: {}", info);
        }));

        Ok(())
    }
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_core_starts_idle_on_level_one() {
        let core = Core::new();
        let status = core.world.read().status();

        assert_eq!(status.phase, GamePhase::Idle);
        assert_eq!(status.level, 1);
        assert_eq!(status.total_levels, 3);
        assert!(core.latest_frame.snapshot().is_none());
        assert!(core.clients.read().is_empty());
        assert!(core.streams.read().is_empty());
    }
}
