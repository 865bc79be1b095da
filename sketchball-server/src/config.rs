use log::info;
use sketchball_base::anyhow::Result;
use sketchball_base::error_return;
use sketchball_base::utils::json::read_value;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::str;
use tinyjson::JsonValue;

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    pub path: String,
    pub data: ConfigData,
}

#[derive(Debug, Clone)]
pub struct ConfigData {
    pub endpoint: String,
    pub tick: u32,
    pub capture_tick: u32,
    pub stream_tick: u32,
    pub client_ping_interval: u32,
    pub camera_width: u32,
    pub camera_height: u32,
}

impl ConfigLoader {
    pub fn new(path: &str) -> Self {
        let mut config = Self { path: path.to_string(), data: Default::default() };
        config.reload();

        config
    }

    /// Reads the file again, keeping the previous values when it cannot be
    /// parsed. Triggered at startup and by the `config reload` command.
    pub fn reload(&mut self) {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) => error_return!("Failed to open configuration file ({})", err),
        };

        let mut buffer = Vec::new();
        if let Err(err) = file.read_to_end(&mut buffer) {
            error_return!("Failed to read configuration file ({})", err);
        }

        let content = match str::from_utf8(&buffer) {
            Ok(content) => content,
            Err(err) => error_return!("Failed to parse configuration content ({})", err),
        };

        let json = match content.parse::<JsonValue>() {
            Ok(json) => json,
            Err(err) => error_return!("Failed to parse configuration JSON ({})", err),
        };

        let data = match json.get::<HashMap<_, _>>() {
            Some(data) => data,
            None => error_return!("Failed to parse configuration JSON"),
        };

        if let Err(err) = self.parse(data) {
            error_return!("Failed to parse configuration JSON ({})", err);
        }

        info!("Configuration loaded from {}", self.path);
    }

    fn parse(&mut self, data: &HashMap<String, JsonValue>) -> Result<()> {
        let mut parsed = ConfigData {
            endpoint: read_value::<String>(data, "endpoint")?,
            tick: read_value::<f64>(data, "tick")? as u32,
            capture_tick: read_value::<f64>(data, "capture_tick")? as u32,
            stream_tick: read_value::<f64>(data, "stream_tick")? as u32,
            client_ping_interval: read_value::<f64>(data, "client_ping_interval")? as u32,
            camera_width: read_value::<f64>(data, "camera_width")? as u32,
            camera_height: read_value::<f64>(data, "camera_height")? as u32,
        };

        // Null fields fall back to the defaults instead of zero intervals
        let defaults = ConfigData::default();
        if parsed.tick == 0 {
            parsed.tick = defaults.tick;
        }
        if parsed.capture_tick == 0 {
            parsed.capture_tick = defaults.capture_tick;
        }
        if parsed.stream_tick == 0 {
            parsed.stream_tick = defaults.stream_tick;
        }
        if parsed.client_ping_interval == 0 {
            parsed.client_ping_interval = defaults.client_ping_interval;
        }

        self.data = parsed;
        Ok(())
    }
}

impl Default for ConfigData {
    fn default() -> Self {
        Self {
            endpoint: "localhost:9000".to_string(),
            tick: 16,
            capture_tick: 33,
            stream_tick: 33,
            client_ping_interval: 1000,
            camera_width: 640,
            camera_height: 480,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_keeps_defaults() {
        let config = ConfigLoader::new("does_not_exist.json");

        assert_eq!(config.data.endpoint, "localhost:9000");
        assert_eq!(config.data.tick, 16);
        assert_eq!(config.data.camera_width, 640);
        assert_eq!(config.data.camera_height, 480);
    }
}
