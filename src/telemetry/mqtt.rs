//! MQTT feed for the sensor dashboard (blocking `rumqttc` client).

use super::{SensorReadings, SensorTopic};
use crate::config::MqttConfig;
use crate::errors::{AppError, AppResult};
use rumqttc::{Client, Event, MqttOptions, Packet, QoS};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn client_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    format!("ecopot_{:08x}", nanos ^ std::process::id())
}

fn subscribe_all(client: &Client, prefix: &str) -> AppResult<()> {
    for t in SensorTopic::ALL {
        client
            .try_subscribe(t.topic(prefix), QoS::AtMostOnce)
            .map_err(|e| AppError::Mqtt(format!("subscribe {}: {}", t.topic(prefix), e)))?;
    }
    Ok(())
}

/// Connect to the broker, subscribe to the six sensor topics and feed every
/// publish into a [`SensorReadings`].
///
/// `on_update` is called after each applied message; returning `false`
/// disconnects and ends the feed. A connection error ends the feed with
/// [`AppError::Mqtt`]; there is no reconnect.
pub fn run_feed<F>(cfg: &MqttConfig, mut on_update: F) -> AppResult<SensorReadings>
where
    F: FnMut(&SensorReadings, SensorTopic) -> bool,
{
    let mut opts = MqttOptions::new(client_id(), cfg.host.clone(), cfg.port);
    opts.set_keep_alive(Duration::from_secs(30));
    if let Some(user) = &cfg.username {
        opts.set_credentials(user.clone(), cfg.password.clone().unwrap_or_default());
    }

    let (client, mut connection) = Client::new(opts, 16);
    let mut readings = SensorReadings::default();

    for event in connection.iter() {
        match event {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                subscribe_all(&client, &cfg.topic_prefix)?;
            }
            Ok(Event::Incoming(Packet::Publish(p))) => {
                let payload = String::from_utf8_lossy(&p.payload);
                if let Some(t) = readings.apply(&p.topic, &payload, &cfg.topic_prefix)
                    && !on_update(&readings, t)
                {
                    let _ = client.disconnect();
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => return Err(AppError::Mqtt(e.to_string())),
        }
    }

    Ok(readings)
}
