use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::telemetry::SensorReadings;
use crate::telemetry::mqtt::run_feed;
use crate::ui::messages::{header, info};
use std::io::{self, BufRead};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sensors { stdin } = cmd {
        if *stdin {
            let readings = read_lines(io::stdin().lock(), &cfg.mqtt.topic_prefix)?;
            header("Sensor dashboard");
            print!("{}", readings);
            return Ok(());
        }

        info(format!(
            "Connecting to mqtt://{}:{} ({}*). Press Ctrl+C to stop.",
            cfg.mqtt.host, cfg.mqtt.port, cfg.mqtt.topic_prefix
        ));

        let start = SensorReadings::default();
        header("Sensor dashboard");
        print!("{}", start);

        run_feed(&cfg.mqtt, |readings, _| {
            print!("\x1b[2J\x1b[H");
            header("Sensor dashboard");
            print!("{}", readings);
            true
        })?;
    }
    Ok(())
}

/// Apply every `"<topic> <payload>"` line of `input`; malformed lines and
/// unknown topics are skipped.
pub(crate) fn read_lines<R: BufRead>(input: R, prefix: &str) -> AppResult<SensorReadings> {
    let mut readings = SensorReadings::default();
    for line in input.lines() {
        readings.apply_line(&line?, prefix);
    }
    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::SensorTopic;

    #[test]
    fn stdin_feed_keeps_last_value_per_topic() {
        let input = "plant/temperature 21\nplant/temperature 23.5\ngarbage\nplant/light 870\nother/air 1\n";
        let r = read_lines(input.as_bytes(), "plant/").unwrap();

        assert_eq!(r.get(SensorTopic::Temperature), Some("23.5°C"));
        assert_eq!(r.get(SensorTopic::Light), Some("870"));
        assert_eq!(r.get(SensorTopic::Air), None);
    }
}
