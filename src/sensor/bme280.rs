//! BME280 sensor port over the Raspberry Pi I2C bus.
//!
//! Only compiled with the `hardware` feature; everything else in the crate
//! talks to the sensor through the [`SensorPort`] trait.

use crate::error::Result;
use crate::sensor::{SensorError, SensorPort, SensorResult};
use bme280::{Measurements, BME280};
use rppal::hal::Delay;
use rppal::i2c::I2c;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Sensor port backed by a BME280 on an I2C bus, primary address 0x76.
///
/// Opened once at boot and held for the process lifetime; there is no
/// reconnect logic, a persistently failing bus surfaces as failed reads on
/// every scrape.
pub struct Bme280Port {
    driver: BME280<I2c, Delay>,
    read_timeout: Duration,
}

impl Bme280Port {
    /// Connect to the sensor on the given I2C bus and run its init sequence.
    ///
    /// Failure here is boot-fatal for the exporter binary.
    pub fn connect(bus: u8, read_timeout: Duration) -> Result<Self> {
        let i2c = I2c::with_bus(bus)
            .map_err(|e| SensorError::not_connected(format!("opening i2c bus {}: {}", bus, e)))?;

        let mut driver = BME280::new_primary(i2c, Delay::new());
        driver
            .init()
            .map_err(|e| SensorError::not_connected(format!("initializing BME280: {:?}", e)))?;

        info!("Connected to BME280 on i2c bus {}", bus);

        Ok(Self {
            driver,
            read_timeout,
        })
    }

    /// Run one measurement transaction, enforcing the configured deadline.
    ///
    /// The bus transaction itself cannot be interrupted; a read that comes
    /// back after the deadline is reported as a timeout so the active
    /// failure policy treats it like any other failed read.
    fn measure(&mut self) -> SensorResult<Measurements<rppal::i2c::Error>> {
        let started = Instant::now();
        let measurements = self
            .driver
            .measure()
            .map_err(|e| SensorError::bus(format!("{:?}", e)))?;

        let elapsed = started.elapsed();
        if elapsed > self.read_timeout {
            return Err(SensorError::Timeout(elapsed.as_millis() as u64));
        }

        debug!(elapsed_ms = elapsed.as_millis() as u64, "BME280 measurement");
        Ok(measurements)
    }
}

impl SensorPort for Bme280Port {
    fn read_temperature(&mut self) -> SensorResult<f64> {
        self.measure().map(|m| f64::from(m.temperature))
    }

    fn read_pressure(&mut self) -> SensorResult<f64> {
        self.measure().map(|m| f64::from(m.pressure))
    }

    fn read_humidity(&mut self) -> SensorResult<f64> {
        self.measure().map(|m| f64::from(m.humidity))
    }
}
