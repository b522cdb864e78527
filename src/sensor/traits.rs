//! The sensor port capability.

/// A specialized `Result` type for sensor port reads.
pub type SensorResult<T> = std::result::Result<T, SensorError>;

/// Error produced by a single sensor port read.
///
/// Cloneable and comparable so a failed sample can carry the originating
/// error by value across a scrape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize)]
pub enum SensorError {
    /// The underlying bus transaction failed
    #[error("bus error: {0}")]
    Bus(String),

    /// The read exceeded the configured deadline
    #[error("read timed out after {0}ms")]
    Timeout(u64),

    /// The sensor is not connected or was never initialized
    #[error("sensor not connected: {0}")]
    NotConnected(String),
}

impl SensorError {
    /// Create a new bus error
    pub fn bus(msg: impl Into<String>) -> Self {
        Self::Bus(msg.into())
    }

    /// Create a new not-connected error
    pub fn not_connected(msg: impl Into<String>) -> Self {
        Self::NotConnected(msg.into())
    }
}

/// Capability for reading the three environmental values from hardware.
///
/// Each read is a single blocking bus transaction returning a live value;
/// implementations must not cache readings between calls. The collector
/// serializes access, so implementations do not need to be thread-safe
/// themselves.
pub trait SensorPort {
    /// Read the current temperature in degrees Celsius.
    fn read_temperature(&mut self) -> SensorResult<f64>;

    /// Read the current barometric pressure in Pascal.
    fn read_pressure(&mut self) -> SensorResult<f64>;

    /// Read the current relative humidity in percent (0 to 100).
    fn read_humidity(&mut self) -> SensorResult<f64>;
}

impl SensorPort for Box<dyn SensorPort + Send> {
    fn read_temperature(&mut self) -> SensorResult<f64> {
        (**self).read_temperature()
    }

    fn read_pressure(&mut self) -> SensorResult<f64> {
        (**self).read_pressure()
    }

    fn read_humidity(&mut self) -> SensorResult<f64> {
        (**self).read_humidity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPort(f64);

    impl SensorPort for FixedPort {
        fn read_temperature(&mut self) -> SensorResult<f64> {
            Ok(self.0)
        }

        fn read_pressure(&mut self) -> SensorResult<f64> {
            Ok(self.0)
        }

        fn read_humidity(&mut self) -> SensorResult<f64> {
            Err(SensorError::bus("nope"))
        }
    }

    #[test]
    fn test_boxed_port_forwards_reads() {
        let mut port: Box<dyn SensorPort + Send> = Box::new(FixedPort(7.5));
        assert_eq!(port.read_temperature(), Ok(7.5));
        assert_eq!(port.read_pressure(), Ok(7.5));
        assert_eq!(port.read_humidity(), Err(SensorError::bus("nope")));
    }

    #[test]
    fn test_sensor_error_formatting() {
        assert_eq!(
            SensorError::bus("i2c transfer failed").to_string(),
            "bus error: i2c transfer failed"
        );
        assert_eq!(
            SensorError::Timeout(250).to_string(),
            "read timed out after 250ms"
        );
        assert!(SensorError::not_connected("no device at 0x76")
            .to_string()
            .contains("0x76"));
    }
}
