//! Sensor Metadata
//! Fixed description of the measurement system on the main tank.

/// Where and how the readings are taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorInfo {
    pub site: &'static str,
    pub city: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: &'static str,
    pub sensor_type: &'static str,
    pub variable: &'static str,
    pub unit: &'static str,
    pub sampling: &'static str,
    pub processor: &'static str,
}

pub const MAIN_TANK: SensorInfo = SensorInfo {
    site: "Universidad EAFIT - Tanque Principal",
    city: "Medellín, Colombia",
    latitude: 6.2006,
    longitude: -75.5783,
    altitude: "~1,495 msnm",
    sensor_type: "Potenciómetro (lectura analógica)",
    variable: "Nivel de agua del tanque",
    unit: "Escala analógica o centímetros (según calibración)",
    sampling: "Configurable en el ESP32",
    processor: "ESP32",
};

impl SensorInfo {
    /// Label/value pairs for the location card.
    pub fn location_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Latitud", format!("{:.4}", self.latitude)),
            ("Longitud", format!("{:.4}", self.longitude)),
            ("Altitud", self.altitude.to_string()),
        ]
    }

    /// Label/value pairs for the system card.
    pub fn system_rows(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("Tipo de Sensor", self.sensor_type),
            ("Variable medida", self.variable),
            ("Unidad de medida", self.unit),
            ("Frecuencia de medición", self.sampling),
            ("Procesador", self.processor),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_is_formatted() {
        let rows = MAIN_TANK.location_rows();
        assert_eq!(rows[0], ("Latitud", "6.2006".to_string()));
        assert_eq!(rows[1], ("Longitud", "-75.5783".to_string()));
    }
}
