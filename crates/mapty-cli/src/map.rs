//! Terminal stand-ins for the map widget and the location service

use async_trait::async_trait;
use mapty_core::models::Coordinates;
use mapty_core::ports::{LocationProvider, MapView};
use mapty_core::{MaptyError, Result};

use crate::output::OutputWriter;

/// Something the map was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    Marker { coordinates: Coordinates, label: String },
    View { coordinates: Coordinates, zoom: u8 },
}

/// Map view that records its activity for printing
#[derive(Debug, Default)]
pub struct TerminalMap {
    zoom: u8,
    events: Vec<MapEvent>,
}

impl TerminalMap {
    pub fn new(zoom: u8) -> Self {
        Self { zoom, events: Vec::new() }
    }

    #[cfg(test)]
    pub fn events(&self) -> &[MapEvent] {
        &self.events
    }

    /// Print recorded activity, oldest first
    pub fn flush(&mut self, output: &OutputWriter) {
        for event in self.events.drain(..) {
            match event {
                MapEvent::Marker { coordinates, label } => {
                    output.map_event(format!("Marker at [{}]: {}", coordinates, label))
                }
                MapEvent::View { coordinates, zoom } => {
                    output.map_event(format!("Map centred on [{}] at zoom {}", coordinates, zoom))
                }
            }
        }
    }
}

impl MapView for TerminalMap {
    fn render_marker(&mut self, coordinates: Coordinates, label: &str) {
        self.events.push(MapEvent::Marker { coordinates, label: label.to_string() });
    }

    fn center_on(&mut self, coordinates: Coordinates, zoom: u8) {
        self.zoom = zoom;
        self.events.push(MapEvent::View { coordinates, zoom });
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }
}

/// Location service backed by the configured position
#[derive(Debug, Clone)]
pub struct StaticLocationProvider {
    location: Option<Coordinates>,
}

impl StaticLocationProvider {
    pub fn new(location: Option<Coordinates>) -> Self {
        Self { location }
    }
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn current_location(&self) -> Result<Coordinates> {
        self.location.ok_or_else(|| MaptyError::LocationUnavailable {
            reason: "no location configured".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_map_records_events() {
        let mut map = TerminalMap::new(13);
        let coords = Coordinates::new(40.7, -74.0);

        map.center_on(coords, 16);
        map.render_marker(coords, "🏃‍♂️ Running on October 14");

        assert_eq!(map.zoom(), 16);
        assert_eq!(map.events().len(), 2);
        assert_eq!(map.events()[0], MapEvent::View { coordinates: coords, zoom: 16 });

        map.flush(&OutputWriter::new(true));
        assert!(map.events().is_empty());
    }

    #[tokio::test]
    async fn test_static_location_provider() {
        let coords = Coordinates::new(51.5, -0.12);
        let provider = StaticLocationProvider::new(Some(coords));
        assert_eq!(provider.current_location().await.unwrap(), coords);

        let missing = StaticLocationProvider::new(None);
        assert!(matches!(
            missing.current_location().await,
            Err(MaptyError::LocationUnavailable { .. })
        ));
    }
}
