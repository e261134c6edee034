use async_trait::async_trait;

use crate::error::Result;
use crate::models::Coordinates;

/// Port for the map widget
pub trait MapView {
    /// Place a marker with a popup label
    fn render_marker(&mut self, coordinates: Coordinates, label: &str);

    /// Move the view to `coordinates` at `zoom`
    fn center_on(&mut self, coordinates: Coordinates, zoom: u8);

    /// Current zoom level
    fn zoom(&self) -> u8;
}

/// Port for the host's location service
///
/// Resolves once with the user's position or rejects with
/// [`crate::MaptyError::LocationUnavailable`].
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_location(&self) -> Result<Coordinates>;
}
