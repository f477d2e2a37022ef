//! Records shared by several resources.

use serde::{Deserialize, Serialize};

use crate::fields::{Latitude, Longitude};

/// A coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude.
    pub lat: Latitude,
    /// Longitude.
    pub lng: Longitude,
}
