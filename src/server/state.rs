use crate::dataset::DatasetHandle;
use crate::geocode::Geocoder;
use std::sync::Arc;

pub struct AppState {
    pub dataset: DatasetHandle,
    pub geocoder: Arc<dyn Geocoder>,
}
