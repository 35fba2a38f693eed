use crate::places::PlaceResolver;
use std::sync::Mutex;

pub struct AppState {
    pub resolver: Mutex<PlaceResolver>,
}
