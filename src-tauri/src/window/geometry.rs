const BASE_WIDTH: f64 = 1280.0;
const BASE_HEIGHT: f64 = 749.0;

/// Main window size scaled to fit the primary display's work area, with the matching
/// page zoom so the game canvas fills the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MainGeometry {
    pub width: f64,
    pub height: f64,
    pub zoom: f64,
}

impl MainGeometry {
    pub fn for_work_area(work_width: f64, work_height: f64) -> Self {
        if work_width <= 0.0 || work_height <= 0.0 {
            return Self::unscaled();
        }

        let zoom = (work_width / BASE_WIDTH).min(work_height / BASE_HEIGHT);
        Self {
            width: (BASE_WIDTH * zoom).round(),
            height: (BASE_HEIGHT * zoom).round(),
            zoom,
        }
    }

    pub fn unscaled() -> Self {
        Self {
            width: BASE_WIDTH,
            height: BASE_HEIGHT,
            zoom: 1.0,
        }
    }
}
