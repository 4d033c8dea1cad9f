/// Value every depth cell holds after a clear.
pub const DEPTH_CLEAR: f32 = 1.0e10;

/// Per-pixel nearest-depth store. Smaller is nearer.
#[derive(Clone, Debug)]
pub struct DepthBuffer {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: vec![DEPTH_CLEAR; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.values.fill(DEPTH_CLEAR);
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.values = vec![DEPTH_CLEAR; width * height];
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.values[y * self.width + x])
    }

    /// Stores `depth` and returns `true` when it is strictly nearer than the
    /// current value. Out-of-bounds coordinates always fail. Equal depths
    /// keep the earlier write.
    pub fn test_and_set(&mut self, x: i32, y: i32, depth: f32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        let slot = &mut self.values[y as usize * self.width + x as usize];
        if depth < *slot {
            *slot = depth;
            true
        } else {
            false
        }
    }
}
