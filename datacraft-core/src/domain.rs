/// One persisted map: a chunk's colors plus the fields the game expects.
#[derive(Clone, Debug, PartialEq)]
pub struct MapRecord {
    pub id: u32,
    pub colors: Vec<i8>,
    pub scale: i8,
    pub dimension: String,
    pub tracking_position: bool,
    pub unlimited_tracking: bool,
    pub locked: bool,
    pub x_center: i32,
    pub z_center: i32,
}

impl MapRecord {
    /// A locked overworld map centered at `id * 128`.
    pub fn new(id: u32, colors: Vec<i8>) -> Self {
        let center = (id as i32).wrapping_mul(128);
        Self {
            id,
            colors,
            scale: 0,
            dimension: "minecraft:overworld".to_string(),
            tracking_position: true,
            unlimited_tracking: false,
            locked: true,
            x_center: center,
            z_center: center,
        }
    }
}

/// Summary of one encode run, keyed by `start_id`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetadata {
    pub filename: String,
    pub original_size: u64,
    pub chunk_count: u64,
    pub start_id: u32,
    /// `start_id - 1` for an empty run.
    pub end_id: u32,
    pub blake3: Option<[u8; 32]>,
    pub created: i64,
}

impl RunMetadata {
    pub fn id_range(&self) -> std::ops::Range<u64> {
        let start = self.start_id as u64;
        start..start + self.chunk_count
    }
}
