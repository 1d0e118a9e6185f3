use crate::container::nbt::{Compound, ListTag, TAG_COMPOUND, Tag};
use crate::domain::MapRecord;
use crate::error::{DataCraftError, Result};
use std::io::{Read, Write};

pub fn file_name(id: u32) -> String {
    format!("map_{id}.dat")
}

pub fn to_nbt(rec: &MapRecord, data_version: i32) -> Compound {
    let mut data = Compound::new();
    data.insert("scale", Tag::Byte(rec.scale));
    data.insert("dimension", Tag::String(rec.dimension.clone()));
    data.insert("trackingPosition", Tag::Byte(rec.tracking_position as i8));
    data.insert("unlimitedTracking", Tag::Byte(rec.unlimited_tracking as i8));
    data.insert("locked", Tag::Byte(rec.locked as i8));
    data.insert("xCenter", Tag::Int(rec.x_center));
    data.insert("zCenter", Tag::Int(rec.z_center));
    data.insert("colors", Tag::ByteArray(rec.colors.clone()));
    data.insert("banners", Tag::List(ListTag::empty(TAG_COMPOUND)));
    data.insert("frames", Tag::List(ListTag::empty(TAG_COMPOUND)));

    let mut root = Compound::new();
    root.insert("data", Tag::Compound(data));
    root.insert("DataVersion", Tag::Int(data_version));
    root
}

/// Only `data.colors` is required; the descriptive fields fall back to defaults.
pub fn from_nbt(id: u32, mut root: Compound) -> Result<MapRecord> {
    let mut data = match root.take("data") {
        Some(Tag::Compound(c)) => c,
        _ => {
            return Err(DataCraftError::Format(format!(
                "map_{id}.dat: missing 'data' compound"
            )));
        }
    };
    let colors = match data.take("colors") {
        Some(Tag::ByteArray(c)) => c,
        _ => {
            return Err(DataCraftError::Format(format!(
                "map_{id}.dat: missing 'colors' byte array"
            )));
        }
    };
    let mut rec = MapRecord::new(id, colors);
    if let Some(v) = data.byte("scale") {
        rec.scale = v;
    }
    if let Some(d) = data.string("dimension") {
        rec.dimension = d.to_string();
    }
    if let Some(v) = data.byte("trackingPosition") {
        rec.tracking_position = v != 0;
    }
    if let Some(v) = data.byte("unlimitedTracking") {
        rec.unlimited_tracking = v != 0;
    }
    if let Some(v) = data.byte("locked") {
        rec.locked = v != 0;
    }
    if let Ok(v) = data.int("xCenter") {
        rec.x_center = v;
    }
    if let Ok(v) = data.int("zCenter") {
        rec.z_center = v;
    }
    Ok(rec)
}

pub fn write_to(w: impl Write, rec: &MapRecord, data_version: i32) -> Result<()> {
    crate::container::nbt::write_gzip(w, &to_nbt(rec, data_version))
}

pub fn read_from(r: impl Read, id: u32) -> Result<MapRecord> {
    from_nbt(id, crate::container::nbt::read_gzip(r)?)
}
