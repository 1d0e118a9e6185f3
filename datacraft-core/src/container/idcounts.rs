use crate::container::nbt::{self, Compound, Tag};
use crate::error::Result;
use std::io::{Read, Write};

pub const FILE_NAME: &str = "idcounts.dat";

pub fn write_to(w: impl Write, highest: u32, data_version: i32) -> Result<()> {
    let mut data = Compound::new();
    data.insert("map", Tag::Int(highest as i32));
    let mut root = Compound::new();
    root.insert("data", Tag::Compound(data));
    root.insert("DataVersion", Tag::Int(data_version));
    nbt::write_gzip(w, &root)
}

pub fn read_from(r: impl Read) -> Result<u32> {
    let root = nbt::read_gzip(r)?;
    let map = root.compound("data")?.int("map")?;
    Ok(map as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let mut buf = Vec::new();
        write_to(&mut buf, 1_000_041, 3465).unwrap();
        assert_eq!(read_from(&buf[..]).unwrap(), 1_000_041);
    }
}
