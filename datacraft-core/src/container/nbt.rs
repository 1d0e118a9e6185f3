//! Minimal NBT (named binary tag) codec, big-endian, as used by world saves.
//!
//! Strings are written as plain UTF-8 with a u16 length prefix. Java's
//! modified UTF-8 only differs for NUL and supplementary characters, which
//! never appear in the keys and values we write.

use crate::error::{DataCraftError, Result};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{Read, Write};

pub const TAG_END: u8 = 0;
pub const TAG_BYTE: u8 = 1;
pub const TAG_SHORT: u8 = 2;
pub const TAG_INT: u8 = 3;
pub const TAG_LONG: u8 = 4;
pub const TAG_FLOAT: u8 = 5;
pub const TAG_DOUBLE: u8 = 6;
pub const TAG_BYTE_ARRAY: u8 = 7;
pub const TAG_STRING: u8 = 8;
pub const TAG_LIST: u8 = 9;
pub const TAG_COMPOUND: u8 = 10;
pub const TAG_INT_ARRAY: u8 = 11;
pub const TAG_LONG_ARRAY: u8 = 12;

const MAX_DEPTH: usize = 512;

#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(ListTag),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

/// Homogeneous list; `kind` is kept so empty lists round-trip with their element type.
#[derive(Clone, Debug, PartialEq)]
pub struct ListTag {
    pub kind: u8,
    pub items: Vec<Tag>,
}

impl ListTag {
    pub fn empty(kind: u8) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }
}

/// Compound tag. Keeps insertion order so written files are stable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compound(pub Vec<(String, Tag)>);

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, tag: Tag) {
        let key = key.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = tag;
        } else {
            self.0.push((key, tag));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, t)| t)
    }

    pub fn take(&mut self, key: &str) -> Option<Tag> {
        let pos = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(pos).1)
    }

    pub fn compound(&self, key: &str) -> Result<&Compound> {
        match self.get(key) {
            Some(Tag::Compound(c)) => Ok(c),
            Some(_) => Err(format_err(format!("'{key}' is not a compound"))),
            None => Err(format_err(format!("missing '{key}'"))),
        }
    }

    pub fn int(&self, key: &str) -> Result<i32> {
        match self.get(key) {
            Some(Tag::Int(v)) => Ok(*v),
            Some(_) => Err(format_err(format!("'{key}' is not an int"))),
            None => Err(format_err(format!("missing '{key}'"))),
        }
    }

    pub fn byte(&self, key: &str) -> Option<i8> {
        match self.get(key) {
            Some(Tag::Byte(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Tag::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl Tag {
    pub fn id(&self) -> u8 {
        match self {
            Tag::Byte(_) => TAG_BYTE,
            Tag::Short(_) => TAG_SHORT,
            Tag::Int(_) => TAG_INT,
            Tag::Long(_) => TAG_LONG,
            Tag::Float(_) => TAG_FLOAT,
            Tag::Double(_) => TAG_DOUBLE,
            Tag::ByteArray(_) => TAG_BYTE_ARRAY,
            Tag::String(_) => TAG_STRING,
            Tag::List(_) => TAG_LIST,
            Tag::Compound(_) => TAG_COMPOUND,
            Tag::IntArray(_) => TAG_INT_ARRAY,
            Tag::LongArray(_) => TAG_LONG_ARRAY,
        }
    }

    fn write_payload<W: Write>(&self, w: &mut W) -> Result<()> {
        match self {
            Tag::Byte(v) => w.write_all(&v.to_be_bytes())?,
            Tag::Short(v) => w.write_all(&v.to_be_bytes())?,
            Tag::Int(v) => w.write_all(&v.to_be_bytes())?,
            Tag::Long(v) => w.write_all(&v.to_be_bytes())?,
            Tag::Float(v) => w.write_all(&v.to_be_bytes())?,
            Tag::Double(v) => w.write_all(&v.to_be_bytes())?,
            Tag::ByteArray(v) => {
                write_len(w, v.len())?;
                let raw: Vec<u8> = v.iter().map(|&b| b as u8).collect();
                w.write_all(&raw)?;
            }
            Tag::String(s) => write_str(w, s)?,
            Tag::List(list) => {
                if let Some(bad) = list.items.iter().find(|t| t.id() != list.kind) {
                    return Err(format_err(format!(
                        "list of kind {} holds tag {}",
                        list.kind,
                        bad.id()
                    )));
                }
                w.write_all(&[list.kind])?;
                write_len(w, list.items.len())?;
                for item in &list.items {
                    item.write_payload(w)?;
                }
            }
            Tag::Compound(c) => write_compound(w, c)?,
            Tag::IntArray(v) => {
                write_len(w, v.len())?;
                for x in v {
                    w.write_all(&x.to_be_bytes())?;
                }
            }
            Tag::LongArray(v) => {
                write_len(w, v.len())?;
                for x in v {
                    w.write_all(&x.to_be_bytes())?;
                }
            }
        }
        Ok(())
    }

    fn read_payload<R: Read>(r: &mut R, id: u8, depth: usize) -> Result<Tag> {
        if depth > MAX_DEPTH {
            return Err(format_err("nesting too deep".into()));
        }
        let tag = match id {
            TAG_BYTE => Tag::Byte(i8::from_be_bytes(read_arr(r)?)),
            TAG_SHORT => Tag::Short(i16::from_be_bytes(read_arr(r)?)),
            TAG_INT => Tag::Int(i32::from_be_bytes(read_arr(r)?)),
            TAG_LONG => Tag::Long(i64::from_be_bytes(read_arr(r)?)),
            TAG_FLOAT => Tag::Float(f32::from_be_bytes(read_arr(r)?)),
            TAG_DOUBLE => Tag::Double(f64::from_be_bytes(read_arr(r)?)),
            TAG_BYTE_ARRAY => {
                let n = read_len(r)?;
                let raw = read_exact_vec(r, n)?;
                Tag::ByteArray(raw.into_iter().map(|b| b as i8).collect())
            }
            TAG_STRING => Tag::String(read_str(r)?),
            TAG_LIST => {
                let [kind] = read_arr::<_, 1>(r)?;
                let n = read_len(r)?;
                if n > 0 && kind == TAG_END {
                    return Err(format_err("non-empty list of TAG_End".into()));
                }
                let mut items = Vec::with_capacity(n.min(1024));
                for _ in 0..n {
                    items.push(Tag::read_payload(r, kind, depth + 1)?);
                }
                Tag::List(ListTag { kind, items })
            }
            TAG_COMPOUND => Tag::Compound(read_compound(r, depth)?),
            TAG_INT_ARRAY => {
                let n = read_len(r)?;
                let raw = read_exact_vec(r, n * 4)?;
                Tag::IntArray(
                    raw.chunks_exact(4)
                        .map(|b| i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
                        .collect(),
                )
            }
            TAG_LONG_ARRAY => {
                let n = read_len(r)?;
                let raw = read_exact_vec(r, n * 8)?;
                Tag::LongArray(
                    raw.chunks_exact(8)
                        .map(|b| {
                            let mut a = [0u8; 8];
                            a.copy_from_slice(b);
                            i64::from_be_bytes(a)
                        })
                        .collect(),
                )
            }
            other => return Err(format_err(format!("unknown tag id {other}"))),
        };
        Ok(tag)
    }
}

/// Write a named root compound (the shape of every `.dat` file).
pub fn write_root<W: Write>(mut w: W, name: &str, root: &Compound) -> Result<()> {
    w.write_all(&[TAG_COMPOUND])?;
    write_str(&mut w, name)?;
    write_compound(&mut w, root)
}

pub fn read_root<R: Read>(mut r: R) -> Result<(String, Compound)> {
    let [kind] = read_arr::<_, 1>(&mut r)?;
    if kind != TAG_COMPOUND {
        return Err(format_err(format!("root tag is {kind}, expected compound")));
    }
    let name = read_str(&mut r)?;
    let root = read_compound(&mut r, 0)?;
    Ok((name, root))
}

/// Gzip-compressed root compound, with an empty root name.
pub fn write_gzip<W: Write>(w: W, root: &Compound) -> Result<()> {
    let mut enc = GzEncoder::new(w, Compression::default());
    write_root(&mut enc, "", root)?;
    enc.finish()?;
    Ok(())
}

pub fn read_gzip<R: Read>(r: R) -> Result<Compound> {
    let (_, root) = read_root(GzDecoder::new(r))?;
    Ok(root)
}

fn write_compound<W: Write>(w: &mut W, c: &Compound) -> Result<()> {
    for (k, v) in &c.0 {
        w.write_all(&[v.id()])?;
        write_str(w, k)?;
        v.write_payload(w)?;
    }
    w.write_all(&[TAG_END])?;
    Ok(())
}

fn read_compound<R: Read>(r: &mut R, depth: usize) -> Result<Compound> {
    let mut c = Compound::new();
    loop {
        let [kind] = read_arr::<_, 1>(r)?;
        if kind == TAG_END {
            break;
        }
        let key = read_str(r)?;
        let value = Tag::read_payload(r, kind, depth + 1)?;
        c.0.push((key, value));
    }
    Ok(c)
}

fn format_err(msg: String) -> DataCraftError {
    DataCraftError::Format(format!("nbt: {msg}"))
}

fn write_len<W: Write>(w: &mut W, n: usize) -> Result<()> {
    let n = i32::try_from(n).map_err(|_| format_err(format!("length {n} exceeds i32")))?;
    w.write_all(&n.to_be_bytes())?;
    Ok(())
}

fn read_len<R: Read>(r: &mut R) -> Result<usize> {
    let n = i32::from_be_bytes(read_arr(r)?);
    usize::try_from(n).map_err(|_| format_err(format!("negative length {n}")))
}

fn write_str<W: Write>(w: &mut W, s: &str) -> Result<()> {
    let n = u16::try_from(s.len()).map_err(|_| format_err("string too long".into()))?;
    w.write_all(&n.to_be_bytes())?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

fn read_str<R: Read>(r: &mut R) -> Result<String> {
    let n = u16::from_be_bytes(read_arr(r)?) as usize;
    let raw = read_exact_vec(r, n)?;
    String::from_utf8(raw).map_err(|e| format_err(format!("bad string: {e}")))
}

fn read_arr<R: Read, const N: usize>(r: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

// Grows with the data instead of trusting the declared length up front.
fn read_exact_vec<R: Read>(r: &mut R, n: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(n.min(1 << 16));
    r.take(n as u64).read_to_end(&mut out)?;
    if out.len() != n {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("nbt: wanted {n} bytes, got {}", out.len()),
        )
        .into());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Compound {
        let mut inner = Compound::new();
        inner.insert("scale", Tag::Byte(0));
        inner.insert("dimension", Tag::String("minecraft:overworld".into()));
        inner.insert("xCenter", Tag::Int(-128));
        inner.insert("colors", Tag::ByteArray(vec![-128, -1, 0, 1, 127]));
        inner.insert("banners", Tag::List(ListTag::empty(TAG_COMPOUND)));
        inner.insert("ticks", Tag::Long(i64::MIN));
        inner.insert("ratio", Tag::Double(0.5));
        inner.insert("ids", Tag::IntArray(vec![1, -2, 3]));
        let mut root = Compound::new();
        root.insert("data", Tag::Compound(inner));
        root.insert("DataVersion", Tag::Int(3465));
        root
    }

    #[test]
    fn known_bytes_for_tiny_compound() {
        let mut root = Compound::new();
        root.insert("a", Tag::Byte(-1));
        let mut buf = Vec::new();
        write_root(&mut buf, "", &root).unwrap();
        assert_eq!(buf, vec![10, 0, 0, 1, 0, 1, b'a', 0xFF, 0]);
    }

    #[test]
    fn gzip_round_trip_keeps_order_and_types() {
        let root = sample();
        let mut buf = Vec::new();
        write_gzip(&mut buf, &root).unwrap();
        // gzip magic
        assert_eq!(&buf[..2], &[0x1f, 0x8b]);
        let back = read_gzip(&buf[..]).unwrap();
        assert_eq!(back, root);
        let data = back.compound("data").unwrap();
        assert_eq!(data.int("xCenter").unwrap(), -128);
        assert_eq!(data.string("dimension"), Some("minecraft:overworld"));
    }

    #[test]
    fn truncated_input_is_an_error() {
        let mut buf = Vec::new();
        write_root(&mut buf, "", &sample()).unwrap();
        buf.truncate(buf.len() - 10);
        assert!(read_root(&buf[..]).is_err());
    }

    #[test]
    fn rejects_unknown_tag_and_negative_length() {
        let bad_tag = [10u8, 0, 0, 99, 0, 1, b'x', 0];
        assert!(matches!(
            read_root(&bad_tag[..]),
            Err(DataCraftError::Format(_))
        ));
        let neg = [10u8, 0, 0, 7, 0, 1, b'x', 0xFF, 0xFF, 0xFF, 0xFF, 0];
        assert!(matches!(read_root(&neg[..]), Err(DataCraftError::Format(_))));
    }

    #[test]
    fn mixed_list_is_rejected_on_write() {
        let mut root = Compound::new();
        root.insert(
            "l",
            Tag::List(ListTag {
                kind: TAG_INT,
                items: vec![Tag::Int(1), Tag::Byte(2)],
            }),
        );
        assert!(write_root(Vec::new(), "", &root).is_err());
    }
}
