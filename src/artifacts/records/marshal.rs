//! Marshalled (`-G`) output decoder
//!
//! Binary mode emits a sequence of self-describing dictionaries:
//!
//! ```text
//! '{'  ( 's' <len:u32le> <key bytes>  ( 's' <len:u32le> <bytes> | 'i' <i32le> ) )*  '0'
//! ```
//!
//! Unlike text mode there is no way to resynchronize after a misaligned byte,
//! so any deviation fails the whole stream and no partial records are
//! returned.

use crate::artifacts::records::raw_record::RawRecord;
use anyhow::{Context, bail};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

const DICT_START: u8 = b'{';
const DICT_END: u8 = b'0';
const TYPE_STRING: u8 = b's';
const TYPE_INT: u8 = b'i';

/// Decode an entire marshalled stream
pub fn decode(bytes: &[u8]) -> anyhow::Result<Vec<RawRecord>> {
    let mut reader = Cursor::new(bytes);
    let mut records = Vec::new();

    while (reader.position() as usize) < bytes.len() {
        let offset = reader.position();
        let record = read_dict(&mut reader)
            .with_context(|| format!("invalid marshalled record at byte {offset}"))?;
        records.push(record);
    }

    Ok(records)
}

fn read_dict(reader: &mut Cursor<&[u8]>) -> anyhow::Result<RawRecord> {
    let marker = reader.read_u8().context("missing dictionary start")?;
    if marker != DICT_START {
        bail!("expected dictionary start, found byte {marker:#04x}");
    }

    let mut record = RawRecord::new();
    loop {
        let key_type = reader.read_u8().context("unterminated dictionary")?;
        match key_type {
            DICT_END => return Ok(record),
            TYPE_STRING => {
                let key = read_string(reader).context("unreadable key")?;
                let value = read_value(reader)
                    .with_context(|| format!("unreadable value for key {key:?}"))?;
                record.insert(key, value);
            }
            other => bail!("unsupported key type {other:#04x}"),
        }
    }
}

fn read_value(reader: &mut Cursor<&[u8]>) -> anyhow::Result<String> {
    let value_type = reader.read_u8().context("missing value type")?;
    match value_type {
        TYPE_STRING => read_string(reader),
        TYPE_INT => Ok(reader.read_i32::<LittleEndian>()?.to_string()),
        other => bail!("unsupported value type {other:#04x}"),
    }
}

fn read_string(reader: &mut Cursor<&[u8]>) -> anyhow::Result<String> {
    let length = reader.read_u32::<LittleEndian>()? as usize;
    let remaining = reader.get_ref().len() - reader.position() as usize;
    if length > remaining {
        bail!("string length {length} exceeds remaining {remaining} bytes");
    }

    let mut buffer = vec![0; length];
    reader.read_exact(&mut buffer)?;

    Ok(String::from_utf8(buffer)?)
}

/// Encode records the way the executable does, for fixtures and round trips
pub fn encode(records: &[RawRecord]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for record in records {
        bytes.push(DICT_START);
        for (key, value) in record.iter() {
            push_string(&mut bytes, key);
            push_string(&mut bytes, value);
        }
        bytes.push(DICT_END);
    }
    bytes
}

fn push_string(bytes: &mut Vec<u8>, value: &str) {
    bytes.push(TYPE_STRING);
    bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
    bytes.extend_from_slice(value.as_bytes());
}
