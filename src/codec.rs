//! The packed on-slot record format and a safe cursor for walking it.
//!
//! A slot is a contiguous byte buffer holding zero or more back-to-back
//! records terminated by a single `0x00` sentinel byte. Each record is
//!
//! ```text
//! [len-prefix : 1 or 2 bytes] [key : len bytes] [value : 8 bytes, little-endian]
//! ```
//!
//! Length prefix encoding:
//!   * `len < 128`:  one byte, equal to `len` (top bit clear).
//!   * `len >= 128`: two little-endian bytes whose 16-bit value equals
//!     `len | 0x8000`; the low 15 bits give the length, the high bit
//!     marks the long form.
//!
//! No length-prefix byte is ever zero for a real record (a one-byte
//! prefix of `0` would only occur for a zero-length key, which is never
//! stored in a slot — the empty key lives on the trie root's terminal
//! value — so the lone `0x00` sentinel byte is unambiguous).
//!
//! This module replaces the raw pointer arithmetic the teacher's
//! `Leaf`/`Branch` types use over their own fixed layouts with a safe
//! cursor over a `&[u8]` view, per the redesign's guidance to keep the
//! wire-like record format but drop the unsafe plumbing around it.

pub const VALUE_SIZE: usize = 8;
const LONG_FORM_BIT: u16 = 0x8000;
const SHORT_FORM_MAX: usize = 127;

/// Number of bytes a record with the given key length occupies,
/// including its length prefix and trailing value.
pub fn record_len(key_len: usize) -> usize {
    prefix_len(key_len) + key_len + VALUE_SIZE
}

fn prefix_len(key_len: usize) -> usize {
    if key_len <= SHORT_FORM_MAX {
        1
    } else {
        2
    }
}

/// Append one record to `buf`, which must not yet carry a trailing
/// sentinel (the caller adds it once, after the last record).
pub fn write_record(buf: &mut Vec<u8>, key: &[u8], value: u64) {
    if key.len() <= SHORT_FORM_MAX {
        buf.push(key.len() as u8);
    } else {
        let encoded: u16 = (key.len() as u16) | LONG_FORM_BIT;
        buf.extend_from_slice(&encoded.to_le_bytes());
    }
    buf.extend_from_slice(key);
    buf.extend_from_slice(&value.to_le_bytes());
}

/// A cursor positioned at the start of a record (or at the sentinel, or
/// past the end of the buffer) inside a slot's byte buffer.
#[derive(Clone, Copy)]
pub struct SlotCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

/// A decoded view onto one record: its key bytes, its value, and the
/// byte offsets needed to splice it out of the buffer.
pub struct Record<'a> {
    pub key: &'a [u8],
    pub value: u64,
    pub record_start: usize,
    pub record_end: usize,
    pub value_start: usize,
}

impl<'a> SlotCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        SlotCursor { buf, pos: 0 }
    }

    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        SlotCursor { buf, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Decode the record at the cursor's current position, or `None` if
    /// the cursor rests on the sentinel byte (an empty slot, or the end
    /// of the last record).
    pub fn current(&self) -> Option<Record<'a>> {
        let first = *self.buf.get(self.pos)?;
        if first == 0 {
            return None;
        }
        let (key_len, prefix_bytes) = if first & 0x80 == 0 {
            (first as usize, 1)
        } else {
            let raw = u16::from_le_bytes([first, self.buf[self.pos + 1]]);
            ((raw & !LONG_FORM_BIT) as usize, 2)
        };
        let key_start = self.pos + prefix_bytes;
        let key_end = key_start + key_len;
        let value_start = key_end;
        let value_end = value_start + VALUE_SIZE;
        let value = u64::from_le_bytes(self.buf[value_start..value_end].try_into().unwrap());
        Some(Record {
            key: &self.buf[key_start..key_end],
            value,
            record_start: self.pos,
            record_end: value_end,
            value_start,
        })
    }

    /// Advance past the current record, landing on the next record, the
    /// sentinel, or (only if the caller walked off a malformed buffer)
    /// past the end.
    pub fn advance(&mut self) {
        if let Some(rec) = self.current() {
            self.pos = rec.record_end;
        }
    }
}
