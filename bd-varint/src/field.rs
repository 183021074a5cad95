// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

//! Whole field sizes: the field key (tag) plus the encoded value.
//!
//! Field format:
//! ```text
//! [key: varint][value]
//! ```
//!
//! - `key`: `field_number << 3 | wire_type`, varint encoded
//! - `value`: a varint, 4 or 8 fixed bytes, or a varint length followed by that many bytes

#[cfg(test)]
#[path = "./field_test.rs"]
mod tests;

use crate::{Error, Result, size32, size64};

/// Largest field number protobuf allows (2^29 - 1).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

const FIXED32_LEN: usize = 4;
const FIXED64_LEN: usize = 8;

//
// WireType
//

/// The protobuf wire types carried in the low 3 bits of a field key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum WireType {
  Varint = 0,
  Fixed64 = 1,
  LengthDelimited = 2,
  Fixed32 = 5,
}

impl WireType {
  /// Returns the key value for a field of this wire type.
  pub fn tag(self, field_number: u32) -> Result<u32> {
    check_field_number(field_number)?;
    Ok((field_number << 3) | self as u32)
  }
}

fn check_field_number(field_number: u32) -> Result<()> {
  if field_number == 0 || field_number > MAX_FIELD_NUMBER {
    log::debug!("rejecting field number {field_number}");
    return Err(Error::InvalidFieldNumber(field_number));
  }

  Ok(())
}

/// Size of the key for `field_number`. The wire type does not affect the size since it only
/// occupies the lowest 3 bits.
pub fn tag_size(field_number: u32) -> Result<usize> {
  check_field_number(field_number)?;
  Ok(size32(field_number << 3))
}

/// Size of a `uint32` field (also `enum` and non-negative `int32`).
pub fn uint32_field_size(field_number: u32, value: u32) -> Result<usize> {
  Ok(tag_size(field_number)? + size32(value))
}

/// Size of a `uint64` field (also non-negative `int64`).
pub fn uint64_field_size(field_number: u32, value: u64) -> Result<usize> {
  Ok(tag_size(field_number)? + size64(value))
}

pub fn fixed32_field_size(field_number: u32) -> Result<usize> {
  Ok(tag_size(field_number)? + FIXED32_LEN)
}

pub fn fixed64_field_size(field_number: u32) -> Result<usize> {
  Ok(tag_size(field_number)? + FIXED64_LEN)
}

/// Size of a `string`, `bytes` or embedded message field whose payload is `payload_len` bytes.
pub fn length_delimited_field_size(field_number: u32, payload_len: usize) -> Result<usize> {
  let header = tag_size(field_number)? + size64(payload_len as u64);
  header.checked_add(payload_len).ok_or_else(|| {
    log::debug!("length delimited field {field_number} with {payload_len} bytes overflows");
    Error::SizeOverflow
  })
}
