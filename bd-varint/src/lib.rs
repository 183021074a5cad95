// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

//! Size computation for protobuf base 128 varints.
//!
//! A varint carries 7 bits of payload per byte, least significant group first, with the high bit
//! of each byte flagging continuation. The functions here answer how many bytes a value would
//! take without encoding it, which lets an encoder compute length prefixes up front and write a
//! message in a single pass.
//!
//! See <https://protobuf.dev/programming-guides/encoding/#varints>.

#[cfg(test)]
#[path = "./lib_test.rs"]
mod tests;

#[cfg(test)]
#[ctor::ctor]
fn test_global_init() {
  // Fails only if a global subscriber is already set.
  let _ignored = tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
    )
    .with_test_writer()
    .with_line_number(true)
    .compact()
    .try_init();
}

pub mod field;
pub mod message;

pub use field::{MAX_FIELD_NUMBER, WireType};
pub use message::MessageSize;

/// Maximum varint size for u32 (5 bytes).
pub const MAX_SIZE_32: usize = 5;

/// Maximum varint size for u64 (10 bytes).
pub const MAX_SIZE_64: usize = 10;

static_assertions::const_assert_eq!(size32(u32::MAX), MAX_SIZE_32);
static_assertions::const_assert_eq!(size64(u64::MAX), MAX_SIZE_64);

/// Returns the number of bytes needed to varint encode `value`. Thresholds are checked from the
/// smallest up.
#[must_use]
pub const fn size32(value: u32) -> usize {
  if value & (u32::MAX << 7) == 0 {
    return 1;
  }
  if value & (u32::MAX << 14) == 0 {
    return 2;
  }
  if value & (u32::MAX << 21) == 0 {
    return 3;
  }
  if value & (u32::MAX << 28) == 0 {
    return 4;
  }
  MAX_SIZE_32
}

/// Like [`size32`], except for u64.
#[must_use]
pub const fn size64(value: u64) -> usize {
  if value & (u64::MAX << 7) == 0 {
    return 1;
  }
  if value & (u64::MAX << 14) == 0 {
    return 2;
  }
  if value & (u64::MAX << 21) == 0 {
    return 3;
  }
  if value & (u64::MAX << 28) == 0 {
    return 4;
  }
  if value & (u64::MAX << 35) == 0 {
    return 5;
  }
  if value & (u64::MAX << 42) == 0 {
    return 6;
  }
  if value & (u64::MAX << 49) == 0 {
    return 7;
  }
  if value & (u64::MAX << 56) == 0 {
    return 8;
  }
  if value & (u64::MAX << 63) == 0 {
    return 9;
  }
  MAX_SIZE_64
}

//
// VarintSize
//

/// Integer types whose varint size can be computed.
///
/// Signed types are sized by their two's complement bit pattern at their own width, so `-1i32`
/// is 5 bytes and `-1i64` is 10 bytes. Note that this differs from the protobuf `int32` field
/// encoding, which sign extends negative values to 64 bits.
pub trait VarintSize {
  fn varint_size(self) -> usize;
}

impl VarintSize for u32 {
  fn varint_size(self) -> usize {
    size32(self)
  }
}

impl VarintSize for i32 {
  #[allow(clippy::cast_sign_loss)]
  fn varint_size(self) -> usize {
    size32(self as u32)
  }
}

impl VarintSize for u64 {
  fn varint_size(self) -> usize {
    size64(self)
  }
}

impl VarintSize for i64 {
  #[allow(clippy::cast_sign_loss)]
  fn varint_size(self) -> usize {
    size64(self as u64)
  }
}

impl VarintSize for usize {
  fn varint_size(self) -> usize {
    size64(self as u64)
  }
}

//
// Error
//

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  #[error(
    "field number {0} is outside of the valid range [1, {max}]",
    max = MAX_FIELD_NUMBER
  )]
  InvalidFieldNumber(u32),
  #[error("encoded size overflows usize")]
  SizeOverflow,
}

pub type Result<T> = std::result::Result<T, Error>;
