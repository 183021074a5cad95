// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./message_test.rs"]
mod tests;

use crate::field::{
  fixed32_field_size,
  fixed64_field_size,
  length_delimited_field_size,
  uint32_field_size,
  uint64_field_size,
};
use crate::{Error, Result, size64};

//
// MessageSize
//

/// Running total of the encoded size of a message's fields. Fields are added as the message is
/// walked so that the length prefix is known before anything is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MessageSize {
  total: usize,
}

impl MessageSize {
  #[must_use]
  pub const fn new() -> Self {
    Self { total: 0 }
  }

  /// Size of the message body.
  #[must_use]
  pub const fn total(&self) -> usize {
    self.total
  }

  /// Size of the message written as a varint length followed by the body.
  pub fn length_prefixed_total(&self) -> Result<usize> {
    size64(self.total as u64)
      .checked_add(self.total)
      .ok_or(Error::SizeOverflow)
  }

  pub fn uint32(&mut self, field_number: u32, value: u32) -> Result<&mut Self> {
    self.add(uint32_field_size(field_number, value)?)
  }

  pub fn uint64(&mut self, field_number: u32, value: u64) -> Result<&mut Self> {
    self.add(uint64_field_size(field_number, value)?)
  }

  pub fn fixed32(&mut self, field_number: u32) -> Result<&mut Self> {
    self.add(fixed32_field_size(field_number)?)
  }

  pub fn fixed64(&mut self, field_number: u32) -> Result<&mut Self> {
    self.add(fixed64_field_size(field_number)?)
  }

  pub fn length_delimited(&mut self, field_number: u32, payload_len: usize) -> Result<&mut Self> {
    self.add(length_delimited_field_size(field_number, payload_len)?)
  }

  /// Adds an embedded message field whose body was sized by `nested`.
  pub fn nested(&mut self, field_number: u32, nested: &Self) -> Result<&mut Self> {
    self.length_delimited(field_number, nested.total)
  }

  fn add(&mut self, field_size: usize) -> Result<&mut Self> {
    let Some(total) = self.total.checked_add(field_size) else {
      log::debug!(
        "message size overflow adding {field_size} bytes to {}",
        self.total
      );
      return Err(Error::SizeOverflow);
    };

    self.total = total;
    Ok(self)
  }
}
