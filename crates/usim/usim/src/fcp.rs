//! File Control Parameters
//!
//! SELECT followed by GET RESPONSE yields an FCP template: tag `62`, a
//! length byte, then a flat run of tag/length/value entries, then the
//! status word. Only the values the engine needs (file size) are ever
//! looked up, so the template is scanned lazily.

use bytes::Bytes;
use tracing::trace;

use crate::constants::tags;
use crate::error::{Error, Result};

/// FCP template over a raw GET RESPONSE buffer (status word included)
#[derive(Debug, Clone, Copy)]
pub struct FcpTemplate<'a> {
    raw: &'a [u8],
}

impl<'a> FcpTemplate<'a> {
    /// Wrap `raw`, checking the template tag
    pub fn new(raw: &'a [u8]) -> Result<Self> {
        if raw.first() != Some(&tags::FCP_TEMPLATE) {
            return Err(Error::MalformedFcp(Bytes::copy_from_slice(raw)));
        }
        Ok(Self { raw })
    }

    /// Value of the first entry tagged `wanted`
    ///
    /// One-byte values are returned as is; longer values yield their first
    /// two bytes, big-endian.
    pub fn find(&self, wanted: u8) -> Result<u16> {
        let raw = self.raw;
        let end = raw.len().saturating_sub(2);
        let malformed = || Error::MalformedFcp(Bytes::copy_from_slice(raw));

        let mut pos = 2;
        while pos < end {
            let (tag, len) = match raw.get(pos..pos + 2) {
                Some(&[tag, len]) => (tag, usize::from(len)),
                _ => return Err(malformed()),
            };
            pos += 2;
            trace!(tag, len, "FCP entry");

            if tag == wanted {
                return match len {
                    1 => raw.get(pos).map(|&b| u16::from(b)).ok_or_else(malformed),
                    _ => raw
                        .get(pos..pos + 2)
                        .map(|v| u16::from_be_bytes([v[0], v[1]]))
                        .ok_or_else(malformed),
                };
            }

            pos += len;
            if pos > raw.len() {
                return Err(malformed());
            }
        }

        Err(Error::FcpTagNotFound(wanted))
    }

    /// File size (tag `80`)
    pub fn file_size(&self) -> Result<usize> {
        self.find(tags::FILE_SIZE).map(usize::from)
    }
}
