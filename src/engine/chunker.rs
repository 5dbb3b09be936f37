//! Fixed-size re-chunking of a response body.
//!
//! HTTP clients hand out body frames of whatever size the network produced.
//! [`ChunkReader`] regroups them so that every chunk written to disk is exactly
//! `chunk_size` bytes long, except the last one.

use crate::error::{Error, Result};

use bytes::{Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::Duration;

/// Reads a byte stream in chunks of a fixed size, bounding every read by a timeout.
pub struct ChunkReader {
    body: BoxStream<'static, Result<Bytes>>,
    buffer: BytesMut,
    chunk_size: usize,
    read_timeout: Duration,
    exhausted: bool,
}

impl ChunkReader {
    pub fn new(
        body: BoxStream<'static, Result<Bytes>>,
        chunk_size: usize,
        read_timeout: Duration,
    ) -> Self {
        Self {
            body,
            buffer: BytesMut::with_capacity(chunk_size),
            chunk_size: chunk_size.max(1),
            read_timeout,
            exhausted: false,
        }
    }

    /// Returns the next chunk, or `None` once the body is fully consumed.
    pub async fn next_chunk(&mut self) -> Option<Result<Bytes>> {
        while !self.exhausted && self.buffer.len() < self.chunk_size {
            match tokio::time::timeout(self.read_timeout, self.body.next()).await {
                Err(_) => return Some(Err(Error::Timeout(self.read_timeout))),
                Ok(None) => self.exhausted = true,
                Ok(Some(Err(e))) => return Some(Err(e)),
                Ok(Some(Ok(frame))) => self.buffer.extend_from_slice(&frame),
            }
        }

        if self.buffer.is_empty() {
            return None;
        }
        let len = self.buffer.len().min(self.chunk_size);
        Some(Ok(self.buffer.split_to(len).freeze()))
    }
}
