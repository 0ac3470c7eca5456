//! Shared in-memory channels for pipeline tests.

#![allow(dead_code)]

use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Cloneable byte sink; clones share the same buffer.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn bytes(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.bytes()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reader that hands out `chunk` bytes per call, sleeping `delay` before each.
pub struct SlowReader {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
    delay: Duration,
}

impl SlowReader {
    pub fn new(data: Vec<u8>, chunk: usize, delay: Duration) -> Self {
        Self {
            data,
            pos: 0,
            chunk,
            delay,
        }
    }
}

impl Read for SlowReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.data.len() {
            return Ok(0);
        }
        thread::sleep(self.delay);
        let end = (self.pos + self.chunk.min(buf.len())).min(self.data.len());
        let n = end - self.pos;
        buf[..n].copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(n)
    }
}

/// Reader that yields `data` once and then fails.
pub struct FailingReader {
    data: Option<Vec<u8>>,
}

impl FailingReader {
    pub fn after(data: Vec<u8>) -> Self {
        Self { data: Some(data) }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.take() {
            Some(data) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                Ok(n)
            }
            None => Err(io::Error::new(io::ErrorKind::Other, "input device failed")),
        }
    }
}

/// Sink that rejects every write.
pub struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "downstream closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "downstream closed"))
    }
}

pub fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 256) as u8).collect()
}

/// Individual redraws on the status channel (split on carriage returns).
pub fn status_frames(status: &str) -> Vec<String> {
    status
        .split('\r')
        .map(|f| f.trim_end().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

/// Byte count shown by a frame rendered with a sub-KiB total: the `<n>B` after the bar.
pub fn shown_bytes(frame: &str) -> u64 {
    let after_bar = frame.split("] ").nth(1).expect("bar delimiter");
    let token = after_bar.split_whitespace().next().expect("byte count");
    token.trim_end_matches('B').parse().expect("plain byte count")
}
