use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::warn;
use pifm_core::constants::audio::{BLOCK_BYTES, HEADER_SIZE};
use pifm_core::samples::{decode_block, SampleBlock};

use crate::error::{PifmError, Result};

/// Signed 16-bit samples read block by block after a fixed-size header
///
/// The header is skipped, not parsed: the stream is assumed to be 16 bit
/// mono at the rate the delay loop is calibrated for.
pub struct WavSamples<R: Read> {
    reader: R,
    block: SampleBlock,
    position: usize,
    finished: bool,
    error: Option<io::Error>,
}

impl WavSamples<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let to_error = |source| PifmError::AudioSource {
            path: path.display().to_string(),
            source,
        };
        let file = File::open(path).map_err(to_error)?;
        WavSamples::from_reader(file).map_err(to_error)
    }
}

impl<R: Read> WavSamples<R> {
    pub fn from_reader(mut reader: R) -> io::Result<Self> {
        io::copy(&mut reader.by_ref().take(HEADER_SIZE), &mut io::sink())?;
        Ok(Self {
            reader,
            block: SampleBlock::new(),
            position: 0,
            finished: false,
            error: None,
        })
    }

    /// Read error that ended the stream early, if any
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn fill_block(&mut self) {
        let mut buffer = [0u8; BLOCK_BYTES];
        let mut filled = 0;

        while filled < BLOCK_BYTES {
            match self.reader.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(count) => filled += count,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("Audio read failed, stopping early: {}", e);
                    self.error = Some(e);
                    break;
                }
            }
        }

        // A short block means end of stream (or a read error)
        self.finished = filled < BLOCK_BYTES;
        self.block = decode_block(&buffer[..filled]);
        self.position = 0;
    }
}

impl<R: Read> Iterator for WavSamples<R> {
    type Item = i16;

    fn next(&mut self) -> Option<i16> {
        if self.position >= self.block.len() {
            if self.finished {
                return None;
            }
            self.fill_block();
        }

        let sample = self.block.get(self.position).copied()?;
        self.position += 1;
        Some(sample)
    }
}
