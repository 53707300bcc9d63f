//! Blocking stream encoders for the two output formats.
//!
//! Both encoders pull from a `Read` and push into a `Write` chunk by chunk, so
//! memory use is bounded by the codec window plus the I/O buffers regardless
//! of file size. Writes block, which stalls the encoder when the destination
//! is slow.

use brotli::enc::backward_references::BrotliEncoderMode;
use brotli::enc::BrotliEncoderParams;
use flate2::write::GzEncoder;
use flate2::Compression;
use pc_core::format::{BrotliMode, EncoderSettings};
use std::io::{self, Read, Write};

/// Translate fixed Brotli settings into the encoder's parameter block.
pub fn brotli_params(mode: BrotliMode, quality: u32, size_hint: u64) -> BrotliEncoderParams {
    BrotliEncoderParams {
        mode: match mode {
            BrotliMode::Text => BrotliEncoderMode::BROTLI_MODE_TEXT,
        },
        quality: quality as i32,
        size_hint: usize::try_from(size_hint).unwrap_or(usize::MAX),
        ..Default::default()
    }
}

/// Encode everything `reader` yields into `writer` and return the writer once
/// the codec has flushed its trailer.
pub fn encode<R: Read, W: Write>(settings: &EncoderSettings, reader: &mut R, writer: W) -> io::Result<W> {
    match *settings {
        EncoderSettings::Gzip { level } => {
            let mut encoder = GzEncoder::new(writer, Compression::new(level));
            io::copy(reader, &mut encoder)?;
            encoder.finish()
        }
        EncoderSettings::Brotli {
            mode,
            quality,
            size_hint,
        } => {
            let mut writer = writer;
            let params = brotli_params(mode, quality, size_hint);
            brotli::BrotliCompress(reader, &mut writer, &params)?;
            Ok(writer)
        }
    }
}

/// Reader adapter that counts bytes pulled through it.
pub struct CountingReader<R> {
    inner: R,
    count: u64,
}

impl<R: Read> CountingReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, count: 0 }
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use pc_core::format::Format;
    use std::io::Cursor;

    fn sample() -> Vec<u8> {
        "<html><body><p>precompressed page</p></body></html>\n"
            .repeat(200)
            .into_bytes()
    }

    fn gunzip(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        GzDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    fn unbrotli(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        brotli::Decompressor::new(data, 4096).read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_brotli_params_text_max_quality() {
        let p = brotli_params(BrotliMode::Text, 11, 123_456);
        assert!(matches!(p.mode, BrotliEncoderMode::BROTLI_MODE_TEXT));
        assert_eq!(p.quality, 11);
        assert_eq!(p.size_hint, 123_456);
    }

    #[test]
    fn test_brotli_params_zero_hint() {
        let p = brotli_params(BrotliMode::Text, 11, 0);
        assert!(matches!(p.mode, BrotliEncoderMode::BROTLI_MODE_TEXT));
        assert_eq!(p.size_hint, 0);
    }

    #[test]
    fn test_gzip_decodes_to_original() {
        let data = sample();
        let settings = Format::Gzip.settings(data.len() as u64);
        let out = encode(&settings, &mut Cursor::new(&data), Vec::new()).unwrap();
        assert!(out.len() < data.len());
        assert_eq!(&out[..2], &[0x1f, 0x8b]);
        assert_eq!(gunzip(&out), data);
    }

    #[test]
    fn test_brotli_decodes_to_original() {
        let data = sample();
        let settings = Format::Brotli.settings(data.len() as u64);
        let out = encode(&settings, &mut Cursor::new(&data), Vec::new()).unwrap();
        assert!(out.len() < data.len());
        assert_eq!(unbrotli(&out), data);
    }

    #[test]
    fn test_empty_input_still_valid_streams() {
        for format in Format::ALL {
            let settings = format.settings(0);
            let out = encode(&settings, &mut Cursor::new(Vec::<u8>::new()), Vec::new()).unwrap();
            assert!(!out.is_empty());
            let decoded = match format {
                Format::Gzip => gunzip(&out),
                Format::Brotli => unbrotli(&out),
            };
            assert!(decoded.is_empty());
        }
    }

    #[test]
    fn test_deterministic_output() {
        let data = sample();
        for format in Format::ALL {
            let settings = format.settings(data.len() as u64);
            let a = encode(&settings, &mut Cursor::new(&data), Vec::new()).unwrap();
            let b = encode(&settings, &mut Cursor::new(&data), Vec::new()).unwrap();
            assert_eq!(a, b, "{format} output differs between runs");
        }
    }

    #[test]
    fn test_size_hint_does_not_change_content() {
        // A stale hint affects tuning only; the stream still decodes.
        let data = sample();
        let settings = Format::Brotli.settings(1);
        let out = encode(&settings, &mut Cursor::new(&data), Vec::new()).unwrap();
        assert_eq!(unbrotli(&out), data);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk went away"))
        }
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_read_error_propagates() {
        for format in Format::ALL {
            let result = encode(&format.settings(10), &mut FailingReader, Vec::new());
            assert!(result.is_err(), "{format} swallowed a read error");
        }
    }

    #[test]
    fn test_write_error_propagates() {
        let data = sample();
        for format in Format::ALL {
            let result = encode(&format.settings(data.len() as u64), &mut Cursor::new(&data), FullDisk);
            assert!(result.is_err(), "{format} swallowed a write error");
        }
    }

    #[test]
    fn test_counting_reader() {
        let data = sample();
        let mut reader = CountingReader::new(Cursor::new(&data));
        let mut sink = Vec::new();
        io::copy(&mut reader, &mut sink).unwrap();
        assert_eq!(reader.count(), data.len() as u64);
    }
}
