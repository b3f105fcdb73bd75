//! Pixel output sinks.
//!
//! A sink receives a header (width, height, max channel value) followed by
//! one RGB triplet per pixel in emission order. The renderer decides the
//! order; sinks only store or stream what they are given.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgb, RgbImage};
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Expected {expected} pixels, received {received}")]
    PixelCount { expected: usize, received: usize },

    #[error("Sink used before begin()")]
    NotStarted,
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for rendered pixels.
pub trait PixelSink {
    /// Declare the image dimensions and maximum channel value.
    fn begin(&mut self, width: u32, height: u32, max_value: u8) -> OutputResult<()>;

    /// Accept the next pixel.
    fn write_pixel(&mut self, rgb: [u8; 3]) -> OutputResult<()>;

    /// Flush or encode once every pixel has been written.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Plain-text PPM (P3) writer.
pub struct PpmSink<W: Write> {
    writer: W,
    expected: usize,
    received: usize,
}

impl<W: Write> PpmSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            expected: 0,
            received: 0,
        }
    }

    /// Consume the sink and hand back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PixelSink for PpmSink<W> {
    fn begin(&mut self, width: u32, height: u32, max_value: u8) -> OutputResult<()> {
        self.expected = width as usize * height as usize;
        self.received = 0;
        writeln!(self.writer, "P3")?;
        writeln!(self.writer, "{} {}", width, height)?;
        writeln!(self.writer, "{}", max_value)?;
        Ok(())
    }

    fn write_pixel(&mut self, rgb: [u8; 3]) -> OutputResult<()> {
        writeln!(self.writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
        self.received += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        if self.received != self.expected {
            return Err(OutputError::PixelCount {
                expected: self.expected,
                received: self.received,
            });
        }
        Ok(())
    }
}

/// Collects pixels into an `image` buffer and encodes it on `finish()`.
///
/// The file format follows the path's extension (png, bmp, tga, ...).
pub struct ImageFileSink {
    path: PathBuf,
    buffer: Option<RgbImage>,
    cursor: u32,
}

impl ImageFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            buffer: None,
            cursor: 0,
        }
    }
}

impl PixelSink for ImageFileSink {
    fn begin(&mut self, width: u32, height: u32, _max_value: u8) -> OutputResult<()> {
        self.buffer = Some(ImageBuffer::new(width, height));
        self.cursor = 0;
        Ok(())
    }

    fn write_pixel(&mut self, rgb: [u8; 3]) -> OutputResult<()> {
        let buffer = self.buffer.as_mut().ok_or(OutputError::NotStarted)?;
        let total = buffer.width() as usize * buffer.height() as usize;
        if self.cursor as usize >= total {
            return Err(OutputError::PixelCount {
                expected: total,
                received: self.cursor as usize + 1,
            });
        }

        let x = self.cursor % buffer.width();
        let y = self.cursor / buffer.width();
        buffer.put_pixel(x, y, Rgb(rgb));
        self.cursor += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        let buffer = self.buffer.as_ref().ok_or(OutputError::NotStarted)?;
        let total = buffer.width() as usize * buffer.height() as usize;
        if self.cursor as usize != total {
            return Err(OutputError::PixelCount {
                expected: total,
                received: self.cursor as usize,
            });
        }

        buffer.save(&self.path)?;
        log::info!("Saved {}x{} image to {}", buffer.width(), buffer.height(), self.path.display());
        Ok(())
    }
}

/// Pick a sink for the requested destination.
///
/// `None` streams PPM to stdout, `.ppm` paths get a PPM file, anything else
/// goes through the `image` encoders.
pub fn open_sink(path: Option<&Path>) -> OutputResult<Box<dyn PixelSink>> {
    match path {
        None => Ok(Box::new(PpmSink::new(BufWriter::new(io::stdout())))),
        Some(path) => {
            let is_ppm = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("ppm"))
                .unwrap_or(false);

            if is_ppm {
                let file = File::create(path)?;
                Ok(Box::new(PpmSink::new(BufWriter::new(file))))
            } else {
                Ok(Box::new(ImageFileSink::new(path)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ppm_header_and_pixels() {
        let mut sink = PpmSink::new(Vec::new());
        sink.begin(2, 1, 255).unwrap();
        sink.write_pixel([255, 0, 0]).unwrap();
        sink.write_pixel([0, 128, 7]).unwrap();
        sink.finish().unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 0 0\n0 128 7\n");
    }

    #[test]
    fn test_ppm_short_stream_is_an_error() {
        let mut sink = PpmSink::new(Vec::new());
        sink.begin(2, 2, 255).unwrap();
        sink.write_pixel([1, 2, 3]).unwrap();

        let err = sink.finish().unwrap_err();
        assert!(matches!(
            err,
            OutputError::PixelCount {
                expected: 4,
                received: 1
            }
        ));
    }

    #[test]
    fn test_image_sink_requires_begin() {
        let mut sink = ImageFileSink::new("unused.png");
        assert!(matches!(sink.write_pixel([0, 0, 0]), Err(OutputError::NotStarted)));
    }

    #[test]
    fn test_image_sink_writes_png() {
        let path = std::env::temp_dir().join(format!("lumen_sink_{}.png", std::process::id()));
        let mut sink = ImageFileSink::new(&path);
        sink.begin(2, 2, 255).unwrap();
        for rgb in [[255, 0, 0], [0, 255, 0], [0, 0, 255], [9, 9, 9]] {
            sink.write_pixel(rgb).unwrap();
        }
        sink.finish().unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(1, 0), &Rgb([0, 255, 0]));
        assert_eq!(decoded.get_pixel(0, 1), &Rgb([0, 0, 255]));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_open_sink_by_extension() {
        let path = std::env::temp_dir().join(format!("lumen_open_{}.ppm", std::process::id()));
        let mut sink = open_sink(Some(path.as_path())).unwrap();
        sink.begin(1, 1, 255).unwrap();
        sink.write_pixel([1, 2, 3]).unwrap();
        sink.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("P3\n1 1\n255\n"));
        std::fs::remove_file(&path).ok();
    }
}
