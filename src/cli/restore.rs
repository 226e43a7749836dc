//! Reading the input, restoring and writing the raster
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use color_eyre::eyre::{self, eyre, WrapErr};
use image::ImageFormat;
use log::info;
use restoration::{restore, Raster, RestoreConfig};

use super::opt::{Format, Options};

/// Restore the input selected by `opt`
pub fn run(opt: &Options) -> eyre::Result<()> {
    let settings = opt.settings().wrap_err("Failed to load settings")?;
    let config = settings.restore_config();
    let raster = read_raster(opt.file.as_deref(), &config)?;
    handle_out(opt.out.as_deref(), settings.format(), raster)
}

/// Read and restore a file, or STDIN if `file` is `None`
///
/// Nothing is written before the whole raster is restored.
pub fn read_raster(file: Option<&Path>, config: &RestoreConfig) -> eyre::Result<Raster> {
    match file {
        Some(path) => {
            let file = File::open(path)
                .wrap_err_with(|| format!("Failed to open file: `{}`", path.display()))?;
            info!("Restoring `{}` ...", path.display());
            restore(BufReader::new(file), config)
                .wrap_err_with(|| format!("Failed to restore `{}`", path.display()))
        }
        None => {
            info!("Restoring from STDIN ...");
            let stdin = io::stdin();
            let lock = stdin.lock();
            restore(lock, config).wrap_err("Failed to restore STDIN")
        }
    }
}

/// Encode the raster in the given format
pub fn encode(raster: Raster, format: Format) -> eyre::Result<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        Format::Pgm => raster.write_pgm(&mut buf)?,
        Format::Png => {
            if raster.height() == 0 || raster.width() == 0 {
                return Err(eyre!("Cannot encode an empty raster as PNG"));
            }
            let image = raster.to_image()?;
            image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        }
    }
    Ok(buf)
}

/// Write the raster to `out`, or STDOUT if `out` is `None` or `-`
pub fn handle_out(out: Option<&Path>, format: Format, raster: Raster) -> eyre::Result<()> {
    let bytes = encode(raster, format)?;
    match out {
        None => write_stdout(&bytes),
        Some(path) if path == Path::new("-") => write_stdout(&bytes),
        Some(path) => {
            let out_file = File::create(path)
                .wrap_err_with(|| format!("Failed to create file: `{}`", path.display()))?;
            let mut out_buf = BufWriter::new(out_file);
            info!("Writing `{}` ...", path.display());
            out_buf.write_all(&bytes)?;
            out_buf.flush()?;
            info!("Done!");
            Ok(())
        }
    }
}

fn write_stdout(bytes: &[u8]) -> eyre::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    lock.write_all(bytes)?;
    lock.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use restoration::{restore, RestoreConfig};

    use super::{encode, read_raster};
    use crate::cli::opt::Format;

    #[test]
    fn test_missing_input_file() {
        let path = Path::new("/nonexistent/pix-restore/input.txt");
        let err = read_raster(Some(path), &RestoreConfig::default()).unwrap_err();
        let messages: Vec<String> = err.chain().map(|e| e.to_string()).collect();
        assert!(
            messages.iter().any(|m| m.contains("Failed to open file")),
            "{:?}",
            messages
        );
    }

    #[test]
    fn test_encode_pgm() {
        let raster = restore(&b"AB12\nCD99\nAB34\n"[..], &RestoreConfig::default()).unwrap();
        let bytes = encode(raster, Format::Pgm).unwrap();
        assert_eq!(bytes, b"P5 1 2 255\n\x0C\x22");
    }

    #[test]
    fn test_encode_png() {
        let raster = restore(&b"a1b2\na3b4\n"[..], &RestoreConfig::default()).unwrap();
        let bytes = encode(raster, Format::Png).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let image = image::load_from_memory(&bytes).unwrap().into_luma8();
        assert_eq!(image.into_raw(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_encode_empty_png() {
        let raster = restore(&b""[..], &RestoreConfig::default()).unwrap();
        assert!(encode(raster, Format::Png).is_err());
    }
}
