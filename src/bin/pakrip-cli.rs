//! pakrip-cli - Command-line interface for pakrip
//!
//! A command-line tool for extracting PAK/HQR game archives and decoding
//! their PVR textures to PNG.

use clap::{Parser, Subcommand};
use image::{RgbImage, RgbaImage};
use indicatif::{ProgressBar, ProgressStyle};
use pakrip::archive::{manifest, ArchiveReader, EntryPayload, Extractor};
use pakrip::{decode_texture, ChannelLayout, DecodedTexture};
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "pakrip-cli")]
#[command(about = "A CLI tool for PAK/HQR archive extraction and PVR texture decoding")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every entry of an archive
    Extract {
        /// Archive file (PAK/HQR)
        archive: PathBuf,

        /// Manifest file; defaults to the archive path with a .lst extension
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "contents")]
        output: PathBuf,

        /// Overwrite files that already exist
        #[arg(short, long)]
        force: bool,
    },

    /// List archive entries without extracting
    Info {
        /// Archive file (PAK/HQR)
        archive: PathBuf,

        /// Manifest file; defaults to the archive path with a .lst extension
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Decode a single PVR texture file to PNG
    Texture {
        /// Input PVR file
        input: PathBuf,

        /// Output PNG file; defaults to the input path with .png appended
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            archive,
            manifest,
            output,
            force,
        } => extract_archive(
            &archive,
            manifest.as_deref(),
            &output,
            force,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Info { archive, manifest } => {
            show_archive_info(&archive, manifest.as_deref(), cli.verbose)
        }
        Commands::Texture {
            input,
            output,
            force,
        } => decode_texture_file(&input, output.as_deref(), force, cli.verbose, cli.quiet),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn manifest_path_for(archive: &Path, manifest: Option<&Path>) -> PathBuf {
    match manifest {
        Some(path) => path.to_path_buf(),
        None => archive.with_extension("lst"),
    }
}

fn extract_archive(
    archive: &Path,
    manifest: Option<&Path>,
    output: &Path,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !archive.exists() {
        return Err(format!("Archive '{}' does not exist", archive.display()).into());
    }
    let manifest_path = manifest_path_for(archive, manifest);
    if !manifest_path.exists() {
        return Err(format!("Manifest '{}' does not exist", manifest_path.display()).into());
    }

    if verbose {
        println!(
            "Extracting '{}' with manifest '{}'",
            archive.display(),
            manifest_path.display()
        );
    }

    let start_time = Instant::now();

    let manifest_bytes = fs::read(&manifest_path)?;
    let source = BufReader::new(fs::File::open(archive)?);
    let mut extractor = Extractor::open(source, &manifest_bytes)?;
    let total = extractor.len();

    // Archive-stem subdirectory, mirroring the manifest tree beneath it
    let archive_name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());
    let dest_root = output.join(archive_name);

    let progress = if !quiet && total > 1 {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut textures = 0usize;
    let mut failures = 0usize;

    for index in 0..total {
        let path = extractor.paths()[index].clone();
        if let Some(ref pb) = progress {
            pb.set_message(path.clone());
        }

        match extractor.extract(index) {
            Ok(entry) => {
                let dest = dest_root.join(&entry.path);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                match entry.payload {
                    EntryPayload::Texture(texture) => {
                        let png_path = with_png_extension(&dest);
                        if png_path.exists() && !force {
                            return Err(format!(
                                "Output file '{}' already exists. Use --force to overwrite",
                                png_path.display()
                            )
                            .into());
                        }
                        write_png(&texture, &png_path)?;
                        textures += 1;
                        if verbose {
                            println!(
                                "  {} -> {}x{} {:?} texture",
                                entry.path, texture.width, texture.height, texture.layout
                            );
                        }
                    }
                    EntryPayload::Opaque(bytes) => {
                        if dest.exists() && !force {
                            return Err(format!(
                                "Output file '{}' already exists. Use --force to overwrite",
                                dest.display()
                            )
                            .into());
                        }
                        fs::write(&dest, &bytes)?;
                        if verbose {
                            println!("  {} -> {} bytes", entry.path, bytes.len());
                        }
                    }
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("Failed to extract '{}': {}", path, e);
            }
        }

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }

    let elapsed = start_time.elapsed();
    if !quiet {
        println!("✓ Extraction finished!");
        println!("  Entries:  {}", total);
        println!("  Textures: {}", textures);
        println!("  Failures: {}", failures);
        println!("  Time:     {:.2?}", elapsed);
    }

    Ok(())
}

fn show_archive_info(
    archive: &Path,
    manifest: Option<&Path>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !archive.exists() {
        return Err(format!("Archive '{}' does not exist", archive.display()).into());
    }
    let manifest_path = manifest_path_for(archive, manifest);
    let manifest_bytes = fs::read(&manifest_path)?;
    let paths = manifest::parse(&manifest_bytes);

    let mut reader = ArchiveReader::new(BufReader::new(fs::File::open(archive)?));
    let offsets = reader.read_offsets(paths.len())?;

    println!("Archive: {}", archive.display());
    println!("Entries: {}", paths.len());

    for (path, &offset) in paths.iter().zip(&offsets) {
        let (header, _) = reader.read_entry(offset)?;
        let ratio = if header.uncompressed_size > 0 {
            100.0 * header.compressed_size as f64 / header.uncompressed_size as f64
        } else {
            100.0
        };
        println!(
            "  {} : {} bytes, ratio {:.1}% ({})",
            path,
            header.uncompressed_size,
            ratio,
            header.mode.name()
        );
        if verbose {
            println!(
                "    offset {:#x}, stored {} bytes",
                offset, header.compressed_size
            );
        }
    }

    Ok(())
}

fn decode_texture_file(
    input: &Path,
    output: Option<&Path>,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    let container = locate_container(&data)
        .ok_or_else(|| format!("'{}' is not a PVR texture file", input.display()))?;

    let texture = decode_texture(container).map_err(|e| format!("Texture decode failed: {}", e))?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => with_png_extension(input),
    };
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    write_png(&texture, &output)?;

    if !quiet {
        println!("✓ Decoded '{}'", input.display());
        println!("  Size:   {}x{}", texture.width, texture.height);
        println!("  Layout: {:?}", texture.layout);
        println!("  Output: {}", output.display());
    }
    if verbose {
        println!("  Pixel bytes: {}", texture.pixels.len());
    }

    Ok(())
}

/// Accept a bare PVRT container or one preceded by a 16-byte pre-header
fn locate_container(data: &[u8]) -> Option<&[u8]> {
    if data.starts_with(b"PVRT") {
        Some(data)
    } else if data.len() > 20 && &data[16..20] == b"PVRT" {
        Some(&data[16..])
    } else {
        None
    }
}

fn with_png_extension(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(".png");
    path.with_file_name(name)
}

fn write_png(texture: &DecodedTexture, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let width = u32::from(texture.width);
    let height = u32::from(texture.height);
    match texture.layout {
        ChannelLayout::Rgb => {
            let img = RgbImage::from_raw(width, height, texture.pixels.clone())
                .ok_or("pixel buffer does not match texture dimensions")?;
            img.save(path)?;
        }
        ChannelLayout::Rgba => {
            let img = RgbaImage::from_raw(width, height, texture.pixels.clone())
                .ok_or("pixel buffer does not match texture dimensions")?;
            img.save(path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn build_sample_archive() -> (Vec<u8>, Vec<u8>) {
        // One raw entry and one LZSS entry
        let manifest = b"DATA\\HELLO.TXT\nDATA\\RUNS.BIN\n".to_vec();
        let lzss_payload = [0x01, b'z', 0x00, 0x00]; // 'z' then a run: "zzzz"
        let mut body = Vec::new();
        let mut offsets = Vec::new();

        offsets.push(8u32 + body.len() as u32);
        body.extend_from_slice(&5u32.to_le_bytes());
        body.extend_from_slice(&5u32.to_le_bytes());
        body.extend_from_slice(&0u16.to_le_bytes());
        body.extend_from_slice(b"hello");

        offsets.push(8u32 + body.len() as u32);
        body.extend_from_slice(&4u32.to_le_bytes());
        body.extend_from_slice(&(lzss_payload.len() as u32).to_le_bytes());
        body.extend_from_slice(&2u16.to_le_bytes());
        body.extend_from_slice(&lzss_payload);

        let mut archive = Vec::new();
        for offset in offsets {
            archive.extend_from_slice(&offset.to_le_bytes());
        }
        archive.extend_from_slice(&body);
        (archive, manifest)
    }

    #[test]
    fn test_extract_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let archive_path = dir.path().join("sample.pak");
        let manifest_path = dir.path().join("sample.lst");
        let out_dir = dir.path().join("out");

        let (archive, manifest) = build_sample_archive();
        fs::write(&archive_path, &archive)?;
        fs::write(&manifest_path, &manifest)?;

        extract_archive(&archive_path, None, &out_dir, false, false, true)?;

        let root = out_dir.join("sample.pak");
        assert_eq!(fs::read(root.join("data/hello.txt"))?, b"hello");
        assert_eq!(fs::read(root.join("data/runs.bin"))?, b"zzzz");
        Ok(())
    }

    #[test]
    fn test_locate_container() {
        assert!(locate_container(b"PVRT1234").is_some());
        let mut with_pre = vec![0u8; 16];
        with_pre.extend_from_slice(b"PVRT123456");
        assert_eq!(&locate_container(&with_pre).unwrap()[..4], b"PVRT");
        assert!(locate_container(b"GBIX").is_none());
    }

    #[test]
    fn test_with_png_extension_appends() {
        assert_eq!(
            with_png_extension(Path::new("a/b/stone.pvr")),
            Path::new("a/b/stone.pvr.png")
        );
    }
}
