#[macro_use]
extern crate tracing;

use anyhow::Context;
use image::GrayImage;
use lcdkit_common::{Bitmap, frame, glyph};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const DEFAULT_THRESHOLD: u8 = 128;

#[derive(argh::FromArgs)]
/// convert images to and from the packed lcd formats
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(argh::FromArgs)]
#[argh(subcommand)]
enum Command {
    Decode(DecodeArgs),
    Encode(EncodeArgs),
    GlyphEncode(GlyphEncodeArgs),
}

#[derive(argh::FromArgs)]
#[argh(subcommand, name = "decode")]
/// render a packed 128x64 frame as a png for debugging
struct DecodeArgs {
    #[argh(positional)]
    /// path to the packed frame
    packed: PathBuf,

    #[argh(positional)]
    /// path to the png to write
    output: PathBuf,

    #[argh(switch)]
    /// render set bits dark instead of light
    invert: bool,
}

#[derive(argh::FromArgs)]
#[argh(subcommand, name = "encode")]
/// pack a 128x64 image into a frame file
struct EncodeArgs {
    #[argh(positional)]
    /// path to the source image
    image: PathBuf,

    #[argh(positional)]
    /// path to the packed frame to write
    packed: PathBuf,

    #[argh(option, default = "DEFAULT_THRESHOLD")]
    /// luma below which a pixel counts as dark
    threshold: u8,
}

#[derive(argh::FromArgs)]
#[argh(subcommand, name = "glyphencode")]
/// turn an 8 pixel high glyph sheet into firmware charset tables
struct GlyphEncodeArgs {
    #[argh(positional)]
    /// path to the glyph sheet
    image: PathBuf,

    #[argh(positional)]
    /// characters drawn on the sheet, left to right, one glyph per byte
    charset: String,

    #[argh(option, default = "DEFAULT_THRESHOLD")]
    /// luma below which a pixel counts as dark
    threshold: u8,
}

fn read_bitmap(path: &Path, threshold: u8) -> anyhow::Result<Bitmap> {
    let image = image::open(path)
        .with_context(|| format!("failed to open image {}", path.display()))?
        .to_luma8();

    let (width, height) = image.dimensions();
    debug!(width, height, "loaded image");

    Ok(Bitmap::from_luma(
        width as usize,
        height as usize,
        image.as_raw(),
        threshold,
    ))
}

fn decode(args: DecodeArgs) -> anyhow::Result<()> {
    let bytes = fs::read(&args.packed)
        .with_context(|| format!("failed to read {}", args.packed.display()))?;

    let mut frame = frame::decode(&bytes)?;
    if args.invert {
        frame.invert();
    }

    let image = GrayImage::from_raw(frame.width as u32, frame.height as u32, frame.data)
        .context("decoded frame does not fill the image")?;
    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!("wrote {}", args.output.display());

    Ok(())
}

fn encode(args: EncodeArgs) -> anyhow::Result<()> {
    let bitmap = read_bitmap(&args.image, args.threshold)?;
    let bytes = frame::encode(&bitmap)?;

    fs::write(&args.packed, &bytes)
        .with_context(|| format!("failed to write {}", args.packed.display()))?;

    info!(len = bytes.len(), "wrote {}", args.packed.display());

    Ok(())
}

fn glyph_encode(args: GlyphEncodeArgs) -> anyhow::Result<()> {
    // display is mounted upside down
    let bitmap = read_bitmap(&args.image, args.threshold)?.rotate180();
    let table = glyph::encode(&bitmap, args.charset.as_bytes())?;

    if !table.glyph_count_matches() {
        warn!(
            glyphs = table.glyph_count(),
            charset_bytes = args.charset.len(),
            "number of glyphs does not match the charset, check the results"
        );
    }

    let mut stdout = io::stdout().lock();
    stdout.write_all(table.render_literals().as_bytes())?;
    stdout.flush()?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    // stdout carries the glyph tables
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let args: Args = argh::from_env();

    match args.command {
        Command::Decode(args) => decode(args),
        Command::Encode(args) => encode(args),
        Command::GlyphEncode(args) => glyph_encode(args),
    }
}
