#[macro_use]
extern crate tracing;

mod midi;

use anyhow::Context;
use argh::FromArgs;
use lcdkit_common::tone;
use midly::Smf;
use std::{env, fs, fs::File, path::PathBuf, process, str::FromStr};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// distinct from the image tools
const USAGE_EXIT_CODE: i32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Lines,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Lines => "txt",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "lines" => Ok(Self::Lines),
            other => Err(format!("unknown format `{other}`, expected `json` or `lines`")),
        }
    }
}

#[derive(FromArgs)]
/// convert a monophonic midi file into a piezo tone list
///
/// the list is written next to the midi file
struct Args {
    #[argh(positional)]
    /// path to the midi file
    midifile: PathBuf,

    #[argh(option, default = "OutputFormat::Json")]
    /// output format, `json` or `lines`
    format: OutputFormat,

    #[argh(option, default = "0")]
    /// semitones added to every key
    transpose: i32,

    #[argh(option, default = "0")]
    /// index of the track to convert
    track: usize,
}

fn parse_args() -> Args {
    let strings: Vec<String> = env::args().collect();
    let cmd = strings.first().map_or("lcdkit-tones", String::as_str);
    let rest: Vec<&str> = strings.iter().skip(1).map(String::as_str).collect();

    match Args::from_args(&[cmd], &rest) {
        Ok(args) => args,
        Err(early_exit) => match early_exit.status {
            Ok(()) => {
                println!("{}", early_exit.output);
                process::exit(0);
            }
            Err(()) => {
                eprintln!("{}", early_exit.output);
                process::exit(USAGE_EXIT_CODE);
            }
        },
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = parse_args();

    let midi_file = File::open(&args.midifile)
        .with_context(|| format!("failed to open {}", args.midifile.display()))?;
    let data = unsafe { memmap2::Mmap::map(&midi_file)? };

    let smf = Smf::parse(&data[..])
        .with_context(|| format!("failed to parse {}", args.midifile.display()))?;
    let track = smf.tracks.get(args.track).with_context(|| {
        format!(
            "track {} requested but the file has {}",
            args.track,
            smf.tracks.len()
        )
    })?;

    info!(
        "found {} midi events in '{}'",
        track.len(),
        args.midifile.display()
    );
    info!("converting..");

    let events = midi::note_events(track);
    let tones = tone::build_sequence_transposed(&events, args.transpose)?;

    info!(tones = tones.len(), "conversion complete");

    let contents = match args.format {
        OutputFormat::Json => tone::to_json(&tones)?,
        OutputFormat::Lines => tone::to_lines(&tones),
    };

    let output = args.midifile.with_extension(args.format.extension());
    fs::write(&output, contents)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!("wrote notes to {}", output.display());

    Ok(())
}
