use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use lincode::ecc::{Channel, CodeParams, LinearCode};
use lincode::io::{
    error_markers, format_vector, pack_bytes, parse_free_block, parse_vector, RawImage,
};
use lincode::sweep::{self, SweepConfig, DEFAULT_PROBABILITIES};
use lincode::{Error, Result, Vector};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::{self, File};
use std::io::{BufWriter, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Linear block code encoder, decoder and channel simulator")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encodes one message, sends it through the channel and decodes it
    Vector {
        #[command(flatten)]
        code: CodeArgs,

        /// Message bits, e.g. 1011
        #[arg(short, long)]
        message: String,

        /// Replaces the received word before decoding
        #[arg(long)]
        edited: Option<String>,
    },
    /// Sends text with and without encoding and compares the results
    Text {
        #[command(flatten)]
        code: CodeArgs,

        /// Text file to send; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Sends an image's pixels with and without encoding and saves both as BMP
    Image {
        #[command(flatten)]
        code: CodeArgs,

        /// Image to send
        #[arg(short, long, required = true)]
        input: PathBuf,
    },
    /// Sends an arbitrary file with and without encoding
    File {
        #[command(flatten)]
        code: CodeArgs,

        /// File to send
        #[arg(short, long, required = true)]
        input: PathBuf,
    },
    /// Sweeps code parameters and error probabilities
    Bench {
        /// Code lengths 2..max_n are swept; at most 22
        #[arg(long, default_value_t = 12)]
        max_n: usize,

        /// Code dimensions 1..max_k are swept
        #[arg(long, default_value_t = 8)]
        max_k: usize,

        /// Comma separated channel error probabilities
        #[arg(long, value_delimiter = ',')]
        probabilities: Option<Vec<f64>>,

        /// Path of the delimited report
        #[arg(long, default_value = "results.csv")]
        report: PathBuf,

        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Args, Debug)]
struct CodeArgs {
    /// Code length
    #[arg(short, default_value_t = 7)]
    n: usize,

    /// Code dimension
    #[arg(short, default_value_t = 4)]
    k: usize,

    /// Free block A of G = [I | A] as comma separated rows; random when omitted
    #[arg(long)]
    free_block: Option<String>,

    /// Channel error probability
    #[arg(short, long, default_value_t = 0.1)]
    p: f64,

    /// Seed for the random generator and channel
    #[arg(long)]
    seed: Option<u64>,
}

impl CodeArgs {
    fn build(&self) -> Result<(LinearCode, Channel)> {
        if !(0.0..=1.0).contains(&self.p) {
            return Err(Error::InvalidInput(format!(
                "error probability {} is outside [0, 1]",
                self.p
            )));
        }

        let params = CodeParams::new(self.n, self.k)?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let code = match &self.free_block {
            Some(text) => LinearCode::from_free_block(&parse_free_block(text, params.n, params.k)?)?,
            None => LinearCode::random(params, &mut rng)?,
        };
        println!("Generator matrix G:\n{}", code.generator());
        info!(
            "({}, {}) code ready, covering radius {}",
            code.n(),
            code.k(),
            code.syndrome_table().max_weight()
        );

        let channel = match self.seed {
            Some(_) => Channel::with_rng(rng),
            None => Channel::new(),
        };
        Ok((code, channel))
    }
}

fn main() -> ExitCode {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .format_module_path(false)
        .try_init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Vector {
            code,
            message,
            edited,
        } => run_vector(&code, &message, edited.as_deref()),
        Commands::Text { code, input } => {
            let text = match input {
                Some(path) => fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            run_text(&code, &text)
        }
        Commands::Image { code, input } => run_image(&code, &input),
        Commands::File { code, input } => run_file(&code, &input),
        Commands::Bench {
            max_n,
            max_k,
            probabilities,
            report,
            seed,
        } => {
            let config = SweepConfig {
                max_n,
                max_k,
                probabilities: probabilities.unwrap_or_else(|| DEFAULT_PROBABILITIES.to_vec()),
                seed,
            };
            run_bench(&config, &report)
        }
    }
}

fn run_vector(args: &CodeArgs, message: &str, edited: Option<&str>) -> Result<()> {
    let (code, mut channel) = args.build()?;
    let (n, k) = (code.n(), code.k());

    let original = parse_vector(message, k)?;
    let encoded = code.encode(original);
    println!("Encoded vector:        {}", format_vector(encoded, n));

    let mut received = channel.send_vector(encoded, n, args.p);
    println!("Received vector:       {}", format_vector(received, n));
    let (markers, count) = error_markers(encoded, received, n);
    println!("{:<23}{}", format!("Errors: {}", count), markers);

    if let Some(bits) = edited {
        received = parse_vector(bits, n)?;
        println!("Edited vector:         {}", format_vector(received, n));
    }

    let decoded = code.decode(received);
    println!("Original vector:       {}", format_vector(original, k));
    println!("Decoded vector:        {}", format_vector(decoded, k));
    Ok(())
}

/// Result of sending one byte stream both raw and encoded.
struct Transfer {
    unencoded: Vec<u8>,
    encoded: Vec<u8>,
}

fn transfer(code: &LinearCode, channel: &mut Channel, data: &[u8], p: f64) -> Result<Transfer> {
    let packed = pack_bytes(data, code.k())?;

    let raw: Vec<Vector> = channel.send_vectors(&packed.vectors, code.k(), p);
    let sent = channel.send_vectors(&code.encode_all(&packed.vectors), code.n(), p);
    let decoded = code.decode_all(&sent);

    Ok(Transfer {
        unencoded: packed.with_vectors(raw).to_bytes(),
        encoded: packed.with_vectors(decoded).to_bytes(),
    })
}

fn byte_errors(original: &[u8], received: &[u8]) -> usize {
    original
        .iter()
        .zip(received)
        .filter(|(a, b)| a != b)
        .count()
}

fn run_text(args: &CodeArgs, text: &str) -> Result<()> {
    let (code, mut channel) = args.build()?;
    let result = transfer(&code, &mut channel, text.as_bytes(), args.p)?;

    println!(
        "Text sent without encoding ({} errors):\n{}",
        byte_errors(text.as_bytes(), &result.unencoded),
        String::from_utf8_lossy(&result.unencoded)
    );
    println!(
        "Text sent with encoding ({} errors):\n{}",
        byte_errors(text.as_bytes(), &result.encoded),
        String::from_utf8_lossy(&result.encoded)
    );
    Ok(())
}

/// `<stem>-unencoded.<ext>` and `<stem>-encoded.<ext>` next to `input`.
fn output_paths(input: &Path, ext: &str) -> (PathBuf, PathBuf) {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    (
        input.with_file_name(format!("{}-unencoded.{}", stem, ext)),
        input.with_file_name(format!("{}-encoded.{}", stem, ext)),
    )
}

fn run_image(args: &CodeArgs, input: &Path) -> Result<()> {
    let (code, mut channel) = args.build()?;
    let original = RawImage::open(input)?;
    info!(
        "loaded {}x{} {:?} image, {} bytes",
        original.width,
        original.height,
        original.color,
        original.pixels.len()
    );
    let result = transfer(&code, &mut channel, &original.pixels, args.p)?;

    let (unencoded_path, encoded_path) = output_paths(input, "bmp");
    original
        .with_pixels(result.unencoded)?
        .save_bmp(&unencoded_path)?;
    println!(
        "Image sent without encoding saved to '{}'",
        unencoded_path.display()
    );
    original.with_pixels(result.encoded)?.save_bmp(&encoded_path)?;
    println!(
        "Image sent with encoding saved to '{}'",
        encoded_path.display()
    );
    Ok(())
}

fn run_file(args: &CodeArgs, input: &Path) -> Result<()> {
    let (code, mut channel) = args.build()?;
    let data = fs::read(input)?;
    let result = transfer(&code, &mut channel, &data, args.p)?;

    let (unencoded_path, encoded_path) = output_paths(input, "bin");

    fs::write(&unencoded_path, &result.unencoded)?;
    println!(
        "Unencoded transfer ({} byte errors) saved to '{}'",
        byte_errors(&data, &result.unencoded),
        unencoded_path.display()
    );
    fs::write(&encoded_path, &result.encoded)?;
    println!(
        "Encoded transfer ({} byte errors) saved to '{}'",
        byte_errors(&data, &result.encoded),
        encoded_path.display()
    );
    Ok(())
}

fn run_bench(config: &SweepConfig, report: &Path) -> Result<()> {
    let start = Instant::now();
    let results = sweep::run_sweep(config)?;
    info!(
        "swept {} code configurations in {:.2?}",
        results.len(),
        start.elapsed()
    );

    print!("{}", sweep::format_error_grid(&results, config));
    sweep::write_report(&results, BufWriter::new(File::create(report)?))?;
    println!("Report written to '{}'", report.display());
    Ok(())
}
