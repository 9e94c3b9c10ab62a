use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use charforge::config::AppConfig;
use charforge::core::character_gen::{CharacterGenerator, Gender, GenerationOptions};
use charforge::core::dna::DnaCodec;
use charforge::core::export::export_to_dir;
use charforge::core::forge::{Forge, PortraitState};
use charforge::core::logging::{
    self, print_error, print_info, print_panel, print_success, print_warning, AiDiagnostic,
    ForgeDiagnostic,
};
use charforge::tui::{self, services::Services};

#[derive(Parser, Debug)]
#[command(name = "charforge", version, about = "TTRPG character forge")]
struct Cli {
    /// Seed the random generator for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal UI (default)
    Tui(RollArgs),
    /// Roll a character offline and print it
    Roll {
        #[command(flatten)]
        options: RollArgs,
        /// Print JSON instead of a panel
        #[arg(long)]
        json: bool,
    },
    /// Decode a personality DNA string
    Decode {
        /// e.g. "(5/6) 7A3,2D1,... - G8,H3,..."
        dna: String,
    },
    /// Forge one character with AI profile and portrait, then export it
    Generate {
        #[command(flatten)]
        options: RollArgs,
        /// Output directory (defaults to the configured export dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default, Clone)]
struct RollArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    race: Option<String>,
    /// male, female or nonbinary
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    profession: Option<String>,
}

impl RollArgs {
    fn into_options(self) -> Result<GenerationOptions, String> {
        let gender = self
            .gender
            .as_deref()
            .map(str::parse::<Gender>)
            .transpose()?;
        Ok(GenerationOptions {
            name: self.name,
            race: self.race,
            gender,
            profession: self.profession,
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match AppConfig::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                print_error(&e.to_string());
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::load(),
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            print_error(&format!("Failed to start async runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let command = cli.command.unwrap_or(Command::Tui(RollArgs::default()));
    let result = match command {
        Command::Tui(options) => {
            let _log_guard = logging::init_tui(&config.log_dir());
            log::info!("{} v{} starting (tui)", charforge::NAME, charforge::VERSION);
            runtime.block_on(run_tui(&config, options, cli.seed))
        }
        Command::Roll { options, json } => {
            let _log_guard = logging::init(&config.log_dir());
            roll(options, json, cli.seed)
        }
        Command::Decode { dna } => {
            let _log_guard = logging::init(&config.log_dir());
            decode(&dna)
        }
        Command::Generate { options, out } => {
            let _log_guard = logging::init(&config.log_dir());
            runtime.block_on(generate(&config, options, out, cli.seed))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            if !message.is_empty() {
                print_error(&message);
            }
            ExitCode::FAILURE
        }
    }
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

async fn run_tui(config: &AppConfig, options: RollArgs, seed: Option<u64>) -> Result<(), String> {
    let services = Services::init(config, options.into_options()?, seed);
    tui::run(&config.tui, services)
        .await
        .map_err(|e| format!("Terminal error: {e}"))
}

fn roll(options: RollArgs, json: bool, seed: Option<u64>) -> Result<(), String> {
    let generator = CharacterGenerator::with_options(options.into_options()?);
    let codec = DnaCodec::standard();
    let mut rng = rng_for(seed);

    let character = generator.generate(&mut rng);
    let dna = codec.encode(&mut rng);
    let stat_block = character.stat_block();

    if json {
        let value = serde_json::json!({
            "character": character,
            "dna": dna.to_string(),
            "stat_block": stat_block,
        });
        let text = serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    let mut body = format!(
        "{} ({} {}, {})\n\n{}\n\nCarrying: {}\nPurse: {}\n\n{}\n\nDNA {}",
        character.name,
        character.gender,
        character.race,
        character.profession,
        character.description,
        character.items.join(", "),
        character.currency,
        stat_block,
        dna
    );
    if let Some(decoded) = codec.decode(&dna.to_string()) {
        body.push_str("\n\n");
        body.push_str(&decoded.describe());
    }
    print_panel(&character.name, &body);
    Ok(())
}

fn decode(input: &str) -> Result<(), String> {
    match DnaCodec::standard().try_decode(input) {
        Ok(decoded) => {
            print_panel(&decoded.alignment.to_string(), &decoded.describe());
            Ok(())
        }
        Err(e) => {
            let (offset, length) = e
                .entry()
                .and_then(|entry| input.find(entry).map(|at| (at, entry.len())))
                .unwrap_or((0, input.len()));
            let diagnostic = ForgeDiagnostic::new(format!("Invalid DNA: {e}"))
                .with_source(input.to_string(), offset, length)
                .with_help("Expected `(A/B)`, comma-separated entries like 7A3, a dash, then entries like G8");
            eprintln!("{:?}", miette::Report::new(diagnostic));
            Err(String::new())
        }
    }
}

async fn generate(
    config: &AppConfig,
    options: RollArgs,
    out: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<(), String> {
    let forge = Forge::from_config(config).map_err(|e| e.user_message())?;
    let generator = CharacterGenerator::with_options(options.into_options()?);

    let seed = {
        let mut rng = rng_for(seed);
        forge.roll(&generator, &mut rng)
    };
    print_info(&format!("Forging {} ({})", seed.character.name, seed.dna));

    let outcome = match forge.generate(seed).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let diagnostic = AiDiagnostic::new("Gemini", e.user_message());
            eprintln!("{:?}", miette::Report::new(diagnostic));
            return Err(String::new());
        }
    };

    if let PortraitState::Failed { reason } = &outcome.portrait {
        print_warning(&format!("Portrait unavailable: {reason}"));
    }
    if outcome.profile.is_raw() {
        print_warning("Profile could not be split into sections; exported as raw text");
    }

    let dir = out.unwrap_or_else(|| config.export_dir());
    let files = export_to_dir(&outcome, &dir, config.export.json).map_err(|e| e.to_string())?;
    print_success(&format!("Wrote {}", files.html.display()));
    if let Some(json) = files.json {
        print_success(&format!("Wrote {}", json.display()));
    }
    Ok(())
}
