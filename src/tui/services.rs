use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AppConfig;
use crate::core::character_gen::{CharacterGenerator, GenerationOptions};
use crate::core::forge::Forge;

/// Everything the TUI needs from the backend, built once at startup.
pub struct Services {
    /// `Err` holds the user-facing reason AI features are unavailable.
    pub forge: Result<Arc<Forge>, String>,
    pub generator: CharacterGenerator,
    pub rng: StdRng,
    pub export_dir: PathBuf,
    pub export_json: bool,
}

impl Services {
    /// Initialize from config. A missing API key is not fatal here: the
    /// TUI starts and reports the problem when generation is requested.
    pub fn init(config: &AppConfig, options: GenerationOptions, seed: Option<u64>) -> Self {
        let forge = match Forge::from_config(config) {
            Ok(forge) => {
                log::info!("AI services configured ({})", config.ai.text_model);
                Ok(Arc::new(forge))
            }
            Err(e) => {
                log::warn!("AI services unavailable: {e}");
                Err(e.user_message())
            }
        };

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            forge,
            generator: CharacterGenerator::with_options(options),
            rng,
            export_dir: config.export_dir(),
            export_json: config.export.json,
        }
    }

    /// Services around an explicit forge, for tests and embedding.
    pub fn with_forge(forge: Arc<Forge>, export_dir: PathBuf) -> Self {
        Self {
            forge: Ok(forge),
            generator: CharacterGenerator::new(),
            rng: StdRng::seed_from_u64(0),
            export_dir,
            export_json: true,
        }
    }
}
