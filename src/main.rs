//! keysim - synthetic keyboard input and key capture from the command line
//!
//! ```text
//! keysim type "Hello, world!"
//! keysim tap Return
//! keysim tap --chord Control_L Alt_L t
//! keysim listen
//! ```

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use log::{info, warn};

use keysim::backend::{InputBackend, LoopbackBackend};
use keysim::config::{BackendKind, Config, ListenConfig};
use keysim::keyboard::{KeyInput, Keyboard, NamedKey};
use keysim::keysym::SymbolTable;
use keysim::listener::{KeyboardListener, Modifier};

/// Command-line arguments for keysim
#[derive(Parser, Debug)]
#[command(name = "keysim")]
#[command(version, about = "Keysym-oriented synthetic keyboard input and key capture", long_about = None)]
struct Args {
    /// Input backend (x11|loopback|xkb), overrides the config file
    #[arg(short, long, env = "KEYSIM_BACKEND", global = true)]
    backend: Option<BackendKind>,

    /// X display name, overrides the config file
    #[arg(short, long, global = true)]
    display: Option<String>,

    /// Configuration file path (skips the default search)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write the default config to ~/.config/keysim/config.toml
    #[arg(long)]
    init_config: bool,

    /// Overwrite an existing config file (with --init-config)
    #[arg(short, long, requires = "init_config")]
    force: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Type text character by character
    Type {
        text: String,

        /// Pause between characters in milliseconds
        #[arg(short, long)]
        interval_ms: Option<u64>,
    },

    /// Press and release keys: characters, keysym names (Return, F5) or #keycode
    Tap {
        #[arg(required = true)]
        keys: Vec<String>,

        /// Repeat count
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Hold every key together, release in reverse order
        #[arg(long)]
        chord: bool,
    },

    /// Press keys without releasing them
    Press {
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Release keys
    Release {
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// List named keys and their keycodes
    Keys {
        /// Include keys with no keycode on this keyboard
        #[arg(short, long)]
        all: bool,
    },

    /// Show the modifier slots discovered on this keyboard
    Modifiers,

    /// Print key events until Escape
    Listen {
        /// Grab the keyboard so other clients see no key events
        #[arg(long)]
        capture: bool,

        /// Do not stop on Escape
        #[arg(long)]
        no_escape: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if args.init_config {
        let path = Config::write_default_config(args.force).context("Failed to generate config")?;
        println!("Config file generated: {}", path.display());
        return Ok(());
    }

    let Some(command) = args.command.as_ref() else {
        Args::command().print_help()?;
        return Ok(());
    };

    let mut cfg = match &args.config {
        Some(path) => Config::load_from_file(path.to_string_lossy().as_ref())?,
        None => Config::load(),
    };
    if let Some(kind) = args.backend {
        cfg.backend.kind = kind;
    }
    if let Some(display) = &args.display {
        cfg.backend.display = display.clone();
    }
    info!("keysim {} ({:?} backend)", env!("CARGO_PKG_VERSION"), cfg.backend.kind);

    match cfg.backend.kind {
        BackendKind::X11 => run_x11(&cfg, command),
        BackendKind::Loopback => {
            let backend = run(LoopbackBackend::us_layout(), &cfg, command)?;
            print_sent(&backend);
            Ok(())
        }
        BackendKind::Xkb => run_xkb(&cfg, command),
    }
}

#[cfg(feature = "x11")]
fn run_x11(cfg: &Config, command: &Command) -> Result<()> {
    let backend = keysim::X11Backend::connect(cfg.backend.display_name())
        .context("Failed to open X display")?;
    run(backend, cfg, command)?;
    Ok(())
}

#[cfg(not(feature = "x11"))]
fn run_x11(_cfg: &Config, _command: &Command) -> Result<()> {
    anyhow::bail!("keysim was built without the x11 feature")
}

#[cfg(feature = "xkb")]
fn run_xkb(cfg: &Config, command: &Command) -> Result<()> {
    let backend = keysim::backend::xkb::backend_from_names(&cfg.keyboard)
        .context("Failed to build xkb keyboard")?;
    let backend = run(backend, cfg, command)?;
    print_sent(&backend);
    Ok(())
}

#[cfg(not(feature = "xkb"))]
fn run_xkb(_cfg: &Config, _command: &Command) -> Result<()> {
    anyhow::bail!("keysim was built without the xkb feature")
}

/// Run one command, handing the backend back afterwards
fn run<B: InputBackend>(backend: B, cfg: &Config, command: &Command) -> Result<B> {
    match command {
        Command::Type { text, interval_ms } => {
            let interval = interval_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| cfg.typing.interval());
            let mut kb = Keyboard::new(backend);
            let typed = kb.type_string(text, interval)?;
            let total = text.chars().count();
            if typed < total {
                warn!("{} of {} characters could not be typed", total - typed, total);
            }
            Ok(kb.into_backend())
        }
        Command::Tap { keys, count, chord } => {
            let inputs: Vec<KeyInput> = keys.iter().map(String::as_str).map(parse_key).collect();
            let mut kb = Keyboard::new(backend);
            for i in 0..*count {
                if i > 0 && !cfg.typing.interval().is_zero() {
                    thread::sleep(cfg.typing.interval());
                }
                if *chord {
                    kb.press_keys(&inputs)?;
                } else {
                    for input in &inputs {
                        kb.tap(input.clone())?;
                    }
                }
            }
            Ok(kb.into_backend())
        }
        Command::Press { keys } => {
            let mut kb = Keyboard::new(backend);
            for key in keys {
                kb.press(parse_key(key))?;
            }
            Ok(kb.into_backend())
        }
        Command::Release { keys } => {
            let mut kb = Keyboard::new(backend);
            for key in keys {
                kb.release(parse_key(key))?;
            }
            Ok(kb.into_backend())
        }
        Command::Keys { all } => {
            let kb = Keyboard::new(backend);
            for key in NamedKey::catalog() {
                let keycode = kb.key(key);
                if keycode.is_none() && !all {
                    continue;
                }
                let keycode = keycode.map_or_else(|| "-".to_string(), |k| k.to_string());
                let canonical = key.canonical();
                if canonical == key {
                    println!("{:<16} {:>4}", key.role(), keycode);
                } else {
                    println!("{:<16} {:>4}  (= {})", key.role(), keycode, canonical.role());
                }
            }
            Ok(kb.into_backend())
        }
        Command::Modifiers => {
            let listener = KeyboardListener::new(backend)?;
            let modifiers = listener.modifier_config();
            for modifier in Modifier::ALL {
                let bit = modifier_mask(modifiers.bit(modifier).bits());
                println!(
                    "{:<10} {:<10} {:?}",
                    modifier.name(),
                    bit,
                    modifiers.keycodes(modifier)
                );
            }
            Ok(listener.into_backend())
        }
        Command::Listen { capture, no_escape } => {
            let listen = ListenConfig {
                capture: cfg.listen.capture || *capture,
                escape_stops: cfg.listen.escape_stops && !no_escape,
            };
            let mut listener = KeyboardListener::with_config(backend, &listen)?;
            if listen.escape_stops {
                eprintln!("Listening, press Escape to stop");
            }
            listener.start(|event| {
                println!(
                    "{} {:>4} {}",
                    if event.is_press { "press  " } else { "release" },
                    event.keycode,
                    event.character.as_deref().unwrap_or("?")
                );
                true
            })?;
            Ok(listener.into_backend())
        }
    }
}

/// `#38` is a raw keycode, anything else a character or keysym name
fn parse_key(arg: &str) -> KeyInput {
    match arg.strip_prefix('#').and_then(|n| n.parse().ok()) {
        Some(keycode) => KeyInput::Keycode(keycode),
        None => KeyInput::from(arg),
    }
}

fn modifier_mask(bits: u16) -> String {
    if bits == 0 {
        "untracked".to_string()
    } else {
        format!("{:#04x}", bits)
    }
}

/// Dry-run output for in-process keyboards
fn print_sent(backend: &LoopbackBackend) {
    let symbols = SymbolTable::standard();
    for (kind, keycode) in backend.sent() {
        let keysym = backend.keycode_to_keysym(*keycode, 0);
        println!(
            "{:<7} {:>4} {}",
            format!("{:?}", kind).to_lowercase(),
            keycode,
            symbols.keysym_to_name(keysym).unwrap_or("?")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("#38"), KeyInput::Keycode(38));
        assert_eq!(parse_key("#"), KeyInput::from("#"));
        assert_eq!(parse_key("Return"), KeyInput::from("Return"));
        assert_eq!(parse_key("#x"), KeyInput::from("#x"));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["keysim", "-b", "loopback", "tap", "-n", "3", "a"]).unwrap();
        assert_eq!(args.backend, Some(BackendKind::Loopback));
        assert!(matches!(args.command, Some(Command::Tap { count: 3, .. })));
        assert!(Args::try_parse_from(["keysim", "--force"]).is_err());
    }
}
