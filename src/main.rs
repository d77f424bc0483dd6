use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};

use spins_lib::{
    default_data_dir, get_spin_settings, init_logging,
    models::{Wheel, WheelInput},
    set_spin_settings,
    spinner::commands::spin_and_wait,
    wheels::commands::{
        create_wheel, delete_wheel, get_history, get_layout, get_selected_wheel, list_wheels,
        render_wheel, select_wheel,
    },
    AppState,
};

#[derive(Parser)]
#[command(name = "spins")]
#[command(about = "Keep wheels of names and spin them to pick one")]
#[command(after_help = "Wheels are addressed by their index in `spins list`, their id, or their name.

Examples:
  spins create --name lunch pizza tacos ramen
  spins select lunch
  spins --instant spin lunch --times 3
  spins history lunch")]
#[command(version)]
struct Cli {
    /// Directory holding the wheel store and settings (defaults to the per-user data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Skip the spin transition for this run without saving it to settings
    #[arg(long, global = true)]
    instant: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all wheels
    List,

    /// Create a wheel from a name and its labels (blank labels are dropped)
    Create {
        /// Name of the wheel
        #[arg(short, long)]
        name: String,

        /// Labels in slot order
        #[arg(required = true, num_args = 1..)]
        labels: Vec<String>,
    },

    /// Show a wheel and its slots
    Show {
        /// Wheel index, id, or name
        wheel: String,
    },

    /// Make a wheel the selected one
    Select {
        /// Wheel index, id, or name
        wheel: String,
    },

    /// Delete a wheel
    Delete {
        /// Wheel index, id, or name
        wheel: String,
    },

    /// Spin a wheel and record the result
    Spin {
        /// Wheel index, id, or name
        wheel: String,

        /// Number of spins in a row
        #[arg(short, long, default_value_t = 1)]
        times: u32,
    },

    /// Show past results of a wheel
    History {
        /// Wheel index, id, or name
        wheel: String,
    },

    /// Write the wheel as SVG
    Render {
        /// Wheel index, id, or name
        wheel: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show or change spin settings
    Settings {
        /// Whole turns added per spin
        #[arg(long)]
        revolutions: Option<u32>,

        /// Animation time before the result is read, in milliseconds
        #[arg(long)]
        transition_ms: Option<u64>,
    },
}

/// Finds a wheel by index, then id, then exact name.
fn find_wheel(wheels: &[Wheel], key: &str) -> Result<usize> {
    if let Ok(index) = key.parse::<usize>() {
        if index < wheels.len() {
            return Ok(index);
        }
    }

    wheels
        .iter()
        .position(|w| w.id == key)
        .or_else(|| wheels.iter().position(|w| w.name == key))
        .ok_or_else(|| anyhow!("no wheel matches '{key}'"))
}

async fn lookup(state: &AppState, key: &str) -> Result<Wheel> {
    let wheels = list_wheels(state).await.map_err(|e| anyhow!(e))?;
    let index = find_wheel(&wheels, key)?;
    Ok(wheels[index].clone())
}

fn print_wheel(wheel: &Wheel) {
    println!("{} ({})", wheel.name, wheel.id);
    for (i, label) in wheel.labels.iter().enumerate() {
        println!("  [{i}] {} {}", label.color, label.text);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let state = AppState::open(&data_dir)
        .await
        .with_context(|| format!("failed to open wheel store at {}", data_dir.display()))?;
    if cli.instant {
        state.settings.override_transition(Some(0));
    }

    match cli.command {
        Commands::List => {
            let wheels = list_wheels(&state).await.map_err(|e| anyhow!(e))?;
            if wheels.is_empty() {
                println!("no wheels found");
            }
            for (i, wheel) in wheels.iter().enumerate() {
                println!(
                    "{i:>3}  {}  ({} labels, {} spins)",
                    wheel.name,
                    wheel.labels.len(),
                    wheel.history.len()
                );
            }
        }
        Commands::Create { name, labels } => {
            let wheel = create_wheel(&state, WheelInput { name, labels })
                .await
                .map_err(|e| anyhow!(e))?;
            print_wheel(&wheel);
        }
        Commands::Show { wheel } => {
            let wheel = lookup(&state, &wheel).await?;
            print_wheel(&wheel);
            let slots = get_layout(&state, wheel.id.clone())
                .await
                .map_err(|e| anyhow!(e))?;
            for slot in slots {
                println!(
                    "  {:>6.3} .. {:<6.3} {}",
                    slot.slice.start, slot.slice.end, slot.label.text
                );
            }
        }
        Commands::Select { wheel } => {
            let wheels = list_wheels(&state).await.map_err(|e| anyhow!(e))?;
            let index = find_wheel(&wheels, &wheel)?;
            select_wheel(&state, index).await.map_err(|e| anyhow!(e))?;
            match get_selected_wheel(&state).await.map_err(|e| anyhow!(e))? {
                Some(selected) => print_wheel(&selected),
                None => println!("no wheel selected"),
            }
        }
        Commands::Delete { wheel } => {
            let wheels = list_wheels(&state).await.map_err(|e| anyhow!(e))?;
            let index = find_wheel(&wheels, &wheel)?;
            let removed = delete_wheel(&state, index)
                .await
                .map_err(|e| anyhow!(e))?;
            println!("deleted {}", removed.name);
        }
        Commands::Spin { wheel, times } => {
            if times == 0 {
                bail!("--times must be at least 1");
            }
            let wheels = list_wheels(&state).await.map_err(|e| anyhow!(e))?;
            let index = find_wheel(&wheels, &wheel)?;
            let wheel = select_wheel(&state, index).await.map_err(|e| anyhow!(e))?;

            for _ in 0..times {
                match spin_and_wait(&state, wheel.id.clone())
                    .await
                    .map_err(|e| anyhow!(e))?
                {
                    Some(record) => println!("{}", record.label),
                    None => println!("spin cancelled"),
                }
            }
        }
        Commands::History { wheel } => {
            let wheel = lookup(&state, &wheel).await?;
            let history = get_history(&state, wheel.id.clone())
                .await
                .map_err(|e| anyhow!(e))?;
            if history.is_empty() {
                println!("{} has not been spun yet", wheel.name);
            }
            for record in history {
                println!(
                    "{}  [{}] {}",
                    record.timestamp.to_rfc3339(),
                    record.index,
                    record.label
                );
            }
        }
        Commands::Render { wheel, out } => {
            let wheel = lookup(&state, &wheel).await?;
            let svg = render_wheel(&state, wheel.id.clone())
                .await
                .map_err(|e| anyhow!(e))?;
            match out {
                Some(path) => std::fs::write(&path, svg)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{svg}"),
            }
        }
        Commands::Settings {
            revolutions,
            transition_ms,
        } => {
            let mut settings = get_spin_settings(&state).map_err(|e| anyhow!(e))?;
            if revolutions.is_some() || transition_ms.is_some() {
                if let Some(revolutions) = revolutions {
                    settings.revolutions_per_spin = revolutions;
                }
                if let Some(transition_ms) = transition_ms {
                    settings.transition_ms = transition_ms;
                }
                set_spin_settings(&state, settings.clone()).map_err(|e| anyhow!(e))?;
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
