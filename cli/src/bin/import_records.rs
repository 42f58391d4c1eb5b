use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use compendium::{Compendium, Creature, DirectoryVault, Encounter, Spell};
use encoding_rs::Encoding;
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "import-records")]
#[command(about = "Import exported records into a compendium vault")]
struct Args {
    /// Vault directory receiving the records
    #[arg(long, default_value = "vault")]
    vault: PathBuf,

    /// Source file: a collection document or a bare JSON array
    #[arg(long)]
    file: PathBuf,

    /// Collection to import a bare-array file into
    #[arg(long, value_enum)]
    into: Option<Target>,

    /// Source encoding label (e.g. windows-1251); BOMs and UTF-8 are detected
    #[arg(long)]
    encoding: Option<String>,
}

#[derive(Copy, Clone, ValueEnum)]
enum Target {
    Creatures,
    Spells,
    Encounters,
}

/// Exported document shape; every collection key is optional and extra keys
/// such as lastUpdated are ignored.
#[derive(Default, Deserialize)]
#[serde(default)]
struct ImportDocument {
    creatures: Vec<Creature>,
    spells: Vec<Spell>,
    encounters: Vec<Encounter>,
}

fn read_text(path: &Path, label: Option<&str>) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    if let Some((encoding, bom_len)) = Encoding::for_bom(&bytes) {
        let (text, _, _) = encoding.decode(&bytes[bom_len..]);
        return Ok(text.into_owned());
    }
    if let Some(label) = label {
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| anyhow::anyhow!("unknown encoding label: {}", label))?;
        let (text, _, had_errors) = encoding.decode(&bytes);
        if had_errors {
            anyhow::bail!("{} is not valid {}", path.display(), encoding.name());
        }
        return Ok(text.into_owned());
    }
    Ok(String::from_utf8(bytes)?)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let text = read_text(&args.file, args.encoding.as_deref())?;

    // Bare arrays need a target collection; documents carry their own keys.
    let document: ImportDocument = match args.into {
        Some(Target::Creatures) => ImportDocument {
            creatures: serde_json::from_str(&text)?,
            ..ImportDocument::default()
        },
        Some(Target::Spells) => ImportDocument {
            spells: serde_json::from_str(&text)?,
            ..ImportDocument::default()
        },
        Some(Target::Encounters) => ImportDocument {
            encounters: serde_json::from_str(&text)?,
            ..ImportDocument::default()
        },
        None => serde_json::from_str(&text)?,
    };

    let mut app = Compendium::new(Arc::new(DirectoryVault::new(&args.vault)));
    app.initialize();

    // Inserted through the normal create path: fresh ids and timestamps.
    let mut creatures = 0;
    for creature in document.creatures {
        app.creatures.create(creature)?;
        creatures += 1;
    }
    let mut spells = 0;
    for spell in document.spells {
        app.spells.create(spell)?;
        spells += 1;
    }
    let mut encounters = 0;
    for encounter in document.encounters {
        app.encounters.create(encounter)?;
        encounters += 1;
    }
    println!(
        "imported creatures={} spells={} encounters={}",
        creatures, spells, encounters
    );
    Ok(())
}
