use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use compendium::query::{
    creatures_by_type, filter_spells_by_name, spells_by_class, spells_by_level, spells_by_school,
    spells_by_school_grouped, sorted_spells,
};
use compendium::{
    ability_mod, format_modifier, Ability, Compendium, Creature, DirectoryVault, Encounter,
    EncounterKind, GameCategory, Locale, LocaleContext, Participant, ParticipantKind,
    ParticipantPatch, Spell,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Subcommand)]
enum Cmd {
    /// Insert the starter bestiary, spellbook, and encounter content
    Seed,
    /// Add a creature to the bestiary
    CreatureAdd {
        name: String,
        /// Creature type key (humanoid, beast, undead, ...)
        #[arg(long, default_value = "humanoid")]
        kind: String,
        /// Size key (tiny through gargantuan)
        #[arg(long, default_value = "medium")]
        size: String,
        /// Alignment key (lawful_good, neutral, ...)
        #[arg(long, default_value = "neutral")]
        alignment: String,
        /// Armor class
        #[arg(long, default_value_t = 10)]
        ac: i64,
        /// Six ability scores: STR,DEX,CON,INT,WIS,CHA
        #[arg(long, value_delimiter = ',', default_values_t = [10i64; 6])]
        scores: Vec<i64>,
        /// Proficiency bonus
        #[arg(long, default_value_t = 2)]
        pb: i64,
    },
    /// List creatures, optionally one type only
    CreatureList {
        /// Creature type key to filter by
        #[arg(long)]
        kind: Option<String>,
    },
    /// Print a creature's stat block
    Stats { id: String },
    /// Delete a creature
    CreatureRm { id: String },
    /// Add a spell to the spellbook
    SpellAdd {
        name: String,
        /// Spell level, 0 for a cantrip
        #[arg(long, default_value_t = 0)]
        level: u8,
        /// School key (evocation, abjuration, ...)
        #[arg(long, default_value = "evocation")]
        school: String,
        /// Comma-separated class keys; at least one is required
        #[arg(long, value_delimiter = ',')]
        classes: Vec<String>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = false)]
        concentration: bool,
        #[arg(long, default_value_t = false)]
        ritual: bool,
    },
    /// List spells; one filter at a time
    SpellList {
        /// Name substring, case-insensitive
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        level: Option<u8>,
        #[arg(long)]
        school: Option<String>,
        #[arg(long)]
        class: Option<String>,
        /// Group the whole spellbook by school instead
        #[arg(long, default_value_t = false)]
        grouped: bool,
    },
    /// Delete a spell
    SpellRm { id: String },
    /// Create an encounter
    EncounterAdd {
        name: String,
        /// combat | hazard | chase | random
        #[arg(long, default_value = "combat")]
        kind: String,
        /// Combat only: easy, medium, hard, deadly
        #[arg(long, default_value = "medium")]
        difficulty: String,
        /// Combat only
        #[arg(long)]
        environment: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List encounters
    EncounterList,
    /// Delete an encounter
    EncounterRm { id: String },
    /// Add a participant to an encounter
    ParticipantAdd {
        encounter: String,
        name: String,
        /// pc | npc | monster | trap
        #[arg(long, default_value = "monster")]
        kind: String,
        /// Hit points; defaults to the stored defaultHP setting
        #[arg(long)]
        hp: Option<i64>,
        #[arg(long, default_value_t = 10)]
        ac: i64,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Update a participant's hit points, initiative, or notes
    ParticipantSet {
        encounter: String,
        participant: String,
        #[arg(long)]
        hp: Option<i64>,
        #[arg(long)]
        initiative: Option<i64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a participant from an encounter
    ParticipantRm {
        encounter: String,
        participant: String,
    },
    /// Show the stored settings
    SettingsShow,
    /// Change stored settings
    SettingsSet {
        #[arg(long)]
        default_hp: Option<i64>,
        #[arg(long)]
        auto_save: Option<bool>,
        #[arg(long)]
        round_timer: Option<i64>,
        #[arg(long)]
        encounters_folder: Option<String>,
    },
}

#[derive(Parser)]
#[command(name = "compendium-cli")]
#[command(about = "D&D compendium vault CLI")]
struct Cli {
    /// Vault directory holding the storage/ documents
    #[arg(long, default_value = "vault")]
    vault: PathBuf,

    /// Display language: en | ru
    #[arg(long, default_value = "en")]
    locale: String,

    #[command(subcommand)]
    cmd: Cmd,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let locale = Locale::parse(&cli.locale)
        .ok_or_else(|| anyhow::anyhow!("unknown locale: {}", cli.locale))?;
    debug!(vault = %cli.vault.display(), locale = locale.code(), "opening vault");

    let mut app = Compendium::new(Arc::new(DirectoryVault::new(&cli.vault)));
    app.locale.set_locale(locale);
    app.initialize();

    match cli.cmd {
        Cmd::Seed => {
            let inserted = app.seed_builtins()?;
            println!("seeded {} records", inserted);
        }
        Cmd::CreatureAdd {
            name,
            kind,
            size,
            alignment,
            ac,
            scores,
            pb,
        } => {
            let mut creature = Creature::new(name);
            creature.kind = kind;
            creature.size = size;
            creature.alignment = alignment;
            creature.ac = ac;
            creature.proficiency_bonus = pb;
            creature.characteristics = to_scores(&scores)?;
            let stored = app.creatures.create(creature)?;
            println!(
                "{}",
                app.locale
                    .text_with("CREATURE_MODAL.SUCCESS", &[("name", &stored.name)])
            );
            println!("id={}", stored.id);
        }
        Cmd::CreatureList { kind } => {
            let creatures: Vec<&Creature> = match kind.as_deref() {
                Some(kind) => creatures_by_type(app.creatures.all(), kind),
                None => app.creatures.all().iter().collect(),
            };
            for creature in &creatures {
                println!(
                    "{}  {:<24} {:<14} ac={} init={}",
                    creature.id,
                    creature.name,
                    app.locale
                        .game_label(GameCategory::CreatureTypes, &creature.kind),
                    creature.ac,
                    format_modifier(creature.initiative)
                );
            }
            println!("{} creatures", creatures.len());
        }
        Cmd::Stats { id } => {
            let Some(creature) = app.creatures.get(&id).cloned() else {
                anyhow::bail!("no creature with id {}", id);
            };
            print_stat_block(&app.locale, &creature);
        }
        Cmd::CreatureRm { id } => {
            let name = app.creatures.get(&id).map(|c| c.name.clone());
            if app.creatures.delete(&id)? {
                let name = name.unwrap_or_else(|| id.clone());
                println!(
                    "{}",
                    app.locale
                        .text_with("BESTIARY.DELETE_SUCCESS", &[("name", &name)])
                );
            } else {
                println!("no creature with id {}", id);
            }
        }
        Cmd::SpellAdd {
            name,
            level,
            school,
            classes,
            description,
            concentration,
            ritual,
        } => {
            if classes.is_empty() {
                anyhow::bail!("at least one class is required");
            }
            let mut spell = Spell::new(name);
            spell.level = level;
            spell.school = school;
            spell.classes = classes;
            spell.description = description;
            spell.concentration = concentration;
            spell.ritual = ritual;
            let stored = app.spells.create(spell)?;
            println!("created {} ({})", stored.name, stored.id);
        }
        Cmd::SpellList {
            name,
            level,
            school,
            class,
            grouped,
        } => {
            let spells = app.spells.all();
            if grouped {
                println!("{}:", app.locale.text("SPELLS.SCHOOL_SECTIONS"));
                for (school, group) in spells_by_school_grouped(spells) {
                    if group.is_empty() {
                        continue;
                    }
                    println!(
                        "{}:",
                        app.locale.game_label(GameCategory::SpellSchools, school)
                    );
                    for spell in group {
                        println!("  {}  {:<24} level={}", spell.id, spell.name, spell.level);
                    }
                }
                return Ok(());
            }
            let given = [
                name.is_some(),
                level.is_some(),
                school.is_some(),
                class.is_some(),
            ];
            if given.iter().filter(|flag| **flag).count() > 1 {
                anyhow::bail!("use one filter at a time");
            }
            let mut hits: Vec<&Spell> = if let Some(query) = name.as_deref() {
                filter_spells_by_name(spells, query)
            } else if let Some(level) = level {
                spells_by_level(spells, level)
            } else if let Some(school) = school.as_deref() {
                spells_by_school(spells, school)
            } else if let Some(class) = class.as_deref() {
                spells_by_class(spells, class)
            } else {
                sorted_spells(spells)
            };
            hits.sort_by_key(|spell| (spell.level, spell.name.to_lowercase()));
            if hits.is_empty() {
                let key = if given.contains(&true) {
                    "SPELLS.NO_SPELLS_FOUND"
                } else {
                    "SPELLS.NO_SPELLS"
                };
                println!("{}", app.locale.text(key));
                return Ok(());
            }
            for spell in &hits {
                println!(
                    "{}  {:<24} level={} school={}",
                    spell.id,
                    spell.name,
                    spell.level,
                    app.locale
                        .game_label(GameCategory::SpellSchools, &spell.school)
                );
            }
            println!("{} spells", hits.len());
        }
        Cmd::SpellRm { id } => {
            let name = app.spells.get(&id).map(|s| s.name.clone());
            if app.spells.delete(&id)? {
                let name = name.unwrap_or_else(|| id.clone());
                println!(
                    "{}",
                    app.locale
                        .text_with("SPELLS.DELETE_SUCCESS", &[("name", &name)])
                );
            } else {
                println!("no spell with id {}", id);
            }
        }
        Cmd::EncounterAdd {
            name,
            kind,
            difficulty,
            environment,
            description,
        } => {
            let kind = EncounterKind::parse(&kind)
                .ok_or_else(|| anyhow::anyhow!("unknown encounter type: {}", kind))?;
            let mut encounter = Encounter::new(name, kind);
            encounter.description = description;
            if kind == EncounterKind::Combat {
                encounter.difficulty = Some(difficulty);
                encounter.environment = environment;
            }
            let stored = app.encounters.create(encounter)?;
            println!("created {} ({})", stored.name, stored.id);
        }
        Cmd::EncounterList => {
            for encounter in app.encounters.all() {
                println!(
                    "{}  {:<24} {:<10} participants={}",
                    encounter.id,
                    encounter.name,
                    app.locale
                        .game_label(GameCategory::EncounterTypes, encounter.kind.key()),
                    encounter.participants.len()
                );
            }
            println!("{} encounters", app.encounters.len());
        }
        Cmd::EncounterRm { id } => {
            if app.encounters.delete(&id)? {
                println!("deleted {}", id);
            } else {
                println!("no encounter with id {}", id);
            }
        }
        Cmd::ParticipantAdd {
            encounter,
            name,
            kind,
            hp,
            ac,
            notes,
        } => {
            let kind = ParticipantKind::parse(&kind)
                .ok_or_else(|| anyhow::anyhow!("unknown participant type: {}", kind))?;
            let hp = hp.unwrap_or(app.settings.get().default_hp);
            let participant = Participant {
                name,
                kind,
                hp,
                max_hp: hp,
                ac,
                notes,
                ..Participant::default()
            };
            match app.add_participant(&encounter, participant)? {
                Some(added) => println!("added {} ({})", added.name, added.id),
                None => anyhow::bail!("no encounter with id {}", encounter),
            }
        }
        Cmd::ParticipantSet {
            encounter,
            participant,
            hp,
            initiative,
            notes,
        } => {
            let patch = ParticipantPatch {
                hp,
                initiative,
                notes,
                ..ParticipantPatch::default()
            };
            match app.update_participant(&encounter, &participant, patch)? {
                Some(updated) => println!(
                    "{} hp={}/{} initiative={}",
                    updated.name,
                    updated.hp,
                    updated.max_hp,
                    updated
                        .initiative
                        .map_or_else(|| "-".to_string(), |i| i.to_string())
                ),
                None => anyhow::bail!("no participant {} in {}", participant, encounter),
            }
        }
        Cmd::ParticipantRm {
            encounter,
            participant,
        } => {
            if app.remove_participant(&encounter, &participant)? {
                println!("removed {}", participant);
            } else {
                anyhow::bail!("no participant {} in {}", participant, encounter);
            }
        }
        Cmd::SettingsShow => {
            let settings = app.settings.get();
            println!(
                "defaultHP={} autoSave={} roundTimer={} encountersFolder={}",
                settings.default_hp,
                settings.auto_save,
                settings.round_timer,
                settings.encounters_folder
            );
        }
        Cmd::SettingsSet {
            default_hp,
            auto_save,
            round_timer,
            encounters_folder,
        } => {
            let mut settings = app.settings.get().clone();
            if let Some(default_hp) = default_hp {
                settings.default_hp = default_hp;
            }
            if let Some(auto_save) = auto_save {
                settings.auto_save = auto_save;
            }
            if let Some(round_timer) = round_timer {
                settings.round_timer = round_timer;
            }
            if let Some(encounters_folder) = encounters_folder {
                settings.encounters_folder = encounters_folder;
            }
            app.settings.set(settings)?;
            println!("settings saved");
        }
    }
    Ok(())
}

fn to_scores(values: &[i64]) -> anyhow::Result<[i64; 6]> {
    <[i64; 6]>::try_from(values)
        .map_err(|_| anyhow::anyhow!("expected 6 ability scores, got {}", values.len()))
}

fn print_stat_block(locale: &LocaleContext, creature: &Creature) {
    println!("{}", creature.name);
    println!(
        "{}, {}, {}",
        locale.game_label(GameCategory::Sizes, &creature.size),
        locale.game_label(GameCategory::CreatureTypes, &creature.kind),
        locale.game_label(GameCategory::Alignments, &creature.alignment)
    );
    println!(
        "ac={} hit_dice={} speed={} init={} pb={}",
        creature.ac,
        creature.hit_dice,
        creature.speed,
        format_modifier(creature.initiative),
        format_modifier(creature.proficiency_bonus)
    );
    for ability in Ability::ALL {
        let score = creature.ability_score(ability);
        println!(
            "{} {:>2} ({})  save {}{}",
            ability.abbreviation(),
            score,
            format_modifier(ability_mod(score)),
            format_modifier(creature.saving_throw(ability)),
            if creature.saving_throws_proficiency[ability.index()] {
                " *"
            } else {
                ""
            }
        );
    }
    if !creature.skills.is_empty() {
        println!("skills: {}", creature.skills);
    }
    if !creature.senses.is_empty() {
        println!("senses: {}", creature.senses);
    }
    if !creature.languages.is_empty() {
        println!("languages: {}", creature.languages);
    }
    if !creature.traits.is_empty() {
        println!("traits: {}", creature.traits);
    }
    if !creature.actions.is_empty() {
        println!("actions: {}", creature.actions);
    }
    if !creature.legendary_actions.is_empty() {
        println!("legendary: {}", creature.legendary_actions);
    }
    if !creature.notes.is_empty() {
        println!("notes: {}", creature.notes);
    }
}
