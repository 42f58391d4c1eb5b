use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn cli(vault: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cli").unwrap();
    cmd.arg("--vault").arg(vault);
    cmd
}

fn stdout_of(mut cmd: Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn seed_then_list_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("seeded 6 records"));

    cli(dir.path())
        .arg("creature-list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goblin"))
        .stdout(predicate::str::contains("3 creatures"));

    cli(dir.path())
        .args(["spell-list", "--grouped"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Evocation:"))
        .stdout(predicate::str::contains("Fire Bolt"));

    assert!(dir.path().join("storage/bestiary.json").is_file());
    assert!(dir.path().join("storage/spells.json").is_file());
    assert!(dir.path().join("storage/encounters.json").is_file());

    // second seed is a no-op
    cli(dir.path())
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("seeded 0 records"));
}

#[test]
fn creature_add_then_stats() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = stdout_of({
        let mut cmd = cli(dir.path());
        cmd.args([
            "creature-add",
            "Test Goblin",
            "--kind",
            "humanoid",
            "--size",
            "small",
            "--ac",
            "15",
            "--scores",
            "8,14,10,10,8,8",
        ]);
        cmd
    });
    assert!(stdout.contains("added to bestiary!"));
    let id = stdout
        .lines()
        .find_map(|line| line.strip_prefix("id="))
        .unwrap()
        .to_string();
    assert!(id.starts_with("creature_"));

    cli(dir.path())
        .args(["stats", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Small, Humanoid"))
        .stdout(predicate::str::contains("init=+2"))
        .stdout(predicate::str::contains("DEX 14 (+2)"));

    cli(dir.path())
        .args(["creature-rm", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));

    cli(dir.path())
        .arg("creature-list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 creatures"));
}

#[test]
fn russian_locale_labels_the_listing() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path()).arg("seed").assert().success();

    Command::cargo_bin("cli")
        .unwrap()
        .arg("--vault")
        .arg(dir.path())
        .arg("--locale")
        .arg("ru")
        .arg("creature-list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Гуманоид"));

    Command::cargo_bin("cli")
        .unwrap()
        .arg("--vault")
        .arg(dir.path())
        .arg("--locale")
        .arg("de")
        .arg("creature-list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown locale"));
}

#[test]
fn spell_add_requires_a_class() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .args(["spell-add", "Homebrew Blast", "--level", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one class"));

    cli(dir.path())
        .args([
            "spell-add",
            "Homebrew Blast",
            "--level",
            "1",
            "--classes",
            "wizard,sorcerer",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("created Homebrew Blast"));
}

#[test]
fn empty_spellbook_prints_the_locale_notice() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .arg("spell-list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No spells added yet."));

    cli(dir.path())
        .args(["spell-list", "--name", "fire"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No spells match the search."));
}

#[test]
fn participant_flow_uses_the_default_hp_setting() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = stdout_of({
        let mut cmd = cli(dir.path());
        cmd.args(["encounter-add", "Bar Brawl", "--environment", "tavern"]);
        cmd
    });
    let encounter_id = stdout
        .trim()
        .rsplit('(')
        .next()
        .unwrap()
        .trim_end_matches(')')
        .to_string();
    assert!(encounter_id.starts_with("enc_"));

    let added = stdout_of({
        let mut cmd = cli(dir.path());
        cmd.args(["participant-add", &encounter_id, "Angry Patron", "--ac", "11"]);
        cmd
    });
    let participant_id = added
        .trim()
        .rsplit('(')
        .next()
        .unwrap()
        .trim_end_matches(')')
        .to_string();
    assert!(participant_id.starts_with("part_"));

    // hp defaulted from the stored defaultHP setting
    cli(dir.path())
        .args([
            "participant-set",
            &encounter_id,
            &participant_id,
            "--hp",
            "50",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("hp=50/100"));

    cli(dir.path())
        .args(["participant-rm", &encounter_id, &participant_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed"));

    cli(dir.path())
        .args(["participant-rm", &encounter_id, &participant_id])
        .assert()
        .failure();
}

#[test]
fn settings_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    cli(dir.path())
        .arg("settings-show")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "defaultHP=100 autoSave=true roundTimer=60 encountersFolder=Encounters",
        ));

    cli(dir.path())
        .args(["settings-set", "--default-hp", "42", "--auto-save", "false"])
        .assert()
        .success();

    cli(dir.path())
        .arg("settings-show")
        .assert()
        .success()
        .stdout(predicate::str::contains("defaultHP=42 autoSave=false"));
}

#[test]
fn import_accepts_a_bare_array() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("export.json");
    std::fs::write(
        &file,
        r#"[{"name": "Imported Wolf", "type": "beast", "ac": 13}]"#,
    )
    .unwrap();

    Command::cargo_bin("import-records")
        .unwrap()
        .arg("--vault")
        .arg(dir.path())
        .arg("--file")
        .arg(&file)
        .args(["--into", "creatures"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "imported creatures=1 spells=0 encounters=0",
        ));

    cli(dir.path())
        .arg("creature-list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported Wolf"));
}

#[test]
fn import_reads_windows_1251_documents() {
    let dir = tempfile::tempdir().unwrap();
    let json = r#"{"creatures": [{"name": "Гоблин", "type": "humanoid"}], "lastUpdated": 3}"#;
    let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode(json);
    let file = dir.path().join("bestiary_export.json");
    std::fs::write(&file, &bytes).unwrap();

    Command::cargo_bin("import-records")
        .unwrap()
        .arg("--vault")
        .arg(dir.path())
        .arg("--file")
        .arg(&file)
        .args(["--encoding", "windows-1251"])
        .assert()
        .success()
        .stdout(predicate::str::contains("imported creatures=1"));

    cli(dir.path())
        .arg("creature-list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Гоблин"));
}
