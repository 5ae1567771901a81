use std::io::Write;
use std::path::PathBuf;

use combat_content::{ConfigLoader, ContentFactory, RosterLoader};
use combat_core::{CombatConfig, Element, Encounter, Side, StatField, TriggerType};
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn config_keeps_defaults_for_missing_keys() {
    let file = write_temp("death_threshold = 1.0\n");

    let config = ConfigLoader::load(file.path()).unwrap();

    assert_eq!(config.speed_threshold, 999.0);
    assert_eq!(config.death_threshold, 1.0);
}

#[test]
fn config_rejects_negative_threshold() {
    let file = write_temp("speed_threshold = -5.0\n");

    let err = ConfigLoader::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("speed_threshold"));
}

#[test]
fn roster_fills_defaults() {
    let file = write_temp(
        r#"[
            (name: "Hero", side: Player, spells: [(name: "Poke", base_dmg: 2.0)]),
            (name: "Slime", side: Enemy, stats: (speed: 40.0)),
        ]"#,
    );

    let roster = RosterLoader::load(file.path()).unwrap();

    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].stats.health, 100.0);
    assert_eq!(roster[0].spells[0].base_cooldown, 1);
    assert_eq!(roster[0].spells[0].nb_targets, 1);
    assert_eq!(roster[1].side, Side::Enemy);
    assert_eq!(roster[1].stats.speed, 40.0);
    assert_eq!(roster[1].stats.physical_attack, 10.0);
}

#[test]
fn roster_rejects_non_positive_speed() {
    let file = write_temp(r#"[(name: "Statue", side: Enemy, stats: (speed: 0.0))]"#);

    let err = RosterLoader::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("Statue"));
}

#[test]
fn roster_rejects_health_at_death_threshold() {
    let file = write_temp(r#"[(name: "Wisp", side: Enemy, stats: (health: 0.3))]"#);

    let err = RosterLoader::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("Wisp"));
    assert!(err.to_string().contains("death threshold"));
}

#[test]
fn roster_health_is_checked_after_initial_passives() {
    let content = r#"[(
        name: "Husk",
        side: Enemy,
        stats: (health: 20.0),
        passives: [
            StatBoost(name: "Withered", field: Health, value: -19.8, duration: Permanent),
        ],
    )]"#;

    let err = RosterLoader::parse(content).unwrap_err();
    assert!(err.to_string().contains("Husk"));
}

#[test]
fn roster_uses_the_given_death_threshold() {
    let content = r#"[(name: "Squire", side: Player, stats: (health: 5.0))]"#;

    assert!(RosterLoader::parse(content).is_ok());

    let strict = CombatConfig {
        death_threshold: 5.0,
        ..CombatConfig::default()
    };
    assert!(RosterLoader::parse_with(content, &strict).is_err());
}

#[test]
fn factory_validates_rosters_with_its_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "death_threshold = 10.0\n").unwrap();
    std::fs::create_dir(dir.path().join("rosters")).unwrap();
    std::fs::write(
        dir.path().join("rosters/frail.ron"),
        r#"[(name: "Moth", side: Enemy, stats: (health: 8.0))]"#,
    )
    .unwrap();

    let err = ContentFactory::new(dir.path())
        .load_roster("frail")
        .unwrap_err();
    assert!(err.to_string().contains("Moth"));
}

#[test]
fn roster_rejects_malformed_ron() {
    let file = write_temp(r#"[(name: "Hero", side: Wizard)]"#);

    assert!(RosterLoader::load(file.path()).is_err());
}

#[test]
fn missing_file_names_the_path() {
    let err = RosterLoader::load(std::path::Path::new("/nonexistent/roster.ron")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/roster.ron"));
}

#[test]
fn bundled_skirmish_loads_and_registers() {
    let factory = ContentFactory::new(data_dir());
    let config = factory.load_config().unwrap();
    let roster = factory.load_roster("skirmish").unwrap();

    let mut encounter = Encounter::new(config);
    for template in roster {
        encounter.register_template(template).unwrap();
    }

    assert_eq!(encounter.roster().living(Side::Player).count(), 2);
    assert_eq!(encounter.roster().living(Side::Enemy).count(), 3);

    let knight = encounter.roster().as_slice()[0].clone();
    // Battle Focus is applied on attachment.
    assert_eq!(knight.stats.physical_attack, 19.0);

    let shaman = &encounter.roster().as_slice()[4];
    assert_eq!(shaman.stats.get(StatField::Resistance(Element::Fire)), 25.0);

    let sorceress = &encounter.roster().as_slice()[1];
    assert_eq!(sorceress.passives[0].trigger, TriggerType::OnDamageDealt);
    assert_eq!(sorceress.passives[0].trigger_threshold, 3);
}

#[test]
fn absent_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let factory = ContentFactory::new(dir.path());

    let config = factory.load_config().unwrap();
    assert_eq!(config.speed_threshold, 999.0);
    assert!(factory.load_roster("missing").is_err());
}
