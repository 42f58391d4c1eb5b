use compendium::{Ability, Creature, ability_mod, format_modifier, saving_throw_mod};
use proptest::prelude::*;

#[test]
fn ability_mod_rounds_down() {
    assert_eq!(ability_mod(8), -1);
    assert_eq!(ability_mod(9), -1);
    assert_eq!(ability_mod(10), 0);
    assert_eq!(ability_mod(11), 0);
    assert_eq!(ability_mod(19), 4);
    assert_eq!(ability_mod(1), -5);
    assert_eq!(ability_mod(30), 10);
}

#[test]
fn saving_throw_adds_proficiency_only_when_proficient() {
    assert_eq!(saving_throw_mod(14, true, 3), 5);
    assert_eq!(saving_throw_mod(14, false, 3), 2);
}

#[test]
fn modifier_formatting_keeps_explicit_plus() {
    assert_eq!(format_modifier(0), "+0");
    assert_eq!(format_modifier(3), "+3");
    assert_eq!(format_modifier(-1), "-1");
}

#[test]
fn fighter_scenario_derives_expected_bonuses() {
    let mut creature = Creature::new("Veteran");
    creature.characteristics = [16, 14, 12, 10, 8, 10];
    creature.proficiency_bonus = 3;
    creature.saving_throws_proficiency = [true, false, false, false, false, false];
    creature.recompute_derived();

    assert_eq!(creature.initiative, 2);
    assert_eq!(creature.saving_throws[Ability::Str.index()], 6);
    assert_eq!(creature.saving_throws[Ability::Wis.index()], -1);
}

#[test]
fn negative_proficiency_bonus_normalizes_to_zero() {
    let mut creature = Creature::new("Commoner");
    creature.proficiency_bonus = -2;
    creature.recompute_derived();
    assert_eq!(creature.proficiency_bonus, 0);
}

proptest! {
    #[test]
    fn modifier_matches_floor_halving(score in 1i64..=30) {
        let expected = ((score - 10) as f64 / 2.0).floor() as i64;
        prop_assert_eq!(ability_mod(score), expected);
    }

    #[test]
    fn proficiency_is_additive(score in 1i64..=30, bonus in 0i64..=6) {
        prop_assert_eq!(
            saving_throw_mod(score, true, bonus),
            ability_mod(score) + bonus
        );
    }
}
