//! Monster flavor for the battle scene, keyed to the difficulty tier.

use rand::Rng;

use crate::curriculum::Difficulty;

/// What the battle scene draws for the current opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterSprite {
    pub name: String,
    pub glyph: &'static str,
}

const PREFIXES: [&str; 10] = [
    "Sly", "Grim", "Feral", "Rabid", "Sullen", "Crooked", "Howling", "Restless", "Vile", "Dire",
];

const EASY_KIN: [&str; 5] = ["Rat", "Slime", "Imp", "Toad", "Gnat"];
const MEDIUM_KIN: [&str; 5] = ["Goblin", "Kobold", "Bandit", "Wisp", "Hound"];
const HARD_KIN: [&str; 5] = ["Ogre", "Troll", "Harpy", "Gargoyle", "Wraith"];
const VERY_HARD_KIN: [&str; 5] = ["Drake", "Chimera", "Basilisk", "Manticore", "Golem"];
const EXPERT_KIN: [&str; 5] = ["Lich", "Dragon", "Demon", "Colossus", "Revenant"];

fn tier_kin(difficulty: Difficulty) -> &'static [&'static str] {
    match difficulty {
        Difficulty::Easy => &EASY_KIN,
        Difficulty::Medium => &MEDIUM_KIN,
        Difficulty::Hard => &HARD_KIN,
        Difficulty::VeryHard => &VERY_HARD_KIN,
        Difficulty::Expert => &EXPERT_KIN,
    }
}

fn tier_glyph(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "🐀",
        Difficulty::Medium => "👺",
        Difficulty::Hard => "👹",
        Difficulty::VeryHard => "🐉",
        Difficulty::Expert => "💀",
    }
}

/// Picks a monster for the tier. Generic over the RNG so tests can seed it.
pub fn summon<R: Rng>(rng: &mut R, difficulty: Difficulty) -> MonsterSprite {
    let kin = tier_kin(difficulty);
    let prefix = PREFIXES[rng.gen_range(0..PREFIXES.len())];
    let base = kin[rng.gen_range(0..kin.len())];

    MonsterSprite {
        name: format!("{} {}", prefix, base),
        glyph: tier_glyph(difficulty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn same_seed_same_monster() {
        let a = summon(&mut ChaCha8Rng::seed_from_u64(7), Difficulty::Hard);
        let b = summon(&mut ChaCha8Rng::seed_from_u64(7), Difficulty::Hard);
        assert_eq!(a, b);
    }

    #[test]
    fn name_comes_from_the_tier_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            let monster = summon(&mut rng, Difficulty::Expert);
            assert!(
                EXPERT_KIN.iter().any(|kin| monster.name.ends_with(kin)),
                "unexpected expert name: {}",
                monster.name
            );
            assert!(PREFIXES.iter().any(|p| monster.name.starts_with(p)));
        }
    }

    #[test]
    fn glyph_tracks_the_tier() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let tiers = [
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::VeryHard,
            Difficulty::Expert,
        ];
        for tier in tiers {
            assert_eq!(summon(&mut rng, tier).glyph, tier_glyph(tier));
        }
    }
}
