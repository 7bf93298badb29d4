//! Turns one line of battle-log prose into a [`LogEvent`].
//!
//! The resolver's vocabulary is informal and not fully known in advance, so
//! every step here is a best-effort pattern match and anything unmatched falls
//! back to [`LogEvent::unrecognized`]. Nothing in this module panics on input
//! text or keeps state between calls.
use crate::models::{BattleResult, HpUpdate, LogEvent, LogEventKind, Side};
use crate::parsing::regex::*;

const SIDES: [Side; 2] = [Side::Attacker, Side::Defender];

/// Display names of the two combatants, as they appear in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorNames {
    pub attacker: String,
    pub defender: String,
}

impl ActorNames {
    pub fn new(attacker: impl Into<String>, defender: impl Into<String>) -> Self {
        Self {
            attacker: attacker.into(),
            defender: defender.into(),
        }
    }

    pub fn from_result(result: &BattleResult) -> Self {
        Self::new(result.attacker.name.clone(), result.defender.name.clone())
    }

    pub fn of(&self, side: Side) -> &str {
        match side {
            Side::Attacker => &self.attacker,
            Side::Defender => &self.defender,
        }
    }

    /// Empty names never match anything.
    fn matchable(&self, side: Side) -> Option<&str> {
        let name = self.of(side);
        (!name.is_empty()).then_some(name)
    }
}

pub fn classify_line(line: &str, names: &ActorNames) -> LogEvent {
    let defeated = RE_DEFEAT
        .find(line)
        .and_then(|keyword| defeated_side(line, keyword.start(), names));

    LogEvent {
        kind: categorize(line),
        acting_side: acting_side(line, names),
        hp_update: extract_hp(line, names),
        defeated,
        potion_consumed: extract_potion(line),
    }
}

fn categorize(line: &str) -> LogEventKind {
    // A blow that also fells its target is still a blow; `defeated` zeroes the HP.
    if RE_HIT.is_match(line) {
        LogEventKind::AttackHit
    } else if RE_MISS.is_match(line) {
        LogEventKind::AttackMiss
    } else if RE_DEFEAT.is_match(line) {
        LogEventKind::Defeat
    } else if RE_REVIVAL.is_match(line) {
        LogEventKind::Revival
    } else if RE_ROUND.is_match(line) {
        LogEventKind::RoundMarker
    } else if RE_VICTORY.is_match(line) {
        LogEventKind::VictoryDeclaration
    } else {
        LogEventKind::StatusOrOther
    }
}

/// Earliest position where `side`'s name is used as the actor of the line:
/// followed by an arrow, followed by a possessive, or opening the line.
fn acting_position(line: &str, name: &str) -> Option<usize> {
    line.match_indices(name)
        .map(|(pos, _)| pos)
        .find(|&pos| {
            let rest = &line[pos + name.len()..];
            rest.trim_start().starts_with("->")
                || rest.starts_with("'s")
                || rest.starts_with("’s")
                || rest.starts_with('의')
                || opens_line(line, pos, rest)
        })
}

fn opens_line(line: &str, pos: usize, rest: &str) -> bool {
    let before = line[..pos].trim_start();
    if before == "[" {
        return rest.starts_with(']');
    }
    before.is_empty()
        && rest
            .chars()
            .next()
            .map_or(true, |c| c.is_whitespace() || (c.is_ascii_punctuation() && c != '\''))
}

fn acting_side(line: &str, names: &ActorNames) -> Option<Side> {
    pick_side(names, |name| acting_position(line, name))
}

/// Chooses the side with the smallest position; on a tie the longer name wins,
/// since the shorter one is then a prefix of it.
fn pick_side(names: &ActorNames, position: impl Fn(&str) -> Option<usize>) -> Option<Side> {
    SIDES
        .iter()
        .filter_map(|&side| {
            let name = names.matchable(side)?;
            position(name).map(|pos| (side, pos, name.len()))
        })
        .min_by(|a, b| a.1.cmp(&b.1).then(b.2.cmp(&a.2)))
        .map(|(side, _, _)| side)
}

fn leftmost_side(line: &str, names: &ActorNames) -> Option<Side> {
    pick_side(names, |name| line.find(name))
}

/// Side whose name the text mentions; the longer name wins when both do.
fn side_named_in(text: &str, names: &ActorNames) -> Option<Side> {
    SIDES
        .iter()
        .filter_map(|&side| {
            let name = names.matchable(side)?;
            text.contains(name).then_some((side, name.len()))
        })
        .max_by_key(|&(_, len)| len)
        .map(|(side, _)| side)
}

fn clamp_hp(raw: &str) -> Option<u32> {
    let value: i64 = raw.parse().ok()?;
    Some(u32::try_from(value.max(0)).unwrap_or(u32::MAX))
}

fn extract_hp(line: &str, names: &ActorNames) -> Option<HpUpdate> {
    if let Some(caps) = RE_ARROW_HP.captures(line) {
        let side = side_named_in(&caps["target"], names);
        if let (Some(side), Some(new_value)) = (side, clamp_hp(&caps["hp"])) {
            return Some(HpUpdate { side, new_value });
        }
    }

    if let Some(caps) = RE_REVIVAL_HP.captures(line) {
        // The revived subject precedes the reviver, so the defender is checked first.
        let side = [Side::Defender, Side::Attacker]
            .into_iter()
            .find(|&side| names.matchable(side).is_some_and(|name| line.contains(name)));
        if let (Some(side), Some(new_value)) = (side, clamp_hp(&caps["hp"])) {
            return Some(HpUpdate { side, new_value });
        }
    }

    if let Some(caps) = RE_PAREN_HP.captures(line) {
        if let (Some(side), Some(new_value)) = (leftmost_side(line, names), clamp_hp(&caps["hp"])) {
            return Some(HpUpdate { side, new_value });
        }
    }

    None
}

/// The name closest before the defeat keyword, or the leftmost name when none precedes it.
fn defeated_side(line: &str, keyword_at: usize, names: &ActorNames) -> Option<Side> {
    let head = &line[..keyword_at];
    SIDES
        .iter()
        .filter_map(|&side| {
            let name = names.matchable(side)?;
            head.rfind(name).map(|pos| (side, pos + name.len(), name.len()))
        })
        .max_by(|a, b| a.1.cmp(&b.1).then(a.2.cmp(&b.2)))
        .map(|(side, _, _)| side)
        .or_else(|| leftmost_side(line, names))
}

fn extract_potion(line: &str) -> Option<String> {
    let caps = if line.contains("used!") {
        RE_POTION_USED.captures(line)
    } else {
        RE_POTION_ACTIVATED.captures(line)
    }?;
    let name = caps["potion"].trim();
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> ActorNames {
        ActorNames::new("Hero", "Slime")
    }

    #[test]
    fn arrow_line_is_a_hit_on_the_target() {
        let event = classify_line("Hero -> Slime (hit, remaining HP: 12)", &names());
        assert_eq!(event.kind, LogEventKind::AttackHit);
        assert_eq!(event.acting_side, Some(Side::Attacker));
        assert_eq!(event.hp_update, Some(HpUpdate { side: Side::Defender, new_value: 12 }));
    }

    #[test]
    fn negative_hp_is_clamped_to_zero() {
        let event = classify_line("Slime -> Hero (critical hit, remaining HP: -4)", &names());
        assert_eq!(event.acting_side, Some(Side::Defender));
        assert_eq!(event.hp_update, Some(HpUpdate { side: Side::Attacker, new_value: 0 }));
    }

    #[test]
    fn korean_attack_line() {
        let names = ActorNames::new("용사", "슬라임");
        let event = classify_line("용사 -> 슬라임 (17 vs AC12) 명중! 6 데미지 (남은HP:9)", &names);
        assert_eq!(event.kind, LogEventKind::AttackHit);
        assert_eq!(event.acting_side, Some(Side::Attacker));
        assert_eq!(event.hp_update, Some(HpUpdate { side: Side::Defender, new_value: 9 }));

        let miss = classify_line("슬라임 -> 용사 (4 vs AC14) 빗나감!", &names);
        assert_eq!(miss.kind, LogEventKind::AttackMiss);
        assert_eq!(miss.acting_side, Some(Side::Defender));
        assert_eq!(miss.hp_update, None);
    }

    #[test]
    fn possessive_marks_the_actor() {
        let event = classify_line("Slime's acid attack lands on Hero", &names());
        assert_eq!(event.acting_side, Some(Side::Defender));

        let names = ActorNames::new("용사", "슬라임");
        let event = classify_line("슬라임의 장비 효과! 용사의 방어력 -2", &names);
        assert_eq!(event.acting_side, Some(Side::Defender));
    }

    #[test]
    fn bracketed_subject_opens_the_line() {
        let event = classify_line("[Slime] braces itself", &names());
        assert_eq!(event.acting_side, Some(Side::Defender));
    }

    #[test]
    fn name_inside_a_word_is_not_a_subject() {
        let names = ActorNames::new("Al", "Bo");
        let event = classify_line("Also, nothing happens.", &names);
        assert_eq!(event.acting_side, None);
    }

    #[test]
    fn prefix_names_prefer_the_longer_match() {
        let names = ActorNames::new("Hero", "Hero Jr");
        let event = classify_line("Hero Jr -> Hero (hit, remaining HP: 3)", &names);
        assert_eq!(event.acting_side, Some(Side::Defender));
        assert_eq!(event.hp_update, Some(HpUpdate { side: Side::Attacker, new_value: 3 }));
    }

    #[test]
    fn revival_reading_prefers_defender() {
        let event = classify_line("Slime revives thanks to Hero's mercy! HP 8", &names());
        assert_eq!(event.kind, LogEventKind::Revival);
        assert_eq!(event.hp_update, Some(HpUpdate { side: Side::Defender, new_value: 8 }));
    }

    #[test]
    fn generic_reading_goes_to_leftmost_name() {
        let event = classify_line("Hero's holy power! HP +5 (HP: 27)", &names());
        assert_eq!(event.kind, LogEventKind::StatusOrOther);
        assert_eq!(event.hp_update, Some(HpUpdate { side: Side::Attacker, new_value: 27 }));

        let names = ActorNames::new("용사", "슬라임");
        let poison = classify_line("슬라임에게 독 데미지 3! (남은HP:4)", &names);
        assert_eq!(poison.hp_update, Some(HpUpdate { side: Side::Defender, new_value: 4 }));
    }

    #[test]
    fn reading_without_a_name_is_dropped() {
        let event = classify_line("Someone -> Nobody (hit, remaining HP: 2)", &names());
        assert_eq!(event.hp_update, None);
        assert_eq!(event.acting_side, None);
    }

    #[test]
    fn defeat_names_the_side_before_the_keyword() {
        let event = classify_line("Hero stands tall and Slime collapses!", &names());
        assert_eq!(event.kind, LogEventKind::Defeat);
        assert_eq!(event.defeated, Some(Side::Defender));

        let names = ActorNames::new("용사", "슬라임");
        let event = classify_line("용사이(가) 쓰러졌다!", &names);
        assert_eq!(event.defeated, Some(Side::Attacker));
    }

    #[test]
    fn finishing_blow_stays_a_hit() {
        let event = classify_line("Hero -> Slime (hit, remaining HP: 0) Slime collapses!", &names());
        assert_eq!(event.kind, LogEventKind::AttackHit);
        assert_eq!(event.acting_side, Some(Side::Attacker));
        assert_eq!(event.defeated, Some(Side::Defender));

        let names = ActorNames::new("용사", "슬라임");
        let event = classify_line("용사 -> 슬라임 (18 vs AC12) 명중! 9 데미지 (남은HP:0) 슬라임이(가) 쓰러졌다!", &names);
        assert_eq!(event.kind, LogEventKind::AttackHit);
        assert_eq!(event.defeated, Some(Side::Defender));
    }

    #[test]
    fn potion_use_is_extracted() {
        let event = classify_line("Hero's Healing Potion used!", &names());
        assert_eq!(event.potion_consumed.as_deref(), Some("Healing Potion"));
        assert_eq!(event.acting_side, Some(Side::Attacker));
        assert_eq!(event.kind, LogEventKind::StatusOrOther);

        let names = ActorNames::new("용사", "슬라임");
        let event = classify_line("용사의 힘의 물약 발동! (ATTACK_UP)", &names);
        assert_eq!(event.potion_consumed.as_deref(), Some("힘의 물약"));
    }

    #[test]
    fn victory_and_rounds() {
        assert_eq!(classify_line("Hero wins! +35 gold", &names()).kind, LogEventKind::VictoryDeclaration);
        assert_eq!(classify_line("용사 승리! +35 골드", &names()).kind, LogEventKind::VictoryDeclaration);
        assert_eq!(classify_line("--- 라운드 4 ---", &names()).kind, LogEventKind::RoundMarker);
    }

    #[test]
    fn empty_names_match_nothing() {
        let names = ActorNames::new("", "");
        let event = classify_line("-> (hit, remaining HP: 3)", &names);
        assert_eq!(event.acting_side, None);
        assert_eq!(event.hp_update, None);
    }
}
